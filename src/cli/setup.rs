//! Runtime setup: thread pool sizing and logging.

/// Configure the rayon global thread pool once at startup
pub fn configure_thread_pool(jobs: usize) {
    let workers = get_worker_count(jobs);
    let builder = rayon::ThreadPoolBuilder::new().num_threads(workers);

    match builder.build_global() {
        Ok(()) => log::debug!("Using {} worker threads", workers),
        Err(e) => log::debug!("Thread pool already configured: {}", e),
    }
}

/// Get the number of worker threads to use
pub fn get_worker_count(jobs: usize) -> usize {
    if jobs == 0 {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    } else {
        jobs
    }
}

/// Log filter for a `-v` count.
pub fn log_level(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// Initialize env_logger. `RUST_LOG`, when set, overrides the `-v` level.
pub fn init_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log_level(verbosity));
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.format_timestamp(None).format_target(false);

    // A second init (tests, embedding) keeps the first logger.
    let _ = builder.try_init();
}
