// Built-in risk categories for web-component sources.
//
// Rule evaluation looks categories up by name, so renaming one here also
// requires updating the gap rules that reference it.

pub const DEFAULT_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "eventPropagation",
        &[
            r"stopPropagation\(\)",
            r"stopImmediatePropagation\(\)",
            r"preventDefault\(\)",
            r"composed:\s*true",
            r"bubbles:\s*true",
        ],
    ),
    (
        "disabledStates",
        &[
            r"if\s*\(\s*this\.disabled\s*\)",
            r"this\.disabled\s*[=!]==?",
            r"\[disabled\]",
            r"aria-disabled",
        ],
    ),
    (
        "formIntegration",
        &[
            r"attachInternals\(\)",
            r"static\s+formAssociated",
            r"setFormValue\(",
            r#"type\s*=\s*["']submit["']"#,
            r"requestSubmit\(",
        ],
    ),
    (
        "asyncOperations",
        &[
            r"async\s+\w+\s*\(",
            r"await\s+\w+",
            r"new\s+Promise\b",
            r"setTimeout\(",
            r"requestAnimationFrame\(",
        ],
    ),
    (
        "eventListeners",
        &[
            r#"addEventListener\(\s*['"]\w+['"]"#,
            r"@(?:click|keydown|keyup|input|change|submit)=",
        ],
    ),
    (
        "focusManagement",
        &[
            r"\.focus\(\)",
            r"\.blur\(\)",
            r"tabindex",
            r"delegatesFocus",
        ],
    ),
];
