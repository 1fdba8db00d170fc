//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    use std::path::PathBuf;

    pub fn dir() -> PathBuf {
        "site".into()
    }
}

// ============================================================================
// [manpage] Section Defaults
// ============================================================================

pub mod manpage {
    use std::path::PathBuf;

    pub fn preprocess() -> Option<PathBuf> {
        None
    }

    pub fn command() -> Vec<String> {
        vec!["pandoc".into()]
    }
}
