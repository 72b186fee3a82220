use thiserror::Error;

/// Unified error type for git-buildversion operations
#[derive(Error, Debug)]
pub enum BuildVersionError {
    #[error("Malformed build tag pattern: {0}")]
    MalformedPattern(String),

    #[error("No build tag found for variant '{variant}'")]
    NoTagFound { variant: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for Results in git-buildversion
pub type Result<T> = std::result::Result<T, BuildVersionError>;

impl BuildVersionError {
    /// Create a malformed pattern error with context
    pub fn pattern(msg: impl Into<String>) -> Self {
        BuildVersionError::MalformedPattern(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BuildVersionError::Config(msg.into())
    }

    /// Create a missing tag error for a build variant
    pub fn no_tag(variant: impl Into<String>) -> Self {
        BuildVersionError::NoTagFound {
            variant: variant.into(),
        }
    }

    /// Whether this error means no tag matched, as opposed to a broken setup
    pub fn is_no_tag_found(&self) -> bool {
        matches!(self, BuildVersionError::NoTagFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BuildVersionError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BuildVersionError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_no_tag_found_names_variant() {
        let err = BuildVersionError::no_tag("googleDebug");
        assert_eq!(
            err.to_string(),
            "No build tag found for variant 'googleDebug'"
        );
        assert!(err.is_no_tag_found());
        assert!(!BuildVersionError::pattern("x").is_no_tag_found());
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<u64>("not json").unwrap_err();
        let err: BuildVersionError = json_err.into();
        assert!(err.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (BuildVersionError::config("x"), "Configuration error"),
            (BuildVersionError::pattern("x"), "Malformed build tag pattern"),
            (BuildVersionError::no_tag("x"), "No build tag found"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_error_special_characters_in_messages() {
        let special_chars = vec![
            "literal with\nnewline",
            "separator with 'quotes'",
            "pattern with \\ backslash",
            "pattern with (.*)? metacharacters",
        ];

        for msg in special_chars {
            let err = BuildVersionError::pattern(msg);
            assert!(err.to_string().contains(msg));
        }
    }
}
