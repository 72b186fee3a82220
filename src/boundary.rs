use std::fmt;

/// Warnings that occur when a variant falls back instead of using its tags.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No tag matched, a placeholder build was used instead
    StubTagUsed { variant: String, stub_name: String },
    /// Versions come from the static defaults rather than tags
    DefaultVersionsUsed { variant: String },
    /// The changelog could not be computed and was replaced by the empty notice
    ChangelogUnavailable { variant: String, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::StubTagUsed { variant, stub_name } => {
                write!(
                    f,
                    "No build tag found for variant '{}', using stub tag '{}'",
                    variant, stub_name
                )
            }
            BoundaryWarning::DefaultVersionsUsed { variant } => {
                write!(
                    f,
                    "Variant '{}' uses default versions instead of build tags",
                    variant
                )
            }
            BoundaryWarning::ChangelogUnavailable { variant, reason } => {
                write!(
                    f,
                    "Cannot compute changelog for variant '{}': {}",
                    variant, reason
                )
            }
        }
    }
}
