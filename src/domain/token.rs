use crate::error::{BuildVersionError, Result};
use std::fmt;
use std::str::FromStr;

/// One step of a build tag pattern
///
/// A pattern is an ordered list of tokens. Each token is matched against the
/// tag name in sequence, and the whole list must consume the whole name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternToken {
    /// Exact text
    Literal(String),
    /// Exact text between two parts of the tag
    Separator(String),
    /// Text that may or may not be present
    OptionalSeparator(String),
    /// Any run of characters up to (not including) the next `.`
    AnyBeforeDot,
    /// Dot-delimited numeric version, e.g. `1.0.323`
    BuildVersion,
    /// The build variant name supplied at resolution time
    BuildVariantName,
    /// Any trailing characters, possibly none
    AnyOptionalSymbols,
}

impl PatternToken {
    pub fn literal(text: impl Into<String>) -> Self {
        PatternToken::Literal(text.into())
    }

    pub fn separator(text: impl Into<String>) -> Self {
        PatternToken::Separator(text.into())
    }

    pub fn optional_separator(text: impl Into<String>) -> Self {
        PatternToken::OptionalSeparator(text.into())
    }

    /// Descriptor name used in configuration files
    pub fn kind(&self) -> &'static str {
        match self {
            PatternToken::Literal(_) => "literal",
            PatternToken::Separator(_) => "separator",
            PatternToken::OptionalSeparator(_) => "optional_separator",
            PatternToken::AnyBeforeDot => "any_before_dot",
            PatternToken::BuildVersion => "build_version",
            PatternToken::BuildVariantName => "build_variant_name",
            PatternToken::AnyOptionalSymbols => "any_optional_symbols",
        }
    }

    /// Parse an ordered list of descriptor strings
    pub fn parse_all<S: AsRef<str>>(descriptors: &[S]) -> Result<Vec<PatternToken>> {
        descriptors.iter().map(|d| d.as_ref().parse()).collect()
    }
}

/// The pattern used when a variant configures none: `v<version>-<variant>[anything]`
///
/// Accepts `v1.0.2-release` as well as `v1.0.2-release-androidAuto` for the
/// variant `release`.
pub fn default_pattern() -> Vec<PatternToken> {
    vec![
        PatternToken::literal("v"),
        PatternToken::BuildVersion,
        PatternToken::separator("-"),
        PatternToken::BuildVariantName,
        PatternToken::AnyOptionalSymbols,
    ]
}

/// Canonical name for a descriptor, accepting both `snake_case` and `camelCase`
fn normalize_kind(kind: &str) -> String {
    let mut normalized = String::with_capacity(kind.len() + 4);
    for c in kind.trim().chars() {
        if c.is_ascii_uppercase() {
            normalized.push('_');
            normalized.push(c.to_ascii_lowercase());
        } else {
            normalized.push(c);
        }
    }
    normalized.trim_start_matches('_').to_string()
}

impl FromStr for PatternToken {
    type Err = BuildVersionError;

    /// Parse a token descriptor such as `literal:cabinet`, `separator:+` or `build_version`
    fn from_str(descriptor: &str) -> Result<Self> {
        let (kind, text) = match descriptor.split_once(':') {
            Some((kind, text)) => (kind, Some(text)),
            None => (descriptor, None),
        };

        let kind = normalize_kind(kind);

        let require_text = |text: Option<&str>| -> Result<String> {
            match text {
                Some(t) if !t.is_empty() => Ok(t.to_string()),
                _ => Err(BuildVersionError::pattern(format!(
                    "token '{}' requires non-empty text, e.g. '{}:-'",
                    kind, kind
                ))),
            }
        };

        let reject_text = |token: PatternToken| -> Result<PatternToken> {
            match text {
                Some(t) => Err(BuildVersionError::pattern(format!(
                    "token '{}' takes no text, got '{}'",
                    token.kind(),
                    t
                ))),
                None => Ok(token),
            }
        };

        match kind.as_str() {
            "literal" => Ok(PatternToken::Literal(require_text(text)?)),
            "separator" => Ok(PatternToken::Separator(require_text(text)?)),
            "optional_separator" => Ok(PatternToken::OptionalSeparator(require_text(text)?)),
            "any_before_dot" => reject_text(PatternToken::AnyBeforeDot),
            "build_version" => reject_text(PatternToken::BuildVersion),
            "build_variant_name" => reject_text(PatternToken::BuildVariantName),
            "any_optional_symbols" => reject_text(PatternToken::AnyOptionalSymbols),
            _ => Err(BuildVersionError::pattern(format!(
                "unknown token descriptor '{}'",
                descriptor
            ))),
        }
    }
}

impl fmt::Display for PatternToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternToken::Literal(text)
            | PatternToken::Separator(text)
            | PatternToken::OptionalSeparator(text) => write!(f, "{}:{}", self.kind(), text),
            _ => write!(f, "{}", self.kind()),
        }
    }
}
