use crate::domain::token::{default_pattern, PatternToken};
use crate::error::{BuildVersionError, Result};
use regex::Regex;
use std::fmt;

const VERSION_GROUP: &str = "version";
const VERSION_HEAD_GROUP: &str = "version_head";
const VERSION_TAIL_GROUP: &str = "version_tail";
const VARIANT_NUMBER_GROUP: &str = "variant_number";

/// Version and build number extracted from a tag name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCapture {
    pub build_version: String,
    pub build_number: u64,
}

/// A build tag pattern compiled for one concrete build variant
///
/// The token list is folded into a single anchored regular expression. Every
/// piece of user text is escaped, and captures are read by name only:
///
/// | token | fragment |
/// |---|---|
/// | `literal`, `separator` | escaped text |
/// | `optional_separator` | `(?:text)?` |
/// | `any_before_dot` | `[^.]*?` |
/// | `build_version` | `\d+(\.\d+)*` with the last group captured separately |
/// | `build_variant_name` | escaped variant name, then optional digits |
/// | `any_optional_symbols` | `(?:.*)?`, starting with a symbol right after the variant name |
///
/// The build number is either the digits right after the variant name
/// (`v1.2-release42`) or, when there are none, the last dotted group of the
/// version (`v1.0.323-release`).
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    variant: String,
    tokens: Vec<PatternToken>,
}

impl CompiledPattern {
    /// Compile an ordered token list for the given build variant
    ///
    /// # Errors
    /// `MalformedPattern` when the list lacks exactly one `build_version` and
    /// exactly one `build_variant_name`, or the variant name is empty.
    pub fn compile(tokens: &[PatternToken], variant: &str) -> Result<Self> {
        if variant.is_empty() {
            return Err(BuildVersionError::pattern("build variant name is empty"));
        }

        let count = |wanted: &PatternToken| tokens.iter().filter(|t| *t == wanted).count();

        match count(&PatternToken::BuildVersion) {
            1 => {}
            0 => {
                return Err(BuildVersionError::pattern(
                    "pattern has no build_version token",
                ))
            }
            n => {
                return Err(BuildVersionError::pattern(format!(
                    "pattern has {} build_version tokens, expected one",
                    n
                )))
            }
        }

        match count(&PatternToken::BuildVariantName) {
            1 => {}
            0 => {
                return Err(BuildVersionError::pattern(
                    "pattern has no build_variant_name token",
                ))
            }
            n => {
                return Err(BuildVersionError::pattern(format!(
                    "pattern has {} build_variant_name tokens, expected one",
                    n
                )))
            }
        }

        let body: String = tokens
            .iter()
            .enumerate()
            .map(|(i, token)| {
                let follows_variant = i > 0 && tokens[i - 1] == PatternToken::BuildVariantName;
                fragment(token, variant, follows_variant)
            })
            .collect();
        let source = format!("^{}$", body);

        let regex = Regex::new(&source).map_err(|e| {
            BuildVersionError::pattern(format!("cannot compile '{}': {}", source, e))
        })?;

        Ok(CompiledPattern {
            regex,
            variant: variant.to_string(),
            tokens: tokens.to_vec(),
        })
    }

    /// Compile configured descriptors, or the default pattern when there are none
    pub fn from_descriptors(descriptors: Option<&[String]>, variant: &str) -> Result<Self> {
        let tokens = match descriptors {
            Some(descriptors) if !descriptors.is_empty() => PatternToken::parse_all(descriptors)?,
            _ => default_pattern(),
        };
        Self::compile(&tokens, variant)
    }

    /// Compile the default pattern for a variant
    pub fn default_for(variant: &str) -> Result<Self> {
        Self::compile(&default_pattern(), variant)
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    pub fn tokens(&self) -> &[PatternToken] {
        &self.tokens
    }

    /// The generated regular expression
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.capture(name).is_some()
    }

    /// Extract the version and build number from a tag name
    ///
    /// Returns `None` when the name does not match, or matches without a build
    /// number (e.g. `v1-release`).
    pub fn capture(&self, name: &str) -> Option<BuildCapture> {
        let captures = self.regex.captures(name)?;

        if let Some(number) = captures.name(VARIANT_NUMBER_GROUP) {
            let build_number = number.as_str().parse().ok()?;
            let build_version = captures.name(VERSION_GROUP)?.as_str().to_string();
            return Some(BuildCapture {
                build_version,
                build_number,
            });
        }

        let tail = captures.name(VERSION_TAIL_GROUP)?;
        let build_number = tail.as_str().parse().ok()?;
        let build_version = captures.name(VERSION_HEAD_GROUP)?.as_str().to_string();

        Some(BuildCapture {
            build_version,
            build_number,
        })
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.regex.as_str())
    }
}

fn fragment(token: &PatternToken, variant: &str, follows_variant: bool) -> String {
    match token {
        PatternToken::Literal(text) | PatternToken::Separator(text) => regex::escape(text),
        PatternToken::OptionalSeparator(text) => format!("(?:{})?", regex::escape(text)),
        // Lazy so a multi-digit major version stays in the version capture.
        PatternToken::AnyBeforeDot => "[^.]*?".to_string(),
        // Lazy head so the optional tail takes the last dotted group.
        PatternToken::BuildVersion => format!(
            r"(?P<{}>(?P<{}>\d+(?:\.\d+)*?)(?:\.(?P<{}>\d+))?)",
            VERSION_GROUP, VERSION_HEAD_GROUP, VERSION_TAIL_GROUP
        ),
        PatternToken::BuildVariantName => {
            format!(r"{}(?P<{}>\d+)?", regex::escape(variant), VARIANT_NUMBER_GROUP)
        }
        // Right after the variant name a letter or digit would extend the name
        // (`google` vs `googleDebug`), so the suffix must start with a symbol.
        PatternToken::AnyOptionalSymbols if follows_variant => "(?:[^A-Za-z0-9].*)?".to_string(),
        PatternToken::AnyOptionalSymbols => "(?:.*)?".to_string(),
    }
}
