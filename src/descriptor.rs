//! Version code, version name and persisted build for one variant.
//!
//! Decision table, first matching row wins:
//!
//! | versions from tag | tag resolved | stubs allowed | result |
//! |---|---|---|---|
//! | no  | -   | -   | static defaults (or nothing), no build |
//! | yes | yes | -   | build from the tag, code = build number, name = tag name |
//! | yes | no  | yes | stub build, code = 1, name = stub tag name |
//! | yes | no  | no  | `NoTagFound` |

use crate::boundary::BoundaryWarning;
use crate::config::{DefaultConfig, OutputConfig};
use crate::domain::{ResolvedBuild, TagMatch};
use crate::error::{BuildVersionError, Result};
use crate::git::Repository;
use crate::resolver::TagResolver;
use log::debug;

/// Flags controlling where a variant's versions come from
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BuildConfig {
    pub use_versions_from_tag: bool,
    pub use_stubs_for_tag_as_fallback: bool,
    pub use_defaults_for_versions_as_fallback: bool,
    pub default_config: DefaultConfig,
}

impl BuildConfig {
    /// Combine a variant's output flags with the static default versions
    pub fn from_output(output: &OutputConfig, default_config: &DefaultConfig) -> Self {
        BuildConfig {
            use_versions_from_tag: output.use_versions_from_tag,
            use_stubs_for_tag_as_fallback: output.use_stubs_for_tag_as_fallback,
            use_defaults_for_versions_as_fallback: output.use_defaults_for_versions_as_fallback,
            default_config: default_config.clone(),
        }
    }
}

/// Versions handed to packaging, plus the build to persist (if any)
#[derive(Debug, Clone, PartialEq)]
pub struct BuildDescriptor {
    pub version_code: Option<u64>,
    pub version_name: Option<String>,
    pub build: Option<ResolvedBuild>,
    /// Non-fatal conditions met while building the descriptor
    pub warnings: Vec<BoundaryWarning>,
}

/// Build the descriptor of a variant from its resolved tag
///
/// # Errors
/// `NoTagFound` when versions must come from a tag, none resolved, and stubs
/// are not allowed.
pub fn build(resolved: Option<TagMatch>, variant: &str, config: &BuildConfig) -> Result<BuildDescriptor> {
    if !config.use_versions_from_tag {
        return Ok(from_defaults(variant, config));
    }

    match resolved {
        Some(tag_match) => {
            let build = tag_match.into_build(variant);
            debug!(
                "variant '{}' uses tag '{}' (build {})",
                variant, build.name, build.build_number
            );
            Ok(BuildDescriptor {
                version_code: Some(build.build_number),
                version_name: Some(build.name.clone()),
                build: Some(build),
                warnings: Vec::new(),
            })
        }
        None if config.use_stubs_for_tag_as_fallback => {
            let build = ResolvedBuild::stub(variant);
            let warning = BoundaryWarning::StubTagUsed {
                variant: variant.to_string(),
                stub_name: build.name.clone(),
            };
            debug!("{}", warning);
            Ok(BuildDescriptor {
                version_code: Some(build.build_number),
                version_name: Some(build.name.clone()),
                build: Some(build),
                warnings: vec![warning],
            })
        }
        None => Err(BuildVersionError::no_tag(variant)),
    }
}

fn from_defaults(variant: &str, config: &BuildConfig) -> BuildDescriptor {
    if !config.use_defaults_for_versions_as_fallback {
        debug!("variant '{}' takes no versions from tags or defaults", variant);
        return BuildDescriptor {
            version_code: None,
            version_name: None,
            build: None,
            warnings: Vec::new(),
        };
    }

    let defaults = &config.default_config;
    let warning = BoundaryWarning::DefaultVersionsUsed {
        variant: variant.to_string(),
    };
    debug!("{}", warning);

    BuildDescriptor {
        version_code: defaults.version_code,
        version_name: defaults.version_name.clone(),
        build: None,
        warnings: vec![warning],
    }
}

/// Resolve a variant against a repository and build its descriptor
///
/// The repository's tags are only listed when versions come from tags.
pub fn describe<R: Repository>(
    repo: &R,
    variant: &str,
    output: &OutputConfig,
    default_config: &DefaultConfig,
) -> Result<BuildDescriptor> {
    let config = BuildConfig::from_output(output, default_config);

    if !config.use_versions_from_tag {
        return build(None, variant, &config);
    }

    let resolver = TagResolver::new(output.compile_pattern(variant)?);
    let resolved = resolver.resolve_repository(repo)?;

    build(resolved, variant, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TagRef;
    use crate::git::MockRepository;

    fn tag_match(name: &str, number: u64) -> TagMatch {
        TagMatch {
            tag: TagRef::new(name, "abc123").with_message("Release notes"),
            build_version: "1.0".to_string(),
            build_number: number,
        }
    }

    fn config(from_tag: bool, stubs: bool, defaults: bool) -> BuildConfig {
        BuildConfig {
            use_versions_from_tag: from_tag,
            use_stubs_for_tag_as_fallback: stubs,
            use_defaults_for_versions_as_fallback: defaults,
            default_config: DefaultConfig {
                version_code: Some(42),
                version_name: Some("4.2".to_string()),
            },
        }
    }

    #[test]
    fn test_tag_versions_disabled_uses_defaults() {
        let descriptor = build(
            Some(tag_match("v1.0.7-debug", 7)),
            "debug",
            &config(false, true, true),
        )
        .unwrap();

        assert_eq!(descriptor.version_code, Some(42));
        assert_eq!(descriptor.version_name.as_deref(), Some("4.2"));
        assert!(descriptor.build.is_none());
    }

    #[test]
    fn test_tag_versions_and_defaults_disabled_gives_nothing() {
        let descriptor = build(None, "debug", &config(false, false, false)).unwrap();
        assert_eq!(descriptor.version_code, None);
        assert_eq!(descriptor.version_name, None);
        assert!(descriptor.build.is_none());
    }

    #[test]
    fn test_resolved_tag_provides_versions() {
        let descriptor = build(
            Some(tag_match("v1.0.7-debug", 7)),
            "debug",
            &config(true, false, false),
        )
        .unwrap();

        assert_eq!(descriptor.version_code, Some(7));
        assert_eq!(descriptor.version_name.as_deref(), Some("v1.0.7-debug"));
        let build = descriptor.build.unwrap();
        assert_eq!(build.build_variant, "debug");
        assert_eq!(build.message, "Release notes");
        assert!(descriptor.warnings.is_empty());
    }

    #[test]
    fn test_missing_tag_falls_back_to_stub() {
        let descriptor = build(None, "debug", &config(true, true, true)).unwrap();

        assert_eq!(descriptor.version_code, Some(1));
        let build = descriptor.build.unwrap();
        assert!(build.is_stub());
        assert_eq!(descriptor.version_name, Some(build.name.clone()));
        assert_eq!(descriptor.warnings.len(), 1);
    }

    #[test]
    fn test_missing_tag_without_stub_fails() {
        let err = build(None, "debug", &config(true, false, true)).unwrap_err();
        assert!(err.is_no_tag_found());
    }

    #[test]
    fn test_describe_skips_tag_lookup_when_disabled() {
        let mut repo = MockRepository::new();
        repo.tag("v1.0.3-debug", "c1");

        let output = OutputConfig {
            use_versions_from_tag: false,
            ..OutputConfig::default()
        };
        let descriptor = describe(&repo, "debug", &output, &DefaultConfig::default()).unwrap();

        assert_eq!(repo.list_tags_calls(), 0);
        assert!(descriptor.build.is_none());
        assert_eq!(descriptor.version_code, None);
    }

    #[test]
    fn test_describe_resolves_highest_build() {
        let mut repo = MockRepository::new();
        repo.tag("v1.0.3-debug", "c1");
        repo.tag("v1.0.9-debug", "c2");
        repo.tag("v1.0.5-debug", "c3");

        let descriptor = describe(
            &repo,
            "debug",
            &OutputConfig::default(),
            &DefaultConfig::default(),
        )
        .unwrap();

        assert_eq!(repo.list_tags_calls(), 1);
        assert_eq!(descriptor.version_code, Some(9));
    }

    #[test]
    fn test_describe_fails_on_malformed_pattern_before_lookup() {
        let repo = MockRepository::new();
        let output = OutputConfig {
            tag_pattern: Some(vec!["literal:v".to_string(), "build_version".to_string()]),
            ..OutputConfig::default()
        };

        let err = describe(&repo, "debug", &output, &DefaultConfig::default()).unwrap_err();
        assert!(matches!(err, BuildVersionError::MalformedPattern(_)));
        assert_eq!(repo.list_tags_calls(), 0);
    }
}
