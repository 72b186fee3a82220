//! Changelog between two resolved builds of a variant.
//!
//! Entries are rendered newest first as `• <message>`, preceded by the current
//! tag's annotation as `*<message>*` when there is one. Issue references are
//! rewritten into `[ISSUE-1](<prefix>ISSUE-1)` links.

use crate::boundary::BoundaryWarning;
use crate::config::{ChangelogConfig, DefaultConfig, OutputConfig};
use crate::descriptor::{self, BuildConfig, BuildDescriptor};
use crate::domain::{ChangelogEntry, ResolvedBuild, TagRef};
use crate::error::{BuildVersionError, Result};
use crate::git::{CommitInfo, Repository};
use crate::resolver::TagResolver;
use log::debug;
use regex::{Captures, Regex};

/// Rendered when no commit qualifies for the changelog
pub const NO_CHANGES: &str = "No changes compared to the previous build";

const BULLET: &str = "• ";

/// Rewrites issue references into links
#[derive(Debug, Clone)]
struct IssueLinker {
    pattern: Regex,
    url_prefix: String,
}

impl IssueLinker {
    fn link(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures| {
                format!("[{0}]({1}{0})", &caps[0], self.url_prefix)
            })
            .into_owned()
    }
}

/// A variant's descriptor together with its rendered changelog
#[derive(Debug, Clone, PartialEq)]
pub struct VariantChangelog {
    pub descriptor: BuildDescriptor,
    pub text: String,
    /// Descriptor fallbacks followed by changelog problems
    pub warnings: Vec<BoundaryWarning>,
}

/// Renders changelogs from commit messages
#[derive(Debug, Clone)]
pub struct ChangelogGenerator {
    issues: Option<IssueLinker>,
    commit_message_key: Option<String>,
}

impl ChangelogGenerator {
    /// Create a generator from configuration
    ///
    /// # Errors
    /// `Config` when the issue number pattern is not a valid regular expression.
    pub fn new(config: &ChangelogConfig) -> Result<Self> {
        let issues = match (&config.issue_number_pattern, &config.issue_url_prefix) {
            (Some(pattern), Some(url_prefix)) => {
                let pattern = Regex::new(pattern).map_err(|e| {
                    BuildVersionError::config(format!(
                        "invalid issue number pattern '{}': {}",
                        pattern, e
                    ))
                })?;
                Some(IssueLinker {
                    pattern,
                    url_prefix: url_prefix.clone(),
                })
            }
            _ => None,
        };

        Ok(ChangelogGenerator {
            issues,
            commit_message_key: config
                .commit_message_key
                .clone()
                .filter(|key| !key.is_empty()),
        })
    }

    /// Qualifying entries, newest first
    ///
    /// `commits` are expected oldest first, as the repository returns them.
    pub fn entries(&self, commits: &[CommitInfo]) -> Vec<ChangelogEntry> {
        commits
            .iter()
            .rev()
            .filter_map(|commit| {
                ChangelogEntry::from_commit(&commit.message, self.commit_message_key.as_deref())
            })
            .collect()
    }

    /// Render one entry as a bullet line with issue links
    pub fn render_entry(&self, entry: &ChangelogEntry) -> String {
        let message = match &self.issues {
            Some(issues) => issues.link(&entry.message),
            None => entry.message.clone(),
        };
        format!("{}{}", BULLET, message)
    }

    /// Render the changelog of `current` since `previous`
    pub fn generate(
        &self,
        current: &ResolvedBuild,
        previous: Option<&ResolvedBuild>,
        commits: &[CommitInfo],
    ) -> String {
        let entries = self.entries(commits);

        if entries.is_empty() {
            return no_changes(previous.map(|p| p.name.as_str()));
        }

        let mut lines = Vec::with_capacity(entries.len() + 1);

        let header = current.message.trim();
        if !header.is_empty() {
            lines.push(format!("*{}*", header));
        }

        lines.extend(entries.iter().map(|entry| self.render_entry(entry)));

        lines.join("\n").trim().to_string()
    }

    /// Render the changelog of `current` using the repository's history
    ///
    /// The previous build is the matching tag with the next lower build number.
    /// Any failure to read the history degrades to the "no changes" notice.
    pub fn generate_from_repository<R: Repository>(
        &self,
        repo: &R,
        resolver: &TagResolver,
        tags: &[TagRef],
        current: &ResolvedBuild,
    ) -> (String, Option<BoundaryWarning>) {
        let previous = resolver
            .resolve_previous(tags, current)
            .map(|m| m.into_build(current.build_variant.clone()));

        match &previous {
            Some(p) => debug!("changelog range: '{}'..'{}'", p.name, current.name),
            None => debug!("changelog range: start of history..'{}'", current.name),
        }

        let from_sha = previous.as_ref().map(|p| p.commit_sha.as_str());

        match repo.commits_between(from_sha, &current.commit_sha) {
            Ok(commits) => (self.generate(current, previous.as_ref(), &commits), None),
            Err(e) => {
                let warning = BoundaryWarning::ChangelogUnavailable {
                    variant: current.build_variant.clone(),
                    reason: e.to_string(),
                };
                debug!("{}", warning);
                (
                    no_changes(previous.as_ref().map(|p| p.name.as_str())),
                    Some(warning),
                )
            }
        }
    }

    /// Resolve a variant and render its changelog from one listing of the tags
    ///
    /// The same tag list feeds both the current build and the previous build,
    /// and the pattern is compiled once.
    ///
    /// # Errors
    /// `MalformedPattern`, `NoTagFound` and tag listing failures, as for
    /// [`descriptor::describe`]. Failures while reading the commit range only
    /// produce a warning.
    pub fn generate_for_variant<R: Repository>(
        &self,
        repo: &R,
        variant: &str,
        output: &OutputConfig,
        default_config: &DefaultConfig,
    ) -> Result<VariantChangelog> {
        let config = BuildConfig::from_output(output, default_config);

        if !config.use_versions_from_tag {
            let descriptor = descriptor::build(None, variant, &config)?;
            let mut warnings = descriptor.warnings.clone();
            warnings.push(BoundaryWarning::ChangelogUnavailable {
                variant: variant.to_string(),
                reason: "versions do not come from build tags".to_string(),
            });
            return Ok(VariantChangelog {
                descriptor,
                text: no_changes(None),
                warnings,
            });
        }

        let resolver = TagResolver::new(output.compile_pattern(variant)?);
        let tags = repo.list_tags()?;
        let descriptor = descriptor::build(resolver.resolve(&tags), variant, &config)?;
        let mut warnings = descriptor.warnings.clone();

        let text = match &descriptor.build {
            Some(current) => {
                let (text, warning) = self.generate_from_repository(repo, &resolver, &tags, current);
                warnings.extend(warning);
                text
            }
            None => no_changes(None),
        };

        Ok(VariantChangelog {
            descriptor,
            text,
            warnings,
        })
    }
}

/// The notice rendered when nothing changed
pub fn no_changes(previous_name: Option<&str>) -> String {
    match previous_name {
        Some(name) => format!("{} ({})", NO_CHANGES, name),
        None => NO_CHANGES.to_string(),
    }
}
