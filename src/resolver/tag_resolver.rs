use crate::domain::{CompiledPattern, ResolvedBuild, TagMatch, TagRef};
use crate::error::Result;
use crate::git::Repository;
use log::debug;

/// Finds the current build tag of one build variant
///
/// The current build is the matching tag with the greatest build number. Commit
/// order and tag creation order play no part: a tag created earlier with a
/// higher build number still wins.
#[derive(Debug, Clone)]
pub struct TagResolver {
    pattern: CompiledPattern,
}

impl TagResolver {
    /// Create a new resolver for a compiled pattern
    pub fn new(pattern: CompiledPattern) -> Self {
        TagResolver { pattern }
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    pub fn variant(&self) -> &str {
        self.pattern.variant()
    }

    /// Match a single tag against the pattern
    pub fn match_tag(&self, tag: &TagRef) -> Option<TagMatch> {
        let capture = self.pattern.capture(&tag.name)?;
        Some(TagMatch {
            tag: tag.clone(),
            build_version: capture.build_version,
            build_number: capture.build_number,
        })
    }

    /// All matching tags, ordered by build number ascending
    ///
    /// Tags that do not match (other variants, free-form tags) are skipped.
    /// Equal build numbers keep their input order.
    pub fn matches(&self, tags: &[TagRef]) -> Vec<TagMatch> {
        let mut matches: Vec<TagMatch> = tags
            .iter()
            .filter_map(|tag| {
                let matched = self.match_tag(tag);
                if matched.is_none() {
                    debug!(
                        "tag '{}' does not match pattern {} for variant '{}'",
                        tag.name,
                        self.pattern,
                        self.variant()
                    );
                }
                matched
            })
            .collect();

        matches.sort_by_key(|m| m.build_number);
        matches
    }

    /// The matching tag with the greatest build number
    ///
    /// On equal build numbers the tag that comes later in `tags` wins.
    pub fn resolve(&self, tags: &[TagRef]) -> Option<TagMatch> {
        self.matches(tags).pop()
    }

    /// The matching tag with the greatest build number below the current one
    ///
    /// Used to find the start of the changelog range. Several tags may share
    /// the current tag's commit; they are still ordered by build number only.
    pub fn resolve_previous(&self, tags: &[TagRef], current: &ResolvedBuild) -> Option<TagMatch> {
        self.matches(tags)
            .into_iter()
            .rev()
            .find(|m| m.build_number < current.build_number)
    }

    /// List tags from a repository and resolve the current build
    pub fn resolve_repository<R: Repository>(&self, repo: &R) -> Result<Option<TagMatch>> {
        let tags = repo.list_tags()?;
        let resolved = self.resolve(&tags);

        match &resolved {
            Some(m) => debug!(
                "resolved tag '{}' (build {}) for variant '{}' among {} tags",
                m.tag.name,
                m.build_number,
                self.variant(),
                tags.len()
            ),
            None => debug!(
                "no tag among {} matches variant '{}'",
                tags.len(),
                self.variant()
            ),
        }

        Ok(resolved)
    }
}
