use crate::domain::TagRef;
use crate::error::{BuildVersionError, Result};
use crate::git::{CommitInfo, Repository};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock repository for testing without actual git operations
///
/// Commits form a single linear history in insertion order.
#[derive(Debug, Default)]
pub struct MockRepository {
    commits: Vec<CommitInfo>,
    tags: Vec<TagRef>,
    list_tags_calls: AtomicUsize,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a commit to the history
    pub fn add_commit(&mut self, sha: impl Into<String>, message: impl Into<String>) {
        self.commits.push(CommitInfo::new(sha, message));
    }

    /// Add a tag exactly as given
    pub fn add_tag(&mut self, tag: TagRef) {
        self.tags.push(tag);
    }

    /// Add a lightweight tag pointing to a commit
    pub fn tag(&mut self, name: impl Into<String>, sha: impl Into<String>) {
        let order = self.tags.len() as i64;
        self.tags.push(TagRef::new(name, sha).with_creation_order(order));
    }

    /// How many times `list_tags` has been called
    pub fn list_tags_calls(&self) -> usize {
        self.list_tags_calls.load(Ordering::SeqCst)
    }

    fn position(&self, sha: &str) -> Result<usize> {
        self.commits
            .iter()
            .position(|c| c.sha == sha)
            .ok_or_else(|| {
                BuildVersionError::Git(git2::Error::from_str(&format!("Commit not found: {}", sha)))
            })
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<TagRef>> {
        self.list_tags_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.tags.clone())
    }

    fn commits_between(&self, from_sha: Option<&str>, to_sha: &str) -> Result<Vec<CommitInfo>> {
        let end = self.position(to_sha)?;
        let start = match from_sha {
            Some(sha) => self.position(sha)? + 1,
            None => 0,
        };

        if start > end {
            return Ok(Vec::new());
        }

        Ok(self.commits[start..=end].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_repo() -> MockRepository {
        let mut repo = MockRepository::new();
        repo.add_commit("c1", "first commit");
        repo.add_commit("c2", "second commit");
        repo.add_commit("c3", "third commit");
        repo
    }

    #[test]
    fn test_mock_repository_tags() {
        let mut repo = linear_repo();
        repo.tag("v1.0.1-debug", "c1");
        repo.tag("v1.0.2-debug", "c3");

        let tags = repo.list_tags().unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[1].name, "v1.0.2-debug");
        assert_eq!(tags[1].creation_order, 1);
        assert_eq!(repo.list_tags_calls(), 1);
    }

    #[test]
    fn test_mock_repository_commits_between() {
        let repo = linear_repo();

        let commits = repo.commits_between(Some("c1"), "c3").unwrap();
        let messages: Vec<&str> = commits.iter().map(|c| c.message.as_str()).collect();
        assert_eq!(messages, vec!["second commit", "third commit"]);

        assert_eq!(repo.commits_between(None, "c2").unwrap().len(), 2);
        assert!(repo.commits_between(Some("c3"), "c3").unwrap().is_empty());
    }

    #[test]
    fn test_mock_repository_unknown_commit() {
        let repo = linear_repo();
        assert!(repo.commits_between(None, "missing").is_err());
    }

    #[test]
    fn test_mock_repository_default() {
        let repo = MockRepository::default();
        assert!(repo.list_tags().unwrap().is_empty());
    }
}
