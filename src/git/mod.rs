//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the few read-only Git
//! operations git-buildversion needs, allowing for a real repository backed
//! by libgit2 and an in-memory mock for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations are:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! # Usage
//!
//! Resolution code depends on the [Repository] trait rather than concrete
//! implementations, so it can be exercised without a repository on disk.
//!
//! ```rust
//! # use git_buildversion::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let tags = repo.list_tags()?;
//! if let Some(tag) = tags.first() {
//!     let commits = repo.commits_between(None, &tag.target_commit_sha)?;
//!     println!("{} commits up to {}", commits.len(), tag.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::TagRef;
use crate::error::Result;

/// Commit information for changelog rendering
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// The full commit hash
    pub sha: String,
    /// The commit message
    pub message: String,
}

impl CommitInfo {
    pub fn new(sha: impl Into<String>, message: impl Into<String>) -> Self {
        CommitInfo {
            sha: sha.into(),
            message: message.into(),
        }
    }
}

/// Read-only git operations used to resolve builds and changelogs
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync` to allow safe sharing across threads.
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying errors (like `git2::Error`) to
/// [crate::error::BuildVersionError] variants.
pub trait Repository: Send + Sync {
    /// Get all tags in the repository
    ///
    /// Every tag carries the commit it points at (annotated tags peeled), its
    /// annotation message (empty for lightweight tags) and a creation order
    /// hint. The order of the returned list is unspecified.
    ///
    /// # Example
    /// ```rust
    /// # use git_buildversion::git::Repository;
    /// # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
    /// for tag in repo.list_tags()? {
    ///     println!("{} -> {}", tag.name, tag.target_commit_sha);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    fn list_tags(&self) -> Result<Vec<TagRef>>;

    /// Get commits between two commits
    ///
    /// Returns commits reachable from `to_sha` (inclusive) and not reachable
    /// from `from_sha` (exclusive), in chronological order (oldest first).
    /// With no `from_sha`, returns the whole history up to `to_sha`.
    ///
    /// # Arguments
    /// * `from_sha` - Starting commit (exclusive - not included in results)
    /// * `to_sha` - Ending commit (inclusive - included in results)
    ///
    /// # Example
    /// ```rust
    /// # use git_buildversion::git::Repository;
    /// # fn example<R: Repository>(repo: &R, previous: &str, current: &str) -> Result<(), Box<dyn std::error::Error>> {
    /// let commits = repo.commits_between(Some(previous), current)?;
    /// for commit in commits {
    ///     println!("{}: {}", commit.sha, commit.message);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    fn commits_between(&self, from_sha: Option<&str>, to_sha: &str) -> Result<Vec<CommitInfo>>;
}
