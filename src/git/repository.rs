use crate::domain::TagRef;
use crate::error::{BuildVersionError, Result};
use crate::git::CommitInfo;
use git2::{ObjectType, Oid, Repository as Git2Repo, Sort};
use log::debug;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Mutex<Git2Repo>,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Self::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository {
            repo: Mutex::new(repo),
        }
    }

    fn repo(&self) -> Result<MutexGuard<'_, Git2Repo>> {
        self.repo.lock().map_err(|_| {
            BuildVersionError::Git(git2::Error::from_str("repository lock poisoned"))
        })
    }
}

/// Tag as read from the repository, before creation order is assigned
struct RawTag {
    name: String,
    target_commit_sha: String,
    annotation_message: String,
    created_at: i64,
}

fn read_tag(repo: &Git2Repo, name: &str) -> Result<Option<RawTag>> {
    let reference = repo.find_reference(&format!("refs/tags/{}", name))?;

    let commit = match reference.peel(ObjectType::Commit) {
        Ok(object) => match object.into_commit() {
            Ok(commit) => commit,
            Err(_) => return Ok(None),
        },
        Err(e) => {
            debug!("skipping tag '{}' that does not point at a commit: {}", name, e);
            return Ok(None);
        }
    };

    let annotated = reference.target().and_then(|oid| repo.find_tag(oid).ok());

    let (annotation_message, created_at) = match annotated {
        Some(tag) => {
            let message = tag.message().unwrap_or("").trim().to_string();
            let created_at = tag
                .tagger()
                .map(|sig| sig.when().seconds())
                .unwrap_or_else(|| commit.time().seconds());
            (message, created_at)
        }
        None => (String::new(), commit.time().seconds()),
    };

    Ok(Some(RawTag {
        name: name.to_string(),
        target_commit_sha: commit.id().to_string(),
        annotation_message,
        created_at,
    }))
}

impl super::Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<TagRef>> {
        let repo = self.repo()?;
        let names = repo.tag_names(None)?;

        let mut raw_tags = Vec::new();
        for name in names.iter().flatten() {
            if let Some(raw) = read_tag(&repo, name)? {
                raw_tags.push(raw);
            }
        }

        raw_tags.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });

        Ok(raw_tags
            .into_iter()
            .enumerate()
            .map(|(order, raw)| TagRef {
                name: raw.name,
                target_commit_sha: raw.target_commit_sha,
                annotation_message: raw.annotation_message,
                creation_order: order as i64,
            })
            .collect())
    }

    fn commits_between(&self, from_sha: Option<&str>, to_sha: &str) -> Result<Vec<CommitInfo>> {
        let repo = self.repo()?;
        let mut revwalk = repo.revwalk()?;

        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
        revwalk.push(Oid::from_str(to_sha)?)?;

        if let Some(from_sha) = from_sha {
            revwalk.hide(Oid::from_str(from_sha)?)?;
        }

        let mut commits = Vec::new();

        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = repo.find_commit(oid)?;
            let message = commit.message().unwrap_or("").to_string();

            commits.push(CommitInfo {
                sha: oid.to_string(),
                message,
            });
        }

        Ok(commits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use std::fs;
    use tempfile::TempDir;

    fn commit_file(repo: &Git2Repo, dir: &Path, content: &str, message: &str) -> Oid {
        fs::write(dir.join("README.md"), content).unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new("README.md")).unwrap();
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = git2::Signature::now("Test User", "test@example.com").unwrap();

        let parents = match repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => Vec::new(),
        };
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();

        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    #[test]
    fn test_list_tags_reads_annotations() {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();

        let first = commit_file(&repo, dir.path(), "one\n", "Initial commit");
        let second = commit_file(&repo, dir.path(), "two\n", "CHANGELOG: Second");

        let sig = git2::Signature::now("Test User", "test@example.com").unwrap();
        repo.tag_lightweight("v1.0.1-debug", &repo.find_object(first, None).unwrap(), false)
            .unwrap();
        repo.tag(
            "v1.0.2-debug",
            &repo.find_object(second, None).unwrap(),
            &sig,
            "Second build",
            false,
        )
        .unwrap();

        let git = Git2Repository::from_git2(repo);
        let mut tags = git.list_tags().unwrap();
        tags.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].target_commit_sha, first.to_string());
        assert_eq!(tags[0].annotation_message, "");
        assert_eq!(tags[1].target_commit_sha, second.to_string());
        assert_eq!(tags[1].annotation_message, "Second build");
    }

    #[test]
    fn test_commits_between_is_chronological_and_exclusive() {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();

        let first = commit_file(&repo, dir.path(), "1\n", "first");
        commit_file(&repo, dir.path(), "2\n", "second");
        let third = commit_file(&repo, dir.path(), "3\n", "third");

        let git = Git2Repository::from_git2(repo);

        let commits = git
            .commits_between(Some(&first.to_string()), &third.to_string())
            .unwrap();
        let messages: Vec<&str> = commits.iter().map(|c| c.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "third"]);

        let all = git.commits_between(None, &third.to_string()).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].message, "first");
    }

    #[test]
    fn test_open_outside_repository_fails() {
        let dir = TempDir::new().unwrap();
        assert!(Git2Repository::open(dir.path()).is_err());
    }
}
