use serde::{Deserialize, Serialize};

/// Name of the placeholder build used when no tag matches and stubs are allowed
pub const STUB_TAG_NAME: &str = "v0.0.1-stub";
/// Commit the placeholder build points at
pub const STUB_COMMIT_SHA: &str = "0000000000000000000000000000000000000000";
/// Annotation message of the placeholder build
pub const STUB_MESSAGE: &str = "Stub tag: no build tag matched";
/// Version of the placeholder build
pub const STUB_BUILD_VERSION: &str = "0.0";
/// Build number (and so version code) of the placeholder build
pub const STUB_BUILD_NUMBER: u64 = 1;

/// A git tag as reported by the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
    /// Commit the tag points at, peeled through annotated tag objects
    pub target_commit_sha: String,
    /// Annotation message, empty for lightweight tags
    pub annotation_message: String,
    /// Ordering hint only; never used to pick the current build
    pub creation_order: i64,
}

impl TagRef {
    /// Create a tag from a name and the commit it points at
    pub fn new(name: impl Into<String>, target_commit_sha: impl Into<String>) -> Self {
        TagRef {
            name: name.into(),
            target_commit_sha: target_commit_sha.into(),
            annotation_message: String::new(),
            creation_order: 0,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.annotation_message = message.into();
        self
    }

    pub fn with_creation_order(mut self, creation_order: i64) -> Self {
        self.creation_order = creation_order;
        self
    }
}

/// A tag whose name matched a build tag pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatch {
    pub tag: TagRef,
    pub build_version: String,
    pub build_number: u64,
}

impl TagMatch {
    /// Turn the match into the authoritative build for a variant
    pub fn into_build(self, build_variant: impl Into<String>) -> ResolvedBuild {
        ResolvedBuild {
            name: self.tag.name,
            commit_sha: self.tag.target_commit_sha,
            message: self.tag.annotation_message,
            build_version: self.build_version,
            build_variant: build_variant.into(),
            build_number: self.build_number,
        }
    }
}

/// The authoritative build resolved for one build variant
///
/// Serialized as the JSON sidecar consumed by packaging; the key names are a
/// compatibility contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedBuild {
    pub name: String,
    pub commit_sha: String,
    #[serde(default)]
    pub message: String,
    pub build_version: String,
    pub build_variant: String,
    pub build_number: u64,
}

impl ResolvedBuild {
    /// Placeholder build for a variant that has no matching tag
    pub fn stub(build_variant: impl Into<String>) -> Self {
        ResolvedBuild {
            name: STUB_TAG_NAME.to_string(),
            commit_sha: STUB_COMMIT_SHA.to_string(),
            message: STUB_MESSAGE.to_string(),
            build_version: STUB_BUILD_VERSION.to_string(),
            build_variant: build_variant.into(),
            build_number: STUB_BUILD_NUMBER,
        }
    }

    pub fn is_stub(&self) -> bool {
        self.name == STUB_TAG_NAME && self.commit_sha == STUB_COMMIT_SHA
    }
}
