//! Domain logic - pure pattern, tag and changelog rules independent of git operations

pub mod commit;
pub mod pattern;
pub mod tag;
pub mod token;

pub use commit::ChangelogEntry;
pub use pattern::{BuildCapture, CompiledPattern};
pub use tag::{ResolvedBuild, TagMatch, TagRef, STUB_TAG_NAME};
pub use token::{default_pattern, PatternToken};
