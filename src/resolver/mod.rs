//! Resolution of the current build tag from repository tags

pub mod tag_resolver;

pub use tag_resolver::TagResolver;
