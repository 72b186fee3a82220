pub mod boundary;
pub mod changelog;
pub mod config;
pub mod descriptor;
pub mod domain;
pub mod error;
pub mod git;
pub mod output;
pub mod resolver;
pub mod ui;

pub use error::{BuildVersionError, Result};
