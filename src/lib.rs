pub mod boundary;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod ui;

pub use changelog::ChangelogFile;
pub use error::{ChangelogError, Result};
