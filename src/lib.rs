pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod inputs;
pub mod outputs;
pub mod release;
pub mod report;
pub mod ui;

pub use error::{CalverError, ReleaseError, RepositoryError, Result};
