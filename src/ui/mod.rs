//! User interface module - console formatting and logging setup.
//!
//! - `formatter` - Console messages and workflow-command annotations
//! - This module - Diagnostic log initialisation

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_error, display_outcome, display_status, display_success,
    escape_command_data, in_github_actions, outcome_message, status_line,
};

/// Initialise diagnostic logging to stderr.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects debug over warn.
/// Only the first call takes effect.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .ok();
}
