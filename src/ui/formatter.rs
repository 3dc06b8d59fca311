//! Pure formatting functions for console output.
//!
//! Everything here prints and returns; nothing reads input. Human-facing
//! lines go to stderr so stdout only carries `key=value` outputs and workflow
//! commands. When running inside GitHub Actions, errors and warnings are
//! additionally emitted as workflow commands so they show up as annotations.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::cli::{RunMode, RunOutcome};

/// Whether we are running on a GitHub Actions runner
pub fn in_github_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").map_or(false, |v| v == "true")
}

/// Escape data for a `::command::data` workflow command
pub fn escape_command_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    if in_github_actions() {
        println!("::error::{}", escape_command_data(message));
    }
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Status line with a yellow arrow
pub fn status_line(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{}", status_line(message));
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    if in_github_actions() {
        println!("::warning::{}", escape_command_data(&warning.to_string()));
    }
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// One-line summary of a finished run
pub fn outcome_message(outcome: &RunOutcome) -> String {
    let verb = match outcome.mode {
        RunMode::DryRun => "simulated",
        RunMode::Created => "created",
    };
    format!("Successfully {} release {}", verb, outcome.release_tag)
}

/// Display the tag change and the final result of a run.
pub fn display_outcome(outcome: &RunOutcome) {
    eprintln!("\n{}", style("Release Tag:").bold());
    eprintln!("  From: {}", style(&outcome.previous_tag).red());
    eprintln!("  To:   {}", style(&outcome.release_tag).green());
    if let Some(url) = &outcome.release_url {
        eprintln!("  URL:  {}", style(url).cyan());
    }
    eprintln!();
    display_success(&outcome_message(outcome));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(mode: RunMode) -> RunOutcome {
        RunOutcome {
            previous_tag: "2025.1.5".to_string(),
            release_tag: "2025.1.6".to_string(),
            release_url: None,
            mode,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_escape_command_data() {
        assert_eq!(escape_command_data("50% done\r\nnext"), "50%25 done%0D%0Anext");
        assert_eq!(escape_command_data("plain"), "plain");
    }

    #[test]
    fn test_outcome_message() {
        assert_eq!(
            outcome_message(&outcome(RunMode::DryRun)),
            "Successfully simulated release 2025.1.6"
        );
        assert_eq!(
            outcome_message(&outcome(RunMode::Created)),
            "Successfully created release 2025.1.6"
        );
    }

    #[test]
    fn test_status_line() {
        let line = status_line("Computing release for o/r");
        assert_eq!(console::strip_ansi_codes(&line), "→ Computing release for o/r");
    }
}
