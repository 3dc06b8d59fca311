use anyhow::Result;
use clap::Parser;

use calver_release::cli::{run_release_workflow, ReleaseWorkflowArgs};
use calver_release::config;
use calver_release::domain::CalendarMonth;
use calver_release::inputs::{CliOverrides, ReleaseInputs};
use calver_release::outputs::{FileOutputs, OutputSink, StdoutOutputs};
use calver_release::release::GitHubReleases;
use calver_release::report::{ReportSink, StderrReport, StepSummaryFile};
use calver_release::ui;

#[derive(clap::Parser)]
#[command(
    name = "calver-release",
    version,
    about = "Compute the next CalVer tag and create a GitHub release for it"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "GitHub token (defaults to INPUT_GITHUB-TOKEN, then GITHUB_TOKEN)")]
    github_token: Option<String>,

    #[arg(
        long,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Compute and report the tag without creating a release"
    )]
    dry_run: Option<bool>,

    #[arg(
        long,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Create the release as a draft"
    )]
    draft: Option<bool>,

    #[arg(long, help = "Repository as owner/repo (defaults to GITHUB_REPOSITORY)")]
    repository: Option<String>,

    #[arg(long, help = "GitHub API base URL (defaults to GITHUB_API_URL)")]
    api_url: Option<String>,

    #[arg(short, long, help = "Log diagnostic details to stderr")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    ui::init_logging(args.verbose);

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let overrides = CliOverrides {
        token: args.github_token,
        dry_run: args.dry_run,
        draft: args.draft,
        repository: args.repository,
        api_url: args.api_url,
    };
    let inputs = match ReleaseInputs::from_env(&overrides, &config) {
        Ok(inputs) => inputs,
        Err(e) => {
            ui::display_error(&format!("Action failed: {}", e));
            std::process::exit(1);
        }
    };
    tracing::debug!(?inputs, "resolved inputs");

    let repository = match GitHubReleases::new(
        &inputs.token,
        inputs.repository.clone(),
        &inputs.api_url,
        inputs.timeout,
    ) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Action failed: {}", e));
            std::process::exit(1);
        }
    };

    let mut outputs: Box<dyn OutputSink> = match FileOutputs::from_env() {
        Some(file) => Box::new(file),
        None => Box::new(StdoutOutputs),
    };
    let mut report: Box<dyn ReportSink> = match StepSummaryFile::from_env() {
        Some(file) => Box::new(file),
        None => Box::new(StderrReport),
    };

    let workflow_args = ReleaseWorkflowArgs {
        dry_run: inputs.dry_run,
        draft: inputs.draft,
    };
    ui::display_status(&format!(
        "Computing release for {}{}",
        inputs.repository,
        if inputs.dry_run { " (dry run)" } else { "" }
    ));

    match run_release_workflow(
        &workflow_args,
        CalendarMonth::today(),
        &repository,
        &mut outputs,
        &mut report,
    ) {
        Ok(outcome) => {
            for warning in &outcome.warnings {
                ui::display_boundary_warning(warning);
            }
            ui::display_outcome(&outcome);
            Ok(())
        }
        Err(e) => {
            tracing::error!(step = e.step().name(), error = %e, "release run failed");
            ui::display_error(&format!("Action failed: {}", e));
            std::process::exit(1);
        }
    }
}
