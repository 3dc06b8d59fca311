//! Release workflow orchestration
//!
//! Runs one release strictly in sequence: resolve the previous tag, compute
//! the next one, publish the tag outputs, then either stop (dry run) or create
//! the release, and finally commit the report. Nothing is retried and outputs
//! already published are never taken back.

use tracing::{debug, info, warn};

use crate::boundary::BoundaryWarning;
use crate::domain::{next_release, CalendarMonth, NextRelease, PreviousRelease, VersionTag};
use crate::error::ReleaseError;
use crate::outputs::{OutputSink, PREVIOUS_TAG, RELEASE_TAG, RELEASE_URL};
use crate::release::ReleaseRepository;
use crate::report::{Report, ReportSink, Table};

/// Arguments for the release workflow
///
/// Decoupled from the CLI so the workflow can be driven programmatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReleaseWorkflowArgs {
    /// Compute and report only, never create a release
    pub dry_run: bool,

    /// Create the release as a draft
    pub draft: bool,
}

/// How a successful run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    DryRun,
    Created,
}

/// Result of a successful release run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Previous tag, `0.0.0` when there was no release history
    pub previous_tag: String,

    /// The tag computed for this run
    pub release_tag: String,

    /// URL of the created release; `None` for dry runs
    pub release_url: Option<String>,

    pub mode: RunMode,

    /// Non-fatal observations made along the way
    pub warnings: Vec<BoundaryWarning>,
}

/// Main release workflow
///
/// 1. Look up the latest release (none means first release)
/// 2. Compute the next CalVer tag for `today`
/// 3. Publish `previous-tag` and `release-tag`
/// 4. Dry run: note what would happen. Otherwise create the release and
///    publish `release-url`
/// 5. Commit the report
///
/// A failure in step 1 happens before any output is published. A failure in
/// step 4 leaves the two tag outputs in place. In both cases the report is
/// never committed.
pub fn run_release_workflow<R, O, S>(
    args: &ReleaseWorkflowArgs,
    today: CalendarMonth,
    repository: &R,
    outputs: &mut O,
    report_sink: &mut S,
) -> Result<RunOutcome, ReleaseError>
where
    R: ReleaseRepository + ?Sized,
    O: OutputSink + ?Sized,
    S: ReportSink + ?Sized,
{
    let mut report = Report::new();
    report.heading(1, "📅 CalVer Release Process");
    report.heading(2, "📋 Release Information");

    let previous = resolve_previous(repository, &mut report)?;
    let previous_tag = previous.tag_name().to_string();

    let previous_version = previous.version();
    let warnings = inspect_previous(&previous);
    for warning in &warnings {
        warn!(%warning, "previous tag");
    }

    let next = next_release(&previous_version, today);
    let release_tag = next.tag.to_string();
    info!(previous = %previous_tag, next = %release_tag, "computed release tag");
    add_version_components(&mut report, &previous_version, &next);

    set_output(outputs, PREVIOUS_TAG, &previous_tag)?;
    set_output(outputs, RELEASE_TAG, &release_tag)?;

    let (release_url, mode) = if args.dry_run {
        add_dry_run_notice(&mut report, &release_tag);
        (None, RunMode::DryRun)
    } else {
        let url = create_release(repository, &release_tag, args.draft, &mut report)?;
        set_output(outputs, RELEASE_URL, &url)?;
        (Some(url), RunMode::Created)
    };

    add_outputs_summary(
        &mut report,
        &release_tag,
        &previous_tag,
        release_url.as_deref(),
    );
    report_sink.commit(report).map_err(ReleaseError::Report)?;

    Ok(RunOutcome {
        previous_tag,
        release_tag,
        release_url,
        mode,
        warnings,
    })
}

fn resolve_previous<R>(repository: &R, report: &mut Report) -> Result<PreviousRelease, ReleaseError>
where
    R: ReleaseRepository + ?Sized,
{
    let latest = repository
        .list_latest()
        .map_err(ReleaseError::ListReleases)?;

    match latest {
        None => {
            debug!("repository has no releases");
            report.raw("ℹ️ **No previous releases found.** This will be the first release.");
            Ok(PreviousRelease::FirstRelease)
        }
        Some(release) => {
            debug!(tag = %release.tag, "found previous release");
            report.raw(format!("🏷️ **Previous release tag:** `{}`", release.tag));
            Ok(PreviousRelease::Tagged(release.tag))
        }
    }
}

fn inspect_previous(previous: &PreviousRelease) -> Vec<BoundaryWarning> {
    let PreviousRelease::Tagged(tag) = previous else {
        return Vec::new();
    };

    let mut warnings = Vec::new();
    if !VersionTag::is_well_formed(tag) {
        warnings.push(BoundaryWarning::UnrecognizedTag { tag: tag.clone() });
    }
    let version = previous.version();
    if version != VersionTag::ZERO && !version.has_valid_month() {
        warnings.push(BoundaryWarning::MonthOutOfRange {
            tag: tag.clone(),
            month: version.month,
        });
    }
    warnings
}

fn add_version_components(report: &mut Report, previous: &VersionTag, next: &NextRelease) {
    report.raw(format!("🚀 **New release tag:** `{}`", next.tag));
    report.heading(3, "Version Components");
    report.table(
        Table::new(["Component", "Previous Value", "New Value"])
            .row([
                "Year".to_string(),
                previous.year.to_string(),
                next.tag.year.to_string(),
            ])
            .row([
                "Month".to_string(),
                previous.month.to_string(),
                next.tag.month.to_string(),
            ])
            .row([
                "Patch".to_string(),
                previous.patch.to_string(),
                format!("{} {}", next.tag.patch, next.change.icon()),
            ]),
    );
}

fn add_dry_run_notice(report: &mut Report, release_tag: &str) {
    report.heading(2, "🔍 Dry Run Mode");
    report.raw("⚠️ **This was a dry run. No release was created.**");
    report.raw(format!(
        "If this was a real run, version `{}` would have been created.",
        release_tag
    ));
    report.raw("To create an actual release, run with `dry-run` set to `false`.");
    report.raw("✅ **Dry run completed successfully**");
}

fn create_release<R>(
    repository: &R,
    release_tag: &str,
    draft: bool,
    report: &mut Report,
) -> Result<String, ReleaseError>
where
    R: ReleaseRepository + ?Sized,
{
    report.heading(2, "🔄 Release Process");
    report.raw("⏳ Creating release...");

    let created = repository
        .create(release_tag, draft)
        .map_err(ReleaseError::CreateRelease)?;

    info!(tag = release_tag, url = %created.url, draft, "release created");
    report.raw("✅ **Release created successfully!**");
    report.raw(format!(
        "📎 **Release URL:** [{url}]({url})",
        url = created.url
    ));
    Ok(created.url)
}

fn add_outputs_summary(
    report: &mut Report,
    release_tag: &str,
    previous_tag: &str,
    release_url: Option<&str>,
) {
    report.heading(2, "📤 Action Outputs");

    let mut table = Table::new(["Output", "Value"])
        .row([RELEASE_TAG.to_string(), format!("`{}`", release_tag)])
        .row([PREVIOUS_TAG.to_string(), format!("`{}`", previous_tag)]);
    if let Some(url) = release_url.filter(|u| !u.is_empty()) {
        table = table.row([RELEASE_URL.to_string(), format!("[{url}]({url})")]);
    }
    report.table(table);
}

fn set_output<O>(outputs: &mut O, key: &str, value: &str) -> Result<(), ReleaseError>
where
    O: OutputSink + ?Sized,
{
    debug!(key, value, "setting output");
    outputs
        .set_output(key, value)
        .map_err(|source| ReleaseError::Output {
            key: key.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outputs::MemoryOutputs;
    use crate::release::MockReleaseRepository;
    use crate::report::{MemoryReportSink, ReportSection};

    fn run(
        repo: &MockReleaseRepository,
        args: ReleaseWorkflowArgs,
    ) -> (Result<RunOutcome, ReleaseError>, MemoryOutputs, MemoryReportSink) {
        let mut outputs = MemoryOutputs::new();
        let mut sink = MemoryReportSink::new();
        let result = run_release_workflow(
            &args,
            CalendarMonth::new(2025, 1),
            repo,
            &mut outputs,
            &mut sink,
        );
        (result, outputs, sink)
    }

    #[test]
    fn test_inspect_previous_flags_unrecognized_tag() {
        let warnings = inspect_previous(&PreviousRelease::Tagged("v1.2.3".to_string()));
        assert_eq!(
            warnings,
            vec![BoundaryWarning::UnrecognizedTag {
                tag: "v1.2.3".to_string()
            }]
        );
    }

    #[test]
    fn test_inspect_previous_flags_month_out_of_range() {
        let warnings = inspect_previous(&PreviousRelease::Tagged("2025.13.1".to_string()));
        assert_eq!(
            warnings,
            vec![BoundaryWarning::MonthOutOfRange {
                tag: "2025.13.1".to_string(),
                month: 13
            }]
        );
    }

    #[test]
    fn test_inspect_previous_first_release_is_quiet() {
        assert!(inspect_previous(&PreviousRelease::FirstRelease).is_empty());
        assert!(inspect_previous(&PreviousRelease::Tagged("2025.1.0".to_string())).is_empty());
    }

    #[test]
    fn test_patch_row_carries_icon() {
        let repo = MockReleaseRepository::with_latest("2025.1.5");
        let (result, _, sink) = run(
            &repo,
            ReleaseWorkflowArgs {
                dry_run: true,
                draft: false,
            },
        );
        assert!(result.is_ok());

        let tables: Vec<&Table> = sink.committed()[0]
            .sections()
            .iter()
            .filter_map(|s| match s {
                ReportSection::Table(t) => Some(t),
                _ => None,
            })
            .collect();
        assert_eq!(tables[0].rows[2], vec!["Patch", "5", "6 🔼"]);
    }

    #[test]
    fn test_outputs_summary_lists_url_only_when_created() {
        let mut repo = MockReleaseRepository::with_latest("2024.12.3");
        repo.set_release_url("https://example.invalid/r/9");
        let (result, _, sink) = run(&repo, ReleaseWorkflowArgs::default());
        assert_eq!(result.unwrap().mode, RunMode::Created);

        let last = sink.committed()[0].sections().last().cloned();
        match last {
            Some(ReportSection::Table(table)) => {
                assert_eq!(table.rows.len(), 3);
                assert_eq!(table.rows[2][0], RELEASE_URL);
            }
            other => panic!("expected outputs table, got {:?}", other),
        }
    }
}
