//! Human-readable run report
//!
//! A [`Report`] is an ordered list of sections built up during one run and
//! handed to a [`ReportSink`] exactly once. Nothing reaches the sink before
//! [`ReportSink::commit`].
//!
//! - [`StepSummaryFile`]: appends to the `$GITHUB_STEP_SUMMARY` file
//! - [`StderrReport`]: prints to standard error
//! - [`MemoryReportSink`]: keeps committed reports for inspection

pub mod render;

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

pub use render::render_markdown;

/// A table with a header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Table {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }
}

/// One block of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSection {
    /// Markdown emitted verbatim
    Raw(String),
    Table(Table),
}

/// Sections accumulated over a single run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    sections: Vec<ReportSection>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw block; a blank line is added after it
    pub fn raw(&mut self, text: impl Into<String>) -> &mut Self {
        let mut text = text.into();
        text.push_str("\n\n");
        self.sections.push(ReportSection::Raw(text));
        self
    }

    pub fn heading(&mut self, level: usize, text: &str) -> &mut Self {
        self.raw(format!("{} {}", "#".repeat(level.clamp(1, 6)), text))
    }

    pub fn table(&mut self, table: Table) -> &mut Self {
        self.sections.push(ReportSection::Table(table));
        self
    }

    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }
}

/// Destination of the report
pub trait ReportSink {
    /// Write the whole report in one go
    fn commit(&mut self, report: Report) -> io::Result<()>;
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn commit(&mut self, report: Report) -> io::Result<()> {
        (**self).commit(report)
    }
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn commit(&mut self, report: Report) -> io::Result<()> {
        (**self).commit(report)
    }
}

/// Appends the rendered report to a step summary file
#[derive(Debug, Clone)]
pub struct StepSummaryFile {
    path: PathBuf,
}

impl StepSummaryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StepSummaryFile { path: path.into() }
    }

    /// Sink for `$GITHUB_STEP_SUMMARY`, if set
    pub fn from_env() -> Option<Self> {
        std::env::var_os("GITHUB_STEP_SUMMARY")
            .filter(|p| !p.is_empty())
            .map(Self::new)
    }
}

impl ReportSink for StepSummaryFile {
    fn commit(&mut self, report: Report) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(render_markdown(&report).as_bytes())?;
        file.flush()
    }
}

/// Prints the rendered report to standard error, keeping stdout for outputs
#[derive(Debug, Clone, Default)]
pub struct StderrReport;

impl ReportSink for StderrReport {
    fn commit(&mut self, report: Report) -> io::Result<()> {
        let stderr = io::stderr();
        let mut out = stderr.lock();
        writeln!(out)?;
        out.write_all(render_markdown(&report).as_bytes())?;
        out.flush()
    }
}

/// Keeps committed reports in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryReportSink {
    committed: Vec<Report>,
}

impl MemoryReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn committed(&self) -> &[Report] {
        &self.committed
    }

    /// Number of commits received
    pub fn commit_count(&self) -> usize {
        self.committed.len()
    }
}

impl ReportSink for MemoryReportSink {
    fn commit(&mut self, report: Report) -> io::Result<()> {
        self.committed.push(report);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_keeps_order() {
        let mut report = Report::new();
        report
            .heading(1, "Title")
            .raw("body")
            .table(Table::new(["A", "B"]).row(["1", "2"]));

        assert_eq!(
            report.sections(),
            &[
                ReportSection::Raw("# Title\n\n".to_string()),
                ReportSection::Raw("body\n\n".to_string()),
                ReportSection::Table(Table {
                    header: vec!["A".to_string(), "B".to_string()],
                    rows: vec![vec!["1".to_string(), "2".to_string()]],
                }),
            ]
        );
    }

    #[test]
    fn test_heading_level_is_clamped() {
        let mut report = Report::new();
        report.heading(0, "a").heading(9, "b");
        assert_eq!(
            report.sections(),
            &[
                ReportSection::Raw("# a\n\n".to_string()),
                ReportSection::Raw("###### b\n\n".to_string()),
            ]
        );
    }

    #[test]
    fn test_step_summary_file_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.md");
        std::fs::write(&path, "existing\n").unwrap();

        let mut report = Report::new();
        report.raw("hello");
        StepSummaryFile::new(&path).commit(report).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "existing\nhello\n\n");
    }

    #[test]
    fn test_memory_sink_records_commits() {
        let mut sink = MemoryReportSink::new();
        let mut report = Report::new();
        report.raw("x");
        sink.commit(report.clone()).unwrap();

        assert_eq!(sink.commit_count(), 1);
        assert_eq!(sink.committed()[0], report);
    }
}
