//! Markdown rendering of a [`Report`].
//!
//! Tables are rendered as HTML so cells may hold inline markdown such as
//! code spans and links, which GitHub renders inside step summaries.

use crate::report::{Report, ReportSection, Table};

/// Render the report as GitHub-flavoured markdown
pub fn render_markdown(report: &Report) -> String {
    let mut out = String::new();
    for section in report.sections() {
        match section {
            ReportSection::Raw(text) => out.push_str(text),
            ReportSection::Table(table) => render_table(table, &mut out),
        }
    }
    out
}

fn render_table(table: &Table, out: &mut String) {
    out.push_str("<table>");
    out.push_str("<tr>");
    for cell in &table.header {
        out.push_str(&format!("<th>{}</th>", cell));
    }
    out.push_str("</tr>");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str(&format!("<td>{}</td>", cell));
        }
        out.push_str("</tr>");
    }
    out.push_str("</table>\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_raw_and_table() {
        let mut report = Report::new();
        report
            .raw("**bold**")
            .table(Table::new(["Output", "Value"]).row(["release-tag", "`2025.1.0`"]));

        assert_eq!(
            render_markdown(&report),
            "**bold**\n\n<table><tr><th>Output</th><th>Value</th></tr>\
             <tr><td>release-tag</td><td>`2025.1.0`</td></tr></table>\n"
        );
    }

    #[test]
    fn test_render_empty_report() {
        assert_eq!(render_markdown(&Report::new()), "");
    }
}
