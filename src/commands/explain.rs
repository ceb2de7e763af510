//! `--explain` output: where every member went.

use super::format::FileReport;
use crate::formatting::Formatter;
use crate::rewrite::{ClassReport, ClassStatus};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct FileExplanation<'a> {
    path: &'a Path,
    classes: &'a [ClassReport],
}

pub fn render_json(reports: &[&FileReport]) -> serde_json::Result<String> {
    let files: Vec<FileExplanation> = reports
        .iter()
        .map(|report| FileExplanation {
            path: &report.path,
            classes: &report.classes,
        })
        .collect();
    serde_json::to_string_pretty(&files)
}

pub fn render_terminal(reports: &[&FileReport], formatter: &Formatter) -> String {
    let mut out = String::new();

    for report in reports {
        for class in &report.classes {
            let title = format!(
                "{}:{} class {}",
                report.path.display(),
                class.line,
                class.name.as_deref().unwrap_or("<anonymous>")
            );
            out.push_str(&formatter.header(&title));
            out.push('\n');

            match class.status {
                ClassStatus::Reorganized => {
                    out.push_str(&class_table(class).to_string());
                    out.push('\n');
                }
                ClassStatus::Empty => out.push_str("  (no members)\n"),
                ClassStatus::Skipped => out.push_str("  (skipped: syntax errors)\n"),
            }
        }
    }

    out
}

fn class_table(class: &ClassReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_header(vec!["Bucket", "Member", "Kind", "Line"]);

    for member in &class.members {
        table.add_row(vec![
            member.bucket.to_string(),
            member.name.clone(),
            member.kind.to_string(),
            member.line.to_string(),
        ]);
    }
    table
}
