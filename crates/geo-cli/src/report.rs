//! Rendering of assembled submissions.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use geo_model::SubmissionMetadata;
use serde::Serialize;

/// One line of the summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionSummary {
    /// Series accession, or `-` for template submissions.
    pub series: String,
    pub title: String,
    pub samples: usize,
    pub channels: usize,
    pub platforms: Vec<String>,
    pub contributors: usize,
}

impl From<&SubmissionMetadata> for SubmissionSummary {
    fn from(submission: &SubmissionMetadata) -> Self {
        let platforms = if submission.platforms.is_empty() {
            let mut referenced: Vec<String> = submission
                .samples
                .values()
                .map(|sample| sample.platform_id.clone())
                .collect();
            referenced.sort();
            referenced.dedup();
            referenced
        } else {
            submission
                .platforms
                .iter()
                .map(|platform| platform.id.clone().unwrap_or_else(|| platform.title.clone()))
                .collect()
        };
        Self {
            series: submission.series_id().unwrap_or("-").to_string(),
            title: submission.series.title.clone(),
            samples: submission.samples.len(),
            channels: submission
                .samples
                .values()
                .map(geo_model::Sample::channel_count)
                .max()
                .unwrap_or(0),
            platforms,
            contributors: submission.series.contributors.len(),
        }
    }
}

pub fn summarize(submissions: &[SubmissionMetadata]) -> Vec<SubmissionSummary> {
    submissions.iter().map(SubmissionSummary::from).collect()
}

/// Builds the summary table, with a totals row when there is more than one submission.
pub fn summary_table(summaries: &[SubmissionSummary]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    table.set_header(vec![
        header_cell("Series"),
        header_cell("Title"),
        header_cell("Samples"),
        header_cell("Channels"),
        header_cell("Platforms"),
        header_cell("Contributors"),
    ]);
    for index in [2, 3, 5] {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    for summary in summaries {
        table.add_row(vec![
            Cell::new(&summary.series),
            Cell::new(&summary.title),
            Cell::new(summary.samples),
            Cell::new(summary.channels),
            Cell::new(summary.platforms.join(", ")),
            Cell::new(summary.contributors),
        ]);
    }
    if summaries.len() > 1 {
        let total_samples: usize = summaries.iter().map(|s| s.samples).sum();
        table.add_row(vec![
            Cell::new("TOTAL")
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new(format!("{} series", summaries.len())).fg(Color::DarkGrey),
            Cell::new(total_samples).add_attribute(Attribute::Bold),
            Cell::new("-").fg(Color::DarkGrey),
            Cell::new("-").fg(Color::DarkGrey),
            Cell::new("-").fg(Color::DarkGrey),
        ]);
    }
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Serializes submissions as pretty-printed JSON.
pub fn to_json(submissions: &[SubmissionMetadata]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(submissions)
}
