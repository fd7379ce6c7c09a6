//! Plain-text and JSON renderings of a comparison record.

use crate::results::{ComparisonRecord, ComparisonStatus, PageReport};
use crate::utils::truncate;
use std::fmt::Write;

const MAX_CELL: usize = 48;

const COLUMNS: &[&str] = &[
    "URL",
    "Title",
    "Meta Description",
    "Headings",
    "Robots",
    "Duplicate",
    "Code Error",
    "Internal Links",
    "Image Weight (bytes)",
    "Load Time (s)",
];

/// Metric cells of a page, in `COLUMNS` order
fn cells(page: &PageReport) -> Vec<String> {
    vec![
        page.url.clone(),
        truncate(&page.features.title, MAX_CELL),
        truncate(&page.features.meta_description, MAX_CELL),
        truncate(&page.features.headings.join(" | "), MAX_CELL),
        page.robots_status.to_string(),
        page.duplicate_content
            .map(|flag| flag.to_string())
            .unwrap_or_else(|| "N/A".to_string()),
        page.code_error.to_string(),
        page.internal_link_count.to_string(),
        page.image_weight.total_bytes.to_string(),
        format!("{:.2}", page.load_time_seconds),
    ]
}

/// One row per page, one column per metric, then the similarity summary
pub fn render_rows(record: &ComparisonRecord) -> String {
    let header: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    let rows: Vec<Vec<String>> = record.pages.iter().map(cells).collect();

    let mut out = format_table(&header, &rows);
    out.push('\n');
    out.push_str(&render_similarity(record));
    out.push_str(&render_skipped(record));
    out
}

/// One row per metric, one column per page
pub fn render_wide(record: &ComparisonRecord) -> String {
    let mut header = vec!["Metric".to_string()];
    header.extend((1..=record.pages.len()).map(|i| format!("Page {}", i)));

    let page_cells: Vec<Vec<String>> = record.pages.iter().map(cells).collect();
    let rows: Vec<Vec<String>> = COLUMNS
        .iter()
        .enumerate()
        .map(|(metric, name)| {
            let mut row = vec![name.to_string()];
            row.extend(page_cells.iter().map(|cells| cells[metric].clone()));
            row
        })
        .collect();

    let mut out = format_table(&header, &rows);
    out.push('\n');
    out.push_str(&render_similarity(record));
    out.push_str(&render_skipped(record));
    out
}

/// Pretty-printed JSON of the whole record
pub fn render_json(record: &ComparisonRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(record)
}

fn render_similarity(record: &ComparisonRecord) -> String {
    let mut out = String::new();
    match (&record.status, &record.similarity) {
        (ComparisonStatus::Complete, Some(matrix)) => {
            if let Some(percentage) = record.similarity_percentage() {
                let _ = writeln!(out, "Similarity: {:.2}%", percentage);
            } else {
                let _ = writeln!(out, "Similarity matrix:");
                let header: Vec<String> = std::iter::once(String::new())
                    .chain((1..=matrix.len()).map(|i| format!("Page {}", i)))
                    .collect();
                let rows: Vec<Vec<String>> = matrix
                    .rows()
                    .iter()
                    .enumerate()
                    .map(|(i, row)| {
                        std::iter::once(format!("Page {}", i + 1))
                            .chain(row.iter().map(|v| format!("{:.2}%", v * 100.0)))
                            .collect()
                    })
                    .collect();
                out.push_str(&format_table(&header, &rows));
            }
        }
        _ => {
            let _ = writeln!(
                out,
                "Similarity: insufficient data ({} page(s) analyzed, at least 2 needed)",
                record.pages.len()
            );
        }
    }
    out
}

fn render_skipped(record: &ComparisonRecord) -> String {
    let mut out = String::new();
    for skipped in &record.skipped {
        let _ = writeln!(out, "Skipped {}: {}", skipped.url, skipped.reason);
    }
    out
}

/// Left-aligned columns separated by ` | `, with a rule under the header
fn format_table(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let format_row = |row: &[String]| -> String {
        row.iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width.saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&format_row(header));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in rows {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    out
}
