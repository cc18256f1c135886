//! Pretty formatter for terminal output.
//!
//! Results render as numbered cards: bold title, clickable link, wrapped
//! description, then dimmed metadata on one line.

use super::SearchReport;
use crate::commands::Result;
use owo_colors::OwoColorize;
use serde_json::Value;

/// Terminal width for formatting (default fallback)
const DEFAULT_WIDTH: usize = 80;

/// Indent for card content (after number)
const CARD_INDENT: usize = 6;

/// Record fields shown on the metadata line, in order.
const META_KEYS: &[&str] = &["channel", "duration", "views", "publish_time"];

pub fn format_pretty(report: &SearchReport<'_>) -> Result<String> {
    let width = terminal_width();
    let mut output = String::new();

    output.push_str(&format!("{} {}", "Search:".dimmed(), report.terms.cyan().bold()));
    if let Some(filter) = report.filter {
        output.push_str(&format!(" {} {}", "filter:".dimmed(), filter.name().green()));
    }
    output.push_str("\n\n");

    if let Some(issue) = report.issue {
        output.push_str(&format!("{} {}\n\n", "Note:".yellow().bold(), issue));
    }

    if report.held.is_cleared() {
        output.push_str(&format!("{}", "(results already read)".dimmed()));
        return Ok(output);
    }

    let records = report.records()?;
    output.push_str(&format_section_header(
        report.label(),
        records.len(),
        width,
    ));
    output.push('\n');

    for (i, record) in records.iter().enumerate() {
        output.push_str(&format_card(record, report.watch_url(record), i + 1, width));
        if i + 1 < records.len() {
            output.push('\n');
        }
    }

    Ok(output.trim_end().to_string())
}

fn format_card(record: &Value, url: Option<String>, index: usize, width: usize) -> String {
    let mut output = String::new();
    let content_width = width.saturating_sub(CARD_INDENT + 2).max(20);
    let indent = " ".repeat(CARD_INDENT);

    let index_str = format!(" {:>3}. ", index).cyan().bold().to_string();
    let title = record
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or("(no title)");
    output.push_str(&format!("{}{}\n", index_str, title.bold()));

    if let Some(u) = &url {
        output.push_str(&format!("{}{}\n", indent, format_hyperlink(u, u).blue()));
    }

    if let Some(desc) = record.get("long_desc").and_then(Value::as_str) {
        let clean = clean_snippet(desc);
        for line in textwrap::wrap(&clean, content_width) {
            output.push_str(&format!("{}{}\n", indent, line.dimmed()));
        }
    }

    let meta = meta_line(record);
    if !meta.is_empty() {
        output.push_str(&format!("{}{}\n", indent, meta.dimmed()));
    }

    output
}

/// Known metadata joined with ` · `; null and zero placeholders are skipped.
fn meta_line(record: &Value) -> String {
    META_KEYS
        .iter()
        .filter_map(|key| record.get(*key).and_then(Value::as_str))
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(" · ")
}

fn format_section_header(label: &str, count: usize, width: usize) -> String {
    let header_text = format!("{} ({} results)", label, count);
    let line_len = (width.saturating_sub(header_text.len() + 4)).min(60);
    let line = "─".repeat(line_len);

    format!(
        "{} {} {}",
        "──".cyan(),
        header_text.green().bold(),
        line.cyan()
    )
}

fn clean_snippet(s: &str) -> String {
    s.replace('\n', " ")
        .replace('\r', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(DEFAULT_WIDTH)
}

/// Format a URL as a clickable hyperlink using OSC 8 escape sequences.
fn format_hyperlink(url: &str, display_text: &str) -> String {
    format!("\x1b]8;;{}\x07{}\x1b]8;;\x07", url, display_text)
}
