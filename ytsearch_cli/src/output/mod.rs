use crate::cli::OutputFormat;
use crate::commands::Result;
use serde_json::{json, Value};
use ytsearch_core::{ExtractorMode, HeldResults, PayloadIssue, YouTubeFilter};

mod pretty;
pub use pretty::format_pretty;

/// Everything a formatter needs about one finished search.
pub struct SearchReport<'a> {
    pub terms: &'a str,
    pub filter: Option<YouTubeFilter>,
    pub base_url: &'a str,
    pub held: &'a HeldResults,
    pub issue: Option<&'a PayloadIssue>,
}

impl SearchReport<'_> {
    fn label(&self) -> &'static str {
        match self.filter.map(YouTubeFilter::extractor_mode) {
            Some(ExtractorMode::Playlist) => "playlists",
            _ => "videos",
        }
    }

    /// Records as JSON objects; empty once the holder has been cleared.
    fn records(&self) -> Result<Vec<Value>> {
        match self.held.results() {
            Some(results) => match serde_json::to_value(results)? {
                Value::Array(items) => Ok(items),
                _ => Ok(Vec::new()),
            },
            None => Ok(Vec::new()),
        }
    }

    fn watch_url(&self, record: &Value) -> Option<String> {
        let suffix = record.get("url_suffix")?.as_str()?;
        Some(format!("{}{}", self.base_url.trim_end_matches('/'), suffix))
    }
}

pub fn render(report: &SearchReport<'_>, format: OutputFormat) -> Result<String> {
    let document = json!({ "videos": report.held });
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&document)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&document)?),
        OutputFormat::Text => format_text(report),
        OutputFormat::Pretty => format_pretty(report),
    }
}

fn format_text(report: &SearchReport<'_>) -> Result<String> {
    let lines: Vec<String> = report
        .records()?
        .iter()
        .map(|record| {
            let title = record.get("title").and_then(Value::as_str).unwrap_or("-");
            let url = report.watch_url(record).unwrap_or_else(|| "-".to_string());
            format!("{}\t{}", title, url)
        })
        .collect();
    Ok(lines.join("\n"))
}
