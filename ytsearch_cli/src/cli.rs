use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use ytsearch_core::YouTubeFilter;

fn after_help() -> String {
    let names: Vec<&str> = YouTubeFilter::ALL.iter().map(|f| f.name()).collect();
    let filters = textwrap::indent(&textwrap::fill(&names.join(", "), 76), "  ");
    format!(
        "\x1b[1;33mExamples:\x1b[0m
  ytsearch \"rust tutorial\" 10                 Top 10 videos
  ytsearch \"lofi beats\" 5 --filter playlist    Playlists only
  ytsearch \"news\" 20 --filter today --output json
  ytsearch \"talks\" 3 --copy                    Copy the JSON to the clipboard

\x1b[1;36mFilters:\x1b[0m
{filters}
\x1b[1;36mConfiguration:\x1b[0m
  ~/.config/ytsearch/config.toml, YTSEARCH_BASE_URL, YTSEARCH_MAX_ATTEMPTS"
    )
}

#[derive(Parser, Debug)]
#[command(name = "ytsearch")]
#[command(about = "ytsearch - Search YouTube from the terminal")]
#[command(version)]
#[command(after_help = after_help())]
pub struct Cli {
    /// Search terms (quote multi-word queries)
    pub terms: Option<String>,

    /// Maximum number of results to return
    pub max_results: Option<String>,

    /// Restrict results with a named filter (e.g. playlist, today, 4k)
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,

    /// Read results without clearing them
    #[arg(long)]
    pub keep: bool,

    /// Copy the JSON results to the clipboard
    #[arg(short, long)]
    pub copy: bool,

    /// Config file to use instead of ~/.config/ytsearch/config.toml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fetch attempts before giving up
    #[arg(long, value_name = "N")]
    pub max_attempts: Option<u32>,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Terms and a positive result count, or `None` when either is missing
    /// or the count does not parse.
    pub fn search_inputs(&self) -> Option<(&str, usize)> {
        let terms = self.terms.as_deref()?;
        let max_results = self.max_results.as_deref()?.trim().parse::<usize>().ok()?;
        (max_results > 0).then_some((terms, max_results))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored result cards
    Pretty,
    Json,
    Yaml,
    /// One tab-separated line per record
    Text,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("ytsearch").chain(args.iter().copied()))
    }

    #[test]
    fn test_search_inputs() {
        let cli = parse(&["rust tutorial", "10"]);
        assert_eq!(cli.search_inputs(), Some(("rust tutorial", 10)));
        assert_eq!(cli.output, OutputFormat::Pretty);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(parse(&[]).search_inputs(), None);
        assert_eq!(parse(&["rust"]).search_inputs(), None);
        assert_eq!(parse(&["rust", "ten"]).search_inputs(), None);
        assert_eq!(parse(&["rust", "0"]).search_inputs(), None);
    }

    #[test]
    fn test_flags() {
        let cli = parse(&[
            "lofi",
            "5",
            "--filter",
            "playlist",
            "--output",
            "json",
            "--keep",
            "--max-attempts",
            "2",
            "-vv",
        ]);
        assert_eq!(cli.filter.as_deref(), Some("playlist"));
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(cli.keep);
        assert_eq!(cli.max_attempts, Some(2));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_help_lists_every_filter() {
        let help = Cli::command()
            .get_after_help()
            .map(|h| h.to_string())
            .unwrap_or_default();
        let block = help
            .split("Filters:")
            .nth(1)
            .and_then(|rest| rest.split("Configuration:").next())
            .unwrap();

        let advertised: Vec<&str> = block
            .split([',', '\n'])
            .map(str::trim)
            .filter(|name| !name.is_empty() && !name.starts_with('\x1b'))
            .collect();
        assert_eq!(advertised.len(), YouTubeFilter::ALL.len());
        for name in advertised {
            assert!(name.parse::<YouTubeFilter>().is_ok(), "rejected: {name}");
        }
    }
}
