use crate::cli::Cli;
use crate::commands::{copy_to_clipboard, Result};
use crate::output::{render, SearchReport};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tracing::{debug, warn};
use ytsearch_core::{
    CancellationToken, ConfigStore, ReadMode, SearchConfig, SearchRequest, YouTubeFilter,
    YouTubeSearcher, YoutubeSearch,
};

/// Run one search and print its results.
pub async fn run(cli: &Cli, terms: &str, max_results: usize) -> Result<()> {
    let config = load_config(cli)?;

    let mut request = SearchRequest::new(terms).with_max_results(max_results)?;
    if let Some(name) = &cli.filter {
        request = request.with_filter(name.parse::<YouTubeFilter>()?);
    }
    let filter = request.filter();

    let searcher = YouTubeSearcher::new(config)?;
    debug!(url = %searcher.search_url(&request), "Prepared search");

    // Ctrl-C aborts the fetch loop, including any backoff in progress.
    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Searching YouTube for '{}'...", terms));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let outcome = YoutubeSearch::run_with_cancel(&searcher, request, &cancel).await;
    spinner.finish_and_clear();
    interrupt.abort();
    let mut search = outcome?;

    if let Some(issue) = search.issue() {
        warn!(%issue, "Results page had no usable payload");
    }

    // The clipboard copy is taken first so a consuming read below still sees data.
    let clipboard_text = if cli.copy {
        Some(search.holder_mut().to_json(ReadMode::Keep)?)
    } else {
        None
    };

    let mode = if cli.keep {
        ReadMode::Keep
    } else {
        ReadMode::Consume
    };
    let held = search.holder_mut().to_dict(mode);

    let report = SearchReport {
        terms,
        filter,
        base_url: &searcher.config().base_url,
        held: &held,
        issue: search.issue(),
    };
    println!("{}", render(&report, cli.output)?);

    if let Some(text) = clipboard_text {
        copy_to_clipboard(&text)?;
        eprintln!("{}", "Copied results to clipboard".green());
    }

    debug!(
        cleared = search.holder().videos().is_cleared(),
        "Result holder state after read"
    );
    Ok(())
}

/// File and environment settings, then command-line overrides.
fn load_config(cli: &Cli) -> Result<SearchConfig> {
    let store = match &cli.config {
        Some(path) => ConfigStore::new(path.clone()),
        None => ConfigStore::new_default(),
    };
    debug!(path = %store.path().display(), "Loading configuration");

    let mut config = store.load_with_env()?;
    if let Some(max_attempts) = cli.max_attempts {
        config.max_attempts = max_attempts;
    }
    Ok(config)
}
