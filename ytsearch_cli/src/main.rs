use clap::Parser;
use owo_colors::OwoColorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod output;

use cli::Cli;
use commands::search;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "ytsearch_cli=info,ytsearch_core=warn",
        1 => "ytsearch_cli=debug,ytsearch_core=info",
        _ => "ytsearch_cli=trace,ytsearch_core=debug",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some((terms, max_results)) = cli.search_inputs() else {
        println!("Invalid Input");
        return;
    };

    if let Err(e) = search::run(&cli, terms, max_results).await {
        eprintln!("{}: {}", "Error".red().bold(), e);
        process::exit(1);
    }
}
