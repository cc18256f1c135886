//! Batch search example
//! Runs several queries concurrently and prints each one's results as JSON.
//!
//! cargo run -p ytsearch_core --example batch_search -- "rust" "tokio" "serde"

use ytsearch_core::{
    requests_for_terms, search_many, CancellationToken, ConfigStore, ReadMode, YouTubeSearcher,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut terms: Vec<String> = std::env::args().skip(1).collect();
    if terms.is_empty() {
        terms = vec!["rust".to_string(), "tokio".to_string()];
    }

    let config = ConfigStore::new_default().load_with_env()?;
    let searcher = YouTubeSearcher::new(config)?;
    let requests = requests_for_terms(terms.clone(), Some(5))?;

    let results = search_many(&searcher, requests, 4, &CancellationToken::new()).await?;

    for (term, result) in terms.iter().zip(results) {
        match result {
            Ok(mut search) => {
                println!("# {term}");
                println!("{}\n", search.holder_mut().to_json(ReadMode::Consume)?);
            }
            Err(e) => eprintln!("# {term} failed: {e}"),
        }
    }

    Ok(())
}
