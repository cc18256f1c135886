// src/lib.rs
//! Scrapes the YouTube results page and normalizes its embedded
//! `ytInitialData` payload into flat video or playlist records.
//!
//! ```ignore
//! use ytsearch_core::{ReadMode, SearchConfig, SearchRequest, YouTubeSearcher, YoutubeSearch};
//!
//! let searcher = YouTubeSearcher::new(SearchConfig::default())?;
//! let request = SearchRequest::new("rust async").with_max_results(10)?;
//! let mut search = YoutubeSearch::run(&searcher, request).await?;
//! let json = search.holder_mut().to_json(ReadMode::Consume)?;
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod extractor;
pub mod filters;
pub mod holder;
pub mod locator;
pub mod records;
pub mod search;
pub mod transport;
pub mod utils;

pub use batch::{requests_for_terms, search_many};
pub use config::{ConfigStore, SearchConfig};
pub use error::SearchError;
pub use extractor::{extract_records, ExtractorMode};
pub use filters::YouTubeFilter;
pub use holder::{HeldResults, ReadMode, ResultHolder};
pub use locator::{locate_payload, PAYLOAD_MARKER};
pub use records::{PlaylistRecord, ResultSet, TextOrZero, VideoRecord, PLAYLIST_URL_PREFIX};
pub use search::{
    build_search_url, PayloadIssue, SearchOutcome, SearchRequest, YouTubeSearcher, YoutubeSearch,
};
pub use tokio_util::sync::CancellationToken;
pub use transport::{FetchedPage, HttpFetcher, PageFetcher};
