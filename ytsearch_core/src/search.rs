//! Search orchestration: URL building, the bounded fetch loop, extraction and
//! truncation.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::form_urlencoded;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::extractor::{empty_results, extract_records, ExtractorMode};
use crate::filters::YouTubeFilter;
use crate::holder::ResultHolder;
use crate::locator::{locate_payload, PAYLOAD_MARKER};
use crate::records::ResultSet;
use crate::transport::{HttpFetcher, PageFetcher};

/// One query: terms, optional result cap, optional filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    terms: String,
    max_results: Option<usize>,
    filter: Option<YouTubeFilter>,
}

impl SearchRequest {
    pub fn new(terms: impl Into<String>) -> Self {
        Self {
            terms: terms.into(),
            max_results: None,
            filter: None,
        }
    }

    /// Caps the number of records returned. Zero is rejected.
    pub fn with_max_results(mut self, max_results: usize) -> Result<Self, SearchError> {
        if max_results == 0 {
            return Err(SearchError::InvalidInput(
                "max_results must be a positive integer".to_string(),
            ));
        }
        self.max_results = Some(max_results);
        Ok(self)
    }

    pub fn with_filter(mut self, filter: YouTubeFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the filter from a raw `sp` token, rejecting tokens outside the catalog.
    pub fn with_filter_token(self, token: &str) -> Result<Self, SearchError> {
        let filter = YouTubeFilter::from_token(token)
            .ok_or_else(|| SearchError::UnrecognizedFilter(token.to_string()))?;
        Ok(self.with_filter(filter))
    }

    pub fn terms(&self) -> &str {
        &self.terms
    }

    pub fn max_results(&self) -> Option<usize> {
        self.max_results
    }

    pub fn filter(&self) -> Option<YouTubeFilter> {
        self.filter
    }

    pub fn mode(&self) -> ExtractorMode {
        self.filter
            .map(YouTubeFilter::extractor_mode)
            .unwrap_or_default()
    }
}

/// Why a search that reached the parsing stage produced nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum PayloadIssue {
    MarkerAbsent,
    Malformed(String),
}

impl fmt::Display for PayloadIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadIssue::MarkerAbsent => f.write_str("payload marker absent"),
            PayloadIssue::Malformed(detail) => write!(f, "malformed payload: {detail}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub results: ResultSet,
    /// Set when the page was fetched but its payload could not be used.
    pub issue: Option<PayloadIssue>,
    /// Fetches it took to observe the payload marker.
    pub attempts: u32,
}

/// Form-style encoding for the `search_query` parameter (space becomes `+`).
pub fn encode_terms(terms: &str) -> String {
    form_urlencoded::byte_serialize(terms.as_bytes()).collect()
}

pub fn build_search_url(base_url: &str, request: &SearchRequest) -> String {
    let mut url = format!(
        "{}/results?search_query={}",
        base_url.trim_end_matches('/'),
        encode_terms(request.terms())
    );
    if let Some(filter) = request.filter() {
        url.push_str("&sp=");
        url.push_str(filter.token());
    }
    url
}

#[derive(Clone)]
pub struct YouTubeSearcher {
    fetcher: Arc<dyn PageFetcher>,
    config: SearchConfig,
}

impl YouTubeSearcher {
    /// Searcher backed by [`HttpFetcher`].
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::with_fetcher(Arc::new(fetcher), config))
    }

    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>, config: SearchConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn search_url(&self, request: &SearchRequest) -> String {
        build_search_url(&self.config.base_url, request)
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome, SearchError> {
        self.search_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// Runs one search. Only fatal conditions (`SearchUnavailable`,
    /// `Cancelled`) are returned as errors; an unusable payload yields an
    /// empty set with [`SearchOutcome::issue`] populated.
    pub async fn search_with_cancel(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<SearchOutcome, SearchError> {
        let url = self.search_url(request);
        let (body, attempts) = self.fetch_until_marker(&url, cancel).await?;

        let mode = request.mode();
        let (mut results, issue) = match locate_payload(&body) {
            Ok(Some(data)) => (extract_records(&data, mode), None),
            Ok(None) => (empty_results(mode), Some(PayloadIssue::MarkerAbsent)),
            Err(e) => {
                warn!(
                    error = %e,
                    code = e.code_str(),
                    url = %url,
                    "Embedded payload could not be parsed; returning no results"
                );
                (
                    empty_results(mode),
                    Some(PayloadIssue::Malformed(e.to_string())),
                )
            }
        };

        if let Some(max) = request.max_results() {
            results.truncate(max);
        }

        info!(
            terms = %request.terms(),
            count = results.len(),
            attempts,
            "Search completed"
        );

        Ok(SearchOutcome {
            results,
            issue,
            attempts,
        })
    }

    /// Fetches `url` until the body contains the payload marker, backing off
    /// between attempts. Gives up after `max_attempts`.
    async fn fetch_until_marker(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<(String, u32), SearchError> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut last_error = SearchError::PayloadMarkerAbsent;

        for attempt in 1..=max_attempts {
            debug!(attempt, url = %url, "Fetching results page");

            let fetched = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(SearchError::Cancelled),
                fetched = self.fetcher.fetch(url) => fetched,
            };

            match fetched {
                Ok(page) if !page.is_success() => {
                    last_error = SearchError::HttpStatus(page.status);
                }
                Ok(page) if !page.body.contains(PAYLOAD_MARKER) => {
                    last_error = SearchError::PayloadMarkerAbsent;
                }
                Ok(page) => return Ok((page.body, attempt)),
                Err(e) if e.is_transient() => last_error = e,
                Err(e) => return Err(e),
            }

            if attempt < max_attempts {
                let delay = self.config.backoff_delay(attempt - 1);
                warn!(
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %last_error,
                    "Results page not usable, retrying"
                );
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(SearchError::Cancelled),
                    _ = tokio::time::sleep(delay) => {}
                }
            }
        }

        Err(SearchError::SearchUnavailable {
            attempts: max_attempts,
            reason: last_error.to_string(),
        })
    }
}

/// A finished search: the request, its results holder, and any payload issue.
#[derive(Debug)]
pub struct YoutubeSearch {
    request: SearchRequest,
    holder: ResultHolder,
    issue: Option<PayloadIssue>,
}

impl YoutubeSearch {
    pub async fn run(
        searcher: &YouTubeSearcher,
        request: SearchRequest,
    ) -> Result<Self, SearchError> {
        Self::run_with_cancel(searcher, request, &CancellationToken::new()).await
    }

    pub async fn run_with_cancel(
        searcher: &YouTubeSearcher,
        request: SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<Self, SearchError> {
        let outcome = searcher.search_with_cancel(&request, cancel).await?;
        Ok(Self {
            request,
            holder: ResultHolder::new(outcome.results),
            issue: outcome.issue,
        })
    }

    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    pub fn max_results(&self) -> Option<usize> {
        self.request.max_results()
    }

    pub fn issue(&self) -> Option<&PayloadIssue> {
        self.issue.as_ref()
    }

    pub fn holder(&self) -> &ResultHolder {
        &self.holder
    }

    pub fn holder_mut(&mut self) -> &mut ResultHolder {
        &mut self.holder
    }

    pub fn into_holder(self) -> ResultHolder {
        self.holder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_terms_like_form() {
        assert_eq!(encode_terms("rust lang"), "rust+lang");
        assert_eq!(encode_terms("a&b=c/d"), "a%26b%3Dc%2Fd");
        assert_eq!(encode_terms("café"), "caf%C3%A9");
    }

    #[test]
    fn test_build_url_without_filter() {
        let request = SearchRequest::new("test query");
        assert_eq!(
            build_search_url("https://youtube.com", &request),
            "https://youtube.com/results?search_query=test+query"
        );
    }

    #[test]
    fn test_build_url_with_filter() {
        let request = SearchRequest::new("lofi").with_filter(YouTubeFilter::Playlist);
        assert_eq!(
            build_search_url("https://youtube.com/", &request),
            "https://youtube.com/results?search_query=lofi&sp=EgIQAw%253D%253D"
        );
    }

    #[test]
    fn test_request_validation() {
        assert!(matches!(
            SearchRequest::new("x").with_max_results(0),
            Err(SearchError::InvalidInput(_))
        ));
        assert!(matches!(
            SearchRequest::new("x").with_filter_token("EgIQAQ%3D%3D"),
            Err(SearchError::UnrecognizedFilter(_))
        ));

        let request = SearchRequest::new("x")
            .with_filter_token("EgIQAw%253D%253D")
            .unwrap();
        assert_eq!(request.filter(), Some(YouTubeFilter::Playlist));
        assert_eq!(request.mode(), ExtractorMode::Playlist);
        assert_eq!(SearchRequest::new("x").mode(), ExtractorMode::Video);
    }

    #[test]
    fn test_payload_issue_display() {
        assert_eq!(
            PayloadIssue::Malformed("eof".to_string()).to_string(),
            "malformed payload: eof"
        );
    }
}
