use std::sync::Arc;

use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Url;
use tracing::debug;

use crate::config::SearchConfig;
use crate::error::SearchError;

/// A fetched page: HTTP status plus body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outbound GET capability used by the search loop.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Returns the page, or a transport-level error (DNS, connect, timeout).
    /// Non-2xx responses are returned as pages, not errors.
    async fn fetch(&self, url: &str) -> Result<FetchedPage, SearchError>;
}

/// reqwest-backed fetcher with browser-like headers.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let mut headers = HeaderMap::new();
        let language = HeaderValue::from_str(&config.accept_language)
            .map_err(|e| SearchError::Config(format!("invalid accept_language: {}", e)))?;
        headers.insert(ACCEPT_LANGUAGE, language);

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| SearchError::Config(format!("invalid base_url: {}", e)))?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .cookie_provider(consent_jar(&base_url))
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { client })
    }
}

/// Cookie store pre-seeded with `CONSENT=YES+`, which skips the consent
/// interstitial served to fresh sessions. Cookies set by responses are kept
/// across retries.
fn consent_jar(base_url: &Url) -> Arc<Jar> {
    let cookie = match base_url.domain() {
        Some(domain) => format!("CONSENT=YES+; Domain={}; Path=/", domain),
        None => "CONSENT=YES+; Path=/".to_string(),
    };
    let jar = Jar::default();
    jar.add_cookie_str(&cookie, base_url);
    Arc::new(jar)
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, SearchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, bytes = body.len(), "Fetched results page");
        Ok(FetchedPage { status, body })
    }
}
