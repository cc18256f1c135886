//! Runs several independent searches concurrently.
//!
//! Each request gets its own fetch loop and its own [`ResultHolder`]; nothing
//! mutable is shared between queries. Results come back in request order.
//!
//! [`ResultHolder`]: crate::holder::ResultHolder

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::SearchError;
use crate::search::{SearchRequest, YouTubeSearcher, YoutubeSearch};

/// Searches every request with at most `num_workers` in flight.
pub async fn search_many(
    searcher: &YouTubeSearcher,
    requests: Vec<SearchRequest>,
    num_workers: usize,
    cancel: &CancellationToken,
) -> Result<Vec<Result<YoutubeSearch, SearchError>>, SearchError> {
    if num_workers == 0 {
        return Err(SearchError::InvalidInput(
            "num_workers must be at least 1".to_string(),
        ));
    }

    let total = requests.len();
    let results: Vec<_> = stream::iter(requests)
        .map(|request| YoutubeSearch::run_with_cancel(searcher, request, cancel))
        .buffered(num_workers)
        .collect()
        .await;

    let failed = results.iter().filter(|r| r.is_err()).count();
    info!(total, failed, num_workers, "Batch search completed");

    Ok(results)
}

/// One request per query, all sharing `max_results`.
pub fn requests_for_terms<I, S>(
    terms: I,
    max_results: Option<usize>,
) -> Result<Vec<SearchRequest>, SearchError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    terms
        .into_iter()
        .map(|t| {
            let request = SearchRequest::new(t);
            match max_results {
                Some(max) => request.with_max_results(max),
                None => Ok(request),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_for_terms() {
        let requests = requests_for_terms(["a", "b", "c"], Some(10)).unwrap();
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().all(|r| r.max_results() == Some(10)));
        assert_eq!(requests[1].terms(), "b");

        assert!(requests_for_terms(["a"], Some(0)).is_err());
    }
}
