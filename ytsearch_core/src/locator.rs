//! Finds the `ytInitialData` object embedded in a results page.

use crate::error::SearchError;
use serde_json::Value;

/// Identifier that precedes the initial-state JSON in the page markup.
pub const PAYLOAD_MARKER: &str = "ytInitialData";

/// Bytes between the end of the marker and the opening brace (` = `).
const MARKER_GAP: usize = 3;

const OBJECT_END: &str = "};";

/// Returns the embedded payload, `Ok(None)` when the marker is missing, or
/// `MalformedPayload` when a slice was found but is not valid JSON.
pub fn locate_payload(html: &str) -> Result<Option<Value>, SearchError> {
    let Some(json_str) = slice_payload(html)? else {
        return Ok(None);
    };

    serde_json::from_str(json_str)
        .map(Some)
        .map_err(|e| SearchError::MalformedPayload(e.to_string()))
}

/// Raw payload text: from just past the marker through the first `}` that is
/// followed by `;`.
pub fn slice_payload(html: &str) -> Result<Option<&str>, SearchError> {
    let Some(marker_at) = html.find(PAYLOAD_MARKER) else {
        return Ok(None);
    };

    let start = marker_at + PAYLOAD_MARKER.len() + MARKER_GAP;
    let tail = html.get(start..).ok_or_else(|| {
        SearchError::MalformedPayload("payload starts past end of document".to_string())
    })?;

    let end = tail.find(OBJECT_END).ok_or_else(|| {
        SearchError::MalformedPayload("no closing '};' after payload marker".to_string())
    })?;

    Ok(Some(&tail[..=end]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locates_var_assignment() {
        let html = r#"<script>var ytInitialData = {"a": {"b": 1}};</script>"#;
        let value = locate_payload(html).unwrap().unwrap();
        assert_eq!(value["a"]["b"], 1);
    }

    #[test]
    fn test_ignores_trailing_scripts() {
        let html = r#"<script>var ytInitialData = {"k": [1, 2]};var other = {};</script>"#;
        let value = locate_payload(html).unwrap().unwrap();
        assert_eq!(value["k"][1], 2);
    }

    #[test]
    fn test_bracketed_assignment_is_malformed() {
        // Only the ` = ` form lines the opening brace up with the fixed gap.
        let html = r#"window["ytInitialData"] = {"k": 1};"#;
        let err = locate_payload(html).unwrap_err();
        assert!(matches!(err, SearchError::MalformedPayload(_)));
    }

    #[test]
    fn test_stops_at_first_terminator() {
        let html = r#"ytInitialData = {"x": 1};ytcfg = {"y": 2};"#;
        assert_eq!(slice_payload(html).unwrap(), Some(r#"{"x": 1}"#));
    }

    #[test]
    fn test_missing_marker_is_not_found() {
        assert!(locate_payload("<html><body>consent</body></html>")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_unterminated_payload_is_malformed() {
        let err = locate_payload(r#"ytInitialData = {"open": true"#).unwrap_err();
        assert!(matches!(err, SearchError::MalformedPayload(_)));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = locate_payload(r#"ytInitialData = {"x": };"#).unwrap_err();
        assert!(matches!(err, SearchError::MalformedPayload(_)));
    }

    #[test]
    fn test_marker_at_end_of_document() {
        let err = locate_payload("...ytInitialData").unwrap_err();
        assert!(matches!(err, SearchError::MalformedPayload(_)));
    }
}
