//! Normalized search records.

use serde::{Serialize, Serializer};

/// A display string from the payload, or the integer `0` when the payload
/// carried none. Serializes as either a JSON string or the number `0`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TextOrZero {
    Text(String),
    #[default]
    Zero,
}

impl TextOrZero {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TextOrZero::Text(text) => Some(text),
            TextOrZero::Zero => None,
        }
    }
}

impl From<Option<String>> for TextOrZero {
    fn from(value: Option<String>) -> Self {
        value.map(TextOrZero::Text).unwrap_or_default()
    }
}

impl Serialize for TextOrZero {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TextOrZero::Text(text) => serializer.serialize_str(text),
            TextOrZero::Zero => serializer.serialize_u8(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoRecord {
    pub id: Option<String>,
    pub thumbnails: Vec<String>,
    pub title: Option<String>,
    pub long_desc: Option<String>,
    pub channel: Option<String>,
    pub duration: TextOrZero,
    pub views: TextOrZero,
    pub publish_time: TextOrZero,
    pub url_suffix: Option<String>,
}

/// Playlists carry no description or timing data in the results payload, so
/// `long_desc`, `duration`, `views` and `publish_time` are always `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistRecord {
    pub id: Option<String>,
    pub thumbnails: Vec<String>,
    pub title: Option<String>,
    pub long_desc: Option<String>,
    pub channel: Option<String>,
    pub duration: Option<String>,
    pub views: Option<String>,
    pub publish_time: Option<String>,
    pub url_suffix: String,
}

pub const PLAYLIST_URL_PREFIX: &str = "/playlist?list=";

impl PlaylistRecord {
    pub fn new(
        id: Option<String>,
        thumbnails: Vec<String>,
        title: Option<String>,
        channel: Option<String>,
        list_id: &str,
    ) -> Self {
        Self {
            id,
            thumbnails,
            title,
            long_desc: None,
            channel,
            duration: None,
            views: None,
            publish_time: None,
            url_suffix: format!("{PLAYLIST_URL_PREFIX}{list_id}"),
        }
    }
}

/// Records from one search. The schema is fixed for the whole set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResultSet {
    Videos(Vec<VideoRecord>),
    Playlists(Vec<PlaylistRecord>),
}

impl ResultSet {
    pub fn len(&self) -> usize {
        match self {
            ResultSet::Videos(videos) => videos.len(),
            ResultSet::Playlists(playlists) => playlists.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keeps the first `max` records, in payload order.
    pub fn truncate(&mut self, max: usize) {
        match self {
            ResultSet::Videos(videos) => videos.truncate(max),
            ResultSet::Playlists(playlists) => playlists.truncate(max),
        }
    }

    pub fn as_videos(&self) -> Option<&[VideoRecord]> {
        match self {
            ResultSet::Videos(videos) => Some(videos),
            ResultSet::Playlists(_) => None,
        }
    }

    pub fn as_playlists(&self) -> Option<&[PlaylistRecord]> {
        match self {
            ResultSet::Playlists(playlists) => Some(playlists),
            ResultSet::Videos(_) => None,
        }
    }
}
