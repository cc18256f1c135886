//! Walks the parsed `ytInitialData` tree and builds normalized records.
//!
//! The schema is picked up front by [`ExtractorMode`]; item tags in the payload
//! only decide which items are kept, never which record type is produced.

use crate::records::{PlaylistRecord, ResultSet, TextOrZero, VideoRecord};
use crate::utils::{array_at, first_run_text, json_path, simple_text, str_at};
use serde_json::Value;

const SECTIONS_PATH: &str =
    "/contents/twoColumnSearchResultsRenderer/primaryContents/sectionListRenderer/contents";
const ITEMS_PATH: &str = "/itemSectionRenderer/contents";

const VIDEO_TAG: &str = "videoRenderer";
const PLAYLIST_TAG: &str = "playlistRenderer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractorMode {
    #[default]
    Video,
    Playlist,
}

impl ExtractorMode {
    fn tag(self) -> &'static str {
        match self {
            ExtractorMode::Video => VIDEO_TAG,
            ExtractorMode::Playlist => PLAYLIST_TAG,
        }
    }
}

/// Records of the requested schema, in payload order.
pub fn extract_records(data: &Value, mode: ExtractorMode) -> ResultSet {
    let tagged = tagged_items(data, mode.tag());
    match mode {
        ExtractorMode::Video => ResultSet::Videos(tagged.map(video_record).collect()),
        ExtractorMode::Playlist => ResultSet::Playlists(tagged.map(playlist_record).collect()),
    }
}

/// An empty set of the schema `mode` selects.
pub fn empty_results(mode: ExtractorMode) -> ResultSet {
    match mode {
        ExtractorMode::Video => ResultSet::Videos(Vec::new()),
        ExtractorMode::Playlist => ResultSet::Playlists(Vec::new()),
    }
}

/// Renderer bodies for every item carrying `tag`, across all item sections.
fn tagged_items<'a>(data: &'a Value, tag: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
    array_at(data, SECTIONS_PATH)
        .iter()
        .flat_map(|section| array_at(section, ITEMS_PATH))
        .filter_map(move |item| item.get(tag))
}

fn video_record(video: &Value) -> VideoRecord {
    VideoRecord {
        id: str_at(video, "/videoId"),
        thumbnails: array_at(video, "/thumbnail/thumbnails")
            .iter()
            .filter_map(|thumb| str_at(thumb, "/url"))
            .collect(),
        title: first_run_text(video, "title"),
        long_desc: first_run_text(video, "descriptionSnippet"),
        channel: first_run_text(video, "longBylineText"),
        duration: TextOrZero::from(simple_text(video, "lengthText")),
        views: TextOrZero::from(simple_text(video, "viewCountText")),
        publish_time: TextOrZero::from(simple_text(video, "publishedTimeText")),
        url_suffix: str_at(
            video,
            "/navigationEndpoint/commandMetadata/webCommandMetadata/url",
        ),
    }
}

fn playlist_record(playlist: &Value) -> PlaylistRecord {
    let id = str_at(playlist, "/playlistId");
    let list_id = str_at(playlist, "/navigationEndpoint/watchEndpoint/playlistId")
        .or_else(|| id.clone())
        .unwrap_or_default();

    PlaylistRecord::new(
        id,
        playlist_thumbnails(playlist),
        simple_text(playlist, "title"),
        first_run_text(playlist, "longBylineText"),
        &list_id,
    )
}

/// Playlist thumbnails come either as flat `{url}` entries or as groups
/// wrapping their own `thumbnails` array.
fn playlist_thumbnails(playlist: &Value) -> Vec<String> {
    let Some(entries) = json_path(playlist, "/thumbnails").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut urls = Vec::new();
    for entry in entries {
        match str_at(entry, "/url") {
            Some(url) => urls.push(url),
            None => urls.extend(
                array_at(entry, "/thumbnails")
                    .iter()
                    .filter_map(|thumb| str_at(thumb, "/url")),
            ),
        }
    }
    urls
}
