//! Catalog of the provider's `sp` filter tokens.
//!
//! Tokens are stored exactly as they go on the wire (already percent-encoded),
//! so they are appended to the query string verbatim.

use crate::error::SearchError;
use crate::extractor::ExtractorMode;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YouTubeFilter {
    Today,
    ThisWeek,
    ThisMonth,
    ThisYear,
    Playlist,
    Under4Minutes,
    Between4And20Minutes,
    Over20Minutes,
    Live,
    FourK,
    Hd,
    SubtitlesCc,
    CreativeCommons,
    ThreeSixty,
    Vr180,
    ThreeD,
    Hdr,
    Location,
    Purchased,
    UploadDate,
    ViewCount,
    Rating,
}

impl YouTubeFilter {
    pub const ALL: [YouTubeFilter; 22] = [
        YouTubeFilter::Today,
        YouTubeFilter::ThisWeek,
        YouTubeFilter::ThisMonth,
        YouTubeFilter::ThisYear,
        YouTubeFilter::Playlist,
        YouTubeFilter::Under4Minutes,
        YouTubeFilter::Between4And20Minutes,
        YouTubeFilter::Over20Minutes,
        YouTubeFilter::Live,
        YouTubeFilter::FourK,
        YouTubeFilter::Hd,
        YouTubeFilter::SubtitlesCc,
        YouTubeFilter::CreativeCommons,
        YouTubeFilter::ThreeSixty,
        YouTubeFilter::Vr180,
        YouTubeFilter::ThreeD,
        YouTubeFilter::Hdr,
        YouTubeFilter::Location,
        YouTubeFilter::Purchased,
        YouTubeFilter::UploadDate,
        YouTubeFilter::ViewCount,
        YouTubeFilter::Rating,
    ];

    /// The opaque value sent as the `sp` query parameter.
    pub fn token(self) -> &'static str {
        match self {
            YouTubeFilter::Today => "EgIIAg%253D%253D",
            YouTubeFilter::ThisWeek => "EgIIAw%253D%253D",
            YouTubeFilter::ThisMonth => "EgIIBA%253D%253D",
            YouTubeFilter::ThisYear => "EgIIBQ%253D%253D",
            YouTubeFilter::Playlist => "EgIQAw%253D%253D",
            YouTubeFilter::Under4Minutes => "EgIYAQ%253D%253D",
            YouTubeFilter::Between4And20Minutes => "EgIYAw%253D%253D",
            YouTubeFilter::Over20Minutes => "EgIYAg%253D%253D",
            YouTubeFilter::Live => "EgJAAQ%253D%253D",
            YouTubeFilter::FourK => "EgJwAQ%253D%253D",
            YouTubeFilter::Hd => "EgIgAQ%253D%253D",
            YouTubeFilter::SubtitlesCc => "EgIoAQ%253D%253D",
            YouTubeFilter::CreativeCommons => "EgIwAQ%253D%253D",
            YouTubeFilter::ThreeSixty => "EgJ4AQ%253D%253D",
            YouTubeFilter::Vr180 => "EgPQAQE%253D",
            YouTubeFilter::ThreeD => "EgI4AQ%253D%253D",
            YouTubeFilter::Hdr => "EgPIAQE%253D",
            YouTubeFilter::Location => "EgO4AQE%253D",
            YouTubeFilter::Purchased => "EgJIAQ%253D%253D",
            YouTubeFilter::UploadDate => "CAISAA%253D%253D",
            YouTubeFilter::ViewCount => "CAMSAA%253D%253D",
            YouTubeFilter::Rating => "CAESAA%253D%253D",
        }
    }

    /// Human-facing name, as accepted by `FromStr` and the CLI.
    pub fn name(self) -> &'static str {
        match self {
            YouTubeFilter::Today => "today",
            YouTubeFilter::ThisWeek => "this-week",
            YouTubeFilter::ThisMonth => "this-month",
            YouTubeFilter::ThisYear => "this-year",
            YouTubeFilter::Playlist => "playlist",
            YouTubeFilter::Under4Minutes => "under-4-minutes",
            YouTubeFilter::Between4And20Minutes => "between-4-and-20-minutes",
            YouTubeFilter::Over20Minutes => "over-20-minutes",
            YouTubeFilter::Live => "live",
            YouTubeFilter::FourK => "4k",
            YouTubeFilter::Hd => "hd",
            YouTubeFilter::SubtitlesCc => "subtitles-cc",
            YouTubeFilter::CreativeCommons => "creative-commons",
            YouTubeFilter::ThreeSixty => "360",
            YouTubeFilter::Vr180 => "vr180",
            YouTubeFilter::ThreeD => "3d",
            YouTubeFilter::Hdr => "hdr",
            YouTubeFilter::Location => "location",
            YouTubeFilter::Purchased => "purchased",
            YouTubeFilter::UploadDate => "upload-date",
            YouTubeFilter::ViewCount => "view-count",
            YouTubeFilter::Rating => "rating",
        }
    }

    /// Looks up a filter by its raw `sp` token.
    pub fn from_token(token: &str) -> Option<Self> {
        static BY_TOKEN: Lazy<HashMap<&'static str, YouTubeFilter>> = Lazy::new(|| {
            YouTubeFilter::ALL
                .iter()
                .map(|filter| (filter.token(), *filter))
                .collect()
        });
        BY_TOKEN.get(token).copied()
    }

    pub fn extractor_mode(self) -> ExtractorMode {
        match self {
            YouTubeFilter::Playlist => ExtractorMode::Playlist,
            _ => ExtractorMode::Video,
        }
    }
}

impl fmt::Display for YouTubeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for YouTubeFilter {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        YouTubeFilter::ALL
            .iter()
            .copied()
            .find(|filter| filter.name() == wanted)
            .ok_or_else(|| SearchError::UnrecognizedFilter(s.to_string()))
    }
}
