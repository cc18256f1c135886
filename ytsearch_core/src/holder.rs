//! One-shot container for the last search's records.
//!
//! Reads default to consuming: the records are handed out once and the holder
//! drops to [`HeldResults::Cleared`]. `Cleared` is a state of its own, distinct
//! from a populated-but-empty result set, and serializes as `""`.

use serde::{Serialize, Serializer};

use crate::error::SearchError;
use crate::records::ResultSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeldResults {
    Populated(ResultSet),
    Cleared,
}

impl HeldResults {
    pub fn is_cleared(&self) -> bool {
        matches!(self, HeldResults::Cleared)
    }

    pub fn results(&self) -> Option<&ResultSet> {
        match self {
            HeldResults::Populated(results) => Some(results),
            HeldResults::Cleared => None,
        }
    }

    pub fn into_results(self) -> Option<ResultSet> {
        match self {
            HeldResults::Populated(results) => Some(results),
            HeldResults::Cleared => None,
        }
    }
}

impl Serialize for HeldResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            HeldResults::Populated(results) => results.serialize(serializer),
            HeldResults::Cleared => serializer.serialize_str(""),
        }
    }
}

#[derive(Serialize)]
struct VideosDocument<'a> {
    videos: &'a HeldResults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// Hand out the records and clear the holder.
    #[default]
    Consume,
    /// Hand out a copy and leave the holder untouched.
    Keep,
}

#[derive(Debug, Clone)]
pub struct ResultHolder {
    state: HeldResults,
}

impl ResultHolder {
    pub fn new(results: ResultSet) -> Self {
        Self {
            state: HeldResults::Populated(results),
        }
    }

    /// Current state, without reading.
    pub fn videos(&self) -> &HeldResults {
        &self.state
    }

    /// The records (or the cleared marker) as a structured value.
    pub fn to_dict(&mut self, mode: ReadMode) -> HeldResults {
        match mode {
            ReadMode::Keep => self.state.clone(),
            ReadMode::Consume => std::mem::replace(&mut self.state, HeldResults::Cleared),
        }
    }

    /// `{"videos": <records or "">}` as JSON text.
    pub fn to_json(&mut self, mode: ReadMode) -> Result<String, SearchError> {
        let text = serde_json::to_string(&VideosDocument {
            videos: &self.state,
        })?;
        if mode == ReadMode::Consume {
            self.clear();
        }
        Ok(text)
    }

    pub fn clear(&mut self) {
        self.state = HeldResults::Cleared;
    }
}
