//! Page bookmarks, keyed by url.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::storage::{JsonArraySlot, KeyValueStore, Persisted};

pub const BOOKMARKS_KEY: &str = "bookmarks";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    #[serde(default)]
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<BookmarkTime>,
}

impl Bookmark {
    /// When the page was saved, if the stored timestamp can be read as one.
    /// Numbers are taken as milliseconds since the Unix epoch.
    #[must_use]
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        match self.timestamp.as_ref()? {
            BookmarkTime::At(at) => Some(*at),
            BookmarkTime::Raw(raw) => raw.as_i64().and_then(DateTime::from_timestamp_millis),
        }
    }

    fn from_stored(item: Value) -> Option<Self> {
        let Value::Object(mut fields) = item else {
            return None;
        };
        let Some(Value::String(url)) = fields.remove("url") else {
            return None;
        };
        let title = match fields.remove("title") {
            Some(Value::String(title)) => title,
            _ => String::new(),
        };
        let timestamp = fields
            .remove("timestamp")
            .and_then(|raw| serde_json::from_value(raw).ok());
        Some(Self { title, url, timestamp })
    }
}

/// A stored timestamp. Values that are not RFC 3339 instants are kept
/// verbatim so they are written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookmarkTime {
    At(DateTime<Utc>),
    Raw(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkToggle {
    Added,
    Removed,
}

impl BookmarkToggle {
    /// Short confirmation for the user.
    #[must_use]
    pub fn notice(self) -> &'static str {
        match self {
            Self::Added => "Page bookmarked!",
            Self::Removed => "Bookmark removed",
        }
    }
}

#[derive(Error, Debug)]
pub enum BookmarksError {
    #[error("Cannot bookmark a page without a url")]
    EmptyUrl,
}

#[derive(Debug, Clone)]
pub struct BookmarksStore {
    slot: JsonArraySlot,
    entries: Vec<Bookmark>,
}

impl BookmarksStore {
    /// Read bookmarks from `key`. Entries that are not objects with a string
    /// `url` are dropped.
    #[instrument(name = "Load bookmarks", skip(storage), level = "info")]
    pub fn load(storage: Arc<dyn KeyValueStore>, key: &str) -> Self {
        let slot = JsonArraySlot::new(storage, key);
        let entries = read_entries(&slot);
        info!(bookmarks = entries.len(), "Bookmarks loaded");
        Self { slot, entries }
    }

    pub fn reload(&mut self) -> &[Bookmark] {
        self.entries = read_entries(&self.slot);
        &self.entries
    }

    #[must_use]
    pub fn list(&self) -> &[Bookmark] {
        &self.entries
    }

    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.entries.iter().any(|bookmark| bookmark.url == url)
    }

    pub fn toggle(&mut self, title: &str, url: &str) -> Result<Persisted<BookmarkToggle>, BookmarksError> {
        self.toggle_at(title, url, Utc::now())
    }

    /// Remove the bookmark for `url` if there is one, else append a new one
    /// stamped `now`. Then persist.
    pub fn toggle_at(
        &mut self,
        title: &str,
        url: &str,
        now: DateTime<Utc>,
    ) -> Result<Persisted<BookmarkToggle>, BookmarksError> {
        if url.is_empty() {
            return Err(BookmarksError::EmptyUrl);
        }

        let before = self.entries.len();
        self.entries.retain(|bookmark| bookmark.url != url);
        let outcome = if self.entries.len() == before {
            self.entries.push(Bookmark {
                title: title.to_string(),
                url: url.to_string(),
                timestamp: Some(BookmarkTime::At(now)),
            });
            BookmarkToggle::Added
        } else {
            BookmarkToggle::Removed
        };

        Ok(Persisted::new(outcome, self.slot.write(&self.entries)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn read_entries(slot: &JsonArraySlot) -> Vec<Bookmark> {
    slot.read()
        .into_iter()
        .filter_map(|item| {
            let bookmark = Bookmark::from_stored(item);
            if bookmark.is_none() {
                warn!(key = slot.key(), "Dropping bookmark without a url");
            }
            bookmark
        })
        .collect()
}
