use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// A news item that survived filtering, ready for display or bookmarking.
///
/// Equality is structural over every field; bookmarks rely on it to detect
/// duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsEntry {
    pub title: String,
    pub link: String,
    /// Publication instant in the feed's own offset, or the fetch instant
    /// (UTC) when the feed gave no usable date.
    pub published_at: DateTime<FixedOffset>,
    /// `YYYY-MM-DD` of the publication date; empty when the date was defaulted.
    pub display_date: String,
}

impl NewsEntry {
    /// True if `published_at` came from the feed rather than the fetch clock.
    pub fn has_date(&self) -> bool {
        !self.display_date.is_empty()
    }
}
