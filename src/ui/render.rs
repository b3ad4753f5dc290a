//! Text formatting for lists and feedback lines.
//!
//! Everything that came from a feed passes through [`strip_control_chars`]
//! before it reaches the terminal.

use std::fmt::Write;

use crate::bookmarks::{AddOutcome, BookmarkStore};
use crate::feed::{FeedChannel, NewsEntry};
use crate::util::{strip_control_chars, truncate_to_width};

/// Columns of a title quoted in save confirmations.
const FEEDBACK_TITLE_WIDTH: usize = 10;

pub const NOTHING_NEW: &str = "Nothing new in the selected period.";
pub const NO_BOOKMARKS: &str = "No saved articles.";

/// Numbered entry list: title, then date and link on an indented line.
pub fn render_entries(entries: &[NewsEntry]) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", i + 1, strip_control_chars(&entry.title));
        let link = strip_control_chars(&entry.link);
        if entry.has_date() {
            let _ = writeln!(out, "     {}  {}", entry.display_date, link);
        } else {
            let _ = writeln!(out, "     {}", link);
        }
    }
    out
}

pub fn render_bookmarks(bookmarks: &BookmarkStore) -> String {
    if bookmarks.is_empty() {
        return format!("{}\n", NO_BOOKMARKS);
    }
    format!(
        "Saved articles ({}):\n{}",
        bookmarks.len(),
        render_entries(bookmarks.list())
    )
}

/// Channel list with the selected one marked.
pub fn render_channels(channels: &[FeedChannel], selected: &FeedChannel) -> String {
    let mut out = String::new();
    for (i, channel) in channels.iter().enumerate() {
        let marker = if channel == selected { '*' } else { ' ' };
        let _ = writeln!(out, "{} {:>2}. {}", marker, i + 1, channel.name);
    }
    out
}

pub fn save_feedback(outcome: AddOutcome, entry: &NewsEntry) -> String {
    match outcome {
        AddOutcome::Added => {
            let title = strip_control_chars(&entry.title);
            format!("Saved: {}", truncate_to_width(&title, FEEDBACK_TITLE_WIDTH))
        }
        AddOutcome::AlreadyPresent => "Already saved".to_string(),
    }
}
