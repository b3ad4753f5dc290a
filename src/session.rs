//! State owned by one user session: the selected channel, refresh options,
//! the current result list and the bookmarks.
//!
//! Every mutation goes through `&mut Session`, so overlapping refreshes of
//! the same session cannot be expressed; callers refresh one at a time.

use crate::bookmarks::{AddOutcome, BookmarkStore};
use crate::config::{clamp_logged, Config, DAY_WINDOW_RANGE, ITEM_LIMIT_RANGE};
use crate::feed::{default_channels, find_channel, FeedChannel, FetchError, NewsEntry};
use crate::pipeline::{Pipeline, RefreshOptions, RefreshOutcome};
use crate::translate::TranslationProvider;

/// How a successful [`Session::refresh`] changed the result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
    /// The result list now holds this many entries.
    Updated(usize),
    /// Nothing survived filtering; the result list is now empty.
    NothingNew,
}

pub struct Session<P> {
    pipeline: Pipeline<P>,
    channels: Vec<FeedChannel>,
    selected: usize,
    options: RefreshOptions,
    current: Vec<NewsEntry>,
    bookmarks: BookmarkStore,
}

impl<P: TranslationProvider> Session<P> {
    /// Starts an empty session on the first channel.
    ///
    /// An empty channel list falls back to the built-in channels.
    pub fn new(pipeline: Pipeline<P>, channels: Vec<FeedChannel>, options: RefreshOptions) -> Self {
        let channels = if channels.is_empty() {
            default_channels()
        } else {
            channels
        };
        Self {
            pipeline,
            channels,
            selected: 0,
            options,
            current: Vec::new(),
            bookmarks: BookmarkStore::new(),
        }
    }

    /// Starts a session with the channels, limits and default channel of `config`.
    pub fn from_config(pipeline: Pipeline<P>, config: &Config) -> Self {
        let options = RefreshOptions {
            day_window: config.day_window,
            max_count: config.item_limit as usize,
            translate: config.translate,
        };
        let mut session = Self::new(pipeline, config.channels.clone(), options);
        if let Some(name) = &config.default_channel {
            if session.select_channel(name).is_none() {
                tracing::warn!(channel = %name, "Default channel not found, using first channel");
            }
        }
        session
    }

    pub fn channels(&self) -> &[FeedChannel] {
        &self.channels
    }

    pub fn channel(&self) -> &FeedChannel {
        &self.channels[self.selected]
    }

    /// Selects a channel by name or 1-based number. The result list is kept
    /// until the next refresh.
    pub fn select_channel(&mut self, key: &str) -> Option<&FeedChannel> {
        let found = find_channel(&self.channels, key)?;
        let idx = self.channels.iter().position(|c| c == found)?;
        self.selected = idx;
        Some(&self.channels[idx])
    }

    pub fn options(&self) -> &RefreshOptions {
        &self.options
    }

    pub fn set_translate(&mut self, enabled: bool) {
        self.options.translate = enabled;
    }

    /// Sets the entry limit, clamped to the configurable range. Returns the value applied.
    pub fn set_item_limit(&mut self, limit: u32) -> u32 {
        let limit = clamp_logged("item_limit", limit, &ITEM_LIMIT_RANGE);
        self.options.max_count = limit as usize;
        limit
    }

    /// Sets the day window, clamped to the configurable range. Returns the value applied.
    pub fn set_day_window(&mut self, days: u32) -> u32 {
        let days = clamp_logged("day_window", days, &DAY_WINDOW_RANGE);
        self.options.day_window = days;
        days
    }

    /// Refreshes the selected channel and replaces the result list.
    ///
    /// # Errors
    ///
    /// A [`FetchError`] leaves the result list untouched.
    pub async fn refresh(&mut self) -> Result<RefreshStatus, FetchError> {
        let outcome = self
            .pipeline
            .refresh(&self.channels[self.selected], &self.options)
            .await?;

        Ok(self.apply(outcome))
    }

    fn apply(&mut self, outcome: RefreshOutcome) -> RefreshStatus {
        match outcome {
            RefreshOutcome::Entries(entries) => {
                self.current = entries;
                RefreshStatus::Updated(self.current.len())
            }
            RefreshOutcome::NothingNew => {
                self.current.clear();
                RefreshStatus::NothingNew
            }
        }
    }

    pub fn current(&self) -> &[NewsEntry] {
        &self.current
    }

    /// Bookmarks entry `index` of the current result list.
    pub fn save(&mut self, index: usize) -> Option<(AddOutcome, &NewsEntry)> {
        let entry = self.current.get(index)?.clone();
        let outcome = self.bookmarks.add(entry);
        Some((outcome, &self.current[index]))
    }

    pub fn bookmarks(&self) -> &BookmarkStore {
        &self.bookmarks
    }

    pub fn bookmarks_mut(&mut self) -> &mut BookmarkStore {
        &mut self.bookmarks
    }
}
