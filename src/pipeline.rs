//! The refresh pipeline: fetch, parse, rank, then normalize and translate
//! each surviving entry on a bounded set of concurrent requests.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};

use crate::feed::{
    fetch_feed, filter_and_rank, normalize_title, parse_items, FeedChannel, FetchError, NewsEntry,
};
use crate::translate::{TranslationProvider, Translator};

/// Upper bound on per-entry translation requests in flight at once.
pub const MAX_IN_FLIGHT: usize = 10;

/// Per-refresh knobs chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOptions {
    /// Maximum entry age in whole days.
    pub day_window: u32,
    /// Maximum number of entries returned.
    pub max_count: usize,
    pub translate: bool,
}

/// Result of a successful refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Entries ranked newest first, titles normalized and possibly translated.
    Entries(Vec<NewsEntry>),
    /// The feed was reachable but nothing survived filtering.
    NothingNew,
}

/// Normalizes and optionally translates every entry.
///
/// At most [`MAX_IN_FLIGHT`] entries are processed at once. The output keeps
/// input positions: `result[i]` is derived from `entries[i]` alone. A failed
/// translation leaves that entry with its normalized, untranslated title.
pub async fn process_all<P: TranslationProvider>(
    entries: Vec<NewsEntry>,
    translator: Option<&Translator<P>>,
) -> Vec<NewsEntry> {
    stream::iter(entries)
        .map(|entry| process_one(entry, translator))
        .buffered(MAX_IN_FLIGHT)
        .collect()
        .await
}

async fn process_one<P: TranslationProvider>(
    mut entry: NewsEntry,
    translator: Option<&Translator<P>>,
) -> NewsEntry {
    let title = normalize_title(&entry.title);

    entry.title = match translator {
        None => title,
        Some(translator) => match translator.translate(&title).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::debug!(title = %title, error = %e, "Translation failed, keeping original title");
                title
            }
        },
    };
    entry
}

/// Everything a refresh needs besides the user's options.
pub struct Pipeline<P> {
    client: reqwest::Client,
    user_agent: String,
    translator: Translator<P>,
}

impl<P: TranslationProvider> Pipeline<P> {
    pub fn new(client: reqwest::Client, user_agent: impl Into<String>, translator: Translator<P>) -> Self {
        Self {
            client,
            user_agent: user_agent.into(),
            translator,
        }
    }

    /// Runs a full refresh of `channel` against the current clock.
    ///
    /// # Errors
    ///
    /// Only transport failures surface, as [`FetchError`]. Malformed items and
    /// failed translations are absorbed per entry.
    pub async fn refresh(
        &self,
        channel: &FeedChannel,
        options: &RefreshOptions,
    ) -> Result<RefreshOutcome, FetchError> {
        self.refresh_at(channel, options, Utc::now()).await
    }

    /// [`Pipeline::refresh`] with an explicit "now" for the recency filter.
    pub async fn refresh_at(
        &self,
        channel: &FeedChannel,
        options: &RefreshOptions,
        now: DateTime<Utc>,
    ) -> Result<RefreshOutcome, FetchError> {
        let markup = fetch_feed(&self.client, &channel.feed_url, &self.user_agent).await?;

        let items = parse_items(&markup);
        let parsed = items.len();
        let ranked = filter_and_rank(items, i64::from(options.day_window), options.max_count, now);

        if ranked.is_empty() {
            tracing::info!(channel = %channel.name, parsed = parsed, "No recent entries");
            return Ok(RefreshOutcome::NothingNew);
        }

        let translator = options.translate.then_some(&self.translator);
        let entries = process_all(ranked, translator).await;

        tracing::info!(
            channel = %channel.name,
            parsed = parsed,
            shown = entries.len(),
            translated = options.translate,
            "Refreshed channel"
        );
        Ok(RefreshOutcome::Entries(entries))
    }
}
