use chrono::{DateTime, FixedOffset, Utc};

use super::entry::NewsEntry;
use super::parser::RawItem;

const SECONDS_PER_DAY: i64 = 86_400;

/// Parses a feed date: RFC 2822 first (RSS `pubDate`), then RFC 3339
/// (`dc:date` and Atom-style fields).
pub fn parse_pub_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
}

/// Whole days between `published` and `now`, rounded down.
///
/// Future dates give negative ages.
pub fn age_in_days(now: DateTime<Utc>, published: DateTime<FixedOffset>) -> i64 {
    now.signed_duration_since(published.with_timezone(&Utc))
        .num_seconds()
        .div_euclid(SECONDS_PER_DAY)
}

/// Turns parsed items into the ranked result list.
///
/// - Items with a parseable date are kept when their age is at most
///   `day_window` days. A window below zero behaves like zero, which still
///   admits items from the last 24 hours.
/// - Items with a missing or unparseable date are always kept. Their
///   `published_at` is `now` and `display_date` stays empty.
/// - The result is sorted newest first with undated items ahead of every
///   dated one, then cut to `max_count`. Ties keep feed order.
pub fn filter_and_rank(
    items: Vec<RawItem>,
    day_window: i64,
    max_count: usize,
    now: DateTime<Utc>,
) -> Vec<NewsEntry> {
    let window = day_window.max(0);
    let total = items.len();

    let mut entries: Vec<NewsEntry> = items
        .into_iter()
        .filter_map(|item| {
            let parsed = item.pub_date.as_deref().and_then(parse_pub_date);
            match parsed {
                Some(published) => {
                    let age = age_in_days(now, published);
                    if age > window {
                        tracing::trace!(title = %item.title, age_days = age, "Dropping stale item");
                        return None;
                    }
                    Some(NewsEntry {
                        title: item.title,
                        link: item.link,
                        published_at: published,
                        display_date: published.format("%Y-%m-%d").to_string(),
                    })
                }
                None => {
                    if let Some(raw) = &item.pub_date {
                        tracing::debug!(date = %raw, title = %item.title, "Unparseable date, treating item as recent");
                    }
                    Some(NewsEntry {
                        title: item.title,
                        link: item.link,
                        published_at: now.fixed_offset(),
                        display_date: String::new(),
                    })
                }
            }
        })
        .collect();

    // sort_by is stable, so equal keys keep feed order
    entries.sort_by(|a, b| rank_key(b).cmp(&rank_key(a)));
    entries.truncate(max_count);

    tracing::debug!(
        total = total,
        kept = entries.len(),
        window_days = window,
        "Filtered feed items by recency"
    );
    entries
}

fn rank_key(entry: &NewsEntry) -> (bool, DateTime<FixedOffset>) {
    (!entry.has_date(), entry.published_at)
}
