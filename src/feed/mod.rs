//! Feed ingestion: from a channel URL to a ranked list of entries.
//!
//! - [`fetcher`] - single-attempt HTTP download with a browser-like agent
//! - [`parser`] - permissive `<item>` scanner built on `quick-xml`
//! - [`recency`] - date parsing, day-window filtering and ranking
//! - [`title`] - site-name suffix removal
//!
//! # Example
//!
//! ```ignore
//! use odm::feed::{fetch_feed, filter_and_rank, parse_items};
//!
//! let markup = fetch_feed(&client, &channel.feed_url, "Mozilla/5.0").await?;
//! let entries = filter_and_rank(parse_items(&markup), 7, 20, chrono::Utc::now());
//! ```

mod channel;
mod entry;
mod fetcher;
mod parser;
mod recency;
mod title;

pub use channel::{default_channels, find_channel, FeedChannel};
pub use entry::NewsEntry;
pub use fetcher::{fetch_feed, FetchError, DEFAULT_USER_AGENT};
pub use parser::{parse_items, RawItem};
pub use recency::{age_in_days, filter_and_rank, parse_pub_date};
pub use title::normalize_title;
