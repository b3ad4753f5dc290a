//! Fashion-news reader: aggregates RSS channels, keeps recent entries,
//! cleans and translates their headlines, and holds per-session bookmarks.

pub mod bookmarks;
pub mod config;
pub mod feed;
pub mod pipeline;
pub mod session;
pub mod translate;
pub mod ui;
pub mod util;
