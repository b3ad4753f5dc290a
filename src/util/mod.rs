//! Small helpers shared by the pipeline and the terminal front-end.
//!
//! - **Links**: absolute http(s) URL checks for article links
//! - **Text**: control-sequence stripping and display-width truncation for
//!   remote titles printed to a terminal

mod links;
mod text;

pub use links::{article_url, is_listing_link};
pub use text::{display_width, strip_control_chars, truncate_to_width};
