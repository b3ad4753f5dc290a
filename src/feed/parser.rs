use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;

use crate::util::{article_url, is_listing_link};

/// Title fragments that mark pagination or category index items.
const LISTING_TITLE_MARKERS: [&str; 2] = ["Page ", "Category"];

/// One `<item>` pulled out of a feed, before any date handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawItem {
    pub title: String,
    pub link: String,
    /// Publication date exactly as written in the feed, if any.
    pub pub_date: Option<String>,
}

/// Sub-elements of an item that the scanner keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    PubDate,
    /// `dc:date`, `published`, `updated`: used only when `pubDate` is absent
    AltDate,
}

impl Field {
    fn from_tag(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"link" => Some(Field::Link),
            b"pubdate" => Some(Field::PubDate),
            b"dc:date" | b"published" | b"updated" => Some(Field::AltDate),
            _ => None,
        }
    }
}

/// An element whose text is currently being collected.
struct OpenField {
    tag: Vec<u8>,
    field: Field,
    text: String,
}

#[derive(Default)]
struct PendingItem {
    title: Option<String>,
    link: Option<String>,
    pub_date: Option<String>,
    alt_date: Option<String>,
    /// Set after an empty `<link/>`: the URL is expected as the next bare text.
    link_in_sibling: bool,
}

impl PendingItem {
    fn commit(&mut self, field: Field, text: String) {
        let text = text.trim();
        match field {
            Field::Title if !text.is_empty() => {
                self.title.get_or_insert_with(|| text.to_string());
            }
            Field::Link if text.is_empty() => self.link_in_sibling = true,
            Field::Link => {
                self.link.get_or_insert_with(|| text.to_string());
            }
            Field::PubDate if !text.is_empty() => {
                self.pub_date.get_or_insert_with(|| text.to_string());
            }
            Field::AltDate if !text.is_empty() => {
                self.alt_date.get_or_insert_with(|| text.to_string());
            }
            _ => {}
        }
    }

    fn bare_text(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if self.link_in_sibling && self.link.is_none() {
            self.link = Some(text.to_string());
        }
        self.link_in_sibling = false;
    }

    fn finish(self) -> Option<RawItem> {
        let Some(title) = self.title else {
            tracing::debug!("Skipping feed item without a title");
            return None;
        };

        if LISTING_TITLE_MARKERS.iter().any(|m| title.contains(m)) {
            tracing::debug!(title = %title, "Skipping listing item");
            return None;
        }

        let Some(link) = self.link.filter(|l| article_url(l).is_some()) else {
            tracing::debug!(title = %title, "Skipping feed item without a usable link");
            return None;
        };

        if is_listing_link(&link) {
            tracing::debug!(link = %link, "Skipping paginated listing link");
            return None;
        }

        Some(RawItem {
            title,
            link,
            pub_date: self.pub_date.or(self.alt_date),
        })
    }
}

/// Extracts the items of an RSS-like document.
///
/// This is a best-effort scan rather than a validating parse:
///
/// - Tag names are matched case-insensitively (`pubDate` and `pubdate` are
///   the same field) and mismatched end tags are tolerated.
/// - An item without a title or a usable absolute link is skipped; an item
///   without a date is kept with `pub_date: None`.
/// - The link is read from an `href` attribute, the element's text, or the
///   bare text following an empty `<link/>`, in that order of appearance.
/// - Items whose title contains "Page " or "Category", or whose link contains
///   `/page/`, are listing pages and are dropped.
/// - Field text is joined across CDATA sections and inline markup such as
///   `<b>`, then trimmed. A `<link>` left open ends at the next element.
/// - Text that fails entity decoding is kept raw.
/// - A markup error stops the scan; items read up to that point are returned.
pub fn parse_items(markup: &str) -> Vec<RawItem> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().check_end_names = false;

    let mut items = Vec::new();
    let mut current: Option<PendingItem> = None;
    let mut open: Option<OpenField> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let tag = e.name().as_ref().to_ascii_lowercase();
                if tag == b"item" {
                    if current.is_some() {
                        tracing::debug!("Unclosed item replaced by a new one");
                    }
                    current = Some(PendingItem::default());
                    open = None;
                    continue;
                }

                let Some(item) = current.as_mut() else {
                    continue;
                };
                item.link_in_sibling = false;

                let Some(field) = Field::from_tag(&tag) else {
                    // Markup inside a title is kept as text; an unterminated link ends here
                    if open.as_ref().is_some_and(|o| o.field == Field::Link) {
                        if let Some(prev) = open.take() {
                            item.commit(prev.field, prev.text);
                        }
                    }
                    continue;
                };
                // A field opening inside another one closes the first (unterminated HTML-style tags)
                if let Some(prev) = open.take() {
                    item.commit(prev.field, prev.text);
                }
                if field == Field::Link {
                    if let Some(href) = href_attr(&e) {
                        item.link.get_or_insert(href);
                    }
                }
                open = Some(OpenField {
                    tag,
                    field,
                    text: String::new(),
                });
            }
            Ok(Event::Empty(e)) => {
                let Some(item) = current.as_mut() else {
                    continue;
                };
                item.link_in_sibling = false;
                if e.name().as_ref().eq_ignore_ascii_case(b"link") {
                    match href_attr(&e) {
                        Some(href) => {
                            item.link.get_or_insert(href);
                        }
                        None => item.link_in_sibling = true,
                    }
                }
            }
            Ok(Event::Text(e)) => collect_text(&mut current, &mut open, &decode_text(&e)),
            Ok(Event::CData(e)) => {
                collect_text(&mut current, &mut open, &String::from_utf8_lossy(&e))
            }
            Ok(Event::End(e)) => {
                let tag = e.name().as_ref().to_ascii_lowercase();
                if tag == b"item" {
                    flush_item(&mut current, &mut open, &mut items);
                    continue;
                }

                if open.as_ref().is_some_and(|o| o.tag == tag) {
                    if let (Some(item), Some(done)) = (current.as_mut(), open.take()) {
                        item.commit(done.field, done.text);
                    }
                }
            }
            Ok(Event::Eof) => {
                // Truncated document: keep the item that was still open
                flush_item(&mut current, &mut open, &mut items);
                break;
            }
            Err(e) => {
                flush_item(&mut current, &mut open, &mut items);
                tracing::warn!(
                    error = %e,
                    position = reader.buffer_position(),
                    kept = items.len(),
                    "Feed markup error, keeping items parsed so far"
                );
                break;
            }
            _ => {}
        }
    }

    items
}

fn flush_item(
    current: &mut Option<PendingItem>,
    open: &mut Option<OpenField>,
    items: &mut Vec<RawItem>,
) {
    if let Some(mut item) = current.take() {
        if let Some(prev) = open.take() {
            item.commit(prev.field, prev.text);
        }
        items.extend(item.finish());
    }
}

fn collect_text(current: &mut Option<PendingItem>, open: &mut Option<OpenField>, text: &str) {
    match (current.as_mut(), open.as_mut()) {
        (Some(_), Some(field)) => field.text.push_str(text),
        (Some(item), None) => item.bare_text(text),
        _ => {}
    }
}

fn decode_text(e: &BytesText<'_>) -> String {
    match e.unescape() {
        Ok(text) => text.into_owned(),
        Err(_) => String::from_utf8_lossy(e).into_owned(),
    }
}

fn href_attr(e: &BytesStart<'_>) -> Option<String> {
    e.html_attributes()
        .flatten()
        .find(|a| a.key.as_ref().eq_ignore_ascii_case(b"href"))
        .and_then(|a| a.unescape_value().ok().map(|v| v.trim().to_string()))
        .filter(|v| !v.is_empty())
}
