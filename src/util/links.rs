use url::Url;

/// Path marker of paginated listing pages that some feeds mix in with articles.
const LISTING_MARKER: &str = "/page/";

/// Parses an article link, accepting only absolute `http`/`https` URLs.
///
/// Surrounding whitespace is ignored; feeds frequently wrap the link text in
/// newlines and indentation.
pub fn article_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Some(url),
        _ => None,
    }
}

/// Returns true if the link points at a paginated listing instead of an article.
pub fn is_listing_link(link: &str) -> bool {
    link.contains(LISTING_MARKER)
}
