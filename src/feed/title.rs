/// Separator between a headline and the trailing site name in aggregated titles.
const SITE_SEPARATOR: &str = " - ";

/// Drops a trailing site-name suffix such as `"Headline - Vogue"`.
///
/// Only the text after the last separator is removed, so headlines that
/// themselves contain " - " keep everything but the final segment.
///
/// ```
/// use odm::feed::normalize_title;
///
/// assert_eq!(normalize_title("Headline - Source"), "Headline");
/// assert_eq!(normalize_title("A - B - C"), "A - B");
/// assert_eq!(normalize_title("No separator"), "No separator");
/// ```
pub fn normalize_title(title: &str) -> String {
    match title.rsplit_once(SITE_SEPARATOR) {
        Some((headline, _site)) => headline.to_string(),
        None => title.to_string(),
    }
}
