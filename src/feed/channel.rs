use serde::Deserialize;

/// A named feed the user can pick from.
///
/// Channels are fixed configuration: either the built-in set below or the
/// `[[channels]]` table of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedChannel {
    pub name: String,
    pub feed_url: String,
}

impl FeedChannel {
    pub fn new(name: impl Into<String>, feed_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            feed_url: feed_url.into(),
        }
    }
}

/// Built-in channels: Google News site searches scoped to fashion sections.
pub fn default_channels() -> Vec<FeedChannel> {
    vec![
        FeedChannel::new(
            "Hypebeast KR",
            "https://news.google.com/rss/search?q=site:hypebeast.kr/fashion&hl=ko&gl=KR&ceid=KR:ko",
        ),
        FeedChannel::new(
            "Dazed Digital",
            "https://news.google.com/rss/search?q=site:dazeddigital.com/fashion&hl=en-US&gl=US&ceid=US:en",
        ),
        FeedChannel::new(
            "Vogue US",
            "https://news.google.com/rss/search?q=site:vogue.com/fashion&hl=en-US&gl=US&ceid=US:en",
        ),
        FeedChannel::new(
            "Highsnobiety",
            "https://news.google.com/rss/search?q=site:highsnobiety.com&hl=en-US&gl=US&ceid=US:en",
        ),
    ]
}

/// Looks a channel up by case-insensitive name or by 1-based position.
pub fn find_channel<'a>(channels: &'a [FeedChannel], key: &str) -> Option<&'a FeedChannel> {
    let key = key.trim();
    if let Ok(n) = key.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| channels.get(i));
    }
    channels.iter().find(|c| c.name.eq_ignore_ascii_case(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_channels_have_valid_urls() {
        let channels = default_channels();
        assert_eq!(channels.len(), 4);
        for channel in &channels {
            assert!(url::Url::parse(&channel.feed_url).is_ok(), "{}", channel.name);
        }
    }

    #[test]
    fn test_find_channel_by_name_ignores_case() {
        let channels = default_channels();
        let found = find_channel(&channels, "vogue us").unwrap();
        assert_eq!(found.name, "Vogue US");
    }

    #[test]
    fn test_find_channel_by_position() {
        let channels = default_channels();
        assert_eq!(find_channel(&channels, "1").unwrap().name, "Hypebeast KR");
        assert_eq!(find_channel(&channels, "4").unwrap().name, "Highsnobiety");
        assert!(find_channel(&channels, "0").is_none());
        assert!(find_channel(&channels, "5").is_none());
    }

    #[test]
    fn test_find_channel_unknown() {
        assert!(find_channel(&default_channels(), "Elle").is_none());
    }
}
