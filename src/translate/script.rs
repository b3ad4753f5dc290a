use std::ops::RangeInclusive;

/// Hangul compatibility jamo and precomposed syllables.
const HANGUL: &[RangeInclusive<char>] = &['\u{3131}'..='\u{3163}', '\u{AC00}'..='\u{D7A3}'];
/// Hiragana and katakana. Kanji are left out so Chinese titles are not
/// mistaken for Japanese ones.
const KANA: &[RangeInclusive<char>] = &['\u{3040}'..='\u{309F}', '\u{30A0}'..='\u{30FF}'];
/// CJK unified ideographs.
const HAN: &[RangeInclusive<char>] = &['\u{4E00}'..='\u{9FFF}'];
const CYRILLIC: &[RangeInclusive<char>] = &['\u{0400}'..='\u{04FF}'];

/// Language code sent to the translation provider, plus the character ranges
/// of the script that language is written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLanguage {
    code: String,
    script: &'static [RangeInclusive<char>],
}

impl TargetLanguage {
    /// Builds a target from a provider language code (`ko`, `ja`, `zh-CN`, ...).
    ///
    /// Codes without a known script get no ranges, so every title counts as
    /// untranslated.
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        let primary = code
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let script = match primary.as_str() {
            "ko" => HANGUL,
            "ja" => KANA,
            "zh" => HAN,
            "ru" | "uk" | "bg" | "sr" => CYRILLIC,
            _ => &[],
        };
        Self { code, script }
    }

    pub fn korean() -> Self {
        Self::new("ko")
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// True if `text` has at least one character of the target script.
    pub fn is_written_in(&self, text: &str) -> bool {
        text.chars()
            .any(|c| self.script.iter().any(|range| range.contains(&c)))
    }
}
