use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Ellipsis appended by [`truncate_to_width`].
const ELLIPSIS: &str = "...";

/// Display width of a string in terminal columns.
///
/// Hangul and other CJK characters count as two columns.
///
/// ```
/// use odm::util::display_width;
///
/// assert_eq!(display_width("Vogue"), 5);
/// assert_eq!(display_width("패션"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cuts `s` to at most `max_width` columns of content, appending "..." when
/// anything was removed.
///
/// The ellipsis is not counted against `max_width`: the value bounds how much
/// of the title is shown, matching how save confirmations quote headlines.
/// Returns `Cow::Borrowed` when the string already fits.
///
/// ```
/// use odm::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Short", 10), "Short");
/// assert_eq!(truncate_to_width("Runway report", 6), "Runway...");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let mut used = 0;
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        end = idx + c.len_utf8();
    }

    Cow::Owned(format!("{}{}", s[..end].trim_end(), ELLIPSIS))
}

/// Removes terminal control characters and ANSI escape sequences from
/// feed-supplied text before it is printed.
///
/// CSI sequences (`ESC [ ... final`) and OSC sequences (`ESC ] ... BEL` or
/// `ESC ] ... ESC \`) are dropped whole. Tab and newline survive; every other
/// C0 control, DEL and C1 control is dropped.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_stripped) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\u{1b}' {
            if !is_stripped(c) {
                out.push(c);
            }
            continue;
        }

        match chars.peek() {
            Some('[') => {
                chars.next();
                for c in chars.by_ref() {
                    if ('\u{40}'..='\u{7e}').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                chars.next();
                while let Some(c) = chars.next() {
                    if c == '\u{07}' {
                        break;
                    }
                    if c == '\u{1b}' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    Cow::Owned(out)
}

fn is_stripped(c: char) -> bool {
    c.is_control() && c != '\t' && c != '\n'
}
