//! Minecraft `§` formatting code removal.

use std::borrow::Cow;

/// The section sign introducing an inline color / format code.
pub const SECTION_MARKER: char = '§';

/// `true` for the characters that may follow [`SECTION_MARKER`]:
/// colors `0-9a-f`, formats `k-o`, and reset `r` (any case).
fn is_format_char(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), '0'..='9' | 'a'..='f' | 'k'..='o' | 'r')
}

/// Strip every `§` + format-character pair from `text`.
///
/// A `§` not followed by a format character is kept. Pairs exposed by a
/// removal (`§§aa`) are removed as well, so the output never contains a
/// pair and the function is idempotent. Text without any pair is
/// returned borrowed.
pub fn sanitize(text: &str) -> Cow<'_, str> {
    if !has_format_code(text) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if is_format_char(c) && out.ends_with(SECTION_MARKER) {
            out.pop();
            continue;
        }
        out.push(c);
    }
    Cow::Owned(out)
}

/// [`sanitize`] over an optional value; `None` stays `None`.
pub fn sanitize_opt(text: Option<&str>) -> Option<Cow<'_, str>> {
    text.map(sanitize)
}

fn has_format_code(text: &str) -> bool {
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == SECTION_MARKER && chars.peek().is_some_and(|&next| is_format_char(next)) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_color_and_format_codes() {
        assert_eq!(sanitize("§cRed§r text"), "Red text");
        assert_eq!(sanitize("§l§nBold§R"), "Bold");
        assert_eq!(sanitize("§AUpper§F"), "Upper");
    }

    #[test]
    fn keeps_unrelated_markers() {
        assert_eq!(sanitize("§zkeep"), "§zkeep");
        assert_eq!(sanitize("tail§"), "tail§");
        assert_eq!(sanitize("§§a"), "§");
        assert_eq!(sanitize("§§aa"), "");
    }

    #[test]
    fn plain_text_is_borrowed() {
        let text = "Steve_2007";
        assert!(matches!(sanitize(text), Cow::Borrowed(t) if t == text));
        assert!(matches!(sanitize(""), Cow::Borrowed("")));
    }

    #[test]
    fn idempotent() {
        for sample in ["§§aa", "§6Gold §lStar", "a§", "§x§4", "§§§cc", "плюс§eжёлтый"] {
            let once = sanitize(sample).into_owned();
            assert_eq!(sanitize(&once), once, "sample {sample:?}");
        }
    }

    #[test]
    fn option_passthrough() {
        assert_eq!(sanitize_opt(None), None);
        assert_eq!(sanitize_opt(Some("")).as_deref(), Some(""));
        assert_eq!(sanitize_opt(Some("§9Blue")).as_deref(), Some("Blue"));
    }
}
