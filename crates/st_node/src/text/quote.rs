use std::borrow::Cow;

/// Characters that force a scalar or key into quotes.
pub const SPECIAL_CHARS: &[char] = &[
    '"', ':', '=', ',', '+', '?', '`', '!', '@', '#', '$', '^', '&', '*', '{', '}', '[', ']',
    '\\',
];

fn needs_quotes(text: &str) -> bool {
    text.is_empty()
        || text == "null"
        || text.starts_with(' ')
        || text.ends_with(' ')
        || text
            .chars()
            .any(|c| SPECIAL_CHARS.contains(&c) || matches!(c, '\n' | '\r' | '\t' | '\u{8}'))
}

/// Quotes `text` when writing it bare would not read back as the same text.
///
/// Quoting happens when the text is empty, is the literal `null`, starts or
/// ends with a space, or contains a [special character](SPECIAL_CHARS) or a
/// line-breaking control character. Interior spaces alone never quote.
///
/// ```
/// use st_node::text::quote;
///
/// assert_eq!(quote("plain"), "plain");
/// assert_eq!(quote("a b"), "a b");
/// assert_eq!(quote(" padded"), "\" padded\"");
/// assert_eq!(quote("null"), "\"null\"");
/// assert_eq!(quote("say \"hi\""), r#""say \"hi\"""#);
/// ```
pub fn quote(text: &str) -> Cow<'_, str> {
    if !needs_quotes(text) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '"' => out.push_str("\\\""),
            c => out.push(c),
        }
    }
    out.push('"');
    Cow::Owned(out)
}

/// Reverses [`quote`]: strips one leading and one trailing `"` and undoes the
/// escapes. Unknown escapes are kept verbatim.
///
/// ```
/// use st_node::text::{quote, unquote};
///
/// for s in ["", "null", " x ", "a=b", "tab\there", "\\"] {
///     assert_eq!(unquote(&quote(s)), s);
/// }
/// ```
pub fn unquote(text: &str) -> String {
    let text = text.strip_prefix('"').unwrap_or(text);
    let text = text.strip_suffix('"').unwrap_or(text);

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('b') => out.push('\u{8}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{SPECIAL_CHARS, quote, unquote};

    #[test]
    fn bare_text_is_untouched() {
        assert_eq!(quote("localhost"), "localhost");
        assert_eq!(quote("3.14"), "3.14");
        assert_eq!(quote("two words"), "two words");
        assert_eq!(quote("nullable"), "nullable");
    }

    #[test]
    fn triggers_quote() {
        assert_eq!(quote(""), "\"\"");
        assert_eq!(quote("null"), "\"null\"");
        assert_eq!(quote(" lead"), "\" lead\"");
        assert_eq!(quote("trail "), "\"trail \"");
        assert_eq!(quote("a:b"), "\"a:b\"");
        assert_eq!(quote("line\nbreak"), "\"line\\nbreak\"");
        assert_eq!(quote("back\\slash"), "\"back\\\\slash\"");
    }

    #[test]
    fn quote_is_reversible() {
        let mut samples: Vec<String> = vec![
            String::new(),
            "null".into(),
            "NULL".into(),
            "  both  ".into(),
            "\"".into(),
            "\"\"".into(),
            "\\n is not a newline".into(),
            "tab\tcr\rbs\u{8}nl\n".into(),
            "ünïcödé = ✓".into(),
        ];
        samples.extend(SPECIAL_CHARS.iter().map(|c| c.to_string()));
        samples.push(SPECIAL_CHARS.iter().collect());
        for sample in samples {
            assert_eq!(unquote(&quote(&sample)), sample, "sample {sample:?}");
        }
    }

    #[test]
    fn unquote_keeps_unknown_escapes() {
        assert_eq!(unquote(r#""\q""#), "\\q");
        assert_eq!(unquote("\"dangling\\\""), "dangling\\");
    }
}
