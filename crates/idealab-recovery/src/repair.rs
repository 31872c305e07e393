//! Text-level repairs applied before parsing: fence stripping, control
//! character escaping, and braced-span extraction.

const FENCE: &str = "```";

/// Strip a surrounding fenced code block, with or without a language tag.
///
/// The text is trimmed first. If it does not start with a fence it is
/// returned trimmed and otherwise unchanged.
pub fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix(FENCE) else {
        return trimmed;
    };

    let tag_len = rest
        .find(|c: char| !is_tag_char(c))
        .unwrap_or(rest.len());
    let body = rest[tag_len..].trim_start();

    let body = body.trim_end();
    body.strip_suffix(FENCE).unwrap_or(body).trim()
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.')
}

/// Escape raw control characters (code point < 0x20) that appear inside
/// quoted strings.
///
/// Single left-to-right pass. A `"` toggles the in-string state unless it
/// follows an unconsumed backslash; a backslash marks exactly the next
/// character as escaped. Characters outside strings pass through untouched.
pub fn escape_control_chars(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut in_string = false;
    let mut escaped = false;

    for c in text.chars() {
        if escaped {
            out.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' => {
                escaped = true;
                out.push(c);
            }
            '"' => {
                in_string = !in_string;
                out.push(c);
            }
            c if in_string && (c as u32) < 0x20 => push_escape(&mut out, c),
            c => out.push(c),
        }
    }
    out
}

fn push_escape(out: &mut String, c: char) {
    match c {
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\u{08}' => out.push_str("\\b"),
        '\u{0C}' => out.push_str("\\f"),
        other => out.push_str(&format!("\\u{:04x}", other as u32)),
    }
}

/// The span from the first `{` to the last `}`, inclusive.
pub fn extract_braced(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- strip_fences --------------------------------------------------------

    #[test]
    fn strip_json_fence() {
        assert_eq!(strip_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn strip_bare_fence() {
        assert_eq!(strip_fences("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn strip_fence_without_closing_marker() {
        assert_eq!(strip_fences("```json\n{\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn strip_fence_on_one_line() {
        assert_eq!(strip_fences("```{\"a\": 1}```"), "{\"a\": 1}");
    }

    #[test]
    fn unfenced_text_is_only_trimmed() {
        assert_eq!(strip_fences("  {\"a\": 1}\n"), "{\"a\": 1}");
        assert_eq!(strip_fences("text ```json```"), "text ```json```");
    }

    // -- escape_control_chars ------------------------------------------------

    #[test]
    fn escapes_named_controls_inside_strings() {
        let raw = "{\"t\": \"a\nb\rc\td\u{08}e\u{0C}f\"}";
        assert_eq!(
            escape_control_chars(raw),
            "{\"t\": \"a\\nb\\rc\\td\\be\\ff\"}"
        );
    }

    #[test]
    fn escapes_other_controls_as_unicode() {
        assert_eq!(escape_control_chars("\"\u{01}\u{1f}\""), "\"\\u0001\\u001f\"");
    }

    #[test]
    fn leaves_whitespace_between_tokens_alone() {
        let raw = "{\n\t\"a\": 1,\n\t\"b\": \"x\"\n}";
        assert_eq!(escape_control_chars(raw), raw);
    }

    #[test]
    fn escaped_quote_does_not_end_string() {
        let raw = "{\"q\": \"say \\\"hi\\\"\nthere\"}";
        assert_eq!(
            escape_control_chars(raw),
            "{\"q\": \"say \\\"hi\\\"\\nthere\"}"
        );
    }

    #[test]
    fn existing_escapes_are_preserved() {
        let raw = "{\"p\": \"C:\\\\dir\\n\"}";
        assert_eq!(escape_control_chars(raw), raw);
    }

    #[test]
    fn multibyte_text_passes_through() {
        let raw = "{\"tab\": \"💰 Salary\nCheck\"}";
        assert_eq!(escape_control_chars(raw), "{\"tab\": \"💰 Salary\\nCheck\"}");
    }

    // -- extract_braced ------------------------------------------------------

    #[test]
    fn extract_first_to_last_brace() {
        assert_eq!(
            extract_braced("note {\"a\": {\"b\": 1}} end"),
            Some("{\"a\": {\"b\": 1}}")
        );
    }

    #[test]
    fn extract_requires_both_braces_in_order() {
        assert_eq!(extract_braced("no object"), None);
        assert_eq!(extract_braced("} backwards {"), None);
    }
}
