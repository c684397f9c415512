//! Literal Decoder
//!
//! Rewrites legacy scripting-literal text (single-quoted strings, `None`,
//! `True`, `False`, `NaN`, backslash escapes) into JSON text.
//!
//! The rewrite is a single left-to-right scan that tracks whether it is
//! inside a quoted run and which quote character opened it. It is a
//! decoder, not a validator: anything it does not recognize is passed
//! through unchanged, so the output is at least as parseable as the input.
//!
//! ## Rules
//!
//! | Position | Input | Output |
//! |----------|-------|--------|
//! | outside a run | `None` / `True` / `False` | `null` / `true` / `false` |
//! | outside a run | `nan` (any casing) | `null` |
//! | outside a run | `'` or `"` | `"` (opens a run) |
//! | inside a run | `\'` | `'` |
//! | inside a run | `\"` / `\\` / `\n` / `\r` / `\t` | unchanged |
//! | inside a run | other `\x` | unchanged (backslash kept) |
//! | inside a run | raw `"` | `\"` |
//! | inside a run | raw control character | JSON escape |
//! | inside a run | the opening quote | `"` (closes the run) |
//!
//! Keywords are only rewritten when bounded by non-identifier characters
//! (or the start/end of the text). Canonical JSON is a fixed point.

/// Keyword tokens rewritten outside quoted runs. Matched case-sensitively.
const KEYWORDS: [(&str, &str); 3] = [("None", "null"), ("True", "true"), ("False", "false")];

/// Not-a-number token. Matched case-insensitively.
const NAN_TOKEN: &str = "nan";

/// Convert legacy scripting-literal text into JSON text.
///
/// Total: never fails and never panics. Calling it twice yields the same
/// result as calling it once.
///
/// ```
/// use juror_core::decode_literal;
///
/// assert_eq!(
///     decode_literal("{'a': None, 'ok': True}"),
///     r#"{"a": null, "ok": true}"#
/// );
/// ```
pub fn decode_literal(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    let mut active_quote: Option<char> = None;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        match active_quote {
            Some(quote) => {
                if c == '\\' {
                    match chars.get(i + 1) {
                        Some(&next) => {
                            push_escape(&mut out, next);
                            i += 2;
                            continue;
                        }
                        None => out.push('\\'),
                    }
                } else if c == quote {
                    out.push('"');
                    active_quote = None;
                } else if c == '"' {
                    out.push_str("\\\"");
                } else if (c as u32) < 0x20 {
                    push_control(&mut out, c);
                } else {
                    out.push(c);
                }
            }
            None => {
                if c == '\'' || c == '"' {
                    out.push('"');
                    active_quote = Some(c);
                } else if let Some((len, replacement)) = keyword_at(&chars, i) {
                    out.push_str(replacement);
                    i += len;
                    continue;
                } else {
                    out.push(c);
                }
            }
        }

        i += 1;
    }

    out
}

/// Emit the JSON form of the escape sequence `\` + `next`.
///
/// `\\`, `\"`, `\n`, `\r` and `\t` are already canonical.
fn push_escape(out: &mut String, next: char) {
    // `\'` is not valid JSON; every other escape keeps its backslash.
    if next == '\'' {
        out.push('\'');
    } else {
        out.push('\\');
        out.push(next);
    }
}

fn push_control(out: &mut String, c: char) {
    match c {
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        _ => out.push_str(&format!("\\u{:04x}", c as u32)),
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Match a keyword token starting at `start`.
///
/// Returns the token length in chars and its replacement.
fn keyword_at(chars: &[char], start: usize) -> Option<(usize, &'static str)> {
    if start > 0 && is_identifier_char(chars[start - 1]) {
        return None;
    }

    let bounded_after = |len: usize| {
        chars
            .get(start + len)
            .map_or(true, |&next| !is_identifier_char(next))
    };

    for (keyword, replacement) in KEYWORDS {
        let len = keyword.chars().count();
        if matches_at(chars, start, keyword, false) && bounded_after(len) {
            return Some((len, replacement));
        }
    }

    let len = NAN_TOKEN.len();
    if matches_at(chars, start, NAN_TOKEN, true) && bounded_after(len) {
        return Some((len, "null"));
    }

    None
}

fn matches_at(chars: &[char], start: usize, token: &str, ignore_case: bool) -> bool {
    let mut idx = start;
    for expected in token.chars() {
        let Some(&actual) = chars.get(idx) else {
            return false;
        };
        let equal = if ignore_case {
            actual.eq_ignore_ascii_case(&expected)
        } else {
            actual == expected
        };
        if !equal {
            return false;
        }
        idx += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_keywords_rewritten() {
        assert_eq!(decode_literal("[None, True, False]"), "[null, true, false]");
    }

    #[test]
    fn test_keywords_require_boundaries() {
        assert_eq!(decode_literal("Nonesuch"), "Nonesuch");
        assert_eq!(decode_literal("isTrue"), "isTrue");
        assert_eq!(decode_literal("False_"), "False_");
    }

    #[test]
    fn test_nan_any_casing() {
        assert_eq!(decode_literal("[nan, NaN, NAN]"), "[null, null, null]");
        assert_eq!(decode_literal("banana"), "banana");
        assert_eq!(decode_literal("nanometer"), "nanometer");
    }

    #[test]
    fn test_keywords_untouched_inside_quotes() {
        assert_eq!(decode_literal("'None'"), r#""None""#);
        assert_eq!(decode_literal(r#""NaN""#), r#""NaN""#);
    }

    #[test]
    fn test_single_quotes_become_double() {
        assert_eq!(decode_literal("{'key': 'value'}"), r#"{"key": "value"}"#);
    }

    #[test]
    fn test_escaped_apostrophe_unescaped() {
        assert_eq!(decode_literal(r"'it\'s'"), r#""it's""#);
        assert_eq!(decode_literal(r#""q\'s""#), r#""q's""#);
    }

    #[test]
    fn test_double_quote_inside_single_run_escaped() {
        assert_eq!(decode_literal(r#"'say "hi"'"#), r#""say \"hi\"""#);
    }

    #[test]
    fn test_escaped_double_quote_stays_escaped() {
        assert_eq!(decode_literal(r#""a\"b""#), r#""a\"b""#);
        assert_eq!(decode_literal(r#"'a\"b'"#), r#""a\"b""#);
    }

    #[test]
    fn test_canonical_escapes_pass_through() {
        assert_eq!(decode_literal(r"'a\nb\tc\rd\\e'"), r#""a\nb\tc\rd\\e""#);
    }

    #[test]
    fn test_unknown_escape_keeps_backslash() {
        assert_eq!(decode_literal(r"'\x41'"), r#""\x41""#);
    }

    #[test]
    fn test_raw_control_characters_escaped() {
        assert_eq!(decode_literal("'a\nb'"), r#""a\nb""#);
        assert_eq!(decode_literal("'\u{1}'"), r#""\u0001""#);
    }

    #[test]
    fn test_apostrophe_inside_double_run() {
        assert_eq!(decode_literal(r#"{"text": "don't"}"#), r#"{"text": "don't"}"#);
    }

    #[test]
    fn test_unterminated_run_passes_through() {
        assert_eq!(decode_literal("{'a': 'open"), r#"{"a": "open"#);
        assert_eq!(decode_literal(r"'trailing\"), r#""trailing\"#);
    }

    #[test]
    fn test_canonical_json_is_fixed_point() {
        let json = r#"{"a": [1, 2.5, null, true], "b": {"c": "x\"y\\z"}}"#;
        assert_eq!(decode_literal(json), json);
    }

    #[test]
    fn test_output_parses() {
        let decoded = decode_literal(r#"{'a': None, 'b': True, 'c': 1.5, 'd': "q\'s"}"#);
        let value: serde_json::Value = serde_json::from_str(&decoded).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"a": null, "b": true, "c": 1.5, "d": "q's"})
        );
    }

    proptest! {
        #[test]
        fn prop_idempotent(text in ".{0,64}") {
            let once = decode_literal(&text);
            prop_assert_eq!(decode_literal(&once), once);
        }

        #[test]
        fn prop_idempotent_on_literal_alphabet(text in "[ '\"\\\\nNoeTrufalsN{}:,\\[\\]a-c0-9\n]{0,48}") {
            let once = decode_literal(&text);
            prop_assert_eq!(decode_literal(&once), once);
        }
    }
}
