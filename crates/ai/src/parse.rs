//! Turning free-form provider output into candidate recommendation objects.
//!
//! Pipeline: sanitize → extract the outermost `[...]` → strict parse → (on
//! failure) one repair pass and a single retry → shape coercion. Anything that
//! still fails is a [`ParseError`] and the caller falls back to the heuristic.
//!
//! The repair pass is a fixed, ordered list of text transforms. It is not a
//! parser and must not grow into one.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value as JsonValue;

use crate::result::ParseError;

// `icon: ⚡,` → `icon: "⚡",`
static BARE_ICON_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([{,]\s*["']?icon["']?\s*:\s*)([^\s"'{\[,}\]][^,}\]]*?)(\s*[,}\]])"#)
        .expect("bare icon pattern is valid")
});

// `{title: ...` → `{"title": ...`
static BARE_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([{,]\s*)([A-Za-z_][A-Za-z0-9_]*)(\s*:)"#).expect("bare key pattern is valid")
});

// `: high,` → `: "high",`
static BARE_WORD_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(:\s*)([A-Za-z_][A-Za-z0-9_\-]*)(\s*[,}\]])"#).expect("bare word pattern is valid")
});

/// Parse raw provider output into the list of candidate objects.
pub fn parse_recommendations(raw: &str) -> Result<Vec<JsonValue>, ParseError> {
    let cleaned = sanitize(raw);
    let candidate = extract_array(&cleaned).ok_or(ParseError::NoJsonArray)?;
    let value = parse_with_repair(candidate)?;
    coerce_shape(value)
}

/// Drop control characters and U+FFFD replacement characters.
pub fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_control() && *c != '\u{FFFD}')
        .collect()
}

/// Greedy extraction: from the first `[` to the last `]`.
pub fn extract_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (end > start).then_some(&text[start..=end])
}

/// Strict parse, then exactly one repair-and-retry.
pub fn parse_with_repair(candidate: &str) -> Result<JsonValue, ParseError> {
    match serde_json::from_str(candidate) {
        Ok(v) => Ok(v),
        Err(first) => {
            tracing::debug!(error = %first, "strict parse failed; attempting repair");
            let repaired = repair(candidate);
            serde_json::from_str(&repaired).map_err(|e| ParseError::Malformed(e.to_string()))
        }
    }
}

/// Best-effort repair of almost-JSON. Order matters.
pub fn repair(text: &str) -> String {
    let text = BARE_ICON_VALUE.replace_all(text, "${1}\"${2}\"${3}");
    let text = map_outside_strings(&text, |segment| {
        BARE_KEY.replace_all(segment, "${1}\"${2}\"${3}").into_owned()
    });
    let text = normalize_single_quotes(&text);
    map_outside_strings(&text, |segment| {
        BARE_WORD_VALUE
            .replace_all(segment, |caps: &Captures<'_>| match &caps[2] {
                "true" | "false" | "null" => caps[0].to_string(),
                word => format!("{}\"{}\"{}", &caps[1], word, &caps[3]),
            })
            .into_owned()
    })
}

/// Accept an array as is, unwrap `{ "recommendations": [...] }`, wrap any
/// other object. Empty arrays and scalars are rejected.
pub fn coerce_shape(value: JsonValue) -> Result<Vec<JsonValue>, ParseError> {
    let items = match value {
        JsonValue::Array(items) => items,
        JsonValue::Object(mut map) => match map.remove("recommendations") {
            Some(JsonValue::Array(items)) => items,
            Some(other) => {
                map.insert("recommendations".to_string(), other);
                vec![JsonValue::Object(map)]
            }
            None => vec![JsonValue::Object(map)],
        },
        other => {
            return Err(ParseError::UnexpectedShape(format!(
                "expected an array or object, got {}",
                kind(&other)
            )));
        }
    };

    if items.is_empty() {
        return Err(ParseError::UnexpectedShape("empty recommendation list".to_string()));
    }
    Ok(items)
}

fn kind(v: &JsonValue) -> &'static str {
    match v {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Apply `f` to every stretch of `text` that is outside a quoted string.
///
/// Both `"` and `'` open a string, closed by the same character, so the key
/// pass cannot reach into single-quoted values before they are normalized.
fn map_outside_strings(text: &str, f: impl Fn(&str) -> String) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut segment_start = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                    out.push_str(&text[segment_start..=i]);
                    segment_start = i + 1;
                }
            }
            None if c == '"' || c == '\'' => {
                out.push_str(&f(&text[segment_start..i]));
                quote = Some(c);
                segment_start = i;
            }
            None => {}
        }
    }

    if quote.is_some() {
        out.push_str(&text[segment_start..]);
    } else {
        out.push_str(&f(&text[segment_start..]));
    }
    out
}

/// Rewrite `'single'` strings as `"double"` ones, leaving apostrophes inside
/// double-quoted strings alone.
fn normalize_single_quotes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_double = false;
    let mut in_single = false;
    let mut escaped = false;

    for c in text.chars() {
        if escaped {
            // `\'` is not a JSON escape.
            if in_single && c == '\'' {
                out.pop();
            }
            out.push(c);
            escaped = false;
            continue;
        }

        match c {
            '\\' if in_double || in_single => {
                out.push(c);
                escaped = true;
            }
            '"' if in_single => out.push_str("\\\""),
            '"' => {
                in_double = !in_double;
                out.push(c);
            }
            '\'' if in_double => out.push(c),
            '\'' => {
                in_single = !in_single;
                out.push('"');
            }
            _ => out.push(c),
        }
    }
    out
}
