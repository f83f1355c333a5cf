// JSON extraction from model output

use serde_json::Value;

/// Pulls a single JSON value out of raw model text.
///
/// Tries a direct parse first, then the substring from the first `{` to the
/// last `}`, then the substring from the first `[` to the last `]`. Models
/// occasionally wrap the payload in prose or code fences; the substring
/// passes recover from that.
pub fn extract_json(text: &str) -> Option<Value> {
    let text = text.trim();

    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Some(value);
    }

    delimited_json(text, '{', '}').or_else(|| delimited_json(text, '[', ']'))
}

fn delimited_json(text: &str, open: char, close: char) -> Option<Value> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;

    if end <= start {
        return None;
    }

    serde_json::from_str(&text[start..=end]).ok()
}
