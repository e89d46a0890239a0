//! Parsers for provider answers
//!
//! Providers wrap answers in code fences, quotes and chatter. These
//! functions peel that off; they never decide which node an answer means.

use serde::Deserialize;

use flavorgraph_core::limits::MAX_RESPONSE_INGREDIENTS;

/// Answer shape of the JSON-object contract
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JsonAnswer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Remove a surrounding ``` fence (with or without a language tag)
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string on the opening line
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    body.trim_end().trim_end_matches("```").trim()
}

fn trim_quotes(s: &str) -> &str {
    s.trim()
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | '*'))
        .trim()
}

/// Split a pipe-list answer into at most three non-empty items
///
/// Newlines count as separators too, for providers that answer one per line.
pub fn pipe_parts(text: &str) -> Vec<String> {
    strip_code_fence(text)
        .split(|c| c == '|' || c == '\n')
        .map(trim_quotes)
        .filter(|p| !p.is_empty())
        .take(MAX_RESPONSE_INGREDIENTS)
        .map(str::to_string)
        .collect()
}

/// Parse the first `{...}` object in `text`
///
/// Returns `None` when there is no object, it does not parse, or `id` or
/// `name` is blank.
pub fn parse_json_answer(text: &str) -> Option<JsonAnswer> {
    let body = strip_code_fence(text);
    let start = body.find('{')?;
    let end = body.rfind('}')?;
    if end <= start {
        return None;
    }

    let answer: JsonAnswer = match serde_json::from_str(&body[start..=end]) {
        Ok(answer) => answer,
        Err(e) => {
            tracing::debug!("Unparseable JSON answer: {}", e);
            return None;
        }
    };
    if answer.id.trim().is_empty() || answer.name.trim().is_empty() {
        return None;
    }
    Some(answer)
}

/// Extract the chosen id or name from a re-prompt reply
///
/// Accepts a bare token, a quoted or backticked token, or a JSON object
/// with an `id` or `name` field. `NONE` and blank replies yield `None`.
pub fn parse_pick(text: &str) -> Option<String> {
    let body = strip_code_fence(text);

    if body.starts_with('{') {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        return ["id", "name"]
            .iter()
            .filter_map(|key| value.get(*key).and_then(|v| v.as_str()))
            .map(trim_quotes)
            .find(|s| !s.is_empty())
            .map(str::to_string);
    }

    let line = body.lines().map(str::trim).find(|l| !l.is_empty())?;
    let line = line.strip_prefix("- ").unwrap_or(line);
    let pick = trim_quotes(line).trim_end_matches('.');
    let pick = trim_quotes(pick);
    if pick.is_empty() || pick.eq_ignore_ascii_case("none") {
        return None;
    }
    Some(pick.to_string())
}
