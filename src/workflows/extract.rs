use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

/// Greedy span from the first `{` to the last `}`.
static OBJECT_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").expect("static pattern compiles"));

/// Model text that did not contain a parseable JSON object, unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawText(pub String);

/// Best-effort extraction of a JSON object from free-form model output.
///
/// Takes the widest `{...}` span and parses it. Prose around the object is
/// ignored; anything that does not parse as a single object is returned as
/// [`RawText`]. This is a heuristic, not a parser: two separate objects in
/// one reply, or a trailing `}` in the prose, will fail.
pub fn extract_json_object(text: &str) -> Result<Map<String, Value>, RawText> {
    let span = OBJECT_SPAN
        .find(text)
        .ok_or_else(|| RawText(text.to_string()))?;
    serde_json::from_str::<Map<String, Value>>(span.as_str()).map_err(|e| {
        tracing::debug!(error = %e, "model output is not a JSON object");
        RawText(text.to_string())
    })
}
