//! Extraction of structured JSON from free-form model responses.
//!
//! Chat models asked for "ONLY a JSON array" still like to wrap the array
//! in a fenced code block or surround it with prose. This module digs the
//! array out before handing it to serde.

use crate::{Error, Result};
use serde::de::DeserializeOwned;

/// Pull a JSON array out of `raw` and deserialize its elements.
///
/// A fenced code block (with or without a `json` language tag) wins if
/// present; otherwise the slice between the first `[` and the last `]`
/// is used. Anything that doesn't parse is an [`Error::Parse`].
pub fn extract_array<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>> {
    let text = fenced_block(raw).unwrap_or(raw);

    let start = text
        .find('[')
        .ok_or_else(|| Error::Parse("no JSON array found in response".to_string()))?;
    let end = text
        .rfind(']')
        .ok_or_else(|| Error::Parse("no JSON array found in response".to_string()))?;
    if end < start {
        return Err(Error::Parse("no JSON array found in response".to_string()));
    }

    serde_json::from_str(&text[start..=end]).map_err(|e| Error::Parse(e.to_string()))
}

/// Returns the contents of the first ```-fenced block, if any.
fn fenced_block(raw: &str) -> Option<&str> {
    let start = raw.find("```")?;
    let rest = &raw[start + 3..];
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let end = rest.find("```")?;
    Some(rest[..end].trim())
}
