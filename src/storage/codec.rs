//! Tag set encoding
//!
//! A tag set is stored as its sorted, deduplicated tags joined by a single
//! NUL byte. The zero-tag set is the empty value.

use crate::error::{BoreError, Result};

pub const SEPARATOR: u8 = 0;

/// Checks that `tag` survives an encode/decode round trip.
pub fn validate_tag(tag: &str) -> Result<()> {
    if tag.is_empty() || tag.as_bytes().contains(&SEPARATOR) {
        return Err(BoreError::InvalidTag(tag.to_string()));
    }
    Ok(())
}

/// Sorted, duplicate-free copy of `tags`.
pub fn canonicalize<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = tags.into_iter().map(|t| t.as_ref().to_string()).collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// Encode `tags` into the canonical stored value.
pub fn encode<I, S>(tags: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tags = canonicalize(tags);
    for tag in &tags {
        validate_tag(tag)?;
    }
    Ok(tags.join("\0").into_bytes())
}

/// Decode a stored value. The empty value is the empty tag set.
pub fn decode(path: &str, value: &[u8]) -> Result<Vec<String>> {
    if value.is_empty() {
        return Ok(Vec::new());
    }

    value
        .split(|b| *b == SEPARATOR)
        .map(|raw| {
            String::from_utf8(raw.to_vec()).map_err(|e| BoreError::Corrupt {
                path: path.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}
