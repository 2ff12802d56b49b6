//! JSON Lines source.

use std::path::Path;

use anyhow::Result;
use serde::de::DeserializeOwned;

use crate::error::SeqError;
use crate::sequence::{SeqBound, Sequence};

use super::lines::lines;

/// Typed records of a JSON Lines file, decoded lazily.
///
/// Blank and whitespace-only lines are skipped. A record that fails to
/// decode aborts the pass with [`SeqError::Parse`] carrying its 1-based line
/// number.
///
/// # Errors
/// [`SeqError::Io`] if the file cannot be opened.
///
/// # Example
/// ```no_run
/// use seqflow::io::read_jsonl;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Word { text: String, freq: u32 }
///
/// let common = read_jsonl::<Word>("words.jsonl")?
///     .filter(|w| w.freq > 10)
///     .map(|w| w.text)
///     .to_vec()?;
/// # anyhow::Result::<()>::Ok(())
/// ```
pub fn read_jsonl<T>(path: impl AsRef<Path>) -> Result<Sequence<T>>
where
    T: SeqBound + DeserializeOwned,
{
    let mut line = 0u64;
    Ok(lines(path)?
        .map(move |text| {
            line += 1;
            (line, text)
        })
        .filter(|(_, text)| !text.trim().is_empty())
        .try_map(|(line, text)| {
            serde_json::from_str::<T>(&text)
                .map_err(|e| SeqError::Parse { line, reason: e.to_string() }.into())
        }))
}
