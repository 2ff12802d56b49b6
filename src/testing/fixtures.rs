//! Pre-built datasets and file fixtures for common testing scenarios.

use std::io::Write;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

/// Words used by the stream walkthrough: four contain `"ll"`, lengths
/// repeat, and two are longer than five characters.
///
/// # Example
///
/// ```
/// use seqflow::testing::stream_words;
///
/// assert_eq!(stream_words().len(), 6);
/// ```
#[must_use]
pub fn stream_words() -> Vec<String> {
    ["hello", "world", "bello", "whatcha", "yellow", "mello"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Words used by the collector walkthrough: duplicates, an empty string and
/// a one-character punctuation mark.
#[must_use]
pub fn collector_words() -> Vec<String> {
    ["Hello", "World", "!", "Hello", "", "World"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// A small typed record for JSON Lines tests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u32,
}

/// Sample [`WordCount`] records.
#[must_use]
pub fn sample_word_counts() -> Vec<WordCount> {
    [("hello", 3), ("world", 1), ("bello", 7), ("yellow", 2)]
        .into_iter()
        .map(|(word, count)| WordCount { word: word.to_string(), count })
        .collect()
}

/// Write `lines` (each followed by `\n`) to a fresh temporary file.
///
/// The file is deleted when the returned handle is dropped.
///
/// # Errors
/// Returns an error if the temporary file cannot be created or written.
///
/// # Example
///
/// ```
/// use seqflow::testing::temp_text_file;
///
/// let file = temp_text_file(&["alpha", "beta"])?;
/// let text = std::fs::read_to_string(file.path())?;
/// assert_eq!(text, "alpha\nbeta\n");
/// # anyhow::Result::<()>::Ok(())
/// ```
pub fn temp_text_file<S: AsRef<str>>(lines: &[S]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("create temporary text file")?;
    for line in lines {
        writeln!(file, "{}", line.as_ref()).context("write temporary text file")?;
    }
    file.flush().context("flush temporary text file")?;
    Ok(file)
}

/// Write raw bytes to a fresh temporary file.
///
/// # Errors
/// Returns an error if the temporary file cannot be created or written.
pub fn temp_bytes_file(bytes: &[u8]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("create temporary file")?;
    file.write_all(bytes).context("write temporary file")?;
    file.flush().context("flush temporary file")?;
    Ok(file)
}

/// Write `records` as JSON Lines to a fresh temporary file.
///
/// # Errors
/// Returns an error if the file cannot be written or a record fails to
/// serialize.
#[cfg(feature = "io-jsonl")]
pub fn temp_jsonl_file<T: Serialize>(records: &[T]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("create temporary JSONL file")?;
    for (i, record) in records.iter().enumerate() {
        serde_json::to_writer(&mut file, record)
            .with_context(|| format!("serialize record #{i}"))?;
        file.write_all(b"\n")?;
    }
    file.flush()?;
    Ok(file)
}
