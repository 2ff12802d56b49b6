//! Lazy line reader.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::error::SeqError;
use crate::sequence::Sequence;
use crate::stage::Stage;

/// How a text source decodes its lines.
///
/// ```
/// use seqflow::io::LineOptions;
///
/// let opts = LineOptions { lossy: true, ..LineOptions::default() };
/// assert_eq!(opts.buffer_capacity, 8 * 1024);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineOptions {
    /// Replace invalid UTF-8 with U+FFFD instead of failing the pass.
    pub lossy: bool,
    /// Capacity of the read buffer in bytes.
    pub buffer_capacity: usize,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self { lossy: false, buffer_capacity: 8 * 1024 }
    }
}

/// Yields one line per pull with `\n` / `\r\n` stripped.
struct LineReader<R> {
    reader: Option<R>,
    path: Option<PathBuf>,
    opts: LineOptions,
    line: u64,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    fn new(reader: R, path: Option<PathBuf>, opts: LineOptions) -> Self {
        Self { reader: Some(reader), path, opts, line: 0, buf: Vec::new() }
    }

    fn decode(&self, bytes: Vec<u8>) -> Result<String> {
        if self.opts.lossy {
            return Ok(String::from_utf8_lossy(&bytes).into_owned());
        }
        String::from_utf8(bytes).map_err(|_| SeqError::InvalidUtf8 { line: self.line }.into())
    }
}

impl<R: BufRead + Send> Stage<String> for LineReader<R> {
    fn try_advance(&mut self) -> Result<Option<String>> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };
        self.buf.clear();
        let n = match reader.read_until(b'\n', &mut self.buf) {
            Ok(n) => n,
            Err(e) => {
                // Release the handle before surfacing the failure.
                self.reader = None;
                return Err(SeqError::io(self.path.clone(), e).into());
            }
        };
        if n == 0 {
            self.reader = None;
            return Ok(None);
        }
        self.line += 1;
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        let bytes = std::mem::take(&mut self.buf);
        self.decode(bytes).map(Some)
    }
}

/// Lines of the file at `path`, decoded as strict UTF-8.
///
/// # Errors
/// [`SeqError::Io`] if the file cannot be opened. Read and decode failures
/// surface from the terminal operation.
///
/// # Example
/// ```no_run
/// use seqflow::io::lines;
/// use seqflow::collectors::joining_with;
///
/// let text = lines("test.txt")?.collect(joining_with("\n"))?;
/// println!("{text}");
/// # anyhow::Result::<()>::Ok(())
/// ```
pub fn lines(path: impl AsRef<Path>) -> Result<Sequence<String>> {
    lines_with(path, LineOptions::default())
}

/// Lines of the file at `path` with explicit [`LineOptions`].
///
/// # Errors
/// [`SeqError::Io`] if the file cannot be opened.
pub fn lines_with(path: impl AsRef<Path>, opts: LineOptions) -> Result<Sequence<String>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| SeqError::io(Some(path.to_path_buf()), e))?;
    let reader = BufReader::with_capacity(opts.buffer_capacity.max(1), file);
    Ok(Sequence::from_stage(LineReader::new(reader, Some(path.to_path_buf()), opts)))
}

/// Lines of an arbitrary buffered reader.
///
/// ```
/// use std::io::Cursor;
/// use seqflow::io::{lines_from_reader, LineOptions};
///
/// let v = lines_from_reader(Cursor::new("a\r\nb\n\nc"), LineOptions::default()).to_vec()?;
/// assert_eq!(v, vec!["a", "b", "", "c"]);
/// # anyhow::Result::<()>::Ok(())
/// ```
pub fn lines_from_reader<R>(reader: R, opts: LineOptions) -> Sequence<String>
where
    R: BufRead + Send + 'static,
{
    Sequence::from_stage(LineReader::new(reader, None, opts))
}
