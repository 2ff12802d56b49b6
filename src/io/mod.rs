//! File-backed sources.
//!
//! - [`lines`] / [`lines_with`] / [`lines_from_reader`]: one `String` per
//!   text line, read lazily.
//! - [`read_jsonl`] (feature `io-jsonl`): one typed value per non-blank
//!   JSON Lines record.
//!
//! Files are opened when the sequence is built, so a missing file fails
//! before any stage runs. The open handle belongs to the source stage and is
//! closed when the chain is released, whether the pass ran to the end, was
//! cut short by `limit`/`find_first`, or failed.

mod lines;

#[cfg_attr(docsrs, doc(cfg(feature = "io-jsonl")))]
#[cfg(feature = "io-jsonl")]
mod jsonl;

pub use lines::{lines, lines_from_reader, lines_with, LineOptions};

#[cfg(feature = "io-jsonl")]
pub use jsonl::read_jsonl;
