//! Typed failure kinds raised by sequences, reducers and sources.
//!
//! Public functions return [`anyhow::Result`]; when the failure is one of the
//! kinds below, the root cause is a [`SeqError`] and can be recovered with
//! `err.downcast_ref::<SeqError>()`.

use std::io;
use std::path::PathBuf;

/// Failure kinds surfaced by `seqflow`.
#[derive(Debug, thiserror::Error)]
pub enum SeqError {
    /// A sequence handle was used after an intermediate or terminal
    /// operation already took its chain.
    #[error("sequence has already been {0}")]
    IllegalState(&'static str),

    /// [`OptionalExt::require`](crate::OptionalExt::require) was called on
    /// an absent value.
    #[error("no value present")]
    NotPresent,

    /// Opening or reading a backing file failed.
    #[error("i/o failure on {}: {source}", display_path(.path))]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    /// A line of a text source was not valid UTF-8.
    #[error("line {line} is not valid UTF-8")]
    InvalidUtf8 { line: u64 },

    /// A structured line could not be decoded.
    #[error("line {line}: {reason}")]
    Parse { line: u64, reason: String },
}

impl SeqError {
    pub(crate) const LINKED: Self = Self::IllegalState("operated upon");
    pub(crate) const CONSUMED: Self = Self::IllegalState("consumed or closed");

    pub(crate) fn io(path: Option<PathBuf>, source: io::Error) -> Self {
        Self::Io { path, source }
    }

    /// True for [`SeqError::IllegalState`].
    #[must_use]
    pub const fn is_illegal_state(&self) -> bool {
        matches!(self, Self::IllegalState(_))
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map_or_else(|| "<reader>".to_string(), |p| p.display().to_string())
}
