//! Presence checks for the `Option` results of `find_first`, `min`, `reduce`
//! and friends.
//!
//! `Option<T>` already is the two-state present/absent container; this
//! module only adds a typed failure for callers that require a value.
//! Prefer `unwrap_or(default)` or `if let Some(..)` where absence is normal.

use anyhow::Result;

use crate::error::SeqError;

/// Extension methods on `Option<T>`.
pub trait OptionalExt<T> {
    /// The contained value, or [`SeqError::NotPresent`].
    ///
    /// # Errors
    /// [`SeqError::NotPresent`] when the option is `None`.
    ///
    /// ```
    /// use seqflow::*;
    ///
    /// let first_long = from_vec(vec!["hello", "whatcha"])
    ///     .map(str::len)
    ///     .filter(|n| *n > 5)
    ///     .find_first()?;
    /// assert_eq!(first_long.require()?, 7);
    ///
    /// let none = empty::<usize>().find_first()?;
    /// let err = none.require().unwrap_err();
    /// assert!(matches!(err.downcast_ref::<SeqError>(), Some(SeqError::NotPresent)));
    /// # anyhow::Result::<()>::Ok(())
    /// ```
    fn require(self) -> Result<T>;

    /// Run `f` with the value when present; no-op otherwise.
    fn if_present<F: FnOnce(&T)>(&self, f: F);
}

impl<T> OptionalExt<T> for Option<T> {
    fn require(self) -> Result<T> {
        self.ok_or_else(|| SeqError::NotPresent.into())
    }

    fn if_present<F: FnOnce(&T)>(&self, f: F) {
        if let Some(v) = self {
            f(v);
        }
    }
}
