//! # seqflow
//!
//! **Lazy, single-pass sequences** for Rust with chainable stages and
//! pluggable terminal reducers. Build a chain of transformations, then pull
//! every element through it exactly once with a terminal operation.
//!
//! ## Key Features
//!
//! - **Lazy chaining** - filter, map, flat_map, distinct, sorted, limit, skip,
//!   peek, take_while, drop_while
//! - **Pull-based evaluation** - `limit` and `find_first` stop pulling
//!   upstream, so infinite sources ([`iterate`], [`generate`]) are fine
//! - **Built-in reducers** - to_vec / to_set / to_sorted_set, grouping,
//!   partitioning, joining, counting, summing, averaging, summary statistics
//! - **Nested reducers** - group, then count / join / summarize each group
//! - **File sources** - lazy line reading and JSON Lines with scoped handles
//! - **Numeric sequences** - integer ranges and arithmetic terminals
//! - **Typed errors** - reuse, absence and I/O failures surface as [`SeqError`]
//!
//! ## Quick Start
//!
//! ```
//! use seqflow::*;
//! use seqflow::collectors::joining_wrapped;
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! let words = vec!["Hello", "World", "!", "Hello", "", "World"];
//!
//! let listing = from_vec(words)
//!     .map(str::to_uppercase)
//!     .distinct()
//!     .collect(joining_wrapped(", ", "[", "]"))?;
//!
//! assert_eq!(listing, "[HELLO, WORLD, !, ]");
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Sequence
//!
//! A [`Sequence<T>`] is a handle over a chain of [`Stage`]s. Sequences are:
//! - **Lazy** - intermediate operations only extend the chain
//! - **Single-pass** - one terminal operation consumes the chain; using the
//!   same handle (or a clone of it) again fails with
//!   [`SeqError::IllegalState`]
//! - **Pull-based** - each stage pulls from its upstream one element at a time
//!
//! ### Stages
//!
//! #### Stateless (element-wise)
//! - [`filter`](Sequence::filter) / [`try_filter`](Sequence::try_filter)
//! - [`map`](Sequence::map) / [`try_map`](Sequence::try_map)
//! - [`flat_map`](Sequence::flat_map)
//! - [`peek`](Sequence::peek)
//!
//! #### Stateful
//! - [`distinct`](Sequence::distinct) - seen-set of emitted elements
//! - [`sorted`](Sequence::sorted) - buffers the whole upstream
//! - [`limit`](Sequence::limit) / [`skip`](Sequence::skip)
//! - [`take_while`](Sequence::take_while) / [`drop_while`](Sequence::drop_while)
//!
//! ### Reducers
//!
//! The [`collectors`] module provides reusable reducers for
//! [`collect`](Sequence::collect). You can also implement custom reducers
//! via the [`Reducer`] trait.
//!
//! ### Optional results
//!
//! `find_first`, `min`, `max` and `reduce` return `Option<T>`.
//! [`OptionalExt::require`] converts absence into [`SeqError::NotPresent`].
//!
//! ## I/O Operations
//!
//! ```no_run
//! use seqflow::io::lines;
//! use seqflow::collectors::joining_with;
//!
//! let text = lines("test.txt")?.collect(joining_with("\n"))?;
//! # anyhow::Result::<()>::Ok(())
//! ```
//!
//! ## Feature Flags
//!
//! - `io-jsonl` - Enable JSON Lines input ([`io::read_jsonl`])
//!
//! ## Module Overview
//!
//! - [`sequence`] - Core `Sequence` type, intermediate and terminal operations
//! - [`stage`] - The pull interface every stage implements
//! - [`source`] - In-memory and generated sources
//! - [`numeric`] - Ranges and arithmetic terminals
//! - [`collectors`] - Built-in reducers
//! - [`io`] - File-backed sources
//! - [`testing`] - Assertions, probes, debug taps and fixtures

pub mod collectors;
pub mod error;
pub mod io;
pub mod numeric;
pub mod optional;
pub mod sequence;
pub mod source;
pub mod stage;
pub mod testing;

// General re-exports
pub use collectors::Reducer;
pub use error::SeqError;
pub use numeric::{range, range_closed};
pub use optional::OptionalExt;
pub use sequence::{SeqBound, SeqIter, Sequence};
pub use source::{empty, from_iter, from_set, from_vec, generate, iterate, iterate_while, of};
pub use stage::Stage;

// Gated re-exports
#[cfg(feature = "io-jsonl")]
pub use io::read_jsonl;

pub use io::{lines, lines_from_reader, lines_with, LineOptions};
