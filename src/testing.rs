//! Testing utilities for seqflow sequences.
//!
//! This module provides a testing facility for end-users to write idiomatic
//! Rust tests for their sequence pipelines. It includes:
//!
//! - **Assertions**: Compare terminal results with expected values
//! - **Probes**: Observe how many elements were pulled and whether a chain
//!   was released
//! - **Debug utilities**: Inspect sequences during execution
//! - **Fixtures**: Word lists and temporary input files
//!
//! # Quick Start
//!
//! ```no_run
//! use seqflow::*;
//! use seqflow::testing::*;
//!
//! #[test]
//! fn test_simple_sequence() -> anyhow::Result<()> {
//!     let result = of([1, 2, 3]).map(|x| x * 2).to_vec()?;
//!
//!     assert_collections_equal(&result, &[2, 4, 6]);
//!     Ok(())
//! }
//! ```
//!
//! # Assertion Functions
//!
//! - [`assert_collections_equal`]: Exact order-dependent comparison
//! - [`assert_collections_unordered_equal`]: Order-independent comparison
//! - [`assert_groups_equal`]: Grouping results, order within groups matters
//! - [`assert_partition_exact`]: Partition covers the source exactly once
//! - [`assert_all`] / [`assert_none`]: Predicates over every element
//! - [`assert_illegal_state`]: Reuse of a spent sequence was rejected
//! - [`assert_close`]: Float comparison with tolerance
//!
//! # Probes
//!
//! ```
//! use seqflow::*;
//! use seqflow::testing::{CloseProbe, PullCounter};
//!
//! let pulls = PullCounter::new();
//! let closed = CloseProbe::new();
//! let first = closed
//!     .attach(pulls.source(vec![1, 2, 3, 4]))
//!     .filter(|x| x % 2 == 0)
//!     .find_first()?;
//!
//! assert_eq!(first, Some(2));
//! assert_eq!(pulls.pulled(), 2);
//! assert!(closed.is_closed());
//! # anyhow::Result::<()>::Ok(())
//! ```
//!
//! # Debug Utilities
//!
//! ```no_run
//! use seqflow::*;
//! use seqflow::testing::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let result = of([1, 2, 3])
//!     .debug_inspect("after source")
//!     .map(|x| x * 2)
//!     .debug_count("after map")
//!     .to_vec()?;
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod debug;
pub mod fixtures;
pub mod probes;

// Re-export commonly used items
pub use assertions::*;
pub use debug::*;
pub use fixtures::*;
pub use probes::*;
