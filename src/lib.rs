//! Recursive structural pattern matching for test assertions.
//!
//! This crate compares nested values (records, sequences, scalars) against
//! patterns that may be partial and may carry predicates, and reports
//! failures with the full access path to the offending leaf:
//!
//! - `equal` requires an exact structural match (positional for sequences),
//! - `include` ignores keys the pattern omits; on a sequence it asks for
//!   some member that partially matches,
//! - `have` asks for some member that exactly matches,
//! - `include_members` / `have_members` require every pattern element to be
//!   satisfied by a distinct member.
//!
//! Pattern leaves are literals (deep equality), nested patterns, or
//! predicates: closures handed an assertion handle on the sub-value, which
//! may re-enter the engine for nested recursive matches.
//!
//! # Example
//!
//! ```
//! use deepmatch::{expect, pred, SinglePattern, Value};
//! use serde_json::json;
//!
//! let value = Value::from(json!({
//!     "num": 2,
//!     "obj": { "key": "a", "value": "A" },
//! }));
//!
//! let pattern = SinglePattern::new()
//!     .with("num", pred(|e| e.gt(1)))
//!     .with("obj", pred(|e| {
//!         e.recursive()
//!             .include(SinglePattern::new().with("value", pred(|e| e.is_type("string"))))
//!     }));
//!
//! expect(&value).recursive().equal(pattern).unwrap();
//! ```
//!
//! Failure messages carry the path to the first offending leaf, e.g.
//! `(at root.obj.value): expected 'A' to be a number`.
//!
//! Matching is purely synchronous and stack-recursive; pattern depth is
//! bounded only by the call stack.

mod compare;
mod error;
mod expect;
mod matcher;
mod pattern;
mod render;
mod report;
mod value;

pub use error::{MatchError, Result};
pub use expect::{expect, Expect, Recursive};
pub use matcher::{match_pattern, MatchContext, Mode};
pub use pattern::{pred, Pattern, PatternValue, Predicate, SinglePattern};
pub use render::{render, render_pretty};
pub use report::{write_failure, write_value_diff, Report};
pub use value::{Function, Value};
