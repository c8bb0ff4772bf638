//! Patterns: partial or full descriptions of an expected value.
//!
//! Each pattern leaf is resolved into a tagged union (literal, nested
//! single-pattern, or predicate) when the pattern is constructed, so the
//! engine never has to re-inspect leaves while matching.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::expect::Expect;
use crate::value::Value;

/// One slot of a [`SinglePattern`].
#[derive(Debug, Clone)]
pub enum PatternValue {
    /// Compared against the candidate by deep equality.
    Literal(Value),
    /// Matched recursively, key by key, in exact mode.
    Nested(SinglePattern),
    /// Invoked with an assertion handle on the candidate sub-value.
    Predicate(Predicate),
}

/// A key-by-key description of one expected record.
///
/// # Example
///
/// ```
/// use deepmatch::{expect, pred, SinglePattern, Value};
/// use serde_json::json;
///
/// let value = Value::from(json!({ "num": 2, "obj": { "key": "a" } }));
/// let pattern = SinglePattern::new()
///     .with("num", pred(|e| e.gt(1)))
///     .with("obj", SinglePattern::new().with("key", "a"));
///
/// expect(&value).recursive().equal(pattern).unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct SinglePattern {
    entries: BTreeMap<String, PatternValue>,
}

impl SinglePattern {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key expectation, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PatternValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PatternValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&PatternValue> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Either one record description or an ordered list of them.
///
/// Lists are consumed by the positional and members strategies; everything
/// else takes a single pattern.
#[derive(Debug, Clone)]
pub enum Pattern {
    Single(SinglePattern),
    List(Vec<SinglePattern>),
}

impl From<SinglePattern> for Pattern {
    fn from(single: SinglePattern) -> Pattern {
        Pattern::Single(single)
    }
}

impl From<Vec<SinglePattern>> for Pattern {
    fn from(list: Vec<SinglePattern>) -> Pattern {
        Pattern::List(list)
    }
}

/// A user-supplied nested expectation.
///
/// Invoked with a handle on the candidate sub-value; the handle carries the
/// access path and base message accumulated so far, so a predicate that
/// re-enters the engine reports failures at the right path.
#[derive(Clone)]
pub struct Predicate(Rc<dyn Fn(&Expect<'_>) -> Result<()>>);

impl Predicate {
    pub fn new(f: impl Fn(&Expect<'_>) -> Result<()> + 'static) -> Self {
        Predicate(Rc::new(f))
    }

    pub(crate) fn invoke(&self, handle: &Expect<'_>) -> Result<()> {
        (self.0)(handle)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<predicate>")
    }
}

/// Shorthand for a predicate pattern leaf.
pub fn pred(f: impl Fn(&Expect<'_>) -> Result<()> + 'static) -> PatternValue {
    PatternValue::Predicate(Predicate::new(f))
}

impl From<Value> for PatternValue {
    fn from(v: Value) -> PatternValue {
        PatternValue::Literal(v)
    }
}

impl From<SinglePattern> for PatternValue {
    fn from(p: SinglePattern) -> PatternValue {
        PatternValue::Nested(p)
    }
}

impl From<Predicate> for PatternValue {
    fn from(p: Predicate) -> PatternValue {
        PatternValue::Predicate(p)
    }
}

impl From<bool> for PatternValue {
    fn from(b: bool) -> PatternValue {
        PatternValue::Literal(Value::from(b))
    }
}

impl From<i32> for PatternValue {
    fn from(n: i32) -> PatternValue {
        PatternValue::Literal(Value::from(n))
    }
}

impl From<i64> for PatternValue {
    fn from(n: i64) -> PatternValue {
        PatternValue::Literal(Value::from(n))
    }
}

impl From<f64> for PatternValue {
    fn from(n: f64) -> PatternValue {
        PatternValue::Literal(Value::from(n))
    }
}

impl From<&str> for PatternValue {
    fn from(s: &str) -> PatternValue {
        PatternValue::Literal(Value::from(s))
    }
}

impl From<String> for PatternValue {
    fn from(s: String) -> PatternValue {
        PatternValue::Literal(Value::from(s))
    }
}

impl From<serde_json::Value> for PatternValue {
    fn from(json: serde_json::Value) -> PatternValue {
        PatternValue::Literal(Value::from(json))
    }
}
