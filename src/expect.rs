//! The assertion handle and the public matching vocabulary.

use regex::Regex;

use crate::error::{MatchError, Result};
use crate::matcher::{match_pattern, MatchContext, Mode};
use crate::pattern::{Pattern, SinglePattern};
use crate::render::render;
use crate::report::prefix_at;
use crate::value::Value;

/// Start an assertion chain on a value.
///
/// # Example
///
/// ```
/// use deepmatch::{expect, SinglePattern, Value};
/// use serde_json::json;
///
/// let value = Value::from(json!({ "num": 1, "extra": true }));
/// expect(&value)
///     .recursive()
///     .include(SinglePattern::new().with("num", 1))
///     .unwrap();
/// ```
pub fn expect(value: &Value) -> Expect<'_> {
    Expect {
        value,
        path: "root".to_string(),
        prefix: None,
        base_msg: None,
        negate: false,
    }
}

/// An assertion handle bound to a value.
///
/// Handles are what predicates receive: they carry the access path and base
/// message accumulated by the engine, so failures raised inside a predicate
/// are reported at the right place. Every assertion either returns `Ok(())`
/// or a [`MatchError`]; nothing panics.
#[derive(Clone)]
pub struct Expect<'v> {
    value: &'v Value,
    path: String,
    prefix: Option<String>,
    base_msg: Option<String>,
    negate: bool,
}

impl<'v> Expect<'v> {
    /// Handle for a candidate sub-value at `path`, as constructed by the
    /// comparator before invoking a predicate or a literal comparison.
    pub(crate) fn for_key(value: &'v Value, path: String, base_msg: Option<&str>) -> Self {
        let prefix = Some(prefix_at(base_msg, &path));
        Expect {
            value,
            path,
            prefix,
            base_msg: base_msg.map(str::to_string),
            negate: false,
        }
    }

    /// Attach a custom message prefixed to every failure.
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        let msg = msg.into();
        self.prefix = Some(msg.clone());
        self.base_msg = Some(msg);
        self
    }

    /// Flip the negation flag for the assertions that follow.
    pub fn not(&self) -> Expect<'v> {
        let mut e = self.clone();
        e.negate = !e.negate;
        e
    }

    /// The bound value, for predicates that inspect it directly.
    pub fn value(&self) -> &'v Value {
        self.value
    }

    /// Enter the recursive-matching vocabulary.
    pub fn recursive(&self) -> Recursive<'_, 'v> {
        Recursive { handle: self }
    }

    /// Short alias for [`recursive`](Expect::recursive).
    pub fn rec(&self) -> Recursive<'_, 'v> {
        self.recursive()
    }

    pub fn deep_equals(&self, expected: impl Into<Value>) -> Result<()> {
        self.deep_eq_ref(&expected.into())
    }

    pub(crate) fn deep_eq_ref(&self, expected: &Value) -> Result<()> {
        self.verdict(self.value == expected, || {
            format!("deeply equal {}", render(expected))
        })
    }

    /// Assert the value's type name, e.g. `"string"` or `"array"`.
    pub fn is_type(&self, name: &str) -> Result<()> {
        self.verdict(self.value.type_name() == name, || format!("be a {}", name))
    }

    pub fn is_null(&self) -> Result<()> {
        self.verdict(self.value.is_null(), || "be null".to_string())
    }

    pub fn is_not_null(&self) -> Result<()> {
        let pass = !self.value.is_null();
        if pass != self.negate {
            return Ok(());
        }
        let body = if self.negate {
            format!("expected {} to be null", render(self.value))
        } else {
            format!("expected {} to not be null", render(self.value))
        };
        Err(self.failure(body))
    }

    /// Fail unconditionally with the given message.
    pub fn fail(&self, msg: &str) -> Result<()> {
        Err(self.failure(msg.to_string()))
    }

    pub fn gt(&self, n: impl Into<f64>) -> Result<()> {
        let n = n.into();
        self.verdict(self.number()? > n, || format!("be greater than {}", n))
    }

    pub fn gte(&self, n: impl Into<f64>) -> Result<()> {
        let n = n.into();
        self.verdict(self.number()? >= n, || format!("be at least {}", n))
    }

    pub fn lt(&self, n: impl Into<f64>) -> Result<()> {
        let n = n.into();
        self.verdict(self.number()? < n, || format!("be less than {}", n))
    }

    pub fn lte(&self, n: impl Into<f64>) -> Result<()> {
        let n = n.into();
        self.verdict(self.number()? <= n, || format!("be at most {}", n))
    }

    /// Assert a string value against a regular expression.
    ///
    /// An invalid regex is a usage error and is never inverted by negation.
    pub fn matches(&self, pattern: &str) -> Result<()> {
        let Value::String(s) = self.value else {
            return Err(self.failure(format!("expected {} to be a string", render(self.value))));
        };
        let re = Regex::new(pattern).map_err(|e| {
            MatchError::usage(format!("failed to build pattern regex /{}/: {}", pattern, e))
        })?;
        self.verdict(re.is_match(s), || format!("match /{}/", pattern))
    }

    /// Substring containment for strings, deep membership for arrays.
    pub fn contains(&self, needle: impl Into<Value>) -> Result<()> {
        let needle = needle.into();
        let pass = match (self.value, &needle) {
            (Value::String(s), Value::String(sub)) => s.contains(sub.as_str()),
            (Value::Array(items), expected) => items.iter().any(|item| item == expected),
            _ => {
                return Err(self.failure(format!(
                    "expected {} to be a string or array",
                    render(self.value)
                )))
            }
        };
        self.verdict(pass, || format!("contain {}", render(&needle)))
    }

    fn number(&self) -> Result<f64> {
        match self.value {
            Value::Number(n) => Ok(*n),
            other => Err(self.failure(format!("expected {} to be a number", render(other)))),
        }
    }

    fn verdict(&self, pass: bool, describe: impl FnOnce() -> String) -> Result<()> {
        if pass != self.negate {
            return Ok(());
        }
        let polarity = if self.negate { "to not" } else { "to" };
        let body = format!("expected {} {} {}", render(self.value), polarity, describe());
        Err(self.failure(body))
    }

    fn failure(&self, body: String) -> MatchError {
        let message = match &self.prefix {
            Some(prefix) if !prefix.is_empty() => format!("{}: {}", prefix, body),
            _ => body,
        };
        MatchError::mismatch(self.path.clone(), message)
    }
}

/// The recursive-matching operations, reached through
/// [`Expect::recursive`] or its [`rec`](Expect::rec) alias.
pub struct Recursive<'e, 'v> {
    handle: &'e Expect<'v>,
}

impl Recursive<'_, '_> {
    fn run(&self, mode: Mode, pattern: Pattern) -> Result<()> {
        let ctx = MatchContext {
            base_path: self.handle.path.clone(),
            base_msg: self.handle.base_msg.clone(),
            negate: self.handle.negate,
        };
        match_pattern(self.handle.value, &pattern, mode, &ctx)
    }

    /// Exact match: a single pattern for a record, a pattern list for a
    /// sequence (positional).
    pub fn equal(&self, pattern: impl Into<Pattern>) -> Result<()> {
        self.run(Mode::Equal, pattern.into())
    }

    pub fn equals(&self, pattern: impl Into<Pattern>) -> Result<()> {
        self.equal(pattern)
    }

    pub fn eq(&self, pattern: impl Into<Pattern>) -> Result<()> {
        self.equal(pattern)
    }

    pub fn eql(&self, pattern: impl Into<Pattern>) -> Result<()> {
        self.equal(pattern)
    }

    pub fn eqls(&self, pattern: impl Into<Pattern>) -> Result<()> {
        self.equal(pattern)
    }

    /// Partial match on a record, or "some member partially matches" on a
    /// sequence.
    pub fn include(&self, pattern: SinglePattern) -> Result<()> {
        self.run(Mode::Include, Pattern::Single(pattern))
    }

    pub fn includes(&self, pattern: SinglePattern) -> Result<()> {
        self.include(pattern)
    }

    /// "Some member exactly matches."
    pub fn have(&self, pattern: SinglePattern) -> Result<()> {
        self.run(Mode::Have, Pattern::Single(pattern))
    }

    /// Every pattern element partially matched by a distinct member.
    pub fn include_members(&self, patterns: Vec<SinglePattern>) -> Result<()> {
        self.run(Mode::IncludeMembers, Pattern::List(patterns))
    }

    /// Every pattern element exactly matched by a distinct member.
    pub fn have_members(&self, patterns: Vec<SinglePattern>) -> Result<()> {
        self.run(Mode::HaveMembers, Pattern::List(patterns))
    }
}
