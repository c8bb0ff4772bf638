//! The matching engine: mode dispatch, sequence strategies, negation.
//!
//! [`match_pattern`] is the single entry point. It validates the shapes of
//! subject and pattern for the requested mode, picks a strategy, and applies
//! outcome polarity: a match found under negation fails, a match not found
//! without negation fails, and the other two combinations succeed.

use crate::compare::compare_single;
use crate::error::{MatchError, Result};
use crate::pattern::{Pattern, SinglePattern};
use crate::render::render;
use crate::report::{match_failure, pattern_prefix_at, phrase, prefix_at};
use crate::value::Value;

/// The comparison strategy requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Exact positional/structural match.
    Equal,
    /// Partial match; on a sequence, "some element partially matches".
    Include,
    /// "Some element exactly matches".
    Have,
    /// Every pattern element partially matched by a distinct member.
    IncludeMembers,
    /// Every pattern element exactly matched by a distinct member.
    HaveMembers,
}

/// The explicit state threaded through recursive comparison: where we are,
/// what message to prefix failures with, and whether the outcome is negated.
///
/// Forked on descent (a predicate handle resets `negate` and extends the
/// path), never stored globally.
#[derive(Debug, Clone)]
pub struct MatchContext {
    pub base_path: String,
    pub base_msg: Option<String>,
    pub negate: bool,
}

impl MatchContext {
    pub fn new() -> Self {
        MatchContext {
            base_path: "root".to_string(),
            base_msg: None,
            negate: false,
        }
    }

    pub fn with_message(msg: impl Into<String>) -> Self {
        MatchContext {
            base_msg: Some(msg.into()),
            ..Self::new()
        }
    }

    pub fn negated(mut self) -> Self {
        self.negate = true;
        self
    }

    fn subject_msg(&self) -> String {
        prefix_at(self.base_msg.as_deref(), &self.base_path)
    }

    fn pattern_msg(&self) -> String {
        pattern_prefix_at(self.base_msg.as_deref(), &self.base_path)
    }
}

impl Default for MatchContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Match a subject value against a pattern in the given mode.
///
/// Shape preconditions are checked before dispatch; violations are
/// [`MatchError::Usage`] errors, raised immediately and never subject to
/// negation.
pub fn match_pattern(
    subject: &Value,
    pattern: &Pattern,
    mode: Mode,
    ctx: &MatchContext,
) -> Result<()> {
    if subject.is_null() {
        return Err(MatchError::usage(format!(
            "{}: expected the subject to not be null",
            ctx.subject_msg()
        )));
    }

    match subject {
        Value::Array(items) => match_sequence(items, subject, pattern, mode, ctx),
        Value::Object(_) => match_record(subject, pattern, mode, ctx),
        other => Err(MatchError::usage(format!(
            "{}: expected {} to be an object or array",
            ctx.subject_msg(),
            render(other)
        ))),
    }
}

fn match_record(subject: &Value, pattern: &Pattern, mode: Mode, ctx: &MatchContext) -> Result<()> {
    if matches!(mode, Mode::IncludeMembers | Mode::HaveMembers) {
        return Err(MatchError::usage(format!(
            "{}: members matching requires an array, got {}",
            ctx.subject_msg(),
            subject.type_name()
        )));
    }

    let Pattern::Single(single) = pattern else {
        return Err(MatchError::usage(format!(
            "{}: expected the pattern to be an object",
            ctx.pattern_msg()
        )));
    };

    let partial = mode == Mode::Include;
    let res = compare_single(
        subject,
        single,
        partial,
        &ctx.base_path,
        ctx.base_msg.as_deref(),
    );
    settle(res, subject, phrase(mode, false), ctx)
}

fn match_sequence(
    items: &[Value],
    subject: &Value,
    pattern: &Pattern,
    mode: Mode,
    ctx: &MatchContext,
) -> Result<()> {
    match (mode, pattern) {
        (Mode::Equal, Pattern::List(patterns)) => positional_equal(items, subject, patterns, ctx),
        (Mode::Include | Mode::Have, Pattern::Single(single)) => {
            find_one(items, subject, single, mode, ctx)
        }
        (Mode::IncludeMembers | Mode::HaveMembers, Pattern::List(patterns)) => {
            match_members(items, subject, patterns, mode, ctx)
        }
        (Mode::Include | Mode::Have, Pattern::List(_)) => Err(MatchError::usage(format!(
            "{}: expected a single object pattern (use a members mode for pattern lists)",
            ctx.pattern_msg()
        ))),
        (_, _) => Err(MatchError::usage(format!(
            "{}: expected the pattern to be an array",
            ctx.pattern_msg()
        ))),
    }
}

/// Equal on a sequence: same length, then index-by-index exact comparison,
/// stopping at the first failing index.
fn positional_equal(
    items: &[Value],
    subject: &Value,
    patterns: &[SinglePattern],
    ctx: &MatchContext,
) -> Result<()> {
    let mode_phrase = phrase(Mode::Equal, true);

    if items.len() != patterns.len() {
        let failure = MatchError::mismatch(
            ctx.base_path.clone(),
            format!(
                "{}: expected {} to have length {}, got {}",
                ctx.subject_msg(),
                render(subject),
                patterns.len(),
                items.len()
            ),
        );
        return settle(Err(failure), subject, mode_phrase, ctx);
    }

    let mut res = Ok(());
    for (i, (item, single)) in items.iter().zip(patterns).enumerate() {
        let path = format!("{}[{}]", ctx.base_path, i);
        if let Err(err) = compare_single(item, single, false, &path, ctx.base_msg.as_deref()) {
            if err.is_usage() {
                return Err(err);
            }
            res = Err(err);
            break;
        }
    }
    settle(res, subject, mode_phrase, ctx)
}

/// Include/Have on a sequence: search for any element satisfying the
/// pattern. Element-level failures are not surfaced; only the aggregate
/// found/not-found outcome matters, so elements compare with an empty
/// path and message.
fn find_one(
    items: &[Value],
    subject: &Value,
    single: &SinglePattern,
    mode: Mode,
    ctx: &MatchContext,
) -> Result<()> {
    let partial = mode == Mode::Include;
    let mut found = false;

    for item in items {
        match compare_single(item, single, partial, "", None) {
            Ok(()) => {
                found = true;
                break;
            }
            Err(err) if err.is_usage() => return Err(err),
            Err(_) => {}
        }
    }

    decide(found, subject, phrase(mode, true), ctx)
}

/// Members matching: every pattern element must be satisfied by a distinct
/// candidate element. Assignment is greedy in pattern order over
/// not-yet-assigned candidate indices, with no backtracking: an early
/// assignment can block a later valid one.
fn match_members(
    items: &[Value],
    subject: &Value,
    patterns: &[SinglePattern],
    mode: Mode,
    ctx: &MatchContext,
) -> Result<()> {
    let partial = mode == Mode::IncludeMembers;

    if items.len() < patterns.len() {
        return Err(MatchError::usage(format!(
            "{}: expected {} to have at least {} members, got {}",
            ctx.subject_msg(),
            render(subject),
            patterns.len(),
            items.len()
        )));
    }

    let mut taken = vec![false; items.len()];
    'patterns: for single in patterns {
        for (i, item) in items.iter().enumerate() {
            if taken[i] {
                continue;
            }
            match compare_single(item, single, partial, "", None) {
                Ok(()) => {
                    taken[i] = true;
                    continue 'patterns;
                }
                Err(err) if err.is_usage() => return Err(err),
                Err(_) => {}
            }
        }
        return decide(false, subject, phrase(mode, true), ctx);
    }

    decide(true, subject, phrase(mode, true), ctx)
}

/// Apply negation polarity to a comparator outcome, keeping the inner
/// failure for the non-negated case.
fn settle(res: Result<()>, subject: &Value, mode_phrase: &str, ctx: &MatchContext) -> Result<()> {
    match res {
        Err(err) if err.is_usage() => Err(err),
        Err(err) => {
            if ctx.negate {
                Ok(())
            } else {
                Err(err)
            }
        }
        Ok(()) => {
            if ctx.negate {
                Err(match_failure(subject, mode_phrase, true, ctx))
            } else {
                Ok(())
            }
        }
    }
}

/// Apply negation polarity to an aggregate found/not-found outcome.
fn decide(found: bool, subject: &Value, mode_phrase: &str, ctx: &MatchContext) -> Result<()> {
    match (found, ctx.negate) {
        (true, false) | (false, true) => Ok(()),
        (true, true) => Err(match_failure(subject, mode_phrase, true, ctx)),
        (false, false) => Err(match_failure(subject, mode_phrase, false, ctx)),
    }
}
