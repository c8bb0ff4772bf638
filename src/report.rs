//! Failure-message synthesis and terminal reporting.
//!
//! Top-level failure messages have the shape
//! `<base message> (at <path>): expected <candidate> to [not] <phrase>`;
//! the per-key messages of the comparator reuse the same prefix with the
//! full key path. [`Report`] prints failures and value diffs to a terminal,
//! colored the same way the rest of a test run is.

use std::io::{self, Write};

use similar::{ChangeTag, TextDiff};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::error::MatchError;
use crate::matcher::{MatchContext, Mode};
use crate::render::{render, render_pretty};
use crate::value::Value;

/// The user-facing description of what a mode expects of its subject.
pub(crate) fn phrase(mode: Mode, sequence: bool) -> &'static str {
    match mode {
        Mode::Equal => "recursively match the pattern",
        Mode::Include if sequence => "contain a member recursively including the pattern",
        Mode::Include => "recursively include the pattern",
        Mode::Have => "contain a member that recursively matches the pattern",
        Mode::IncludeMembers => "contain members recursively including the pattern",
        Mode::HaveMembers => "contain members that recursively match the pattern",
    }
}

/// `"<base> (at <path>)"`, with either part optional.
pub(crate) fn prefix_at(base_msg: Option<&str>, path: &str) -> String {
    match (base_msg, path.is_empty()) {
        (Some(base), false) => format!("{} (at {})", base, path),
        (Some(base), true) => base.to_string(),
        (None, false) => format!("(at {})", path),
        (None, true) => String::new(),
    }
}

/// `"<base> (pattern at <path>)"`, used for pattern-shape usage errors.
pub(crate) fn pattern_prefix_at(base_msg: Option<&str>, path: &str) -> String {
    match base_msg {
        Some(base) => format!("{} (pattern at {})", base, path),
        None => format!("(pattern at {})", path),
    }
}

/// Prepend the path-qualified prefix to a message body.
pub(crate) fn prefixed(base_msg: Option<&str>, path: &str, body: String) -> String {
    let prefix = prefix_at(base_msg, path);
    if prefix.is_empty() {
        body
    } else {
        format!("{}: {}", prefix, body)
    }
}

/// Synthesize the top-level failure for a mode outcome.
pub(crate) fn match_failure(
    subject: &Value,
    mode_phrase: &str,
    negated: bool,
    ctx: &MatchContext,
) -> MatchError {
    let polarity = if negated { "to not" } else { "to" };
    let message = prefixed(
        ctx.base_msg.as_deref(),
        &ctx.base_path,
        format!("expected {} {} {}", render(subject), polarity, mode_phrase),
    );
    MatchError::mismatch(ctx.base_path.clone(), message)
}

/// Prints match failures and value diffs to a terminal stream.
pub struct Report {
    stdout: StandardStream,
}

impl Report {
    pub fn new(color: bool) -> Self {
        let color_choice = if color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            stdout: StandardStream::stdout(color_choice),
        }
    }

    /// Color only when stdout is a tty.
    pub fn auto() -> Self {
        Self::new(atty::is(atty::Stream::Stdout))
    }

    pub fn print_failure(&mut self, err: &MatchError) {
        let _ = write_failure(&mut self.stdout, err);
    }

    pub fn print_value_diff(&mut self, expected: &Value, actual: &Value) {
        let _ = write_value_diff(&mut self.stdout, expected, actual);
    }
}

/// Write one failure line, `✗` for mismatches with a dimmed path line,
/// `⊘` for usage errors.
pub fn write_failure(w: &mut dyn WriteColor, err: &MatchError) -> io::Result<()> {
    match err {
        MatchError::Mismatch { path, message } => {
            w.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
            write!(w, "✗")?;
            w.reset()?;
            writeln!(w, " {}", message)?;
            w.set_color(ColorSpec::new().set_dimmed(true))?;
            writeln!(w, "  at {}", path)?;
            w.reset()?;
        }
        MatchError::Usage { message } => {
            w.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            write!(w, "⊘")?;
            w.reset()?;
            writeln!(w, " {}", message)?;
        }
    }
    Ok(())
}

/// Write a line diff of two rendered values, `-` expected / `+` actual.
pub fn write_value_diff(
    w: &mut dyn WriteColor,
    expected: &Value,
    actual: &Value,
) -> io::Result<()> {
    let expected = render_pretty(expected);
    let actual = render_pretty(actual);
    let diff = TextDiff::from_lines(expected.as_str(), actual.as_str());

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            writeln!(w, "...")?;
        }

        for op in group {
            for change in diff.iter_changes(op) {
                let (sign, color) = match change.tag() {
                    ChangeTag::Delete => ("-", Color::Red),
                    ChangeTag::Insert => ("+", Color::Green),
                    ChangeTag::Equal => (" ", Color::White),
                };

                w.set_color(ColorSpec::new().set_fg(Some(color)))?;
                write!(w, "{}{}", sign, change.value())?;
                w.reset()?;
                if change.missing_newline() {
                    writeln!(w)?;
                }
            }
        }
    }
    Ok(())
}
