//! The structural comparator: one candidate record against one pattern.
//!
//! This is the only place leaves are compared or predicates invoked;
//! everything else in the engine decides which candidate/pattern pairs get
//! here and how the outcomes are combined.

use std::collections::BTreeSet;

use crate::error::{MatchError, Result};
use crate::expect::Expect;
use crate::pattern::{PatternValue, SinglePattern};
use crate::render::render;
use crate::report::prefixed;
use crate::value::Value;

/// Compare a candidate against a single pattern, key by key.
///
/// Keys are the union of the pattern's and the candidate's key sets. A key
/// the pattern omits is skipped when the candidate's value there is a
/// function, or when `partial` is set, so patterns may leave out methods
/// and, in partial mode, any extraneous field. The first failing key wins;
/// usage errors raised by a predicate propagate unchanged.
///
/// `path` is the access path of `candidate` itself ("" for the anonymous
/// comparisons inside the find-one and members strategies).
pub(crate) fn compare_single(
    candidate: &Value,
    pattern: &SinglePattern,
    partial: bool,
    path: &str,
    base_msg: Option<&str>,
) -> Result<()> {
    let Value::Object(fields) = candidate else {
        return Err(MatchError::mismatch(
            path,
            prefixed(
                base_msg,
                path,
                format!("expected {} to be an object", render(candidate)),
            ),
        ));
    };

    let missing = Value::Null;
    let mut keys: BTreeSet<&String> = pattern.keys().collect();
    keys.extend(fields.keys());

    for key in keys {
        let val = fields.get(key.as_str()).unwrap_or(&missing);

        let Some(expected) = pattern.get(key) else {
            if val.is_function() || partial {
                continue;
            }
            let key_path = join(path, key);
            let message = prefixed(
                base_msg,
                &key_path,
                format!("expected {} to be absent", render(val)),
            );
            return Err(MatchError::mismatch(key_path, message));
        };

        let key_path = join(path, key);
        match expected {
            PatternValue::Literal(lit) => {
                Expect::for_key(val, key_path, base_msg).deep_eq_ref(lit)?;
            }
            PatternValue::Nested(sub) => {
                compare_single(val, sub, false, &key_path, base_msg)?;
            }
            PatternValue::Predicate(p) => {
                p.invoke(&Expect::for_key(val, key_path, base_msg))?;
            }
        }
    }

    Ok(())
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}
