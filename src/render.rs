//! Rendering of values for failure messages.

use crate::value::Value;

/// Nesting depth below which structure is elided with `…` in messages.
const MAX_DEPTH: usize = 4;

/// Render a value on one line, truncating nested structure below a bounded
/// depth so failure messages stay readable.
pub fn render(value: &Value) -> String {
    let mut out = String::new();
    write_bounded(value, MAX_DEPTH, &mut out);
    out
}

fn write_bounded(value: &Value, depth: usize, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&render_number(*n)),
        Value::String(s) => {
            out.push('\'');
            out.push_str(s);
            out.push('\'');
        }
        Value::Func(_) => out.push_str("<function>"),
        Value::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
            } else if depth == 0 {
                out.push_str("[…]");
            } else {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_bounded(item, depth - 1, out);
                }
                out.push(']');
            }
        }
        Value::Object(fields) => {
            if fields.is_empty() {
                out.push_str("{}");
            } else if depth == 0 {
                out.push_str("{…}");
            } else {
                out.push_str("{ ");
                for (i, (key, val)) in fields.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(key);
                    out.push_str(": ");
                    write_bounded(val, depth - 1, out);
                }
                out.push_str(" }");
            }
        }
    }
}

/// Render a value over multiple indented lines, without depth truncation.
/// This is the form the diff writer works line by line over.
pub fn render_pretty(value: &Value) -> String {
    let mut out = String::new();
    write_pretty(value, 0, &mut out);
    out
}

fn write_pretty(value: &Value, indent: usize, out: &mut String) {
    match value {
        Value::Array(items) if !items.is_empty() => {
            out.push_str("[\n");
            for item in items {
                push_indent(indent + 1, out);
                write_pretty(item, indent + 1, out);
                out.push_str(",\n");
            }
            push_indent(indent, out);
            out.push(']');
        }
        Value::Object(fields) if !fields.is_empty() => {
            out.push_str("{\n");
            for (key, val) in fields {
                push_indent(indent + 1, out);
                out.push_str(key);
                out.push_str(": ");
                write_pretty(val, indent + 1, out);
                out.push_str(",\n");
            }
            push_indent(indent, out);
            out.push('}');
        }
        other => write_bounded(other, 1, out),
    }
}

fn push_indent(indent: usize, out: &mut String) {
    for _ in 0..indent {
        out.push_str("  ");
    }
}

fn render_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
