//! The data model matched against: JSON-like values plus callables.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// A structured value under test.
///
/// Records are string-keyed ordered maps, sequences are vectors, and
/// [`Func`] models a record member that is a method: it can be called, it
/// compares by identity, and the comparator skips it when the pattern does
/// not mention its key.
///
/// [`Func`]: Value::Func
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
    Func(Function),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Func(_) => "function",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Value::Func(_))
    }

    /// Build a record from key/value pairs.
    ///
    /// # Example
    ///
    /// ```
    /// use deepmatch::Value;
    ///
    /// let v = Value::record([("num", Value::from(1)), ("str", Value::from("a"))]);
    /// assert_eq!(v.type_name(), "object");
    /// ```
    pub fn record<K, V, I>(pairs: I) -> Value
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Object(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => (a - b).abs() < f64::EPSILON,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Func(a), Value::Func(b)) => a == b,
            _ => false,
        }
    }
}

/// A callable record member, compared by identity.
#[derive(Clone)]
pub struct Function(Rc<dyn Fn(&[Value]) -> Value>);

impl Function {
    pub fn new(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Function(Rc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function>")
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Value {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Value {
        Value::Number(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Value {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Value {
        Value::Array(items)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Value {
        Value::Func(f)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deep_equality() {
        let a = Value::from(json!({"num": 1, "arr": [1, 2], "obj": {"k": "a"}}));
        let b = Value::from(json!({"num": 1, "arr": [1, 2], "obj": {"k": "a"}}));
        assert_eq!(a, b);
    }

    #[test]
    fn test_inequality_on_nested_leaf() {
        let a = Value::from(json!({"obj": {"k": "a"}}));
        let b = Value::from(json!({"obj": {"k": "b"}}));
        assert_ne!(a, b);
    }

    #[test]
    fn test_number_epsilon_comparison() {
        assert_eq!(Value::Number(0.1 + 0.2), Value::Number(0.3));
        assert_ne!(Value::Number(1.0), Value::Number(1.1));
    }

    #[test]
    fn test_cross_type_inequality() {
        assert_ne!(Value::Number(0.0), Value::Null);
        assert_ne!(Value::from("1"), Value::from(1));
    }

    #[test]
    fn test_function_identity() {
        let f = Function::new(|_| Value::Null);
        let g = Function::new(|_| Value::Null);
        assert_eq!(Value::Func(f.clone()), Value::Func(f.clone()));
        assert_ne!(Value::Func(f), Value::Func(g));
    }

    #[test]
    fn test_function_call() {
        let f = Function::new(|args| Value::Number(args.len() as f64));
        assert_eq!(f.call(&[Value::Null]), Value::Number(1.0));
    }

    #[test]
    fn test_json_conversion() {
        let v = Value::from(json!({"a": [1, "x", null, true]}));
        let expected = Value::record([(
            "a",
            Value::Array(vec![
                Value::from(1),
                Value::from("x"),
                Value::Null,
                Value::from(true),
            ]),
        )]);
        assert_eq!(v, expected);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::from(1).type_name(), "number");
        assert_eq!(Value::from("s").type_name(), "string");
        assert_eq!(Value::Array(vec![]).type_name(), "array");
        assert_eq!(Value::record::<&str, Value, _>([]).type_name(), "object");
        assert_eq!(
            Value::Func(Function::new(|_| Value::Null)).type_name(),
            "function"
        );
    }
}
