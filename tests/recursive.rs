//! End-to-end tests of the recursive matching vocabulary.

use deepmatch::{expect, pred, Function, MatchContext, Mode, Pattern, SinglePattern, Value};
use serde_json::json;

fn val(json: serde_json::Value) -> Value {
    Value::from(json)
}

/// Add a callable member to a record.
fn with_method(mut value: Value, key: &str) -> Value {
    if let Value::Object(fields) = &mut value {
        fields.insert(
            key.to_string(),
            Value::Func(Function::new(|_| Value::Null)),
        );
    }
    value
}

fn sample_object() -> Value {
    let v = val(json!({
        "num1": 1,
        "num2": 2,
        "arr1": [1, 2, 3],
        "arr2": [{"id": 1}, {"id": 2}],
        "str1": "hello 1",
        "str2": "hello 2",
        "obj1": {"key": "a", "value": "A"},
        "obj2": {"key": "b", "value": "B"},
        "empty1": null,
    }));
    with_method(v, "method1")
}

fn sample_array() -> Value {
    let first = with_method(
        val(json!({
            "num": 1,
            "arr": [1, 2, 3],
            "str": "hello 1",
            "obj": {"key": "a", "value": "A"},
            "empty": null,
        })),
        "method",
    );
    let second = with_method(
        val(json!({
            "num": 2,
            "arr": [{"id": 1}, {"id": 2}],
            "str": "hello 2",
            "obj": {"key": "b", "value": "B"},
        })),
        "method",
    );
    Value::Array(vec![first, second])
}

#[test]
fn object_equals_pattern_with_predicates() {
    let value = sample_object();
    let pattern = SinglePattern::new()
        .with("num1", 1)
        .with("num2", pred(|e| e.gt(1)))
        .with("arr1", json!([1, 2, 3]))
        .with("arr2", pred(|e| e.contains(json!({"id": 2}))))
        .with("str1", "hello 1")
        .with("str2", pred(|e| e.matches("^hello")))
        .with("obj1", json!({"key": "a", "value": "A"}))
        .with(
            "obj2",
            pred(|e| {
                e.recursive().equal(
                    SinglePattern::new()
                        .with("key", "b")
                        .with("value", pred(|e| e.is_type("string"))),
                )
            }),
        )
        .with("empty1", json!(null));

    expect(&value).recursive().equal(pattern).unwrap();
}

#[test]
fn object_includes_pattern() {
    let value = sample_object();
    let pattern = SinglePattern::new().with(
        "obj2",
        pred(|e| {
            e.recursive()
                .include(SinglePattern::new().with("value", pred(|e| e.is_type("string"))))
        }),
    );
    expect(&value).recursive().include(pattern).unwrap();
}

#[test]
fn object_does_not_include_pattern() {
    let value = sample_object();
    let pattern = SinglePattern::new().with(
        "obj2",
        pred(|e| {
            e.recursive()
                .include(SinglePattern::new().with("value", pred(|e| e.is_type("number"))))
        }),
    );
    expect(&value).not().recursive().include(pattern).unwrap();
}

#[test]
fn nested_values_match_through_nested_predicates() {
    let value = val(json!({
        "obj1": {"a": "a", "b": {"c": "c"}},
        "obj2": {"a": 1, "b": {"c": 2}},
    }));
    let pattern = SinglePattern::new()
        .with(
            "obj1",
            pred(|e| {
                e.recursive().equal(
                    SinglePattern::new().with("a", "a").with(
                        "b",
                        pred(|e| e.recursive().equal(SinglePattern::new().with("c", "c"))),
                    ),
                )
            }),
        )
        .with(
            "obj2",
            pred(|e| {
                e.recursive().equal(
                    SinglePattern::new().with("a", 1).with(
                        "b",
                        pred(|e| {
                            e.recursive()
                                .equal(SinglePattern::new().with("c", pred(|e| e.gt(1))))
                        }),
                    ),
                )
            }),
        );
    expect(&value).recursive().equal(pattern).unwrap();
}

#[test]
fn object_does_not_equal_pattern() {
    let value = sample_object();
    let pattern = SinglePattern::new().with(
        "obj2",
        pred(|e| {
            e.recursive().equal(
                SinglePattern::new()
                    .with("key", "b")
                    .with("value", pred(|e| e.is_type("number"))),
            )
        }),
    );
    expect(&value).not().recursive().equal(pattern).unwrap();
}

#[test]
fn failure_message_carries_key_path() {
    let value = sample_object();
    let pattern = SinglePattern::new().with(
        "obj2",
        pred(|e| {
            e.recursive().equal(
                SinglePattern::new()
                    .with("key", "b")
                    .with("value", pred(|e| e.is_type("number"))),
            )
        }),
    );
    let err = expect(&value).recursive().include(pattern).unwrap_err();
    assert_eq!(err.path(), Some("root.obj2.value"));
    assert!(err.message().contains("(at root.obj2.value):"));
}

#[test]
fn failure_message_carries_custom_text() {
    let value = sample_object();
    let pattern = SinglePattern::new().with(
        "obj2",
        pred(|e| {
            e.recursive().equal(
                SinglePattern::new()
                    .with("key", "b")
                    .with("value", pred(|e| e.is_type("number"))),
            )
        }),
    );
    let err = expect(&value)
        .message("my text")
        .recursive()
        .include(pattern)
        .unwrap_err();
    assert!(err.message().contains("my text (at root.obj2.value):"));
}

#[test]
fn short_aliases() {
    let value = val(json!({"obj1": {"key": "a", "value": "A"}}));
    expect(&value)
        .rec()
        .eq(SinglePattern::new().with(
            "obj1",
            pred(|e| {
                e.rec().eq(SinglePattern::new()
                    .with("key", "a")
                    .with("value", pred(|e| e.is_type("string"))))
            }),
        ))
        .unwrap();
}

#[test]
fn array_equals_positional_pattern() {
    let value = sample_array();
    let pattern = vec![
        SinglePattern::new()
            .with("num", 1)
            .with("arr", json!([1, 2, 3]))
            .with("str", "hello 1")
            .with("obj", json!({"key": "a", "value": "A"}))
            .with("empty", json!(null)),
        SinglePattern::new()
            .with("num", pred(|e| e.gt(1)))
            .with("arr", pred(|e| e.contains(json!({"id": 2}))))
            .with("str", pred(|e| e.matches("^hello")))
            .with(
                "obj",
                pred(|e| {
                    e.recursive().equal(
                        SinglePattern::new()
                            .with("key", "b")
                            .with("value", pred(|e| e.is_type("string"))),
                    )
                }),
            ),
    ];
    expect(&value).recursive().equal(pattern).unwrap();
}

#[test]
fn array_includes_matching_member() {
    let value = sample_array();
    let pattern = SinglePattern::new().with(
        "obj",
        pred(|e| {
            e.recursive()
                .include(SinglePattern::new().with("value", pred(|e| e.is_type("string"))))
        }),
    );
    expect(&value).recursive().include(pattern).unwrap();
}

#[test]
fn array_does_not_equal_partial_positional_pattern() {
    let value = sample_array();
    let pattern = vec![
        SinglePattern::new().with("num", 1),
        SinglePattern::new().with("num", pred(|e| e.gt(1))),
    ];
    expect(&value).not().recursive().equal(pattern).unwrap();
}

#[test]
fn array_does_not_include_pattern() {
    let value = sample_array();
    let pattern = SinglePattern::new().with("num", pred(|e| e.gt(10)));
    expect(&value).not().recursive().include(pattern).unwrap();
}

#[test]
fn have_finds_exactly_matching_member() {
    let value = val(json!([{"n": 1, "x": true}, {"n": 2}]));
    expect(&value)
        .recursive()
        .have(SinglePattern::new().with("n", 2))
        .unwrap();
    expect(&value)
        .not()
        .recursive()
        .have(SinglePattern::new().with("n", 1))
        .unwrap();
}

#[test]
fn members_modes_assign_distinct_members() {
    let value = val(json!([{"n": 1, "x": 1}, {"n": 1, "x": 2}]));
    expect(&value)
        .recursive()
        .include_members(vec![
            SinglePattern::new().with("n", 1),
            SinglePattern::new().with("n", 1),
        ])
        .unwrap();
    expect(&value)
        .recursive()
        .have_members(vec![
            SinglePattern::new().with("n", 1).with("x", 2),
            SinglePattern::new().with("n", 1).with("x", 1),
        ])
        .unwrap();
}

// The worked examples from the engine's design discussion.

#[test]
fn example_equal_with_nested_recursive_predicate() {
    let value = val(json!({"num": 1, "obj": {"k": "a"}}));
    let pattern = SinglePattern::new().with("num", 1).with(
        "obj",
        pred(|e| e.recursive().equal(SinglePattern::new().with("k", "a"))),
    );
    expect(&value).recursive().equal(pattern).unwrap();
}

#[test]
fn example_positional_failure_path() {
    let value = val(json!([{"id": 1}, {"id": 2}]));
    let pattern = vec![
        SinglePattern::new().with("id", 1),
        SinglePattern::new().with("id", 3),
    ];
    let err = expect(&value).recursive().equal(pattern).unwrap_err();
    assert_eq!(err.path(), Some("root[1].id"));
}

#[test]
fn example_members_exhausted_by_greedy_assignment() {
    let value = val(json!([{"n": 1}, {"n": 2}]));
    let err = expect(&value)
        .recursive()
        .have_members(vec![
            SinglePattern::new().with("n", 1),
            SinglePattern::new().with("n", 1),
        ])
        .unwrap_err();
    assert!(err.is_mismatch());
}

#[test]
fn example_callable_key_skipped_by_include() {
    let value = with_method(val(json!({"a": 1})), "fn");
    expect(&value)
        .recursive()
        .include(SinglePattern::new().with("a", 1))
        .unwrap();
}

#[test]
fn example_negated_include_message() {
    let value = val(json!({"a": 1, "b": 2}));
    let err = expect(&value)
        .not()
        .recursive()
        .include(SinglePattern::new().with("a", 1))
        .unwrap_err();
    assert!(err
        .message()
        .contains("to not recursively include the pattern"));
}

#[test]
fn predicate_can_inspect_the_raw_value() {
    let value = val(json!({"arr": [1, 2, 3]}));
    let pattern = SinglePattern::new().with(
        "arr",
        pred(|e| match e.value() {
            Value::Array(items) if items.len() == 3 => Ok(()),
            _ => e.fail("expected three items"),
        }),
    );
    expect(&value).recursive().equal(pattern).unwrap();
}

// Properties.

#[test]
fn property_exact_mode_idempotence() {
    let value = sample_object();
    let Value::Object(fields) = &value else {
        unreachable!()
    };
    let mut pattern = SinglePattern::new();
    for (key, field) in fields {
        pattern.insert(key.clone(), field.clone());
    }
    expect(&value).recursive().equal(pattern).unwrap();
}

#[test]
fn property_partial_mode_monotonicity() {
    let value = sample_object();
    let full = SinglePattern::new()
        .with("num1", 1)
        .with("str1", "hello 1")
        .with("obj1", json!({"key": "a", "value": "A"}));
    expect(&value).recursive().include(full).unwrap();

    let subset = SinglePattern::new().with("num1", 1).with("str1", "hello 1");
    expect(&value).recursive().include(subset).unwrap();
    expect(&value)
        .recursive()
        .include(SinglePattern::new().with("num1", 1))
        .unwrap();
}

#[test]
fn property_negation_inversion() {
    let record = val(json!({"a": 1, "b": {"c": 2}}));
    let sequence = val(json!([{"a": 1}, {"a": 2}]));

    let cases: Vec<(&Value, Pattern, Mode)> = vec![
        (&record, Pattern::from(SinglePattern::new().with("a", 1)), Mode::Include),
        (&record, Pattern::from(SinglePattern::new().with("a", 2)), Mode::Include),
        (
            &record,
            Pattern::from(
                SinglePattern::new()
                    .with("a", 1)
                    .with("b", json!({"c": 2})),
            ),
            Mode::Equal,
        ),
        (&record, Pattern::from(SinglePattern::new().with("a", 1)), Mode::Equal),
        (&sequence, Pattern::from(SinglePattern::new().with("a", 2)), Mode::Include),
        (&sequence, Pattern::from(SinglePattern::new().with("a", 3)), Mode::Have),
        (
            &sequence,
            Pattern::from(vec![
                SinglePattern::new().with("a", 1),
                SinglePattern::new().with("a", 2),
            ]),
            Mode::Equal,
        ),
        (
            &sequence,
            Pattern::from(vec![SinglePattern::new().with("a", 1)]),
            Mode::Equal,
        ),
        (
            &sequence,
            Pattern::from(vec![
                SinglePattern::new().with("a", 2),
                SinglePattern::new().with("a", 1),
            ]),
            Mode::IncludeMembers,
        ),
        (
            &sequence,
            Pattern::from(vec![
                SinglePattern::new().with("a", 1),
                SinglePattern::new().with("a", 1),
            ]),
            Mode::HaveMembers,
        ),
    ];

    for (i, (value, pattern, mode)) in cases.iter().enumerate() {
        let normal = deepmatch::match_pattern(value, pattern, *mode, &MatchContext::new());
        let negated =
            deepmatch::match_pattern(value, pattern, *mode, &MatchContext::new().negated());
        assert!(
            normal.is_ok() != negated.is_ok(),
            "case {}: normal={:?} negated={:?}",
            i,
            normal,
            negated
        );
    }
}

#[test]
fn property_failure_path_through_index_and_keys() {
    let value = val(json!([{}, {}, {"a": {"b": 1}}]));
    let pattern = vec![
        SinglePattern::new(),
        SinglePattern::new(),
        SinglePattern::new().with("a", SinglePattern::new().with("b", 2)),
    ];
    let err = expect(&value).recursive().equal(pattern).unwrap_err();
    assert_eq!(err.path(), Some("root[2].a.b"));
}

#[test]
fn usage_errors_are_not_inverted() {
    let value = val(json!({"a": 1}));
    let err = expect(&value)
        .not()
        .recursive()
        .include_members(vec![SinglePattern::new().with("a", 1)])
        .unwrap_err();
    assert!(err.is_usage());
}
