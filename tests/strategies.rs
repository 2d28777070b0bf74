#![allow(dead_code)]

use proptest::prelude::*;
use uniconv::{
    Arithmetic, CollectionCountComparison, Condition, Converter, ConverterBuilder,
    NumberComparison, Output, Rule, StringCheck, Value, ValueType,
};

// --- Value shapes ---
// Ints and floats stay in a modest range so arithmetic stays finite.

/// Generate a string that never parses as a number. Words such as "nan"
/// and "inf" are included on purpose.
pub fn arb_word() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-z ]{0,8}",
        1 => prop::sample::select(vec!["nan", "inf", "Infinity", "NaN"]).prop_map(str::to_owned),
    ]
}

/// Generate a scalar `Value` of any shape except lists.
pub fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1_000_i64..=1_000).prop_map(Value::Int),
        (-1_000.0_f64..1_000.0).prop_map(Value::Float),
        arb_word().prop_map(Value::String),
        (-1_000_i64..=1_000).prop_map(|n| Value::String(n.to_string())),
    ]
}

/// Generate any `Value`, lists nested at most one level deep.
pub fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => arb_scalar(),
        1 => prop::collection::vec(arb_scalar(), 0..5).prop_map(Value::List),
    ]
}

/// Generate a value `try_retrieve_number` accepts.
pub fn arb_numeric() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-1_000_i64..=1_000).prop_map(Value::Int),
        (-1_000.0_f64..1_000.0).prop_map(Value::Float),
        (-1_000_i64..=1_000).prop_map(|n| Value::String(n.to_string())),
        prop::collection::vec(arb_scalar(), 0..5).prop_map(Value::List),
    ]
}

fn arb_bound() -> impl Strategy<Value = Option<f64>> {
    prop::option::of((-50_i32..=50).prop_map(f64::from))
}

pub fn arb_number_comparison() -> impl Strategy<Value = NumberComparison> {
    (arb_bound(), arb_bound(), arb_bound(), arb_bound(), arb_bound(), arb_bound()).prop_map(
        |(eq, ne, gt, ge, lt, le)| NumberComparison {
            is_equal_to: eq,
            is_not_equal_to: ne,
            is_greater_than: gt,
            is_greater_or_equal_to: ge,
            is_lesser_than: lt,
            is_lesser_or_equal_to: le,
        },
    )
}

pub fn arb_arithmetic() -> impl Strategy<Value = Arithmetic> {
    let nonzero = prop::option::of((1_i32..=20).prop_map(f64::from));
    (arb_bound(), nonzero.clone(), nonzero, arb_bound(), arb_bound()).prop_map(
        |(multiply, divide, modulo, add, subtract)| Arithmetic {
            multiply,
            divide,
            modulo,
            add,
            subtract,
        },
    )
}

/// A condition that is total over `arb_value()`: type checks and literals
/// never fail, and expression conditions are gated behind a type check.
fn arb_safe_conditions() -> impl Strategy<Value = Vec<Condition>> {
    prop_oneof![
        Just(vec![]),
        prop_oneof![
            Just(ValueType::Int),
            Just(ValueType::Float),
            Just(ValueType::String),
            Just(ValueType::List),
            Just(ValueType::Bool),
        ]
        .prop_map(|t| vec![Condition::from(t)]),
        arb_scalar().prop_map(|v| vec![Condition::from(v)]),
        arb_number_comparison().prop_map(|c| {
            vec![Condition::from(ValueType::Int), Condition::expression(c)]
        }),
        arb_number_comparison().prop_map(|c| {
            vec![
                Condition::from(ValueType::List),
                Condition::expression(CollectionCountComparison(c)),
            ]
        }),
        Just(vec![
            Condition::from(ValueType::String),
            Condition::expression(StringCheck::default()),
        ]),
    ]
}

/// Generate a converter whose rules never raise errors: every output is a
/// literal, so evaluation outcomes depend only on which rule matches.
pub fn arb_total_converter() -> impl Strategy<Value = Converter> {
    prop::collection::vec((arb_safe_conditions(), arb_scalar()), 0..6).prop_map(|rules| {
        rules
            .into_iter()
            .enumerate()
            .fold(ConverterBuilder::new(), |builder, (i, (conditions, output))| {
                let mut rule = Rule::new()
                    .named(&format!("rule_{i}"))
                    .output(Output::Literal(output));
                rule.conditions = conditions;
                builder.push(rule)
            })
            .build()
            .expect("generated converter should build")
    })
}
