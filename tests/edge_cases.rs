use std::sync::Arc;

use uniconv::{
    Arithmetic, CaseMode, CheckOperation, CollectionCountComparison, CollectionLookup, Condition,
    ConverterBuilder, EnumType, Enumeration, Expression, ExpressionError, LookupOperation, Negate,
    NumberComparison, Output, RandomNumber, Rule, Scope, StringCheck, StringInterpolation,
    StringTransform, TrimMode, TypeRegistry, Value, ValueType,
};

fn arithmetic(f: impl FnOnce(&mut Arithmetic)) -> Expression {
    let mut a = Arithmetic::default();
    f(&mut a);
    a.into()
}

fn count_greater_than(n: f64) -> Expression {
    CollectionCountComparison(NumberComparison {
        is_greater_than: Some(n),
        ..NumberComparison::default()
    })
    .into()
}

#[test]
fn type_gated_rule_passes_strings_and_rejects_ints() {
    let rule = Rule::new().condition(ValueType::String);
    let mut scope = Scope::seeded(1);
    assert!(rule.check_value_match(&Value::from("abc"), &mut scope).unwrap());
    assert!(!rule.check_value_match(&Value::Int(5), &mut scope).unwrap());
    assert_eq!(rule.convert(&Value::from("abc"), &mut scope).unwrap(), Value::from("abc"));
}

#[test]
fn arithmetic_order_is_fixed() {
    let expr = arithmetic(|a| {
        a.add = Some(1.0);
        a.multiply = Some(2.0);
        a.subtract = Some(3.0);
        a.divide = Some(4.0);
        a.modulo = Some(5.0);
    });
    let mut scope = Scope::seeded(1);
    // ((10 * 2) / 4) % 5 + 1 - 3
    assert_eq!(expr.calculate(&Value::Int(10), &mut scope).unwrap(), Value::Float(-2.0));
}

#[test]
fn output_chain_applies_in_declaration_order() {
    let rule = Rule::new()
        .then(arithmetic(|a| a.multiply = Some(2.0)))
        .then(arithmetic(|a| a.add = Some(1.0)));
    let mut scope = Scope::seeded(1);
    assert_eq!(rule.convert(&Value::Int(3), &mut scope).unwrap(), Value::Float(7.0));

    let reversed = Rule::new()
        .then(arithmetic(|a| a.add = Some(1.0)))
        .then(arithmetic(|a| a.multiply = Some(2.0)));
    assert_eq!(reversed.convert(&Value::Int(3), &mut scope).unwrap(), Value::Float(8.0));
}

#[test]
fn singular_condition_ignores_list_entirely() {
    // The list alone would fail on an int: the string check rejects non-strings.
    let rule = Rule::new()
        .condition(ValueType::Int)
        .when(Expression::from(StringCheck::default()));
    let mut scope = Scope::seeded(1);
    assert!(rule.check_value_match(&Value::Int(1), &mut scope).unwrap());
}

#[test]
fn collection_count_comparison_on_lists_and_strings() {
    let rule = Rule::new().condition(count_greater_than(2.0));
    let mut scope = Scope::seeded(1);
    assert!(rule.check_value_match(&Value::from(vec![1_i64, 2, 3]), &mut scope).unwrap());
    assert!(!rule.check_value_match(&Value::from(vec![1_i64]), &mut scope).unwrap());
    assert!(rule.check_value_match(&Value::from("abc"), &mut scope).unwrap());
    assert!(matches!(
        rule.check_value_match(&Value::Int(5), &mut scope),
        Err(ExpressionError::TypeMismatch { .. })
    ));
}

#[test]
fn numeric_strings_coerce_before_length() {
    let gt = Expression::from(NumberComparison {
        is_greater_than: Some(10.0),
        ..NumberComparison::default()
    });
    let mut scope = Scope::seeded(1);
    assert_eq!(gt.calculate(&Value::from("12"), &mut scope).unwrap(), Value::Bool(true));
    // "abc" is not numeric and falls back to its length, 3.
    assert_eq!(gt.calculate(&Value::from("abc"), &mut scope).unwrap(), Value::Bool(false));
}

#[test]
fn negate_is_strict() {
    let mut scope = Scope::seeded(1);
    let negate = Expression::from(Negate);
    assert_eq!(negate.calculate(&Value::Bool(true), &mut scope).unwrap(), Value::Bool(false));
    assert_eq!(negate.calculate(&Value::from("2.5"), &mut scope).unwrap(), Value::Float(-2.5));
    assert!(negate.calculate(&Value::from("text"), &mut scope).is_err());
    assert!(negate.calculate(&Value::from(vec![1_i64]), &mut scope).is_err());
}

#[test]
fn nan_and_inf_are_words() {
    let mut scope = Scope::seeded(1);
    let negate = Expression::from(Negate);
    for word in ["nan", "inf", "Infinity"] {
        assert!(matches!(
            negate.calculate(&Value::from(word), &mut scope),
            Err(ExpressionError::TypeMismatch { .. })
        ));
    }
    let lt_four = Expression::from(NumberComparison {
        is_lesser_than: Some(4.0),
        ..NumberComparison::default()
    });
    assert_eq!(lt_four.calculate(&Value::from("inf"), &mut scope).unwrap(), Value::Bool(true));
    assert_eq!(lt_four.calculate(&Value::from("nan"), &mut scope).unwrap(), Value::Bool(true));
}

#[test]
fn string_pipeline_order() {
    let transform = Expression::from(StringTransform {
        trim: Some(TrimMode::Whole),
        substring_start: Some(0),
        substring_end: Some(5),
        insert_text: Some("<".into()),
        insert_index: Some(0),
        to_upper: Some(CaseMode::Default),
        split_by: Some("L".into()),
        ..StringTransform::default()
    });
    let mut scope = Scope::seeded(1);
    // trim -> "hello world", substring -> "hello", insert -> "<hello",
    // upper -> "<HELLO", split on "L" -> ["<HE", "", "O"]
    assert_eq!(
        transform.calculate(&Value::from("  hello world  "), &mut scope).unwrap(),
        Value::from(vec!["<HE", "", "O"])
    );
}

#[test]
fn first_match_wins_and_unmatched_pass_through() {
    let converter = ConverterBuilder::new()
        .rule(|r| r.named("blank").when(ValueType::String).when(Expression::from(StringCheck {
            check_operation: Some(CheckOperation::IsNullOrWhitespace),
            ..StringCheck::default()
        })).output(Value::from("(blank)")))
        .rule(|r| r.named("any string").when(ValueType::String).output(Value::from("text")))
        .rule(|r| r.named("null").condition(Value::Null).output(Value::from("(null)")))
        .build()
        .unwrap();

    let mut scope = Scope::seeded(1);
    assert_eq!(converter.convert(&Value::from(" "), &mut scope).unwrap(), Value::from("(blank)"));
    assert_eq!(converter.convert(&Value::from("hi"), &mut scope).unwrap(), Value::from("text"));
    assert_eq!(converter.convert(&Value::Null, &mut scope).unwrap(), Value::from("(null)"));
    assert_eq!(converter.convert(&Value::Float(1.5), &mut scope).unwrap(), Value::Float(1.5));

    let report = converter.convert_detailed(&Value::from("hi"), &mut scope).unwrap();
    assert_eq!(report.matched(), Some(1));
    assert_eq!(report.rule_name(), Some("any string"));
    assert_eq!(report.checked(), 2);
}

#[test]
fn errors_propagate_out_of_the_converter() {
    let converter = ConverterBuilder::new()
        .rule(|r| r.then(Expression::from(CollectionLookup {
            index: None,
            operation: LookupOperation::First,
        })))
        .build()
        .unwrap();
    let mut scope = Scope::seeded(1);
    assert!(matches!(
        converter.convert(&Value::List(vec![]), &mut scope),
        Err(ExpressionError::EmptySource { .. })
    ));
    assert_eq!(
        converter.convert(&Value::from("xyz"), &mut scope).unwrap(),
        Value::Char('x')
    );
}

#[test]
fn enum_conversion_through_a_registered_type() {
    let types = TypeRegistry::new().with_enum(
        EnumType::with_values("Perm", [("Read", 1), ("Write", 2), ("Exec", 4)]).flags(),
    );
    let mut scope = Scope::with_types(Arc::new(types)).reseed(1);
    let expr = Expression::from(Enumeration {
        type_name: Some("Perm".into()),
        ..Enumeration::default()
    });

    let read_write = expr.calculate(&Value::from("Read, Write"), &mut scope).unwrap();
    let Value::Enum(e) = &read_write else {
        panic!("expected an enum value, got {read_write:?}");
    };
    assert_eq!(e.value, 3);
    assert_eq!(expr.calculate(&Value::Int(4), &mut scope).unwrap().to_string(), "Exec");
    assert!(expr.calculate(&Value::from("Delete"), &mut scope).is_err());
}

#[test]
fn random_number_is_reproducible_with_a_seed() {
    let expr = Expression::from(RandomNumber {
        lower_bound: Some(1),
        upper_bound: Some(6),
    });
    let roll = |seed| {
        let mut scope = Scope::seeded(seed);
        (0..20)
            .map(|_| expr.calculate(&Value::Null, &mut scope).unwrap())
            .collect::<Vec<_>>()
    };
    let first = roll(7);
    assert_eq!(first, roll(7));
    assert!(first.iter().all(|v| matches!(v, Value::Int(1..=6))));
}

#[test]
fn interpolation_of_a_converted_list() {
    let rule = Rule::new()
        .when(ValueType::List)
        .output(Output::expression(StringInterpolation {
            template: Some("{0} + {1} = {2:F1}".into()),
        }));
    let mut scope = Scope::seeded(1);
    let input = Value::List(vec![Value::Int(1), Value::Int(2), Value::Float(3.0)]);
    assert_eq!(rule.convert(&input, &mut scope).unwrap(), Value::from("1 + 2 = 3.0"));
}

#[test]
fn non_condition_expression_in_a_handmade_rule_fails_at_evaluation() {
    let rule = Rule {
        conditions: vec![Condition::expression(Negate)],
        ..Rule::default()
    };
    let mut scope = Scope::seeded(1);
    assert_eq!(
        rule.check_value_match(&Value::Bool(true), &mut scope),
        Err(ExpressionError::NotACondition { expression: "negate" })
    );
}
