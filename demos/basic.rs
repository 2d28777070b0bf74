use uniconv::{
    Arithmetic, CheckOperation, ConverterBuilder, Expression, Scope, StringCheck,
    StringInterpolation, Value, ValueType,
};

fn main() {
    // Define rules; the first one that matches converts the value.
    let converter = ConverterBuilder::new()
        .rule(|r| {
            r.named("blank")
                .when(ValueType::String)
                .when(Expression::from(StringCheck {
                    check_operation: Some(CheckOperation::IsNullOrWhitespace),
                    ..StringCheck::default()
                }))
                .output(Value::from("(blank)"))
        })
        .rule(|r| {
            r.named("celsius")
                .when(ValueType::Int)
                .then(Expression::from(Arithmetic {
                    multiply: Some(1.8),
                    add: Some(32.0),
                    ..Arithmetic::default()
                }))
                .then(Expression::from(StringInterpolation {
                    template: Some("{0:F1} °F".into()),
                }))
        })
        .build()
        .expect("failed to build converter");

    println!("{converter}");

    let mut scope = Scope::new();
    for value in [Value::from("   "), Value::Int(21), Value::Bool(true)] {
        match converter.convert(&value, &mut scope) {
            Ok(converted) => println!("{value:?} -> {converted:?}"),
            Err(err) => println!("{value:?} failed: {err}"),
        }
    }
}
