use tracing_subscriber::EnvFilter;
use uniconv::{Converter, Scope, Value};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let converter = Converter::from_dsl(
        r#"
rule empty:
    when type(list)
    when count(is_equal_to = 0)
    yield "nothing"

rule largest:
    when type(list)
    then lookup(operation = max)
    then format(template = "max is {0}")

rule shout:
    when type(string)
    then transform(trim = whole, to_upper = default)
"#,
    )
    .expect("failed to compile converter");

    let mut scope = Scope::new();
    for value in [
        Value::List(vec![]),
        Value::from(vec![4_i64, 11, 7]),
        Value::from(" quiet "),
        Value::Float(2.5),
    ] {
        let report = converter
            .convert_detailed(&value, &mut scope)
            .expect("conversion failed");
        println!("{value:?}: {report}");
    }
}
