use criterion::{black_box, criterion_group, criterion_main, Criterion};
use uniconv::{Converter, ConverterBuilder, NumberComparison, Scope, Value, ValueType};

/// Build a converter with `n` int-band rules followed by a catch-all string
/// rule, so an input that falls through the bands checks every rule.
fn build_converter(n: usize) -> Converter {
    let mut builder = ConverterBuilder::new();
    for i in 0..n {
        #[allow(clippy::cast_precision_loss)]
        let lower = (i * 10) as f64;
        builder = builder.rule(move |r| {
            r.named(&format!("band{i}"))
                .when(ValueType::Int)
                .when(uniconv::Expression::from(NumberComparison {
                    is_greater_or_equal_to: Some(lower),
                    is_lesser_than: Some(lower + 10.0),
                    ..NumberComparison::default()
                }))
                .output(Value::from(format!("band {i}")))
        });
    }
    builder
        .rule(|r| r.named("text").when(ValueType::String).output(Value::from("text")))
        .build()
        .unwrap()
}

fn dsl_source(n: usize) -> String {
    let mut src = String::new();
    for i in 0..n {
        let lower = i * 10;
        src.push_str(&format!(
            "rule band{i}:\n  when type(int)\n  when compare(is_greater_or_equal_to = {lower}, is_lesser_than = {})\n  then arithmetic(subtract = {lower})\n  then format(template = \"+{{0:F0}}\")\n\n",
            lower + 10
        ));
    }
    src
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_convert");

    for &n in &[5, 20, 50] {
        let converter = build_converter(n);
        let mut scope = Scope::seeded(0);
        let first = Value::Int(3);
        let fallthrough = Value::Float(1.5);

        group.bench_function(&format!("{n}_rules_first_match"), |b| {
            b.iter(|| converter.convert(black_box(&first), &mut scope));
        });
        group.bench_function(&format!("{n}_rules_fallthrough"), |b| {
            b.iter(|| converter.convert(black_box(&fallthrough), &mut scope));
        });
        group.bench_function(&format!("{n}_rules_detailed"), |b| {
            b.iter(|| converter.convert_detailed(black_box(&fallthrough), &mut scope));
        });

        let chained = Converter::from_dsl(&dsl_source(n)).unwrap();
        #[allow(clippy::cast_possible_wrap)]
        let last_band = Value::Int((n as i64 - 1) * 10 + 5);
        group.bench_function(&format!("{n}_rules_chained_outputs"), |b| {
            b.iter(|| chained.convert(black_box(&last_band), &mut scope));
        });
    }

    group.finish();
}

fn bench_compilation(c: &mut Criterion) {
    let mut group = c.benchmark_group("compilation");

    for &n in &[5, 20, 50] {
        let src = dsl_source(n);
        group.bench_function(&format!("{n}_rules_dsl"), |b| {
            b.iter(|| black_box(Converter::from_dsl(black_box(&src)).unwrap()));
        });
        group.bench_function(&format!("{n}_rules_builder"), |b| {
            b.iter(|| black_box(build_converter(n)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_convert, bench_compilation);
criterion_main!(benches);
