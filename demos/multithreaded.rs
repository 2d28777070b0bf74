use std::sync::Arc;
use std::thread;

use uniconv::{Converter, Scope, Value};

fn main() {
    let converter = Arc::new(
        Converter::from_dsl(
            r#"
rule dice:
    when type(int)
    when compare(is_greater_than = 1)
    yield random(lower_bound = 1)

rule coin:
    yield random(lower_bound = 0, upper_bound = 1)
"#,
        )
        .expect("failed to compile converter"),
    );

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let conv = Arc::clone(&converter);
            thread::spawn(move || {
                // Each thread owns its scope and so its random sequence.
                let mut scope = Scope::seeded(i);
                let sides = Value::Int(6);
                let rolls: Vec<_> = (0..5)
                    .map(|_| conv.convert(&sides, &mut scope))
                    .collect();
                println!("Thread {i}: {rolls:?}");
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
