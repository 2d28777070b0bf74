use tracing_subscriber::EnvFilter;
use uniconv::{Converter, Scope, Value};

fn main() {
    // RUST_LOG=uniconv=trace shows every rule checked and output applied.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/sizes.ucnv");
    let converter = Converter::from_file(path).expect("failed to load rules");

    println!("{converter}");

    let mut scope = Scope::new();
    for value in [Value::Null, Value::Int(512), Value::Int(4096), Value::Int(5_000_000)] {
        match converter.convert(&value, &mut scope) {
            Ok(converted) => println!("{value:?} -> {converted}"),
            Err(err) => println!("{value:?} failed: {err}"),
        }
    }
}
