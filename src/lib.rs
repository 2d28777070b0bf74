//! A rule-based value conversion engine.
//!
//! A [`Converter`] holds an ordered list of [`Rule`]s. Each rule pairs one or
//! more [`Condition`]s with one or more [`Output`]s; the first rule whose
//! conditions match a [`Value`] produces the converted value, and a value no
//! rule matches passes through unchanged.
//!
//! Conditions and outputs are either literals, type checks, or configured
//! [`Expression`]s drawn from a fixed catalog (arithmetic, comparisons,
//! collection lookups, enum parsing, string checks and transforms, and so on).
//!
//! ```
//! use uniconv::{Converter, Scope, Value};
//!
//! let converter = Converter::from_dsl(r#"
//!     rule empty:
//!         when type(string)
//!         when check(operation = null_or_whitespace)
//!         yield "(blank)"
//!     rule big:
//!         when compare(is_greater_than = 1000)
//!         then percentage(of = 1000)
//!         then format(template = "{0:F1}x")
//! "#).unwrap();
//!
//! let mut scope = Scope::new();
//! assert_eq!(converter.convert(&Value::from("  "), &mut scope).unwrap(), Value::from("(blank)"));
//! assert_eq!(converter.convert(&Value::Int(2500), &mut scope).unwrap(), Value::from("250.0x"));
//! assert_eq!(converter.convert(&Value::Int(7), &mut scope).unwrap(), Value::Int(7));
//! ```

mod compile;
mod error;
mod evaluate;
mod expr;
pub mod parse;
#[cfg(feature = "binary-cache")]
pub mod serial;
mod types;

pub use error::UniconvError;
pub use expr::{
    Arithmetic, CaseMode, CheckOperation, CollectionCountComparison, CollectionLookup, Double,
    Enumeration, Expression, LookupOperation, Negate, NumberComparison, Percentage, RandomNumber,
    StringCheck, StringInterpolation, StringTransform, TrimMode, TypeOf, collection_count,
    try_retrieve_number, try_retrieve_type,
};
pub use parse::ParseError;
#[cfg(feature = "binary-cache")]
pub use serial::{DeserializeError, SerializeError};
pub use types::{
    Condition, ConversionReport, Converter, ConverterBuilder, DefinitionError, EnumType, EnumValue,
    ExpressionError, Output, Rule, Scope, TypeRegistry, Value, ValueType,
};
