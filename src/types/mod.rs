mod conversion_report;
mod converter;
mod error;
mod rule;
mod scope;
mod type_registry;
mod value;

pub use conversion_report::ConversionReport;
pub use converter::{Converter, ConverterBuilder};
pub use error::{DefinitionError, ExpressionError};
pub use rule::{Condition, Output, Rule};
pub use scope::Scope;
pub use type_registry::{EnumType, TypeRegistry};
pub use value::{EnumValue, Value, ValueType};
