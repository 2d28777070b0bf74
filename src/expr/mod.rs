//! Expression kinds: stateless value transformers used as rule conditions and outputs.

mod arithmetic;
mod coerce;
mod collection;
mod comparison;
mod enumeration;
mod format;
mod number;
mod random;
mod string;

use std::fmt;

use crate::types::{ExpressionError, Scope, Value};

pub use arithmetic::Arithmetic;
pub use coerce::{collection_count, try_retrieve_number, try_retrieve_type};
pub use collection::{CollectionLookup, LookupOperation};
pub use comparison::{CollectionCountComparison, NumberComparison};
pub use enumeration::{Enumeration, TypeOf};
pub use format::StringInterpolation;
pub use number::{Double, Negate, Percentage};
pub use random::RandomNumber;
pub use string::{CaseMode, CheckOperation, StringCheck, StringTransform, TrimMode};

/// A configured expression of one of the fixed kinds.
///
/// Condition expressions (`NumberComparison`, `CollectionCountComparison`,
/// `StringCheck`) produce booleans and may gate a rule. Every kind may be used
/// as an output.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "binary-cache",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum Expression {
    Arithmetic(Arithmetic),
    NumberComparison(NumberComparison),
    CollectionCountComparison(CollectionCountComparison),
    CollectionLookup(CollectionLookup),
    Double(Double),
    Enumeration(Enumeration),
    Negate(Negate),
    Percentage(Percentage),
    RandomNumber(RandomNumber),
    StringCheck(StringCheck),
    StringInterpolation(StringInterpolation),
    StringTransform(StringTransform),
    TypeOf(TypeOf),
}

impl Expression {
    /// Whether this kind produces a boolean suitable for gating a rule.
    #[must_use]
    pub fn is_condition(&self) -> bool {
        matches!(
            self,
            Expression::NumberComparison(_)
                | Expression::CollectionCountComparison(_)
                | Expression::StringCheck(_)
        )
    }

    /// Human-readable name of the expression kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Expression::Arithmetic(_) => Arithmetic::NAME,
            Expression::NumberComparison(_) => NumberComparison::NAME,
            Expression::CollectionCountComparison(_) => CollectionCountComparison::NAME,
            Expression::CollectionLookup(_) => CollectionLookup::NAME,
            Expression::Double(_) => Double::NAME,
            Expression::Enumeration(_) => Enumeration::NAME,
            Expression::Negate(_) => Negate::NAME,
            Expression::Percentage(_) => Percentage::NAME,
            Expression::RandomNumber(_) => RandomNumber::NAME,
            Expression::StringCheck(_) => StringCheck::NAME,
            Expression::StringInterpolation(_) => StringInterpolation::NAME,
            Expression::StringTransform(_) => StringTransform::NAME,
            Expression::TypeOf(_) => TypeOf::NAME,
        }
    }

    /// Evaluate against `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError`] when the input cannot be coerced into the shape
    /// this kind requires, or when the expression lacks required configuration.
    pub fn calculate(&self, value: &Value, scope: &mut Scope) -> Result<Value, ExpressionError> {
        match self {
            Expression::Arithmetic(e) => e.calculate(value),
            Expression::NumberComparison(e) => e.calculate(value),
            Expression::CollectionCountComparison(e) => e.calculate(value),
            Expression::CollectionLookup(e) => e.calculate(value),
            Expression::Double(e) => e.calculate(value),
            Expression::Enumeration(e) => e.calculate(value, scope),
            Expression::Negate(e) => e.calculate(value),
            Expression::Percentage(e) => e.calculate(value),
            Expression::RandomNumber(e) => e.calculate(value, scope),
            Expression::StringCheck(e) => e.calculate(value),
            Expression::StringInterpolation(e) => e.calculate(value),
            Expression::StringTransform(e) => e.calculate(value),
            Expression::TypeOf(e) => e.calculate(scope),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

macro_rules! impl_from_kind {
    ($($kind:ident),* $(,)?) => {
        $(
            impl From<$kind> for Expression {
                fn from(e: $kind) -> Self {
                    Expression::$kind(e)
                }
            }
        )*
    };
}

impl_from_kind!(
    Arithmetic,
    NumberComparison,
    CollectionCountComparison,
    CollectionLookup,
    Double,
    Enumeration,
    Negate,
    Percentage,
    RandomNumber,
    StringCheck,
    StringInterpolation,
    StringTransform,
    TypeOf,
);
