use crate::types::{ExpressionError, Value};

use super::coerce::{try_parse_number, try_retrieve_number};

/// Produces a float: the configured constant, or the input coerced to a number.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "binary-cache",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Double {
    pub value: Option<f64>,
}

impl Double {
    pub(crate) const NAME: &'static str = "double";

    pub(crate) fn calculate(&self, value: &Value) -> Result<Value, ExpressionError> {
        if let Some(v) = self.value {
            return Ok(Value::Float(v));
        }
        try_retrieve_number(value)
            .map(Value::Float)
            .ok_or_else(|| ExpressionError::Unparsable {
                expression: Self::NAME,
                input: value.to_string(),
                target: "number".to_owned(),
            })
    }
}

/// Logical negation of a bool, or arithmetic negation of a number.
///
/// Numbers always come back as floats. Unlike most kinds this one does not fall
/// back to string length or collection count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "binary-cache",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Negate;

impl Negate {
    pub(crate) const NAME: &'static str = "negate";

    pub(crate) fn calculate(self, value: &Value) -> Result<Value, ExpressionError> {
        if let Value::Bool(b) = value {
            return Ok(Value::Bool(!b));
        }
        try_parse_number(value)
            .map(|n| Value::Float(-n))
            .ok_or_else(|| ExpressionError::TypeMismatch {
                expression: Self::NAME,
                expected: "bool or number",
                found: value.kind(),
            })
    }
}

/// `number * 100 / of`, with `of` defaulting to 1.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "binary-cache",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Percentage {
    pub of: Option<f64>,
}

impl Percentage {
    pub(crate) const NAME: &'static str = "percentage";

    pub(crate) fn calculate(&self, value: &Value) -> Result<Value, ExpressionError> {
        let n = try_retrieve_number(value).ok_or_else(|| ExpressionError::TypeMismatch {
            expression: Self::NAME,
            expected: "number",
            found: value.kind(),
        })?;
        Ok(Value::Float(n * 100.0 / self.of.unwrap_or(1.0)))
    }
}
