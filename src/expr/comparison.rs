use crate::types::{ExpressionError, Value};

use super::coerce::{collection_count, try_retrieve_number};

/// Compares a number against every configured bound and ANDs the results.
/// With no bounds configured every number matches.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "binary-cache",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct NumberComparison {
    pub is_equal_to: Option<f64>,
    pub is_not_equal_to: Option<f64>,
    pub is_greater_than: Option<f64>,
    pub is_greater_or_equal_to: Option<f64>,
    pub is_lesser_than: Option<f64>,
    pub is_lesser_or_equal_to: Option<f64>,
}

impl NumberComparison {
    pub(crate) const NAME: &'static str = "number comparison";

    pub(crate) fn calculate(&self, value: &Value) -> Result<Value, ExpressionError> {
        let n = try_retrieve_number(value).ok_or_else(|| ExpressionError::TypeMismatch {
            expression: Self::NAME,
            expected: "number",
            found: value.kind(),
        })?;
        Ok(Value::Bool(self.matches(n)))
    }

    #[allow(clippy::float_cmp)]
    pub(crate) fn matches(&self, n: f64) -> bool {
        self.is_equal_to.is_none_or(|b| n == b)
            && self.is_not_equal_to.is_none_or(|b| n != b)
            && self.is_greater_than.is_none_or(|b| n > b)
            && self.is_greater_or_equal_to.is_none_or(|b| n >= b)
            && self.is_lesser_than.is_none_or(|b| n < b)
            && self.is_lesser_or_equal_to.is_none_or(|b| n <= b)
    }
}

/// Applies a [`NumberComparison`] to the element count of a list or string.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "binary-cache",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct CollectionCountComparison(pub NumberComparison);

impl CollectionCountComparison {
    pub(crate) const NAME: &'static str = "collection count comparison";

    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn calculate(&self, value: &Value) -> Result<Value, ExpressionError> {
        let count = collection_count(value).ok_or_else(|| ExpressionError::TypeMismatch {
            expression: Self::NAME,
            expected: "collection",
            found: value.kind(),
        })?;
        Ok(Value::Bool(self.0.matches(count as f64)))
    }
}
