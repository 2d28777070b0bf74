use rand::Rng;

use crate::types::{ExpressionError, Scope, Value};

use super::coerce::try_parse_int;

const DEFAULT_LOWER: i64 = 0;
const DEFAULT_UPPER: i64 = 1;

/// Draws an integer in `[lower, upper]` from the scope's generator.
///
/// Bounds resolve in order:
/// 1. both bounds configured: use them;
/// 2. the input reads as an integer: it fills whichever bound is missing
///    (the upper one when neither is configured, with lower 0);
/// 3. otherwise: configured bounds, defaulting to `[0, 1]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "binary-cache",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct RandomNumber {
    pub lower_bound: Option<i64>,
    pub upper_bound: Option<i64>,
}

impl RandomNumber {
    pub(crate) const NAME: &'static str = "random number";

    pub(crate) fn bounds(&self, value: &Value) -> (i64, i64) {
        match (self.lower_bound, self.upper_bound, try_parse_int(value)) {
            (Some(lower), Some(upper), _) => (lower, upper),
            (Some(lower), None, Some(input)) => (lower, input),
            (None, Some(upper), Some(input)) => (input, upper),
            (None, None, Some(input)) => (DEFAULT_LOWER, input),
            (lower, upper, None) => (
                lower.unwrap_or(DEFAULT_LOWER),
                upper.unwrap_or(DEFAULT_UPPER),
            ),
        }
    }

    pub(crate) fn calculate(&self, value: &Value, scope: &mut Scope) -> Result<Value, ExpressionError> {
        let (lower, upper) = self.bounds(value);
        if lower > upper {
            return Err(ExpressionError::InvalidRange {
                expression: Self::NAME,
                lower,
                upper,
            });
        }
        Ok(Value::Int(scope.rng().gen_range(lower..=upper)))
    }
}
