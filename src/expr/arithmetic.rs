use crate::types::{ExpressionError, Value};

use super::coerce::try_retrieve_number;

/// Applies the configured operators to a number, always in the order
/// multiply, divide, modulo, add, subtract. Absent operators are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "binary-cache",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Arithmetic {
    pub multiply: Option<f64>,
    pub divide: Option<f64>,
    pub modulo: Option<f64>,
    pub add: Option<f64>,
    pub subtract: Option<f64>,
}

impl Arithmetic {
    pub(crate) const NAME: &'static str = "arithmetic";

    pub(crate) fn calculate(&self, value: &Value) -> Result<Value, ExpressionError> {
        let mut n = try_retrieve_number(value).ok_or_else(|| ExpressionError::TypeMismatch {
            expression: Self::NAME,
            expected: "number",
            found: value.kind(),
        })?;
        if let Some(m) = self.multiply {
            n *= m;
        }
        if let Some(d) = self.divide {
            n /= d;
        }
        if let Some(m) = self.modulo {
            n %= m;
        }
        if let Some(a) = self.add {
            n += a;
        }
        if let Some(s) = self.subtract {
            n -= s;
        }
        Ok(Value::Float(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_apply_in_fixed_order() {
        let expr = Arithmetic {
            multiply: Some(2.0),
            add: Some(1.0),
            divide: Some(4.0),
            ..Arithmetic::default()
        };
        // ((3 * 2) / 4) + 1
        assert_eq!(expr.calculate(&Value::Int(3)), Ok(Value::Float(2.5)));
    }

    #[test]
    fn modulo_before_add_and_subtract() {
        let expr = Arithmetic {
            modulo: Some(4.0),
            add: Some(10.0),
            subtract: Some(1.0),
            ..Arithmetic::default()
        };
        assert_eq!(expr.calculate(&Value::Int(11)), Ok(Value::Float(12.0)));
    }

    #[test]
    fn no_operators_returns_number_as_float() {
        assert_eq!(
            Arithmetic::default().calculate(&Value::from("7")),
            Ok(Value::Float(7.0))
        );
    }

    #[test]
    fn collection_input_uses_count() {
        let expr = Arithmetic {
            multiply: Some(10.0),
            ..Arithmetic::default()
        };
        assert_eq!(
            expr.calculate(&Value::from(vec![1_i64, 2, 3])),
            Ok(Value::Float(30.0))
        );
    }

    #[test]
    fn division_by_zero_follows_float_semantics() {
        let expr = Arithmetic {
            divide: Some(0.0),
            ..Arithmetic::default()
        };
        assert_eq!(expr.calculate(&Value::Int(1)), Ok(Value::Float(f64::INFINITY)));
    }

    #[test]
    fn non_numeric_input_fails() {
        let err = Arithmetic::default().calculate(&Value::Bool(true)).unwrap_err();
        assert!(matches!(err, ExpressionError::TypeMismatch { found, .. } if found == "bool"));
    }
}
