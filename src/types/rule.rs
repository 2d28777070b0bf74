use std::fmt;

#[cfg(feature = "binary-cache")]
use serde::{Deserialize, Serialize};

use super::error::ExpressionError;
use super::scope::Scope;
use super::value::{Value, ValueType};
use crate::expr::Expression;

/// A criterion deciding whether a rule applies to a value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "binary-cache", derive(Serialize, Deserialize))]
pub enum Condition {
    /// Matches values structurally equal to this one. `Literal(Value::Null)` matches null.
    Literal(Value),
    /// Matches values whose runtime type is exactly this type.
    Type(ValueType),
    /// Matches when the expression returns exactly `Bool(true)`. The expression
    /// must be a condition expression.
    Expression(Expression),
}

impl Condition {
    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Condition::Literal(value.into())
    }

    #[must_use]
    pub fn expression(expr: impl Into<Expression>) -> Self {
        Condition::Expression(expr.into())
    }
}

impl From<Value> for Condition {
    fn from(v: Value) -> Self {
        Condition::Literal(v)
    }
}

impl From<ValueType> for Condition {
    fn from(t: ValueType) -> Self {
        Condition::Type(t)
    }
}

impl From<Expression> for Condition {
    fn from(e: Expression) -> Self {
        Condition::Expression(e)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Literal(v) => write!(f, "== {v:?}"),
            Condition::Type(t) => write!(f, "type({t})"),
            Condition::Expression(e) => write!(f, "{e}"),
        }
    }
}

/// The production a rule emits once matched.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "binary-cache", derive(Serialize, Deserialize))]
pub enum Output {
    /// Returned verbatim, ignoring the processed value.
    Literal(Value),
    /// Applied to the processed value. Any expression kind is allowed here.
    Expression(Expression),
}

impl Output {
    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Output::Literal(value.into())
    }

    #[must_use]
    pub fn expression(expr: impl Into<Expression>) -> Self {
        Output::Expression(expr.into())
    }
}

impl From<Value> for Output {
    fn from(v: Value) -> Self {
        Output::Literal(v)
    }
}

impl From<Expression> for Output {
    fn from(e: Expression) -> Self {
        Output::Expression(e)
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Literal(v) => write!(f, "{v:?}"),
            Output::Expression(e) => write!(f, "{e}"),
        }
    }
}

/// One "if condition then output" conversion rule.
///
/// The singular `condition` slot, when set, is the only thing checked and
/// `conditions` is ignored entirely; otherwise every entry of `conditions` must
/// match. Likewise a set `output` replaces `outputs`, which otherwise are applied
/// in order, each consuming the previous result.
///
/// ```
/// use uniconv::{Arithmetic, Expression, Rule, Scope, Value, ValueType};
///
/// let rule = Rule::new()
///     .when(ValueType::Int)
///     .then(Expression::from(Arithmetic { multiply: Some(2.0), ..Default::default() }))
///     .then(Expression::from(Arithmetic { add: Some(1.0), ..Default::default() }));
///
/// let mut scope = Scope::new();
/// assert!(rule.check_value_match(&Value::Int(3), &mut scope).unwrap());
/// assert_eq!(rule.convert(&Value::Int(3), &mut scope).unwrap(), Value::Float(7.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "binary-cache", derive(Serialize, Deserialize))]
pub struct Rule {
    pub name: Option<String>,
    pub condition: Option<Condition>,
    pub conditions: Vec<Condition>,
    pub output: Option<Output>,
    pub outputs: Vec<Output>,
}

impl Rule {
    /// A rule with nothing configured: matches everything, converts to the input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }

    /// Set the singular condition, which overrides `conditions`.
    #[must_use]
    pub fn condition(mut self, condition: impl Into<Condition>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Append a condition to the ANDed `conditions` list.
    #[must_use]
    pub fn when(mut self, condition: impl Into<Condition>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    /// Set the singular output, which overrides `outputs`.
    #[must_use]
    pub fn output(mut self, output: impl Into<Output>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Append an output to the chained `outputs` list.
    #[must_use]
    pub fn then(mut self, output: impl Into<Output>) -> Self {
        self.outputs.push(output.into());
        self
    }

    /// Whether this rule applies to `value`.
    ///
    /// # Errors
    ///
    /// Propagates any [`ExpressionError`] raised by a condition expression, and
    /// returns [`ExpressionError::NotACondition`] for a non-condition expression
    /// in a condition slot.
    pub fn check_value_match(&self, value: &Value, scope: &mut Scope) -> Result<bool, ExpressionError> {
        crate::evaluate::check_rule(self, value, scope)
    }

    /// Produce this rule's output for `value`.
    ///
    /// # Errors
    ///
    /// Propagates any [`ExpressionError`] raised by an output expression.
    pub fn convert(&self, value: &Value, scope: &mut Scope) -> Result<Value, ExpressionError> {
        crate::evaluate::convert_rule(self, value, scope)
    }

    /// Every condition position in this rule: the singular slot and the list.
    pub(crate) fn all_conditions(&self) -> impl Iterator<Item = &Condition> {
        self.condition.iter().chain(&self.conditions)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "rule {name}")?,
            None => write!(f, "rule")?,
        }
        let conditions = usize::from(self.condition.is_some()) + self.conditions.len();
        let outputs = usize::from(self.output.is_some()) + self.outputs.len();
        write!(f, " ({conditions} conditions, {outputs} outputs)")
    }
}
