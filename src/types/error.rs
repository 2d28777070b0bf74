use thiserror::Error;

/// Failure raised while evaluating an expression or rule.
///
/// Every variant names the expression kind that raised it. Errors are never
/// recovered from inside the engine; they propagate to the caller of
/// [`Rule::check_value_match`](crate::Rule::check_value_match),
/// [`Rule::convert`](crate::Rule::convert) or
/// [`Converter::convert`](crate::Converter::convert).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    #[error("{expression}: expected {expected}, found {found}")]
    TypeMismatch {
        expression: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("{expression}: cannot parse '{input}' as {target}")]
    Unparsable {
        expression: &'static str,
        input: String,
        target: String,
    },

    #[error("{expression}: missing configuration: {detail}")]
    MissingConfiguration {
        expression: &'static str,
        detail: &'static str,
    },

    #[error("{expression}: {operation} requires a non-empty collection")]
    EmptySource {
        expression: &'static str,
        operation: &'static str,
    },

    #[error("{expression}: index {index} is out of range for length {len}")]
    IndexOutOfRange {
        expression: &'static str,
        index: usize,
        len: usize,
    },

    #[error("{expression}: cannot compare {left} with {right}")]
    IncomparableItems {
        expression: &'static str,
        left: String,
        right: String,
    },

    #[error("{expression}: lower bound {lower} is greater than upper bound {upper}")]
    InvalidRange {
        expression: &'static str,
        lower: i64,
        upper: i64,
    },

    #[error("{expression}: invalid format: {detail}")]
    Format {
        expression: &'static str,
        detail: String,
    },

    #[error("'{expression}' is not a condition expression and cannot gate a rule")]
    NotACondition { expression: &'static str },
}

/// Failure raised while compiling a parsed DSL document into a
/// [`Converter`](crate::Converter).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DefinitionError {
    #[error("unknown expression '{name}' in rule '{rule}'")]
    UnknownExpression { rule: String, name: String },

    #[error("unknown parameter '{parameter}' for expression '{expression}'")]
    UnknownParameter {
        expression: String,
        parameter: String,
    },

    #[error("parameter '{parameter}' given more than once for expression '{expression}'")]
    DuplicateParameter {
        expression: String,
        parameter: String,
    },

    #[error("parameter '{parameter}' of expression '{expression}' expects {expected}, found {found}")]
    InvalidParameter {
        expression: String,
        parameter: String,
        expected: &'static str,
        found: String,
    },

    #[error("unknown option '{option}' for parameter '{parameter}' of expression '{expression}'")]
    UnknownOption {
        expression: String,
        parameter: String,
        option: String,
    },

    #[error("unknown type '{name}'")]
    UnknownType { name: String },

    #[error("duplicate rule name '{name}'")]
    DuplicateRule { name: String },

    #[error("rule '{rule}' has more than one '{clause}' clause")]
    DuplicateClause { rule: String, clause: &'static str },

    #[error("expression '{expression}' in rule '{rule}' is not a condition expression")]
    NotACondition { rule: String, expression: String },
}
