use crate::types::{ExpressionError, Value};

/// Whole-string predicate evaluated by [`StringCheck`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "binary-cache",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum CheckOperation {
    IsNullOrEmpty,
    IsNullOrWhitespace,
    /// No character has an uppercase mapping.
    IsLowerCase,
    /// No character has a lowercase mapping.
    IsUpperCase,
}

impl CheckOperation {
    fn check(self, s: &str) -> bool {
        match self {
            CheckOperation::IsNullOrEmpty => s.is_empty(),
            CheckOperation::IsNullOrWhitespace => s.chars().all(char::is_whitespace),
            CheckOperation::IsLowerCase => !s.chars().any(char::is_uppercase),
            CheckOperation::IsUpperCase => !s.chars().any(char::is_lowercase),
        }
    }
}

/// ANDs every configured predicate over a string input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "binary-cache",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct StringCheck {
    pub check_operation: Option<CheckOperation>,
    pub starts_with: Option<String>,
    pub ends_with: Option<String>,
    pub contains: Option<String>,
}

impl StringCheck {
    pub(crate) const NAME: &'static str = "string check";

    pub(crate) fn calculate(&self, value: &Value) -> Result<Value, ExpressionError> {
        let s = require_string(Self::NAME, value)?;
        let matched = self.check_operation.is_none_or(|op| op.check(s))
            && self.starts_with.as_deref().is_none_or(|p| s.starts_with(p))
            && self.ends_with.as_deref().is_none_or(|p| s.ends_with(p))
            && self.contains.as_deref().is_none_or(|p| s.contains(p));
        Ok(Value::Bool(matched))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "binary-cache",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum TrimMode {
    Whole,
    Start,
    End,
}

/// Case mapping flavor. There is no locale model, so both map through
/// Unicode's default case tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "binary-cache",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum CaseMode {
    Default,
    Invariant,
}

/// Reshapes a string in the fixed order trim, substring, insert, lowercase,
/// uppercase, split. Positions count characters, not bytes.
///
/// When `split_by` is set the result is a list of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "binary-cache",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct StringTransform {
    pub trim: Option<TrimMode>,
    pub substring_start: Option<usize>,
    pub substring_end: Option<usize>,
    pub insert_text: Option<String>,
    pub insert_index: Option<usize>,
    pub to_lower: Option<CaseMode>,
    pub to_upper: Option<CaseMode>,
    pub split_by: Option<String>,
}

impl StringTransform {
    pub(crate) const NAME: &'static str = "string transform";

    pub(crate) fn calculate(&self, value: &Value) -> Result<Value, ExpressionError> {
        let input = require_string(Self::NAME, value)?;

        let trimmed = match self.trim {
            Some(TrimMode::Whole) => input.trim(),
            Some(TrimMode::Start) => input.trim_start(),
            Some(TrimMode::End) => input.trim_end(),
            None => input,
        };

        let mut chars: Vec<char> = trimmed.chars().collect();
        if self.substring_start.is_some() || self.substring_end.is_some() {
            let start = self.substring_start.unwrap_or(0);
            let end = self.substring_end.unwrap_or(chars.len());
            if end > chars.len() || start > end {
                return Err(ExpressionError::IndexOutOfRange {
                    expression: Self::NAME,
                    index: if end > chars.len() { end } else { start },
                    len: chars.len(),
                });
            }
            chars = chars[start..end].to_vec();
        }

        if let Some(text) = &self.insert_text {
            let at = self.insert_index.unwrap_or(0);
            if at > chars.len() {
                return Err(ExpressionError::IndexOutOfRange {
                    expression: Self::NAME,
                    index: at,
                    len: chars.len(),
                });
            }
            chars.splice(at..at, text.chars());
        }

        let mut out: String = chars.into_iter().collect();
        if self.to_lower.is_some() {
            out = out.to_lowercase();
        }
        if self.to_upper.is_some() {
            out = out.to_uppercase();
        }

        match self.split_by.as_deref() {
            Some("") => Ok(Value::List(vec![Value::String(out)])),
            Some(sep) => Ok(Value::List(
                out.split(sep).map(|part| Value::String(part.to_owned())).collect(),
            )),
            None => Ok(Value::String(out)),
        }
    }
}

fn require_string<'v>(expression: &'static str, value: &'v Value) -> Result<&'v str, ExpressionError> {
    value.as_str().ok_or_else(|| ExpressionError::TypeMismatch {
        expression,
        expected: "string",
        found: value.kind(),
    })
}
