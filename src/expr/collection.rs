use std::cmp::Ordering;

use crate::types::{ExpressionError, Value};

use super::coerce::collection_count;

/// Aggregate computed by [`CollectionLookup`] when no index is configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "binary-cache",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum LookupOperation {
    #[default]
    Count,
    First,
    Last,
    Max,
    Min,
}

impl LookupOperation {
    fn label(self) -> &'static str {
        match self {
            LookupOperation::Count => "count",
            LookupOperation::First => "first",
            LookupOperation::Last => "last",
            LookupOperation::Max => "max",
            LookupOperation::Min => "min",
        }
    }
}

/// Reads an element or an aggregate out of a collection.
///
/// With `index` set the input must be a list and the element at that position is
/// returned. Otherwise `operation` runs over the list items, or over the
/// characters of a string.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "binary-cache",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct CollectionLookup {
    pub index: Option<usize>,
    pub operation: LookupOperation,
}

impl CollectionLookup {
    pub(crate) const NAME: &'static str = "collection lookup";

    pub(crate) fn calculate(&self, value: &Value) -> Result<Value, ExpressionError> {
        if let Some(index) = self.index {
            let Value::List(items) = value else {
                return Err(ExpressionError::TypeMismatch {
                    expression: Self::NAME,
                    expected: "indexable list",
                    found: value.kind(),
                });
            };
            return items
                .get(index)
                .cloned()
                .ok_or(ExpressionError::IndexOutOfRange {
                    expression: Self::NAME,
                    index,
                    len: items.len(),
                });
        }

        let op = self.operation;
        let found = match op {
            LookupOperation::Count => {
                let count = collection_count(value).ok_or_else(|| not_a_collection(value))?;
                return Ok(Value::Int(i64::try_from(count).unwrap_or(i64::MAX)));
            }
            LookupOperation::First => elements(value)?.next(),
            LookupOperation::Last => elements(value)?.last(),
            LookupOperation::Max => extreme(elements(value)?, Ordering::Greater)?,
            LookupOperation::Min => extreme(elements(value)?, Ordering::Less)?,
        };
        found.ok_or(ExpressionError::EmptySource {
            expression: Self::NAME,
            operation: op.label(),
        })
    }
}

fn not_a_collection(value: &Value) -> ExpressionError {
    ExpressionError::TypeMismatch {
        expression: CollectionLookup::NAME,
        expected: "collection",
        found: value.kind(),
    }
}

fn elements(value: &Value) -> Result<Box<dyn Iterator<Item = Value> + '_>, ExpressionError> {
    match value {
        Value::List(items) => Ok(Box::new(items.iter().cloned())),
        Value::String(s) => Ok(Box::new(s.chars().map(Value::Char))),
        _ => Err(not_a_collection(value)),
    }
}

/// The item that wins every comparison in direction `wanted`; ties keep the first.
fn extreme(
    mut items: impl Iterator<Item = Value>,
    wanted: Ordering,
) -> Result<Option<Value>, ExpressionError> {
    let Some(mut best) = items.next() else {
        return Ok(None);
    };
    for item in items {
        let ord = item
            .partial_cmp_value(&best)
            .ok_or_else(|| ExpressionError::IncomparableItems {
                expression: CollectionLookup::NAME,
                left: item.kind(),
                right: best.kind(),
            })?;
        if ord == wanted {
            best = item;
        }
    }
    Ok(Some(best))
}
