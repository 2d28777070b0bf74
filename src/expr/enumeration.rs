use crate::types::{EnumType, ExpressionError, Scope, Value, ValueType};

use super::coerce::{try_parse_int, try_retrieve_type};

/// Converts a name or number into a value of a registered enum.
///
/// The enum comes from `definition` when present, otherwise `enum_type` or,
/// failing that, `type_name` looked up in the scope's registry. Compiled
/// converters fill `definition`, so they do not depend on the registry of the
/// scope they later run in. The value to
/// convert is `value` when configured, else the input. Accepted forms: a member
/// name, an integer (or integer string, or integral float), a value already of
/// the target enum, and for flags enums a comma-separated list of member names.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "binary-cache",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Enumeration {
    pub definition: Option<EnumType>,
    pub enum_type: Option<ValueType>,
    pub type_name: Option<String>,
    pub value: Option<Value>,
}

impl Enumeration {
    pub(crate) const NAME: &'static str = "enum";

    pub(crate) fn calculate(&self, value: &Value, scope: &Scope) -> Result<Value, ExpressionError> {
        let target = self.resolve_type(scope)?;
        let source = self.value.as_ref().unwrap_or(value);
        parse_member(target, source)
            .map(Value::Enum)
            .ok_or_else(|| ExpressionError::Unparsable {
                expression: Self::NAME,
                input: source.to_string(),
                target: target.name().to_owned(),
            })
    }

    fn resolve_type<'s>(&'s self, scope: &'s Scope) -> Result<&'s EnumType, ExpressionError> {
        if let Some(definition) = &self.definition {
            return Ok(definition);
        }
        let name = match (&self.enum_type, &self.type_name) {
            (Some(ValueType::Enum(name)), _) => name,
            (Some(other), _) => {
                return Err(ExpressionError::TypeMismatch {
                    expression: Self::NAME,
                    expected: "enum type",
                    found: other.to_string(),
                });
            }
            (None, Some(name)) => name,
            (None, None) => {
                return Err(ExpressionError::MissingConfiguration {
                    expression: Self::NAME,
                    detail: "either an enum type or a type name is required",
                });
            }
        };
        scope
            .types()
            .enum_type(name)
            .ok_or_else(|| ExpressionError::Unparsable {
                expression: Self::NAME,
                input: name.clone(),
                target: "enum type".to_owned(),
            })
    }
}

fn parse_member(target: &EnumType, source: &Value) -> Option<crate::EnumValue> {
    match source {
        Value::Enum(e) if e.type_name == target.name() => Some(e.clone()),
        Value::String(s) => {
            let text = s.trim();
            if let Ok(n) = text.parse::<i64>() {
                return Some(target.enum_value(n));
            }
            if target.is_flags() && text.contains(',') {
                let combined = text
                    .split(',')
                    .map(|part| target.value_of(part.trim()))
                    .try_fold(0_i64, |acc, v| v.map(|v| acc | v))?;
                return Some(target.enum_value(combined));
            }
            target.value_of(text).map(|v| target.enum_value(v))
        }
        other => try_parse_int(other).map(|n| target.enum_value(n)),
    }
}

/// Produces a type descriptor, either the configured one or one resolved by name.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "binary-cache",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct TypeOf {
    pub type_value: Option<ValueType>,
    pub name: Option<String>,
}

impl TypeOf {
    pub(crate) const NAME: &'static str = "type";

    pub(crate) fn calculate(&self, scope: &Scope) -> Result<Value, ExpressionError> {
        if let Some(t) = &self.type_value {
            return Ok(Value::Type(t.clone()));
        }
        let Some(name) = &self.name else {
            return Err(ExpressionError::MissingConfiguration {
                expression: Self::NAME,
                detail: "either a type value or a type name is required",
            });
        };
        try_retrieve_type(&Value::from(name.as_str()), scope.types())
            .map(Value::Type)
            .ok_or_else(|| ExpressionError::Unparsable {
                expression: Self::NAME,
                input: name.clone(),
                target: "type".to_owned(),
            })
    }
}
