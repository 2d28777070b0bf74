use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "binary-cache")]
use serde::{Deserialize, Serialize};

/// Runtime type descriptor, used by type-gated conditions and the `Type` expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "binary-cache", derive(Serialize, Deserialize))]
pub enum ValueType {
    Bool,
    Int,
    Float,
    Char,
    String,
    List,
    Type,
    /// A registered enum type, identified by name.
    Enum(String),
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Bool => write!(f, "bool"),
            ValueType::Int => write!(f, "int"),
            ValueType::Float => write!(f, "float"),
            ValueType::Char => write!(f, "char"),
            ValueType::String => write!(f, "string"),
            ValueType::List => write!(f, "list"),
            ValueType::Type => write!(f, "type"),
            ValueType::Enum(name) => write!(f, "{name}"),
        }
    }
}

/// A value of a registered enum type.
///
/// `name` is the declared member name, or `None` when the underlying integer
/// does not correspond to a single declared member (combined flags, raw ordinals).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "binary-cache", derive(Serialize, Deserialize))]
pub struct EnumValue {
    pub type_name: String,
    pub name: Option<String>,
    pub value: i64,
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.value == other.value
    }
}

/// Dynamic value consumed and produced by expressions and rules.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "binary-cache", derive(Serialize, Deserialize))]
pub enum Value {
    /// No value. Still a valid literal condition or output.
    #[default]
    Null,
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A single character, produced when enumerating a string.
    Char(char),
    /// A UTF-8 string. Enumerable as characters, but not indexable.
    String(String),
    /// An ordered, indexable collection.
    List(Vec<Value>),
    Enum(EnumValue),
    Type(ValueType),
}

impl Value {
    /// The runtime type of this value, or `None` for [`Value::Null`].
    #[must_use]
    pub fn value_type(&self) -> Option<ValueType> {
        Some(match self {
            Value::Null => return None,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Char(_) => ValueType::Char,
            Value::String(_) => ValueType::String,
            Value::List(_) => ValueType::List,
            Value::Enum(e) => ValueType::Enum(e.type_name.clone()),
            Value::Type(_) => ValueType::Type,
        })
    }

    /// Short name of the value's shape, used in error messages.
    #[must_use]
    pub fn kind(&self) -> String {
        self.value_type()
            .map_or_else(|| "null".to_owned(), |t| t.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Ordering between two values, used by `Max`/`Min` lookups.
    /// Returns `None` for incompatible shapes (e.g. a string against a number).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn partial_cmp_value(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Char(a), Value::Char(b)) => Some(a.cmp(b)),
            (Value::String(a), Value::String(b)) => a.partial_cmp(b),
            (Value::Enum(a), Value::Enum(b)) if a.type_name == b.type_name => {
                Some(a.value.cmp(&b.value))
            }
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<ValueType> for Value {
    fn from(v: ValueType) -> Self {
        Value::Type(v)
    }
}

impl From<EnumValue> for Value {
    fn from(v: EnumValue) -> Self {
        Value::Enum(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Renders the plain string representation used by interpolation:
/// strings are not quoted and `Null` renders as nothing.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Enum(e) => match &e.name {
                Some(name) => f.write_str(name),
                None => write!(f, "{}", e.value),
            },
            Value::Type(t) => write!(f, "{t}"),
        }
    }
}
