use std::collections::HashMap;

use super::value::{EnumValue, ValueType};

/// Declaration of an enum type that expressions can resolve by name.
///
/// Members are `(name, underlying value)` pairs in declaration order. A `flags`
/// enum accepts comma-separated member lists whose values are OR-ed together.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "binary-cache",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct EnumType {
    name: String,
    members: Vec<(String, i64)>,
    flags: bool,
}

impl EnumType {
    /// Declare an enum whose members take the values `0, 1, 2, ...` in order.
    #[must_use]
    pub fn new<I, S>(name: &str, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let members = members
            .into_iter()
            .zip(0_i64..)
            .map(|(m, v)| (m.into(), v))
            .collect();
        Self {
            name: name.to_owned(),
            members,
            flags: false,
        }
    }

    /// Declare an enum with explicit member values.
    #[must_use]
    pub fn with_values<I, S>(name: &str, members: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        Self {
            name: name.to_owned(),
            members: members.into_iter().map(|(m, v)| (m.into(), v)).collect(),
            flags: false,
        }
    }

    /// Mark this enum as a bit-flags enum.
    #[must_use]
    pub fn flags(mut self) -> Self {
        self.flags = true;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_flags(&self) -> bool {
        self.flags
    }

    pub fn members(&self) -> impl Iterator<Item = (&str, i64)> {
        self.members.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Underlying value of the member called `name`.
    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.members
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    /// Build a value of this enum from its underlying integer. The member name is
    /// filled in when exactly one declared member carries that value.
    #[must_use]
    pub fn enum_value(&self, value: i64) -> EnumValue {
        let name = self
            .members
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(n, _)| n.clone());
        EnumValue {
            type_name: self.name.clone(),
            name,
            value,
        }
    }
}

/// Resolves type names to [`ValueType`]s and holds the enum declarations
/// visible to expressions.
///
/// Built-in names: `bool`, `int`/`i64`, `float`/`f64`/`double`, `char`,
/// `string`/`str`, `list`, `type`. Every other name resolves only if an enum of
/// that name has been registered.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    enums: HashMap<String, EnumType>,
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an enum declaration, replacing any previous enum of the same name.
    #[must_use]
    pub fn with_enum(mut self, enum_type: EnumType) -> Self {
        self.register(enum_type);
        self
    }

    pub fn register(&mut self, enum_type: EnumType) {
        self.enums.insert(enum_type.name.clone(), enum_type);
    }

    /// Look up a registered enum declaration.
    #[must_use]
    pub fn enum_type(&self, name: &str) -> Option<&EnumType> {
        self.enums.get(name)
    }

    /// Resolve a type name to its descriptor.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<ValueType> {
        let builtin = match name {
            "bool" => Some(ValueType::Bool),
            "int" | "i64" => Some(ValueType::Int),
            "float" | "f64" | "double" => Some(ValueType::Float),
            "char" => Some(ValueType::Char),
            "string" | "str" => Some(ValueType::String),
            "list" => Some(ValueType::List),
            "type" => Some(ValueType::Type),
            _ => None,
        };
        builtin.or_else(|| {
            self.enums
                .contains_key(name)
                .then(|| ValueType::Enum(name.to_owned()))
        })
    }

    /// The number of registered enums.
    #[must_use]
    pub fn len(&self) -> usize {
        self.enums.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color() -> EnumType {
        EnumType::new("Color", ["Red", "Green", "Blue"])
    }

    #[test]
    fn resolve_builtins() {
        let reg = TypeRegistry::new();
        assert_eq!(reg.resolve("string"), Some(ValueType::String));
        assert_eq!(reg.resolve("i64"), Some(ValueType::Int));
        assert_eq!(reg.resolve("double"), Some(ValueType::Float));
        assert_eq!(reg.resolve("type"), Some(ValueType::Type));
    }

    #[test]
    fn resolve_registered_enum() {
        let reg = TypeRegistry::new().with_enum(color());
        assert_eq!(reg.resolve("Color"), Some(ValueType::Enum("Color".into())));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn resolve_unknown_returns_none() {
        let reg = TypeRegistry::new();
        assert!(reg.is_empty());
        assert_eq!(reg.resolve("Color"), None);
        assert_eq!(reg.resolve("String"), None);
    }

    #[test]
    fn sequential_member_values() {
        let c = color();
        assert_eq!(c.value_of("Red"), Some(0));
        assert_eq!(c.value_of("Blue"), Some(2));
        assert_eq!(c.value_of("red"), None);
    }

    #[test]
    fn enum_value_fills_member_name() {
        let c = color();
        assert_eq!(c.enum_value(1).name.as_deref(), Some("Green"));
        assert_eq!(c.enum_value(7).name, None);
    }

    #[test]
    fn explicit_values_and_flags() {
        let perms = EnumType::with_values("Perm", [("Read", 1), ("Write", 2), ("Exec", 4)]).flags();
        assert!(perms.is_flags());
        assert_eq!(perms.value_of("Exec"), Some(4));
        assert_eq!(perms.members().count(), 3);
    }
}
