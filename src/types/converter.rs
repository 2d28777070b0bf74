use std::fmt;

use super::conversion_report::ConversionReport;
use super::error::{DefinitionError, ExpressionError};
use super::rule::Rule;
use super::scope::Scope;
use super::type_registry::TypeRegistry;
use super::value::Value;

/// Builder for constructing a [`Converter`].
///
/// Rules are defined via closures that receive an empty [`Rule`] and are kept
/// in declaration order, which is also their match priority.
///
/// # Example
///
/// ```
/// use uniconv::{Arithmetic, ConverterBuilder, Expression, Scope, Value, ValueType};
///
/// let converter = ConverterBuilder::new()
///     .rule(|r| r.named("strings").condition(ValueType::String))
///     .rule(|r| {
///         r.named("numbers")
///             .condition(ValueType::Int)
///             .then(Expression::from(Arithmetic { multiply: Some(10.0), ..Default::default() }))
///     })
///     .build()
///     .unwrap();
///
/// let mut scope = Scope::new();
/// assert_eq!(converter.convert(&Value::Int(4), &mut scope).unwrap(), Value::Float(40.0));
/// ```
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    rules: Vec<Rule>,
}

impl ConverterBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a rule. The closure starts from [`Rule::new()`], which matches
    /// every value and converts it to itself.
    #[must_use]
    pub fn rule(mut self, f: impl FnOnce(Rule) -> Rule) -> Self {
        self.rules.push(f(Rule::new()));
        self
    }

    /// Append an already-built rule.
    #[must_use]
    pub fn push(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Validate the rules and freeze them into an immutable `Converter`.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::DuplicateRule`] when two rules share a name,
    /// and [`DefinitionError::NotACondition`] when a condition slot holds an
    /// expression that cannot gate a rule.
    pub fn build(self) -> Result<Converter, DefinitionError> {
        crate::compile::validate(&self.rules)?;
        Ok(Converter { rules: self.rules })
    }
}

/// An ordered, immutable set of conversion rules. The first rule whose
/// conditions match a value produces the result; unmatched values pass
/// through unchanged.
///
/// Thread-safe and designed to live behind `Arc`. Each caller evaluates with
/// its own [`Scope`].
#[derive(Debug, Clone, PartialEq)]
pub struct Converter {
    pub(crate) rules: Vec<Rule>,
}

impl Converter {
    /// Convert `value` with the first matching rule.
    ///
    /// # Errors
    ///
    /// Propagates the [`ExpressionError`] of any condition checked or output
    /// applied along the way.
    pub fn convert(&self, value: &Value, scope: &mut Scope) -> Result<Value, ExpressionError> {
        crate::evaluate::convert(&self.rules, value, scope)
    }

    /// Convert with diagnostics: which rule matched, how many were checked,
    /// and timing information.
    ///
    /// # Errors
    ///
    /// Same as [`convert()`](Self::convert).
    pub fn convert_detailed(
        &self,
        value: &Value,
        scope: &mut Scope,
    ) -> Result<ConversionReport, ExpressionError> {
        crate::evaluate::convert_detailed(&self.rules, value, scope)
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Position of the rule with the given name.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.rules.iter().position(|r| r.name.as_deref() == Some(name))
    }

    /// Parse a DSL string and compile it into a `Converter` with no enum
    /// types registered.
    ///
    /// # Errors
    ///
    /// Returns [`UniconvError`](crate::UniconvError) on parse or definition failure.
    pub fn from_dsl(input: &str) -> Result<Self, crate::UniconvError> {
        Self::from_dsl_with_types(input, &TypeRegistry::new())
    }

    /// Parse a DSL string and compile it, resolving type names against `types`.
    ///
    /// # Errors
    ///
    /// Returns [`UniconvError`](crate::UniconvError) on parse or definition failure.
    pub fn from_dsl_with_types(input: &str, types: &TypeRegistry) -> Result<Self, crate::UniconvError> {
        let parsed = crate::parse::parse(input)?;
        let converter = crate::compile::compile(&parsed, types)?;
        Ok(converter)
    }

    /// Read a DSL file and compile it into a `Converter`.
    ///
    /// # Errors
    ///
    /// Returns [`UniconvError`](crate::UniconvError) on I/O, parse, or definition failure.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::UniconvError> {
        Self::from_file_with_types(path, &TypeRegistry::new())
    }

    /// Read a DSL file and compile it, resolving type names against `types`.
    ///
    /// # Errors
    ///
    /// Returns [`UniconvError`](crate::UniconvError) on I/O, parse, or definition failure.
    pub fn from_file_with_types(
        path: impl AsRef<std::path::Path>,
        types: &TypeRegistry,
    ) -> Result<Self, crate::UniconvError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), bytes = input.len(), "read converter source");
        Self::from_dsl_with_types(&input, types)
    }
}

#[cfg(feature = "binary-cache")]
impl Converter {
    /// Serialize this converter to a byte vector.
    ///
    /// The optional `source_text` is hashed (BLAKE3) and embedded in the
    /// payload metadata, so callers can detect when the DSL source has changed
    /// and the cache should be rebuilt.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError`](crate::serial::SerializeError) if encoding fails.
    pub fn to_bytes(&self, source_text: Option<&str>) -> Result<Vec<u8>, crate::serial::SerializeError> {
        crate::serial::encode(self, source_text)
    }

    /// Deserialize a converter previously produced by [`to_bytes`](Self::to_bytes).
    ///
    /// # Errors
    ///
    /// Returns [`DeserializeError`](crate::serial::DeserializeError) on
    /// format, integrity, or validation failure.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, crate::serial::DeserializeError> {
        crate::serial::decode(bytes)
    }

    /// Serialize this converter and write it to a file.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError`](crate::serial::SerializeError) on
    /// encoding or I/O failure.
    pub fn to_binary_file(
        &self,
        path: impl AsRef<std::path::Path>,
        source_text: Option<&str>,
    ) -> Result<(), crate::serial::SerializeError> {
        let bytes = self.to_bytes(source_text)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Read a file and deserialize the converter it contains.
    ///
    /// # Errors
    ///
    /// Returns [`DeserializeError`](crate::serial::DeserializeError) on
    /// I/O, format, integrity, or validation failure.
    pub fn from_binary_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::serial::DeserializeError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Display for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Converter({} rules)", self.rules.len())
    }
}
