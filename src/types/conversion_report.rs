use std::fmt;
use std::time::Duration;

use super::value::Value;

/// Detailed conversion report returned by
/// [`Converter::convert_detailed()`](super::converter::Converter::convert_detailed).
///
/// Records which rule matched (if any), how many rules were checked to find it,
/// the produced value, and the wall-clock duration of the conversion.
#[derive(Debug, Clone)]
#[must_use]
pub struct ConversionReport {
    matched: Option<usize>,
    rule_name: Option<String>,
    checked: usize,
    output: Value,
    duration: Duration,
}

impl ConversionReport {
    pub(crate) fn new(
        matched: Option<usize>,
        rule_name: Option<String>,
        checked: usize,
        output: Value,
        duration: Duration,
    ) -> Self {
        Self {
            matched,
            rule_name,
            checked,
            output,
            duration,
        }
    }

    /// Position of the matching rule, or `None` when the value fell through.
    #[must_use]
    pub fn matched(&self) -> Option<usize> {
        self.matched
    }

    /// Name of the matching rule, if it has one.
    #[must_use]
    pub fn rule_name(&self) -> Option<&str> {
        self.rule_name.as_deref()
    }

    /// Number of rules whose conditions were checked.
    #[must_use]
    pub fn checked(&self) -> usize {
        self.checked
    }

    /// The converted value, same as [`Converter::convert()`](super::converter::Converter::convert).
    #[must_use]
    pub fn output(&self) -> &Value {
        &self.output
    }

    #[must_use]
    pub fn into_output(self) -> Value {
        self.output
    }

    /// Wall-clock duration of the conversion.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.matched, &self.rule_name) {
            (Some(idx), Some(name)) => write!(f, "matched: #{idx} ({name})")?,
            (Some(idx), None) => write!(f, "matched: #{idx}")?,
            (None, _) => write!(f, "matched: none")?,
        }
        write!(f, ", checked: {}", self.checked)?;
        write!(f, ", output: {:?}", self.output)?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}
