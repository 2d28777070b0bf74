mod error;
mod grammar;
mod parser;

pub use error::ParseError;
pub use parser::{ClauseKind, ParsedArg, ParsedClause, ParsedConverter, ParsedRule, ParsedTerm};

/// Parse a DSL input string into a [`ParsedConverter`].
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not valid DSL syntax.
pub fn parse(input: &str) -> Result<ParsedConverter, ParseError> {
    use winnow::Parser;
    grammar::parse_converter
        .parse(input)
        .map_err(|e| ParseError::new(e.to_string()))
}
