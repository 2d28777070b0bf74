use crate::Value;

/// The result of parsing a DSL input string, before names are resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedConverter {
    pub rules: Vec<ParsedRule>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRule {
    pub name: Option<String>,
    pub clauses: Vec<ParsedClause>,
}

/// Which rule slot a clause fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    /// `when`: appended to the ANDed condition list.
    When,
    /// `if`: the singular condition.
    If,
    /// `then`: appended to the chained output list.
    Then,
    /// `yield`: the singular output.
    Yield,
}

impl ClauseKind {
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            ClauseKind::When => "when",
            ClauseKind::If => "if",
            ClauseKind::Then => "then",
            ClauseKind::Yield => "yield",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedClause {
    pub kind: ClauseKind,
    pub term: ParsedTerm,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedTerm {
    Literal(Value),
    /// `type(name)`: a type descriptor, resolved at compile time.
    TypeRef(String),
    /// `kind(param = value, ...)`, arguments in source order.
    Call {
        name: String,
        args: Vec<(String, ParsedArg)>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedArg {
    Literal(Value),
    /// A bare identifier: an option name or a type name.
    Ident(String),
}
