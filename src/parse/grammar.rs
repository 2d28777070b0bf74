use winnow::ascii::{digit1, till_line_ending};
use winnow::combinator::{alt, cut_err, delimited, opt, preceded, repeat, separated};
use winnow::error::{ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, take_while};

use crate::Value;

use super::parser::{ClauseKind, ParsedArg, ParsedClause, ParsedConverter, ParsedRule, ParsedTerm};

// -- Whitespace & comments --------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    let _: () = repeat(
        0..,
        alt((
            take_while(1.., |c: char| c.is_ascii_whitespace()).void(),
            ('#', till_line_ending).void(),
        )),
    )
    .parse_next(input)?;
    Ok(())
}

// -- Identifiers ------------------------------------------------------------

fn ident<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

// -- Literals ---------------------------------------------------------------

fn string_literal(input: &mut &str) -> ModalResult<String> {
    '"'.parse_next(input)?;
    let mut s = String::new();
    loop {
        match any.parse_next(input)? {
            '"' => return Ok(s),
            '\\' => match any.parse_next(input)? {
                '"' => s.push('"'),
                '\\' => s.push('\\'),
                'n' => s.push('\n'),
                't' => s.push('\t'),
                other => {
                    s.push('\\');
                    s.push(other);
                }
            },
            c => s.push(c),
        }
    }
}

fn number(input: &mut &str) -> ModalResult<Value> {
    let text = (opt('-'), digit1, opt(('.', digit1)))
        .take()
        .parse_next(input)?;
    if text.contains('.') {
        text.parse::<f64>()
            .map(Value::Float)
            .map_err(|_| ErrMode::from_input(input).cut())
    } else {
        text.parse::<i64>()
            .map(Value::Int)
            .map_err(|_| ErrMode::from_input(input).cut())
    }
}

fn keyword_literal(input: &mut &str) -> ModalResult<Value> {
    ident
        .verify_map(|word| match word {
            "null" => Some(Value::Null),
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        })
        .parse_next(input)
}

fn list(input: &mut &str) -> ModalResult<Value> {
    let items: Vec<Value> = delimited(
        '[',
        separated(0.., literal, (ws, ',')),
        (ws, cut_err(']')),
    )
    .parse_next(input)?;
    Ok(Value::List(items))
}

fn literal(input: &mut &str) -> ModalResult<Value> {
    ws.parse_next(input)?;
    alt((
        string_literal.map(Value::String),
        list,
        number,
        keyword_literal,
    ))
    .context(StrContext::Expected(StrContextValue::Description("literal")))
    .parse_next(input)
}

// -- Terms ------------------------------------------------------------------

fn arg_value(input: &mut &str) -> ModalResult<ParsedArg> {
    ws.parse_next(input)?;
    alt((
        literal.map(ParsedArg::Literal),
        ident.map(|s: &str| ParsedArg::Ident(s.to_owned())),
    ))
    .parse_next(input)
}

fn argument(input: &mut &str) -> ModalResult<(String, ParsedArg)> {
    ws.parse_next(input)?;
    let name = ident.parse_next(input)?;
    (ws, cut_err('=')).parse_next(input)?;
    let value = cut_err(arg_value)
        .context(StrContext::Expected(StrContextValue::Description(
            "parameter value",
        )))
        .parse_next(input)?;
    Ok((name.to_owned(), value))
}

fn call(input: &mut &str) -> ModalResult<ParsedTerm> {
    let name = ident.parse_next(input)?;
    ws.parse_next(input)?;
    cut_err('(')
        .context(StrContext::Expected(StrContextValue::CharLiteral('(')))
        .parse_next(input)?;

    if name == "type" {
        ws.parse_next(input)?;
        let type_name = cut_err(ident)
            .context(StrContext::Expected(StrContextValue::Description(
                "type name",
            )))
            .parse_next(input)?;
        (ws, cut_err(')')).parse_next(input)?;
        return Ok(ParsedTerm::TypeRef(type_name.to_owned()));
    }

    let args: Vec<(String, ParsedArg)> = separated(0.., argument, (ws, ',')).parse_next(input)?;
    (ws, cut_err(')'))
        .context(StrContext::Expected(StrContextValue::CharLiteral(')')))
        .parse_next(input)?;
    Ok(ParsedTerm::Call {
        name: name.to_owned(),
        args,
    })
}

fn term(input: &mut &str) -> ModalResult<ParsedTerm> {
    ws.parse_next(input)?;
    alt((literal.map(ParsedTerm::Literal), call))
        .context(StrContext::Expected(StrContextValue::Description(
            "literal, type(...) or expression call",
        )))
        .parse_next(input)
}

// -- Rule definitions -------------------------------------------------------

fn clause_keyword(input: &mut &str) -> ModalResult<ClauseKind> {
    ws.parse_next(input)?;
    ident
        .verify_map(|word| match word {
            "when" => Some(ClauseKind::When),
            "if" => Some(ClauseKind::If),
            "then" => Some(ClauseKind::Then),
            "yield" => Some(ClauseKind::Yield),
            _ => None,
        })
        .parse_next(input)
}

fn clause(input: &mut &str) -> ModalResult<ParsedClause> {
    let kind = clause_keyword.parse_next(input)?;
    let parsed = cut_err(term).parse_next(input)?;
    Ok(ParsedClause { kind, term: parsed })
}

fn rule_def(input: &mut &str) -> ModalResult<ParsedRule> {
    ws.parse_next(input)?;
    ident.verify(|word: &str| word == "rule").parse_next(input)?;

    let name = opt(preceded(ws, ident)).parse_next(input)?;

    ws.parse_next(input)?;
    cut_err(':')
        .context(StrContext::Expected(StrContextValue::CharLiteral(':')))
        .parse_next(input)?;

    let clauses: Vec<ParsedClause> = repeat(0.., clause).parse_next(input)?;

    Ok(ParsedRule {
        name: name.map(str::to_owned),
        clauses,
    })
}

// -- Top-level parser -------------------------------------------------------

pub fn parse_converter(input: &mut &str) -> ModalResult<ParsedConverter> {
    let rules: Vec<ParsedRule> = repeat(0.., rule_def).parse_next(input)?;
    ws.parse_next(input)?;
    Ok(ParsedConverter { rules })
}

#[cfg(test)]
mod tests {
    use crate::parse::parse;

    use super::*;

    fn only_term(input: &str) -> ParsedTerm {
        let mut parsed = parse(input).unwrap();
        assert_eq!(parsed.rules.len(), 1);
        let mut rule = parsed.rules.remove(0);
        assert_eq!(rule.clauses.len(), 1);
        rule.clauses.remove(0).term
    }

    #[test]
    fn parse_named_rule() {
        let result = parse("rule ints:\n    when type(int)").unwrap();
        assert_eq!(result.rules.len(), 1);
        assert_eq!(result.rules[0].name.as_deref(), Some("ints"));
        assert_eq!(
            result.rules[0].clauses,
            [ParsedClause {
                kind: ClauseKind::When,
                term: ParsedTerm::TypeRef("int".into()),
            }]
        );
    }

    #[test]
    fn parse_unnamed_rule() {
        let result = parse("rule:\n    yield \"x\"").unwrap();
        assert_eq!(result.rules[0].name, None);
    }

    #[test]
    fn parse_rule_without_clauses() {
        let result = parse("rule a:\nrule b:").unwrap();
        assert_eq!(result.rules.len(), 2);
        assert!(result.rules[0].clauses.is_empty());
    }

    #[test]
    fn parse_empty_input() {
        assert!(parse("").unwrap().rules.is_empty());
        assert!(parse("  # nothing here\n").unwrap().rules.is_empty());
    }

    #[test]
    fn parse_all_clause_kinds() {
        let input = "rule r:\n  when 1\n  if 2\n  then 3\n  yield 4";
        let result = parse(input).unwrap();
        let kinds: Vec<_> = result.rules[0].clauses.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            [ClauseKind::When, ClauseKind::If, ClauseKind::Then, ClauseKind::Yield]
        );
    }

    #[test]
    fn parse_all_literal_types() {
        let cases = [
            ("42", Value::Int(42)),
            ("-7", Value::Int(-7)),
            ("3.5", Value::Float(3.5)),
            ("-0.25", Value::Float(-0.25)),
            ("true", Value::Bool(true)),
            ("false", Value::Bool(false)),
            ("null", Value::Null),
            (r#""hello""#, Value::from("hello")),
            ("[]", Value::List(vec![])),
            ("[1, \"a\", [true]]", Value::List(vec![
                Value::Int(1),
                Value::from("a"),
                Value::List(vec![Value::Bool(true)]),
            ])),
        ];
        for (text, expected) in cases {
            let input = format!("rule r:\n    yield {text}");
            assert_eq!(
                only_term(&input),
                ParsedTerm::Literal(expected),
                "failed for {text}"
            );
        }
    }

    #[test]
    fn parse_call_with_arguments() {
        let term = only_term("rule r: then transform(trim = whole, split_by = \",\", substring_start = 1)");
        assert_eq!(
            term,
            ParsedTerm::Call {
                name: "transform".into(),
                args: vec![
                    ("trim".into(), ParsedArg::Ident("whole".into())),
                    ("split_by".into(), ParsedArg::Literal(Value::from(","))),
                    ("substring_start".into(), ParsedArg::Literal(Value::Int(1))),
                ],
            }
        );
    }

    #[test]
    fn parse_call_without_arguments() {
        assert_eq!(
            only_term("rule r: then negate()"),
            ParsedTerm::Call {
                name: "negate".into(),
                args: vec![],
            }
        );
    }

    #[test]
    fn keyword_prefix_is_an_identifier() {
        let term = only_term("rule r: then lookup(operation = nullable)");
        assert!(matches!(
            term,
            ParsedTerm::Call { args, .. } if args[0].1 == ParsedArg::Ident("nullable".into())
        ));
    }

    #[test]
    fn parse_comments_ignored() {
        let result = parse("# Header\nrule r:\n    # inline\n    when 1 # trailing\n").unwrap();
        assert_eq!(result.rules[0].clauses.len(), 1);
    }

    #[test]
    fn parse_string_with_escapes() {
        assert_eq!(
            only_term(r#"rule r: yield "a\"b\\c\n""#),
            ParsedTerm::Literal(Value::from("a\"b\\c\n"))
        );
    }

    #[test]
    fn missing_colon_fails() {
        let err = parse("rule r\n  when 1").unwrap_err();
        assert!(err.message().contains("expected"), "{err}");
    }

    #[test]
    fn missing_term_fails() {
        assert!(parse("rule r:\n  when").is_err());
        assert!(parse("rule r:\n  then arithmetic(add = )").is_err());
    }

    #[test]
    fn unclosed_call_fails() {
        assert!(parse("rule r:\n  then arithmetic(add = 1").is_err());
        assert!(parse("rule r:\n  yield [1, 2").is_err());
    }

    #[test]
    fn stray_text_fails() {
        assert!(parse("when 1").is_err());
        assert!(parse("rules r:").is_err());
        assert!(parse("rule r:\n  unless 1").is_err());
    }
}
