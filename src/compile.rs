use std::collections::HashSet;

use tracing::debug;

use crate::parse::{ClauseKind, ParsedArg, ParsedConverter, ParsedRule, ParsedTerm};
use crate::{
    Arithmetic, CaseMode, CheckOperation, CollectionCountComparison, CollectionLookup, Condition,
    Converter, DefinitionError, Double, Enumeration, Expression, LookupOperation, Negate,
    NumberComparison, Output, Percentage, RandomNumber, Rule, StringCheck, StringInterpolation,
    StringTransform, TrimMode, TypeOf, TypeRegistry, Value, ValueType,
};

pub(crate) fn compile(parsed: &ParsedConverter, types: &TypeRegistry) -> Result<Converter, DefinitionError> {
    let rules = parsed
        .rules
        .iter()
        .enumerate()
        .map(|(idx, rule)| compile_rule(idx, rule, types))
        .collect::<Result<Vec<_>, _>>()?;
    validate(&rules)?;
    debug!(rules = rules.len(), "compiled converter");
    Ok(Converter { rules })
}

/// Checks shared by every construction path: unique rule names, and only
/// condition expressions in condition slots.
pub(crate) fn validate(rules: &[Rule]) -> Result<(), DefinitionError> {
    let mut seen = HashSet::new();
    for (idx, rule) in rules.iter().enumerate() {
        if let Some(name) = &rule.name {
            if !seen.insert(name.as_str()) {
                return Err(DefinitionError::DuplicateRule { name: name.clone() });
            }
        }
        for condition in rule.all_conditions() {
            let Condition::Expression(expr) = condition else {
                continue;
            };
            if !expr.is_condition() {
                return Err(DefinitionError::NotACondition {
                    rule: rule_label(idx, rule.name.as_deref()),
                    expression: expr.name().to_owned(),
                });
            }
        }
    }
    Ok(())
}

fn rule_label(idx: usize, name: Option<&str>) -> String {
    name.map_or_else(|| format!("#{idx}"), str::to_owned)
}

fn compile_rule(idx: usize, parsed: &ParsedRule, types: &TypeRegistry) -> Result<Rule, DefinitionError> {
    let label = rule_label(idx, parsed.name.as_deref());
    let mut rule = Rule {
        name: parsed.name.clone(),
        ..Rule::default()
    };
    for clause in &parsed.clauses {
        match clause.kind {
            ClauseKind::When => rule.conditions.push(condition(&label, &clause.term, types)?),
            ClauseKind::If => {
                if rule.condition.is_some() {
                    return Err(duplicate_clause(&label, clause.kind));
                }
                rule.condition = Some(condition(&label, &clause.term, types)?);
            }
            ClauseKind::Then => rule.outputs.push(output(&label, &clause.term, types)?),
            ClauseKind::Yield => {
                if rule.output.is_some() {
                    return Err(duplicate_clause(&label, clause.kind));
                }
                rule.output = Some(output(&label, &clause.term, types)?);
            }
        }
    }
    Ok(rule)
}

fn duplicate_clause(label: &str, kind: ClauseKind) -> DefinitionError {
    DefinitionError::DuplicateClause {
        rule: label.to_owned(),
        clause: kind.keyword(),
    }
}

fn condition(rule: &str, term: &ParsedTerm, types: &TypeRegistry) -> Result<Condition, DefinitionError> {
    match term {
        ParsedTerm::Literal(v) => Ok(Condition::Literal(v.clone())),
        ParsedTerm::TypeRef(name) => resolve_type(name, types).map(Condition::Type),
        ParsedTerm::Call { name, args } => expression(rule, name, args, types).map(Condition::Expression),
    }
}

fn output(rule: &str, term: &ParsedTerm, types: &TypeRegistry) -> Result<Output, DefinitionError> {
    match term {
        ParsedTerm::Literal(v) => Ok(Output::Literal(v.clone())),
        ParsedTerm::TypeRef(name) => resolve_type(name, types).map(|t| Output::Literal(Value::Type(t))),
        ParsedTerm::Call { name, args } => expression(rule, name, args, types).map(Output::Expression),
    }
}

fn resolve_type(name: &str, types: &TypeRegistry) -> Result<ValueType, DefinitionError> {
    types
        .resolve(name)
        .ok_or_else(|| DefinitionError::UnknownType { name: name.to_owned() })
}

fn expression(
    rule: &str,
    name: &str,
    args: &[(String, ParsedArg)],
    types: &TypeRegistry,
) -> Result<Expression, DefinitionError> {
    let mut p = Params::new(name, args)?;
    let expr: Expression = match name {
        "arithmetic" => Arithmetic {
            multiply: p.number("multiply")?,
            divide: p.number("divide")?,
            modulo: p.number("modulo")?,
            add: p.number("add")?,
            subtract: p.number("subtract")?,
        }
        .into(),
        "compare" => number_comparison(&mut p)?.into(),
        "count" => CollectionCountComparison(number_comparison(&mut p)?).into(),
        "lookup" => CollectionLookup {
            index: p.index("index")?,
            operation: p
                .option(
                    "operation",
                    &[
                        ("count", LookupOperation::Count),
                        ("first", LookupOperation::First),
                        ("last", LookupOperation::Last),
                        ("max", LookupOperation::Max),
                        ("min", LookupOperation::Min),
                    ],
                )?
                .unwrap_or_default(),
        }
        .into(),
        "double" => Double {
            value: p.number("value")?,
        }
        .into(),
        "enum" => {
            let enum_type = p.enum_type("type", types)?;
            let type_name = p.text("type_name")?;
            let definition = match (&enum_type, &type_name) {
                (Some(ValueType::Enum(name)), _) | (None, Some(name)) => {
                    types.enum_type(name).cloned()
                }
                _ => None,
            };
            Enumeration {
                definition,
                enum_type,
                type_name,
                value: p.value("value"),
            }
            .into()
        }
        "negate" => Negate.into(),
        "percentage" => Percentage { of: p.number("of")? }.into(),
        "random" => RandomNumber {
            lower_bound: p.integer("lower_bound")?,
            upper_bound: p.integer("upper_bound")?,
        }
        .into(),
        "check" => StringCheck {
            check_operation: p.option(
                "operation",
                &[
                    ("null_or_empty", CheckOperation::IsNullOrEmpty),
                    ("null_or_whitespace", CheckOperation::IsNullOrWhitespace),
                    ("lower_case", CheckOperation::IsLowerCase),
                    ("upper_case", CheckOperation::IsUpperCase),
                ],
            )?,
            starts_with: p.text("starts_with")?,
            ends_with: p.text("ends_with")?,
            contains: p.text("contains")?,
        }
        .into(),
        "format" => StringInterpolation {
            template: p.text("template")?,
        }
        .into(),
        "transform" => {
            let cases = [("default", CaseMode::Default), ("invariant", CaseMode::Invariant)];
            StringTransform {
                trim: p.option(
                    "trim",
                    &[
                        ("whole", TrimMode::Whole),
                        ("start", TrimMode::Start),
                        ("end", TrimMode::End),
                    ],
                )?,
                substring_start: p.index("substring_start")?,
                substring_end: p.index("substring_end")?,
                insert_text: p.text("insert_text")?,
                insert_index: p.index("insert_index")?,
                to_lower: p.option("to_lower", &cases)?,
                to_upper: p.option("to_upper", &cases)?,
                split_by: p.text("split_by")?,
            }
            .into()
        }
        "typeof" => TypeOf {
            type_value: p.type_ref("type", types)?,
            name: p.text("name")?,
        }
        .into(),
        _ => {
            return Err(DefinitionError::UnknownExpression {
                rule: rule.to_owned(),
                name: name.to_owned(),
            });
        }
    };
    p.finish()?;
    Ok(expr)
}

fn number_comparison(p: &mut Params<'_>) -> Result<NumberComparison, DefinitionError> {
    Ok(NumberComparison {
        is_equal_to: p.number("is_equal_to")?,
        is_not_equal_to: p.number("is_not_equal_to")?,
        is_greater_than: p.number("is_greater_than")?,
        is_greater_or_equal_to: p.number("is_greater_or_equal_to")?,
        is_lesser_than: p.number("is_lesser_than")?,
        is_lesser_or_equal_to: p.number("is_lesser_or_equal_to")?,
    })
}

/// Call arguments still to be consumed by an expression kind. Anything left
/// over once the kind has taken its parameters is unknown to it.
struct Params<'a> {
    expression: &'a str,
    args: Vec<(&'a str, &'a ParsedArg)>,
}

impl<'a> Params<'a> {
    fn new(expression: &'a str, args: &'a [(String, ParsedArg)]) -> Result<Self, DefinitionError> {
        let mut seen = HashSet::new();
        for (name, _) in args {
            if !seen.insert(name.as_str()) {
                return Err(DefinitionError::DuplicateParameter {
                    expression: expression.to_owned(),
                    parameter: name.clone(),
                });
            }
        }
        Ok(Self {
            expression,
            args: args.iter().map(|(n, a)| (n.as_str(), a)).collect(),
        })
    }

    fn take(&mut self, name: &str) -> Option<&'a ParsedArg> {
        let pos = self.args.iter().position(|(n, _)| *n == name)?;
        Some(self.args.swap_remove(pos).1)
    }

    fn invalid(&self, parameter: &str, expected: &'static str, found: &ParsedArg) -> DefinitionError {
        DefinitionError::InvalidParameter {
            expression: self.expression.to_owned(),
            parameter: parameter.to_owned(),
            expected,
            found: describe(found),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn number(&mut self, name: &str) -> Result<Option<f64>, DefinitionError> {
        match self.take(name) {
            None => Ok(None),
            Some(ParsedArg::Literal(Value::Int(v))) => Ok(Some(*v as f64)),
            Some(ParsedArg::Literal(Value::Float(v))) => Ok(Some(*v)),
            Some(other) => Err(self.invalid(name, "number", other)),
        }
    }

    fn integer(&mut self, name: &str) -> Result<Option<i64>, DefinitionError> {
        match self.take(name) {
            None => Ok(None),
            Some(ParsedArg::Literal(Value::Int(v))) => Ok(Some(*v)),
            Some(other) => Err(self.invalid(name, "integer", other)),
        }
    }

    fn index(&mut self, name: &str) -> Result<Option<usize>, DefinitionError> {
        match self.take(name) {
            None => Ok(None),
            Some(arg) => match arg {
                ParsedArg::Literal(Value::Int(v)) => usize::try_from(*v)
                    .map(Some)
                    .map_err(|_| self.invalid(name, "non-negative integer", arg)),
                _ => Err(self.invalid(name, "non-negative integer", arg)),
            },
        }
    }

    fn text(&mut self, name: &str) -> Result<Option<String>, DefinitionError> {
        match self.take(name) {
            None => Ok(None),
            Some(ParsedArg::Literal(Value::String(s))) => Ok(Some(s.clone())),
            Some(other) => Err(self.invalid(name, "string", other)),
        }
    }

    /// Any literal; a bare identifier is taken as its text.
    fn value(&mut self, name: &str) -> Option<Value> {
        self.take(name).map(|arg| match arg {
            ParsedArg::Literal(v) => v.clone(),
            ParsedArg::Ident(s) => Value::String(s.clone()),
        })
    }

    fn option<T: Copy>(&mut self, name: &str, choices: &[(&str, T)]) -> Result<Option<T>, DefinitionError> {
        match self.take(name) {
            None => Ok(None),
            Some(ParsedArg::Ident(word)) => choices
                .iter()
                .find(|(choice, _)| *choice == word.as_str())
                .map(|(_, v)| Some(*v))
                .ok_or_else(|| DefinitionError::UnknownOption {
                    expression: self.expression.to_owned(),
                    parameter: name.to_owned(),
                    option: word.clone(),
                }),
            Some(other) => Err(self.invalid(name, "option name", other)),
        }
    }

    fn type_ref(&mut self, name: &str, types: &TypeRegistry) -> Result<Option<ValueType>, DefinitionError> {
        match self.take(name) {
            None => Ok(None),
            Some(ParsedArg::Ident(type_name)) => resolve_type(type_name, types).map(Some),
            Some(other) => Err(self.invalid(name, "type name", other)),
        }
    }

    fn enum_type(&mut self, name: &str, types: &TypeRegistry) -> Result<Option<ValueType>, DefinitionError> {
        let Some(arg) = self.take(name) else {
            return Ok(None);
        };
        let ParsedArg::Ident(type_name) = arg else {
            return Err(self.invalid(name, "enum type name", arg));
        };
        match resolve_type(type_name, types)? {
            t @ ValueType::Enum(_) => Ok(Some(t)),
            _ => Err(self.invalid(name, "enum type name", arg)),
        }
    }

    fn finish(self) -> Result<(), DefinitionError> {
        match self.args.first() {
            Some((parameter, _)) => Err(DefinitionError::UnknownParameter {
                expression: self.expression.to_owned(),
                parameter: (*parameter).to_owned(),
            }),
            None => Ok(()),
        }
    }
}

fn describe(arg: &ParsedArg) -> String {
    match arg {
        ParsedArg::Literal(v) => v.kind(),
        ParsedArg::Ident(s) => format!("identifier '{s}'"),
    }
}
