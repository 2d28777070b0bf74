use std::time::Instant;

use tracing::{debug, trace};

use crate::types::ConversionReport;
use crate::{Condition, ExpressionError, Output, Rule, Scope, Value};

pub(crate) fn check_rule(rule: &Rule, value: &Value, scope: &mut Scope) -> Result<bool, ExpressionError> {
    if let Some(condition) = &rule.condition {
        return check_condition(condition, value, scope);
    }
    for condition in &rule.conditions {
        if !check_condition(condition, value, scope)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn check_condition(condition: &Condition, value: &Value, scope: &mut Scope) -> Result<bool, ExpressionError> {
    match condition {
        Condition::Type(t) => Ok(value.value_type().as_ref() == Some(t)),
        Condition::Expression(expr) => {
            if !expr.is_condition() {
                return Err(ExpressionError::NotACondition {
                    expression: expr.name(),
                });
            }
            Ok(expr.calculate(value, scope)? == Value::Bool(true))
        }
        Condition::Literal(literal) => Ok(value == literal),
    }
}

pub(crate) fn convert_rule(rule: &Rule, value: &Value, scope: &mut Scope) -> Result<Value, ExpressionError> {
    if let Some(output) = &rule.output {
        return apply_output(output, value, scope);
    }
    let mut current = value.clone();
    for output in &rule.outputs {
        current = apply_output(output, &current, scope)?;
        trace!(output = %output, result = ?current, "applied output");
    }
    Ok(current)
}

fn apply_output(output: &Output, value: &Value, scope: &mut Scope) -> Result<Value, ExpressionError> {
    match output {
        Output::Expression(expr) => expr.calculate(value, scope),
        Output::Literal(literal) => Ok(literal.clone()),
    }
}

/// First matching rule wins; with no match the value passes through unchanged.
pub(crate) fn convert(rules: &[Rule], value: &Value, scope: &mut Scope) -> Result<Value, ExpressionError> {
    match find_match(rules, value, scope)? {
        Some(idx) => convert_rule(&rules[idx], value, scope),
        None => Ok(value.clone()),
    }
}

pub(crate) fn convert_detailed(
    rules: &[Rule],
    value: &Value,
    scope: &mut Scope,
) -> Result<ConversionReport, ExpressionError> {
    let start = Instant::now();
    let matched = find_match(rules, value, scope)?;
    let output = match matched {
        Some(idx) => convert_rule(&rules[idx], value, scope)?,
        None => value.clone(),
    };
    let checked = matched.map_or(rules.len(), |idx| idx + 1);
    let rule_name = matched.and_then(|idx| rules[idx].name.clone());
    Ok(ConversionReport::new(
        matched,
        rule_name,
        checked,
        output,
        start.elapsed(),
    ))
}

fn find_match(rules: &[Rule], value: &Value, scope: &mut Scope) -> Result<Option<usize>, ExpressionError> {
    for (idx, rule) in rules.iter().enumerate() {
        let matched = check_rule(rule, value, scope)?;
        trace!(rule = idx, name = rule.name.as_deref(), matched, "checked rule");
        if matched {
            debug!(rule = idx, name = rule.name.as_deref(), "rule matched");
            return Ok(Some(idx));
        }
    }
    debug!(rules = rules.len(), "no rule matched, passing value through");
    Ok(None)
}
