use crate::types::{ExpressionError, Value};

/// Formats the input into a composite template such as `"{0} of {1}"`.
///
/// A list input supplies one positional argument per item; any other input is
/// argument 0. Placeholders take the form `{index[,alignment][:format]}` and
/// `{{` / `}}` produce literal braces. Numeric formats: `F<n>` fixed-point,
/// `N<n>` fixed-point with digit grouping, `P<n>` percentage, `D<n>`
/// zero-padded integer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "binary-cache",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct StringInterpolation {
    pub template: Option<String>,
}

impl StringInterpolation {
    pub(crate) const NAME: &'static str = "string interpolation";

    pub(crate) fn calculate(&self, value: &Value) -> Result<Value, ExpressionError> {
        let template = self
            .template
            .as_deref()
            .ok_or(ExpressionError::MissingConfiguration {
                expression: Self::NAME,
                detail: "a format template is required",
            })?;
        let args = match value {
            Value::List(items) => items.as_slice(),
            single => std::slice::from_ref(single),
        };
        format_composite(template, args)
            .map(Value::String)
            .map_err(|detail| ExpressionError::Format {
                expression: Self::NAME,
                detail,
            })
    }
}

/// Widest alignment accepted; larger widths are rejected rather than padded.
const MAX_ALIGNMENT: u64 = 999_999;
/// Largest digit count accepted by the numeric format specifiers.
const MAX_PRECISION: usize = 99;

fn format_composite(template: &str, args: &[Value]) -> Result<String, String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => return Err("unmatched '}'".to_owned()),
            '{' => {
                let mut spec = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => spec.push(ch),
                        None => return Err("unclosed placeholder".to_owned()),
                    }
                }
                write_placeholder(&mut out, &spec, args)?;
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

fn write_placeholder(out: &mut String, spec: &str, args: &[Value]) -> Result<(), String> {
    let (head, format) = match spec.split_once(':') {
        Some((head, format)) => (head, Some(format)),
        None => (spec, None),
    };
    let (index, alignment) = match head.split_once(',') {
        Some((index, align)) => (index, Some(align)),
        None => (head, None),
    };
    let index: usize = index
        .trim()
        .parse()
        .map_err(|_| format!("invalid placeholder index '{}'", index.trim()))?;
    let arg = args
        .get(index)
        .ok_or_else(|| format!("placeholder {index} has no argument ({} given)", args.len()))?;

    let text = match format {
        Some(f) if !f.is_empty() => format_number(arg, f)?,
        _ => arg.to_string(),
    };

    match alignment {
        None => out.push_str(&text),
        Some(align) => {
            let width: i64 = align
                .trim()
                .parse()
                .map_err(|_| format!("invalid alignment '{}'", align.trim()))?;
            if width.unsigned_abs() > MAX_ALIGNMENT {
                return Err(format!("alignment {width} exceeds {MAX_ALIGNMENT}"));
            }
            let pad = usize::try_from(width.unsigned_abs())
                .unwrap_or(usize::MAX)
                .saturating_sub(text.chars().count());
            let fill = " ".repeat(pad);
            if width < 0 {
                out.push_str(&text);
                out.push_str(&fill);
            } else {
                out.push_str(&fill);
                out.push_str(&text);
            }
        }
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn format_number(arg: &Value, format: &str) -> Result<String, String> {
    let n = match arg {
        Value::Int(v) => *v as f64,
        Value::Float(v) => *v,
        other => return Err(format!("format '{format}' requires a number, found {}", other.kind())),
    };
    let mut spec = format.chars();
    let kind = spec.next().map(|c| c.to_ascii_uppercase());
    let digits = spec.as_str();
    let precision = |default: usize| -> Result<usize, String> {
        if digits.is_empty() {
            return Ok(default);
        }
        let precision: usize = digits
            .parse()
            .map_err(|_| format!("invalid precision in format '{format}'"))?;
        if precision > MAX_PRECISION {
            return Err(format!("precision in format '{format}' exceeds {MAX_PRECISION}"));
        }
        Ok(precision)
    };
    match kind {
        Some('F') => Ok(format!("{:.*}", precision(2)?, n)),
        Some('N') => Ok(group_thousands(&format!("{:.*}", precision(2)?, n))),
        Some('P') => Ok(format!("{:.*}%", precision(2)?, n * 100.0)),
        Some('D') => match arg {
            Value::Int(v) => {
                let width = precision(0)?;
                let sign = if *v < 0 { "-" } else { "" };
                Ok(format!("{sign}{:0width$}", v.unsigned_abs()))
            }
            _ => Err(format!("format '{format}' requires an integer")),
        },
        _ => Err(format!("unsupported format specifier '{format}'")),
    }
}

fn group_thousands(fixed: &str) -> String {
    let (sign, unsigned) = fixed.strip_prefix('-').map_or(("", fixed), |rest| ("-", rest));
    let (int_part, frac) = unsigned.split_once('.').map_or((unsigned, None), |(i, f)| (i, Some(f)));
    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    match frac {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
