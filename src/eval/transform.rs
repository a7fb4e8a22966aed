//! Local application of transforms to JSON values.

use serde_json::Value;

use crate::error::EvalError;
use crate::model::{Transform, TransformFunction, TransformPipeline};

/// Apply every transform in order, left to right.
pub fn apply_pipeline(pipeline: &TransformPipeline, value: Value) -> Result<Value, EvalError> {
    pipeline
        .iter()
        .try_fold(value, |acc, transform| apply_transform(transform, acc))
}

/// Apply a single transform.
///
/// NULL passes through every function except COALESCE and CONCAT. Temporal
/// functions are never evaluated locally, NULL input included.
pub fn apply_transform(transform: &Transform, value: Value) -> Result<Value, EvalError> {
    let function = transform.function;

    match function {
        TransformFunction::Coalesce => {
            if value.is_null() {
                required(transform, "default").cloned()
            } else {
                Ok(value)
            }
        }
        TransformFunction::Concat => {
            let suffix = display(required(transform, "value")?);
            Ok(Value::String(format!("{}{}", display(&value), suffix)))
        }
        _ if value.is_null() && !function.is_temporal() => Ok(Value::Null),
        TransformFunction::Lower => map_str(function, &value, |s| s.to_lowercase()),
        TransformFunction::Upper => map_str(function, &value, |s| s.to_uppercase()),
        TransformFunction::Trim => map_str(function, &value, |s| s.trim().to_string()),
        TransformFunction::Substring => {
            let start = int_param(transform, "start")?.unwrap_or(1).max(1) as usize;
            let length = int_param(transform, "length")?;
            map_str(function, &value, |s| {
                let chars = s.chars().skip(start - 1);
                match length {
                    Some(n) => chars.take(n.max(0) as usize).collect(),
                    None => chars.collect(),
                }
            })
        }
        TransformFunction::Round => {
            let decimals = int_param(transform, "decimals")?.unwrap_or(0);
            let decimals = i32::try_from(decimals).map_err(|_| EvalError::InvalidInput {
                function: function.to_string(),
                value: format!("decimals = {}", decimals),
            })?;
            let factor = 10f64.powi(decimals);
            map_num(function, &value, |n| (n * factor).round() / factor)
        }
        TransformFunction::Abs => match value.as_i64() {
            Some(i) => Ok(Value::from(i.saturating_abs())),
            None => map_num(function, &value, f64::abs),
        },
        TransformFunction::Ceil => match value.as_i64() {
            Some(_) => Ok(value),
            None => map_num(function, &value, f64::ceil),
        },
        TransformFunction::Floor => match value.as_i64() {
            Some(_) => Ok(value),
            None => map_num(function, &value, f64::floor),
        },
        TransformFunction::Cast => {
            let target = required(transform, "type")?
                .as_str()
                .unwrap_or_default()
                .to_lowercase();
            cast(function, &value, &target)
        }
        TransformFunction::Extract | TransformFunction::DateTrunc | TransformFunction::DatePart => {
            Err(EvalError::UnsupportedTransform(function.to_string()))
        }
    }
}

fn required<'a>(transform: &'a Transform, param: &str) -> Result<&'a Value, EvalError> {
    transform.param(param).ok_or_else(|| EvalError::MissingParam {
        function: transform.function.to_string(),
        param: param.to_string(),
    })
}

fn int_param(transform: &Transform, param: &str) -> Result<Option<i64>, EvalError> {
    match transform.param(param) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_i64()
            .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
            .map(Some)
            .ok_or_else(|| EvalError::MissingParam {
                function: transform.function.to_string(),
                param: param.to_string(),
            }),
    }
}

/// Render a value the way string concatenation sees it.
fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn invalid(function: TransformFunction, value: &Value) -> EvalError {
    EvalError::InvalidInput {
        function: function.to_string(),
        value: value.to_string(),
    }
}

fn map_str(
    function: TransformFunction,
    value: &Value,
    f: impl FnOnce(&str) -> String,
) -> Result<Value, EvalError> {
    value
        .as_str()
        .map(|s| Value::String(f(s)))
        .ok_or_else(|| invalid(function, value))
}

fn map_num(
    function: TransformFunction,
    value: &Value,
    f: impl FnOnce(f64) -> f64,
) -> Result<Value, EvalError> {
    value
        .as_f64()
        .and_then(|n| serde_json::Number::from_f64(f(n)))
        .map(Value::Number)
        .ok_or_else(|| invalid(function, value))
}

fn cast(function: TransformFunction, value: &Value, target: &str) -> Result<Value, EvalError> {
    let result = match target {
        "integer" | "int" | "bigint" => match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
        .map(Value::from),
        "float" | "double" | "decimal" | "numeric" => match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number),
        "string" | "text" | "varchar" => Some(Value::String(display(value))),
        "boolean" | "bool" => match value {
            Value::Bool(b) => Some(Value::Bool(*b)),
            Value::Number(n) => n.as_f64().map(|f| Value::Bool(f != 0.0)),
            Value::String(s) => match s.trim().to_lowercase().as_str() {
                "true" | "t" | "1" => Some(Value::Bool(true)),
                "false" | "f" | "0" => Some(Value::Bool(false)),
                _ => None,
            },
            _ => None,
        },
        _ => None,
    };
    result.ok_or_else(|| invalid(function, value))
}
