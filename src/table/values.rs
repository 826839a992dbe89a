//! Cell value normalization.
//!
//! Source tables arrive with loosely typed cells: codes stored as numbers,
//! years stored as floats, areas stored as text. These helpers read them the
//! same way regardless of the source format.

use polars::prelude::AnyValue;

/// Render a number as text, dropping the fraction of whole values
pub fn format_number(value: f64) -> Option<String> {
    value.is_finite().then(|| value.to_string())
}

/// Cell as text, `None` for nulls
pub fn cell_text(value: &AnyValue) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::Float64(v) => format_number(*v),
        AnyValue::Float32(v) => format_number(f64::from(*v)),
        other => match other.get_str() {
            Some(text) => Some(text.to_string()),
            None => Some(other.to_string()),
        },
    }
}

/// Trimmed text used for matching codes and floor ids; blank cells are `None`
pub fn cell_key(value: &AnyValue) -> Option<String> {
    cell_text(value)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Finite numeric value, parsing text cells
pub fn cell_number(value: &AnyValue) -> Option<f64> {
    let number = match value {
        AnyValue::Null | AnyValue::Boolean(_) => None,
        other => match other.get_str() {
            Some(text) => text.trim().parse::<f64>().ok(),
            None => other.extract::<f64>(),
        },
    };
    number.filter(|v| v.is_finite())
}

/// Whole-number year; fractional or non-numeric cells are `None`
pub fn cell_year(value: &AnyValue) -> Option<i64> {
    if let Some(text) = value.get_str() {
        let text = text.trim();
        return text
            .parse::<i64>()
            .ok()
            .or_else(|| text.parse::<f64>().ok().and_then(whole_number));
    }
    match value {
        AnyValue::Float64(v) => whole_number(*v),
        AnyValue::Float32(v) => whole_number(f64::from(*v)),
        AnyValue::Null | AnyValue::Boolean(_) => None,
        other => other.extract::<i64>(),
    }
}

fn whole_number(value: f64) -> Option<i64> {
    (value.is_finite() && value.fract() == 0.0).then_some(value as i64)
}
