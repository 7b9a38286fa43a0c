//! Value normalization applied on every write through the engine.
//!
//! All branches are idempotent: normalizing an already-normalized value
//! returns it unchanged, which keeps the engine's equality short-circuit
//! and the temporal round-trip law honest.

use serde_json::{Number, Value};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

use crate::spec::{FieldSpec, FieldType};

type FormatItems = &'static [time::format_description::BorrowedFormatItem<'static>];

const DATE_FORMAT: FormatItems = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: FormatItems = format_description!("[hour]:[minute]:[second]");
const SHORT_TIME_FORMAT: FormatItems = format_description!("[hour]:[minute]");
const NAIVE_DATETIME_FORMAT: FormatItems =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Normalizes a raw value for storage according to the field's type.
pub fn normalize_value(field: &FieldSpec, value: Value) -> Value {
    match field.kind {
        FieldType::Text
        | FieldType::Textarea
        | FieldType::Password
        | FieldType::Email
        | FieldType::Select
        | FieldType::Radio
        | FieldType::Multiselect
        | FieldType::CheckboxGroup
        | FieldType::TreeSelect
        | FieldType::Integer
        | FieldType::Images
        | FieldType::Files => value,
        FieldType::Checkbox => match value {
            Value::Null => Value::Bool(false),
            other => other,
        },
        FieldType::Decimal | FieldType::Currency => {
            round_number(value, field.precision_or_default())
        }
        FieldType::Phone | FieldType::Cpf => digits_capped(value, 11),
        FieldType::Cnpj => digits_capped(value, 14),
        FieldType::Date | FieldType::Datetime | FieldType::Time => {
            coerce_temporal(field.kind, &value)
        }
        FieldType::RangeDate => coerce_range(&value),
    }
}

/// Coerces a temporal value into its canonical string representation:
/// `YYYY-MM-DD` for dates, RFC 3339 for datetimes, `HH:MM:SS` for times.
/// Already-canonical values pass through unchanged; unparseable values are
/// left for the validator to report.
pub fn coerce_temporal(kind: FieldType, value: &Value) -> Value {
    let Some(text) = value.as_str() else {
        return value.clone();
    };

    match kind {
        FieldType::Date => coerce_date(text)
            .map(Value::String)
            .unwrap_or_else(|| value.clone()),
        FieldType::Datetime => coerce_datetime(text)
            .map(Value::String)
            .unwrap_or_else(|| value.clone()),
        FieldType::Time => coerce_time(text)
            .map(Value::String)
            .unwrap_or_else(|| value.clone()),
        _ => value.clone(),
    }
}

fn coerce_range(value: &Value) -> Value {
    match value.as_array() {
        Some(pair) if pair.len() == 2 => Value::Array(
            pair.iter()
                .map(|entry| coerce_temporal(FieldType::Date, entry))
                .collect(),
        ),
        _ => value.clone(),
    }
}

fn coerce_date(text: &str) -> Option<String> {
    if let Ok(date) = Date::parse(text, DATE_FORMAT) {
        return date.format(DATE_FORMAT).ok();
    }
    // Datetime inputs collapse to their date component.
    if let Ok(datetime) = OffsetDateTime::parse(text, &Rfc3339) {
        return datetime.date().format(DATE_FORMAT).ok();
    }
    if let Ok(datetime) = PrimitiveDateTime::parse(text, NAIVE_DATETIME_FORMAT) {
        return datetime.date().format(DATE_FORMAT).ok();
    }
    None
}

fn coerce_datetime(text: &str) -> Option<String> {
    if let Ok(datetime) = OffsetDateTime::parse(text, &Rfc3339) {
        return datetime.format(&Rfc3339).ok();
    }
    if let Ok(datetime) = PrimitiveDateTime::parse(text, NAIVE_DATETIME_FORMAT) {
        return datetime.assume_utc().format(&Rfc3339).ok();
    }
    if let Ok(date) = Date::parse(text, DATE_FORMAT) {
        return date.midnight().assume_utc().format(&Rfc3339).ok();
    }
    None
}

fn coerce_time(text: &str) -> Option<String> {
    if let Ok(time) = Time::parse(text, TIME_FORMAT) {
        return time.format(TIME_FORMAT).ok();
    }
    if let Ok(time) = Time::parse(text, SHORT_TIME_FORMAT) {
        return time.format(TIME_FORMAT).ok();
    }
    None
}

fn round_number(value: Value, precision: u8) -> Value {
    let Some(number) = value.as_f64() else {
        return value;
    };
    let factor = 10f64.powi(precision as i32);
    let rounded = (number * factor).round() / factor;
    Number::from_f64(rounded)
        .map(Value::Number)
        .unwrap_or(value)
}

fn digits_capped(value: Value, cap: usize) -> Value {
    let Some(text) = value.as_str() else {
        return value;
    };
    let digits: String = text.chars().filter(|ch| ch.is_ascii_digit()).take(cap).collect();
    Value::String(digits)
}
