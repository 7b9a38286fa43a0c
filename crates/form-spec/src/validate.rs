use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::checksum::{validate_cnpj, validate_cpf};
use crate::spec::{ExtraRule, FieldSpec, FieldType, FormSchema};

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
});

/// One field-local rejection raised during validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationError {
    pub field_id: String,
    pub message: String,
    pub code: String,
}

/// Result of validating a full value snapshot against a schema. Cross-field
/// state is just the union of per-field rejections; fields validate
/// independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationError>,
}

/// Validates every field in the schema against the given value snapshot.
///
/// Per field the order is: required check, then the type-implied check,
/// then `extra_rules` in listed order; the first failure wins and later
/// rules for that field are skipped.
pub fn validate(schema: &FormSchema, values: &Value) -> ValidationResult {
    let mut errors = Vec::new();

    for field in schema.fields() {
        let value = values.get(&field.id).cloned().unwrap_or(Value::Null);
        if let Some(error) = validate_field(field, &value) {
            errors.push(error);
        }
    }

    ValidationResult {
        valid: errors.is_empty(),
        errors,
    }
}

fn validate_field(field: &FieldSpec, value: &Value) -> Option<ValidationError> {
    if is_empty(value) {
        if field.required {
            return Some(error(
                field,
                format!("{} is required", field.label),
                "required",
            ));
        }
        // Optional empty fields skip every further rule.
        return None;
    }

    if let Some(failure) = type_implied_check(field, value) {
        return Some(failure);
    }

    for rule in &field.extra_rules {
        if !rule_passes(rule, value) {
            return Some(error(field, rule.message.clone(), "rule"));
        }
    }

    None
}

fn type_implied_check(field: &FieldSpec, value: &Value) -> Option<ValidationError> {
    match field.kind {
        FieldType::Email => {
            let text = value.as_str()?;
            (!EMAIL_SHAPE.is_match(text))
                .then(|| error(field, "invalid email address".into(), "email"))
        }
        FieldType::Phone => {
            let digits = digit_count(value);
            // The normalizer caps at 11; submit additionally requires all 11.
            (digits != 11)
                .then(|| error(field, "incomplete phone number".into(), "phone_incomplete"))
        }
        FieldType::Cpf => {
            let text = value.as_str()?;
            (!validate_cpf(text)).then(|| error(field, "invalid tax ID".into(), "tax_id"))
        }
        FieldType::Cnpj => {
            let text = value.as_str()?;
            (!validate_cnpj(text)).then(|| error(field, "invalid tax ID".into(), "tax_id"))
        }
        _ => None,
    }
}

fn rule_passes(rule: &ExtraRule, value: &Value) -> bool {
    if let Some(pattern) = &rule.pattern
        && let Some(text) = value.as_str()
        && let Ok(regex) = Regex::new(pattern)
        && !regex.is_match(text)
    {
        return false;
    }

    if let Some(min) = rule.min
        && let Some(number) = value.as_f64()
        && number < min
    {
        return false;
    }

    if let Some(max) = rule.max
        && let Some(number) = value.as_f64()
        && number > max
    {
        return false;
    }

    if let Some(min_len) = rule.min_len
        && let Some(text) = value.as_str()
        && text.chars().count() < min_len
    {
        return false;
    }

    if let Some(max_len) = rule.max_len
        && let Some(text) = value.as_str()
        && text.chars().count() > max_len
    {
        return false;
    }

    true
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn digit_count(value: &Value) -> usize {
    value
        .as_str()
        .map(|text| text.chars().filter(|ch| ch.is_ascii_digit()).count())
        .unwrap_or(0)
}

fn error(field: &FieldSpec, message: String, code: &str) -> ValidationError {
    ValidationError {
        field_id: field.id.clone(),
        message,
        code: code.to_string(),
    }
}
