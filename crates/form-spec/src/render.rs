use serde_json::{Map, Value, json};

use crate::format::{
    CNPJ_MASK, CPF_MASK, NumberLocale, PHONE_MASK, apply_mask, format_number,
};
use crate::spec::{FieldSpec, FieldType, FormSchema, SelectOption, TreeNode};

/// Describes a single field for render outputs.
#[derive(Debug, Clone)]
pub struct RenderField {
    pub id: String,
    pub label: String,
    pub kind: FieldType,
    pub required: bool,
    pub placeholder: Option<String>,
    pub options: Vec<SelectOption>,
    /// Raw stored value, exactly as the value store holds it.
    pub value: Option<Value>,
    /// Formatted value for display only (masked identifiers, locale
    /// numbers, option labels). Never written back to the store.
    pub display: Option<String>,
}

/// One section of the payload; `columns` is a layout hint.
#[derive(Debug, Clone)]
pub struct RenderSection {
    pub title: Option<String>,
    pub columns: u32,
    pub fields: Vec<RenderField>,
}

/// Collected payload used by both text and JSON renderers.
#[derive(Debug, Clone)]
pub struct RenderPayload {
    pub sections: Vec<RenderSection>,
}

/// Builds the renderer payload from the schema and the current values.
pub fn build_render_payload(
    schema: &FormSchema,
    values: &Value,
    locale: &NumberLocale,
) -> RenderPayload {
    let sections = schema
        .sections
        .iter()
        .map(|section| RenderSection {
            title: section.title.clone(),
            columns: section.columns,
            fields: section
                .fields
                .iter()
                .map(|field| {
                    let value = values.get(&field.id).filter(|v| !v.is_null()).cloned();
                    let display = value
                        .as_ref()
                        .map(|value| display_value(field, value, locale));
                    RenderField {
                        id: field.id.clone(),
                        label: field.label.clone(),
                        kind: field.kind,
                        required: field.required,
                        placeholder: field.placeholder.clone(),
                        options: field.options.clone(),
                        value,
                        display,
                    }
                })
                .collect(),
        })
        .collect();

    RenderPayload { sections }
}

/// Renders the payload as a structured JSON-friendly value.
pub fn render_json_ui(payload: &RenderPayload) -> Value {
    let sections = payload
        .sections
        .iter()
        .map(|section| {
            let fields = section
                .fields
                .iter()
                .map(|field| {
                    let mut map = Map::new();
                    map.insert("id".into(), Value::String(field.id.clone()));
                    map.insert("label".into(), Value::String(field.label.clone()));
                    map.insert(
                        "type".into(),
                        serde_json::to_value(field.kind).unwrap_or(Value::Null),
                    );
                    map.insert("required".into(), Value::Bool(field.required));
                    if let Some(placeholder) = &field.placeholder {
                        map.insert("placeholder".into(), Value::String(placeholder.clone()));
                    }
                    if !field.options.is_empty() {
                        map.insert(
                            "options".into(),
                            serde_json::to_value(&field.options).unwrap_or(Value::Null),
                        );
                    }
                    if let Some(value) = &field.value {
                        map.insert("value".into(), value.clone());
                    }
                    if let Some(display) = &field.display {
                        map.insert("display".into(), Value::String(display.clone()));
                    }
                    Value::Object(map)
                })
                .collect::<Vec<_>>();

            json!({
                "title": section.title,
                "columns": section.columns,
                "fields": fields,
            })
        })
        .collect::<Vec<_>>();

    json!({ "sections": sections })
}

/// Renders the payload as human-friendly text.
pub fn render_text(payload: &RenderPayload) -> String {
    let mut lines = Vec::new();
    for section in &payload.sections {
        if let Some(title) = &section.title {
            lines.push(format!("== {} ==", title));
        }
        for field in &section.fields {
            let mut entry = format!(" - {} ({})", field.id, field.label);
            if field.required {
                entry.push_str(" [required]");
            }
            if let Some(display) = &field.display {
                entry.push_str(&format!(" = {}", display));
            }
            lines.push(entry);
        }
    }
    lines.join("\n")
}

fn display_value(field: &FieldSpec, value: &Value, locale: &NumberLocale) -> String {
    match field.kind {
        FieldType::Decimal => number_display(field, value, locale, None),
        FieldType::Currency => number_display(field, value, locale, field.prefix.as_deref()),
        FieldType::Phone => masked_display(value, PHONE_MASK),
        FieldType::Cpf => masked_display(value, CPF_MASK),
        FieldType::Cnpj => masked_display(value, CNPJ_MASK),
        FieldType::Select | FieldType::Radio => value
            .as_str()
            .map(|stored| option_label(field, stored))
            .unwrap_or_else(|| plain_display(value)),
        FieldType::Multiselect | FieldType::CheckboxGroup => value
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(|stored| option_label(field, stored))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_else(|| plain_display(value)),
        FieldType::TreeSelect => value
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(|stored| tree_label(&field.tree_data, stored))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_else(|| plain_display(value)),
        _ => plain_display(value),
    }
}

fn number_display(
    field: &FieldSpec,
    value: &Value,
    locale: &NumberLocale,
    prefix: Option<&str>,
) -> String {
    let Some(number) = value.as_f64() else {
        return plain_display(value);
    };
    let formatted = format_number(number, field.precision_or_default(), locale);
    match prefix {
        Some(prefix) => format!("{} {}", prefix, formatted),
        None => formatted,
    }
}

fn masked_display(value: &Value, mask: &str) -> String {
    value
        .as_str()
        .map(|digits| apply_mask(digits, mask))
        .unwrap_or_else(|| plain_display(value))
}

fn option_label(field: &FieldSpec, stored: &str) -> String {
    field
        .options
        .iter()
        .find(|option| option.value == stored)
        .map(|option| option.label.clone())
        .unwrap_or_else(|| stored.to_string())
}

fn tree_label(nodes: &[TreeNode], stored: &str) -> String {
    fn find(nodes: &[TreeNode], stored: &str) -> Option<String> {
        for node in nodes {
            if node.value == stored {
                return Some(node.label.clone());
            }
            if let Some(label) = find(&node.children, stored) {
                return Some(label);
            }
        }
        None
    }
    find(nodes, stored).unwrap_or_else(|| stored.to_string())
}

fn plain_display(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}
