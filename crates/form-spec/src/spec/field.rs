use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Supported field input types.
///
/// The wire format is kebab-case; a type string this build does not know
/// deserializes as [`FieldType::Text`] so older schemas keep rendering as
/// plain text inputs instead of failing to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    Textarea,
    Password,
    Email,
    Integer,
    Decimal,
    Currency,
    Date,
    Datetime,
    Time,
    RangeDate,
    Select,
    Multiselect,
    Checkbox,
    CheckboxGroup,
    Radio,
    Phone,
    Cpf,
    Cnpj,
    TreeSelect,
    Images,
    Files,
    // The catch-all variant has to come last for the serde derive.
    #[default]
    #[serde(other)]
    Text,
}

impl FieldType {
    /// True for the temporal types whose stored values go through
    /// canonical coercion.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            FieldType::Date | FieldType::Datetime | FieldType::Time | FieldType::RangeDate
        )
    }

    /// True for the attachment-backed types handled by the attachment
    /// manager.
    pub fn is_attachment(&self) -> bool {
        matches!(self, FieldType::Images | FieldType::Files)
    }
}

/// One selectable option for select/multiselect/radio/checkbox-group
/// fields. The stored value is always `value`, never `label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// Node of a hierarchical option tree for tree-select fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TreeNode {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

/// Declarative caller-supplied rule, evaluated after the built-in checks
/// in listed order; the first failing rule wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExtraRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_len: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_len: Option<usize>,
    pub message: String,
}

/// Definition of a single field inside a form section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldSpec {
    /// Unique across the whole schema; the value store is keyed by it.
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: FieldType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Display prefix for currency fields (e.g. "R$"); never stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tree_data: Vec<TreeNode>,
    /// Display-format hint for temporal fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Fixed-point precision for decimal/currency fields; defaults to 2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_rules: Vec<ExtraRule>,
}

impl FieldSpec {
    /// Effective fixed-point precision for numeric formatting.
    pub fn precision_or_default(&self) -> u8 {
        self.precision.unwrap_or(2)
    }
}
