use serde_json::json;

use form_spec::spec::{ExtraRule, FieldSpec, FieldType, FormSchema, Section};
use form_spec::validate;

fn field(id: &str, kind: FieldType, label: &str, required: bool) -> FieldSpec {
    FieldSpec {
        id: id.into(),
        kind,
        label: label.into(),
        placeholder: None,
        required,
        prefix: None,
        options: vec![],
        tree_data: vec![],
        format: None,
        precision: None,
        step: None,
        extra_rules: vec![],
    }
}

fn schema_of(fields: Vec<FieldSpec>) -> FormSchema {
    FormSchema::new(vec![Section {
        title: None,
        columns: 1,
        fields,
    }])
    .expect("unique ids")
}

#[test]
fn missing_required_field_reports_label() {
    let schema = schema_of(vec![field("name", FieldType::Text, "Name", true)]);
    let result = validate(&schema, &json!({}));
    assert!(!result.valid);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].field_id, "name");
    assert_eq!(result.errors[0].message, "Name is required");
    assert_eq!(result.errors[0].code, "required");
}

#[test]
fn valid_cpf_with_required_text_passes() {
    let schema = schema_of(vec![
        field("name", FieldType::Text, "Name", true),
        field("document", FieldType::Cpf, "Document", false),
    ]);
    let result = validate(&schema, &json!({ "name": "Ana", "document": "11144477735" }));
    assert!(result.valid, "unexpected errors: {:?}", result.errors);
}

#[test]
fn flipped_cpf_check_digit_blocks_submit() {
    let schema = schema_of(vec![
        field("name", FieldType::Text, "Name", true),
        field("document", FieldType::Cpf, "Document", false),
    ]);
    let result = validate(&schema, &json!({ "name": "Ana", "document": "11144477736" }));
    assert!(!result.valid);
    assert_eq!(result.errors[0].field_id, "document");
    assert_eq!(result.errors[0].message, "invalid tax ID");
}

#[test]
fn cnpj_checked_when_present() {
    let schema = schema_of(vec![field("company", FieldType::Cnpj, "Company", false)]);
    assert!(validate(&schema, &json!({ "company": "11222333000181" })).valid);
    assert!(!validate(&schema, &json!({ "company": "11222333000180" })).valid);
}

#[test]
fn optional_empty_field_skips_type_checks() {
    let schema = schema_of(vec![field("document", FieldType::Cpf, "Document", false)]);
    assert!(validate(&schema, &json!({})).valid);
    assert!(validate(&schema, &json!({ "document": "" })).valid);
}

#[test]
fn phone_requires_exactly_eleven_digits() {
    let schema = schema_of(vec![field("phone", FieldType::Phone, "Phone", false)]);
    let short = validate(&schema, &json!({ "phone": "1199999888" }));
    assert!(!short.valid);
    assert_eq!(short.errors[0].message, "incomplete phone number");
    assert!(validate(&schema, &json!({ "phone": "11999998888" })).valid);
}

#[test]
fn email_shape_is_enforced() {
    let schema = schema_of(vec![field("mail", FieldType::Email, "Mail", false)]);
    assert!(validate(&schema, &json!({ "mail": "ana@example.com" })).valid);
    assert!(!validate(&schema, &json!({ "mail": "not-an-email" })).valid);
}

#[test]
fn extra_rules_run_in_order_and_first_failure_wins() {
    let mut spec = field("code", FieldType::Text, "Code", false);
    spec.extra_rules = vec![
        ExtraRule {
            pattern: None,
            min: None,
            max: None,
            min_len: Some(4),
            max_len: None,
            message: "too short".into(),
        },
        ExtraRule {
            pattern: Some("^[A-Z]+$".into()),
            min: None,
            max: None,
            min_len: None,
            max_len: None,
            message: "must be uppercase".into(),
        },
    ];
    let schema = schema_of(vec![spec]);

    let result = validate(&schema, &json!({ "code": "ab" }));
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].message, "too short");

    let result = validate(&schema, &json!({ "code": "abcd" }));
    assert_eq!(result.errors[0].message, "must be uppercase");

    assert!(validate(&schema, &json!({ "code": "ABCD" })).valid);
}

#[test]
fn duplicate_ids_rejected_at_construction() {
    let result = FormSchema::new(vec![Section {
        title: None,
        columns: 1,
        fields: vec![
            field("dup", FieldType::Text, "A", false),
            field("dup", FieldType::Text, "B", false),
        ],
    }]);
    assert!(result.is_err());
}

#[test]
fn required_check_precedes_type_check() {
    let schema = schema_of(vec![field("document", FieldType::Cpf, "Document", true)]);
    let result = validate(&schema, &json!({}));
    assert_eq!(result.errors[0].code, "required");
}
