use serde_json::json;

use form_spec::spec::{FieldSpec, FieldType, FormSchema, Section, SelectOption, TreeNode};
use form_spec::{NumberLocale, build_render_payload, render_json_ui, render_text};

fn field(id: &str, kind: FieldType, label: &str) -> FieldSpec {
    FieldSpec {
        id: id.into(),
        kind,
        label: label.into(),
        placeholder: None,
        required: false,
        prefix: None,
        options: vec![],
        tree_data: vec![],
        format: None,
        precision: None,
        step: None,
        extra_rules: vec![],
    }
}

fn sample_schema() -> FormSchema {
    let mut price = field("price", FieldType::Currency, "Price");
    price.prefix = Some("R$".into());

    let mut status = field("status", FieldType::Select, "Status");
    status.options = vec![
        SelectOption {
            label: "Active".into(),
            value: "active".into(),
        },
        SelectOption {
            label: "Inactive".into(),
            value: "inactive".into(),
        },
    ];

    FormSchema::new(vec![Section {
        title: Some("Details".into()),
        columns: 2,
        fields: vec![
            field("document", FieldType::Cpf, "Document"),
            price,
            status,
        ],
    }])
    .expect("unique ids")
}

#[test]
fn payload_preserves_sections_and_layout_hints() {
    let payload = build_render_payload(&sample_schema(), &json!({}), &NumberLocale::default());
    assert_eq!(payload.sections.len(), 1);
    assert_eq!(payload.sections[0].columns, 2);
    assert_eq!(payload.sections[0].fields.len(), 3);
    assert_eq!(payload.sections[0].title.as_deref(), Some("Details"));
}

#[test]
fn masked_identifier_display_keeps_raw_value() {
    let values = json!({ "document": "11144477735" });
    let payload = build_render_payload(&sample_schema(), &values, &NumberLocale::default());
    let document = &payload.sections[0].fields[0];
    assert_eq!(document.value, Some(json!("11144477735")));
    assert_eq!(document.display.as_deref(), Some("111.444.777-35"));
}

#[test]
fn currency_display_uses_locale_and_prefix() {
    let values = json!({ "price": 1234.5 });
    let payload = build_render_payload(&sample_schema(), &values, &NumberLocale::default());
    let price = &payload.sections[0].fields[1];
    assert_eq!(price.display.as_deref(), Some("R$ 1.234,50"));
    assert_eq!(price.value, Some(json!(1234.5)));
}

#[test]
fn select_display_resolves_option_label_never_the_stored_value() {
    let values = json!({ "status": "active" });
    let payload = build_render_payload(&sample_schema(), &values, &NumberLocale::default());
    let status = &payload.sections[0].fields[2];
    assert_eq!(status.value, Some(json!("active")));
    assert_eq!(status.display.as_deref(), Some("Active"));
}

#[test]
fn tree_select_display_resolves_labels_from_nested_nodes() {
    let mut region = field("region", FieldType::TreeSelect, "Region");
    region.tree_data = vec![TreeNode {
        label: "South".into(),
        value: "south".into(),
        children: vec![TreeNode {
            label: "Porto Alegre".into(),
            value: "poa".into(),
            children: vec![],
        }],
    }];
    let schema = FormSchema::new(vec![Section {
        title: None,
        columns: 1,
        fields: vec![region],
    }])
    .expect("unique ids");

    let values = json!({ "region": ["south", "poa"] });
    let payload = build_render_payload(&schema, &values, &NumberLocale::default());
    let rendered = &payload.sections[0].fields[0];
    assert_eq!(rendered.display.as_deref(), Some("South, Porto Alegre"));
    assert_eq!(rendered.value, Some(json!(["south", "poa"])));
}

#[test]
fn json_ui_lists_fields_with_types() {
    let payload = build_render_payload(&sample_schema(), &json!({}), &NumberLocale::default());
    let ui = render_json_ui(&payload);
    let fields = ui["sections"][0]["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0]["type"], json!("cpf"));
    assert_eq!(fields[1]["type"], json!("currency"));
}

#[test]
fn text_rendering_includes_titles_and_values() {
    let values = json!({ "document": "11144477735" });
    let payload = build_render_payload(&sample_schema(), &values, &NumberLocale::default());
    let text = render_text(&payload);
    assert!(text.contains("== Details =="));
    assert!(text.contains("document (Document) = 111.444.777-35"));
}
