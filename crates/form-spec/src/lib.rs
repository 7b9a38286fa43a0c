#![allow(missing_docs)]

pub mod checksum;
pub mod format;
pub mod frontend;
pub mod idlist;
pub mod normalize;
pub mod render;
pub mod spec;
pub mod validate;

pub use checksum::{validate_cnpj, validate_cpf};
pub use format::{NumberLocale, apply_mask, format_number};
pub use frontend::{DefaultFormFrontend, FormFrontend};
pub use idlist::{decode as decode_id_list, encode as encode_id_list};
pub use normalize::{coerce_temporal, normalize_value};
pub use render::{
    RenderField, RenderPayload, RenderSection, build_render_payload, render_json_ui, render_text,
};
pub use spec::{
    ExtraRule, FieldSpec, FieldType, FormSchema, SchemaError, Section, SelectOption, TreeNode,
};
pub use validate::{ValidationError, ValidationResult, validate};
