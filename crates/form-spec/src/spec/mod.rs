pub mod field;
pub mod form;

pub use field::{ExtraRule, FieldSpec, FieldType, SelectOption, TreeNode};
pub use form::{FormSchema, SchemaError, Section};
