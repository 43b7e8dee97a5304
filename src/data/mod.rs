//! Field templates, result rows and the definitions that describe a query.
pub mod field;
pub mod field_definition;
pub mod field_set;

pub use field::{Field, VALUE_MARK};
pub use field_definition::FieldDefinition;
pub use field_set::FieldSet;
