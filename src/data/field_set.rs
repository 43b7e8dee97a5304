use super::field::Field;
use serde::Serialize;
use serde_json::{Map, Value};

/// One parsed result row: fields in the column order of the definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldSet {
    fields: Vec<Field>,
}

impl FieldSet {
    /// Creates an empty field set
    pub fn new() -> Self {
        FieldSet::default()
    }

    /// Appends a field
    pub fn add(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Finds the first field whose real name matches `name`, ignoring case.
    pub fn get_field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.matches_name(name))
    }

    /// Finds the first field whose friendly name matches `name`, ignoring case.
    pub fn get_field_by_friendly_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.matches_friendly_name(name))
    }

    /// Data of the field matching `name`, looked up by friendly name first
    /// and then by real name.
    pub fn data(&self, name: &str) -> Option<&str> {
        self.get_field_by_friendly_name(name)
            .or_else(|| self.get_field_by_name(name))
            .and_then(Field::data)
    }

    pub fn as_slice(&self) -> &[Field] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Renders the row as a JSON object keyed by friendly name, or by field
    /// name when a field has no friendly name. Duplicate keys keep the first
    /// field.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        for field in &self.fields {
            let key = field.friendly_name().unwrap_or(field.field_name());
            if object.contains_key(key) {
                continue;
            }
            let value = field
                .data()
                .map_or(Value::Null, |data| Value::String(data.to_string()));
            object.insert(key.to_string(), value);
        }
        Value::Object(object)
    }
}

impl From<Vec<Field>> for FieldSet {
    fn from(fields: Vec<Field>) -> Self {
        FieldSet { fields }
    }
}

impl IntoIterator for FieldSet {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
