use serde::Serialize;

/// The UniData value mark separating values of a multi-valued field.
pub const VALUE_MARK: char = '\u{fd}';

/// A named UniData field, optionally aliased, optionally holding data.
///
/// A field with no data is a request template (see `FieldDefinition`); the
/// response parser creates fields with data.
#[derive(Debug, Clone, Serialize)]
pub struct Field {
    field_name: String,
    friendly_name: Option<String>,
    data: Option<String>,
}

impl Field {
    /// Creates a template field with an optional friendly name.
    pub fn new(field_name: impl Into<String>, friendly_name: Option<String>) -> Self {
        Field {
            field_name: field_name.into(),
            friendly_name,
            data: None,
        }
    }

    /// Creates a template field without a friendly name.
    pub fn named(field_name: impl Into<String>) -> Self {
        Field::new(field_name, None)
    }

    /// Creates a template field with a friendly name.
    pub fn aliased(field_name: impl Into<String>, friendly_name: impl Into<String>) -> Self {
        Field::new(field_name, Some(friendly_name.into()))
    }

    /// Returns this field carrying `data`.
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// The real field name in the data source (eg `FIRST.NAME`).
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn set_field_name(&mut self, field_name: impl Into<String>) {
        self.field_name = field_name.into();
    }

    /// The caller-chosen alias (eg `fname`), if any.
    pub fn friendly_name(&self) -> Option<&str> {
        self.friendly_name.as_deref()
    }

    pub fn set_friendly_name(&mut self, friendly_name: Option<String>) {
        self.friendly_name = friendly_name;
    }

    /// The data returned by the data source, `None` for templates.
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    /// The individual values of a multi-valued field.
    ///
    /// Empty for templates; a single-valued field yields one value.
    pub fn values(&self) -> Vec<&str> {
        match &self.data {
            Some(data) => data.split(VALUE_MARK).collect(),
            None => Vec::new(),
        }
    }

    /// Case-insensitive match on the real field name.
    pub fn matches_name(&self, name: &str) -> bool {
        eq_ignore_case(&self.field_name, name)
    }

    /// Case-insensitive match on the friendly name. Never matches a field
    /// without one.
    pub fn matches_friendly_name(&self, name: &str) -> bool {
        self.friendly_name
            .as_deref()
            .map_or(false, |friendly| eq_ignore_case(friendly, name))
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        let friendly_eq = match (&self.friendly_name, &other.friendly_name) {
            (Some(a), Some(b)) => eq_ignore_case(a, b),
            (None, None) => true,
            _ => false,
        };
        self.matches_name(&other.field_name) && friendly_eq && self.data == other.data
    }
}

impl Eq for Field {}

pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
