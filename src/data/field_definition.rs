use super::field::Field;
use crate::config::FormatConfig;
use crate::core::Result;
use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_FIELD_SEPARATOR: &str = "|";
pub const DEFAULT_ROW_SEPARATOR: &str = "~";

static DEFAULT_FIELD_SEPARATOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\|").expect("default field separator pattern is valid"));
static DEFAULT_ROW_SEPARATOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new("~").expect("default row separator pattern is valid"));

/// Describes a set of data to retrieve with a `LIST` command: the file, the
/// fields in column order, and how the response is delimited.
///
/// The literal separators are written into the query; the regex variants
/// split the response. They must describe the same text. The plain setters
/// change one side only, `with_field_separator` and `with_row_separator`
/// change both.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    file: String,
    fields: Vec<Field>,
    select_only: bool,
    field_separator: String,
    field_separator_regex: Regex,
    row_separator: String,
    row_separator_regex: Regex,
}

impl FieldDefinition {
    /// Creates a definition for `file` with no fields.
    pub fn new(file: impl Into<String>) -> Self {
        FieldDefinition {
            file: file.into(),
            fields: Vec::new(),
            select_only: false,
            field_separator: DEFAULT_FIELD_SEPARATOR.to_string(),
            field_separator_regex: DEFAULT_FIELD_SEPARATOR_REGEX.clone(),
            row_separator: DEFAULT_ROW_SEPARATOR.to_string(),
            row_separator_regex: DEFAULT_ROW_SEPARATOR_REGEX.clone(),
        }
    }

    /// Creates a definition for `file` with the given field templates.
    pub fn with_fields(file: impl Into<String>, fields: impl IntoIterator<Item = Field>) -> Self {
        let mut definition = FieldDefinition::new(file);
        definition.set_fields(fields);
        definition
    }

    /// Builds the `LIST` command that retrieves this definition's data.
    ///
    /// Field names and separators are inserted verbatim.
    pub fn query_string(&self) -> String {
        let mut query = format!("LIST {} EVAL\"", self.file);
        for field in &self.fields {
            query.push_str(field.field_name());
            query.push_str(":'");
            query.push_str(&self.field_separator);
            query.push_str("':");
        }
        query.push('\'');
        query.push_str(&self.row_separator);
        query.push_str("'\" FMT \"300L\" ");
        query.push_str("ID.SUP HDR.SUP COL.SUP NO.PAGE COUNT.SUP");
        if self.select_only {
            query.push_str(" SELECT.ONLY");
        }
        query
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn set_file(&mut self, file: impl Into<String>) {
        self.file = file.into();
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Replaces the fields with the given templates, in order.
    pub fn set_fields(&mut self, fields: impl IntoIterator<Item = Field>) {
        self.fields = fields.into_iter().collect();
    }

    /// Replaces the fields with plain field names (no friendly names).
    pub fn set_fields_by_name<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_fields(names.into_iter().map(Field::named));
    }

    /// Replaces the fields with `(field name, friendly name)` pairs, in the
    /// iteration order of `pairs`.
    pub fn set_fields_with_friendly_names<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.set_fields(pairs.into_iter().map(|(name, friendly)| Field::aliased(name, friendly)));
    }

    /// Appends `field` unless an equal field is already present. Returns
    /// whether it was added.
    pub fn add_field(&mut self, field: Field) -> bool {
        if self.fields.contains(&field) {
            return false;
        }
        self.fields.push(field);
        true
    }

    /// Whether `SELECT.ONLY` is appended to the query.
    pub fn is_select_only(&self) -> bool {
        self.select_only
    }

    pub fn set_select_only(&mut self, select_only: bool) {
        self.select_only = select_only;
    }

    pub fn field_separator(&self) -> &str {
        &self.field_separator
    }

    /// Sets the literal field separator only.
    pub fn set_field_separator(&mut self, field_separator: impl Into<String>) {
        self.field_separator = field_separator.into();
    }

    pub fn field_separator_regex(&self) -> &Regex {
        &self.field_separator_regex
    }

    /// Sets the pattern used to split columns.
    pub fn set_field_separator_regex(&mut self, pattern: &str) -> Result<()> {
        self.field_separator_regex = Regex::new(pattern)?;
        Ok(())
    }

    pub fn row_separator(&self) -> &str {
        &self.row_separator
    }

    /// Sets the literal row separator only.
    pub fn set_row_separator(&mut self, row_separator: impl Into<String>) {
        self.row_separator = row_separator.into();
    }

    pub fn row_separator_regex(&self) -> &Regex {
        &self.row_separator_regex
    }

    /// Sets the pattern used to split rows.
    pub fn set_row_separator_regex(&mut self, pattern: &str) -> Result<()> {
        self.row_separator_regex = Regex::new(pattern)?;
        Ok(())
    }

    /// Uses `separator` between fields, both in the query and when splitting.
    pub fn with_field_separator(mut self, separator: &str) -> Self {
        self.field_separator_regex = literal_regex(separator);
        self.field_separator = separator.to_string();
        self
    }

    /// Uses `separator` between rows, both in the query and when splitting.
    pub fn with_row_separator(mut self, separator: &str) -> Self {
        self.row_separator_regex = literal_regex(separator);
        self.row_separator = separator.to_string();
        self
    }

    /// Applies configured separators and the select-only flag.
    pub fn apply_format(&mut self, format: &FormatConfig) {
        if let Some(separator) = &format.field_separator {
            self.field_separator_regex = literal_regex(separator);
            self.field_separator = separator.clone();
        }
        if let Some(separator) = &format.row_separator {
            self.row_separator_regex = literal_regex(separator);
            self.row_separator = separator.clone();
        }
        if let Some(select_only) = format.select_only {
            self.select_only = select_only;
        }
    }
}

fn literal_regex(literal: &str) -> Regex {
    Regex::new(&regex::escape(literal)).expect("escaped literal is a valid pattern")
}
