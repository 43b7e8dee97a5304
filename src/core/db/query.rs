/// Response Parsing Module
///
/// This module turns the delimited text produced by a `LIST ... EVAL` command
/// into field sets. Parsing never fails: short rows produce shorter field
/// sets and surplus columns are dropped.

use crate::data::{Field, FieldDefinition, FieldSet};
use regex::Regex;
use tracing::trace;

/// Parses raw query output into one `FieldSet` per row.
///
/// Returns `None` if `data` is empty after trimming. Column values are
/// trimmed and paired by position with the definition's field templates.
///
/// # Examples
///
/// ```
/// use uniobjects::core::db::parse_into_field_sets;
/// use uniobjects::data::FieldDefinition;
///
/// let mut definition = FieldDefinition::new("STUDENTS");
/// definition.set_fields_by_name(["ID", "NAME"]);
/// let rows = parse_into_field_sets("1|Ada~2|Grace", &definition).unwrap();
/// assert_eq!(rows[1].data("NAME"), Some("Grace"));
/// ```
pub fn parse_into_field_sets(data: &str, definition: &FieldDefinition) -> Option<Vec<FieldSet>> {
    if data.trim().is_empty() {
        return None;
    }

    let templates = definition.fields();
    let field_sets: Vec<FieldSet> = split_pieces(definition.row_separator_regex(), data)
        .into_iter()
        .map(|line| {
            let fields: Vec<Field> = split_pieces(definition.field_separator_regex(), line.trim())
                .into_iter()
                .zip(templates)
                .map(|(value, template)| {
                    Field::new(
                        template.field_name(),
                        template.friendly_name().map(str::to_string),
                    )
                    .with_data(value.trim())
                })
                .collect();
            FieldSet::from(fields)
        })
        .collect();

    trace!(
        "Parsed {} rows for {} fields from {}",
        field_sets.len(),
        templates.len(),
        definition.file()
    );
    Some(field_sets)
}

/// Splits `text` on `pattern`, discarding trailing empty pieces. Text with
/// no match is returned whole, so an empty string yields one empty piece.
fn split_pieces<'a>(pattern: &Regex, text: &'a str) -> Vec<&'a str> {
    if !pattern.is_match(text) {
        return vec![text];
    }
    let mut pieces: Vec<&str> = pattern.split(text).collect();
    while pieces.last().map_or(false, |piece| piece.is_empty()) {
        pieces.pop();
    }
    pieces
}
