//! Document simplification before serialization

use toml::Value;

use super::Document;

/// Drop empty tables and empty arrays, recursively, so serialization omits
/// sections that carry no information.
pub fn simplify_config(doc: Document) -> Document {
    doc.into_iter()
        .filter_map(|(key, value)| simplify_value(value).map(|value| (key, value)))
        .collect()
}

fn simplify_value(value: Value) -> Option<Value> {
    match value {
        Value::Table(table) => {
            let table = simplify_config(table);
            (!table.is_empty()).then_some(Value::Table(table))
        }
        Value::Array(array) => {
            let array: Vec<_> = array.into_iter().filter_map(simplify_value).collect();
            (!array.is_empty()).then_some(Value::Array(array))
        }
        value => Some(value),
    }
}
