//! Mutation commands and the override-document fold

use serde::{Deserialize, Serialize};
use toml::Value;

use crate::config::Document;

/// One ordered instruction to set a (possibly nested) field in the override
/// document.
///
/// Commands are opaque to the rest of the subsystem; order matters, and a
/// later command on the same path wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationCommand {
    /// Path of keys from the document root to the field being set.
    pub keys: Vec<String>,

    /// Value to set at that path.
    pub value: Value,
}

impl MutationCommand {
    /// Set a top-level field.
    pub fn set(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            keys: vec![key.into()],
            value: value.into(),
        }
    }

    /// Set a nested field.
    pub fn set_nested<I, S>(keys: I, value: impl Into<Value>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            value: value.into(),
        }
    }
}

/// Fold mutation commands over a document, in sequence order.
pub fn apply_mutations(doc: Document, commands: &[MutationCommand]) -> Document {
    let mut doc = doc;
    for command in commands {
        set_path(&mut doc, &command.keys, command.value.clone());
    }
    doc
}

fn set_path(table: &mut Document, keys: &[String], value: Value) {
    match keys {
        [] => {}
        [last] => {
            table.insert(last.clone(), value);
        }
        [head, rest @ ..] => {
            let entry = table
                .entry(head.clone())
                .or_insert(Value::Table(Document::new()));
            // A nested command replaces any scalar standing on its path
            if !entry.is_table() {
                *entry = Value::Table(Document::new());
            }
            if let Value::Table(child) = entry {
                set_path(child, rest, value);
            }
        }
    }
}
