//! Deploy-context precedence for override documents

use toml::Value;

use super::Document;

/// Tag an override document with the precedence of the active deploy.
///
/// The override values are mirrored under `context.<context>` (and
/// `context.<branch>` when a branch is known), so that any later
/// context-scoped resolution of the written file sees them at the highest
/// precedence. The top-level values stay in place and win the immediate
/// merge.
pub fn ensure_config_priority(doc: Document, context: &str, branch: Option<&str>) -> Document {
    let mut scoped = doc.clone();
    scoped.remove("context");

    if scoped.is_empty() {
        return doc;
    }

    let mut doc = doc;
    let contexts = doc
        .entry("context".to_owned())
        .or_insert(Value::Table(Document::new()));
    if let Value::Table(contexts) = contexts {
        if let Some(branch) = branch {
            if branch != context {
                contexts.insert(branch.to_owned(), Value::Table(scoped.clone()));
            }
        }
        contexts.insert(context.to_owned(), Value::Table(scoped));
    }
    doc
}
