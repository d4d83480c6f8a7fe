//! `_redirects` side-rule injection
//!
//! The `_redirects` file holds one rule per line: `from to [status[!]]`,
//! with `#` starting a comment. A trailing `!` on the status forces the
//! redirect even when the source path exists.

use std::io;
use std::path::Path;

use tokio::fs;
use toml::Value;
use tracing::warn;

use super::{prepend_rules, ConfigError, Document};

/// Fold the `_redirects` file at `path` into the document's `redirects`
/// array.
///
/// No-op when no path is configured or the file is absent. Malformed lines
/// are skipped with a warning rather than failing the build.
pub async fn add_redirects(doc: Document, path: Option<&Path>) -> Result<Document, ConfigError> {
    let Some(path) = path else {
        return Ok(doc);
    };

    let text = match fs::read_to_string(path).await {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(doc),
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.to_owned(),
                source: err,
            });
        }
    };

    Ok(prepend_rules(doc, "redirects", parse_redirects(&text)))
}

fn parse_redirects(text: &str) -> Vec<Value> {
    let mut rules = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        let (Some(from), Some(to)) = (fields.next(), fields.next()) else {
            warn!(line = trimmed, "skipping malformed redirect line");
            continue;
        };

        let mut rule = Document::new();
        rule.insert("from".to_owned(), Value::String(from.to_owned()));
        rule.insert("to".to_owned(), Value::String(to.to_owned()));

        if let Some(status) = fields.next() {
            let (code, force) = match status.strip_suffix('!') {
                Some(code) => (code, true),
                None => (status, false),
            };
            match code.parse::<i64>() {
                Ok(code) => {
                    rule.insert("status".to_owned(), Value::Integer(code));
                    if force {
                        rule.insert("force".to_owned(), Value::Boolean(true));
                    }
                }
                Err(_) => warn!(line = trimmed, "skipping redirect with non-numeric status"),
            }
        }

        rules.push(Value::Table(rule));
    }
    rules
}
