//! `_headers` side-rule injection
//!
//! The `_headers` file is a line-based format: an unindented line opens a
//! rule block with the path it applies to, and each following indented
//! `Name: value` line adds one header to that block.

use std::io;
use std::path::Path;

use tokio::fs;
use toml::Value;
use tracing::warn;

use super::{prepend_rules, ConfigError, Document};

/// Fold the `_headers` file at `path` into the document's `headers` array.
///
/// No-op when no path is configured or the file is absent. Malformed lines
/// are skipped with a warning rather than failing the build.
pub async fn add_headers(doc: Document, path: Option<&Path>) -> Result<Document, ConfigError> {
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

    Ok(prepend_rules(doc, "headers", parse_headers(&text)))
}

fn parse_headers(text: &str) -> Vec<Value> {
    let mut rules = Vec::new();
    let mut current: Option<(String, Document)> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        // An unindented line opens a new rule block
        if !line.starts_with([' ', '\t']) {
            if let Some(rule) = current.take() {
                rules.push(header_rule(rule));
            }
            current = Some((trimmed.to_owned(), Document::new()));
            continue;
        }

        let Some((name, value)) = trimmed.split_once(':') else {
            warn!(line = trimmed, "skipping malformed header line");
            continue;
        };
        match current.as_mut() {
            Some((_, values)) => {
                values.insert(
                    name.trim().to_owned(),
                    Value::String(value.trim().to_owned()),
                );
            }
            None => warn!(line = trimmed, "skipping header value before any path"),
        }
    }

    if let Some(rule) = current.take() {
        rules.push(header_rule(rule));
    }
    rules
}

fn header_rule((path, values): (String, Document)) -> Value {
    let mut rule = Document::new();
    rule.insert("for".to_owned(), Value::String(path));
    rule.insert("values".to_owned(), Value::Table(values));
    Value::Table(rule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use toml::toml;

    const HEADERS: &str = "\
# cache policy
/assets/*
  Cache-Control: public, max-age=31536000

/admin
  X-Frame-Options: DENY
  X-Robots-Tag: noindex
";

    #[test]
    fn test_parse_blocks() {
        let rules = parse_headers(HEADERS);

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0]["for"].as_str(), Some("/assets/*"));
        assert_eq!(
            rules[0]["values"]["Cache-Control"].as_str(),
            Some("public, max-age=31536000")
        );
        assert_eq!(rules[1]["for"].as_str(), Some("/admin"));
        assert_eq!(rules[1]["values"].as_table().unwrap().len(), 2);
    }

    #[test]
    fn test_malformed_line_skipped() {
        let rules = parse_headers("/admin\n  no colon here\n  X-Frame-Options: DENY\n");

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0]["values"].as_table().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_absent_file_is_noop() {
        let dir = tempdir().unwrap();
        let doc = toml! { title = "a" };

        let result = add_headers(doc.clone(), Some(&dir.path().join("_headers")))
            .await
            .unwrap();

        assert_eq!(result, doc);
    }

    #[tokio::test]
    async fn test_file_rules_come_first() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("_headers");
        std::fs::write(&path, "/a\n  X-From-File: yes\n").unwrap();
        let doc = toml! {
            [[headers]]
            for = "/b"
            [headers.values]
            X-From-Config = "yes"
        };

        let result = add_headers(doc, Some(&path)).await.unwrap();

        let headers = result["headers"].as_array().unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0]["for"].as_str(), Some("/a"));
        assert_eq!(headers[1]["for"].as_str(), Some("/b"));
    }
}
