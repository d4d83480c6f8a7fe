//! Reading and writing the configuration file format

use std::io;
use std::path::Path;

use tokio::fs;

use super::{ConfigError, Document};

/// Parse the configuration file at `path`, if any.
///
/// A missing path or missing file is not an error: deploy-time overrides can
/// target projects that have no configuration file at all. Both cases yield
/// an empty document.
pub async fn parse_optional_config(path: Option<&Path>) -> Result<Document, ConfigError> {
    let Some(path) = path else {
        return Ok(Document::new());
    };

    let text = match fs::read_to_string(path).await {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Document::new()),
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.to_owned(),
                source: err,
            });
        }
    };

    text.parse::<Document>().map_err(|source| ConfigError::Parse {
        path: path.to_owned(),
        source,
    })
}

/// Serialize a document back to its textual on-disk format.
pub fn serialize_toml(doc: &Document) -> Result<String, ConfigError> {
    Ok(toml::to_string(doc)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_parse_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("netlify.toml");

        let doc = parse_optional_config(Some(&path)).await.unwrap();

        assert!(doc.is_empty());
    }

    #[tokio::test]
    async fn test_parse_no_path_is_empty() {
        let doc = parse_optional_config(None).await.unwrap();

        assert!(doc.is_empty());
    }

    #[tokio::test]
    async fn test_parse_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("netlify.toml");
        std::fs::write(&path, "title = \"a\"\n").unwrap();

        let doc = parse_optional_config(Some(&path)).await.unwrap();

        assert_eq!(doc.get("title").and_then(|v| v.as_str()), Some("a"));
    }

    #[tokio::test]
    async fn test_parse_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("netlify.toml");
        std::fs::write(&path, "title = ").unwrap();

        let err = parse_optional_config(Some(&path)).await.unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_serialize_round_trips() {
        let doc: Document = "title = \"a\"\n[build]\ncommand = \"make\"\n"
            .parse()
            .unwrap();

        let text = serialize_toml(&doc).unwrap();
        let reparsed: Document = text.parse().unwrap();

        assert_eq!(doc, reparsed);
    }
}
