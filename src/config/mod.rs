//! Configuration document model and merge collaborators
//!
//! Documents are plain TOML tables. The functions here are the merge-service
//! surface consumed by the overlay subsystem: parse, deep-merge, deploy-context
//! priority, side-rule injection, simplification and serialization. None of
//! them mutate the filesystem.

mod headers;
mod merge;
mod parse;
mod priority;
mod redirects;
mod simplify;

pub use headers::add_headers;
pub use merge::merge_configs;
pub use parse::{parse_optional_config, serialize_toml};
pub use priority::ensure_config_priority;
pub use redirects::add_redirects;
pub use simplify::simplify_config;

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use toml::Value;
use tracing::warn;

/// A configuration document: a TOML table.
pub type Document = toml::Table;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("malformed configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Insert side-rule entries ahead of any rules already in the document.
///
/// File-based rules outrank document-based rules under first-match
/// evaluation, so they go first.
pub(crate) fn prepend_rules(mut doc: Document, key: &str, rules: Vec<Value>) -> Document {
    if rules.is_empty() {
        return doc;
    }

    let mut combined = rules;
    match doc.remove(key) {
        Some(Value::Array(existing)) => combined.extend(existing),
        Some(_) => warn!(key, "replacing non-array rules entry"),
        None => {}
    }
    doc.insert(key.to_owned(), Value::Array(combined));
    doc
}
