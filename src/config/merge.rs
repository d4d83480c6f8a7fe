//! Document merge logic
//!
//! Implements the deep merge with:
//! - Tables: deep-merge by key
//! - Arrays: REPLACE (last wins)
//! - Scalars: override (last wins)

use toml::Value;

use super::Document;

/// Deep merge two documents; `overlay` has the higher precedence.
///
/// Merge semantics:
/// - Tables: deep-merge by key (recursive)
/// - Arrays: REPLACE (overlay wins entirely)
/// - Scalars: override (overlay wins)
pub fn merge_configs(base: Document, overlay: Document) -> Document {
    let mut base = base;
    for (key, overlay_value) in overlay {
        let merged = match base.remove(&key) {
            Some(base_value) => merge_value(base_value, overlay_value),
            None => overlay_value,
        };
        base.insert(key, merged);
    }
    base
}

fn merge_value(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        // Both tables: deep merge
        (Value::Table(base), Value::Table(overlay)) => Value::Table(merge_configs(base, overlay)),

        // Arrays: REPLACE (no concatenation)
        (Value::Array(_), overlay @ Value::Array(_)) => overlay,

        // Scalars and any other case: overlay wins
        (_, overlay) => overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::toml;

    #[test]
    fn test_scalar_override() {
        let base = toml! { timeout = 100 };
        let overlay = toml! { timeout = 200 };

        let result = merge_configs(base, overlay);

        assert_eq!(result["timeout"], Value::Integer(200));
    }

    #[test]
    fn test_table_deep_merge() {
        let base = toml! {
            [build]
            command = "make"
            publish = "dist"
        };
        let overlay = toml! {
            [build]
            command = "make all"
        };

        let result = merge_configs(base, overlay);

        // command should be overridden
        assert_eq!(result["build"]["command"].as_str(), Some("make all"));
        // publish should be preserved
        assert_eq!(result["build"]["publish"].as_str(), Some("dist"));
    }

    #[test]
    fn test_array_replace() {
        let base = toml! { schemes = ["A", "B", "C"] };
        let overlay = toml! { schemes = ["X", "Y"] };

        let result = merge_configs(base, overlay);

        // Array should be completely replaced
        let schemes = result["schemes"].as_array().unwrap();
        assert_eq!(schemes.len(), 2);
        assert_eq!(schemes[0].as_str(), Some("X"));
        assert_eq!(schemes[1].as_str(), Some("Y"));
    }

    #[test]
    fn test_add_new_key() {
        let base = toml! { a = 1 };
        let overlay = toml! { b = 2 };

        let result = merge_configs(base, overlay);

        assert_eq!(result["a"], Value::Integer(1));
        assert_eq!(result["b"], Value::Integer(2));
    }

    #[test]
    fn test_empty_base() {
        let base = Document::new();
        let overlay = toml! { title = "b" };

        let result = merge_configs(base, overlay);

        assert_eq!(result["title"].as_str(), Some("b"));
    }
}
