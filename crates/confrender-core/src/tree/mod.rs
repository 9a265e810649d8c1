//! Configuration tree - flat mapping from dotted paths to scalar values
//!
//! The tree is what placeholders are resolved against. It is usually built by
//! flattening the `[namespace]` table of `confrender.toml`, so the TOML
//!
//! ```toml
//! [namespace.vault]
//! address = "127.0.0.1:8200"
//! ```
//!
//! becomes the single entry `vault.address = "127.0.0.1:8200"`.

mod scalar;

pub use scalar::Scalar;

use std::collections::BTreeMap;
use thiserror::Error;
use toml::map::Map;
use toml::Value;

/// Errors raised while building a [`ConfigTree`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("TOML parse error: {0}")]
    Parse(String),

    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("duplicate path '{0}'")]
    DuplicatePath(String),

    #[error("path '{path}' conflicts with existing path '{existing}'")]
    PathConflict { path: String, existing: String },

    #[error("value at '{0}' is not a finite number")]
    NonFiniteFloat(String),

    #[error("value at '{path}' is {kind}, only strings, booleans and numbers are supported")]
    UnsupportedValue { path: String, kind: &'static str },
}

/// Ordered mapping from dotted paths to scalars
///
/// Paths are unique, their segments are non-empty, and no path is a parent of
/// another one (`a` and `a.b` cannot coexist).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigTree {
    entries: BTreeMap<String, Scalar>,
}

impl ConfigTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new entry, rejecting paths that already exist
    pub fn insert(
        &mut self,
        path: impl Into<String>,
        value: impl Into<Scalar>,
    ) -> Result<(), TreeError> {
        let path = path.into();
        if self.entries.contains_key(&path) {
            return Err(TreeError::DuplicatePath(path));
        }
        self.set(path, value)
    }

    /// Insert or replace an entry
    pub fn set(
        &mut self,
        path: impl Into<String>,
        value: impl Into<Scalar>,
    ) -> Result<(), TreeError> {
        let path = path.into();
        let value = value.into();

        validate_path(&path)?;
        if let Scalar::Float(f) = value {
            if !f.is_finite() {
                return Err(TreeError::NonFiniteFloat(path));
            }
        }
        if let Some(existing) = self.conflicting_path(&path) {
            return Err(TreeError::PathConflict { path, existing });
        }

        self.entries.insert(path, value);
        Ok(())
    }

    /// Look up a path
    pub fn get(&self, path: &str) -> Option<&Scalar> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in path order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Flatten a TOML table into a tree
    ///
    /// Datetimes are kept as their TOML text; arrays are rejected.
    pub fn from_toml(value: &Value) -> Result<Self, TreeError> {
        let mut tree = Self::new();
        match value {
            Value::Table(table) => tree.flatten_table("", table)?,
            other => {
                return Err(TreeError::UnsupportedValue {
                    path: String::new(),
                    kind: other.type_str(),
                })
            }
        }
        Ok(tree)
    }

    /// Parse TOML text and flatten it
    pub fn from_toml_str(text: &str) -> Result<Self, TreeError> {
        let table: Map<String, Value> =
            toml::from_str(text).map_err(|e| TreeError::Parse(e.to_string()))?;
        Self::from_toml(&Value::Table(table))
    }

    /// Nest the tree back into a TOML table
    pub fn to_toml(&self) -> Value {
        let mut root = Map::new();

        for (path, scalar) in &self.entries {
            let (parents, leaf) = match path.rsplit_once('.') {
                Some((parents, leaf)) => (Some(parents), leaf),
                None => (None, path.as_str()),
            };

            let mut table = &mut root;
            for segment in parents.into_iter().flat_map(|p| p.split('.')) {
                let entry = table
                    .entry(segment.to_string())
                    .or_insert(Value::Table(Map::new()));
                table = match entry {
                    Value::Table(t) => t,
                    _ => unreachable!("parent paths are rejected on insert"),
                };
            }
            table.insert(leaf.to_string(), scalar.to_toml());
        }

        Value::Table(root)
    }

    fn flatten_table(&mut self, prefix: &str, table: &Map<String, Value>) -> Result<(), TreeError> {
        for (key, value) in table {
            if key.is_empty() || key.contains('.') {
                return Err(TreeError::InvalidPath {
                    path: join(prefix, key),
                    reason: format!("key '{}' cannot be addressed by a dotted path", key),
                });
            }
            let path = join(prefix, key);

            match value {
                Value::Table(child) => self.flatten_table(&path, child)?,
                Value::String(s) => self.insert(path, s.as_str())?,
                Value::Boolean(b) => self.insert(path, *b)?,
                Value::Integer(i) => self.insert(path, *i)?,
                Value::Float(f) => self.insert(path, *f)?,
                Value::Datetime(dt) => self.insert(path, dt.to_string())?,
                Value::Array(_) => {
                    return Err(TreeError::UnsupportedValue {
                        path,
                        kind: "an array",
                    })
                }
            }
        }
        Ok(())
    }

    /// Find an existing path that is a parent or child of `path`
    fn conflicting_path(&self, path: &str) -> Option<String> {
        for (idx, _) in path.match_indices('.') {
            let parent = &path[..idx];
            if self.entries.contains_key(parent) {
                return Some(parent.to_string());
            }
        }

        let child_prefix = format!("{}.", path);
        self.entries
            .range(child_prefix.clone()..)
            .next()
            .filter(|(k, _)| k.starts_with(&child_prefix))
            .map(|(k, _)| k.clone())
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn validate_path(path: &str) -> Result<(), TreeError> {
    if path.is_empty() {
        return Err(TreeError::InvalidPath {
            path: path.to_string(),
            reason: "path is empty".to_string(),
        });
    }
    if path.split('.').any(str::is_empty) {
        return Err(TreeError::InvalidPath {
            path: path.to_string(),
            reason: "path has an empty segment".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::toml;

    #[test]
    fn test_insert_and_get() {
        let mut tree = ConfigTree::new();
        tree.insert("vault.address", "127.0.0.1:8200").unwrap();
        tree.insert("vault.ui", true).unwrap();

        assert_eq!(tree.len(), 2);
        assert_eq!(
            tree.get("vault.address"),
            Some(&Scalar::String("127.0.0.1:8200".to_string()))
        );
        assert!(tree.contains("vault.ui"));
        assert!(tree.get("vault").is_none());
    }

    #[test]
    fn test_insert_duplicate_rejected() {
        let mut tree = ConfigTree::new();
        tree.insert("a", 1).unwrap();
        assert_eq!(
            tree.insert("a", 2),
            Err(TreeError::DuplicatePath("a".to_string()))
        );
        assert_eq!(tree.get("a"), Some(&Scalar::Integer(1)));
    }

    #[test]
    fn test_set_replaces() {
        let mut tree = ConfigTree::new();
        tree.insert("a", 1).unwrap();
        tree.set("a", 2).unwrap();
        assert_eq!(tree.get("a"), Some(&Scalar::Integer(2)));
    }

    #[test]
    fn test_invalid_paths_rejected() {
        let mut tree = ConfigTree::new();
        assert!(matches!(tree.insert("", 1), Err(TreeError::InvalidPath { .. })));
        assert!(matches!(tree.insert("a..b", 1), Err(TreeError::InvalidPath { .. })));
        assert!(matches!(tree.insert(".a", 1), Err(TreeError::InvalidPath { .. })));
        assert!(matches!(tree.insert("a.", 1), Err(TreeError::InvalidPath { .. })));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_parent_child_conflict_rejected() {
        let mut tree = ConfigTree::new();
        tree.insert("vault.tls", true).unwrap();

        assert_eq!(
            tree.insert("vault.tls.cert", "cert.pem"),
            Err(TreeError::PathConflict {
                path: "vault.tls.cert".to_string(),
                existing: "vault.tls".to_string(),
            })
        );
        assert_eq!(
            tree.insert("vault", "x"),
            Err(TreeError::PathConflict {
                path: "vault".to_string(),
                existing: "vault.tls".to_string(),
            })
        );
        // A sibling sharing a textual prefix is not a conflict
        tree.insert("vault.tls_cert_file", "cert.pem").unwrap();
    }

    #[test]
    fn test_non_finite_float_rejected() {
        let mut tree = ConfigTree::new();
        assert_eq!(
            tree.insert("x", f64::NAN),
            Err(TreeError::NonFiniteFloat("x".to_string()))
        );
    }

    #[test]
    fn test_from_toml_flattens_tables() {
        let data = toml! {
            [vault]
            address = "127.0.0.1:8200"
            ui = true
            max_lease_ttl = 768
            ratio = 0.5

            [vault.storage]
            path = "/var/lib/vault"
        };
        let tree = ConfigTree::from_toml(&Value::Table(data)).unwrap();

        let paths: Vec<&str> = tree.iter().map(|(k, _)| k).collect();
        assert_eq!(
            paths,
            vec![
                "vault.address",
                "vault.max_lease_ttl",
                "vault.ratio",
                "vault.storage.path",
                "vault.ui",
            ]
        );
        assert_eq!(tree.get("vault.max_lease_ttl"), Some(&Scalar::Integer(768)));
        assert_eq!(tree.get("vault.ratio"), Some(&Scalar::Float(0.5)));
    }

    #[test]
    fn test_from_toml_datetime_becomes_string() {
        let tree = ConfigTree::from_toml_str("issued = 2026-01-15\n").unwrap();
        assert_eq!(
            tree.get("issued"),
            Some(&Scalar::String("2026-01-15".to_string()))
        );
    }

    #[test]
    fn test_from_toml_rejects_arrays() {
        let err = ConfigTree::from_toml_str("[vault]\nseals = [\"a\", \"b\"]\n").unwrap_err();
        assert_eq!(
            err,
            TreeError::UnsupportedValue {
                path: "vault.seals".to_string(),
                kind: "an array",
            }
        );
    }

    #[test]
    fn test_from_toml_rejects_dotted_quoted_key() {
        let err = ConfigTree::from_toml_str("\"vault.address\" = \"x\"\n").unwrap_err();
        assert!(matches!(err, TreeError::InvalidPath { .. }));
    }

    #[test]
    fn test_to_toml_nests_paths() {
        let mut tree = ConfigTree::new();
        tree.insert("vault.address", "127.0.0.1:8200").unwrap();
        tree.insert("vault.storage.path", "/data").unwrap();
        tree.insert("debug", false).unwrap();

        let expected = toml! {
            debug = false

            [vault]
            address = "127.0.0.1:8200"

            [vault.storage]
            path = "/data"
        };
        assert_eq!(tree.to_toml(), Value::Table(expected));
    }

    #[test]
    fn test_to_toml_then_flatten_is_identity() {
        let mut tree = ConfigTree::new();
        tree.insert("a.b.c", 1).unwrap();
        tree.insert("a.d", "x").unwrap();
        tree.insert("e", 2.5).unwrap();

        let again = ConfigTree::from_toml(&tree.to_toml()).unwrap();
        assert_eq!(again, tree);
    }
}
