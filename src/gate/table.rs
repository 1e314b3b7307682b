//! Flattened gate table and the loader that builds it.
//!
//! # Data Flow
//! ```text
//! ConfigTree
//!     → flatten (depth-first, dot-joined ancestor keys)
//!     → parse_bool on every node value, intermediate nodes included
//!     → GateTable (FNV-1a keyed, exact path retained)
//! ```
//!
//! # Design Decisions
//! - The root node's own value is never stored
//! - Entries are keyed by FNV-1a of the path bytes and keep the full path
//!   string; lookups compare on exact match so two colliding paths stay
//!   distinct
//! - A table is immutable once built; reload builds a new one

use std::collections::HashMap;

use crate::gate::hash::{path_hash, BuildPrehashed};
use crate::gate::tree::ConfigTree;

/// Tokens accepted as "enabled", compared case-insensitively.
const TRUTHY: [&str; 7] = ["", "t", "true", "on", "enable", "allow", "1"];

/// Interpret a configuration value as a gate decision.
///
/// Closed grammar: `""`, `t`, `true`, `on`, `enable`, `allow` and `1`
/// (any case) are `true`; every other string is `false`.
pub fn parse_bool(value: &str) -> bool {
    TRUTHY.iter().any(|t| t.eq_ignore_ascii_case(value))
}

/// Flatten a tree into `(path, enabled)` pairs in depth-first order.
pub fn flatten(tree: &ConfigTree) -> Vec<(String, bool)> {
    let mut out = Vec::new();
    flatten_into(tree, "", &mut out);
    out
}

fn flatten_into(node: &ConfigTree, prefix: &str, out: &mut Vec<(String, bool)>) {
    for (key, child) in node.children() {
        let path = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        };
        out.push((path.clone(), parse_bool(child.value())));
        flatten_into(child, &path, out);
    }
}

/// Explicit enable/disable overrides keyed by dot-joined category path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateTable {
    // fnv1a(path) → entries sharing that hash, compared on exact path.
    buckets: HashMap<u64, Vec<(Box<str>, bool)>, BuildPrehashed>,
    len: usize,
}

impl GateTable {
    /// An empty table: everything enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a configuration tree.
    ///
    /// Never fails; unrecognised values are simply `false`. When the same
    /// flattened path occurs twice the later node wins.
    pub fn from_tree(tree: &ConfigTree) -> Self {
        flatten(tree).into_iter().collect()
    }

    /// Explicit entry for an exact path, if any.
    pub fn get(&self, path: &str) -> Option<bool> {
        self.buckets
            .get(&path_hash(path))?
            .iter()
            .find(|(p, _)| p.as_ref() == path)
            .map(|(_, enabled)| *enabled)
    }

    /// Gate for one already-joined path: the stored value, or `true` when absent.
    pub fn test(&self, path: &str) -> bool {
        self.get(path).unwrap_or(true)
    }

    /// Whether any entry is stored under this FNV-1a digest.
    pub fn contains_hash(&self, hash: u64) -> bool {
        self.buckets.contains_key(&hash)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.buckets
            .values()
            .flatten()
            .map(|(path, enabled)| (path.as_ref(), *enabled))
    }

    fn insert(&mut self, path: String, enabled: bool) {
        self.insert_hashed(path_hash(&path), path, enabled);
    }

    fn insert_hashed(&mut self, hash: u64, path: String, enabled: bool) {
        let bucket = self.buckets.entry(hash).or_default();
        match bucket.iter_mut().find(|(p, _)| p.as_ref() == path) {
            Some(slot) => slot.1 = enabled,
            None => {
                bucket.push((path.into_boxed_str(), enabled));
                self.len += 1;
            }
        }
    }
}

impl FromIterator<(String, bool)> for GateTable {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (path, enabled) in iter {
            table.insert(path, enabled);
        }
        table
    }
}
