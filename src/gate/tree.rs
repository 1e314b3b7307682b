//! Hierarchical category configuration as supplied by an operator.
//!
//! Every node carries a string value (possibly empty) and an ordered list of
//! named children. Any self-describing serde format deserializes into it:
//!
//! ```text
//! table / object   → children in document order, empty value
//! string           → value verbatim
//! bool             → "true" / "false"
//! integer / float  → decimal rendering
//! null / unit      → ""
//! array            → children keyed "0", "1", ...
//! ```

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

/// A node of the category configuration tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigTree {
    value: String,
    children: Vec<(String, ConfigTree)>,
}

impl ConfigTree {
    /// Create an empty tree (empty value, no children).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a leaf node carrying `value`.
    pub fn leaf(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            children: Vec::new(),
        }
    }

    /// Builder-style: append a child under `key`.
    pub fn with_child(mut self, key: impl Into<String>, child: ConfigTree) -> Self {
        self.children.push((key.into(), child));
        self
    }

    /// Builder-style: append a leaf child under `key`.
    pub fn with_leaf(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_child(key, ConfigTree::leaf(value))
    }

    /// Replace this node's own value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &ConfigTree)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up a direct child by key (first match).
    pub fn child(&self, key: &str) -> Option<&ConfigTree> {
        self.children
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Parse a tree from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Parse a tree from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl<'de> Deserialize<'de> for ConfigTree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TreeVisitor)
    }
}

struct TreeVisitor;

impl<'de> Visitor<'de> for TreeVisitor {
    type Value = ConfigTree;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a table of categories or a scalar gate value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<ConfigTree, E> {
        Ok(ConfigTree::leaf(if v { "true" } else { "false" }))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ConfigTree, E> {
        Ok(ConfigTree::leaf(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ConfigTree, E> {
        Ok(ConfigTree::leaf(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<ConfigTree, E> {
        Ok(ConfigTree::leaf(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ConfigTree, E> {
        Ok(ConfigTree::leaf(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<ConfigTree, E> {
        Ok(ConfigTree::leaf(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<ConfigTree, E> {
        Ok(ConfigTree::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<ConfigTree, E> {
        Ok(ConfigTree::new())
    }

    fn visit_some<D>(self, deserializer: D) -> Result<ConfigTree, D::Error>
    where
        D: Deserializer<'de>,
    {
        ConfigTree::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<ConfigTree, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut tree = ConfigTree::new();
        let mut index = 0usize;
        while let Some(child) = seq.next_element::<ConfigTree>()? {
            tree.children.push((index.to_string(), child));
            index += 1;
        }
        Ok(tree)
    }

    fn visit_map<A>(self, mut map: A) -> Result<ConfigTree, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut tree = ConfigTree::new();
        while let Some((key, child)) = map.next_entry::<String, ConfigTree>()? {
            tree.children.push((key, child));
        }
        Ok(tree)
    }
}
