//! Message catalog: an immutable tree of string templates.

use std::collections::BTreeMap;
use std::fmt;

/// A single catalog node: either a template leaf or a nested sub-tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageNode {
    /// Message template (e.g., `"Hello {name}"`).
    Leaf(String),
    /// Nested mapping of key segment to node.
    Tree(BTreeMap<String, MessageNode>),
}

impl MessageNode {
    /// What: Borrow the template when this node is a leaf.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(template) => Some(template),
            Self::Tree(_) => None,
        }
    }
}

impl From<&str> for MessageNode {
    fn from(value: &str) -> Self {
        Self::Leaf(value.to_string())
    }
}

impl From<String> for MessageNode {
    fn from(value: String) -> Self {
        Self::Leaf(value)
    }
}

impl From<BTreeMap<String, Self>> for MessageNode {
    fn from(value: BTreeMap<String, Self>) -> Self {
        Self::Tree(value)
    }
}

/// Error raised when external data cannot be shaped into a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A value at `path` is neither a string-like scalar nor a mapping.
    InvalidEntry {
        /// Dotted path of the offending entry (empty for the root).
        path: String,
        /// Short description of the value found.
        found: &'static str,
    },
    /// The document root is not a mapping.
    RootNotMapping,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEntry { path, found } => {
                write!(
                    f,
                    "catalog entry '{path}' must be a string or a mapping, found {found}"
                )
            }
            Self::RootNotMapping => write!(f, "catalog root must be a mapping"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Immutable message catalog rooted at a mapping.
///
/// Built once from external data and never mutated afterwards; share it
/// through `Arc` when several translators need the same tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    root: BTreeMap<String, MessageNode>,
}

impl MessageCatalog {
    /// What: Create a catalog from a root mapping.
    #[must_use]
    pub const fn new(root: BTreeMap<String, MessageNode>) -> Self {
        Self { root }
    }

    /// What: Create an empty catalog (every lookup misses).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            root: BTreeMap::new(),
        }
    }

    /// What: Whether the catalog has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// What: Resolve a dotted key to its leaf template.
    ///
    /// Inputs:
    /// - `key`: Dotted path (e.g., "app.titles.search")
    ///
    /// Output:
    /// - `Some(template)` when the path ends on a leaf, `None` otherwise
    ///
    /// Details:
    /// - Segments come from `split('.')`, so empty segments are looked up literally
    /// - Stops at the first segment that is missing or hits a leaf too early
    /// - A path ending on a sub-tree is a miss, not a partial match
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut node = self.root.get(first)?;
        for segment in segments {
            match node {
                MessageNode::Tree(children) => node = children.get(segment)?,
                MessageNode::Leaf(_) => return None,
            }
        }
        node.as_leaf()
    }

    /// What: List every dotted path that ends on a leaf.
    ///
    /// Output:
    /// - Sorted list of keys (e.g., `["app.titles.help", "app.titles.search"]`)
    #[must_use]
    pub fn leaf_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_leaf_keys(&self.root, "", &mut keys);
        keys
    }

    /// What: Build a catalog from a parsed YAML document.
    ///
    /// # Errors
    /// - Returns `CatalogError::RootNotMapping` when the document is not a mapping
    /// - Returns `CatalogError::InvalidEntry` for null values and sequences
    ///
    /// Details:
    /// - Numbers and booleans are stored as their string form
    pub fn from_yaml_value(value: &serde_norway::Value) -> Result<Self, CatalogError> {
        match value {
            serde_norway::Value::Mapping(map) => Ok(Self::new(yaml_mapping(map, "")?)),
            _ => Err(CatalogError::RootNotMapping),
        }
    }

    /// What: Build a catalog from a parsed JSON document.
    ///
    /// # Errors
    /// - Returns `CatalogError::RootNotMapping` when the document is not an object
    /// - Returns `CatalogError::InvalidEntry` for null values and arrays
    pub fn from_json_value(value: &serde_json::Value) -> Result<Self, CatalogError> {
        match value {
            serde_json::Value::Object(map) => Ok(Self::new(json_object(map, "")?)),
            _ => Err(CatalogError::RootNotMapping),
        }
    }
}

impl From<BTreeMap<String, MessageNode>> for MessageCatalog {
    fn from(root: BTreeMap<String, MessageNode>) -> Self {
        Self::new(root)
    }
}

/// Append `prefix.segment` for each leaf under `map`.
fn collect_leaf_keys(map: &BTreeMap<String, MessageNode>, prefix: &str, keys: &mut Vec<String>) {
    for (segment, node) in map {
        let path = join_path(prefix, segment);
        match node {
            MessageNode::Leaf(_) => keys.push(path),
            MessageNode::Tree(children) => collect_leaf_keys(children, &path, keys),
        }
    }
}

/// Dotted path join that leaves the root prefix empty.
fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

/// Convert a YAML mapping, coercing scalar keys to strings.
fn yaml_mapping(
    map: &serde_norway::Mapping,
    prefix: &str,
) -> Result<BTreeMap<String, MessageNode>, CatalogError> {
    let mut out = BTreeMap::new();
    for (key, value) in map {
        let segment = yaml_scalar(key).ok_or_else(|| CatalogError::InvalidEntry {
            path: prefix.to_string(),
            found: "a non-scalar key",
        })?;
        let path = join_path(prefix, &segment);
        let node = match value {
            serde_norway::Value::Mapping(children) => {
                MessageNode::Tree(yaml_mapping(children, &path)?)
            }
            other => MessageNode::Leaf(yaml_scalar(other).ok_or_else(|| {
                CatalogError::InvalidEntry {
                    path,
                    found: yaml_kind(other),
                }
            })?),
        };
        out.insert(segment, node);
    }
    Ok(out)
}

/// String form of a YAML scalar, `None` for null, sequences and mappings.
fn yaml_scalar(value: &serde_norway::Value) -> Option<String> {
    match value {
        serde_norway::Value::String(s) => Some(s.clone()),
        serde_norway::Value::Number(n) => Some(n.to_string()),
        serde_norway::Value::Bool(b) => Some(b.to_string()),
        serde_norway::Value::Tagged(tagged) => yaml_scalar(&tagged.value),
        _ => None,
    }
}

/// Human-readable YAML value kind for error messages.
const fn yaml_kind(value: &serde_norway::Value) -> &'static str {
    match value {
        serde_norway::Value::Null => "null",
        serde_norway::Value::Sequence(_) => "a sequence",
        serde_norway::Value::Mapping(_) => "a mapping",
        serde_norway::Value::Tagged(_) => "a tagged value",
        serde_norway::Value::Bool(_)
        | serde_norway::Value::Number(_)
        | serde_norway::Value::String(_) => "a scalar",
    }
}

/// Convert a JSON object; numbers and booleans become leaf strings.
fn json_object(
    map: &serde_json::Map<String, serde_json::Value>,
    prefix: &str,
) -> Result<BTreeMap<String, MessageNode>, CatalogError> {
    let mut out = BTreeMap::new();
    for (segment, value) in map {
        let path = join_path(prefix, segment);
        let node = match value {
            serde_json::Value::Object(children) => MessageNode::Tree(json_object(children, &path)?),
            serde_json::Value::String(s) => MessageNode::Leaf(s.clone()),
            serde_json::Value::Number(n) => MessageNode::Leaf(n.to_string()),
            serde_json::Value::Bool(b) => MessageNode::Leaf(b.to_string()),
            serde_json::Value::Null => {
                return Err(CatalogError::InvalidEntry { path, found: "null" });
            }
            serde_json::Value::Array(_) => {
                return Err(CatalogError::InvalidEntry {
                    path,
                    found: "an array",
                });
            }
        };
        out.insert(segment.clone(), node);
    }
    Ok(out)
}
