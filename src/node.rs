//! Document tree consumed by the binder.
//!
//! A [`Node`] is the order-preserving dynamic value a YAML parser produces:
//! `Undefined`, `Null`, `Scalar`, `Sequence`, or `Map`. `Undefined` is the
//! result of looking up a key or index that does not exist and is distinct
//! from `Null`; the binder treats it as "absent", never as a type mismatch.
//!
//! The textual parser itself is `serde_yaml`; [`Node::from_yaml_str`] is the
//! adapter boundary.

use serde_yaml::Value as YamlValue;

/// Shared absent node returned by failed lookups.
static UNDEFINED: Node = Node::Undefined;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Absence: indexing a nonexistent key/index. Carries no content.
    Undefined,
    Null,
    /// Scalar text, unparsed. Numeric/bool interpretation happens in the codec.
    Scalar(String),
    Sequence(Vec<Node>),
    /// Ordered key-value pairs; keys may themselves be scalar or composite.
    Map(Vec<(Node, Node)>),
}

/// Node kind tag, used for introspection and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Undefined,
    Null,
    Scalar,
    Sequence,
    Map,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Undefined => NodeKind::Undefined,
            Node::Null => NodeKind::Null,
            Node::Scalar(_) => NodeKind::Scalar,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Map(_) => NodeKind::Map,
        }
    }

    pub fn is_defined(&self) -> bool {
        !matches!(self, Node::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Node::Scalar(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Node::Sequence(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Node::Map(_))
    }

    /// Scalar text, or `None` for any other kind.
    pub fn scalar(&self) -> Option<&str> {
        match self {
            Node::Scalar(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Number of elements for a Sequence or Map, 0 otherwise.
    pub fn len(&self) -> usize {
        match self {
            Node::Sequence(items) => items.len(),
            Node::Map(entries) => entries.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a map entry by exact scalar key. Missing entries yield
    /// `Undefined`, not an error.
    pub fn get(&self, key: &str) -> &Node {
        match self {
            Node::Map(entries) => entries
                .iter()
                .find(|(k, _)| k.scalar() == Some(key))
                .map(|(_, v)| v)
                .unwrap_or(&UNDEFINED),
            _ => &UNDEFINED,
        }
    }

    /// Look up a map entry with a caller-supplied key comparison. The binder
    /// uses this with its case-insensitive match so value lookup and
    /// additional-property detection share one folding rule.
    pub fn get_by<F>(&self, mut matches: F) -> &Node
    where
        F: FnMut(&str) -> bool,
    {
        match self {
            Node::Map(entries) => entries
                .iter()
                .find(|(k, _)| k.scalar().is_some_and(&mut matches))
                .map(|(_, v)| v)
                .unwrap_or(&UNDEFINED),
            _ => &UNDEFINED,
        }
    }

    /// Sequence element by index; out of range yields `Undefined`.
    pub fn index(&self, i: usize) -> &Node {
        match self {
            Node::Sequence(items) => items.get(i).unwrap_or(&UNDEFINED),
            _ => &UNDEFINED,
        }
    }

    /// All scalar keys of a Map, in tree order; empty for other kinds.
    pub fn map_keys(&self) -> Vec<&str> {
        match self {
            Node::Map(entries) => entries.iter().filter_map(|(k, _)| k.scalar()).collect(),
            _ => Vec::new(),
        }
    }

    /// Map entries in tree order; empty slice for other kinds.
    pub fn entries(&self) -> &[(Node, Node)] {
        match self {
            Node::Map(entries) => entries.as_slice(),
            _ => &[],
        }
    }

    /// Sequence items in tree order; empty slice for other kinds.
    pub fn items(&self) -> &[Node] {
        match self {
            Node::Sequence(items) => items.as_slice(),
            _ => &[],
        }
    }

    /// Short single-line rendering used in error paths for composite map keys.
    pub fn brief(&self) -> String {
        match self {
            Node::Undefined => "~undefined".to_string(),
            Node::Null => "~".to_string(),
            Node::Scalar(s) => s.clone(),
            Node::Sequence(items) => format!("[{} items]", items.len()),
            Node::Map(entries) => format!("{{{} entries}}", entries.len()),
        }
    }

    /// Parse a YAML document into a tree. Parse failures are reported as the
    /// parser's own message; an empty document parses to `Null`.
    pub fn from_yaml_str(source: &str) -> Result<Node, String> {
        let value: YamlValue =
            serde_yaml::from_str(source).map_err(|e| format!("yaml parse error: {e}"))?;
        Ok(Node::from_yaml(&value))
    }

    /// Convert a parsed `serde_yaml` value. Typed scalars keep their textual
    /// form so the codec sees the same text the document carried.
    pub fn from_yaml(value: &YamlValue) -> Node {
        match value {
            YamlValue::Null => Node::Null,
            YamlValue::Bool(b) => Node::Scalar(b.to_string()),
            YamlValue::Number(n) => Node::Scalar(n.to_string()),
            YamlValue::String(s) => Node::Scalar(s.clone()),
            YamlValue::Sequence(items) => {
                Node::Sequence(items.iter().map(Node::from_yaml).collect())
            }
            YamlValue::Mapping(m) => Node::Map(
                m.iter()
                    .map(|(k, v)| (Node::from_yaml(k), Node::from_yaml(v)))
                    .collect(),
            ),
            YamlValue::Tagged(t) => Node::from_yaml(&t.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_undefined_not_null() {
        let node = Node::from_yaml_str("a: 1").expect("parse");
        assert!(node.get("a").is_defined());
        assert_eq!(node.get("missing").kind(), NodeKind::Undefined);
        assert!(!node.get("missing").is_null());
    }

    #[test]
    fn map_preserves_document_order() {
        let node = Node::from_yaml_str("z: 1\na: 2\nm: 3").expect("parse");
        assert_eq!(node.map_keys(), vec!["z", "a", "m"]);
    }

    #[test]
    fn scalars_keep_text_form() {
        let node = Node::from_yaml_str("[42, 1.5, true, hello]").expect("parse");
        assert_eq!(node.index(0).scalar(), Some("42"));
        assert_eq!(node.index(1).scalar(), Some("1.5"));
        assert_eq!(node.index(2).scalar(), Some("true"));
        assert_eq!(node.index(3).scalar(), Some("hello"));
        assert_eq!(node.index(4).kind(), NodeKind::Undefined);
    }
}
