//! Document value trees.
//!
//! A [`Node`] is the loosely typed, JSON-like payload attached to a shape by
//! an applied trait. Object members keep their declared order.

use std::fmt;

use indexmap::IndexMap;

/// Ordered key to value mapping of an object node.
pub type ObjectNode = IndexMap<String, Node>;

/// An immutable document value.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Vec<Node>),
    Object(ObjectNode),
}

/// Discriminant of a [`Node`], used in log and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Null => "null",
            NodeKind::Boolean => "boolean",
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Array => "array",
            NodeKind::Object => "object",
        };
        f.write_str(name)
    }
}

impl Node {
    /// Builds an object node from key/value pairs, keeping their order.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexis_core::node::Node;
    ///
    /// let node = Node::object([("message", Node::from("use v2")), ("since", "2.0".into())]);
    /// let keys: Vec<_> = node.as_object().unwrap().keys().cloned().collect();
    /// assert_eq!(keys, ["message", "since"]);
    /// ```
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Node)>,
    {
        Node::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    /// Builds an array node from its elements.
    pub fn array<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        Node::Array(elements.into_iter().map(Into::into).collect())
    }

    /// An empty object, the usual payload of marker traits.
    pub fn empty_object() -> Self {
        Node::Object(ObjectNode::new())
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Null => NodeKind::Null,
            Node::Boolean(_) => NodeKind::Boolean,
            Node::Number(_) => NodeKind::Number,
            Node::String(_) => NodeKind::String,
            Node::Array(_) => NodeKind::Array,
            Node::Object(_) => NodeKind::Object,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Node::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Node::Array(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            Node::Object(members) => Some(members),
            _ => None,
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Boolean(value)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Number(value)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Number(value as f64)
    }
}

impl From<Vec<Node>> for Node {
    fn from(elements: Vec<Node>) -> Self {
        Node::Array(elements)
    }
}

impl From<ObjectNode> for Node {
    fn from(members: ObjectNode) -> Self {
        Node::Object(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_preserves_order() {
        let node = Node::object([("zeta", Node::Null), ("alpha", Node::Null), ("mid", Node::Null)]);
        let keys: Vec<&str> = node
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();

        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_array_from_strings() {
        let node = Node::array(["a", "b"]);

        assert_eq!(node.kind(), NodeKind::Array);
        let elements = node.as_array().unwrap();
        assert_eq!(elements[0].as_str(), Some("a"));
        assert_eq!(elements[1].as_str(), Some("b"));
    }

    #[test]
    fn test_accessors_reject_other_kinds() {
        let node = Node::from(true);

        assert_eq!(node.as_bool(), Some(true));
        assert!(node.as_str().is_none());
        assert!(node.as_object().is_none());
        assert!(node.as_array().is_none());
        assert!(node.as_number().is_none());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(Node::from(3_i64).kind().to_string(), "number");
        assert_eq!(Node::empty_object().kind().to_string(), "object");
        assert_eq!(Node::Null.kind().to_string(), "null");
    }
}
