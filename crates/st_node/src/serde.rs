//! [`Serialize`] for the document tree.
//!
//! Scalars become strings or unit, maps keep their entry order and lists become
//! sequences. Comments are not exported.

use serde_core::ser::{SerializeMap, SerializeSeq};
use serde_core::{Serialize, Serializer};

use crate::{ListNode, MapNode, Node, ScalarNode};

impl Serialize for ScalarNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_str() {
            Some(text) => serializer.serialize_str(text),
            None => serializer.serialize_unit(),
        }
    }
}

impl Serialize for MapNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(Some(self.len()))?;
        for (key, node) in self.iter() {
            state.serialize_entry(key, node)?;
        }
        state.end()
    }
}

impl Serialize for ListNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_seq(Some(self.len()))?;
        for node in self.iter() {
            state.serialize_element(node)?;
        }
        state.end()
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(scalar) => scalar.serialize(serializer),
            Self::Map(map) => map.serialize(serializer),
            Self::List(list) => list.serialize(serializer),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::text::TextReader;

    #[test]
    fn exports_to_json() {
        let root = TextReader::new("b = 1\na [\n  x\n  null\n]\nc {\n  d = \"\"\n}")
            .read()
            .unwrap();
        let json = serde_json::to_string(&root).unwrap();
        assert_eq!(json, r#"{"b":"1","a":["x",null],"c":{"d":""}}"#);
    }
}
