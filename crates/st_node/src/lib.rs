#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

mod error;
mod list;
mod map;
mod node;
mod options;
mod path;
mod scalar;

#[cfg(feature = "serde")]
mod serde;

pub mod text;

// -----------------------------------------------------------------------------
// Exports

pub use error::NodeError;
pub use list::ListNode;
pub use map::MapNode;
pub use node::Node;
pub use options::{NodeOptions, Translator};
pub use path::NodePath;
pub use scalar::{ScalarNode, TRUE_WORDS};

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::text::{TextReader, TextWriter};
    use crate::{MapNode, ScalarNode};

    #[test]
    fn write_then_read_keeps_tree() {
        let mut root = MapNode::new();
        root.add("count", "3").unwrap();
        root.add("label", "a b").unwrap().comments_mut().push("shown".into());
        root.add("empty", "").unwrap();
        root.add("nothing", ScalarNode::null()).unwrap();
        root.add("word", "null").unwrap();
        let nested = root.new_map("nested key").unwrap();
        nested.add("tricky", " {x}, \"y\"\n").unwrap();
        let list = nested.new_list("list").unwrap();
        list.push("1");
        list.new_map().add("k", "v").unwrap();
        list.new_list().push("deep");
        root.new_map("blank").unwrap();

        let mut text = String::new();
        TextWriter::new(&mut text, 2).write_map(&root).unwrap();
        let back = TextReader::new(&text).preserve_comments(true).read().unwrap();
        assert_eq!(back, root);

        let stripped = TextReader::new(&text).read().unwrap();
        let mut expected = root.clone();
        expected.strip_comments();
        assert_eq!(stripped, expected);
    }
}
