//! Generic trees the interpreter reads and writes.
//!
//! A tree is a graph of reference-counted [`Node`]s. Nodes are frozen once a
//! [`Builder`] creates them; rewriting produces new nodes and shares the
//! untouched subtrees.

mod draft;
pub mod json;
mod null;

use std::fmt;
use std::rc::Rc;

pub use draft::{DraftBuilder, DraftFactory, DraftNode, DraftType};
use grafter_tokenizer::write_quoted;
pub use json::TreeError;
pub use null::{NULL_TYPE_NAME, NullNode};
pub use text_size::TextRange;

pub type NodeRef = Rc<dyn Node>;

/// Where a node came from in its source text, if anywhere.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Fragment {
    pub range: TextRange,
}

impl Fragment {
    pub fn new(range: TextRange) -> Self {
        Self { range }
    }
}

pub trait Node: fmt::Debug {
    fn node_type(&self) -> Rc<dyn Type>;

    /// Leaf data; empty for nodes without any.
    fn data(&self) -> &str;

    fn children(&self) -> &[NodeRef];

    fn fragment(&self) -> Fragment {
        Fragment::default()
    }

    fn child_count(&self) -> usize {
        self.children().len()
    }

    fn child(&self, index: usize) -> Option<&NodeRef> {
        self.children().get(index)
    }

    fn type_name(&self) -> String {
        self.node_type().name().to_owned()
    }
}

pub trait Type: fmt::Debug {
    fn name(&self) -> &str;

    /// Declared child types, in order. Empty when unknown.
    fn child_types(&self) -> &[String];

    /// This type followed by every type it derives from.
    fn hierarchy(&self) -> &[String];

    fn create_builder(self: Rc<Self>) -> Box<dyn Builder>;

    fn is_a(&self, name: &str) -> bool {
        self.hierarchy().iter().any(|ancestor| ancestor == name)
    }
}

/// Accumulates the fields of one node, then freezes them.
pub trait Builder {
    fn set_fragment(&mut self, fragment: Fragment);

    fn set_data(&mut self, data: String);

    fn set_children(&mut self, children: Vec<NodeRef>);

    fn create_node(self: Box<Self>) -> NodeRef;
}

pub trait Factory {
    /// A builder for `type_name`. Factories that do not know the name hand out
    /// a draft builder instead of failing.
    fn create_builder(&self, type_name: &str) -> Box<dyn Builder>;

    fn create_node(&self, type_name: &str, data: &str, children: Vec<NodeRef>) -> NodeRef {
        let mut builder = self.create_builder(type_name);
        builder.set_data(data.to_owned());
        builder.set_children(children);
        builder.create_node()
    }
}

/// Structural equality: same type name, data and children, recursively.
impl PartialEq for dyn Node + '_ {
    fn eq(&self, other: &Self) -> bool {
        self.node_type().name() == other.node_type().name()
            && self.data() == other.data()
            && self.child_count() == other.child_count()
            && self.children().iter().zip(other.children()).all(|(a, b)| **a == **b)
    }
}

impl Eq for dyn Node + '_ {}

/// Renders a tree in descriptor syntax: `Type(child, ...)<"data">`, with the
/// parentheses left out for leaves.
impl fmt::Display for dyn Node + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.node_type().name())?;

        if !self.children().is_empty() {
            f.write_str("(")?;
            for (index, child) in self.children().iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                fmt::Display::fmt(&**child, f)?;
            }
            f.write_str(")")?;
        }

        if !self.data().is_empty() {
            f.write_str("<")?;
            write_quoted(f, self.data())?;
            f.write_str(">")?;
        }
        Ok(())
    }
}
