use grafter_rules::Transformation;
use grafter_tree::{Factory, NodeRef};

use crate::{Captures, Creator, Matcher};

/// One transformation, ready to apply: a matcher for its left side and a
/// creator for its right side.
#[derive(Debug)]
pub struct Converter {
    matcher: Matcher,
    creator: Creator,
}

impl Converter {
    pub fn new(transformation: &Transformation) -> Self {
        Self {
            matcher: Matcher::new(transformation.left.clone()),
            creator: Creator::new(transformation.right.clone()),
        }
    }

    /// The replacement for `node`, or `None` when the left side does not match.
    pub fn convert(&self, node: &NodeRef, factory: &dyn Factory) -> Option<NodeRef> {
        self.convert_with(node, factory, &mut Captures::new())
    }

    /// Like [`Converter::convert`], reusing `captures` as scratch space.
    pub fn convert_with(
        &self,
        node: &NodeRef,
        factory: &dyn Factory,
        captures: &mut Captures,
    ) -> Option<NodeRef> {
        captures.clear();
        if !self.matcher.matches(node, captures) {
            return None;
        }
        Some(self.creator.create(factory, captures, node.fragment()))
    }
}
