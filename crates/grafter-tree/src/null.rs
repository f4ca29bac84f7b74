use std::rc::Rc;

use crate::{Builder, Fragment, Node, NodeRef, Type};

/// Type name of [`NullNode`].
pub const NULL_TYPE_NAME: &str = "null";

#[derive(Debug)]
struct NullType {
    hierarchy: [String; 1],
}

impl Type for NullType {
    fn name(&self) -> &str {
        NULL_TYPE_NAME
    }

    fn child_types(&self) -> &[String] {
        &[]
    }

    fn hierarchy(&self) -> &[String] {
        &self.hierarchy
    }

    fn create_builder(self: Rc<Self>) -> Box<dyn Builder> {
        Box::new(NullBuilder)
    }
}

/// Stands in for a missing node: no data, no children.
#[derive(Debug)]
pub struct NullNode {
    node_type: Rc<NullType>,
}

impl NullNode {
    pub fn create() -> NodeRef {
        Rc::new(Self { node_type: Rc::new(NullType { hierarchy: [NULL_TYPE_NAME.to_owned()] }) })
    }

    pub fn is_null(node: &dyn Node) -> bool {
        node.node_type().name() == NULL_TYPE_NAME
    }
}

impl Node for NullNode {
    fn node_type(&self) -> Rc<dyn Type> {
        self.node_type.clone()
    }

    fn data(&self) -> &str {
        ""
    }

    fn children(&self) -> &[NodeRef] {
        &[]
    }
}

/// Ignores everything it is given.
struct NullBuilder;

impl Builder for NullBuilder {
    fn set_fragment(&mut self, _fragment: Fragment) {}

    fn set_data(&mut self, _data: String) {}

    fn set_children(&mut self, _children: Vec<NodeRef>) {}

    fn create_node(self: Box<Self>) -> NodeRef {
        NullNode::create()
    }
}
