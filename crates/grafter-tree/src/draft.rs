use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::{Builder, Factory, Fragment, Node, NodeRef, Type};

/// A type known only by name: no declared children and no ancestors.
#[derive(Debug)]
pub struct DraftType {
    /// Holds just the name, so that it doubles as the hierarchy.
    hierarchy: [String; 1],
}

impl DraftType {
    pub fn new(name: impl Into<String>) -> Rc<Self> {
        Rc::new(Self { hierarchy: [name.into()] })
    }
}

impl Type for DraftType {
    fn name(&self) -> &str {
        &self.hierarchy[0]
    }

    fn child_types(&self) -> &[String] {
        &[]
    }

    fn hierarchy(&self) -> &[String] {
        &self.hierarchy
    }

    fn create_builder(self: Rc<Self>) -> Box<dyn Builder> {
        Box::new(DraftBuilder::new(self))
    }
}

/// A node of any type, built without schema checks.
#[derive(Debug)]
pub struct DraftNode {
    node_type: Rc<dyn Type>,
    fragment: Fragment,
    data: String,
    children: Vec<NodeRef>,
}

impl Node for DraftNode {
    fn node_type(&self) -> Rc<dyn Type> {
        Rc::clone(&self.node_type)
    }

    fn data(&self) -> &str {
        &self.data
    }

    fn children(&self) -> &[NodeRef] {
        &self.children
    }

    fn fragment(&self) -> Fragment {
        self.fragment
    }
}

/// Builds [`DraftNode`]s of a given type. Other crates reuse it for their own
/// types when they have nothing to check.
pub struct DraftBuilder {
    node: DraftNode,
}

impl DraftBuilder {
    pub fn new(node_type: Rc<dyn Type>) -> Self {
        Self {
            node: DraftNode {
                node_type,
                fragment: Fragment::default(),
                data: String::new(),
                children: Vec::new(),
            },
        }
    }
}

impl Builder for DraftBuilder {
    fn set_fragment(&mut self, fragment: Fragment) {
        self.node.fragment = fragment;
    }

    fn set_data(&mut self, data: String) {
        self.node.data = data;
    }

    fn set_children(&mut self, children: Vec<NodeRef>) {
        self.node.children = children;
    }

    fn create_node(self: Box<Self>) -> NodeRef {
        Rc::new(self.node)
    }
}

/// Hands out draft builders for every name, sharing one [`DraftType`] per name.
#[derive(Debug, Default)]
pub struct DraftFactory {
    types: RefCell<FxHashMap<String, Rc<DraftType>>>,
}

impl DraftFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft_type(&self, name: &str) -> Rc<DraftType> {
        let mut types = self.types.borrow_mut();
        Rc::clone(types.entry(name.to_owned()).or_insert_with(|| DraftType::new(name)))
    }
}

impl Factory for DraftFactory {
    fn create_builder(&self, type_name: &str) -> Box<dyn Builder> {
        self.draft_type(type_name).create_builder()
    }
}
