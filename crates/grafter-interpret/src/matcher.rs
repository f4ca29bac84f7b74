use grafter_rules::{ConcreteDescriptor, Data, Descriptor, Parameter};
use grafter_tree::{NodeRef, NullNode};
use rustc_hash::FxHashMap;

/// Children and data bound to hole indices by a successful match.
#[derive(Debug, Default)]
pub struct Captures {
    children: FxHashMap<u32, NodeRef>,
    data: FxHashMap<u32, String>,
}

impl Captures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(&self, index: u32) -> Option<&NodeRef> {
        self.children.get(&index)
    }

    pub fn data(&self, index: u32) -> Option<&str> {
        self.data.get(&index).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.children.clear();
        self.data.clear();
    }
}

/// Tests nodes against the left side of one transformation.
///
/// A node matches when its type name equals the pattern's and it has exactly
/// as many children as the pattern has parameters. Nested descriptors must
/// match recursively, literal data must be equal and holes capture whatever
/// sits in their position.
#[derive(Debug)]
pub struct Matcher {
    pattern: Descriptor,
}

impl Matcher {
    pub fn new(pattern: Descriptor) -> Self {
        Self { pattern }
    }

    /// On failure `captures` may hold bindings from a partial match.
    pub fn matches(&self, node: &NodeRef, captures: &mut Captures) -> bool {
        match &self.pattern {
            Descriptor::Concrete(pattern) => matches_concrete(pattern, node, captures),
            Descriptor::Empty => NullNode::is_null(&**node),
            Descriptor::Extension => false,
        }
    }
}

fn matches_concrete(pattern: &ConcreteDescriptor, node: &NodeRef, captures: &mut Captures) -> bool {
    let parameters = pattern.parameters();
    if node.node_type().name() != pattern.name || node.child_count() != parameters.len() {
        tracing::trace!(pattern = %pattern.name, node = %node.type_name(), "shape differs");
        return false;
    }

    match &pattern.data {
        Some(Data::Literal(text)) if node.data() != text.as_str() => return false,
        Some(Data::Hole(hole)) => {
            captures.data.insert(hole.index, node.data().to_owned());
        }
        _ => {}
    }

    parameters.iter().zip(node.children()).all(|(parameter, child)| match parameter {
        Parameter::Hole(hole) => {
            captures.children.insert(hole.index, child.clone());
            true
        }
        Parameter::Descriptor(Descriptor::Concrete(nested)) => matches_concrete(nested, child, captures),
        Parameter::Descriptor(Descriptor::Empty) => NullNode::is_null(&**child),
        Parameter::Descriptor(Descriptor::Extension) => false,
    })
}
