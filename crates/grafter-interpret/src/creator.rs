use std::cell::OnceCell;

use grafter_rules::{Data, Descriptor, Parameter};
use grafter_tree::{Factory, Fragment, NodeRef, NullNode};

use crate::Captures;

/// Builds nodes shaped like the right side of one transformation.
///
/// Creators for nested descriptors are built on first use and reused for
/// every later match.
#[derive(Debug)]
pub struct Creator {
    template: Descriptor,
    nested: Box<[OnceCell<Creator>]>,
}

impl Creator {
    pub fn new(template: Descriptor) -> Self {
        let arity = template.as_concrete().map_or(0, |template| template.parameters().len());
        let nested = (0..arity).map(|_| OnceCell::new()).collect();
        Self { template, nested }
    }

    /// A hole resolves to the child captured under its index, or to a null
    /// node when nothing was captured. A data hole falls back to the data of
    /// the child captured under the same index.
    pub fn create(&self, factory: &dyn Factory, captures: &Captures, fragment: Fragment) -> NodeRef {
        let Descriptor::Concrete(template) = &self.template else {
            return NullNode::create();
        };

        let children = template
            .parameters()
            .iter()
            .zip(self.nested.iter())
            .map(|(parameter, nested)| match parameter {
                Parameter::Hole(hole) => {
                    captures.child(hole.index).cloned().unwrap_or_else(NullNode::create)
                }
                Parameter::Descriptor(descriptor) => nested
                    .get_or_init(|| Self::new(descriptor.clone()))
                    .create(factory, captures, fragment),
            })
            .collect();

        let data = match &template.data {
            Some(Data::Literal(text)) => text.clone(),
            Some(Data::Hole(hole)) => captures
                .data(hole.index)
                .or_else(|| captures.child(hole.index).map(|child| child.data()))
                .unwrap_or_default()
                .to_owned(),
            None => String::new(),
        };

        let mut builder = factory.create_builder(&template.name);
        builder.set_fragment(fragment);
        builder.set_data(data);
        builder.set_children(children);
        builder.create_node()
    }
}
