use grafter_rules::Transformation;
use grafter_tree::{Factory, NodeRef};
use la_arena::{Arena, Idx};
use crate::{Captures, Converter, InterpretError};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AdapterOptions {
    /// Upper bound on the passes [`Adapter::run`] makes. A pass that rewrites
    /// nothing ends the run early.
    pub max_passes: usize,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self { max_passes: 1 }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ConvertReport {
    pub passes: usize,
    pub rewrites: usize,
}

/// A node of the tree being converted. `children` holds the current child
/// list once one of the children has been replaced.
struct Slot {
    node: NodeRef,
    parent: Option<(Idx<Slot>, usize)>,
    children: Option<Vec<NodeRef>>,
}

/// Applies an ordered list of transformations to whole trees.
///
/// A pass visits every node after all of its children, so a rule sees the
/// already converted children of the node it is matched against. The first
/// rule that matches a node replaces it and the rest are not tried. Nodes
/// created by a pass are not matched again until the next pass.
pub struct Adapter<F> {
    /// Converters paired with the declaration index of their transformation.
    converters: Vec<(usize, Converter)>,
    factory: F,
    options: AdapterOptions,
}

impl<F: Factory> Adapter<F> {
    pub fn new<'a>(transformations: impl IntoIterator<Item = &'a Transformation>, factory: F) -> Self {
        let converters = transformations.into_iter().map(Converter::new).enumerate().collect();
        Self { converters, factory, options: AdapterOptions::default() }
    }

    /// An adapter for the `variant`-th transformation alone.
    pub fn single<'a>(
        transformations: impl IntoIterator<Item = &'a Transformation>,
        variant: usize,
        factory: F,
    ) -> Result<Self, InterpretError> {
        let transformations: Vec<_> = transformations.into_iter().collect();
        let Some(transformation) = transformations.get(variant) else {
            return Err(InterpretError::NoSuchVariant { variant, count: transformations.len() });
        };

        let converters = vec![(variant, Converter::new(transformation))];
        Ok(Self { converters, factory, options: AdapterOptions::default() })
    }

    pub fn with_options(mut self, options: AdapterOptions) -> Self {
        self.options = options;
        self
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn rule_count(&self) -> usize {
        self.converters.len()
    }

    /// One pass over the tree rooted at `root`.
    pub fn convert(&self, root: &NodeRef) -> NodeRef {
        self.convert_with_report(root).0
    }

    pub fn convert_with_report(&self, root: &NodeRef) -> (NodeRef, ConvertReport) {
        self.convert_until_stable(root, 1)
    }

    /// Passes as many times as the options allow.
    pub fn run(&self, root: &NodeRef) -> (NodeRef, ConvertReport) {
        self.convert_until_stable(root, self.options.max_passes)
    }

    /// Repeats passes until one rewrites nothing or `max_passes` have run.
    /// At least one pass is always made.
    pub fn convert_until_stable(&self, root: &NodeRef, max_passes: usize) -> (NodeRef, ConvertReport) {
        let mut report = ConvertReport::default();
        let mut tree = root.clone();

        while report.passes < max_passes.max(1) {
            let (converted, rewrites) = self.pass(&tree);
            report.passes += 1;
            report.rewrites += rewrites;
            tree = converted;

            if rewrites == 0 {
                break;
            }
        }

        (tree, report)
    }

    fn pass(&self, root: &NodeRef) -> (NodeRef, usize) {
        // Children are pushed left to right, so the right-most subtree is
        // allocated first and walking the keys backwards yields a left to
        // right post-order.
        let mut slots = Arena::with_capacity(root.child_count() + 1);
        let mut stack = vec![(root.clone(), None)];
        while let Some((node, parent)) = stack.pop() {
            let key = slots.alloc(Slot { node: node.clone(), parent, children: None });
            let children = node.children().iter().enumerate();
            stack.extend(children.map(|(index, child)| (child.clone(), Some((key, index)))));
        }

        let mut captures = Captures::new();
        let mut rewrites = 0;
        let mut result = root.clone();

        let keys: Vec<Idx<Slot>> = slots.iter().map(|(key, _)| key).collect();
        for key in keys.into_iter().rev() {
            let slot = &mut slots[key];
            let parent = slot.parent;
            let rebuilt = slot.children.take().map(|children| rebuild(&slot.node, children));
            let changed = rebuilt.is_some();
            let node = rebuilt.unwrap_or_else(|| slot.node.clone());

            let replacement = self.converters.iter().find_map(|(rule, converter)| {
                let replacement = converter.convert_with(&node, &self.factory, &mut captures)?;
                tracing::debug!(rule, node = %node.type_name(), "rewrote node");
                Some(replacement)
            });

            let node = match replacement {
                Some(replacement) => {
                    rewrites += 1;
                    replacement
                }
                None if changed => node,
                None => continue,
            };

            match parent {
                Some((parent, index)) => {
                    let Slot { node: original, children, .. } = &mut slots[parent];
                    children.get_or_insert_with(|| original.children().to_vec())[index] = node;
                }
                None => result = node,
            }
        }

        tracing::debug!(nodes = slots.len(), rewrites, "conversion pass finished");
        (result, rewrites)
    }
}

/// A copy of `node` with a new child list.
fn rebuild(node: &NodeRef, children: Vec<NodeRef>) -> NodeRef {
    let mut builder = node.node_type().create_builder();
    builder.set_fragment(node.fragment());
    builder.set_data(node.data().to_owned());
    builder.set_children(children);
    builder.create_node()
}
