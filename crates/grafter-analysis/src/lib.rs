//! Type-level facts about the nodes of one target language: which abstract
//! types each node belongs to and which tagged children it carries.

mod schema;

use grafter_parse::LabelFactory;
use grafter_rules::{Attribute, Child, Descriptor, Node, Statement};
use rustc_hash::{FxHashMap, FxHashSet};
pub use schema::{SchemaFactory, SchemaType};

type FxIndexMap<K, V> =
    indexmap::IndexMap<K, V, std::hash::BuildHasherDefault<rustc_hash::FxHasher>>;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("node `{0}` is defined more than once in the same scope")]
    ExpectedOnlyOneEntity(String),
    #[error("node `{0}` has more untagged children than there are labels")]
    TooManyAnonymousChildren(String),
}

/// One child of a concrete node as seen by code generation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TaggedChild {
    /// The tag, or the ordinal label of an untagged child.
    pub tag: String,
    pub type_name: String,
    pub attribute: Attribute,
    /// Set when an abstract ancestor already carries the tag, or when a
    /// language-scoped node redeclares a tag of the green node it extends.
    pub overridden: bool,
}

#[derive(Debug)]
struct Entry {
    node: Node,
    children: Vec<TaggedChild>,
}

#[derive(Debug)]
pub struct Analyzer {
    language: String,
    entries: FxIndexMap<String, Entry>,
    /// Abstract types that list a given type as an alternative, in
    /// declaration order.
    parents: FxHashMap<String, Vec<String>>,
}

impl Analyzer {
    /// Collects the node statements that apply to `language`. A
    /// language-scoped node replaces the common node of the same name, and
    /// inherits its children when it extends it with `&`.
    pub fn new<'a>(
        statements: impl IntoIterator<Item = &'a Statement>,
        language: &str,
    ) -> Result<Self, AnalysisError> {
        let mut common: FxIndexMap<&str, &Node> = FxIndexMap::default();
        let mut scoped: FxIndexMap<&str, &Node> = FxIndexMap::default();

        for statement in statements {
            let Some(node) = statement.as_node() else {
                continue;
            };
            if !statement.applies_to(language) {
                continue;
            }

            let scope = if statement.is_common() { &mut common } else { &mut scoped };
            if scope.insert(&node.name, node).is_some() {
                return Err(AnalysisError::ExpectedOnlyOneEntity(node.name.clone()));
            }
        }

        let mut entries = FxIndexMap::default();
        for (&name, &node) in &common {
            let entry = match scoped.get(name) {
                Some(&own) => Entry::scoped(own, Some(node))?,
                None => Entry::scoped(node, None)?,
            };
            entries.insert(name.to_owned(), entry);
        }
        for (&name, &node) in &scoped {
            if !common.contains_key(name) {
                entries.insert(name.to_owned(), Entry::scoped(node, None)?);
            }
        }

        let mut parents: FxHashMap<String, Vec<String>> = FxHashMap::default();
        for (name, entry) in &entries {
            for alternative in entry.node.alternatives() {
                parents.entry(alternative.to_owned()).or_default().push(name.clone());
            }
        }

        let mut analyzer = Self { language: language.to_owned(), entries, parents };
        analyzer.share_abstract_children();
        analyzer.mark_ancestor_overrides();
        Ok(analyzer)
    }

    /// Gives every abstract type the tagged children all of its alternatives
    /// agree on, by tag and type.
    fn share_abstract_children(&mut self) {
        let shared: Vec<(String, Vec<TaggedChild>)> = self
            .entries
            .keys()
            .filter(|name| self.is_abstract(name))
            .map(|name| (name.clone(), self.shared_children(name, &mut FxHashSet::default())))
            .collect();

        for (name, children) in shared {
            if let Some(entry) = self.entries.get_mut(&name) {
                entry.children = children;
            }
        }
    }

    fn shared_children(&self, name: &str, visiting: &mut FxHashSet<String>) -> Vec<TaggedChild> {
        let Some(entry) = self.entries.get(name) else {
            return Vec::new();
        };

        if !entry.node.is_abstract() {
            return entry
                .node
                .children()
                .zip(&entry.children)
                .filter(|(descriptor, _)| descriptor.tag.is_some())
                .map(|(_, child)| TaggedChild { overridden: false, ..child.clone() })
                .collect();
        }

        if !visiting.insert(name.to_owned()) {
            return Vec::new();
        }

        let mut alternatives = entry.node.alternatives();
        let mut shared = match alternatives.next() {
            Some(first) => self.shared_children(first, visiting),
            None => Vec::new(),
        };
        for alternative in alternatives {
            let children = self.shared_children(alternative, visiting);
            shared.retain(|child| {
                children
                    .iter()
                    .any(|other| other.tag == child.tag && other.type_name == child.type_name)
            });
        }

        visiting.remove(name);
        shared
    }

    fn mark_ancestor_overrides(&mut self) {
        let mut marks = Vec::new();
        for (name, entry) in &self.entries {
            let ancestors = self.hierarchy_of(name);
            for (index, child) in entry.children.iter().enumerate() {
                let inherited = ancestors[1..].iter().any(|ancestor| {
                    self.tagged_children(ancestor).iter().any(|other| other.tag == child.tag)
                });
                if inherited {
                    marks.push((name.clone(), index));
                }
            }
        }

        for (name, index) in marks {
            if let Some(entry) = self.entries.get_mut(&name) {
                entry.children[index].overridden = true;
            }
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Every node name, common ones first, in declaration order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The effective node for `name`, with inherited children merged in.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.entries.get(name).map(|entry| &entry.node)
    }

    pub fn is_abstract(&self, name: &str) -> bool {
        self.node(name).is_some_and(Node::is_abstract)
    }

    /// `name` followed by every abstract type it is reachable from through
    /// disjunctions, nearest first. Works for literal and unknown types too.
    pub fn hierarchy_of(&self, name: &str) -> Vec<String> {
        let mut hierarchy = vec![name.to_owned()];
        let mut next = 0;

        while let Some(current) = hierarchy.get(next) {
            let parents = self.parents.get(current.as_str()).map(Vec::as_slice).unwrap_or_default();
            let fresh: Vec<String> =
                parents.iter().filter(|parent| !hierarchy.contains(parent)).cloned().collect();
            hierarchy.extend(fresh);
            next += 1;
        }

        hierarchy
    }

    /// Children of a concrete node, or the tagged children shared by every
    /// alternative of an abstract one. Empty for unknown types.
    pub fn tagged_children(&self, name: &str) -> &[TaggedChild] {
        self.entries.get(name).map(|entry| entry.children.as_slice()).unwrap_or_default()
    }
}

impl Entry {
    /// Builds the effective entry for `own`, merging in the composition of
    /// `green` when `own` extends it. A tagged child of `own` replaces the
    /// green child with the same tag, and the untagged children of the merged
    /// composition are labelled again from one sequence.
    fn scoped(own: &Node, green: Option<&Node>) -> Result<Self, AnalysisError> {
        let inherited = green.filter(|_| own.extends_green());
        let mut composition: Vec<Child> =
            inherited.map(|green| green.composition.clone()).unwrap_or_default();
        let mut overridden = FxHashSet::default();

        for child in &own.composition {
            match child {
                Child::Descriptor(Descriptor::Extension) => {}
                Child::Descriptor(Descriptor::Concrete(concrete)) if concrete.tag.is_some() => {
                    let existing = composition.iter().position(|existing| {
                        matches!(existing, Child::Descriptor(Descriptor::Concrete(existing))
                            if existing.tag == concrete.tag)
                    });
                    match existing {
                        Some(index) => {
                            composition[index] = child.clone();
                            overridden.insert(concrete.variable_name());
                        }
                        None => composition.push(child.clone()),
                    }
                }
                _ => composition.push(child.clone()),
            }
        }

        let mut labels = LabelFactory::new();
        for child in &mut composition {
            if let Child::Descriptor(Descriptor::Concrete(concrete)) = child {
                if concrete.tag.is_none() {
                    let label = labels
                        .next_label()
                        .map_err(|_| AnalysisError::TooManyAnonymousChildren(own.name.clone()))?;
                    concrete.label = Some(label);
                }
            }
        }

        let node = Node { name: own.name.clone(), composition };
        let children = node
            .children()
            .map(|child| TaggedChild {
                tag: child.variable_name().to_owned(),
                type_name: child.name.clone(),
                attribute: child.attribute,
                overridden: overridden.contains(child.variable_name()),
            })
            .collect();

        Ok(Self { node, children })
    }
}

#[cfg(test)]
mod tests;
