use std::rc::Rc;

use grafter_rules::Program;
use grafter_tree::{Builder, DraftBuilder, DraftFactory, Factory, Type};
use rustc_hash::FxHashMap;

use crate::Analyzer;

/// A concrete node or literal type declared by a program.
#[derive(Debug)]
pub struct SchemaType {
    hierarchy: Vec<String>,
    child_types: Vec<String>,
}

impl Type for SchemaType {
    fn name(&self) -> &str {
        &self.hierarchy[0]
    }

    fn child_types(&self) -> &[String] {
        &self.child_types
    }

    fn hierarchy(&self) -> &[String] {
        &self.hierarchy
    }

    fn create_builder(self: Rc<Self>) -> Box<dyn Builder> {
        Box::new(DraftBuilder::new(self))
    }
}

/// Builds nodes whose types carry the hierarchy and children the program
/// declares for one language. Abstract and undeclared types get draft
/// builders.
#[derive(Debug, Default)]
pub struct SchemaFactory {
    types: FxHashMap<String, Rc<SchemaType>>,
    fallback: DraftFactory,
}

impl SchemaFactory {
    pub fn new(analyzer: &Analyzer, program: &Program) -> Self {
        let nodes = analyzer.types().filter(|name| !analyzer.is_abstract(name)).map(|name| {
            let child_types =
                analyzer.tagged_children(name).iter().map(|child| child.type_name.clone()).collect();
            (name, child_types)
        });
        let literals = program.literals().map(|literal| (literal.name.as_str(), Vec::new()));

        let types = nodes
            .chain(literals)
            .map(|(name, child_types)| {
                let hierarchy = analyzer.hierarchy_of(name);
                (name.to_owned(), Rc::new(SchemaType { hierarchy, child_types }))
            })
            .collect();

        Self { types, fallback: DraftFactory::new() }
    }

    pub fn schema_type(&self, name: &str) -> Option<Rc<SchemaType>> {
        self.types.get(name).cloned()
    }
}

impl Factory for SchemaFactory {
    fn create_builder(&self, type_name: &str) -> Box<dyn Builder> {
        match self.types.get(type_name) {
            Some(schema) => Rc::clone(schema).create_builder(),
            None => {
                tracing::warn!(type_name, "no declared type, building a draft node");
                self.fallback.create_builder(type_name)
            }
        }
    }
}
