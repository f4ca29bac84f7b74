use std::fmt;

use crate::{Literal, Node, Rule, Transformation};

type FxIndexSet<T> = indexmap::IndexSet<T, std::hash::BuildHasherDefault<rustc_hash::FxHasher>>;

/// Marker that switches the statements that follow back to the common scope.
pub const COMMON_MARKER: &str = "common";

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Statement {
    /// Target language of the rule; empty for common ("green") rules.
    pub language: String,
    /// 1-based source line the statement starts on.
    pub line: u32,
    pub rule: Rule,
}

impl Statement {
    pub fn is_common(&self) -> bool {
        self.language.is_empty()
    }

    /// Whether the statement applies when generating for `language`.
    pub fn applies_to(&self, language: &str) -> bool {
        self.is_common() || self.language == language
    }

    pub fn as_node(&self) -> Option<&Node> {
        match &self.rule {
            Rule::Node(node) => Some(node),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Program {
    statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Statements that apply to `language`: its own plus the common ones.
    pub fn statements_for<'a>(&'a self, language: &'a str) -> impl Iterator<Item = &'a Statement> {
        self.statements.iter().filter(move |statement| statement.applies_to(language))
    }

    pub fn node_statements(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter().filter(|statement| matches!(statement.rule, Rule::Node(_)))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.statements.iter().filter_map(Statement::as_node)
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.statements.iter().filter_map(|statement| match &statement.rule {
            Rule::Literal(literal) => Some(literal),
            _ => None,
        })
    }

    pub fn transformations(&self) -> impl Iterator<Item = &Transformation> {
        self.statements.iter().filter_map(|statement| match &statement.rule {
            Rule::Transformation(transformation) => Some(transformation),
            _ => None,
        })
    }

    /// Transformations that apply to `language`, in declaration order.
    pub fn transformations_for<'a>(
        &'a self,
        language: &'a str,
    ) -> impl Iterator<Item = &'a Transformation> {
        self.statements_for(language).filter_map(|statement| match &statement.rule {
            Rule::Transformation(transformation) => Some(transformation),
            _ => None,
        })
    }

    /// Distinct non-common languages, in order of first appearance.
    pub fn languages_used(&self) -> Vec<&str> {
        self.statements
            .iter()
            .filter(|statement| !statement.is_common())
            .map(|statement| statement.language.as_str())
            .collect::<FxIndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// Looks up the node `name` as seen from `language`, preferring a
    /// language-scoped definition over the common one.
    pub fn node<'a>(&'a self, name: &str, language: &'a str) -> Option<&'a Node> {
        let mut common = None;
        for statement in self.statements_for(language) {
            let Some(node) = statement.as_node().filter(|node| node.name == name) else {
                continue;
            };
            if statement.is_common() {
                common = common.or(Some(node));
            } else {
                return Some(node);
            }
        }
        common
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut language = "";
        for statement in &self.statements {
            if statement.language != language {
                language = &statement.language;
                let marker = if language.is_empty() { COMMON_MARKER } else { language };
                writeln!(f, "{marker}:")?;
            }
            writeln!(f, "{}", statement.rule)?;
        }
        Ok(())
    }
}
