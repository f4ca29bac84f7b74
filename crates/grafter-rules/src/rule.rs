use std::fmt;

use crate::{ConcreteDescriptor, Descriptor};

/// One entry of a node composition.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Child {
    Descriptor(Descriptor),
    Disjunction(Disjunction),
}

/// `A | B | C`: the concrete types an abstract node may be.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Disjunction {
    pub alternatives: Vec<Descriptor>,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Node {
    pub name: String,
    pub composition: Vec<Child>,
}

impl Node {
    pub fn is_abstract(&self) -> bool {
        self.composition.iter().any(|child| matches!(child, Child::Disjunction(_)))
    }

    /// Names of the types listed in this node's disjunction, if it is abstract.
    pub fn alternatives(&self) -> impl Iterator<Item = &str> {
        self.composition
            .iter()
            .filter_map(|child| match child {
                Child::Disjunction(disjunction) => Some(&disjunction.alternatives),
                Child::Descriptor(_) => None,
            })
            .flatten()
            .filter_map(Descriptor::name)
    }

    /// The concrete children of a non-abstract node, in declaration order.
    pub fn children(&self) -> impl Iterator<Item = &ConcreteDescriptor> {
        self.composition.iter().filter_map(|child| match child {
            Child::Descriptor(Descriptor::Concrete(concrete)) => Some(concrete),
            _ => None,
        })
    }

    /// Whether this node inherits the composition of the green node of the same
    /// name through a bare `&` child.
    pub fn extends_green(&self) -> bool {
        self.composition.contains(&Child::Descriptor(Descriptor::Extension))
    }
}

/// A leaf data type backed by a native class.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Literal {
    pub name: String,
    pub class: String,
    pub stringifier: String,
    pub parser: String,
    pub exception: Option<String>,
}

/// A rewrite rule: trees shaped like `left` become trees shaped like `right`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Transformation {
    pub left: Descriptor,
    pub right: Descriptor,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Rule {
    Node(Node),
    Literal(Literal),
    Transformation(Transformation),
}

impl Rule {
    /// The type a node or literal rule defines.
    pub fn defined_type(&self) -> Option<&str> {
        match self {
            Self::Node(node) => Some(&node.name),
            Self::Literal(literal) => Some(&literal.name),
            Self::Transformation(_) => None,
        }
    }
}

impl fmt::Display for Child {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Descriptor(descriptor) => fmt::Display::fmt(descriptor, f),
            Self::Disjunction(disjunction) => {
                for (index, alternative) in disjunction.alternatives.iter().enumerate() {
                    if index > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{alternative}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <- ", self.name)?;
        for (index, child) in self.composition.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{child}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <- ${}$, ${}$, ${}$", self.name, self.class, self.stringifier, self.parser)?;
        if let Some(exception) = &self.exception {
            write!(f, ", ${exception}$")?;
        }
        Ok(())
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.left, self.right)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(node) => fmt::Display::fmt(node, f),
            Self::Literal(literal) => fmt::Display::fmt(literal, f),
            Self::Transformation(transformation) => fmt::Display::fmt(transformation, f),
        }
    }
}
