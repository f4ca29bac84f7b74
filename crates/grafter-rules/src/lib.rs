//! Object model of the rule language: descriptors, the three rule kinds and
//! the program that groups them.
//!
//! Every type renders back to the exact text it was parsed from.

mod descriptor;
mod program;
mod rule;

pub use descriptor::{Attribute, ConcreteDescriptor, Data, Descriptor, Hole, Parameter};
pub use program::{COMMON_MARKER, Program, Statement};
pub use rule::{Child, Disjunction, Literal, Node, Rule, Transformation};
