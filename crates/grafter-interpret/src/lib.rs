//! Tree rewriting driven by the transformations of a rule program.

mod adapter;
mod converter;
mod creator;
mod matcher;

pub use adapter::{Adapter, AdapterOptions, ConvertReport};
pub use converter::Converter;
pub use creator::Creator;
pub use matcher::{Captures, Matcher};

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum InterpretError {
    #[error("there is no transformation #{variant}, the program has {count}")]
    NoSuchVariant { variant: usize, count: usize },
}
