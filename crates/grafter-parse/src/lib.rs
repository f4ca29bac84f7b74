//! Recursive-descent front end of the rule language.
//!
//! Text is scanned and bracket-structured per statement, then parsed into the
//! object model of `grafter_rules`. Every failure is typed; [`program`] tags
//! it with the 1-based line of the offending statement.

mod error;
mod grammar;
mod labels;
mod parser;
mod program;
mod split;

pub use error::{GrammarError, ParseError, ParseErrorKind, ProgramError};
use grafter_rules::{Descriptor, Literal, Node, Parameter, Transformation};
use grafter_tokenizer::{Token, structure, tokenize};
pub use labels::LabelFactory;
pub use program::{program, statement};

/// Scans and structures `text`.
pub fn tokens(text: &str) -> Result<Vec<Token>, ParseErrorKind> {
    Ok(structure(tokenize(text)?)?)
}

pub fn descriptor(text: &str) -> Result<Descriptor, ParseErrorKind> {
    let tokens = tokens(text)?;
    Ok(grammar::descriptor::descriptor_exact(&tokens, &mut LabelFactory::new())?)
}

/// The inside of a `(...)` parameter list, without the parentheses.
pub fn parameters(text: &str) -> Result<Vec<Parameter>, ParseErrorKind> {
    Ok(grammar::descriptor::parameter_list(&tokens(text)?)?)
}

fn split_at(text: &str, arrow: &str) -> Result<(Vec<Token>, Vec<Token>), ParseErrorKind> {
    let at = split::find(text, arrow)
        .ok_or_else(|| GrammarError::ExpectedRule(text.trim().to_owned()))?;
    Ok((tokens(&text[..at])?, tokens(&text[at + arrow.len()..])?))
}

pub fn node(text: &str) -> Result<Node, ParseErrorKind> {
    let (left, right) = split_at(text, "<-")?;
    Ok(grammar::node::node(&left, &right)?)
}

pub fn literal(text: &str) -> Result<Literal, ParseErrorKind> {
    let (left, right) = split_at(text, "<-")?;
    Ok(grammar::literal::literal(&left, &right)?)
}

pub fn transformation(text: &str) -> Result<Transformation, ParseErrorKind> {
    let (left, right) = split_at(text, "->")?;
    Ok(grammar::transformation::transformation(&left, &right)?)
}

#[cfg(test)]
mod tests;
