use grafter_tokenizer::{Token, render_list};

use crate::GrammarError;

pub(crate) mod descriptor;
pub(crate) mod literal;
pub(crate) mod node;
pub(crate) mod transformation;

/// Splits a structured token list on a top-level separator. Separators inside
/// bracket pairs are already folded away by the structurer.
pub(crate) fn split<'t>(tokens: &'t [Token], separator: &Token) -> Vec<&'t [Token]> {
    tokens.split(|token| token == separator).collect()
}

/// The left-hand side of `<-`: exactly one capitalized identifier.
pub(crate) fn type_name(tokens: &[Token]) -> Result<String, GrammarError> {
    match tokens {
        [Token::Identifier(name)] => {
            capitalized(name)?;
            Ok(name.clone())
        }
        _ => Err(GrammarError::ExpectedTypeName(render_list(tokens))),
    }
}

pub(crate) fn capitalized(name: &str) -> Result<(), GrammarError> {
    if name.chars().next().is_some_and(char::is_uppercase) {
        Ok(())
    } else {
        Err(GrammarError::NodeNameCapitalLetter(name.to_owned()))
    }
}
