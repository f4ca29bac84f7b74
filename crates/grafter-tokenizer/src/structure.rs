use crate::{Bracket, Token};

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum StructureError {
    #[error("brackets do not match: `{opening}` is closed by `{closing}`")]
    BracketsDoNotMatch { opening: char, closing: char },
    #[error("bracket `{0}` is not closed")]
    NotClosedBracket(char),
    #[error("closing bracket `{0}` has no opening bracket")]
    NotOpenedBracket(char),
}

struct Frame {
    opening: Bracket,
    tokens: Vec<Token>,
}

/// Folds every matched bracket pair of a flat token stream into a single
/// [`Token::Pair`] holding its (recursively structured) contents.
pub fn structure(tokens: Vec<Token>) -> Result<Vec<Token>, StructureError> {
    let mut root = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Frame> = Vec::new();

    for token in tokens {
        match token {
            Token::Open(opening) => stack.push(Frame { opening, tokens: Vec::new() }),
            Token::Close(closing) => {
                let Some(frame) = stack.pop() else {
                    return Err(StructureError::NotOpenedBracket(closing.close()));
                };

                if frame.opening != closing {
                    return Err(StructureError::BracketsDoNotMatch {
                        opening: frame.opening.open(),
                        closing: closing.close(),
                    });
                }

                let pair = Token::Pair(frame.opening, frame.tokens);
                match stack.last_mut() {
                    Some(parent) => parent.tokens.push(pair),
                    None => root.push(pair),
                }
            }
            token => match stack.last_mut() {
                Some(frame) => frame.tokens.push(token),
                None => root.push(token),
            },
        }
    }

    match stack.pop() {
        Some(unclosed) => Err(StructureError::NotClosedBracket(unclosed.opening.open())),
        None => Ok(root),
    }
}
