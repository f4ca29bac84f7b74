use grafter_rules::Literal;
use grafter_tokenizer::{Token, render_list};

use super::{split, type_name};
use crate::GrammarError;

/// `Name <- $class$, $stringifier$, $parser$[, $exception$]`.
pub(crate) fn literal(left: &[Token], right: &[Token]) -> Result<Literal, GrammarError> {
    let name = type_name(left)?;

    let segments = split(right, &Token::Comma);
    let count = segments.len();
    let mut code = segments
        .into_iter()
        .map(|segment| match segment {
            [Token::NativeCode(code)] => Ok(code.clone()),
            segment => Err(GrammarError::ExpectedNativeCode(render_list(segment))),
        })
        .collect::<Result<Vec<_>, _>>()?
        .into_iter();

    match (code.next(), code.next(), code.next(), code.next(), code.next()) {
        (Some(class), Some(stringifier), Some(parser), exception, None) => {
            Ok(Literal { name, class, stringifier, parser, exception })
        }
        _ => Err(GrammarError::ExpectedThreeOrFourParameters(count)),
    }
}
