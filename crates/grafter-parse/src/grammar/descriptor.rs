use grafter_rules::{Attribute, ConcreteDescriptor, Data, Descriptor, Hole, Parameter};
use grafter_tokenizer::{Bracket, Token};

use super::split;
use crate::parser::Parser;
use crate::{GrammarError, LabelFactory};

/// Parses a descriptor that must span all of `tokens`.
pub(crate) fn descriptor_exact(
    tokens: &[Token],
    labels: &mut LabelFactory,
) -> Result<Descriptor, GrammarError> {
    let mut p = Parser::new(tokens);
    let descriptor = descriptor(&mut p, labels)?;
    p.finish()?;
    Ok(descriptor)
}

/// `0`, `&`, `[D]`, `{D}`, `D` or `D&`.
pub(crate) fn descriptor(
    p: &mut Parser<'_>,
    labels: &mut LabelFactory,
) -> Result<Descriptor, GrammarError> {
    match p.peek() {
        Token::Empty => {
            p.advance();
            Ok(Descriptor::Empty)
        }
        Token::Ampersand => {
            p.advance();
            Ok(Descriptor::Extension)
        }
        Token::Pair(bracket @ (Bracket::Square | Bracket::Curly), inner) => {
            p.advance();
            let mut inner = Parser::new(inner);
            let mut concrete = concrete(&mut inner, labels)?;
            inner.finish()?;

            concrete.attribute =
                if *bracket == Bracket::Square { Attribute::Optional } else { Attribute::List };
            Ok(concrete.into())
        }
        Token::Identifier(_) => {
            let mut concrete = concrete(p, labels)?;
            if p.eat(&Token::Ampersand) {
                concrete.attribute = Attribute::Ext;
            }
            Ok(concrete.into())
        }
        other => Err(GrammarError::ExpectedDescriptor(other.to_string())),
    }
}

/// `tag@Name(parameters)<data>`, every part but the name optional.
fn concrete(
    p: &mut Parser<'_>,
    labels: &mut LabelFactory,
) -> Result<ConcreteDescriptor, GrammarError> {
    let first = match p.advance() {
        Token::Identifier(name) => name.clone(),
        other => return Err(GrammarError::ExpectedIdentifier(other.to_string())),
    };

    let (tag, name) = if p.eat(&Token::At) {
        match p.advance() {
            Token::Identifier(name) => (Some(first), name.clone()),
            _ => return Err(GrammarError::ExpectedIdentifierAfterAt),
        }
    } else {
        (None, first)
    };

    let parameters = p.eat_pair(Bracket::Round).map(parameter_list).transpose()?;
    let data = p.eat_pair(Bracket::Angle).map(data).transpose()?;
    let label = if tag.is_none() { Some(labels.next_label()?) } else { None };

    Ok(ConcreteDescriptor { tag, label, name, parameters, data, attribute: Attribute::Plain })
}

/// Comma separated holes and descriptors. Each list is its own label scope.
pub(crate) fn parameter_list(tokens: &[Token]) -> Result<Vec<Parameter>, GrammarError> {
    if tokens.is_empty() {
        return Ok(Vec::new());
    }

    let mut labels = LabelFactory::new();
    let segments = split(tokens, &Token::Comma);
    let last = segments.len() - 1;

    segments
        .into_iter()
        .enumerate()
        .map(|(position, segment)| match segment {
            [] => Err(GrammarError::EmptyParameter),
            [Token::Hole { index, ellipsis }] => {
                if *ellipsis && position != last {
                    return Err(GrammarError::EllipsisMustBeLast(*index));
                }
                Ok(Parameter::Hole(Hole { index: *index, ellipsis: *ellipsis }))
            }
            segment => descriptor_exact(segment, &mut labels).map(Parameter::Descriptor),
        })
        .collect()
}

/// The contents of `<...>`: one hole or one non-empty string.
fn data(tokens: &[Token]) -> Result<Data, GrammarError> {
    match tokens {
        [] => Err(GrammarError::ExpectedData),
        [Token::Hole { index, ellipsis }] => Ok(Data::Hole(Hole { index: *index, ellipsis: *ellipsis })),
        [Token::String(text)] if text.is_empty() => Err(GrammarError::EmptyDataLiteral),
        [Token::String(text)] => Ok(Data::Literal(text.clone())),
        [_] => Err(GrammarError::ExpectedData),
        _ => Err(GrammarError::ExpectedOnlyOneEntity),
    }
}

#[cfg(test)]
mod tests {
    use grafter_tokenizer::{structure, tokenize};

    use super::*;

    fn parse(text: &str) -> Result<Descriptor, GrammarError> {
        let tokens = structure(tokenize(text).unwrap()).unwrap();
        descriptor_exact(&tokens, &mut LabelFactory::new())
    }

    #[test]
    fn tag_and_name() {
        let Descriptor::Concrete(concrete) = parse("left@Expression").unwrap() else {
            panic!("expected a concrete descriptor");
        };
        assert_eq!(concrete.tag.as_deref(), Some("left"));
        assert_eq!(concrete.name, "Expression");
        assert_eq!(concrete.label, None);
        assert_eq!(concrete.parameters, None);
        assert_eq!(concrete.attribute, Attribute::Plain);
    }

    #[test]
    fn untagged_descriptors_are_labelled_per_scope() {
        let descriptor = parse("Call(Name, x@Name, Args(Expression, Expression))").unwrap();
        let labels: Vec<_> = descriptor
            .as_concrete()
            .unwrap()
            .parameters()
            .iter()
            .map(|parameter| match parameter {
                Parameter::Descriptor(descriptor) => descriptor.as_concrete().unwrap().label,
                Parameter::Hole(_) => None,
            })
            .collect();
        assert_eq!(labels, vec![Some("first"), None, Some("second")]);
    }

    #[test]
    fn attributes() {
        assert_eq!(parse("[Else]").unwrap().attribute(), Attribute::Optional);
        assert_eq!(parse("{items@Item}").unwrap().attribute(), Attribute::List);
        assert_eq!(parse("Base&").unwrap().attribute(), Attribute::Ext);
        assert_eq!(parse("0").unwrap(), Descriptor::Empty);
        assert_eq!(parse("&").unwrap(), Descriptor::Extension);
    }

    #[test]
    fn data_errors() {
        assert_eq!(parse("A<>"), Err(GrammarError::ExpectedData));
        assert_eq!(parse("A<B>"), Err(GrammarError::ExpectedData));
        assert_eq!(parse(r#"A<"">"#), Err(GrammarError::EmptyDataLiteral));
        assert_eq!(parse(r#"A<"x" "y">"#), Err(GrammarError::ExpectedOnlyOneEntity));
    }

    #[test]
    fn structural_errors() {
        assert_eq!(parse("a@"), Err(GrammarError::ExpectedIdentifierAfterAt));
        assert_eq!(parse("a@(B)"), Err(GrammarError::ExpectedIdentifierAfterAt));
        assert_eq!(parse("#1"), Err(GrammarError::ExpectedDescriptor("#1".to_owned())));
        assert_eq!(parse("[#1]"), Err(GrammarError::ExpectedIdentifier("#1".to_owned())));
        assert_eq!(parse("A B"), Err(GrammarError::CantParseSequence("B".to_owned())));
        assert_eq!(parse("A<#1>(B)"), Err(GrammarError::CantParseSequence("(B)".to_owned())));
        assert_eq!(parse("[A]&"), Err(GrammarError::CantParseSequence("&".to_owned())));
        assert_eq!(parse("A(#1, )"), Err(GrammarError::EmptyParameter));
        assert_eq!(parse("A(#1..., #2)"), Err(GrammarError::EllipsisMustBeLast(1)));
    }
}
