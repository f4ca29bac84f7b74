use grafter_rules::{Attribute, Child, Descriptor, Disjunction, Node};
use grafter_tokenizer::{Token, render_list};
use rustc_hash::FxHashSet;

use super::descriptor::descriptor_exact;
use super::{capitalized, split, type_name};
use crate::{GrammarError, LabelFactory};

/// `Name <- composition`, given the tokens on each side of `<-`.
pub(crate) fn node(left: &[Token], right: &[Token]) -> Result<Node, GrammarError> {
    let name = type_name(left)?;
    let alternatives = split(right, &Token::Bar);

    let composition = if alternatives.len() > 1 {
        vec![Child::Disjunction(disjunction(&alternatives)?)]
    } else {
        composition(right)?
    };

    Ok(Node { name, composition })
}

fn disjunction(alternatives: &[&[Token]]) -> Result<Disjunction, GrammarError> {
    let mut seen = FxHashSet::default();
    let alternatives = alternatives
        .iter()
        .map(|tokens| match tokens {
            [Token::Identifier(name)] => {
                capitalized(name)?;
                if !seen.insert(name.as_str()) {
                    return Err(GrammarError::DuplicateInheritance(name.clone()));
                }
                Ok(Descriptor::concrete(name.clone()))
            }
            [] => Err(GrammarError::ExpectedDescriptor(Token::Bar.to_string())),
            tokens => Err(GrammarError::ExpectedTypeName(render_list(tokens))),
        })
        .collect::<Result<_, _>>()?;

    Ok(Disjunction { alternatives })
}

fn composition(tokens: &[Token]) -> Result<Vec<Child>, GrammarError> {
    if tokens.is_empty() {
        return Err(GrammarError::ExpectedDescriptor(Token::Null.to_string()));
    }

    let mut labels = LabelFactory::new();
    let mut tags = FxHashSet::default();
    let mut has_list = false;

    let segments = split(tokens, &Token::Comma);
    let alone = segments.len() == 1;
    let mut composition = Vec::with_capacity(segments.len());

    for segment in segments {
        if segment.is_empty() {
            return Err(GrammarError::EmptyParameter);
        }

        let descriptor = descriptor_exact(segment, &mut labels)?;
        match &descriptor {
            Descriptor::Empty if !alone => return Err(GrammarError::UnexpectedEmpty),
            Descriptor::Empty | Descriptor::Extension => {}
            Descriptor::Concrete(child) => {
                if !child.is_tagged_name() {
                    return Err(GrammarError::ExpectedTaggedName(descriptor.to_string()));
                }
                capitalized(&child.name)?;

                if child.attribute == Attribute::List {
                    if has_list {
                        return Err(GrammarError::OnlyOneListDescriptor);
                    }
                    has_list = true;
                }

                if let Some(tag) = &child.tag {
                    if !tags.insert(tag.clone()) {
                        return Err(GrammarError::DuplicateTag(tag.clone()));
                    }
                }
            }
        }

        composition.push(Child::Descriptor(descriptor));
    }

    Ok(composition)
}

#[cfg(test)]
mod tests {
    use grafter_tokenizer::{structure, tokenize};

    use super::*;

    fn parse(left: &str, right: &str) -> Result<Node, GrammarError> {
        let left = structure(tokenize(left).unwrap()).unwrap();
        let right = structure(tokenize(right).unwrap()).unwrap();
        node(&left, &right)
    }

    #[test]
    fn abstract_node() {
        let node = parse("Expression", "Addition | Subtraction | Literal").unwrap();
        assert!(node.is_abstract());
        assert_eq!(node.alternatives().collect::<Vec<_>>(), ["Addition", "Subtraction", "Literal"]);
        assert_eq!(node.children().count(), 0);
    }

    #[test]
    fn concrete_node() {
        let node = parse("If", "condition@Expression, Statement, [Else]").unwrap();
        assert!(!node.is_abstract());
        let names: Vec<_> = node.children().map(|child| child.variable_name()).collect();
        assert_eq!(names, ["condition", "first", "second"]);
    }

    #[test]
    fn empty_and_extension() {
        assert_eq!(parse("Nothing", "0").unwrap().composition, [Child::Descriptor(Descriptor::Empty)]);
        assert!(parse("Call", "&, args@Arguments").unwrap().extends_green());
        assert_eq!(parse("Call", "a@A, 0"), Err(GrammarError::UnexpectedEmpty));
    }

    #[test]
    fn rejected_nodes() {
        assert_eq!(
            parse("expression", "A | B"),
            Err(GrammarError::NodeNameCapitalLetter("expression".to_owned()))
        );
        assert_eq!(parse("A B", "C"), Err(GrammarError::ExpectedTypeName("A B".to_owned())));
        assert_eq!(parse("E", "A | B | A"), Err(GrammarError::DuplicateInheritance("A".to_owned())));
        assert_eq!(parse("E", "A | b"), Err(GrammarError::NodeNameCapitalLetter("b".to_owned())));
        assert_eq!(parse("E", "A | B(C)"), Err(GrammarError::ExpectedTypeName("B(C)".to_owned())));
        assert_eq!(parse("E", "{a@A}, {b@B}"), Err(GrammarError::OnlyOneListDescriptor));
        assert_eq!(parse("E", "x@A, x@B"), Err(GrammarError::DuplicateTag("x".to_owned())));
        assert_eq!(parse("E", "x@A(B)"), Err(GrammarError::ExpectedTaggedName("x@A(B)".to_owned())));
        assert_eq!(parse("E", "x@a"), Err(GrammarError::NodeNameCapitalLetter("a".to_owned())));
        assert_eq!(parse("E", ""), Err(GrammarError::ExpectedDescriptor("<end of input>".to_owned())));
    }
}
