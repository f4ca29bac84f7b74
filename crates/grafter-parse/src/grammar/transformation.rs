use grafter_rules::{Descriptor, Parameter, Transformation};
use grafter_tokenizer::Token;
use rustc_hash::FxHashSet;

use super::descriptor::descriptor_exact;
use crate::{GrammarError, LabelFactory};

/// `left -> right`, given the tokens on each side of `->`.
pub(crate) fn transformation(left: &[Token], right: &[Token]) -> Result<Transformation, GrammarError> {
    let left = side(left)?;
    let Descriptor::Concrete(pattern) = &left else {
        return Err(GrammarError::ExpectedDescriptor(left.to_string()));
    };
    let right = side(right)?;

    let mut captured = FxHashSet::default();
    for parameter in pattern.parameters() {
        if let Parameter::Hole(hole) = parameter {
            if !captured.insert(hole.index) {
                return Err(GrammarError::ExpectedUniqueNumbers(hole.index));
            }
        }
    }

    let defined: FxHashSet<u32> = left.holes().iter().map(|hole| hole.index).collect();
    if let Some(unused) = right.holes().iter().find(|hole| !defined.contains(&hole.index)) {
        return Err(GrammarError::UnexpectedNumberUsed(unused.index));
    }

    Ok(Transformation { left, right })
}

fn side(tokens: &[Token]) -> Result<Descriptor, GrammarError> {
    let descriptor = descriptor_exact(tokens, &mut LabelFactory::new())?;
    if descriptor.contains_extension() {
        return Err(GrammarError::UnexpectedExtension);
    }
    Ok(descriptor)
}
