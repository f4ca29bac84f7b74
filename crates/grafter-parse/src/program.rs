use grafter_rules::{Attribute, COMMON_MARKER, Program, Rule, Statement};
use grafter_tokenizer::Token;
use rustc_hash::FxHashSet;

use crate::grammar::{literal::literal, node::node, transformation::transformation};
use crate::split::{find, split, strip_comment};
use crate::{GrammarError, ParseError, ParseErrorKind, ProgramError, split_at};

/// `lang:` on its own, with `lang` an identifier.
fn language_marker(text: &str) -> Option<&str> {
    let name = text.strip_suffix(':')?.trim_end();
    let valid = name.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_alphanumeric() || c == '_');
    valid.then_some(name)
}

/// Parses one statement, deciding its kind by the arrow it contains. `->` wins
/// over `<-`; a `<-` rule whose right side opens with native code is a literal.
pub fn statement(text: &str) -> Result<Rule, ParseErrorKind> {
    if find(text, "->").is_some() {
        let (left, right) = split_at(text, "->")?;
        return Ok(Rule::Transformation(transformation(&left, &right)?));
    }

    if find(text, "<-").is_some() {
        let (left, right) = split_at(text, "<-")?;
        let rule = match right.first() {
            Some(Token::NativeCode(_)) => Rule::Literal(literal(&left, &right)?),
            _ => Rule::Node(node(&left, &right)?),
        };
        return Ok(rule);
    }

    Err(GrammarError::ExpectedRule(text.trim().to_owned()).into())
}

/// Parses a whole rule file.
///
/// Statements end at a newline or a `;` outside literals, and `//` starts a
/// comment. A `lang:` line scopes the statements after it to `lang` until the
/// next marker; `common:` returns to the common scope.
pub fn program(text: &str) -> Result<Program, ParseError> {
    let mut language = String::new();
    let mut defined = FxHashSet::default();
    let mut statements = Vec::new();

    for (index, source) in text.lines().enumerate() {
        let line = index as u32 + 1;
        for piece in split(strip_comment(source), ';') {
            let piece = piece.trim();
            if piece.is_empty() {
                continue;
            }

            if let Some(marker) = language_marker(piece) {
                language = if marker == COMMON_MARKER { String::new() } else { marker.to_owned() };
                continue;
            }

            let rule = statement(piece).map_err(|kind| ParseError::new(line, kind))?;
            if let Some(name) = rule.defined_type() {
                if !defined.insert((language.clone(), name.to_owned())) {
                    return Err(ParseError::new(line, ProgramError::DuplicateType(name.to_owned())));
                }
            }

            tracing::debug!(line, language = %language, rule = %rule, "parsed statement");
            statements.push(Statement { language: language.clone(), line, rule });
        }
    }

    check_extensions(&statements)?;
    Ok(Program::new(statements))
}

/// Every name a node extends must have a common definition, and only
/// language-scoped nodes may extend at all.
fn check_extensions(statements: &[Statement]) -> Result<(), ParseError> {
    let common: FxHashSet<&str> = statements
        .iter()
        .filter(|statement| statement.is_common())
        .filter_map(|statement| statement.as_node())
        .map(|node| node.name.as_str())
        .collect();

    for statement in statements {
        let Some(node) = statement.as_node() else {
            continue;
        };

        let suffixed = node
            .children()
            .filter(|child| child.attribute == Attribute::Ext)
            .map(|child| child.name.as_str());
        let extended = node.extends_green().then_some(node.name.as_str()).into_iter().chain(suffixed);

        for name in extended {
            let error = if statement.is_common() {
                ProgramError::ExtensionOutsideLanguage(name.to_owned())
            } else if !common.contains(name) {
                ProgramError::MissingExtendedNode(name.to_owned())
            } else {
                continue;
            };
            return Err(ParseError::new(statement.line, error));
        }
    }

    Ok(())
}
