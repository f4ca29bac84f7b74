use grafter_tokenizer::{Bracket, Token, render_list};

use crate::GrammarError;

static NULL: Token = Token::Null;

/// A cursor over an already structured token slice.
pub(crate) struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub(crate) fn peek(&self) -> &'t Token {
        self.tokens.get(self.pos).unwrap_or(&NULL)
    }

    pub(crate) fn advance(&mut self) -> &'t Token {
        let token = self.peek();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn eat(&mut self, token: &Token) -> bool {
        let matched = self.peek() == token;
        if matched {
            self.advance();
        }
        matched
    }

    /// Consumes a bracket pair of the given family and returns its contents.
    pub(crate) fn eat_pair(&mut self, bracket: Bracket) -> Option<&'t [Token]> {
        match self.peek() {
            Token::Pair(kind, inner) if *kind == bracket => {
                self.advance();
                Some(inner)
            }
            _ => None,
        }
    }

    /// Fails if any token is left unconsumed.
    pub(crate) fn finish(&self) -> Result<(), GrammarError> {
        match &self.tokens[self.pos..] {
            [] => Ok(()),
            rest => Err(GrammarError::CantParseSequence(render_list(rest))),
        }
    }
}
