//! Lexical layer of the rule language: a character scanner producing a flat
//! token stream, and a structurer folding bracket pairs into nested tokens.

mod cursor;
mod structure;
mod token;

use cursor::{Cursor, EOF_CHAR};
pub use structure::{StructureError, structure};
use text_size::TextSize;
pub use token::{Bracket, Token, render_list, write_list, write_quoted};

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ScanError {
    #[error("unknown symbol `{0}`")]
    UnknownSymbol(char),
    #[error("expected a number after `#`")]
    ExpectedNumber,
    #[error("hole number `{0}` is too large")]
    NumberTooLarge(String),
    #[error("incorrect ellipsis, expected exactly `...`")]
    IncorrectEllipsis,
    #[error("unclosed string literal")]
    UnclosedString,
    #[error("unknown escape sequence `\\{0}`")]
    UnknownEscape(char),
    #[error("unclosed native code, expected a closing `$`")]
    UnclosedNativeCode,
}

pub struct Tokenizer<'src> {
    cursor: Cursor<'src>,
}

impl<'src> Tokenizer<'src> {
    pub fn new(text: &'src str) -> Self {
        Self { cursor: Cursor::new(text) }
    }

    /// Byte offset of the next unread character.
    pub fn offset(&self) -> TextSize {
        self.cursor.offset()
    }

    /// Scans the next token. Returns [`Token::Null`] once the input is exhausted,
    /// and keeps returning it on subsequent calls.
    pub fn next_token(&mut self) -> Result<Token, ScanError> {
        self.cursor.advance_while(|c| matches!(c, ' ' | '\t' | '\n' | '\r'));
        self.cursor.start_token();

        if self.cursor.is_eof() {
            return Ok(Token::Null);
        }

        let token = match self.cursor.advance() {
            c if c.is_alphabetic() || c == '_' => {
                self.cursor.advance_while(|c| c.is_alphanumeric() || c == '_');
                Token::Identifier(self.cursor.token_text().to_owned())
            }
            c @ ('(' | ')' | '{' | '}' | '[' | ']' | '<' | '>') => match Bracket::classify(c) {
                Some((bracket, true)) => Token::Open(bracket),
                Some((bracket, false)) => Token::Close(bracket),
                None => unreachable!(),
            },
            '#' => self.hole()?,
            '"' => self.string()?,
            '$' => self.native_code()?,
            ',' => Token::Comma,
            '@' => Token::At,
            '|' => Token::Bar,
            '&' => Token::Ampersand,
            '0' => Token::Empty,
            c => return Err(ScanError::UnknownSymbol(c)),
        };

        Ok(token)
    }

    fn hole(&mut self) -> Result<Token, ScanError> {
        self.cursor.start_token();
        if self.cursor.advance_while(|c| c.is_ascii_digit()) == 0 {
            return Err(ScanError::ExpectedNumber);
        }

        let digits = self.cursor.token_text();
        let index = digits.parse().map_err(|_| ScanError::NumberTooLarge(digits.to_owned()))?;

        let ellipsis = match self.cursor.advance_while(|c| c == '.') {
            0 => false,
            3 => true,
            _ => return Err(ScanError::IncorrectEllipsis),
        };

        Ok(Token::Hole { index, ellipsis })
    }

    fn string(&mut self) -> Result<Token, ScanError> {
        let mut text = String::new();

        loop {
            match self.cursor.advance() {
                '"' => return Ok(Token::String(text)),
                '\\' => {
                    let escaped = match self.cursor.advance() {
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        c @ ('\\' | '"' | '\'') => c,
                        EOF_CHAR if self.cursor.is_eof() => return Err(ScanError::UnclosedString),
                        c => return Err(ScanError::UnknownEscape(c)),
                    };
                    text.push(escaped);
                }
                EOF_CHAR if self.cursor.is_eof() => return Err(ScanError::UnclosedString),
                c => text.push(c),
            }
        }
    }

    fn native_code(&mut self) -> Result<Token, ScanError> {
        self.cursor.start_token();
        self.cursor.advance_while(|c| c != '$');

        if self.cursor.is_eof() {
            return Err(ScanError::UnclosedNativeCode);
        }

        let code = self.cursor.token_text().to_owned();
        self.cursor.advance();
        Ok(Token::NativeCode(code))
    }
}

/// Scans `text` to completion. The trailing [`Token::Null`] is not included.
pub fn tokenize(text: &str) -> Result<Vec<Token>, ScanError> {
    let mut tokenizer = Tokenizer::new(text);
    let mut tokens = Vec::new();

    loop {
        match tokenizer.next_token()? {
            Token::Null => return Ok(tokens),
            token => tokens.push(token),
        }
    }
}
