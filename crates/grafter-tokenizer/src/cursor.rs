use std::str::Chars;

use text_size::{TextLen, TextRange, TextSize};

pub(crate) const EOF_CHAR: char = '\0';

/// Char-level reader over one statement that remembers where the current
/// token started.
pub(crate) struct Cursor<'src> {
    text: &'src str,
    chars: Chars<'src>,
    token_start: TextSize,
}

impl<'src> Cursor<'src> {
    pub(crate) fn new(text: &'src str) -> Self {
        Self { text, chars: text.chars(), token_start: TextSize::default() }
    }

    pub(crate) fn offset(&self) -> TextSize {
        self.text.text_len() - self.chars.as_str().text_len()
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    pub(crate) fn start_token(&mut self) {
        self.token_start = self.offset();
    }

    /// Everything consumed since the last [`Cursor::start_token`].
    pub(crate) fn token_text(&self) -> &'src str {
        &self.text[TextRange::new(self.token_start, self.offset())]
    }

    pub(crate) fn peek(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn advance(&mut self) -> char {
        self.chars.next().unwrap_or(EOF_CHAR)
    }

    /// Consumes characters while `f` holds and returns how many it took.
    pub(crate) fn advance_while(&mut self, f: impl Fn(char) -> bool) -> usize {
        let mut count = 0;
        while !self.is_eof() && f(self.peek()) {
            self.advance();
            count += 1;
        }
        count
    }
}
