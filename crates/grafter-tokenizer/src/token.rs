use std::fmt;

/// The four bracket families of the rule language.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Bracket {
    Round,
    Curly,
    Square,
    Angle,
}

impl Bracket {
    pub const fn open(self) -> char {
        match self {
            Self::Round => '(',
            Self::Curly => '{',
            Self::Square => '[',
            Self::Angle => '<',
        }
    }

    pub const fn close(self) -> char {
        match self {
            Self::Round => ')',
            Self::Curly => '}',
            Self::Square => ']',
            Self::Angle => '>',
        }
    }

    /// Classifies a bracket character, returning its family and whether it opens.
    pub(crate) const fn classify(c: char) -> Option<(Self, bool)> {
        Some(match c {
            '(' => (Self::Round, true),
            ')' => (Self::Round, false),
            '{' => (Self::Curly, true),
            '}' => (Self::Curly, false),
            '[' => (Self::Square, true),
            ']' => (Self::Square, false),
            '<' => (Self::Angle, true),
            '>' => (Self::Angle, false),
            _ => return None,
        })
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Token {
    Identifier(String),
    /// Text between a pair of `$` signs, kept verbatim.
    NativeCode(String),
    /// Unescaped contents of a `"..."` literal.
    String(String),
    Hole {
        index: u32,
        ellipsis: bool,
    },
    Open(Bracket),
    Close(Bracket),
    /// A matched bracket pair with its structured contents. Only produced by
    /// [`crate::structure`].
    Pair(Bracket, Vec<Token>),
    Comma,
    At,
    Bar,
    Ampersand,
    /// The `0` symbol.
    Empty,
    /// End of input.
    Null,
}

impl Token {
    pub fn is_pair(&self, bracket: Bracket) -> bool {
        matches!(self, Self::Pair(kind, _) if *kind == bracket)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(name) => f.write_str(name),
            Self::NativeCode(code) => write!(f, "${code}$"),
            Self::String(text) => write_quoted(f, text),
            Self::Hole { index, ellipsis } => {
                write!(f, "#{index}")?;
                if *ellipsis {
                    f.write_str("...")?;
                }
                Ok(())
            }
            Self::Open(bracket) => write!(f, "{}", bracket.open()),
            Self::Close(bracket) => write!(f, "{}", bracket.close()),
            Self::Pair(bracket, inner) => {
                write!(f, "{}", bracket.open())?;
                write_list(f, inner)?;
                write!(f, "{}", bracket.close())
            }
            Self::Comma => f.write_str(","),
            Self::At => f.write_str("@"),
            Self::Bar => f.write_str("|"),
            Self::Ampersand => f.write_str("&"),
            Self::Empty => f.write_str("0"),
            Self::Null => f.write_str("<end of input>"),
        }
    }
}

/// Writes tokens separated by single spaces, except around `@` and before `,`.
pub fn write_list(f: &mut fmt::Formatter<'_>, tokens: &[Token]) -> fmt::Result {
    let mut previous: Option<&Token> = None;
    for token in tokens {
        let glued = matches!(token, Token::Comma | Token::At | Token::Ampersand | Token::Pair(..))
            || matches!(previous, Some(Token::At));
        if previous.is_some() && !glued {
            f.write_str(" ")?;
        }
        write!(f, "{token}")?;
        previous = Some(token);
    }
    Ok(())
}

/// Writes `text` as a double-quoted literal, re-applying the escapes the
/// tokenizer understands.
pub fn write_quoted(f: &mut impl fmt::Write, text: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in text.chars() {
        match c {
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\\' => f.write_str("\\\\")?,
            '"' => f.write_str("\\\"")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/// Renders a token slice the way [`write_list`] does.
pub fn render_list(tokens: &[Token]) -> String {
    struct List<'a>(&'a [Token]);

    impl fmt::Display for List<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write_list(f, self.0)
        }
    }

    List(tokens).to_string()
}
