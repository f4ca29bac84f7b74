use grafter_tokenizer::{ScanError, StructureError};

/// A statement that tokenizes and structures but does not fit the grammar.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum GrammarError {
    #[error("expected an identifier, found `{0}`")]
    ExpectedIdentifier(String),
    #[error("expected a type name after `@`")]
    ExpectedIdentifierAfterAt,
    #[error("expected a descriptor, found `{0}`")]
    ExpectedDescriptor(String),
    #[error("expected a parameter between commas")]
    EmptyParameter,
    #[error("expected a hole or a string literal as data")]
    ExpectedData,
    #[error("expected only one data entity")]
    ExpectedOnlyOneEntity,
    #[error("data literal must not be empty")]
    EmptyDataLiteral,
    #[error("can't parse sequence `{0}`")]
    CantParseSequence(String),
    #[error("expected a single type name, found `{0}`")]
    ExpectedTypeName(String),
    #[error("node name `{0}` must start with a capital letter")]
    NodeNameCapitalLetter(String),
    #[error("expected a tagged name without parameters or data, found `{0}`")]
    ExpectedTaggedName(String),
    #[error("only one child of a node may be a list")]
    OnlyOneListDescriptor,
    #[error("`{0}` is inherited more than once")]
    DuplicateInheritance(String),
    #[error("tag `{0}` is used more than once")]
    DuplicateTag(String),
    #[error("`0` must be the only child of a node")]
    UnexpectedEmpty,
    #[error("expected three or four native code parameters, found {0}")]
    ExpectedThreeOrFourParameters(usize),
    #[error("expected native code, found `{0}`")]
    ExpectedNativeCode(String),
    #[error("`&` is not allowed in a transformation")]
    UnexpectedExtension,
    #[error("hole #{0} is used more than once on the left side")]
    ExpectedUniqueNumbers(u32),
    #[error("hole #{0} is not defined on the left side")]
    UnexpectedNumberUsed(u32),
    #[error("ellipsis hole #{0} must be the last parameter")]
    EllipsisMustBeLast(u32),
    #[error("too many untagged descriptors in one scope")]
    TooManyAnonymousChildren,
    #[error("expected a rule containing `<-` or `->`, found `{0}`")]
    ExpectedRule(String),
}

/// Inconsistencies between statements, found while assembling a program.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ProgramError {
    #[error("type `{0}` is already defined")]
    DuplicateType(String),
    #[error("`{0}` extends a green node that is not defined")]
    MissingExtendedNode(String),
    #[error("`{0}` is extended outside of a language section")]
    ExtensionOutsideLanguage(String),
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Structure(#[from] StructureError),
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error(transparent)]
    Program(#[from] ProgramError),
}

/// A failure anywhere in the front end, tagged with the 1-based line of the
/// offending statement.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{line}: {kind}")]
pub struct ParseError {
    pub line: u32,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(line: u32, kind: impl Into<ParseErrorKind>) -> Self {
        Self { line, kind: kind.into() }
    }
}
