//! Incremental front door: rule files as salsa inputs, their parsed programs
//! and diagnostics as tracked queries.

use camino::Utf8PathBuf;
pub use grafter_errors::Diagnostic;
use grafter_errors::{TextRange, TextSize};
use grafter_parse::{ParseError, ParseErrorKind};
use grafter_rules::Program;
pub use line_index::LineIndex;
use line_index::LineCol;

#[salsa::db]
#[derive(Clone, Default)]
pub struct RootDatabase {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for RootDatabase {}

#[salsa::input(debug)]
pub struct File {
    #[returns(ref)]
    pub path: Utf8PathBuf,
    #[returns(deref)]
    pub text: String,
}

#[salsa::tracked]
impl File {
    #[salsa::tracked(returns(ref), no_eq)]
    pub fn line_index(self, db: &dyn salsa::Database) -> LineIndex {
        LineIndex::new(self.text(db))
    }

    #[salsa::tracked(returns(ref))]
    pub fn parse(self, db: &dyn salsa::Database) -> Result<Program, ParseError> {
        grafter_parse::program(self.text(db))
    }
}

impl File {
    pub fn program(self, db: &dyn salsa::Database) -> Option<&Program> {
        self.parse(db).as_ref().ok()
    }
}

#[salsa::tracked(returns(ref))]
pub fn check_file(db: &dyn salsa::Database, file: File) -> Vec<Diagnostic> {
    match file.parse(db) {
        Ok(_) => Vec::new(),
        Err(error) => {
            let range = line_range(file.line_index(db), file.text(db), error.line);
            vec![Diagnostic::error(error.kind.to_string(), range).with_label(label(&error.kind))]
        }
    }
}

fn label(kind: &ParseErrorKind) -> &'static str {
    match kind {
        ParseErrorKind::Scan(_) => "while scanning this statement",
        ParseErrorKind::Structure(_) => "unbalanced brackets in this statement",
        ParseErrorKind::Grammar(_) => "in this statement",
        ParseErrorKind::Program(_) => "inconsistent with the rest of the file",
    }
}

/// The 1-based `line` of `text`, without its line break.
fn line_range(index: &LineIndex, text: &str, line: u32) -> TextRange {
    let end_of_text = TextSize::of(text);
    let line = line.saturating_sub(1);
    let start = index.offset(LineCol { line, col: 0 }).unwrap_or(end_of_text);
    let end = index.offset(LineCol { line: line + 1, col: 0 }).unwrap_or(end_of_text);

    let content = text[usize::from(start)..usize::from(end)].trim_end();
    TextRange::at(start, TextSize::of(content))
}
