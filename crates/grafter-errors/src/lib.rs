//! Errors anchored to a span of a rule file, rendered as annotated snippets.

use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::{TextRange, TextSize};

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Diagnostic {
    message: String,
    /// Short note printed under the highlighted span.
    label: &'static str,
    range: TextRange,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, range: TextRange) -> Self {
        Self { message: message.into(), label: "here", range }
    }

    pub fn with_label(self, label: &'static str) -> Self {
        Self { label, ..self }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let annotation = Level::Error.span(self.range.into()).label(self.label);
        let snippet = Snippet::source(text).origin(path).line_start(1).annotation(annotation);
        renderer.render(Level::Error.title(&self.message).snippet(snippet.fold(true)))
    }
}
