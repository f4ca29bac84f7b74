use crate::GrammarError;

const LABELS: [&str; 20] = [
    "first",
    "second",
    "third",
    "fourth",
    "fifth",
    "sixth",
    "seventh",
    "eighth",
    "ninth",
    "tenth",
    "eleventh",
    "twelfth",
    "thirteenth",
    "fourteenth",
    "fifteenth",
    "sixteenth",
    "seventeenth",
    "eighteenth",
    "nineteenth",
    "twentieth",
];

/// Hands out ordinal labels for untagged descriptors, one scope at a time.
#[derive(Debug, Default)]
pub struct LabelFactory {
    issued: usize,
}

impl LabelFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_label(&mut self) -> Result<&'static str, GrammarError> {
        let label = LABELS.get(self.issued).copied().ok_or(GrammarError::TooManyAnonymousChildren)?;
        self.issued += 1;
        Ok(label)
    }
}
