//! Text-level helpers that look past string literals and native code.

#[derive(Clone, Copy)]
enum State {
    Plain,
    String,
    Escape,
    Native,
}

/// Characters of `text` that are not part of a `"..."` or `$...$` literal.
fn outside_literals(text: &str) -> impl Iterator<Item = (usize, char)> + '_ {
    let mut state = State::Plain;
    text.char_indices().filter(move |&(_, c)| {
        let (next, plain) = match (state, c) {
            (State::Plain, '"') => (State::String, false),
            (State::Plain, '$') => (State::Native, false),
            (State::Plain, _) => (State::Plain, true),
            (State::String, '\\') => (State::Escape, false),
            (State::String, '"') | (State::Native, '$') => (State::Plain, false),
            (State::String, _) | (State::Escape, _) => (State::String, false),
            (State::Native, _) => (State::Native, false),
        };
        state = next;
        plain
    })
}

/// Byte offset of the first occurrence of `pattern` outside literals.
pub(crate) fn find(text: &str, pattern: &str) -> Option<usize> {
    outside_literals(text).map(|(at, _)| at).find(|&at| text[at..].starts_with(pattern))
}

/// Splits on `separator` wherever it occurs outside literals.
pub(crate) fn split(text: &str, separator: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for (at, _) in outside_literals(text).filter(|&(_, c)| c == separator) {
        pieces.push(&text[start..at]);
        start = at + separator.len_utf8();
    }
    pieces.push(&text[start..]);
    pieces
}

/// Drops a trailing `//` comment.
pub(crate) fn strip_comment(line: &str) -> &str {
    match find(line, "//") {
        Some(at) => &line[..at],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_skips_literals() {
        assert_eq!(find(r#"A<"->"> -> B"#, "->"), Some(8));
        assert_eq!(find("X <- $a -> b$, $c$", "->"), None);
        assert_eq!(find(r#"A<"\"->"> -> B"#, "->"), Some(10));
    }

    #[test]
    fn split_skips_literals() {
        assert_eq!(split(r#"A; B<";">; $x;y$"#, ';'), vec!["A", r#" B<";">"#, " $x;y$"]);
        assert_eq!(split("", ';'), vec![""]);
    }

    #[test]
    fn comments() {
        assert_eq!(strip_comment("A <- B // trailing"), "A <- B ");
        assert_eq!(strip_comment(r#"A<"//"> -> B"#), r#"A<"//"> -> B"#);
        assert_eq!(strip_comment("// whole line"), "");
    }
}
