use expect_test::expect;

use super::*;

#[test]
fn descriptors_round_trip() {
    let corpus = [
        "Name",
        "tag@Name",
        "Name()",
        "Call(#1, #2...)",
        r#"IntegerLiteral<"5">"#,
        "Value<#3>",
        r#"Text<"a \"quoted\" \\ line\n">"#,
        "[Else]",
        "{items@Item}",
        "Base&",
        "0",
        "&",
        "Outer(x@Inner(#1, [Opt], {List}), Leaf<#2>)",
    ];

    for text in corpus {
        assert_eq!(descriptor(text).unwrap().to_string(), text, "Input: '{text}'");
    }
}

#[test]
fn rules_round_trip() {
    let nodes = [
        "Expression <- Addition | Subtraction | IntegerLiteral",
        "Addition <- left@Expression, right@Expression",
        "If <- condition@Expression, Statement, [Else]",
        "Block <- {Statement}",
        "Nothing <- 0",
        "Call <- &, args@Arguments",
    ];
    for text in nodes {
        assert_eq!(node(text).unwrap().to_string(), text, "Input: '{text}'");
    }

    let literals = [
        "IntegerLiteral <- $int$, $String.valueOf(#)$, $Integer.parseInt(#)$",
        "Real <- $double$, $String.valueOf(#)$, $Double.parseDouble(#)$, $NumberFormatException$",
    ];
    for text in literals {
        assert_eq!(literal(text).unwrap().to_string(), text, "Input: '{text}'");
    }

    let transformations = [
        "Addition(#1, #2) -> Subtraction(#1, #2)",
        r#"Addition(IntegerLiteral<"2">, IntegerLiteral<"3">) -> IntegerLiteral<"5">"#,
        "Wrap(Inner<#1>, #2...) -> Value<#1>",
        "Drop(#1) -> 0",
    ];
    for text in transformations {
        assert_eq!(transformation(text).unwrap().to_string(), text, "Input: '{text}'");
    }
}

#[test]
fn parameter_lists() {
    let parameters = parameters("#1, x@A, B(#2)").unwrap();
    assert_eq!(parameters.len(), 3);
    assert!(matches!(parameters[0], Parameter::Hole(hole) if hole.index == 1));
    assert!(super::parameters("").unwrap().is_empty());
}

#[test]
fn untagged_children_run_out_of_labels() {
    let twenty = vec!["A"; 20].join(", ");
    let twenty_one = vec!["A"; 21].join(", ");

    assert_eq!(parameters(&twenty).unwrap().len(), 20);
    assert_eq!(parameters(&twenty_one), Err(GrammarError::TooManyAnonymousChildren.into()));

    assert_eq!(node(&format!("N <- {twenty}")).unwrap().children().count(), 20);
    assert_eq!(
        node(&format!("N <- {twenty_one}")),
        Err(GrammarError::TooManyAnonymousChildren.into())
    );
    assert!(node(&format!("N <- {twenty}, x@A")).is_ok());
}

#[test]
fn whole_program() {
    let text = r#"
        // arithmetic
        Expression <- Addition | IntegerLiteral
        Addition <- left@Expression, right@Expression; IntegerLiteral <- $int$, $s$, $p$

        java:
        Addition(#1, #2) -> Addition(#2, #1) // commute
        common:
        Addition(IntegerLiteral<"2">, IntegerLiteral<"3">) -> IntegerLiteral<"5">
    "#;

    let program = program(text).unwrap();
    let lines: Vec<_> = program.statements().iter().map(|statement| statement.line).collect();
    assert_eq!(lines, [3, 4, 4, 7, 9]);
    assert_eq!(program.languages_used(), ["java"]);
    assert_eq!(program.transformations().count(), 2);
    assert_eq!(program.transformations_for("kotlin").count(), 1);

    expect![[r#"
        Expression <- Addition | IntegerLiteral
        Addition <- left@Expression, right@Expression
        IntegerLiteral <- $int$, $s$, $p$
        java:
        Addition(#1, #2) -> Addition(#2, #1)
        common:
        Addition(IntegerLiteral<"2">, IntegerLiteral<"3">) -> IntegerLiteral<"5">
    "#]]
    .assert_eq(&program.to_string());
}

#[test]
fn rendered_program_parses_back() {
    let text = "A <- B | C\nB <- 0\njava:\nC <- x@B\nB(#1) -> C(#1)\n";
    let program = program(text).unwrap();
    assert_eq!(super::program(&program.to_string()).unwrap(), program);
}

#[test]
fn errors_carry_line_numbers() {
    let error = program("Expression <- A | B\nstatement <- x@Expression").unwrap_err();
    assert_eq!(error.line, 2);
    assert!(error.to_string().starts_with("2: "), "{error}");
    expect!["2: node name `statement` must start with a capital letter"].assert_eq(&error.to_string());

    let error = program("A <- B\n\nA(#1 -> B").unwrap_err();
    expect!["3: bracket `(` is not closed"].assert_eq(&error.to_string());

    let error = program("A <- B\nA <- C").unwrap_err();
    assert_eq!(error, ParseError::new(2, ProgramError::DuplicateType("A".to_owned())));

    let error = program("A <- B; A(#1) -> B(#2)").unwrap_err();
    assert_eq!(error, ParseError::new(1, GrammarError::UnexpectedNumberUsed(2)));

    let error = program("A <- B ? C").unwrap_err();
    expect!["1: unknown symbol `?`"].assert_eq(&error.to_string());
}

#[test]
fn same_type_in_different_languages() {
    let program = program("A <- x@B\njava:\nA <- &, y@C\nkotlin:\nA <- z@D").unwrap();
    assert_eq!(program.node("A", "java").unwrap().to_string(), "A <- &, y@C");
    assert_eq!(program.node("A", "kotlin").unwrap().to_string(), "A <- z@D");
    assert_eq!(program.node("A", "rust").unwrap().to_string(), "A <- x@B");
}

#[test]
fn missing_arrow() {
    assert_eq!(node("A B"), Err(GrammarError::ExpectedRule("A B".to_owned()).into()));
    assert_eq!(transformation("A <- B"), Err(GrammarError::ExpectedRule("A <- B".to_owned()).into()));
}
