use expect_test::expect;
use grafter_rules::Program;
use grafter_tree::{Factory, NULL_TYPE_NAME};

use super::*;

const RULES: &str = "
Statement <- Expression | Block
Expression <- Binary | Literal
Binary <- Addition | Subtraction
Addition <- left@Expression, right@Expression
Subtraction <- left@Expression, right@Expression
Block <- {Statement}
Literal <- $int$, $s$, $p$
Call <- callee@Expression, {args@Expression}
java:
Call <- &, callee@Name, [Receiver]
kotlin:
Block <- 0
";

fn program() -> Program {
    grafter_parse::program(RULES).unwrap()
}

#[test]
fn hierarchies() {
    let program = program();
    let analyzer = Analyzer::new(program.statements(), "java").unwrap();

    assert_eq!(analyzer.hierarchy_of("Addition"), ["Addition", "Binary", "Expression", "Statement"]);
    assert_eq!(analyzer.hierarchy_of("Literal"), ["Literal", "Expression", "Statement"]);
    assert_eq!(analyzer.hierarchy_of("Statement"), ["Statement"]);
    assert_eq!(analyzer.hierarchy_of("Unknown"), ["Unknown"]);
    assert!(analyzer.is_abstract("Binary"));
    assert!(!analyzer.is_abstract("Addition"));
}

#[test]
fn tagged_children() {
    let program = program();
    let analyzer = Analyzer::new(program.statements(), "").unwrap();

    let children: Vec<_> = analyzer
        .tagged_children("Addition")
        .iter()
        .map(|child| (child.tag.as_str(), child.type_name.as_str()))
        .collect();
    assert_eq!(children, [("left", "Expression"), ("right", "Expression")]);

    let block = analyzer.tagged_children("Block");
    assert_eq!(block[0].tag, "first");
    assert_eq!(block[0].attribute, Attribute::List);
}

#[test]
fn extension_overrides_green_children() {
    let program = program();
    let analyzer = Analyzer::new(program.statements(), "java").unwrap();

    expect![[r#"
        [
            TaggedChild {
                tag: "callee",
                type_name: "Name",
                attribute: Plain,
                overridden: true,
            },
            TaggedChild {
                tag: "args",
                type_name: "Expression",
                attribute: List,
                overridden: false,
            },
            TaggedChild {
                tag: "first",
                type_name: "Receiver",
                attribute: Optional,
                overridden: false,
            },
        ]
    "#]]
    .assert_debug_eq(&analyzer.tagged_children("Call"));
    assert_eq!(
        analyzer.node("Call").unwrap().to_string(),
        "Call <- callee@Name, {args@Expression}, [Receiver]"
    );
}

#[test]
fn extension_relabels_merged_children() {
    let program = grafter_parse::program("A <- B\njava:\nA <- &, D").unwrap();
    let analyzer = Analyzer::new(program.statements(), "java").unwrap();

    let children: Vec<_> = analyzer
        .tagged_children("A")
        .iter()
        .map(|child| (child.tag.as_str(), child.type_name.as_str()))
        .collect();
    assert_eq!(children, [("first", "B"), ("second", "D")]);
}

#[test]
fn merged_children_run_out_of_labels() {
    let green = vec!["B"; 20].join(", ");
    let text = format!("A <- {green}\njava:\nA <- &, D");
    let program = grafter_parse::program(&text).unwrap();

    assert!(Analyzer::new(program.statements(), "").is_ok());
    let error = Analyzer::new(program.statements(), "java").unwrap_err();
    assert_eq!(error, AnalysisError::TooManyAnonymousChildren("A".to_owned()));
}

#[test]
fn abstract_types_share_common_tags() {
    let program = program();
    let analyzer = Analyzer::new(program.statements(), "").unwrap();

    let binary: Vec<_> = analyzer
        .tagged_children("Binary")
        .iter()
        .map(|child| (child.tag.as_str(), child.type_name.as_str()))
        .collect();
    assert_eq!(binary, [("left", "Expression"), ("right", "Expression")]);

    let overridden: Vec<_> =
        analyzer.tagged_children("Addition").iter().map(|child| child.overridden).collect();
    assert_eq!(overridden, [true, true]);

    // Literal is not a node, so nothing is common below Expression.
    assert!(analyzer.tagged_children("Expression").is_empty());
    assert!(analyzer.tagged_children("Statement").is_empty());
}

#[test]
fn alternatives_must_agree_on_type() {
    let text = "Binary <- Addition | Comparison
Addition <- left@Expression, right@Expression
Comparison <- left@Expression, right@Operand";
    let program = grafter_parse::program(text).unwrap();
    let analyzer = Analyzer::new(program.statements(), "").unwrap();

    let shared: Vec<_> =
        analyzer.tagged_children("Binary").iter().map(|child| child.tag.as_str()).collect();
    assert_eq!(shared, ["left"]);

    let overridden: Vec<_> =
        analyzer.tagged_children("Comparison").iter().map(|child| child.overridden).collect();
    assert_eq!(overridden, [true, false]);
}

#[test]
fn language_scope() {
    let program = program();

    let kotlin = Analyzer::new(program.statements(), "kotlin").unwrap();
    assert_eq!(kotlin.node("Block").unwrap().to_string(), "Block <- 0");
    assert_eq!(kotlin.tagged_children("Call").len(), 2);
    assert_eq!(kotlin.language(), "kotlin");

    let common = Analyzer::new(program.statements(), "").unwrap();
    assert_eq!(common.types().count(), 7);
}

#[test]
fn duplicate_nodes() {
    let program = grafter_parse::program("A <- x@B").unwrap();
    let mut statements = program.statements().to_vec();
    statements.extend(program.statements().iter().cloned());

    let error = Analyzer::new(&statements, "").unwrap_err();
    assert_eq!(error, AnalysisError::ExpectedOnlyOneEntity("A".to_owned()));
}

#[test]
fn schema_factory() {
    let program = program();
    let analyzer = Analyzer::new(program.statements(), "java").unwrap();
    let factory = SchemaFactory::new(&analyzer, &program);

    let node = factory.create_node("Addition", "", Vec::new());
    assert_eq!(node.node_type().hierarchy(), ["Addition", "Binary", "Expression", "Statement"]);
    assert_eq!(node.node_type().child_types(), ["Expression", "Expression"]);
    assert!(node.node_type().is_a("Expression"));

    let literal = factory.create_node("Literal", "5", Vec::new());
    assert_eq!(literal.data(), "5");
    assert!(literal.node_type().is_a("Statement"));

    assert!(factory.schema_type("Binary").is_none());
    let draft = factory.create_node("Binary", "", Vec::new());
    assert_eq!(draft.node_type().hierarchy(), ["Binary"]);
    assert_eq!(factory.create_node(NULL_TYPE_NAME, "", Vec::new()).type_name(), "null");
}
