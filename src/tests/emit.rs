use super::{Emission, Emitter};
use crate::formats::markdown::MarkdownFormat;
use crate::formats::Format;
use crate::tree::{NodeKind, TreeBuilder};

fn emit(markdown: &str) -> Emission {
    let tree = MarkdownFormat.parse("test.go.md", markdown).unwrap();
    Emitter::new(&tree).run().unwrap()
}

#[test]
fn test_function_without_groups_gets_empty_parameter_list() {
    let out = emit("## func `AddOne`\n\n```go\nreturn x + 1\n```\n");
    assert_eq!(out.source, "func AddOne() {\nreturn x + 1\n}\n\n");
    assert_eq!(out.signatures, vec!["func AddOne".to_string()]);
}

#[test]
fn test_closing_hashes_stay_out_of_the_signature() {
    let out = emit("## func `A` ##\n\n```\nx\n```\n");
    assert_eq!(out.source, "func A() {\nx\n}\n\n");
    assert_eq!(out.signatures, vec!["func A".to_string()]);
}

#[test]
fn test_indented_body_has_no_trailing_blank_line() {
    let out = emit("## func `A`\n\n    x := 1\n    return x\n\nok\n");
    assert_eq!(out.source, "func A() {\nx := 1\nreturn x\n}\n\n");
}

#[test]
fn test_hand_built_tree_emits_the_same_fragment() {
    let mut b = TreeBuilder::new();
    let root = b.root();
    let heading = b.push_heading(root, 2);
    b.push_leaf(heading, NodeKind::Text, "func ");
    b.push_leaf(heading, NodeKind::CodeSpan, "AddOne");
    b.push_leaf(root, NodeKind::CodeBlock, "return x + 1\n");
    let tree = b.finish();

    let out = Emitter::new(&tree).run().unwrap();
    assert_eq!(out.source, "func AddOne() {\nreturn x + 1\n}\n\n");
}

#[test]
fn test_heading_without_body_gets_no_delimiters() {
    let out = emit("## func `A`\n\n## func `B`\n\n```\nb()\n```\n");
    assert_eq!(out.source, "func Afunc B() {\nb()\n}\n\n");
    assert_eq!(out.source.matches('{').count(), 1);
    assert_eq!(out.signatures, vec!["func A".to_string(), "func B".to_string()]);
}

#[test]
fn test_parameters_keep_document_order() {
    let out = emit(concat!(
        "## func `Sum`\n\n",
        "- parameters\n",
        "  - `a int` : first\n",
        "  - `b int` : second\n",
        "  - `c int` : third\n\n",
        "```\nreturn a + b + c\n```\n",
    ));
    assert_eq!(out.source, "func Sum( a int, b int, c int)  {\nreturn a + b + c\n}\n\n");
    assert!(out.source.contains("a int, b int, c int)"));
    assert!(!out.source.contains(", )"));
}

#[test]
fn test_returns_without_parameters_adds_empty_list() {
    let out = emit(concat!(
        "## func `Now`\n\n",
        "- returns\n",
        "  - `time.Time` : the current time\n\n",
        "```\nreturn time.Now()\n```\n",
    ));
    assert_eq!(out.source, "func Now() ( time.Time )  {\nreturn time.Now()\n}\n\n");
}

#[test]
fn test_parameters_and_returns() {
    let out = emit(concat!(
        "## func `Divide`\n\n",
        "Divides two numbers.\n\n",
        "- parameters\n",
        "  - `a float64` : dividend\n",
        "  - `b float64` : divisor\n",
        "- returns\n",
        "  - `float64` : quotient\n",
        "  - `error` : set when b is zero\n\n",
        "```\nif b == 0 {\n\treturn 0, errDivide\n}\nreturn a / b, nil\n```\n",
    ));
    assert_eq!(
        out.source,
        "func Divide( a float64, b float64) ( float64 , error )  {\nif b == 0 {\n\treturn 0, errDivide\n}\nreturn a / b, nil\n}\n\n"
    );
}

#[test]
fn test_body_split_by_prose_is_joined() {
    let out = emit(concat!(
        "## func `main`\n\n",
        "```\na()\n```\n\n",
        "Then we call b.\n\n",
        "```\nb()\n```\n",
    ));
    assert_eq!(out.source, "func main() {\na()\nb()\n}\n\n");
}

#[test]
fn test_file_section_code_is_copied_with_blank_line() {
    let out = emit("# main.go\n\n```go\npackage main\n\nimport \"fmt\"\n```\n");
    assert_eq!(out.source, "package main\n\nimport \"fmt\"\n\n\n");
    assert!(out.signatures.is_empty());
}

#[test]
fn test_narrative_is_skipped() {
    let out = emit(concat!(
        "Intro prose before any heading.\n\n",
        "```\nnot emitted\n```\n\n",
        "# Overview\n\n",
        "- a list\n",
        "  - `with code` that is no entry\n\n",
        "```\nalso not emitted\n```\n",
    ));
    assert_eq!(out.source, "");
}

#[test]
fn test_entries_outside_groups_are_ignored() {
    let out = emit(concat!(
        "## func `Run`\n\n",
        "- notes\n",
        "  - `ctx context.Context` : not a parameter\n\n",
        "```\nreturn\n```\n",
    ));
    assert_eq!(out.source, "func Run() {\nreturn\n}\n\n");
}
