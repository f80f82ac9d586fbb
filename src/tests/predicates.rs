use super::{
    is_code_block_in_file_scope, is_code_block_in_function_scope, is_entry_under_group,
    is_file_section_heading, is_function_heading, is_named_group_item, Group,
};
use crate::formats::markdown::MarkdownFormat;
use crate::formats::Format;
use crate::tree::{DocumentTree, NodeId, NodeKind, Phase};
use rstest::rstest;

fn parse(markdown: &str) -> DocumentTree {
    MarkdownFormat.parse("test.go.md", markdown).unwrap()
}

fn nodes_of_kind(tree: &DocumentTree, kind: NodeKind) -> Vec<NodeId> {
    tree.walk(tree.root())
        .map(Result::unwrap)
        .filter(|(id, phase)| *phase == Phase::Enter && tree.kind(*id) == Some(kind))
        .map(|(id, _)| id)
        .collect()
}

#[rstest]
#[case("# main.go\n", Some("main.go"))]
#[case("# `util.go`\n", Some("util.go"))]
#[case("### handlers.go\n", Some("handlers.go"))]
#[case("# main.go notes\n", None)]
#[case("# Notes for `main.go`\n", None)]
#[case("# main.rs\n", None)]
fn test_file_section_heading(#[case] markdown: &str, #[case] expected: Option<&str>) {
    let tree = parse(markdown);
    let heading = nodes_of_kind(&tree, NodeKind::Heading)[0];
    assert_eq!(is_file_section_heading(&tree, heading).as_deref(), expected);
}

#[rstest]
#[case("## func `main`\n", Some("func main"))]
#[case("## func `Add` *(pure)*\n", Some("func Add (pure)"))]
#[case("# func `(s *Server) Start`\n", Some("func (s *Server) Start"))]
#[case("## func main\n", None)]
#[case("## The `func` keyword\n", None)]
#[case("## function `main`\n", None)]
fn test_function_heading(#[case] markdown: &str, #[case] expected: Option<&str>) {
    let tree = parse(markdown);
    let heading = nodes_of_kind(&tree, NodeKind::Heading)[0];
    assert_eq!(is_function_heading(&tree, heading).unwrap().as_deref(), expected);
}

#[test]
fn test_paragraph_is_never_a_heading() {
    let tree = parse("func `main`\n");
    let paragraph = nodes_of_kind(&tree, NodeKind::Paragraph)[0];
    assert_eq!(is_function_heading(&tree, paragraph).unwrap(), None);
    assert_eq!(is_file_section_heading(&tree, paragraph), None);
}

#[rstest]
#[case("- parameters\n", Group::Parameters, true)]
#[case("- returns\n", Group::Returns, true)]
#[case("- *parameters*\n", Group::Parameters, true)]
#[case("- parameters\n", Group::Returns, false)]
#[case("- Parameters\n", Group::Parameters, false)]
#[case("- parameters:\n", Group::Parameters, false)]
#[case("- the parameters\n", Group::Parameters, false)]
fn test_named_group_item(#[case] markdown: &str, #[case] group: Group, #[case] expected: bool) {
    let tree = parse(markdown);
    let item = nodes_of_kind(&tree, NodeKind::ListItem)[0];
    assert_eq!(is_named_group_item(&tree, item, group), expected);
}

#[test]
fn test_entries_belong_to_their_nearest_group() {
    let tree = parse(
        "- parameters\n  - `a int` : first\n  - `b int` : second\n- returns\n  - `int`\n",
    );
    let items = nodes_of_kind(&tree, NodeKind::ListItem);
    assert_eq!(items.len(), 5);

    let entry = |item, group| is_entry_under_group(&tree, item, group).unwrap();
    assert_eq!(entry(items[0], Group::Parameters), None);
    assert_eq!(entry(items[1], Group::Parameters).as_deref(), Some("a int"));
    assert_eq!(entry(items[2], Group::Parameters).as_deref(), Some("b int"));
    assert_eq!(entry(items[1], Group::Returns), None);
    assert_eq!(entry(items[3], Group::Returns), None);
    assert_eq!(entry(items[4], Group::Returns).as_deref(), Some("int"));
}

#[test]
fn test_entry_without_code_span_is_ignored() {
    let tree = parse("- parameters\n  - nothing to see\n");
    let items = nodes_of_kind(&tree, NodeKind::ListItem);
    assert_eq!(is_entry_under_group(&tree, items[1], Group::Parameters).unwrap(), None);
}

#[test]
fn test_code_blocks_are_scoped_by_nearest_heading() {
    let tree = parse(concat!(
        "# main.go\n\n",
        "```go\npackage main\n```\n\n",
        "## func `main`\n\n",
        "Some prose.\n\n",
        "```go\nprintln(\"hi\")\n```\n\n",
        "## Appendix\n\n",
        "```go\nignored()\n```\n",
    ));
    let blocks = nodes_of_kind(&tree, NodeKind::CodeBlock);
    assert_eq!(blocks.len(), 3);

    let file = is_code_block_in_file_scope(&tree, blocks[0]).unwrap();
    assert_eq!(file.heading, "main.go");
    assert_eq!(file.body, "package main\n");
    assert_eq!(is_code_block_in_function_scope(&tree, blocks[0]).unwrap(), None);

    let body = is_code_block_in_function_scope(&tree, blocks[1]).unwrap().unwrap();
    assert_eq!(body.heading, "func main");
    assert_eq!(body.body, "println(\"hi\")\n");
    assert_eq!(is_code_block_in_file_scope(&tree, blocks[1]), None);

    assert_eq!(is_code_block_in_file_scope(&tree, blocks[2]), None);
    assert_eq!(is_code_block_in_function_scope(&tree, blocks[2]).unwrap(), None);
}

#[test]
fn test_non_code_block_is_out_of_scope() {
    let tree = parse("## func `main`\n\nprose\n");
    let paragraph = nodes_of_kind(&tree, NodeKind::Paragraph)[0];
    assert_eq!(is_code_block_in_function_scope(&tree, paragraph).unwrap(), None);
    assert_eq!(is_code_block_in_file_scope(&tree, paragraph), None);
}
