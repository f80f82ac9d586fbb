use super::{footer, generate, generate_from_tree, PROJECT_REFERENCE};
use crate::tree::{NodeId, NodeKind, TreeBuilder};
use crate::Error;

const HELLO: &str = r#"# main.go

The package clause and imports.

```go
package main

import "fmt"
```

## func `main`

Entry point.

```go
fmt.Println(greet("world"))
```

## func `greet`

- parameters
  - `name string` : who to greet
- returns
  - `string` : the greeting

```go
return "Hello, " + name
```
"#;

#[test]
fn test_footer_names_input_and_project() {
    assert_eq!(
        footer("main.go.md"),
        format!(
            "\n// This file is generated from \"main.go.md\" by godown.\n// {PROJECT_REFERENCE}\n"
        )
    );
    assert_eq!(PROJECT_REFERENCE, "https://github.com/hirokistring/godown");
}

#[test]
fn test_generate_whole_document() {
    let generated = generate("hello.go.md", HELLO.as_bytes()).unwrap();
    let expected = concat!(
        "package main\n\nimport \"fmt\"\n\n\n",
        "func main() {\nfmt.Println(greet(\"world\"))\n}\n\n",
        "func greet( name string) ( string )  {\nreturn \"Hello, \" + name\n}\n\n",
        "\n// This file is generated from \"hello.go.md\" by godown.\n",
        "// https://github.com/hirokistring/godown\n",
    );
    assert_eq!(generated.source, expected);
    assert_eq!(
        generated.signatures,
        vec!["func main".to_string(), "func greet".to_string()]
    );
}

#[test]
fn test_generate_is_deterministic() {
    let first = generate("hello.go.md", HELLO.as_bytes()).unwrap();
    let second = generate("hello.go.md", HELLO.as_bytes()).unwrap();
    assert_eq!(first.as_bytes(), second.as_bytes());
    assert_eq!(first, second);
}

#[test]
fn test_empty_document_is_only_the_footer() {
    let generated = generate("empty.go.md", b"").unwrap();
    assert_eq!(generated.source, footer("empty.go.md"));
    assert!(generated.signatures.is_empty());
}

#[test]
fn test_invalid_utf8_is_rejected() {
    let error = generate("broken.go.md", &[0x23, 0x20, 0xff, 0xfe]).unwrap_err();
    assert!(matches!(error, Error::InvalidUtf8 { ref name } if name == "broken.go.md"));
}

#[test]
fn test_structural_failure_yields_no_output() {
    let mut b = TreeBuilder::new();
    let root = b.root();
    let heading = b.push_heading(root, 2);
    let keyword = b.push_leaf(heading, NodeKind::Text, "func ");
    b.push_leaf(root, NodeKind::CodeBlock, "return\n");
    let mut tree = b.finish();
    tree.nodes[keyword.index()].next = Some(NodeId(1000));

    let error = generate_from_tree("corrupt.go.md", &tree).unwrap_err();
    assert!(matches!(error, Error::StructuralTraversal { node } if node == NodeId(1000)));
}
