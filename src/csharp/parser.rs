//! Tree-sitter parser integration for C#

use crate::errors::{Error, Result};
use tree_sitter::{Node, Parser, Tree};

/// Parse C# source code into a tree-sitter tree
pub fn parse_source(content: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_c_sharp::LANGUAGE.into())?;

    parser
        .parse(content, None)
        .ok_or_else(|| Error::parse("tree-sitter returned no tree"))
}

/// Check if a parse tree has errors
pub fn has_parse_errors(tree: &Tree) -> bool {
    tree.root_node().has_error()
}

/// Get text for a tree-sitter node
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Get the line number for a tree-sitter node (1-indexed)
pub fn node_line(node: &Node) -> usize {
    node.start_position().row + 1
}

/// Line break used by the file; CRLF wins as soon as it appears once.
pub fn detect_newline(source: &str) -> &'static str {
    if source.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}
