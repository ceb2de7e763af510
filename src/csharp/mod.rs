//! C# front end: tree-sitter parsing, member extraction and printing.

pub mod extract;
pub mod parser;
pub mod printer;

pub use extract::{extract_class_body, BodyFrame, ClassBody};
pub use parser::{detect_newline, has_parse_errors, node_line, node_text, parse_source};
pub use printer::render_body;
