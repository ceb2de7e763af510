//! Whole-file rewriting.
//!
//! Walks the tree of one C# file, reorganizes every class it reaches and
//! splices the new bodies into the original text. Everything outside those
//! bodies is copied through untouched.

use crate::classify::{Classifier, DirectiveRule};
use crate::csharp::{
    detect_newline, extract_class_body, has_parse_errors, node_line, node_text, parse_source,
    render_body,
};
use crate::errors::Result;
use crate::model::{Bucket, MemberKind};
use serde::Serialize;
use tree_sitter::Node;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteOptions {
    pub directive_rule: DirectiveRule,
    /// Reorganize classes declared inside other classes too.
    pub recurse_nested: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassStatus {
    Reorganized,
    /// No members; left as is.
    Empty,
    /// Syntax errors inside the body; left as is.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberReport {
    pub name: String,
    pub kind: MemberKind,
    pub bucket: Bucket,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassReport {
    pub name: Option<String>,
    pub line: usize,
    pub status: ClassStatus,
    /// Members in their new order.
    pub members: Vec<MemberReport>,
}

#[derive(Debug, Clone)]
pub struct RewriteOutcome {
    pub text: String,
    pub classes: Vec<ClassReport>,
}

impl RewriteOutcome {
    pub fn changed(&self, original: &str) -> bool {
        self.text != original
    }
}

/// Reorganize every class in `source`.
pub fn process_source(source: &str, options: &RewriteOptions) -> Result<RewriteOutcome> {
    let tree = parse_source(source)?;
    if has_parse_errors(&tree) {
        log::debug!("Source contains syntax errors; affected classes are left untouched");
    }

    let root = tree.root_node();
    let mut rewriter = Rewriter::new(source, options);
    let mut text = String::with_capacity(source.len() + 256);
    text.push_str(&source[..root.start_byte()]);
    text.push_str(&rewriter.render(root, false));
    text.push_str(&source[root.end_byte()..]);

    Ok(RewriteOutcome {
        text,
        classes: rewriter.reports,
    })
}

/// Reorganize `source` with default options and return the new text.
pub fn process_script(source: &str) -> Result<String> {
    process_source(source, &RewriteOptions::default()).map(|outcome| outcome.text)
}

struct Rewriter<'s> {
    source: &'s str,
    newline: &'static str,
    classifier: Classifier,
    recurse_nested: bool,
    reports: Vec<ClassReport>,
}

impl<'s> Rewriter<'s> {
    fn new(source: &'s str, options: &RewriteOptions) -> Self {
        Self {
            source,
            newline: detect_newline(source),
            classifier: Classifier::new(options.directive_rule),
            recurse_nested: options.recurse_nested,
            reports: Vec::new(),
        }
    }

    /// Text of `node` with every reachable class reorganized.
    fn render(&mut self, node: Node<'_>, in_class: bool) -> String {
        let source = self.source;
        if (in_class && !self.recurse_nested) || node.child_count() == 0 {
            return node_text(&node, source).to_string();
        }
        if node.kind() == "class_declaration" {
            return self.render_class(node);
        }

        let mut out = String::new();
        let mut pos = node.start_byte();
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        for child in children {
            out.push_str(&source[pos..child.start_byte()]);
            out.push_str(&self.render(child, in_class));
            pos = child.end_byte();
        }
        out.push_str(&source[pos..node.end_byte()]);
        out
    }

    fn render_class(&mut self, node: Node<'_>) -> String {
        let source = self.source;
        let verbatim = node_text(&node, source).to_string();
        let Some(body) = node.child_by_field_name("body") else {
            return verbatim;
        };

        let name = node
            .child_by_field_name("name")
            .map(|n| node_text(&n, source).to_string());
        let line = node_line(&node);
        let slot = self.reports.len();
        self.reports.push(ClassReport {
            name: name.clone(),
            line,
            status: ClassStatus::Skipped,
            members: Vec::new(),
        });

        if body.has_error() {
            log::warn!(
                "Skipping class {} at line {}: body contains syntax errors",
                name.as_deref().unwrap_or("<anonymous>"),
                line
            );
            return verbatim;
        }

        let newline = self.newline;
        let extracted = extract_class_body(body, source, newline, &mut |member| {
            self.render(member, true)
        });
        let Some(class_body) = extracted else {
            return verbatim;
        };

        if class_body.members.is_empty() {
            self.reports[slot].status = ClassStatus::Empty;
            return verbatim;
        }

        let layout = self.classifier.reorganize(class_body.members);
        log::debug!(
            "Reorganized class {} ({} members, {} sections)",
            name.as_deref().unwrap_or("<anonymous>"),
            layout.member_count(),
            layout.sections.len()
        );

        let report = &mut self.reports[slot];
        report.status = ClassStatus::Reorganized;
        report.members = layout
            .placements()
            .map(|placement| MemberReport {
                name: placement.member.display_name(),
                kind: placement.member.kind,
                bucket: placement.bucket,
                line: placement.member.line,
            })
            .collect();

        let mut out = String::with_capacity(verbatim.len() + 128);
        out.push_str(&source[node.start_byte()..class_body.interior.start]);
        out.push_str(&render_body(&layout, &class_body.frame));
        out.push_str(&source[class_body.interior.end..node.end_byte()]);
        out
    }
}
