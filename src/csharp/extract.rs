//! Class body extraction.
//!
//! Turns the `declaration_list` of a class into [`Member`] values plus the
//! [`BodyFrame`] needed to print it back. Member text is cut on byte ranges
//! of the original source: everything between two declarations (blank lines,
//! comments, directives) becomes the leading gap of the next one, and the
//! rest of a declaration's last line travels with it when it holds nothing
//! but whitespace or a line comment.

use super::parser::{node_line, node_text};
use crate::model::{Member, MemberKind, MemberText, Trivia};
use std::ops::Range;
use tree_sitter::Node;

/// Modifier keywords, for grammars that expose them as bare tokens.
const MODIFIER_KEYWORDS: &[&str] = &[
    "public",
    "private",
    "protected",
    "internal",
    "static",
    "readonly",
    "const",
    "virtual",
    "override",
    "abstract",
    "sealed",
    "new",
    "extern",
    "unsafe",
    "volatile",
    "async",
    "partial",
    "required",
];

/// Text around the members of a class body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyFrame {
    /// From just after `{` through the end of its line.
    pub head: String,
    /// From the end of the last member up to `}`.
    pub tail: String,
    pub member_indent: String,
    pub newline: &'static str,
}

#[derive(Debug, Clone)]
pub struct ClassBody {
    /// Bytes between `{` and `}`.
    pub interior: Range<usize>,
    pub frame: BodyFrame,
    pub members: Vec<Member>,
}

/// A member as found in the tree, before its text is cut.
enum Unit<'t> {
    Declaration(Node<'t>),
    /// `#if ... #endif` block; moves as a whole, classified by its first declaration.
    Conditional { block: Node<'t>, declaration: Node<'t> },
}

impl<'t> Unit<'t> {
    fn span(&self) -> Node<'t> {
        match self {
            Self::Declaration(node) => *node,
            Self::Conditional { block, .. } => *block,
        }
    }

    fn declaration(&self) -> Node<'t> {
        match self {
            Self::Declaration(node) => *node,
            Self::Conditional { declaration, .. } => *declaration,
        }
    }
}

/// Extract the members of a class `body` (`declaration_list`).
///
/// `render` produces the text of a member's span; the rewriter uses it to
/// reorganize nested classes when asked to. Returns `None` when the body has
/// no braces to anchor on.
pub fn extract_class_body<'t>(
    body: Node<'t>,
    source: &str,
    newline: &'static str,
    render: &mut dyn FnMut(Node<'t>) -> String,
) -> Option<ClassBody> {
    let interior = interior_range(body)?;

    let mut units = Vec::new();
    collect_units(body, &mut units, true);

    let head_end = line_tail_end(source, interior.start).unwrap_or(interior.start);
    let class_indent = line_indent(source, body.start_byte());
    // Directives are often flush left; indent from the declarations themselves.
    let member_indent = units
        .iter()
        .find_map(|unit| own_line_indent(source, unit.declaration().start_byte()));
    let mut members = Vec::with_capacity(units.len());
    let mut cursor = head_end;

    for unit in &units {
        let span = unit.span();
        let raw_gap = &source[cursor..span.start_byte()];
        let starts_line = cursor == 0 || source[..cursor].ends_with('\n');

        let trailing_end = if source[..span.end_byte()].ends_with('\n') {
            span.end_byte()
        } else {
            line_tail_end(source, span.end_byte()).unwrap_or(span.end_byte())
        };

        let (leading, mut trivia) = split_gap(raw_gap);
        if let Unit::Conditional { block, .. } = unit {
            let opening = node_text(block, source).lines().next().unwrap_or_default();
            trivia.push(Trivia::directive(opening));
        }

        let text = MemberText {
            leading,
            body: render(span),
            trailing: source[span.end_byte()..trailing_end].to_string(),
            starts_line,
        };
        members.push(describe(unit.declaration(), source).with_trivia(trivia).with_text(text));
        cursor = trailing_end;
    }

    let (tail, _) = split_gap(&source[cursor..interior.end]);
    let tail = if !tail.contains('\n') && tail.trim().is_empty() {
        class_indent.clone()
    } else {
        tail
    };

    let member_indent = member_indent.unwrap_or_else(|| {
        let step = if class_indent.contains('\t') { "\t" } else { "    " };
        format!("{class_indent}{step}")
    });

    let head = source[interior.start..head_end].to_string();

    Some(ClassBody {
        interior,
        frame: BodyFrame {
            head,
            tail,
            member_indent,
            newline,
        },
        members,
    })
}

fn interior_range(body: Node) -> Option<Range<usize>> {
    let count = body.child_count();
    let open = body.child(0).filter(|n| n.kind() == "{")?;
    let close = body
        .child(count.checked_sub(1)?)
        .filter(|n| n.kind() == "}" && !n.is_missing())?;
    Some(open.end_byte()..close.start_byte())
}

fn is_declaration(kind: &str) -> bool {
    kind.ends_with("_declaration")
}

fn is_conditional(kind: &str) -> bool {
    kind.starts_with("preproc_if") || kind.starts_with("preproc_el")
}

fn collect_units<'t>(parent: Node<'t>, units: &mut Vec<Unit<'t>>, top_level: bool) {
    let mut cursor = parent.walk();
    for child in parent.named_children(&mut cursor) {
        let kind = child.kind();
        if kind == "comment" {
            continue;
        }
        if kind.starts_with("preproc_") {
            match first_declaration(child) {
                // A plain directive line; it stays in the gap text.
                None => {}
                Some(declaration) if is_conditional(kind) => units.push(Unit::Conditional {
                    block: child,
                    declaration,
                }),
                Some(_) => collect_units(child, units, false),
            }
            continue;
        }
        if top_level || is_declaration(kind) {
            units.push(Unit::Declaration(child));
        }
    }
}

fn first_declaration(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    let children: Vec<Node> = node.named_children(&mut cursor).collect();
    children.into_iter().find_map(|child| {
        if is_declaration(child.kind()) {
            Some(child)
        } else if child.kind().starts_with("preproc_") {
            first_declaration(child)
        } else {
            None
        }
    })
}

/// Build the syntactic part of a member from its declaration node.
fn describe(node: Node, source: &str) -> Member {
    let kind = match node.kind() {
        "field_declaration" => MemberKind::Field,
        "method_declaration" => MemberKind::Method,
        "property_declaration" | "indexer_declaration" => MemberKind::Property,
        "event_field_declaration" | "event_declaration" => MemberKind::Event,
        _ => MemberKind::Other,
    };

    let mut member = Member::new(kind)
        .with_modifiers(modifiers(node, source))
        .with_annotations(annotations(node, source))
        .at_line(node_line(&node));
    member.name = declared_name(node, source);
    member
}

fn named_child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).find(|c| c.kind() == kind);
    found
}

fn declared_name(node: Node, source: &str) -> Option<String> {
    if let Some(name) = node.child_by_field_name("name") {
        return Some(node_text(&name, source).to_string());
    }

    // Fields and field-like events name their first declarator.
    let declaration = named_child_of_kind(node, "variable_declaration")?;
    let declarator = named_child_of_kind(declaration, "variable_declarator")?;
    declarator
        .child_by_field_name("name")
        .or_else(|| named_child_of_kind(declarator, "identifier"))
        .map(|name| node_text(&name, source).to_string())
}

fn modifiers(node: Node, source: &str) -> Vec<String> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|child| {
            child.kind() == "modifier"
                || (!child.is_named() && MODIFIER_KEYWORDS.contains(&child.kind()))
        })
        .map(|child| node_text(&child, source).trim().to_string())
        .collect()
}

fn annotations(node: Node, source: &str) -> Vec<String> {
    let mut cursor = node.walk();
    let lists: Vec<Node> = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() == "attribute_list")
        .collect();

    let mut names = Vec::new();
    for list in lists {
        let mut list_cursor = list.walk();
        for attribute in list.named_children(&mut list_cursor) {
            if attribute.kind() != "attribute" {
                continue;
            }
            let name = attribute
                .child_by_field_name("name")
                .or_else(|| attribute.named_child(0))
                .unwrap_or(attribute);
            names.push(node_text(&name, source).trim().to_string());
        }
    }
    names
}

/// Drop `#region`/`#endregion` lines from a gap and collect its trivia.
fn split_gap(gap: &str) -> (String, Vec<Trivia>) {
    let mut kept = String::with_capacity(gap.len());
    let mut trivia = Vec::new();

    for line in gap.split_inclusive('\n') {
        match Trivia::from_line(line) {
            Some(piece) if piece.is_region_marker() => continue,
            Some(piece) => trivia.push(piece),
            None => {}
        }
        kept.push_str(line);
    }

    (kept, trivia)
}

/// End of the line starting at `pos` when the rest of it is only whitespace
/// or a `//` comment; the returned offset is just past the line break.
fn line_tail_end(source: &str, pos: usize) -> Option<usize> {
    let rest = &source[pos..];
    let trimmed = rest.trim_start_matches([' ', '\t']);
    let offset = pos + (rest.len() - trimmed.len());

    if trimmed.starts_with("//") || trimmed.starts_with('\r') || trimmed.starts_with('\n') {
        trimmed.find('\n').map(|i| offset + i + 1)
    } else {
        None
    }
}

/// Leading whitespace of the line containing `pos`.
fn line_indent(source: &str, pos: usize) -> String {
    let line_start = source[..pos].rfind('\n').map_or(0, |i| i + 1);
    source[line_start..]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect()
}

/// Indentation before `pos` when nothing else precedes it on its line.
fn own_line_indent(source: &str, pos: usize) -> Option<String> {
    let line_start = source[..pos].rfind('\n').map_or(0, |i| i + 1);
    let prefix = &source[line_start..pos];
    prefix
        .chars()
        .all(|c| c == ' ' || c == '\t')
        .then(|| prefix.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csharp::parser::parse_source;
    use indoc::indoc;

    fn find_class_body(node: Node<'_>) -> Option<Node<'_>> {
        if node.kind() == "class_declaration" {
            return node.child_by_field_name("body");
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        children.into_iter().find_map(find_class_body)
    }

    fn extract(source: &str) -> ClassBody {
        let tree = parse_source(source).unwrap();
        let body = find_class_body(tree.root_node()).unwrap();
        let mut render = |node: Node| node_text(&node, source).to_string();
        extract_class_body(body, source, "\n", &mut render).unwrap()
    }

    #[test]
    fn test_extracts_member_syntax() {
        let source = indoc! {r#"
            public class Player : MonoBehaviour
            {
                [SerializeField, Range(0, 10)] private int score;
                public float speed = 2f, accel;
                public int Health { get; private set; }
                public event System.Action Died;
                public static void Fire() { }
                Player() { }
            }
        "#};

        let body = extract(source);
        let summary: Vec<(MemberKind, Option<&str>)> =
            body.members.iter().map(|m| (m.kind, m.name())).collect();

        assert_eq!(
            summary,
            vec![
                (MemberKind::Field, Some("score")),
                (MemberKind::Field, Some("speed")),
                (MemberKind::Property, Some("Health")),
                (MemberKind::Event, Some("Died")),
                (MemberKind::Method, Some("Fire")),
                (MemberKind::Other, Some("Player")),
            ]
        );
        assert_eq!(body.members[0].annotations, vec!["SerializeField", "Range"]);
        assert_eq!(body.members[0].modifiers, vec!["private"]);
        assert_eq!(body.members[4].modifiers, vec!["public", "static"]);
        assert_eq!(body.members[4].line, 7);
    }

    #[test]
    fn test_member_text_covers_gaps_and_trailing_comments() {
        let source = indoc! {r#"
            class A
            {
                int a; // first

                // about b
                int b;
            }
        "#};

        let body = extract(source);

        assert_eq!(body.frame.head, "\n");
        assert_eq!(body.frame.member_indent, "    ");
        assert_eq!(body.members[0].text.leading, "    ");
        assert_eq!(body.members[0].text.body, "int a;");
        assert_eq!(body.members[0].text.trailing, " // first\n");
        assert_eq!(body.members[1].text.leading, "\n    // about b\n    ");
        assert_eq!(body.members[1].text.trailing, "\n");
        assert_eq!(body.frame.tail, "");
        assert_eq!(
            body.members[1].trivia,
            vec![Trivia::comment("// about b")]
        );
    }

    #[test]
    fn test_region_lines_are_removed_from_gaps() {
        let source = indoc! {r#"
            class A
            {
                #region Fields
                int a;
                #endregion
            }
        "#};

        let body = extract(source);

        assert_eq!(body.members.len(), 1);
        assert_eq!(body.members[0].text.leading, "    ");
        assert!(body.members[0].trivia.is_empty());
        assert_eq!(body.frame.tail, "");
    }

    #[test]
    fn test_single_line_class() {
        let source = "    class A { int a; int b; }";
        let body = extract(source);

        assert_eq!(body.frame.head, "");
        assert_eq!(body.frame.member_indent, "        ");
        assert_eq!(body.frame.tail, "    ");
        assert_eq!(body.members[0].text.leading, " ");
        assert_eq!(body.members[0].text.trailing, "");
        assert_eq!(body.members[1].text.leading, " ");
    }

    #[test]
    fn test_empty_class_has_no_members() {
        let body = extract("class Empty\n{\n}\n");
        assert!(body.members.is_empty());
    }

    #[test]
    fn test_conditional_block_is_one_member_or_guarded_method() {
        let source = indoc! {r#"
            class A
            {
            #if UNITY_EDITOR
                void DrawHelpers() { }
            #endif
                public void Fire() { }
            }
        "#};

        let body = extract(source);
        let helpers = body
            .members
            .iter()
            .find(|m| m.name() == Some("DrawHelpers"))
            .unwrap();

        assert_eq!(helpers.kind, MemberKind::Method);
        assert!(helpers
            .trivia
            .iter()
            .any(|t| t.is_if_directive() && t.text().contains("UNITY_EDITOR")));
        assert!(body.members.iter().any(|m| m.name() == Some("Fire")));
    }

    #[test]
    fn test_flush_left_directive_does_not_set_member_indent() {
        let source = indoc! {r#"
            class A
            {
            #if UNITY_EDITOR
                void DrawHelpers() { }
            #endif
                public void Fire() { }
            }
        "#};

        let body = extract(source);

        assert_eq!(body.frame.member_indent, "    ");
        assert!(body.members.iter().all(|m| m.text.starts_line));
    }

    #[test]
    fn test_same_line_members_do_not_start_lines() {
        let body = extract("class A { int a; int b; }");
        assert!(body.members.iter().all(|m| !m.text.starts_line));
    }

    #[test]
    fn test_line_tail_end() {
        assert_eq!(line_tail_end("x;  \nnext", 2), Some(5));
        assert_eq!(line_tail_end("x; // c\nnext", 2), Some(8));
        assert_eq!(line_tail_end("x; y;\n", 2), None);
        assert_eq!(line_tail_end("x;\r\n", 2), Some(4));
        assert_eq!(line_tail_end("x; }", 2), None);
    }

    #[test]
    fn test_indent_helpers() {
        assert_eq!(line_indent("a\n\t  b", 5), "\t  ");
        assert_eq!(own_line_indent("a\n\t  b", 5), Some("\t  ".to_string()));
        assert_eq!(own_line_indent("class A { int a;", 10), None);
        assert_eq!(own_line_indent("int a;", 0), Some(String::new()));
    }
}
