//! Renders a reorganized class body back to C# text.

use super::extract::BodyFrame;
use crate::reorganize::Layout;

/// Text that replaces everything between a class's braces.
///
/// Each section is wrapped in its `#region` markers, indented like the
/// members and separated from the previous section by one blank line.
pub fn render_body(layout: &Layout, frame: &BodyFrame) -> String {
    let newline = frame.newline;
    let mut out = String::with_capacity(
        frame.head.len()
            + frame.tail.len()
            + layout
                .members()
                .map(|m| m.text.leading.len() + m.text.body.len() + m.text.trailing.len())
                .sum::<usize>(),
    );

    out.push_str(&frame.head);
    ensure_line_break(&mut out, newline);

    for (index, section) in layout.sections.iter().enumerate() {
        if index > 0 {
            out.push_str(newline);
        }
        push_marker(&mut out, &frame.member_indent, &section.open_marker(), newline);

        for (position, member) in section.members.iter().enumerate() {
            ensure_line_break(&mut out, newline);

            let leading = if position == 0 {
                strip_blank_lines(&member.text.leading)
            } else {
                member.text.leading.as_str()
            };
            if member.text.starts_line || member.text.leading.contains('\n') {
                out.push_str(leading);
            } else {
                // Shared a line with the previous member; give it its own.
                out.push_str(&frame.member_indent);
                out.push_str(leading.trim_start());
            }

            out.push_str(&member.text.body);
            out.push_str(&member.text.trailing);
        }

        ensure_line_break(&mut out, newline);
        push_marker(&mut out, &frame.member_indent, section.close_marker(), newline);
    }

    out.push_str(&frame.tail);
    out
}

fn push_marker(out: &mut String, indent: &str, marker: &str, newline: &str) {
    out.push_str(indent);
    out.push_str(marker);
    out.push_str(newline);
}

fn ensure_line_break(out: &mut String, newline: &str) {
    if !out.ends_with('\n') {
        out.push_str(newline);
    }
}

/// Drop whitespace-only lines from the start of `text`.
fn strip_blank_lines(text: &str) -> &str {
    let mut rest = text;
    while let Some(end) = rest.find('\n') {
        if !rest[..end].trim().is_empty() {
            break;
        }
        rest = &rest[end + 1..];
    }
    rest
}
