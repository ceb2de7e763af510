//! Language-neutral description of class members.
//!
//! The classifier and the reorganizer only ever see these types. The C#
//! front end in [`crate::csharp`] builds them from a tree-sitter tree and the
//! printer turns them back into text, so everything between those two steps
//! is a pure transformation over owned values.

use serde::Serialize;
use std::fmt;

/// Syntactic category of a member declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Field,
    Method,
    Property,
    Event,
    /// Constructors, operators, nested types, delegates and anything else.
    Other,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Field => "field",
            Self::Method => "method",
            Self::Property => "property",
            Self::Event => "event",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// One of the six fixed sections a class body is split into.
///
/// Variant order is the emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Inspector,
    RuntimeData,
    Lifecycle,
    PublicApi,
    InternalLogic,
    Debug,
}

impl Bucket {
    pub const ALL: [Bucket; 6] = [
        Bucket::Inspector,
        Bucket::RuntimeData,
        Bucket::Lifecycle,
        Bucket::PublicApi,
        Bucket::InternalLogic,
        Bucket::Debug,
    ];

    /// Label carried by the opening `#region` marker.
    pub fn label(self) -> &'static str {
        match self {
            Self::Inspector => "=== INSPECTOR ===",
            Self::RuntimeData => "=== RUNTIME DATA ===",
            Self::Lifecycle => "=== UNITY LIFECYCLE ===",
            Self::PublicApi => "=== PUBLIC API ===",
            Self::InternalLogic => "=== INTERNAL LOGIC ===",
            Self::Debug => "=== DEBUG ===",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Inspector => "Inspector",
            Self::RuntimeData => "Runtime Data",
            Self::Lifecycle => "Unity Lifecycle",
            Self::PublicApi => "Public API",
            Self::InternalLogic => "Internal Logic",
            Self::Debug => "Debug",
        };
        f.write_str(name)
    }
}

/// A comment or preprocessor directive found right before a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trivia {
    Comment { text: String },
    Directive { keyword: String, text: String },
}

impl Trivia {
    /// Classify a single source line. Blank lines carry no trivia.
    pub fn from_line(line: &str) -> Option<Self> {
        let text = line.trim();
        if text.is_empty() {
            return None;
        }

        match text.strip_prefix('#') {
            Some(rest) => {
                let keyword: String = rest
                    .trim_start()
                    .chars()
                    .take_while(|c| c.is_ascii_alphabetic())
                    .collect();
                Some(Self::Directive {
                    keyword,
                    text: text.to_string(),
                })
            }
            None => Some(Self::Comment {
                text: text.to_string(),
            }),
        }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment { text: text.into() }
    }

    pub fn directive(text: &str) -> Self {
        Self::from_line(text).unwrap_or_else(|| Self::comment(text))
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Comment { text } | Self::Directive { text, .. } => text,
        }
    }

    pub fn is_if_directive(&self) -> bool {
        matches!(self, Self::Directive { keyword, .. } if keyword == "if")
    }

    /// `#region` and `#endregion` lines, which this tool owns.
    pub fn is_region_marker(&self) -> bool {
        matches!(
            self,
            Self::Directive { keyword, .. } if keyword == "region" || keyword == "endregion"
        )
    }
}

/// Exact source text of a member, split around the declaration itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberText {
    /// Gap between the previous member (or the opening brace) and this one.
    pub leading: String,
    /// The declaration, attributes included.
    pub body: String,
    /// Remainder of the last line when it holds only whitespace or a `//` comment.
    pub trailing: String,
    /// `leading` begins at the start of a line rather than after other code.
    pub starts_line: bool,
}

/// One declaration inside a class body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub kind: MemberKind,
    pub name: Option<String>,
    pub modifiers: Vec<String>,
    pub annotations: Vec<String>,
    pub trivia: Vec<Trivia>,
    pub text: MemberText,
    /// 1-indexed line of the declaration in the original file.
    pub line: usize,
}

impl Member {
    pub fn new(kind: MemberKind) -> Self {
        Self {
            kind,
            name: None,
            modifiers: Vec::new(),
            annotations: Vec::new(),
            trivia: Vec::new(),
            text: MemberText::default(),
            line: 0,
        }
    }

    pub fn field(name: &str) -> Self {
        Self::new(MemberKind::Field).with_name(name)
    }

    pub fn method(name: &str) -> Self {
        Self::new(MemberKind::Method).with_name(name)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers = modifiers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_annotations<I, S>(mut self, annotations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.annotations = annotations.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_trivia(mut self, trivia: Vec<Trivia>) -> Self {
        self.trivia = trivia;
        self
    }

    pub fn with_text(mut self, text: MemberText) -> Self {
        self.text = text;
        self
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_public(&self) -> bool {
        self.modifiers.iter().any(|m| m == "public")
    }

    /// Name for reports; members without an identifier show their kind.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("<{}>", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trivia_from_line_recognizes_directives() {
        let trivia = Trivia::from_line("    #if UNITY_EDITOR\r").unwrap();
        assert!(trivia.is_if_directive());
        assert_eq!(trivia.text(), "#if UNITY_EDITOR");

        let spaced = Trivia::from_line("# if DEBUG").unwrap();
        assert!(spaced.is_if_directive());

        let region = Trivia::from_line("#region === DEBUG ===").unwrap();
        assert!(region.is_region_marker());
        assert!(!region.is_if_directive());
    }

    #[test]
    fn test_trivia_from_line_comments_and_blanks() {
        assert_eq!(Trivia::from_line("   \t"), None);
        let comment = Trivia::from_line("  // only in UNITY_EDITOR").unwrap();
        assert_eq!(comment, Trivia::comment("// only in UNITY_EDITOR"));
        assert!(!comment.is_if_directive());
    }

    #[test]
    fn test_bucket_labels_are_distinct_and_framed() {
        let labels: Vec<&str> = Bucket::ALL.iter().map(|b| b.label()).collect();
        for label in &labels {
            assert!(label.starts_with("=== ") && label.ends_with(" ==="));
        }
        let unique: std::collections::HashSet<&str> = labels.iter().copied().collect();
        assert_eq!(unique.len(), labels.len());
        assert_eq!(Bucket::PublicApi.label(), "=== PUBLIC API ===");
    }

    #[test]
    fn test_bucket_order_matches_emission_order() {
        let mut sorted = Bucket::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, Bucket::ALL.to_vec());
        assert_eq!(Bucket::Debug.index(), 5);
    }

    #[test]
    fn test_member_visibility_and_display_name() {
        let fire = Member::method("Fire").with_modifiers(["public", "virtual"]);
        assert!(fire.is_public());
        assert_eq!(fire.display_name(), "Fire");

        let ctor = Member::new(MemberKind::Other).with_modifiers(["protected"]);
        assert!(!ctor.is_public());
        assert_eq!(ctor.display_name(), "<other>");
    }
}
