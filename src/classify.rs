//! Member classification.
//!
//! Rules are evaluated in order and the first match wins; they overlap on
//! purpose (a `public void Start()` is both public and a Unity message), so
//! the order is part of the contract.

use crate::lifecycle::is_lifecycle_method;
use crate::model::{Bucket, Member, MemberKind, Trivia};
use serde::{Deserialize, Serialize};

const CONTEXT_MENU_MARKER: &str = "ContextMenu";
const DEBUG_NAME_MARKERS: [&str; 2] = ["Debug", "Test"];
const DEBUG_SYMBOL: &str = "DEBUG";
const EDITOR_SYMBOL: &str = "UNITY_EDITOR";

/// How leading preprocessor trivia marks a method as debug-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveRule {
    /// `(#if && DEBUG) || UNITY_EDITOR`: any trivia mentioning
    /// `UNITY_EDITOR` matches, directive or not.
    #[default]
    Compatible,
    /// `#if && (DEBUG || UNITY_EDITOR)`.
    Strict,
}

impl DirectiveRule {
    pub fn matches(self, trivia: &Trivia) -> bool {
        let text = trivia.text();
        match self {
            Self::Compatible => {
                (trivia.is_if_directive() && text.contains(DEBUG_SYMBOL))
                    || text.contains(EDITOR_SYMBOL)
            }
            Self::Strict => {
                trivia.is_if_directive()
                    && (text.contains(DEBUG_SYMBOL) || text.contains(EDITOR_SYMBOL))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classifier {
    directive_rule: DirectiveRule,
}

impl Classifier {
    pub fn new(directive_rule: DirectiveRule) -> Self {
        Self { directive_rule }
    }

    pub fn classify(&self, member: &Member) -> Bucket {
        match member.kind {
            MemberKind::Field if member.annotations.is_empty() => Bucket::RuntimeData,
            MemberKind::Field => Bucket::Inspector,
            MemberKind::Method => self.classify_method(member),
            _ if member.is_public() => Bucket::PublicApi,
            _ => Bucket::InternalLogic,
        }
    }

    fn classify_method(&self, method: &Member) -> Bucket {
        if method.name().is_some_and(is_lifecycle_method) {
            return Bucket::Lifecycle;
        }
        if self.is_debug_method(method) {
            return Bucket::Debug;
        }
        if method.is_public() {
            Bucket::PublicApi
        } else {
            Bucket::InternalLogic
        }
    }

    /// Context-menu attribute, debug-ish name, or debug-only preprocessor guard.
    pub fn is_debug_method(&self, method: &Member) -> bool {
        has_context_menu(method) || has_debug_name(method) || self.has_debug_guard(method)
    }

    fn has_debug_guard(&self, method: &Member) -> bool {
        method
            .trivia
            .iter()
            .any(|trivia| self.directive_rule.matches(trivia))
    }
}

fn has_context_menu(method: &Member) -> bool {
    method
        .annotations
        .iter()
        .any(|name| name.contains(CONTEXT_MENU_MARKER))
}

fn has_debug_name(method: &Member) -> bool {
    method
        .name()
        .is_some_and(|name| DEBUG_NAME_MARKERS.iter().any(|marker| name.contains(marker)))
}

/// Classify with the default (compatible) directive rule.
pub fn classify(member: &Member) -> Bucket {
    Classifier::default().classify(member)
}
