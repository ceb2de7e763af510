//! Canonical ordering of Unity message methods.

use crate::model::{Member, MemberKind};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Unity messages in the order they are laid out, not alphabetical.
pub const LIFECYCLE_ORDER: [&str; 12] = [
    "Reset",
    "Awake",
    "OnEnable",
    "OnValidate",
    "Start",
    "Update",
    "LateUpdate",
    "FixedUpdate",
    "OnDisable",
    "OnDestroy",
    "OnDrawGizmos",
    "OnDrawGizmosSelected",
];

static LIFECYCLE_RANKS: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    LIFECYCLE_ORDER
        .iter()
        .enumerate()
        .map(|(rank, name)| (*name, rank))
        .collect()
});

/// Zero-based position of `name` in [`LIFECYCLE_ORDER`].
pub fn rank(name: &str) -> Option<usize> {
    LIFECYCLE_RANKS.get(name).copied()
}

pub fn is_lifecycle_method(name: &str) -> bool {
    LIFECYCLE_RANKS.contains_key(name)
}

/// Sort key for a member; unknown or unnamed members go last.
fn sort_rank(member: &Member) -> usize {
    member.name().and_then(rank).unwrap_or(usize::MAX)
}

/// Reorders lifecycle callbacks by canonical rank.
///
/// Only methods are kept: anything else that ends up in the lifecycle bucket
/// is dropped from the result. The sort is stable, so members sharing a rank
/// keep their relative order.
pub fn sort_lifecycle(members: Vec<Member>) -> Vec<Member> {
    let mut methods: Vec<Member> = members
        .into_iter()
        .filter(|member| member.kind == MemberKind::Method)
        .collect();
    methods.sort_by_key(sort_rank);
    methods
}
