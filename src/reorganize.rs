//! Bucket assembly for one class body.

use crate::classify::Classifier;
use crate::lifecycle::sort_lifecycle;
use crate::model::{Bucket, Member};

/// A non-empty bucket in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub bucket: Bucket,
    pub members: Vec<Member>,
}

impl Section {
    pub fn open_marker(&self) -> String {
        format!("#region {}", self.bucket.label())
    }

    pub fn close_marker(&self) -> &'static str {
        "#endregion"
    }
}

/// Delimiters attached to a member by its position in a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub opens: Option<Bucket>,
    pub closes: Option<Bucket>,
}

#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    pub member: &'a Member,
    pub bucket: Bucket,
    pub edges: Edges,
}

/// Reorganized class body. Empty buckets are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    pub sections: Vec<Section>,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn member_count(&self) -> usize {
        self.sections.iter().map(|s| s.members.len()).sum()
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.sections.iter().flat_map(|s| s.members.iter())
    }

    pub fn section(&self, bucket: Bucket) -> Option<&Section> {
        self.sections.iter().find(|s| s.bucket == bucket)
    }

    /// Flat member sequence with the delimiter edges each member carries.
    pub fn placements(&self) -> impl Iterator<Item = Placement<'_>> {
        self.sections.iter().flat_map(|section| {
            let last = section.members.len().saturating_sub(1);
            section
                .members
                .iter()
                .enumerate()
                .map(move |(i, member)| Placement {
                    member,
                    bucket: section.bucket,
                    edges: Edges {
                        opens: (i == 0).then_some(section.bucket),
                        closes: (i == last).then_some(section.bucket),
                    },
                })
        })
    }

    pub fn into_members(self) -> Vec<Member> {
        self.sections
            .into_iter()
            .flat_map(|section| section.members)
            .collect()
    }
}

impl Classifier {
    /// Stable-partition `members` into buckets and lay them out in bucket order.
    pub fn reorganize(&self, members: Vec<Member>) -> Layout {
        let mut buckets: [Vec<Member>; 6] = Default::default();
        for member in members {
            let bucket = self.classify(&member);
            buckets[bucket.index()].push(member);
        }

        let lifecycle = std::mem::take(&mut buckets[Bucket::Lifecycle.index()]);
        buckets[Bucket::Lifecycle.index()] = sort_lifecycle(lifecycle);

        let sections = Bucket::ALL
            .into_iter()
            .zip(buckets)
            .filter(|(_, members)| !members.is_empty())
            .map(|(bucket, members)| Section { bucket, members })
            .collect();

        Layout { sections }
    }
}

/// Reorganize with the default classifier.
pub fn reorganize(members: Vec<Member>) -> Layout {
    Classifier::default().reorganize(members)
}
