// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cluster bubble view model: member initials plus an overflow count.

use alloc::format;
use alloc::string::String;

use smallvec::SmallVec;
use unicode_segmentation::UnicodeSegmentation;

use crate::group::ClusterGroup;

/// Maximum number of member initials shown in a cluster bubble.
pub const MAX_LABELS: usize = 3;

/// Presentation-only summary of a [`ClusterGroup`].
///
/// Holds the initials of the first [`MAX_LABELS`] members, in member order, and
/// the number of members that did not get a label. Built fresh for every draw.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClusterSummary {
    labels: SmallVec<[String; MAX_LABELS]>,
    overflow: usize,
}

impl ClusterSummary {
    /// Summarize a group from its members' display titles.
    pub fn from_group(group: &ClusterGroup) -> Self {
        Self::from_titles(group.members().iter().map(|m| m.title()))
    }

    /// Summarize an ordered sequence of optional member titles.
    pub fn from_titles<'a, I>(titles: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut summary = Self::default();
        for title in titles {
            if summary.labels.len() < MAX_LABELS {
                summary.labels.push(initial_of(title));
            } else {
                summary.overflow += 1;
            }
        }
        summary
    }

    /// Member initials, at most [`MAX_LABELS`].
    #[inline]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Members beyond the labelled ones: `max(0, members - MAX_LABELS)`.
    #[inline]
    pub fn overflow(&self) -> usize {
        self.overflow
    }

    /// Total members summarized.
    pub fn member_count(&self) -> usize {
        self.labels.len() + self.overflow
    }

    /// Badge text such as `"+2"`, or `None` when every member has a label.
    pub fn overflow_badge(&self) -> Option<String> {
        (self.overflow > 0).then(|| format!("+{}", self.overflow))
    }
}

/// First user-perceived character of `title`, uppercased; empty when there is
/// no title.
///
/// The initial is a whole extended grapheme cluster, so combining marks and
/// multi-scalar emoji stay intact. Uppercasing may expand it (for example `ß`
/// becomes `SS`), in which case the whole expansion is kept.
pub fn initial_of(title: Option<&str>) -> String {
    title
        .and_then(|t| t.graphemes(true).next())
        .map(str::to_uppercase)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use understory_annotations::{Coordinate, GeoPoint, PointId};

    fn group(titles: &[&str]) -> ClusterGroup {
        let members: Vec<_> = titles
            .iter()
            .zip(0_u128..)
            .map(|(t, id)| {
                let p = GeoPoint::new(PointId(id), Coordinate::new(0.0, 0.0));
                if t.is_empty() { p } else { p.with_title(*t) }
            })
            .collect();
        ClusterGroup::new(members)
    }

    #[test]
    fn five_members_with_a_blank_title() {
        let s = ClusterSummary::from_group(&group(&["Ann", "Bo", "", "Deb", "Ed"]));
        assert_eq!(s.labels(), ["A", "B", ""]);
        assert_eq!(s.overflow(), 2);
        assert_eq!(s.overflow_badge().as_deref(), Some("+2"));
        assert_eq!(s.member_count(), 5);
    }

    #[test]
    fn three_members_have_no_badge() {
        let s = ClusterSummary::from_group(&group(&["x", "y", "z"]));
        assert_eq!(s.labels(), ["X", "Y", "Z"]);
        assert_eq!(s.overflow(), 0);
        assert_eq!(s.overflow_badge(), None);
    }

    #[test]
    fn four_members_overflow_by_one() {
        let s = ClusterSummary::from_group(&group(&["a", "b", "c", "d"]));
        assert_eq!(s.overflow_badge().as_deref(), Some("+1"));
    }

    #[test]
    fn two_members_keep_order() {
        let s = ClusterSummary::from_titles([Some("zed"), None]);
        assert_eq!(s.labels(), ["Z", ""]);
        assert_eq!(s.overflow(), 0);
    }

    #[test]
    fn initials() {
        assert_eq!(initial_of(None), "");
        assert_eq!(initial_of(Some("")), "");
        assert_eq!(initial_of(Some("émile")), "É");
        assert_eq!(initial_of(Some("ßtraße")), "SS");
        assert_eq!(initial_of(Some("7 Eleven")), "7");
    }

    #[test]
    fn initial_is_a_whole_grapheme() {
        assert_eq!(initial_of(Some("e\u{301}mile")), "E\u{301}");
        assert_eq!(initial_of(Some("E\u{301}mile")), "E\u{301}");
        assert_eq!(initial_of(Some("\u{1F1EB}\u{1F1F7} Paris")), "\u{1F1EB}\u{1F1F7}");
        assert_eq!(
            initial_of(Some("\u{1F469}\u{200D}\u{1F4BB}x")),
            "\u{1F469}\u{200D}\u{1F4BB}"
        );
    }
}
