// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marker roles, clustering tags, display priority, and a role-indexed table.

/// The two kinds of marker a clustered map shows.
///
/// Roles double as reuse keys: surfaces keep one pool of recyclable marker
/// slots per role.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MarkerRole {
    /// A single point.
    Pin,
    /// A group of nearby points.
    Cluster,
}

impl MarkerRole {
    /// Every role, in [`index`](Self::index) order.
    pub const ALL: [Self; 2] = [Self::Pin, Self::Cluster];

    /// Dense index of this role, suitable for array lookup.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Pin => 0,
            Self::Cluster => 1,
        }
    }

    /// Stable name, for hosts whose native reuse API is keyed by string.
    pub const fn reuse_identifier(self) -> &'static str {
        match self {
            Self::Pin => "pin",
            Self::Cluster => "cluster",
        }
    }
}

/// Tag telling the clustering engine which annotations may be grouped together.
///
/// Annotations only merge with others that carry the same tag. The meaning of
/// individual values is up to the host; [`ClusterTag::POINTS`] is the shared
/// pool used by default for both pins and clusters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClusterTag(pub u64);

impl ClusterTag {
    /// Default tag shared by every pin and cluster.
    pub const POINTS: Self = Self(0);
}

impl Default for ClusterTag {
    fn default() -> Self {
        Self::POINTS
    }
}

/// Hint for which overlapping marker to keep when space is constrained.
///
/// Higher values win.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DisplayPriority(pub u16);

impl DisplayPriority {
    /// Always shown.
    pub const REQUIRED: Self = Self(1000);
    /// Preferred over default-low markers.
    pub const DEFAULT_HIGH: Self = Self(750);
    /// Yields to default-high markers.
    pub const DEFAULT_LOW: Self = Self(250);
}

/// A fixed table with one optional value per [`MarkerRole`].
#[derive(Clone, Debug)]
pub struct RoleTable<T> {
    slots: [Option<T>; 2],
}

impl<T> Default for RoleTable<T> {
    fn default() -> Self {
        Self {
            slots: [None, None],
        }
    }
}

impl<T> RoleTable<T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` for `role`, returning the previous value.
    pub fn insert(&mut self, role: MarkerRole, value: T) -> Option<T> {
        self.slots[role.index()].replace(value)
    }

    /// Value stored for `role`.
    pub fn get(&self, role: MarkerRole) -> Option<&T> {
        self.slots[role.index()].as_ref()
    }

    /// Mutable value stored for `role`.
    pub fn get_mut(&mut self, role: MarkerRole) -> Option<&mut T> {
        self.slots[role.index()].as_mut()
    }

    /// Whether a value is stored for `role`.
    pub fn contains(&self, role: MarkerRole) -> bool {
        self.slots[role.index()].is_some()
    }

    /// Iterate stored values with their roles.
    pub fn iter(&self) -> impl Iterator<Item = (MarkerRole, &T)> + '_ {
        MarkerRole::ALL
            .into_iter()
            .filter_map(|role| self.get(role).map(|v| (role, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_indices_are_dense() {
        for (i, role) in MarkerRole::ALL.into_iter().enumerate() {
            assert_eq!(role.index(), i);
        }
        assert_eq!(MarkerRole::Pin.reuse_identifier(), "pin");
        assert_eq!(MarkerRole::Cluster.reuse_identifier(), "cluster");
    }

    #[test]
    fn pins_outrank_clusters() {
        assert!(DisplayPriority::DEFAULT_HIGH > DisplayPriority::DEFAULT_LOW);
        assert!(DisplayPriority::REQUIRED > DisplayPriority::DEFAULT_HIGH);
    }

    #[test]
    fn role_table_insert_and_replace() {
        let mut table = RoleTable::new();
        assert!(table.insert(MarkerRole::Cluster, 1).is_none());
        assert_eq!(table.insert(MarkerRole::Cluster, 2), Some(1));
        assert!(!table.contains(MarkerRole::Pin));
        assert_eq!(table.get(MarkerRole::Cluster), Some(&2));
        let roles: alloc::vec::Vec<_> = table.iter().map(|(r, _)| r).collect();
        assert_eq!(roles, [MarkerRole::Cluster]);
    }
}
