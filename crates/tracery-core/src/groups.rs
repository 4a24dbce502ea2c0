//! Group registry: named sets of shapes handled as one unit.

use crate::shapes::ShapeId;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Identifier of a group, displayed as `group_<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(u64);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group_{}", self.0)
    }
}

/// A set of shapes that delete, copy, edit and highlight treat as a single unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    id: GroupId,
    members: BTreeSet<ShapeId>,
}

impl Group {
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Member shape IDs.
    pub fn members(&self) -> &BTreeSet<ShapeId> {
        &self.members
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Maps group IDs to their member shapes.
///
/// A shape belongs to at most one group: creating a group steals its members
/// from whatever groups held them before.
#[derive(Debug, Clone, Default)]
pub struct GroupRegistry {
    groups: BTreeMap<GroupId, Group>,
    next_id: u64,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a group from `members`.
    /// Returns `None` when `members` is empty.
    pub fn create(&mut self, members: impl IntoIterator<Item = ShapeId>) -> Option<GroupId> {
        let members: BTreeSet<ShapeId> = members.into_iter().collect();
        if members.is_empty() {
            return None;
        }

        for &member in &members {
            self.remove_member(member);
        }

        let id = GroupId(self.next_id);
        self.next_id += 1;
        self.groups.insert(id, Group { id, members });
        Some(id)
    }

    /// Find the group containing a shape.
    pub fn group_of(&self, shape: ShapeId) -> Option<GroupId> {
        self.groups
            .values()
            .find(|group| group.contains(shape))
            .map(|group| group.id)
    }

    pub fn get(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    /// Member IDs of a group, if it exists.
    pub fn members(&self, id: GroupId) -> Option<&BTreeSet<ShapeId>> {
        self.groups.get(&id).map(Group::members)
    }

    /// Dissolve a group and return it. The member shapes are untouched.
    pub fn remove(&mut self, id: GroupId) -> Option<Group> {
        self.groups.remove(&id)
    }

    /// Drop a shape from its group, removing the group once it is empty.
    /// Returns the group the shape belonged to.
    pub fn remove_member(&mut self, shape: ShapeId) -> Option<GroupId> {
        let id = self.group_of(shape)?;
        let now_empty = match self.groups.get_mut(&id) {
            Some(group) => {
                group.members.remove(&shape);
                group.members.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.groups.remove(&id);
        }
        Some(id)
    }

    /// Remove all groups. IDs keep counting up.
    pub fn clear(&mut self) {
        self.groups.clear();
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
