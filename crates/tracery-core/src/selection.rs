//! Selection set and highlight state.

use crate::groups::GroupId;
use crate::shapes::ShapeId;

/// Ordered set of selected shape IDs, used to build groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<ShapeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with a single shape.
    pub fn select_only(&mut self, id: ShapeId) {
        self.ids.clear();
        self.ids.push(id);
    }

    pub fn remove(&mut self, id: ShapeId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|&s| s != id);
        self.ids.len() != before
    }

    /// Flip membership of `id`. Returns true if it is now selected.
    pub fn toggle(&mut self, id: ShapeId) -> bool {
        if self.remove(id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> &[ShapeId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

/// What the last pick lit up on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Highlight {
    #[default]
    None,
    /// A single shape being moved. Cleared on release.
    Shape(ShapeId),
    /// Every member of a group. Stays until the next pick or tool change.
    Group(GroupId),
}

/// How a shape should be drawn relative to its own color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Normal,
    /// Member of the selection set.
    Selected,
    /// Lit up by the current pick.
    Highlighted,
}
