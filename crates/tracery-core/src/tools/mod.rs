//! Tool modes and the per-gesture state machine.

use crate::shapes::{ShapeId, ShapeKind};
use kurbo::{Point, Vec2};
use std::fmt;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolKind {
    Line,
    Rectangle,
    #[default]
    Select,
    Edit,
    Delete,
    Copy,
}

/// Which pointer rules a tool uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerBinding {
    /// Press anchors a new shape, drag stretches it, release finalizes it.
    Draw,
    /// Press picks the nearest shape and acts on it.
    Pick,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Line,
        ToolKind::Rectangle,
        ToolKind::Select,
        ToolKind::Edit,
        ToolKind::Delete,
        ToolKind::Copy,
    ];

    /// Transition table from tool to pointer rules.
    pub fn binding(self) -> PointerBinding {
        match self {
            ToolKind::Line | ToolKind::Rectangle => PointerBinding::Draw,
            ToolKind::Select | ToolKind::Edit | ToolKind::Delete | ToolKind::Copy => {
                PointerBinding::Pick
            }
        }
    }

    /// Shape created by a drawing tool.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            ToolKind::Line => Some(ShapeKind::Line),
            ToolKind::Rectangle => Some(ShapeKind::Rectangle),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Line => "Line",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Select => "Select",
            ToolKind::Edit => "Edit",
            ToolKind::Delete => "Delete",
            ToolKind::Copy => "Copy",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// State of a press-drag-release gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ToolState {
    /// Waiting for a press.
    #[default]
    Idle,
    /// A shape is being drawn from `anchor`.
    Drawing { shape: ShapeId, anchor: Point },
    /// A shape is being dragged; `last` is the previous pointer position.
    Moving { shape: ShapeId, last: Point },
}

/// Manages the current tool and its gesture state.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the tool.
    pub state: ToolState,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool, dropping any gesture in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.state = ToolState::Idle;
    }

    pub fn binding(&self) -> PointerBinding {
        self.current_tool.binding()
    }

    pub fn begin_draw(&mut self, shape: ShapeId, anchor: Point) {
        self.state = ToolState::Drawing { shape, anchor };
    }

    pub fn begin_move(&mut self, shape: ShapeId, at: Point) {
        self.state = ToolState::Moving { shape, last: at };
    }

    /// Shape currently being drawn.
    pub fn drawing(&self) -> Option<ShapeId> {
        match self.state {
            ToolState::Drawing { shape, .. } => Some(shape),
            _ => None,
        }
    }

    /// Advance a move gesture to `point`, returning the shape and how far it moved.
    pub fn move_step(&mut self, point: Point) -> Option<(ShapeId, Vec2)> {
        if let ToolState::Moving { shape, last } = &mut self.state {
            let delta = point - *last;
            *last = point;
            Some((*shape, delta))
        } else {
            None
        }
    }

    /// End the gesture and return the state it was in.
    pub fn finish(&mut self) -> ToolState {
        std::mem::take(&mut self.state)
    }

    /// Cancel the current interaction.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    /// Check if a gesture is active.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, ToolState::Idle)
    }
}
