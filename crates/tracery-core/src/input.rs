//! Pointer events as seen by the controller.

use kurbo::Point;

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };

    /// Whether a click should toggle selection membership instead of replacing it.
    pub fn is_toggle(&self) -> bool {
        self.shift || self.ctrl || self.meta
    }
}

/// Primary-button pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { position: Point, modifiers: Modifiers },
    Drag { position: Point },
    Up { position: Point },
}
