//! Keyboard shortcut registry and documentation.

use egui::{Context, Key, Modifiers};
use tracery_core::tools::ToolKind;

use crate::ui::UiAction;

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
    pub action: UiAction,
}

impl Shortcut {
    pub const fn new(
        key: Key,
        ctrl: bool,
        shift: bool,
        description: &'static str,
        action: UiAction,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
            action,
        }
    }

    /// Modifiers to match. Ctrl means Cmd on macOS.
    pub fn modifiers(&self) -> Modifiers {
        let mut modifiers = Modifiers::NONE;
        if self.ctrl {
            modifiers = modifiers | Modifiers::COMMAND;
        }
        if self.shift {
            modifiers = modifiers | Modifiers::SHIFT;
        }
        modifiers
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key.name());
        parts.join("+")
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts. Shift variants come before their plain
    /// counterparts, since a plain pattern also matches with Shift held.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new(Key::O, true, false, "Open...", UiAction::Open),
            Shortcut::new(Key::S, true, true, "Save as...", UiAction::SaveAs),
            Shortcut::new(Key::S, true, false, "Save", UiAction::Save),
            Shortcut::new(Key::E, true, false, "Export to XML", UiAction::ExportXml),
            Shortcut::new(Key::Q, true, false, "Exit", UiAction::Exit),
            Shortcut::new(Key::G, true, true, "Ungroup selected shapes", UiAction::Ungroup),
            Shortcut::new(Key::G, true, false, "Group selected shapes", UiAction::Group),
            Shortcut::new(Key::L, false, false, "Line tool", UiAction::SetTool(ToolKind::Line)),
            Shortcut::new(Key::R, false, false, "Rectangle tool", UiAction::SetTool(ToolKind::Rectangle)),
            Shortcut::new(Key::S, false, false, "Select tool", UiAction::SetTool(ToolKind::Select)),
            Shortcut::new(Key::E, false, false, "Edit tool", UiAction::SetTool(ToolKind::Edit)),
            Shortcut::new(Key::D, false, false, "Delete tool", UiAction::SetTool(ToolKind::Delete)),
            Shortcut::new(Key::C, false, false, "Copy tool", UiAction::SetTool(ToolKind::Copy)),
            Shortcut::new(Key::F1, false, false, "Show keyboard shortcuts", UiAction::ShowShortcuts),
        ]
    }

    /// Consume the first pressed shortcut this frame.
    pub fn poll(ctx: &Context) -> Option<UiAction> {
        ctx.input_mut(|i| {
            Self::all()
                .into_iter()
                .find(|s| i.consume_key(s.modifiers(), s.key))
                .map(|s| s.action)
        })
    }

    /// Display label for the shortcut bound to `action`, if any.
    pub fn label_for(action: &UiAction) -> Option<String> {
        Self::all()
            .into_iter()
            .find(|s| &s.action == action)
            .map(|s| s.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_format() {
        let shortcut = Shortcut::new(Key::G, true, true, "Ungroup", UiAction::Ungroup);
        assert_eq!(shortcut.format(), "Ctrl+Shift+G");
        assert_eq!(
            Shortcut::new(Key::L, false, false, "Line", UiAction::SetTool(ToolKind::Line)).format(),
            "L"
        );
    }

    #[test]
    fn test_no_duplicate_bindings() {
        let mut seen = HashSet::new();
        for shortcut in ShortcutRegistry::all() {
            assert!(
                seen.insert((shortcut.key, shortcut.ctrl, shortcut.shift)),
                "duplicate binding {}",
                shortcut.format()
            );
        }
    }

    #[test]
    fn test_shift_variants_checked_first() {
        let all = ShortcutRegistry::all();
        let position = |action: UiAction| all.iter().position(|s| s.action == action).unwrap();
        assert!(position(UiAction::Ungroup) < position(UiAction::Group));
        assert!(position(UiAction::SaveAs) < position(UiAction::Save));
    }

    #[test]
    fn test_every_tool_has_a_key() {
        for tool in ToolKind::ALL {
            assert!(ShortcutRegistry::label_for(&UiAction::SetTool(tool)).is_some());
        }
    }

    #[test]
    fn test_modifiers() {
        let shortcut = Shortcut::new(Key::S, true, true, "Save as", UiAction::SaveAs);
        assert!(shortcut.modifiers().command);
        assert!(shortcut.modifiers().shift);
        assert_eq!(
            Shortcut::new(Key::C, false, false, "Copy", UiAction::SetTool(ToolKind::Copy)).modifiers(),
            Modifiers::NONE
        );
    }
}
