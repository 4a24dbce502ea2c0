//! UI components using egui.

use egui::{
    Align2, Button, Color32, Context, CornerRadius, Frame, Key, Margin, Pos2, RichText, Stroke,
    Ui, Vec2,
};
use tracery_core::controller::{EditRequest, ShapeProperties};
use tracery_core::shapes::{CornerStyle, NamedColor};
use tracery_core::tools::ToolKind;

use crate::render::color32;
use crate::shortcuts::ShortcutRegistry;

/// Actions triggered from menus, shortcuts and dialogs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiAction {
    Open,
    Save,
    SaveAs,
    ExportXml,
    Exit,
    SetTool(ToolKind),
    Group,
    Ungroup,
    /// Answer to the pending edit form.
    ApplyEdit(ShapeProperties),
    CancelEdit,
    DismissMessage,
    /// "Save before quitting?" answered Yes.
    QuitSave,
    /// "Save before quitting?" answered No.
    QuitDiscard,
    QuitCancel,
    ShowShortcuts,
}

/// Severity of a message dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

/// A modal message waiting to be acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub title: String,
    pub text: String,
}

/// What the status bar shows.
#[derive(Debug, Clone, Default)]
pub struct StatusInfo {
    pub tool: ToolKind,
    pub shapes: usize,
    pub groups: usize,
    pub selected: usize,
    pub file_name: Option<String>,
    pub modified: bool,
}

/// UI state.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Working values of the open edit form.
    pub edit_form: Option<ShapeProperties>,
    pub message: Option<Message>,
    pub quit_prompt_open: bool,
    pub shortcuts_modal_open: bool,
}

impl UiState {
    pub fn show_error(&mut self, title: impl Into<String>, text: impl Into<String>) {
        self.message = Some(Message {
            kind: MessageKind::Error,
            title: title.into(),
            text: text.into(),
        });
    }

    pub fn show_info(&mut self, title: impl Into<String>, text: impl Into<String>) {
        self.message = Some(Message {
            kind: MessageKind::Info,
            title: title.into(),
            text: text.into(),
        });
    }

    /// Whether any dialog is blocking the canvas.
    pub fn is_modal_open(&self) -> bool {
        self.edit_form.is_some()
            || self.message.is_some()
            || self.quit_prompt_open
            || self.shortcuts_modal_open
    }
}

fn dialog_frame() -> Frame {
    Frame::new()
        .fill(Color32::WHITE)
        .corner_radius(CornerRadius::same(12))
        .stroke(Stroke::new(1.0, Color32::from_gray(200)))
        .inner_margin(Margin::same(20))
}

fn primary_btn(ui: &mut Ui, label: &str) -> bool {
    ui.add(
        Button::new(RichText::new(label).color(Color32::WHITE))
            .fill(Color32::from_rgb(59, 130, 246))
            .min_size(Vec2::new(72.0, 28.0)),
    )
    .clicked()
}

fn secondary_btn(ui: &mut Ui, label: &str) -> bool {
    ui.add(Button::new(label).min_size(Vec2::new(72.0, 28.0))).clicked()
}

fn dialog_title(ui: &mut Ui, title: &str) {
    ui.label(RichText::new(title).size(16.0).strong().color(Color32::from_gray(30)));
    ui.add_space(12.0);
}

/// Dimmed backdrop plus a centered window. Returns whether the backdrop was clicked.
fn modal(ctx: &Context, id: &str, width: f32, add_contents: impl FnOnce(&mut Ui)) -> bool {
    let mut backdrop_clicked = false;
    egui::Area::new(egui::Id::new((id, "backdrop")))
        .fixed_pos(Pos2::ZERO)
        .order(egui::Order::Middle)
        .show(ctx, |ui| {
            let screen_rect = ctx.input(|i| i.content_rect());
            let response = ui.allocate_rect(screen_rect, egui::Sense::click());
            ui.painter().rect_filled(screen_rect, 0.0, Color32::from_black_alpha(80));
            backdrop_clicked = response.clicked();
        });

    egui::Area::new(egui::Id::new(id))
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            dialog_frame().show(ui, |ui| {
                ui.set_width(width);
                ui.vertical(add_contents);
            });
        });
    backdrop_clicked
}

fn menu_entry(ui: &mut Ui, label: &str, action: UiAction, selected: bool) -> Option<UiAction> {
    let mut button = Button::new(label).selected(selected);
    if let Some(shortcut) = ShortcutRegistry::label_for(&action) {
        button = button.shortcut_text(shortcut);
    }
    if ui.add(button).clicked() {
        ui.close();
        Some(action)
    } else {
        None
    }
}

fn tool_entry(ui: &mut Ui, tool: ToolKind, current: ToolKind) -> Option<UiAction> {
    menu_entry(ui, tool.label(), UiAction::SetTool(tool), tool == current)
}

/// Render the menu bar and return any triggered action.
pub fn render_menu_bar(ctx: &Context, current: ToolKind) -> Option<UiAction> {
    let mut action = None;
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                action = action
                    .or(menu_entry(ui, "Open...", UiAction::Open, false))
                    .or(menu_entry(ui, "Save", UiAction::Save, false))
                    .or(menu_entry(ui, "Save As...", UiAction::SaveAs, false))
                    .or(menu_entry(ui, "Export to XML...", UiAction::ExportXml, false));
                ui.separator();
                action = action.or(menu_entry(ui, "Exit", UiAction::Exit, false));
            });
            ui.menu_button("Draw", |ui| {
                action = action
                    .or(tool_entry(ui, ToolKind::Line, current))
                    .or(tool_entry(ui, ToolKind::Rectangle, current));
            });
            ui.menu_button("Edit", |ui| {
                action = action
                    .or(tool_entry(ui, ToolKind::Select, current))
                    .or(tool_entry(ui, ToolKind::Edit, current));
            });
            ui.menu_button("Tools", |ui| {
                action = action
                    .or(tool_entry(ui, ToolKind::Delete, current))
                    .or(tool_entry(ui, ToolKind::Copy, current));
            });
            ui.menu_button("Group", |ui| {
                action = action
                    .or(menu_entry(ui, "Group", UiAction::Group, false))
                    .or(menu_entry(ui, "Ungroup", UiAction::Ungroup, false));
            });
            ui.menu_button("Help", |ui| {
                action = action.or(menu_entry(ui, "Keyboard Shortcuts", UiAction::ShowShortcuts, false));
            });
        });
    });
    action
}

/// Render the status bar.
pub fn render_status_bar(ctx: &Context, status: &StatusInfo) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("Tool: {}", status.tool)).strong());
            ui.separator();
            ui.label(format!("{} shapes", status.shapes));
            ui.label(format!("{} groups", status.groups));
            if status.selected > 0 {
                ui.label(format!("{} selected", status.selected));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let name = status.file_name.as_deref().unwrap_or("Untitled");
                let marker = if status.modified { " *" } else { "" };
                ui.label(RichText::new(format!("{}{}", name, marker)).color(Color32::from_gray(100)));
            });
        });
    });
}

fn color_label(color: NamedColor) -> RichText {
    RichText::new(color.name()).color(color32(color.to_color()))
}

/// Render the property form for a pending edit.
pub fn render_edit_dialog(ctx: &Context, request: &EditRequest, form: &mut ShapeProperties) -> Option<UiAction> {
    let mut action = None;
    let title = match request.group {
        Some(group) => format!("Edit {} ({} shapes)", group, request.targets.len()),
        None => "Edit Shape".to_string(),
    };

    modal(ctx, "edit_dialog", 280.0, |ui| {
        dialog_title(ui, &title);

        egui::Grid::new("edit_form").num_columns(2).spacing([12.0, 8.0]).show(ui, |ui| {
            ui.label("Color:");
            egui::ComboBox::from_id_salt("edit_color")
                .selected_text(color_label(form.color))
                .show_ui(ui, |ui| {
                    for color in NamedColor::ALL {
                        ui.selectable_value(&mut form.color, color, color_label(color));
                    }
                });
            ui.end_row();

            if request.offer_corner_style {
                ui.label("Corners:");
                ui.horizontal(|ui| {
                    ui.radio_value(&mut form.corner_style, CornerStyle::Square, "Square");
                    ui.radio_value(&mut form.corner_style, CornerStyle::Round, "Round");
                });
                ui.end_row();
            }
        });

        ui.add_space(16.0);
        ui.horizontal(|ui| {
            if secondary_btn(ui, "Cancel") {
                action = Some(UiAction::CancelEdit);
            }
            if primary_btn(ui, "OK") {
                action = Some(UiAction::ApplyEdit(*form));
            }
        });
    });

    action.or_else(|| {
        ctx.input(|i| {
            if i.key_pressed(Key::Escape) {
                Some(UiAction::CancelEdit)
            } else if i.key_pressed(Key::Enter) {
                Some(UiAction::ApplyEdit(*form))
            } else {
                None
            }
        })
    })
}

/// Render an acknowledgeable message.
pub fn render_message_dialog(ctx: &Context, message: &Message) -> Option<UiAction> {
    let mut action = None;
    modal(ctx, "message_dialog", 320.0, |ui| {
        let title_color = match message.kind {
            MessageKind::Info => Color32::from_gray(30),
            MessageKind::Error => Color32::from_rgb(185, 28, 28),
        };
        ui.label(RichText::new(&message.title).size(16.0).strong().color(title_color));
        ui.add_space(12.0);
        ui.label(RichText::new(&message.text).color(Color32::from_gray(60)));
        ui.add_space(16.0);
        if primary_btn(ui, "OK") {
            action = Some(UiAction::DismissMessage);
        }
    });
    action.or_else(|| {
        ctx.input(|i| i.key_pressed(Key::Enter) || i.key_pressed(Key::Escape))
            .then_some(UiAction::DismissMessage)
    })
}

/// Render the unsaved-changes prompt shown on close.
pub fn render_quit_dialog(ctx: &Context) -> Option<UiAction> {
    let mut action = None;
    modal(ctx, "quit_dialog", 300.0, |ui| {
        dialog_title(ui, "Save before quitting?");
        ui.label(RichText::new("The drawing has unsaved changes.").color(Color32::from_gray(60)));
        ui.add_space(16.0);
        ui.horizontal(|ui| {
            if primary_btn(ui, "Yes") {
                action = Some(UiAction::QuitSave);
            }
            if secondary_btn(ui, "No") {
                action = Some(UiAction::QuitDiscard);
            }
            if secondary_btn(ui, "Cancel") {
                action = Some(UiAction::QuitCancel);
            }
        });
    });
    action.or_else(|| {
        ctx.input(|i| i.key_pressed(Key::Escape))
            .then_some(UiAction::QuitCancel)
    })
}

/// Render the keyboard shortcuts modal.
pub fn render_shortcuts_modal(ctx: &Context, ui_state: &mut UiState) {
    let mut close = false;
    let backdrop_clicked = modal(ctx, "shortcuts_modal", 360.0, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Keyboard Shortcuts").size(16.0).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("✕").clicked() {
                    close = true;
                }
            });
        });
        ui.add_space(12.0);

        for shortcut in ShortcutRegistry::all() {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(shortcut.format())
                        .size(12.0)
                        .family(egui::FontFamily::Monospace)
                        .color(Color32::from_rgb(100, 116, 139)),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(shortcut.description).size(12.0).color(Color32::from_gray(60)));
                });
            });
            ui.add_space(4.0);
        }
    });
    if close || backdrop_clicked || ctx.input(|i| i.key_pressed(Key::Escape)) {
        ui_state.shortcuts_modal_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_tracking() {
        let mut state = UiState::default();
        assert!(!state.is_modal_open());

        state.show_error("Open failed", "File not found: a.txt");
        assert!(state.is_modal_open());
        assert_eq!(state.message.as_ref().unwrap().kind, MessageKind::Error);

        state.message = None;
        state.edit_form = Some(ShapeProperties::default());
        assert!(state.is_modal_open());
    }

    #[test]
    fn test_show_info_replaces_message() {
        let mut state = UiState::default();
        state.show_error("a", "b");
        state.show_info("Ungroup", "No group selected");

        let message = state.message.unwrap();
        assert_eq!(message.kind, MessageKind::Info);
        assert_eq!(message.text, "No group selected");
    }
}
