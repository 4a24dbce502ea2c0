//! Core application state and lifecycle.

use peniko::Color;
use std::path::{Path, PathBuf};
use tracery_core::config::EditorConfig;
use tracery_core::controller::{Controller, UngroupOutcome};
use tracery_core::storage;

use crate::event_handler::{EventHandler, PointerSample};
use crate::file_ops;
use crate::render::{self, RenderStyle};
use crate::shortcuts::ShortcutRegistry;
use crate::ui::{
    StatusInfo, UiAction, UiState, render_edit_dialog, render_menu_bar, render_message_dialog,
    render_quit_dialog, render_shortcuts_modal, render_status_bar,
};

/// Extra window height taken by the menu and status bars.
const CHROME_HEIGHT: u32 = 48;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_editor_config(&EditorConfig::default())
    }
}

impl AppConfig {
    /// Size the window around the configured canvas.
    pub fn from_editor_config(editor: &EditorConfig) -> Self {
        Self {
            title: "Tracery".to_string(),
            width: editor.canvas_width,
            height: editor.canvas_height + CHROME_HEIGHT,
            background_color: Color::from_rgba8(255, 255, 255, 255),
        }
    }
}

/// What the window should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WindowRequest {
    Stay,
    Close,
}

/// Main application struct.
pub struct TraceryApp {
    config: AppConfig,
    style: RenderStyle,
    controller: Controller,
    ui_state: UiState,
    event_handler: EventHandler,
    current_path: Option<PathBuf>,
    /// Set once the user agreed to close, so the next close request goes through.
    allow_close: bool,
    last_title: String,
}

impl TraceryApp {
    /// Create the application, loading `path` if given. A load failure is
    /// reported in a dialog and leaves an empty drawing.
    pub fn new(config: AppConfig, editor_config: EditorConfig, path: Option<PathBuf>) -> Self {
        let mut app = Self {
            config,
            style: RenderStyle::from_config(&editor_config),
            controller: Controller::new(editor_config),
            ui_state: UiState::default(),
            event_handler: EventHandler::new(),
            current_path: None,
            allow_close: false,
            last_title: String::new(),
        };
        if let Some(path) = path {
            app.open_path(&path);
        }
        app
    }

    fn window_title(&self) -> String {
        let name = self
            .current_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string());
        let marker = if self.controller.is_modified() { "*" } else { "" };
        format!("{} - {}{}", self.config.title, name, marker)
    }

    fn status(&self) -> StatusInfo {
        StatusInfo {
            tool: self.controller.tool(),
            shapes: self.controller.drawing().len(),
            groups: self.controller.groups().len(),
            selected: self.controller.selection().len(),
            file_name: self
                .current_path
                .as_deref()
                .and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned()),
            modified: self.controller.is_modified(),
        }
    }

    fn open_path(&mut self, path: &Path) {
        match storage::load_drawing(path) {
            Ok(load) => {
                self.controller.replace_drawing(load.drawing);
                self.event_handler.reset();
                self.current_path = Some(path.to_path_buf());
                if !load.skipped.is_empty() {
                    self.ui_state.show_info(
                        "Drawing opened",
                        format!("{} malformed lines were skipped.", load.skipped.len()),
                    );
                }
            }
            Err(e) => {
                log::error!("Failed to open {:?}: {}", path, e);
                self.ui_state.show_error("Could not open drawing", e.to_string());
            }
        }
    }

    fn save_to(&mut self, path: PathBuf) -> bool {
        match storage::save_drawing(&path, self.controller.drawing()) {
            Ok(()) => {
                self.controller.mark_saved();
                self.current_path = Some(path);
                true
            }
            Err(e) => {
                log::error!("Failed to save {:?}: {}", path, e);
                self.ui_state.show_error("Could not save drawing", e.to_string());
                false
            }
        }
    }

    /// Save to the current file, asking for a path if there is none or
    /// `ask` is set. Returns whether the drawing was written.
    fn save(&mut self, ask: bool) -> bool {
        let path = match (&self.current_path, ask) {
            (Some(path), false) => Some(path.clone()),
            _ => file_ops::pick_save_path(self.current_path.as_deref()),
        };
        match path {
            Some(path) => self.save_to(path),
            None => false,
        }
    }

    fn export_xml(&mut self) {
        let Some(path) = file_ops::pick_export_path(self.current_path.as_deref()) else {
            return;
        };
        if let Err(e) = storage::export_xml(&path, self.controller.drawing()) {
            log::error!("Failed to export {:?}: {}", path, e);
            self.ui_state.show_error("Could not export drawing", e.to_string());
        }
    }

    /// Exit if nothing is unsaved, otherwise ask first.
    fn request_exit(&mut self) -> WindowRequest {
        if self.controller.is_modified() {
            self.ui_state.quit_prompt_open = true;
            WindowRequest::Stay
        } else {
            self.allow_close = true;
            WindowRequest::Close
        }
    }

    fn handle_action(&mut self, action: UiAction) -> WindowRequest {
        match action {
            UiAction::Open => {
                if let Some(path) = file_ops::pick_open_path() {
                    self.open_path(&path);
                }
            }
            UiAction::Save => {
                self.save(false);
            }
            UiAction::SaveAs => {
                self.save(true);
            }
            UiAction::ExportXml => self.export_xml(),
            UiAction::Exit => return self.request_exit(),
            UiAction::SetTool(tool) => {
                self.event_handler.reset();
                self.controller.set_tool(tool);
            }
            UiAction::Group => {
                if self.controller.group_selection().is_none() {
                    self.ui_state.show_info("Group", "No shapes selected");
                }
            }
            UiAction::Ungroup => match self.controller.ungroup_selection() {
                UngroupOutcome::Ungrouped(_) => {}
                UngroupOutcome::NothingSelected | UngroupOutcome::NotGrouped => {
                    self.ui_state.show_info("Ungroup", "No group selected");
                }
            },
            UiAction::ApplyEdit(properties) => {
                self.controller.apply_edit(properties);
                self.ui_state.edit_form = None;
            }
            UiAction::CancelEdit => {
                self.controller.cancel_edit();
                self.ui_state.edit_form = None;
            }
            UiAction::DismissMessage => self.ui_state.message = None,
            UiAction::QuitSave => {
                self.ui_state.quit_prompt_open = false;
                if self.save(false) {
                    self.allow_close = true;
                    return WindowRequest::Close;
                }
            }
            UiAction::QuitDiscard => {
                self.ui_state.quit_prompt_open = false;
                self.allow_close = true;
                return WindowRequest::Close;
            }
            UiAction::QuitCancel => self.ui_state.quit_prompt_open = false,
            UiAction::ShowShortcuts => self.ui_state.shortcuts_modal_open = true,
        }
        WindowRequest::Stay
    }

    /// Keep the edit form in step with the controller's pending request.
    fn sync_edit_form(&mut self) {
        match (self.controller.pending_edit(), self.ui_state.edit_form) {
            (Some(request), None) => self.ui_state.edit_form = Some(request.initial),
            (None, Some(_)) => self.ui_state.edit_form = None,
            _ => {}
        }
    }

    fn show_canvas(&mut self, ctx: &egui::Context) {
        let background = render::color32(self.config.background_color);
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(background))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
                let canvas = response.rect;

                let blocked = self.ui_state.is_modal_open() || !response.hovered();
                let sample = ctx.input(PointerSample::from_input);
                for event in self.event_handler.translate(sample, canvas, blocked) {
                    self.controller.handle_pointer(event);
                }

                render::paint_drawing(&painter.with_clip_rect(canvas), canvas, &self.controller, &self.style);
            });
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) -> Option<UiAction> {
        if let (Some(request), Some(form)) = (self.controller.pending_edit(), self.ui_state.edit_form.as_mut()) {
            if let Some(action) = render_edit_dialog(ctx, request, form) {
                return Some(action);
            }
        }
        if self.ui_state.quit_prompt_open {
            if let Some(action) = render_quit_dialog(ctx) {
                return Some(action);
            }
        }
        if let Some(message) = &self.ui_state.message {
            if let Some(action) = render_message_dialog(ctx, message) {
                return Some(action);
            }
        }
        if self.ui_state.shortcuts_modal_open {
            render_shortcuts_modal(ctx, &mut self.ui_state);
        }
        None
    }
}

impl eframe::App for TraceryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) && !self.allow_close {
            if self.controller.is_modified() {
                ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
                self.ui_state.quit_prompt_open = true;
            } else {
                self.allow_close = true;
            }
        }

        let mut actions = Vec::new();
        if !self.ui_state.is_modal_open() {
            actions.extend(ShortcutRegistry::poll(ctx));
        }
        actions.extend(render_menu_bar(ctx, self.controller.tool()));
        render_status_bar(ctx, &self.status());

        self.show_canvas(ctx);
        self.sync_edit_form();
        actions.extend(self.show_dialogs(ctx));

        for action in actions {
            if self.handle_action(action) == WindowRequest::Close {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }

        let title = self.window_title();
        if title != self.last_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.last_title = title;
        }
    }
}

/// Run the application, optionally opening `path` at startup.
pub fn run(path: Option<PathBuf>) -> eframe::Result {
    let editor_config = EditorConfig::load_or_default();
    let config = AppConfig::from_editor_config(&editor_config);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.title.clone())
            .with_inner_size([config.width as f32, config.height as f32]),
        ..Default::default()
    };

    let app_name = config.title.clone();
    eframe::run_native(
        &app_name,
        options,
        Box::new(move |_cc| Ok(Box::new(TraceryApp::new(config, editor_config, path)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use tempfile::tempdir;
    use tracery_core::input::Modifiers;
    use tracery_core::tools::ToolKind;

    fn app() -> TraceryApp {
        TraceryApp::new(AppConfig::default(), EditorConfig::default(), None)
    }

    fn draw_line(app: &mut TraceryApp) {
        app.handle_action(UiAction::SetTool(ToolKind::Line));
        app.controller.pointer_down(Point::new(0.0, 0.0), Modifiers::NONE);
        app.controller.pointer_up(Point::new(50.0, 50.0));
    }

    #[test]
    fn test_config_sizes_window_around_canvas() {
        let config = AppConfig::default();
        assert_eq!(config.title, "Tracery");
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600 + CHROME_HEIGHT);
    }

    #[test]
    fn test_startup_load_error_shows_dialog() {
        let dir = tempdir().unwrap();
        let app = TraceryApp::new(
            AppConfig::default(),
            EditorConfig::default(),
            Some(dir.path().join("missing.txt")),
        );

        assert!(app.controller.drawing().is_empty());
        assert!(app.current_path.is_none());
        let message = app.ui_state.message.as_ref().unwrap();
        assert_eq!(message.title, "Could not open drawing");
        assert!(message.text.contains("missing.txt"));
    }

    #[test]
    fn test_startup_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("house.txt");
        std::fs::write(&path, "line 0 0 10 10 r\nrectangle 0 0 5 5 b round\nbad\n").unwrap();

        let app = TraceryApp::new(AppConfig::default(), EditorConfig::default(), Some(path));

        assert_eq!(app.controller.drawing().len(), 2);
        assert!(!app.controller.is_modified());
        assert_eq!(app.window_title(), "Tracery - house.txt");
        assert!(app.ui_state.message.as_ref().unwrap().text.contains("1 malformed"));
    }

    #[test]
    fn test_exit_unmodified_closes() {
        let mut app = app();
        assert_eq!(app.handle_action(UiAction::Exit), WindowRequest::Close);
        assert!(app.allow_close);
    }

    #[test]
    fn test_exit_modified_prompts() {
        let mut app = app();
        draw_line(&mut app);
        assert!(app.window_title().ends_with('*'));

        assert_eq!(app.handle_action(UiAction::Exit), WindowRequest::Stay);
        assert!(app.ui_state.quit_prompt_open);

        assert_eq!(app.handle_action(UiAction::QuitCancel), WindowRequest::Stay);
        assert!(!app.ui_state.quit_prompt_open);
        assert!(!app.allow_close);

        app.handle_action(UiAction::Exit);
        assert_eq!(app.handle_action(UiAction::QuitDiscard), WindowRequest::Close);
        assert!(app.allow_close);
    }

    #[test]
    fn test_quit_save_writes_current_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("drawing.txt");
        let mut app = app();
        app.current_path = Some(path.clone());
        draw_line(&mut app);

        app.handle_action(UiAction::Exit);
        assert_eq!(app.handle_action(UiAction::QuitSave), WindowRequest::Close);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "line 0 0 50 50 k\n");
        assert!(!app.controller.is_modified());
    }

    #[test]
    fn test_ungroup_without_group_shows_info() {
        let mut app = app();
        app.handle_action(UiAction::Ungroup);
        assert_eq!(app.ui_state.message.as_ref().unwrap().text, "No group selected");

        app.handle_action(UiAction::DismissMessage);
        assert!(app.ui_state.message.is_none());
    }

    #[test]
    fn test_edit_form_follows_pending_edit() {
        let mut app = app();
        draw_line(&mut app);
        app.handle_action(UiAction::SetTool(ToolKind::Edit));
        app.controller.pointer_down(Point::new(25.0, 25.0), Modifiers::NONE);
        app.controller.pointer_up(Point::new(25.0, 25.0));

        app.sync_edit_form();
        let mut form = app.ui_state.edit_form.unwrap();
        form.color = tracery_core::shapes::NamedColor::Blue;
        app.handle_action(UiAction::ApplyEdit(form));

        assert!(app.ui_state.edit_form.is_none());
        assert!(app.controller.pending_edit().is_none());
        let shape = app.controller.drawing().shapes_ordered().next().unwrap();
        assert_eq!(shape.color(), tracery_core::shapes::NamedColor::Blue);
    }
}
