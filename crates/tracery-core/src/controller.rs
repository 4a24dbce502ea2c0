//! Interaction controller.
//!
//! Owns the shape registry, the group registry, the selection and the tool
//! state. The host feeds it pointer events in canvas coordinates and paints
//! whatever it holds afterwards.

use crate::canvas::Drawing;
use crate::config::EditorConfig;
use crate::groups::{GroupId, GroupRegistry};
use crate::input::{Modifiers, PointerEvent};
use crate::selection::{Emphasis, Highlight, Selection};
use crate::shapes::{CornerStyle, NamedColor, Shape, ShapeId, ShapeKind};
use crate::tools::{PointerBinding, ToolKind, ToolManager, ToolState};
use kurbo::{Point, Vec2};

/// Round a pointer position to whole canvas pixels, the resolution the text
/// format stores.
fn snap(point: Point) -> Point {
    point.round()
}

/// Editable properties of a shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapeProperties {
    pub color: NamedColor,
    /// Only applied to rectangles.
    pub corner_style: CornerStyle,
}

/// A property form waiting for the user's answer.
#[derive(Debug, Clone, PartialEq)]
pub struct EditRequest {
    /// Shapes the answer applies to, in z-order.
    pub targets: Vec<ShapeId>,
    /// Group the targets came from, if the picked shape was grouped.
    pub group: Option<GroupId>,
    /// Values to prefill the form with, taken from the picked shape.
    pub initial: ShapeProperties,
    /// Whether any target is a rectangle, so corner style is worth asking for.
    pub offer_corner_style: bool,
}

/// What a pointer press did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PressOutcome {
    /// Nothing was hit, or input is blocked.
    Nothing,
    /// A new shape was started.
    Drew(ShapeId),
    /// A shape was picked for selection and moving.
    Picked(ShapeId),
    /// A property form is now pending.
    EditRequested,
    Deleted(Vec<ShapeId>),
    /// IDs of the new copies.
    Copied(Vec<ShapeId>),
}

/// Result of an ungroup request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UngroupOutcome {
    Ungrouped(GroupId),
    NothingSelected,
    /// The selection holds no grouped shape.
    NotGrouped,
}

/// Interprets pointer events for the active tool and mutates the drawing.
#[derive(Debug, Clone)]
pub struct Controller {
    drawing: Drawing,
    groups: GroupRegistry,
    selection: Selection,
    tools: ToolManager,
    highlight: Highlight,
    pending_edit: Option<EditRequest>,
    config: EditorConfig,
    modified: bool,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Controller {
    /// Create a controller with an empty drawing.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_drawing(config, Drawing::new())
    }

    /// Create a controller around an existing drawing.
    pub fn with_drawing(config: EditorConfig, drawing: Drawing) -> Self {
        Self {
            drawing,
            groups: GroupRegistry::new(),
            selection: Selection::new(),
            tools: ToolManager::new(),
            highlight: Highlight::None,
            pending_edit: None,
            config,
            modified: false,
        }
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    pub fn groups(&self) -> &GroupRegistry {
        &self.groups
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    /// Shape currently being drawn.
    pub fn in_progress(&self) -> Option<ShapeId> {
        self.tools.drawing()
    }

    /// Property form waiting for an answer.
    pub fn pending_edit(&self) -> Option<&EditRequest> {
        self.pending_edit.as_ref()
    }

    /// Whether the drawing changed since it was last loaded or saved.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Replace the whole drawing, as when opening a file.
    pub fn replace_drawing(&mut self, drawing: Drawing) {
        self.drawing = drawing;
        self.groups.clear();
        self.selection.clear();
        self.tools.cancel();
        self.highlight = Highlight::None;
        self.pending_edit = None;
        self.modified = false;
    }

    /// Switch tools. Any gesture in progress, highlight, selection and
    /// pending form are dropped.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if let Some(id) = self.tools.drawing() {
            log::debug!("Tool change ends drawing of {}", id);
        }
        self.tools.set_tool(tool);
        self.highlight = Highlight::None;
        self.selection.clear();
        self.pending_edit = None;
        log::info!("Tool: {}", tool);
    }

    /// How a shape should be drawn right now.
    pub fn emphasis(&self, id: ShapeId) -> Emphasis {
        let highlighted = match self.highlight {
            Highlight::None => false,
            Highlight::Shape(shape) => shape == id,
            Highlight::Group(group) => self
                .groups
                .get(group)
                .is_some_and(|g| g.contains(id)),
        };
        if highlighted {
            Emphasis::Highlighted
        } else if self.selection.contains(id) {
            Emphasis::Selected
        } else {
            Emphasis::Normal
        }
    }

    /// Dispatch a pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> PressOutcome {
        match event {
            PointerEvent::Down { position, modifiers } => self.pointer_down(position, modifiers),
            PointerEvent::Drag { position } => {
                self.pointer_drag(position);
                PressOutcome::Nothing
            }
            PointerEvent::Up { position } => {
                self.pointer_up(position);
                PressOutcome::Nothing
            }
        }
    }

    /// Primary button pressed at `point`.
    pub fn pointer_down(&mut self, point: Point, modifiers: Modifiers) -> PressOutcome {
        if self.pending_edit.is_some() {
            return PressOutcome::Nothing;
        }
        // A release we never saw; close that gesture where it last was.
        if let Some(last) = self.gesture_position() {
            self.pointer_up(last);
        }
        let point = snap(point);

        match self.tools.binding() {
            PointerBinding::Draw => self.begin_draw(point),
            PointerBinding::Pick => self.pick_and_apply(point, modifiers),
        }
    }

    /// Pointer moved with the primary button held.
    pub fn pointer_drag(&mut self, point: Point) {
        let point = snap(point);
        match self.tools.state {
            ToolState::Drawing { shape, .. } => {
                if let Some(s) = self.drawing.get_shape_mut(shape) {
                    s.set_end(point);
                }
            }
            ToolState::Moving { .. } => {
                let Some((shape, delta)) = self.tools.move_step(point) else {
                    return;
                };
                if delta == Vec2::ZERO {
                    return;
                }
                if let Some(s) = self.drawing.get_shape_mut(shape) {
                    s.translate(delta);
                    self.modified = true;
                }
            }
            ToolState::Idle => {}
        }
    }

    /// Primary button released at `point`.
    pub fn pointer_up(&mut self, point: Point) {
        let point = snap(point);
        self.pointer_drag(point);
        match self.tools.finish() {
            ToolState::Drawing { shape, anchor } => {
                log::debug!("Finished {} from {:?} to {:?}", shape, anchor, point);
            }
            ToolState::Moving { shape, .. } => {
                if self.highlight == Highlight::Shape(shape) {
                    self.highlight = Highlight::None;
                }
            }
            ToolState::Idle => {}
        }
    }

    /// Where the active gesture last was, if one is active.
    fn gesture_position(&self) -> Option<Point> {
        match self.tools.state {
            ToolState::Drawing { shape, anchor } => Some(
                self.drawing
                    .get_shape(shape)
                    .map_or(anchor, |s| s.endpoints().1),
            ),
            ToolState::Moving { last, .. } => Some(last),
            ToolState::Idle => None,
        }
    }

    /// Nearest shape within the pick radius.
    pub fn pick(&self, point: Point) -> Option<ShapeId> {
        self.drawing.nearest_shape(point, self.config.pick_radius)
    }

    fn begin_draw(&mut self, point: Point) -> PressOutcome {
        let Some(kind) = self.tools.current_tool.shape_kind() else {
            return PressOutcome::Nothing;
        };
        let shape = Shape::from_points(kind, point, point, NamedColor::default());
        let id = self.drawing.add_shape(shape);
        self.tools.begin_draw(id, point);
        self.modified = true;
        PressOutcome::Drew(id)
    }

    fn pick_and_apply(&mut self, point: Point, modifiers: Modifiers) -> PressOutcome {
        let tool = self.tools.current_tool;
        let Some(id) = self.pick(point) else {
            if tool == ToolKind::Select && !modifiers.is_toggle() {
                self.selection.clear();
                self.highlight = Highlight::None;
            }
            return PressOutcome::Nothing;
        };
        let group = self.groups.group_of(id);
        log::debug!("Picked {} (group: {:?}) with {}", id, group, tool);

        match tool {
            ToolKind::Select => {
                self.grab(id, group, point, modifiers);
                PressOutcome::Picked(id)
            }
            ToolKind::Edit => {
                self.request_edit(id, group);
                PressOutcome::EditRequested
            }
            ToolKind::Delete => {
                let targets = self.targets(id, group);
                if let Some(group) = group {
                    self.groups.remove(group);
                }
                PressOutcome::Deleted(self.delete_shapes(&targets))
            }
            ToolKind::Copy => {
                let targets = self.targets(id, group);
                let copies = self.copy_shapes(&targets);
                if group.is_some() {
                    if let Some(new_group) = self.groups.create(copies.iter().copied()) {
                        log::info!("Copied group into {}", new_group);
                    }
                }
                PressOutcome::Copied(copies)
            }
            ToolKind::Line | ToolKind::Rectangle => PressOutcome::Nothing,
        }
    }

    /// Select the picked shape and start moving it. Groups are only
    /// highlighted; the move applies to the picked shape alone.
    fn grab(&mut self, id: ShapeId, group: Option<GroupId>, point: Point, modifiers: Modifiers) {
        if modifiers.is_toggle() {
            self.selection.toggle(id);
        } else {
            self.selection.select_only(id);
        }
        self.highlight = match group {
            Some(group) => Highlight::Group(group),
            None => Highlight::Shape(id),
        };
        self.tools.begin_move(id, point);
    }

    /// The picked shape, or every member of its group, in z-order.
    fn targets(&self, id: ShapeId, group: Option<GroupId>) -> Vec<ShapeId> {
        match group.and_then(|g| self.groups.members(g)) {
            Some(members) => self.drawing.in_z_order(members.iter().copied()),
            None => vec![id],
        }
    }

    fn request_edit(&mut self, id: ShapeId, group: Option<GroupId>) {
        let Some(picked) = self.drawing.get_shape(id) else {
            return;
        };
        let initial = ShapeProperties {
            color: picked.color(),
            corner_style: picked.corner_style().unwrap_or_default(),
        };
        let targets = self.targets(id, group);
        let offer_corner_style = targets.iter().any(|&t| {
            self.drawing
                .get_shape(t)
                .is_some_and(|s| s.kind() == ShapeKind::Rectangle)
        });
        if let Some(group) = group {
            self.highlight = Highlight::Group(group);
        }
        self.pending_edit = Some(EditRequest {
            targets,
            group,
            initial,
            offer_corner_style,
        });
    }

    /// Apply the answer to the pending property form.
    /// Returns the shapes that were changed.
    pub fn apply_edit(&mut self, properties: ShapeProperties) -> Vec<ShapeId> {
        let Some(request) = self.pending_edit.take() else {
            return Vec::new();
        };
        let mut edited = Vec::new();
        for id in request.targets {
            if let Some(shape) = self.drawing.get_shape_mut(id) {
                shape.set_color(properties.color);
                shape.set_corner_style(properties.corner_style);
                edited.push(id);
            }
        }
        if !edited.is_empty() {
            self.modified = true;
            log::info!(
                "Edited {} shapes: {} / {}",
                edited.len(),
                properties.color,
                properties.corner_style
            );
        }
        edited
    }

    /// Dismiss the pending property form without changes.
    pub fn cancel_edit(&mut self) {
        self.pending_edit = None;
    }

    /// Remove shapes from the drawing, their groups and the selection.
    /// Returns the IDs that existed.
    pub fn delete_shapes(&mut self, ids: &[ShapeId]) -> Vec<ShapeId> {
        let mut removed = Vec::new();
        for &id in ids {
            if self.drawing.remove_shape(id).is_none() {
                continue;
            }
            self.groups.remove_member(id);
            self.selection.remove(id);
            if self.highlight == Highlight::Shape(id) {
                self.highlight = Highlight::None;
            }
            removed.push(id);
        }
        if let Highlight::Group(group) = self.highlight {
            if self.groups.get(group).is_none() {
                self.highlight = Highlight::None;
            }
        }
        if !removed.is_empty() {
            self.modified = true;
            log::info!("Deleted {} shapes", removed.len());
        }
        removed
    }

    /// Duplicate shapes, offset by the configured copy offset, on top of the
    /// drawing. Returns the IDs of the copies.
    pub fn copy_shapes(&mut self, ids: &[ShapeId]) -> Vec<ShapeId> {
        let offset = Vec2::new(self.config.copy_offset, self.config.copy_offset);
        let copies: Vec<Shape> = ids
            .iter()
            .filter_map(|&id| self.drawing.get_shape(id))
            .map(|shape| shape.duplicate(offset))
            .collect();

        let new_ids: Vec<ShapeId> = copies
            .into_iter()
            .map(|shape| self.drawing.add_shape(shape))
            .collect();
        if !new_ids.is_empty() {
            self.modified = true;
            log::info!("Copied {} shapes", new_ids.len());
        }
        new_ids
    }

    /// Group the selected shapes. The selection is cleared afterwards.
    /// Returns `None` when nothing is selected.
    pub fn group_selection(&mut self) -> Option<GroupId> {
        let ids = self.drawing.in_z_order(self.selection.ids().iter().copied());
        if ids.is_empty() {
            log::info!("Nothing selected to group");
            return None;
        }
        let group = self.groups.create(ids)?;
        self.selection.clear();
        self.highlight = Highlight::None;
        self.modified = true;
        log::info!(
            "Created {} with {} shapes",
            group,
            self.groups.get(group).map_or(0, |g| g.len())
        );
        Some(group)
    }

    /// Dissolve the group of the first selected shape that has one.
    pub fn ungroup_selection(&mut self) -> UngroupOutcome {
        if self.selection.is_empty() {
            return UngroupOutcome::NothingSelected;
        }
        let Some(group) = self
            .selection
            .ids()
            .iter()
            .find_map(|&id| self.groups.group_of(id))
        else {
            return UngroupOutcome::NotGrouped;
        };

        self.groups.remove(group);
        if self.highlight == Highlight::Group(group) {
            self.highlight = Highlight::None;
        }
        self.modified = true;
        log::info!("Ungrouped {}", group);
        UngroupOutcome::Ungrouped(group)
    }
}
