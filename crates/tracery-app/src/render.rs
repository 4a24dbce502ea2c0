//! Paints the drawing with the egui painter.

use egui::{Color32, Painter, Rect, Stroke, StrokeKind};
use kurbo::Point;
use peniko::Color;
use tracery_core::config::EditorConfig;
use tracery_core::controller::Controller;
use tracery_core::selection::Emphasis;
use tracery_core::shapes::{CornerStyle, Shape};

use crate::event_handler::to_screen;

/// Dash marks around selected shapes.
const SELECTION_COLOR: Color32 = Color32::from_rgb(59, 130, 246);
const SELECTION_PADDING: f32 = 4.0;

/// Convert a peniko color to egui.
pub fn color32(color: Color) -> Color32 {
    let c = color.to_rgba8();
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

/// Stroke settings used for painting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub stroke_width: f32,
    pub highlight_width: f32,
    pub corner_radius: f32,
}

impl RenderStyle {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            stroke_width: config.stroke_width as f32,
            highlight_width: config.highlight_stroke_width as f32,
            corner_radius: config.round_corner_radius as f32,
        }
    }
}

/// Radius for a rounded rectangle, shrunk so small rectangles stay valid.
pub fn corner_radius(preferred: f32, rect: Rect) -> f32 {
    preferred
        .min(rect.width() / 2.0)
        .min(rect.height() / 2.0)
        .max(0.0)
}

fn screen_rect(min: Point, max: Point, canvas: Rect) -> Rect {
    Rect::from_min_max(to_screen(min, canvas), to_screen(max, canvas))
}

/// Paint every shape bottom to top.
pub fn paint_drawing(painter: &Painter, canvas: Rect, controller: &Controller, style: &RenderStyle) {
    for shape in controller.drawing().shapes_ordered() {
        paint_shape(painter, canvas, shape, controller.emphasis(shape.id()), style);
    }
}

fn paint_shape(painter: &Painter, canvas: Rect, shape: &Shape, emphasis: Emphasis, style: &RenderStyle) {
    let width = match emphasis {
        Emphasis::Highlighted => style.highlight_width,
        Emphasis::Normal | Emphasis::Selected => style.stroke_width,
    };
    let stroke = Stroke::new(width, color32(shape.color().to_color()));

    if emphasis == Emphasis::Selected {
        paint_selection_marker(painter, canvas, shape);
    }

    match shape {
        Shape::Line(line) => {
            painter.line_segment([to_screen(line.start, canvas), to_screen(line.end, canvas)], stroke);
        }
        Shape::Rectangle(rect) => {
            let r = screen_rect(rect.upper_left(), rect.lower_right(), canvas);
            let radius = match rect.corner_style {
                CornerStyle::Round => corner_radius(style.corner_radius, r),
                CornerStyle::Square => 0.0,
            };
            painter.rect_stroke(r, radius, stroke, StrokeKind::Middle);
        }
    }
}

fn paint_selection_marker(painter: &Painter, canvas: Rect, shape: &Shape) {
    let bounds = shape.bounds();
    let r = screen_rect(Point::new(bounds.x0, bounds.y0), Point::new(bounds.x1, bounds.y1), canvas)
        .expand(SELECTION_PADDING);
    let outline = [r.left_top(), r.right_top(), r.right_bottom(), r.left_bottom(), r.left_top()];
    painter.extend(egui::Shape::dashed_line(
        &outline,
        Stroke::new(1.0, SELECTION_COLOR),
        4.0,
        3.0,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracery_core::shapes::NamedColor;

    #[test]
    fn test_named_colors_convert() {
        assert_eq!(color32(NamedColor::Black.to_color()), Color32::from_rgb(0, 0, 0));
        assert_eq!(color32(NamedColor::Red.to_color()), Color32::from_rgb(255, 0, 0));
        assert_eq!(color32(NamedColor::Green.to_color()), Color32::from_rgb(0, 128, 0));
        assert_eq!(color32(NamedColor::Blue.to_color()), Color32::from_rgb(0, 0, 255));
    }

    #[test]
    fn test_corner_radius_clamped() {
        let big = Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(100.0, 100.0));
        assert_eq!(corner_radius(8.0, big), 8.0);

        let thin = Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(100.0, 6.0));
        assert_eq!(corner_radius(8.0, thin), 3.0);
    }

    #[test]
    fn test_style_from_config() {
        let style = RenderStyle::from_config(&EditorConfig::default());
        assert_eq!(style.stroke_width, 1.0);
        assert_eq!(style.highlight_width, 3.0);
        assert_eq!(style.corner_radius, 8.0);
    }
}
