//! Shape definitions for the drawing.

mod line;
mod rectangle;

pub use line::Line;
pub use rectangle::{CornerStyle, Rectangle};

use kurbo::{Affine, Point, Rect, Vec2};
use peniko::Color;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// The four stroke colors a shape can carry.
///
/// Each color has a single-letter code used by the text format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NamedColor {
    #[default]
    Black,
    Red,
    Green,
    Blue,
}

impl NamedColor {
    /// All colors, in menu order.
    pub const ALL: [NamedColor; 4] = [
        NamedColor::Black,
        NamedColor::Red,
        NamedColor::Green,
        NamedColor::Blue,
    ];

    /// Single-letter code used in saved drawings.
    pub fn code(self) -> char {
        match self {
            NamedColor::Black => 'k',
            NamedColor::Red => 'r',
            NamedColor::Green => 'g',
            NamedColor::Blue => 'b',
        }
    }

    /// Look up a color by its code. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "k" => Some(NamedColor::Black),
            "r" => Some(NamedColor::Red),
            "g" => Some(NamedColor::Green),
            "b" => Some(NamedColor::Blue),
            _ => None,
        }
    }

    /// Lowercase color name.
    pub fn name(self) -> &'static str {
        match self {
            NamedColor::Black => "black",
            NamedColor::Red => "red",
            NamedColor::Green => "green",
            NamedColor::Blue => "blue",
        }
    }

    /// RGBA color for rendering.
    pub fn to_color(self) -> Color {
        match self {
            NamedColor::Black => Color::from_rgba8(0, 0, 0, 255),
            NamedColor::Red => Color::from_rgba8(255, 0, 0, 255),
            NamedColor::Green => Color::from_rgba8(0, 128, 0, 255),
            NamedColor::Blue => Color::from_rgba8(0, 0, 255, 255),
        }
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<NamedColor> for Color {
    fn from(color: NamedColor) -> Self {
        color.to_color()
    }
}

/// Kind of a shape, as named in saved drawings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Line,
    Rectangle,
}

impl ShapeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::Rectangle => "rectangle",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(ShapeKind::Line),
            "rectangle" | "rect" => Ok(ShapeKind::Rectangle),
            other => Err(format!("unknown shape type '{}'", other)),
        }
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Distance from a point to the stroked outline of the shape.
    fn distance_to(&self, point: Point) -> f64;

    fn color(&self) -> NamedColor;

    fn set_color(&mut self, color: NamedColor);

    /// Apply a transform to this shape.
    fn transform(&mut self, affine: Affine);
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line(Line),
    Rectangle(Rectangle),
}

impl Shape {
    /// Build a shape of `kind` from its two defining points.
    pub fn from_points(kind: ShapeKind, start: Point, end: Point, color: NamedColor) -> Self {
        match kind {
            ShapeKind::Line => Shape::Line(Line::new(start, end).with_color(color)),
            ShapeKind::Rectangle => Shape::Rectangle(Rectangle::new(start, end).with_color(color)),
        }
    }

    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Line(s) => s.id(),
            Shape::Rectangle(s) => s.id(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Line(_) => ShapeKind::Line,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Line(s) => s.bounds(),
            Shape::Rectangle(s) => s.bounds(),
        }
    }

    pub fn distance_to(&self, point: Point) -> f64 {
        match self {
            Shape::Line(s) => s.distance_to(point),
            Shape::Rectangle(s) => s.distance_to(point),
        }
    }

    pub fn color(&self) -> NamedColor {
        match self {
            Shape::Line(s) => s.color(),
            Shape::Rectangle(s) => s.color(),
        }
    }

    pub fn set_color(&mut self, color: NamedColor) {
        match self {
            Shape::Line(s) => s.set_color(color),
            Shape::Rectangle(s) => s.set_color(color),
        }
    }

    /// Corner style of a rectangle; `None` for lines.
    pub fn corner_style(&self) -> Option<CornerStyle> {
        match self {
            Shape::Rectangle(r) => Some(r.corner_style),
            Shape::Line(_) => None,
        }
    }

    /// Set the corner style. Lines have no corners and ignore it.
    pub fn set_corner_style(&mut self, style: CornerStyle) {
        if let Shape::Rectangle(r) = self {
            r.corner_style = style;
        }
    }

    pub fn transform(&mut self, affine: Affine) {
        match self {
            Shape::Line(s) => s.transform(affine),
            Shape::Rectangle(s) => s.transform(affine),
        }
    }

    /// Move the shape by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        self.transform(Affine::translate(delta));
    }

    /// The two defining points, as drawn.
    pub fn endpoints(&self) -> (Point, Point) {
        match self {
            Shape::Line(l) => (l.start, l.end),
            Shape::Rectangle(r) => (r.start, r.end),
        }
    }

    /// Replace the second defining point (the one that follows the pointer while drawing).
    pub fn set_end(&mut self, end: Point) {
        match self {
            Shape::Line(l) => l.end = end,
            Shape::Rectangle(r) => r.end = end,
        }
    }

    /// Coordinates as `[x1, y1, x2, y2]`.
    pub fn coords(&self) -> [f64; 4] {
        let (a, b) = self.endpoints();
        [a.x, a.y, b.x, b.y]
    }

    /// Regenerate the shape's ID with a new unique identifier.
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            Shape::Line(s) => s.id = new_id,
            Shape::Rectangle(s) => s.id = new_id,
        }
    }

    /// Clone this shape under a fresh ID, offset by `offset`.
    pub fn duplicate(&self, offset: Vec2) -> Self {
        let mut copy = self.clone();
        copy.regenerate_id();
        copy.translate(offset);
        copy
    }

    /// Same kind, coordinates, color and corner style, ignoring the ID.
    pub fn is_equivalent(&self, other: &Shape) -> bool {
        self.kind() == other.kind()
            && self.coords() == other.coords()
            && self.color() == other.color()
            && self.corner_style() == other.corner_style()
    }
}
