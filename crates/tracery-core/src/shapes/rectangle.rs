//! Rectangle shape.

use super::{NamedColor, ShapeId, ShapeTrait, point_to_segment_dist};
use kurbo::{Affine, Point, Rect};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// How rectangle corners are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CornerStyle {
    #[default]
    Square,
    Round,
}

impl CornerStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            CornerStyle::Square => "square",
            CornerStyle::Round => "round",
        }
    }
}

impl fmt::Display for CornerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CornerStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "square" => Ok(CornerStyle::Square),
            "round" | "rounded" => Ok(CornerStyle::Round),
            other => Err(format!("unknown corner style '{}'", other)),
        }
    }
}

/// An unfilled, axis-aligned rectangle.
///
/// The two corners are kept exactly as drawn; [`Rectangle::as_rect`] gives
/// the normalized form.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Corner where drawing started.
    pub start: Point,
    /// Opposite corner.
    pub end: Point,
    /// Outline color.
    pub color: NamedColor,
    /// Corner style.
    pub corner_style: CornerStyle,
}

impl Rectangle {
    /// Create a new black, square-cornered rectangle from two corners.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            color: NamedColor::default(),
            corner_style: CornerStyle::default(),
        }
    }

    pub fn with_color(mut self, color: NamedColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_corner_style(mut self, corner_style: CornerStyle) -> Self {
        self.corner_style = corner_style;
        self
    }

    /// Get the rectangle as a normalized kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    pub fn upper_left(&self) -> Point {
        let rect = self.as_rect();
        Point::new(rect.x0, rect.y0)
    }

    pub fn lower_right(&self) -> Point {
        let rect = self.as_rect();
        Point::new(rect.x1, rect.y1)
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn distance_to(&self, point: Point) -> f64 {
        // Outline only: the interior is not part of the shape.
        let r = self.as_rect();
        let corners = [
            Point::new(r.x0, r.y0),
            Point::new(r.x1, r.y0),
            Point::new(r.x1, r.y1),
            Point::new(r.x0, r.y1),
        ];
        (0..4)
            .map(|i| point_to_segment_dist(point, corners[i], corners[(i + 1) % 4]))
            .fold(f64::INFINITY, f64::min)
    }

    fn color(&self) -> NamedColor {
        self.color
    }

    fn set_color(&mut self, color: NamedColor) {
        self.color = color;
    }

    fn transform(&mut self, affine: Affine) {
        self.start = affine * self.start;
        self.end = affine * self.end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_creation() {
        let rect = Rectangle::new(Point::new(10.0, 20.0), Point::new(110.0, 70.0));
        assert_eq!(rect.color, NamedColor::Black);
        assert_eq!(rect.corner_style, CornerStyle::Square);
    }

    #[test]
    fn test_rectangle_normalized_corners() {
        let rect = Rectangle::new(Point::new(100.0, 100.0), Point::new(50.0, 40.0));
        assert_eq!(rect.upper_left(), Point::new(50.0, 40.0));
        assert_eq!(rect.lower_right(), Point::new(100.0, 100.0));
        // Drawn corners are preserved
        assert_eq!(rect.start, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_distance_to_outline_only() {
        let rect = Rectangle::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        assert!(rect.distance_to(Point::new(50.0, 0.0)) < f64::EPSILON);
        assert!((rect.distance_to(Point::new(105.0, 50.0)) - 5.0).abs() < f64::EPSILON);
        assert!((rect.distance_to(Point::new(92.0, 50.0)) - 8.0).abs() < f64::EPSILON);
        // Center is far from every edge
        assert!((rect.distance_to(Point::new(50.0, 50.0)) - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds() {
        let rect = Rectangle::new(Point::new(10.0, 20.0), Point::new(110.0, 70.0));
        let bounds = rect.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 110.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_corner_style_parse() {
        assert_eq!("square".parse::<CornerStyle>(), Ok(CornerStyle::Square));
        assert_eq!("round".parse::<CornerStyle>(), Ok(CornerStyle::Round));
        assert!("bevel".parse::<CornerStyle>().is_err());
    }
}
