//! Line shape.

use super::{NamedColor, ShapeId, ShapeTrait, point_to_segment_dist};
use kurbo::{Affine, Point, Rect};
use uuid::Uuid;

/// A straight line segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub(crate) id: ShapeId,
    /// Start point (the press anchor).
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Stroke color.
    pub color: NamedColor,
}

impl Line {
    /// Create a new black line.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            color: NamedColor::default(),
        }
    }

    pub fn with_color(mut self, color: NamedColor) -> Self {
        self.color = color;
        self
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    fn distance_to(&self, point: Point) -> f64 {
        point_to_segment_dist(point, self.start, self.end)
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
    fn test_line_creation() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert_eq!(line.start, Point::new(0.0, 0.0));
        assert_eq!(line.end, Point::new(100.0, 0.0));
        assert_eq!(line.color, NamedColor::Black);
    }

    #[test]
    fn test_distance_to_segment() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(line.distance_to(Point::new(50.0, 0.0)) < f64::EPSILON);
        assert!((line.distance_to(Point::new(50.0, 2.0)) - 2.0).abs() < f64::EPSILON);
        assert!((line.distance_to(Point::new(50.0, -20.0)) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_distance_past_endpoints() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(line.distance_to(Point::new(100.0, 0.0)) < f64::EPSILON);
        assert!((line.distance_to(Point::new(110.0, 0.0)) - 10.0).abs() < f64::EPSILON);
        assert!((line.distance_to(Point::new(-3.0, 4.0)) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds() {
        let line = Line::new(Point::new(50.0, 80.0), Point::new(10.0, 20.0));
        let bounds = line.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 50.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_translate() {
        let mut line = Line::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        line.transform(Affine::translate((5.0, -5.0)));
        assert_eq!(line.start, Point::new(5.0, -5.0));
        assert_eq!(line.end, Point::new(15.0, 5.0));
    }
}
