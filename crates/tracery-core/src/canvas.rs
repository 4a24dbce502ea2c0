//! Drawing document: the shape registry.

use crate::shapes::{Shape, ShapeId};
use kurbo::Point;
use std::collections::HashMap;

/// All shapes in a drawing, keyed by ID, plus their stacking order.
#[derive(Debug, Clone, Default)]
pub struct Drawing {
    /// All shapes in the drawing, keyed by ID.
    pub shapes: HashMap<ShapeId, Shape>,
    /// Z-order of shapes (back to front). New shapes go on top.
    pub z_order: Vec<ShapeId>,
}

impl Drawing {
    /// Create a new empty drawing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a drawing from shapes, stacked in iteration order.
    #[cfg(test)]
    pub fn from_shapes(shapes: impl IntoIterator<Item = Shape>) -> Self {
        let mut drawing = Self::new();
        for shape in shapes {
            drawing.add_shape(shape);
        }
        drawing
    }

    /// Add a shape on top of the drawing.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        if self.shapes.insert(id, shape).is_none() {
            self.z_order.push(id);
        }
        id
    }

    /// Remove a shape from the drawing.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        self.z_order.retain(|&shape_id| shape_id != id);
        self.shapes.remove(&id)
    }

    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    /// Get shapes in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Sort `ids` into z-order, dropping any that are not in the drawing.
    pub fn in_z_order(&self, ids: impl IntoIterator<Item = ShapeId>) -> Vec<ShapeId> {
        let wanted: Vec<ShapeId> = ids.into_iter().collect();
        self.z_order
            .iter()
            .copied()
            .filter(|id| wanted.contains(id))
            .collect()
    }

    /// Find the shape nearest to `point` within `radius`.
    /// On equal distance the topmost shape wins.
    pub fn nearest_shape(&self, point: Point, radius: f64) -> Option<ShapeId> {
        let mut best: Option<(ShapeId, f64)> = None;
        for &id in self.z_order.iter().rev() {
            let Some(shape) = self.shapes.get(&id) else {
                continue;
            };
            let dist = shape.distance_to(point);
            if dist > radius {
                continue;
            }
            if best.is_none_or(|(_, best_dist)| dist < best_dist) {
                best = Some((id, dist));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Check if the drawing is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether both drawings hold equivalent shapes in the same order.
    pub fn is_equivalent(&self, other: &Drawing) -> bool {
        self.len() == other.len()
            && self
                .shapes_ordered()
                .zip(other.shapes_ordered())
                .all(|(a, b)| a.is_equivalent(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Line, NamedColor, Rectangle};

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Shape {
        Shape::Rectangle(Rectangle::new(Point::new(x0, y0), Point::new(x1, y1)))
    }

    #[test]
    fn test_drawing_creation() {
        let drawing = Drawing::new();
        assert!(drawing.is_empty());
        assert_eq!(drawing.nearest_shape(Point::ZERO, 10.0), None);
    }

    #[test]
    fn test_add_shape() {
        let mut drawing = Drawing::new();
        let id = drawing.add_shape(rect(0.0, 0.0, 100.0, 100.0));

        assert_eq!(drawing.len(), 1);
        assert!(drawing.get_shape(id).is_some());
        assert_eq!(drawing.z_order, vec![id]);
    }

    #[test]
    fn test_remove_shape() {
        let mut drawing = Drawing::new();
        let id = drawing.add_shape(rect(0.0, 0.0, 100.0, 100.0));

        let removed = drawing.remove_shape(id);

        assert!(removed.is_some());
        assert!(drawing.is_empty());
        assert!(drawing.z_order.is_empty());
    }

    #[test]
    fn test_nearest_shape_within_radius() {
        let mut drawing = Drawing::new();
        let line = drawing.add_shape(Shape::Line(Line::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        )));
        let r = drawing.add_shape(rect(0.0, 50.0, 100.0, 100.0));

        assert_eq!(drawing.nearest_shape(Point::new(50.0, 4.0), 10.0), Some(line));
        assert_eq!(drawing.nearest_shape(Point::new(50.0, 44.0), 10.0), Some(r));
        assert_eq!(drawing.nearest_shape(Point::new(50.0, 25.0), 10.0), None);
    }

    #[test]
    fn test_nearest_shape_prefers_closest() {
        let mut drawing = Drawing::new();
        let low = drawing.add_shape(Shape::Line(Line::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        )));
        let _high = drawing.add_shape(Shape::Line(Line::new(
            Point::new(0.0, 8.0),
            Point::new(100.0, 8.0),
        )));

        assert_eq!(drawing.nearest_shape(Point::new(50.0, 2.0), 10.0), Some(low));
    }

    #[test]
    fn test_nearest_shape_tie_goes_to_top() {
        let mut drawing = Drawing::new();
        let _bottom = drawing.add_shape(rect(0.0, 0.0, 100.0, 100.0));
        let top = drawing.add_shape(rect(0.0, 0.0, 100.0, 100.0));

        assert_eq!(drawing.nearest_shape(Point::new(0.0, 50.0), 10.0), Some(top));
    }

    #[test]
    fn test_nearest_shape_ignores_removed() {
        let mut drawing = Drawing::new();
        let bottom = drawing.add_shape(rect(0.0, 0.0, 100.0, 100.0));
        let top = drawing.add_shape(rect(50.0, 0.0, 150.0, 100.0));

        assert_eq!(drawing.nearest_shape(Point::new(75.0, 0.0), 0.0), Some(top));
        drawing.remove_shape(top);
        assert_eq!(drawing.nearest_shape(Point::new(75.0, 0.0), 0.0), Some(bottom));
    }

    #[test]
    fn test_in_z_order() {
        let mut drawing = Drawing::new();
        let a = drawing.add_shape(rect(0.0, 0.0, 1.0, 1.0));
        let b = drawing.add_shape(rect(0.0, 0.0, 2.0, 2.0));
        let c = drawing.add_shape(rect(0.0, 0.0, 3.0, 3.0));

        assert_eq!(drawing.in_z_order([c, a, uuid::Uuid::new_v4()]), vec![a, c]);
        assert_eq!(drawing.in_z_order([b]), vec![b]);
    }

    #[test]
    fn test_equivalence_ignores_ids() {
        let a = Drawing::from_shapes([Shape::from_points(
            crate::shapes::ShapeKind::Line,
            Point::new(1.0, 2.0),
            Point::new(3.0, 4.0),
            NamedColor::Blue,
        )]);
        let b = Drawing::from_shapes([Shape::from_points(
            crate::shapes::ShapeKind::Line,
            Point::new(1.0, 2.0),
            Point::new(3.0, 4.0),
            NamedColor::Blue,
        )]);
        assert!(a.is_equivalent(&b));
    }
}
