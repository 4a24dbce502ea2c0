//! Line-oriented text format.
//!
//! One shape per line:
//!
//! ```text
//! <type> <x1> <y1> <x2> <y2> <color-code> [<corner-style>]
//! ```
//!
//! Bad lines are skipped and reported, never fatal.

use crate::canvas::Drawing;
use crate::shapes::{CornerStyle, NamedColor, Shape, ShapeKind};
use kurbo::Point;
use thiserror::Error;

/// Minimum number of whitespace-separated fields in a shape line.
pub const MIN_FIELDS: usize = 6;

/// Why a line was not loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("expected at least 6 fields, found {0}")]
    TooFewFields(usize),
    #[error("unknown shape type '{0}'")]
    UnknownType(String),
    #[error("invalid coordinate '{0}'")]
    BadCoordinate(String),
    #[error("unknown corner style '{0}'")]
    BadCornerStyle(String),
}

/// A line that was skipped while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line_number: usize,
    pub content: String,
    pub reason: SkipReason,
}

/// Result of parsing a text drawing.
#[derive(Debug, Clone, Default)]
pub struct TextLoad {
    pub drawing: Drawing,
    pub skipped: Vec<SkippedLine>,
}

/// Parse a whole drawing. Shapes are stacked in file order.
pub fn parse(input: &str) -> TextLoad {
    let mut load = TextLoad::default();
    for (index, line) in input.lines().enumerate() {
        match parse_line(line) {
            Ok(shape) => {
                load.drawing.add_shape(shape);
            }
            Err(reason) => {
                log::warn!("Skipped line {}: {} ({:?})", index + 1, reason, line);
                load.skipped.push(SkippedLine {
                    line_number: index + 1,
                    content: line.to_string(),
                    reason,
                });
            }
        }
    }
    load
}

/// Parse a single shape line.
pub fn parse_line(line: &str) -> Result<Shape, SkipReason> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < MIN_FIELDS {
        return Err(SkipReason::TooFewFields(fields.len()));
    }

    let kind: ShapeKind = fields[0]
        .parse()
        .map_err(|_| SkipReason::UnknownType(fields[0].to_string()))?;

    let mut coords = [0.0; 4];
    for (slot, field) in coords.iter_mut().zip(&fields[1..5]) {
        *slot = field
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| SkipReason::BadCoordinate(field.to_string()))?;
    }

    let color = NamedColor::from_code(fields[5]).unwrap_or_else(|| {
        log::debug!("Unknown color code '{}', using black", fields[5]);
        NamedColor::Black
    });

    let mut shape = Shape::from_points(
        kind,
        Point::new(coords[0], coords[1]),
        Point::new(coords[2], coords[3]),
        color,
    );

    if kind == ShapeKind::Rectangle {
        if let Some(field) = fields.get(6) {
            let corner: CornerStyle = field
                .parse()
                .map_err(|_| SkipReason::BadCornerStyle(field.to_string()))?;
            shape.set_corner_style(corner);
        }
    }

    Ok(shape)
}

/// Format one shape as a text line (without trailing newline).
///
/// Coordinates are truncated to integers. The corner style is only written
/// for round-cornered rectangles.
pub fn format_shape(shape: &Shape) -> String {
    let [x1, y1, x2, y2] = shape.coords().map(|v| v.trunc() as i64);
    let mut line = format!(
        "{} {} {} {} {} {}",
        shape.kind(),
        x1,
        y1,
        x2,
        y2,
        shape.color().code()
    );
    if let Some(CornerStyle::Round) = shape.corner_style() {
        line.push(' ');
        line.push_str(CornerStyle::Round.as_str());
    }
    line
}

/// Serialize a drawing, one line per shape in z-order.
pub fn write(drawing: &Drawing) -> String {
    let mut out = String::new();
    for shape in drawing.shapes_ordered() {
        out.push_str(&format_shape(shape));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Line, Rectangle};

    #[test]
    fn test_parse_line_and_rectangle() {
        let load = parse("line 10 20 30 40 r\nrectangle 5 6 50 60 b\n");
        assert!(load.skipped.is_empty());
        assert_eq!(load.drawing.len(), 2);

        let shapes: Vec<&Shape> = load.drawing.shapes_ordered().collect();
        assert_eq!(shapes[0].kind(), ShapeKind::Line);
        assert_eq!(shapes[0].coords(), [10.0, 20.0, 30.0, 40.0]);
        assert_eq!(shapes[0].color(), NamedColor::Red);
        assert_eq!(shapes[1].kind(), ShapeKind::Rectangle);
        assert_eq!(shapes[1].color(), NamedColor::Blue);
        assert_eq!(shapes[1].corner_style(), Some(CornerStyle::Square));
    }

    #[test]
    fn test_short_lines_are_skipped() {
        let load = parse("line 1 2 3 4 k\nline 1 2 3\n\nrectangle 0 0 9 9 g\n");

        assert_eq!(load.drawing.len(), 2);
        assert_eq!(load.skipped.len(), 2);
        assert_eq!(load.skipped[0].line_number, 2);
        assert_eq!(load.skipped[0].reason, SkipReason::TooFewFields(4));
        assert_eq!(load.skipped[1].line_number, 3);
        assert_eq!(load.skipped[1].reason, SkipReason::TooFewFields(0));
    }

    #[test]
    fn test_unknown_type_and_bad_numbers_are_skipped() {
        let load = parse("circle 1 2 3 4 k\nline a 2 3 4 k\nline 1 2 3 4 k\n");

        assert_eq!(load.drawing.len(), 1);
        assert_eq!(
            load.skipped[0].reason,
            SkipReason::UnknownType("circle".to_string())
        );
        assert_eq!(
            load.skipped[1].reason,
            SkipReason::BadCoordinate("a".to_string())
        );
    }

    #[test]
    fn test_unknown_color_defaults_to_black() {
        let shape = parse_line("line 0 0 1 1 z").unwrap();
        assert_eq!(shape.color(), NamedColor::Black);
    }

    #[test]
    fn test_rect_alias_and_corner_field() {
        let shape = parse_line("rect 0 0 10 10 g round").unwrap();
        assert_eq!(shape.kind(), ShapeKind::Rectangle);
        assert_eq!(shape.corner_style(), Some(CornerStyle::Round));

        assert_eq!(
            parse_line("rectangle 0 0 10 10 g wavy"),
            Err(SkipReason::BadCornerStyle("wavy".to_string()))
        );
        // Lines have no corners; the extra field is ignored
        assert!(parse_line("line 0 0 10 10 g wavy").is_ok());
    }

    #[test]
    fn test_decimal_coordinates_accepted() {
        let shape = parse_line("line 1.5 2 3 4.75 k").unwrap();
        assert_eq!(shape.coords(), [1.5, 2.0, 3.0, 4.75]);
        assert_eq!(format_shape(&shape), "line 1 2 3 4 k");
    }

    #[test]
    fn test_format_shape() {
        let line = Shape::Line(Line::new(Point::new(10.0, 20.0), Point::new(30.0, 40.0)));
        assert_eq!(format_shape(&line), "line 10 20 30 40 k");

        let rect = Shape::Rectangle(
            Rectangle::new(Point::new(1.0, 2.0), Point::new(3.0, 4.0))
                .with_color(NamedColor::Green)
                .with_corner_style(CornerStyle::Round),
        );
        assert_eq!(format_shape(&rect), "rectangle 1 2 3 4 g round");
    }

    #[test]
    fn test_round_trip() {
        let drawing = Drawing::from_shapes([
            Shape::Line(Line::new(Point::new(0.0, 0.0), Point::new(100.0, 50.0)).with_color(NamedColor::Red)),
            Shape::Rectangle(Rectangle::new(Point::new(80.0, 90.0), Point::new(10.0, 20.0))),
            Shape::Rectangle(
                Rectangle::new(Point::new(5.0, 5.0), Point::new(25.0, 25.0))
                    .with_color(NamedColor::Blue)
                    .with_corner_style(CornerStyle::Round),
            ),
        ]);

        let text = write(&drawing);
        let load = parse(&text);

        assert!(load.skipped.is_empty());
        assert!(load.drawing.is_equivalent(&drawing));
    }
}
