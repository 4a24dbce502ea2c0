//! XML export (write-only).

use crate::canvas::Drawing;
use crate::shapes::{Line, Rectangle, Shape};
use kurbo::Point;

/// Root element name.
pub const ROOT_ELEMENT: &str = "Drawing";

/// Render the drawing as an XML document, shapes in z-order.
pub fn export(drawing: &Drawing) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&format!("<{}>\n", ROOT_ELEMENT));
    for shape in drawing.shapes_ordered() {
        match shape {
            Shape::Line(line) => write_line(&mut out, line),
            Shape::Rectangle(rect) => write_rectangle(&mut out, rect),
        }
    }
    out.push_str(&format!("</{}>\n", ROOT_ELEMENT));
    out
}

fn write_line(out: &mut String, line: &Line) {
    out.push_str("  <line>\n");
    write_point(out, "begin", line.start);
    write_point(out, "end", line.end);
    out.push_str(&format!("    <color>{}</color>\n", line.color.code()));
    out.push_str("  </line>\n");
}

fn write_rectangle(out: &mut String, rect: &Rectangle) {
    out.push_str("  <rectangle>\n");
    write_point(out, "upper-left", rect.upper_left());
    write_point(out, "lower-right", rect.lower_right());
    out.push_str(&format!("    <color>{}</color>\n", rect.color.code()));
    out.push_str(&format!("    <corner>{}</corner>\n", rect.corner_style));
    out.push_str("  </rectangle>\n");
}

fn write_point(out: &mut String, tag: &str, point: Point) {
    out.push_str(&format!(
        "    <{tag}><x>{}</x><y>{}</y></{tag}>\n",
        point.x, point.y
    ));
}
