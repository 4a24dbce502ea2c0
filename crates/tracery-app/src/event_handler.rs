//! Translates egui pointer input into canvas pointer events.

use egui::{Pos2, Rect};
use kurbo::Point;
use tracery_core::input::{Modifiers, PointerEvent};

/// Convert a screen position to canvas coordinates (origin at the canvas top-left).
pub fn to_canvas(pos: Pos2, canvas: Rect) -> Point {
    Point::new((pos.x - canvas.min.x) as f64, (pos.y - canvas.min.y) as f64)
}

/// Convert a canvas point back to screen space.
pub fn to_screen(point: Point, canvas: Rect) -> Pos2 {
    Pos2::new(canvas.min.x + point.x as f32, canvas.min.y + point.y as f32)
}

fn convert_modifiers(m: egui::Modifiers) -> Modifiers {
    Modifiers {
        shift: m.shift,
        ctrl: m.ctrl,
        alt: m.alt,
        meta: m.mac_cmd,
    }
}

/// Primary-button pointer state for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerSample {
    pub position: Option<Pos2>,
    pub pressed: bool,
    pub released: bool,
    pub modifiers: egui::Modifiers,
}

impl PointerSample {
    pub fn from_input(input: &egui::InputState) -> Self {
        Self {
            position: input.pointer.interact_pos(),
            pressed: input.pointer.primary_pressed(),
            released: input.pointer.primary_released(),
            modifiers: input.modifiers,
        }
    }
}

/// Tracks the pointer between press and release.
///
/// A press must land on the canvas, but once it does the pointer is captured
/// and drags and the release are reported even outside the canvas.
#[derive(Debug, Default)]
pub struct EventHandler {
    /// Last reported canvas position while the button is held.
    captured: Option<Point>,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_capturing(&self) -> bool {
        self.captured.is_some()
    }

    /// Drop the capture without reporting a release.
    pub fn reset(&mut self) {
        self.captured = None;
    }

    /// Turn one frame of input into events. `blocked` suppresses new presses,
    /// e.g. while a dialog is open or the pointer is over a menu.
    pub fn translate(&mut self, sample: PointerSample, canvas: Rect, blocked: bool) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        let Some(screen_pos) = sample.position else {
            if sample.released {
                if let Some(last) = self.captured.take() {
                    events.push(PointerEvent::Up { position: last });
                }
            }
            return events;
        };
        let position = to_canvas(screen_pos, canvas);

        if sample.pressed && !blocked && self.captured.is_none() && canvas.contains(screen_pos) {
            self.captured = Some(position);
            events.push(PointerEvent::Down {
                position,
                modifiers: convert_modifiers(sample.modifiers),
            });
        } else if let Some(last) = self.captured {
            if last != position {
                self.captured = Some(position);
                events.push(PointerEvent::Drag { position });
            }
        }

        if sample.released && self.captured.take().is_some() {
            events.push(PointerEvent::Up { position });
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Rect {
        Rect::from_min_size(Pos2::new(0.0, 20.0), egui::vec2(800.0, 600.0))
    }

    fn at(x: f32, y: f32) -> PointerSample {
        PointerSample {
            position: Some(Pos2::new(x, y)),
            ..Default::default()
        }
    }

    #[test]
    fn test_press_drag_release() {
        let mut handler = EventHandler::new();

        let down = handler.translate(PointerSample { pressed: true, ..at(10.0, 30.0) }, canvas(), false);
        assert_eq!(
            down,
            vec![PointerEvent::Down {
                position: Point::new(10.0, 10.0),
                modifiers: Modifiers::NONE,
            }]
        );
        assert!(handler.is_capturing());

        let drag = handler.translate(at(20.0, 40.0), canvas(), false);
        assert_eq!(drag, vec![PointerEvent::Drag { position: Point::new(20.0, 20.0) }]);

        // No movement, no event
        assert!(handler.translate(at(20.0, 40.0), canvas(), false).is_empty());

        let up = handler.translate(PointerSample { released: true, ..at(20.0, 40.0) }, canvas(), false);
        assert_eq!(up, vec![PointerEvent::Up { position: Point::new(20.0, 20.0) }]);
        assert!(!handler.is_capturing());
    }

    #[test]
    fn test_press_outside_canvas_ignored() {
        let mut handler = EventHandler::new();
        let events = handler.translate(PointerSample { pressed: true, ..at(10.0, 5.0) }, canvas(), false);
        assert!(events.is_empty());
        assert!(!handler.is_capturing());
    }

    #[test]
    fn test_blocked_press_ignored() {
        let mut handler = EventHandler::new();
        let events = handler.translate(PointerSample { pressed: true, ..at(10.0, 30.0) }, canvas(), true);
        assert!(events.is_empty());
    }

    #[test]
    fn test_capture_continues_outside_canvas() {
        let mut handler = EventHandler::new();
        handler.translate(PointerSample { pressed: true, ..at(10.0, 30.0) }, canvas(), false);

        let events = handler.translate(PointerSample { released: true, ..at(900.0, 0.0) }, canvas(), false);
        assert_eq!(
            events,
            vec![
                PointerEvent::Drag { position: Point::new(900.0, -20.0) },
                PointerEvent::Up { position: Point::new(900.0, -20.0) },
            ]
        );
    }

    #[test]
    fn test_click_in_one_frame() {
        let mut handler = EventHandler::new();
        let sample = PointerSample {
            pressed: true,
            released: true,
            modifiers: egui::Modifiers::CTRL,
            ..at(5.0, 25.0)
        };
        let events = handler.translate(sample, canvas(), false);

        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            PointerEvent::Down { modifiers, .. } if modifiers.ctrl
        ));
        assert!(matches!(events[1], PointerEvent::Up { .. }));
    }

    #[test]
    fn test_release_without_position_uses_last() {
        let mut handler = EventHandler::new();
        handler.translate(PointerSample { pressed: true, ..at(10.0, 30.0) }, canvas(), false);

        let sample = PointerSample { released: true, ..Default::default() };
        assert_eq!(
            handler.translate(sample, canvas(), false),
            vec![PointerEvent::Up { position: Point::new(10.0, 10.0) }]
        );
    }

    #[test]
    fn test_coordinate_mapping() {
        let p = to_canvas(Pos2::new(110.0, 70.0), canvas());
        assert_eq!(p, Point::new(110.0, 50.0));
        assert_eq!(to_screen(p, canvas()), Pos2::new(110.0, 70.0));
    }
}
