use egui::{CursorIcon, Pos2, Vec2};

use super::Transformable;

/// Drag progress of one element
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Pointer position when the drag began
        start: Pos2,
        /// Element translation when the drag began
        initial_offset: Vec2,
    },
}

/// Per-element drag state machine.
///
/// Moves are applied relative to the element's offset at drag start, so each
/// drag continues from wherever the previous one left the element.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn on_drag_start(&mut self, pointer: Pos2, target: &mut dyn Transformable) {
        self.state = DragState::Dragging {
            start: pointer,
            initial_offset: target.translation(),
        };
        target.set_cursor(CursorIcon::Grabbing);
    }

    /// Moves the target if this controller is dragging.
    ///
    /// Returns true when the move was consumed, i.e. the page should not
    /// react to it otherwise.
    pub fn on_drag_move(&mut self, pointer: Pos2, target: &mut dyn Transformable) -> bool {
        let DragState::Dragging {
            start,
            initial_offset,
        } = self.state
        else {
            return false;
        };

        target.set_translation(initial_offset + (pointer - start));
        true
    }

    pub fn on_drag_end(&mut self, target: &mut dyn Transformable) {
        self.state = DragState::Idle;
        target.set_cursor(CursorIcon::Grab);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::Sticker;
    use egui::{Rect, pos2, vec2};

    fn sticker() -> Sticker {
        Sticker::new("test", Rect::from_min_size(pos2(80.0, 80.0), vec2(50.0, 50.0)))
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let mut sticker = sticker();
        let mut controller = DragController::new();
        assert!(!controller.on_drag_move(pos2(10.0, 10.0), &mut sticker));
        assert_eq!(sticker.translation(), Vec2::ZERO);
    }

    #[test]
    fn test_drag_applies_delta() {
        let mut sticker = sticker();
        let mut controller = DragController::new();

        controller.on_drag_start(pos2(100.0, 100.0), &mut sticker);
        assert_eq!(sticker.cursor(), CursorIcon::Grabbing);
        assert!(controller.on_drag_move(pos2(130.0, 110.0), &mut sticker));
        assert!(controller.on_drag_move(pos2(150.0, 120.0), &mut sticker));
        controller.on_drag_end(&mut sticker);

        assert_eq!(sticker.translation(), vec2(50.0, 20.0));
        assert_eq!(sticker.cursor(), CursorIcon::Grab);
        assert_eq!(controller.state(), DragState::Idle);
    }

    #[test]
    fn test_second_drag_reanchors() {
        let mut sticker = sticker();
        let mut controller = DragController::new();

        controller.on_drag_start(pos2(100.0, 100.0), &mut sticker);
        controller.on_drag_move(pos2(150.0, 120.0), &mut sticker);
        controller.on_drag_end(&mut sticker);

        controller.on_drag_start(pos2(150.0, 120.0), &mut sticker);
        controller.on_drag_move(pos2(140.0, 100.0), &mut sticker);
        controller.on_drag_end(&mut sticker);

        assert_eq!(sticker.translation(), vec2(40.0, 0.0));
    }

    #[test]
    fn test_offset_frozen_after_end() {
        let mut sticker = sticker();
        let mut controller = DragController::new();

        controller.on_drag_start(pos2(0.0, 0.0), &mut sticker);
        controller.on_drag_move(pos2(10.0, 10.0), &mut sticker);
        controller.on_drag_end(&mut sticker);
        assert!(!controller.on_drag_move(pos2(500.0, 500.0), &mut sticker));
        assert_eq!(sticker.translation(), vec2(10.0, 10.0));
    }
}
