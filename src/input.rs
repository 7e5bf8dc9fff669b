use egui::{Event, PointerButton, Pos2, TouchPhase};

/// One finger currently on the screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub pos: Pos2,
}

/// Where a pointer event came from, with its raw coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum PointerSource {
    Mouse(Pos2),
    /// Active touches, oldest first
    Touch(Vec<TouchPoint>),
}

/// Collapses mouse and touch input into a single viewport position.
///
/// Touches use the first active point. An empty touch list yields `None`.
pub fn unify(source: &PointerSource) -> Option<Pos2> {
    match source {
        PointerSource::Mouse(pos) => Some(*pos),
        PointerSource::Touch(touches) => touches.first().map(|t| t.pos),
    }
}

/// Pointer events the overlay layers react to
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed or a first finger touched down
    PointerDown(PointerSource),
    /// Pointer moved, with or without a button held
    PointerMove(PointerSource),
    /// Primary button released or a finger lifted
    PointerUp,
    /// Pointer left the window; anything in progress ends as if released
    PointerGone,
}

impl InputEvent {
    /// Unified position of this event, if it carries one
    pub fn position(&self) -> Option<Pos2> {
        match self {
            InputEvent::PointerDown(source) | InputEvent::PointerMove(source) => unify(source),
            InputEvent::PointerUp | InputEvent::PointerGone => None,
        }
    }
}

/// Converts raw egui events into [`InputEvent`]s
#[derive(Debug, Default)]
pub struct InputHandler {
    active_touches: Vec<TouchPoint>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_touches(&self) -> &[TouchPoint] {
        &self.active_touches
    }

    /// Reads this frame's raw events from egui
    pub fn process_input(&mut self, ctx: &egui::Context) -> Vec<InputEvent> {
        let raw_events = ctx.input(|input| input.events.clone());
        self.process_events(&raw_events)
    }

    pub fn process_events(&mut self, raw_events: &[Event]) -> Vec<InputEvent> {
        let mut events = Vec::new();

        // egui also emits pointer events synthesized from touches; only keep one of the two.
        let has_touch = raw_events.iter().any(|e| matches!(e, Event::Touch { .. }));
        let mouse_allowed = !has_touch && self.active_touches.is_empty();

        for event in raw_events {
            match event {
                Event::Touch { id, phase, pos, .. } => {
                    self.handle_touch(id.0, *phase, *pos, &mut events);
                }
                Event::PointerMoved(pos) if mouse_allowed => {
                    events.push(InputEvent::PointerMove(PointerSource::Mouse(*pos)));
                }
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } if mouse_allowed => {
                    events.push(if *pressed {
                        InputEvent::PointerDown(PointerSource::Mouse(*pos))
                    } else {
                        InputEvent::PointerUp
                    });
                }
                Event::PointerGone => events.push(InputEvent::PointerGone),
                _ => {}
            }
        }

        events
    }

    fn handle_touch(&mut self, id: u64, phase: TouchPhase, pos: Pos2, events: &mut Vec<InputEvent>) {
        match phase {
            TouchPhase::Start => {
                self.active_touches.retain(|t| t.id != id);
                self.active_touches.push(TouchPoint { id, pos });
                if self.active_touches.len() == 1 {
                    events.push(InputEvent::PointerDown(PointerSource::Touch(
                        self.active_touches.clone(),
                    )));
                }
            }
            TouchPhase::Move => {
                if let Some(touch) = self.active_touches.iter_mut().find(|t| t.id == id) {
                    touch.pos = pos;
                } else {
                    log::trace!("Move for unknown touch {id}");
                }
                events.push(InputEvent::PointerMove(PointerSource::Touch(
                    self.active_touches.clone(),
                )));
            }
            TouchPhase::End | TouchPhase::Cancel => {
                self.active_touches.retain(|t| t.id != id);
                events.push(InputEvent::PointerUp);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Modifiers, TouchDeviceId, TouchId, pos2};

    fn touch(id: u64, phase: TouchPhase, pos: Pos2) -> Event {
        Event::Touch {
            device_id: TouchDeviceId(0),
            id: TouchId(id),
            phase,
            pos,
            force: None,
        }
    }

    fn button(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn test_unify_mouse() {
        assert_eq!(unify(&PointerSource::Mouse(pos2(3.0, 4.0))), Some(pos2(3.0, 4.0)));
    }

    #[test]
    fn test_unify_uses_first_touch() {
        let touches = vec![
            TouchPoint { id: 1, pos: pos2(1.0, 2.0) },
            TouchPoint { id: 2, pos: pos2(9.0, 9.0) },
        ];
        assert_eq!(unify(&PointerSource::Touch(touches)), Some(pos2(1.0, 2.0)));
    }

    #[test]
    fn test_unify_empty_touch_list() {
        assert_eq!(unify(&PointerSource::Touch(Vec::new())), None);
    }

    #[test]
    fn test_mouse_events() {
        let mut handler = InputHandler::new();
        let events = handler.process_events(&[
            button(pos2(1.0, 1.0), true),
            Event::PointerMoved(pos2(2.0, 2.0)),
            button(pos2(2.0, 2.0), false),
        ]);
        assert_eq!(
            events,
            vec![
                InputEvent::PointerDown(PointerSource::Mouse(pos2(1.0, 1.0))),
                InputEvent::PointerMove(PointerSource::Mouse(pos2(2.0, 2.0))),
                InputEvent::PointerUp,
            ]
        );
    }

    #[test]
    fn test_secondary_button_ignored() {
        let mut handler = InputHandler::new();
        let events = handler.process_events(&[Event::PointerButton {
            pos: pos2(1.0, 1.0),
            button: PointerButton::Secondary,
            pressed: true,
            modifiers: Modifiers::default(),
        }]);
        assert!(events.is_empty());
    }

    #[test]
    fn test_synthesized_pointer_events_are_dropped() {
        let mut handler = InputHandler::new();
        let events = handler.process_events(&[
            touch(7, TouchPhase::Start, pos2(5.0, 5.0)),
            Event::PointerMoved(pos2(5.0, 5.0)),
            button(pos2(5.0, 5.0), true),
        ]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].position(), Some(pos2(5.0, 5.0)));

        // Still touching, a lone synthesized move in a later frame is ignored too
        let events = handler.process_events(&[Event::PointerMoved(pos2(6.0, 6.0))]);
        assert!(events.is_empty());
    }

    #[test]
    fn test_touch_lifecycle() {
        let mut handler = InputHandler::new();
        handler.process_events(&[touch(1, TouchPhase::Start, pos2(0.0, 0.0))]);
        let events = handler.process_events(&[touch(1, TouchPhase::Move, pos2(4.0, 3.0))]);
        assert_eq!(events[0].position(), Some(pos2(4.0, 3.0)));

        let events = handler.process_events(&[touch(1, TouchPhase::End, pos2(4.0, 3.0))]);
        assert_eq!(events, vec![InputEvent::PointerUp]);
        assert!(handler.active_touches().is_empty());
    }

    #[test]
    fn test_move_for_unknown_touch_has_no_position() {
        let mut handler = InputHandler::new();
        let events = handler.process_events(&[touch(3, TouchPhase::Move, pos2(4.0, 3.0))]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].position(), None);
    }

    #[test]
    fn test_second_finger_does_not_restart() {
        let mut handler = InputHandler::new();
        handler.process_events(&[touch(1, TouchPhase::Start, pos2(0.0, 0.0))]);
        let events = handler.process_events(&[touch(2, TouchPhase::Start, pos2(50.0, 50.0))]);
        assert!(events.is_empty());

        let events = handler.process_events(&[touch(2, TouchPhase::Move, pos2(60.0, 60.0))]);
        assert_eq!(events[0].position(), Some(pos2(0.0, 0.0)));
    }

    #[test]
    fn test_pointer_gone_is_reported() {
        let mut handler = InputHandler::new();
        let events = handler.process_events(&[
            button(pos2(1.0, 1.0), true),
            Event::PointerMoved(pos2(900.0, 2.0)),
            Event::PointerGone,
        ]);
        assert_eq!(events.last(), Some(&InputEvent::PointerGone));
        assert_eq!(events.last().unwrap().position(), None);
    }
}
