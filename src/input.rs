use egui::{Context, Key, KeyboardShortcut, Modifiers, Pos2, Rect};

/// Input relevant to the drawing app, in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the canvas
    PointerDown { pos: Pos2 },
    /// Pointer moved while a stroke is being drawn
    PointerMove { pos: Pos2 },
    /// Primary button released, or the pointer left the window mid-stroke
    PointerUp,
    Undo,
    Redo,
    Save,
}

const UNDO: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
const REDO: KeyboardShortcut =
    KeyboardShortcut::new(Modifiers::COMMAND.plus(Modifiers::SHIFT), Key::Z);
const REDO_ALT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);
const SAVE: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::S);

/// Turns raw egui input into `InputEvent`s for the canvas.
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    stroke_active: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer handling for one frame. A new stroke only starts when
    /// `accept_new_strokes` is set and the press lands inside `canvas_rect`;
    /// once started, moves are forwarded until release even outside it.
    pub fn pointer_events(
        &mut self,
        canvas_rect: Rect,
        pressed: bool,
        released: bool,
        pos: Option<Pos2>,
        accept_new_strokes: bool,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let to_local = |p: Pos2| (p - canvas_rect.min).to_pos2();

        if pressed && !self.stroke_active && accept_new_strokes {
            if let Some(p) = pos.filter(|p| canvas_rect.contains(*p)) {
                events.push(InputEvent::PointerDown { pos: to_local(p) });
                self.stroke_active = true;
                self.last_pointer_pos = Some(p);
            }
        }

        if self.stroke_active {
            match pos {
                Some(p) => {
                    if Some(p) != self.last_pointer_pos {
                        events.push(InputEvent::PointerMove { pos: to_local(p) });
                        self.last_pointer_pos = Some(p);
                    }
                    if released {
                        events.push(InputEvent::PointerUp);
                        self.stroke_active = false;
                    }
                }
                None => {
                    // Pointer left the window mid-stroke
                    events.push(InputEvent::PointerUp);
                    self.stroke_active = false;
                }
            }
        }

        if !self.stroke_active {
            self.last_pointer_pos = None;
        }

        events
    }

    /// Reads this frame's pointer state and shortcuts from `ctx`.
    pub fn process_input(
        &mut self,
        ctx: &Context,
        canvas_rect: Rect,
        accept_new_strokes: bool,
    ) -> Vec<InputEvent> {
        let (pressed, released, pos) = ctx.input(|input| {
            (
                input.pointer.primary_pressed(),
                input.pointer.primary_released(),
                input.pointer.latest_pos(),
            )
        });

        let mut events =
            self.pointer_events(canvas_rect, pressed, released, pos, accept_new_strokes);

        // Check the shifted redo first: plain Ctrl+Z would also match it.
        ctx.input_mut(|input| {
            if input.consume_shortcut(&REDO) || input.consume_shortcut(&REDO_ALT) {
                events.push(InputEvent::Redo);
            } else if input.consume_shortcut(&UNDO) {
                events.push(InputEvent::Undo);
            }
            if input.consume_shortcut(&SAVE) {
                events.push(InputEvent::Save);
            }
        });

        events
    }
}
