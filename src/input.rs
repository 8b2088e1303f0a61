use egui::{Context, Key, Modifiers, Pos2, Rect};

use crate::document::Document;

/// Host events, in canvas-local pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { pos: Pos2 },
    PointerMove { pos: Pos2 },
    PointerUp,
    Undo,
    Redo,
}

/// Raw pointer and shortcut state for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub pos: Option<Pos2>,
    pub pressed: bool,
    pub down: bool,
    pub released: bool,
    pub undo: bool,
    pub redo: bool,
}

impl FrameInput {
    /// Read the primary pointer and consume the undo/redo shortcuts
    pub fn from_context(ctx: &Context) -> Self {
        ctx.input_mut(|i| {
            // Shift+Cmd+Z has to be consumed before Cmd+Z would match it
            let redo = i.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z)
                || i.consume_key(Modifiers::COMMAND, Key::Y);
            let undo = !redo && i.consume_key(Modifiers::COMMAND, Key::Z);

            Self {
                pos: i.pointer.interact_pos(),
                pressed: i.pointer.primary_pressed(),
                down: i.pointer.primary_down(),
                released: i.pointer.primary_released(),
                undo,
                redo,
            }
        })
    }
}

/// Converts per-frame egui input into [`InputEvent`]s for one canvas.
///
/// A gesture starts only when the press lands inside the canvas while the
/// canvas is hovered, so presses on windows or panel edges drawn over it are
/// ignored. Once it has started, moves are forwarded even if the pointer
/// leaves the canvas.
/// Event positions are physical pixels relative to the canvas corner.
#[derive(Debug)]
pub struct InputHandler {
    canvas_rect: Rect,
    canvas_hovered: bool,
    pixels_per_point: f32,
    last_pos: Option<Pos2>,
    drawing: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            canvas_hovered: true,
            pixels_per_point: 1.0,
            last_pos: None,
            drawing: false,
        }
    }

    pub fn set_pixels_per_point(&mut self, pixels_per_point: f32) {
        self.pixels_per_point = pixels_per_point;
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// Whether egui reports the canvas itself as hovered this frame
    pub fn set_canvas_hovered(&mut self, hovered: bool) {
        self.canvas_hovered = hovered;
    }

    fn to_local(&self, pos: Pos2) -> Pos2 {
        ((pos - self.canvas_rect.min) * self.pixels_per_point).to_pos2()
    }

    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        self.process_frame(FrameInput::from_context(ctx))
    }

    pub fn process_frame(&mut self, frame: FrameInput) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if frame.redo {
            events.push(InputEvent::Redo);
        } else if frame.undo {
            events.push(InputEvent::Undo);
        }

        if frame.pressed {
            let pos = frame
                .pos
                .filter(|p| self.canvas_hovered && self.canvas_rect.contains(*p));
            if let Some(pos) = pos {
                events.push(InputEvent::PointerDown {
                    pos: self.to_local(pos),
                });
                self.drawing = true;
                self.last_pos = Some(pos);
            }
        } else if self.drawing && frame.down {
            self.push_move(frame.pos, &mut events);
        }

        if self.drawing && (frame.released || !frame.down) {
            self.push_move(frame.pos, &mut events);
            events.push(InputEvent::PointerUp);
            self.drawing = false;
            self.last_pos = None;
        }

        events
    }

    fn push_move(&mut self, pos: Option<Pos2>, events: &mut Vec<InputEvent>) {
        if let Some(pos) = pos {
            if Some(pos) != self.last_pos {
                events.push(InputEvent::PointerMove {
                    pos: self.to_local(pos),
                });
                self.last_pos = Some(pos);
            }
        }
    }
}

/// Apply one host event to the document
pub fn apply_event(document: &mut Document, event: InputEvent) {
    match event {
        InputEvent::PointerDown { pos } => document.begin_stroke(pos),
        InputEvent::PointerMove { pos } => document.extend_stroke(pos),
        InputEvent::PointerUp => document.end_stroke(),
        InputEvent::Undo => {
            document.undo();
        }
        InputEvent::Redo => {
            document.redo();
        }
    }
}
