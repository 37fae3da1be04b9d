/// Input event types the engine understands.
/// Generic, no game-specific semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at world coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at world coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// The cursor moved to world coordinates (x, y). Sent while the
    /// pointer is not captured.
    PointerMove { x: f32, y: f32 },
    /// Relative movement while the pointer is locked/captured.
    /// Deltas are not clamped at the screen edge.
    PointerDelta { dx: f32, dy: f32 },
    /// The window lost focus; any in-progress gesture must be abandoned.
    FocusLost,
    /// The window regained focus.
    FocusGained,
    /// A custom event from the UI layer (buttons, menus).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// The host pushes events between frames; the runner hands them to the game
/// once per frame and then drains the queue.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from the host bridge).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events in arrival order without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<InputEvent>> for InputQueue {
    fn from(events: Vec<InputEvent>) -> Self {
        Self { events }
    }
}
