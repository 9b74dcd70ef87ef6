/// Outcome of a primary-button release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ClickResult {
    /// Release after a camera drag, or a release with no matching press.
    NoAction,
    /// Clean press and release on one spot.
    Click { x: f32, y: f32 },
}

/// Tracks cursor position, press bookkeeping, and drag discrimination.
///
/// A press that moves the cursor beyond the drag threshold becomes a
/// camera gesture; a press that stays put becomes a [`ClickResult::Click`]
/// on release.
pub(crate) struct InputState {
    /// Last known cursor position in physical pixels.
    pub(crate) mouse_pos: (f32, f32),
    /// Whether the active press has turned into a drag.
    pub(crate) is_dragging: bool,
    press_seen: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    /// Create a new input state with no active press.
    pub(crate) fn new() -> Self {
        Self {
            mouse_pos: (0.0, 0.0),
            is_dragging: false,
            press_seen: false,
        }
    }

    /// Record a primary-button press at the current cursor position.
    pub(crate) fn handle_mouse_down(&mut self) {
        self.press_seen = true;
        self.is_dragging = false;
    }

    /// Record that the pointer travelled past the drag threshold while held.
    pub(crate) fn mark_dragging(&mut self) {
        self.is_dragging = true;
    }

    /// Update the cursor position and return the movement delta.
    pub(crate) fn handle_mouse_position(&mut self, x: f32, y: f32) -> (f32, f32) {
        let delta = (x - self.mouse_pos.0, y - self.mouse_pos.1);
        self.mouse_pos = (x, y);
        delta
    }

    /// Close out a press and classify it as a clean click or a drag.
    pub(crate) fn process_mouse_up(&mut self) -> ClickResult {
        let was_press = self.press_seen;
        let was_dragging = self.is_dragging;
        self.press_seen = false;
        self.is_dragging = false;

        if was_press && !was_dragging {
            ClickResult::Click {
                x: self.mouse_pos.0,
                y: self.mouse_pos.1,
            }
        } else {
            ClickResult::NoAction
        }
    }
}
