//! Raw event to command translation.
//!
//! `InputProcessor` holds the transient pointer state (position, held
//! button, drag detection, modifiers) together with the key-binding map.
//! Nothing else sits between window events and the engine's
//! [`execute`](crate::FloretEngine::execute) method.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::event::{InputEvent, MouseButton};
use super::mouse::{ClickResult, InputState};
use crate::engine::FloretCommand;

/// Maps physical key names to [`FloretCommand`] variants.
///
/// Keys are named after the `Debug` form of `winit::keyboard::KeyCode`
/// (`"Space"`, `"KeyQ"`, `"Escape"`).
///
/// Bindings cover the discrete commands only. Parameterized commands such
/// as `RotateCamera` come out of the pointer gesture logic and cannot be
/// attached to a key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    /// Key name to command tag.
    bindings: HashMap<String, KeyCommandTag>,
}

/// Serializable stand-in for the parameterless [`FloretCommand`]s, the
/// only ones a key can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommandTag {
    /// Pause or resume the growth simulation.
    TogglePlayback,
    /// Frame the planted surface in view.
    RecenterCamera,
}

impl KeyCommandTag {
    /// Convert to the corresponding parameterless [`FloretCommand`].
    fn to_command(self) -> FloretCommand {
        match self {
            Self::TogglePlayback => FloretCommand::TogglePlayback,
            Self::RecenterCamera => FloretCommand::RecenterCamera,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("Space".into(), KeyCommandTag::TogglePlayback),
            ("KeyQ".into(), KeyCommandTag::RecenterCamera),
        ]);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Command bound to `key`, if any.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<FloretCommand> {
        self.bindings.get(key).map(|tag| tag.to_command())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// InputProcessor
// ─────────────────────────────────────────────────────────────────────────────

/// Converts raw window events into [`FloretCommand`]s.
///
/// Left-drag orbits the camera, shift-drag pans, scroll zooms, and a
/// press-release that never travels past the drag threshold becomes a
/// [`FloretCommand::RetargetGrowth`] at the release position.
pub struct InputProcessor {
    /// Mouse tracking and click/drag discrimination.
    state: InputState,
    /// Primary button held right now.
    mouse_pressed: bool,
    /// Shift held right now.
    shift_pressed: bool,
    /// Active key bindings.
    key_bindings: KeyBindings,
}

impl InputProcessor {
    /// Processor with the default bindings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: InputState::new(),
            mouse_pressed: false,
            shift_pressed: false,
            key_bindings: KeyBindings::default(),
        }
    }

    /// Processor with caller-supplied bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeyBindings) -> Self {
        Self {
            key_bindings,
            ..Self::new()
        }
    }

    /// Last observed cursor position, in physical pixels.
    #[must_use]
    pub fn mouse_pos(&self) -> (f32, f32) {
        self.state.mouse_pos
    }

    /// True while the primary button is down.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.mouse_pressed
    }

    /// True while shift is down.
    #[must_use]
    pub fn shift_pressed(&self) -> bool {
        self.shift_pressed
    }

    /// The active bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeyBindings {
        &self.key_bindings
    }

    /// Translate a key press through the bindings.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<FloretCommand> {
        self.key_bindings.lookup(key)
    }

    /// Translate one raw event, producing at most one command.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<FloretCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed)
            }
            InputEvent::Wheel { delta } => Some(FloretCommand::Zoom { delta }),
            InputEvent::Modifiers { shift } => {
                self.shift_pressed = shift;
                None
            }
        }
    }

    /// Cursor moved. Compute the delta and possibly produce a camera command.
    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Option<FloretCommand> {
        let (delta_x, delta_y) = self.state.handle_mouse_position(x, y);

        if self.mouse_pressed {
            let delta = Vec2::new(delta_x, delta_y);
            if delta.length_squared() > 1.0 {
                self.state.mark_dragging();
            }
            if self.shift_pressed {
                return Some(FloretCommand::PanCamera { delta });
            }
            return Some(FloretCommand::RotateCamera { delta });
        }

        None
    }

    /// Mouse button press/release. Track state and produce a retarget
    /// command on a clean release.
    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Option<FloretCommand> {
        if button != MouseButton::Left {
            return None;
        }

        if pressed {
            self.state.handle_mouse_down();
            self.mouse_pressed = true;
            return None;
        }

        self.mouse_pressed = false;
        match self.state.process_mouse_up() {
            ClickResult::NoAction => None,
            ClickResult::Click { x, y } => Some(FloretCommand::RetargetGrowth { x, y }),
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press() -> InputEvent {
        InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        }
    }

    fn release() -> InputEvent {
        InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        }
    }

    #[test]
    fn clean_click_retargets_growth() {
        let mut input = InputProcessor::new();
        assert_eq!(
            input.handle_event(InputEvent::CursorMoved { x: 320.0, y: 240.0 }),
            None
        );
        assert_eq!(input.handle_event(press()), None);
        assert_eq!(
            input.handle_event(release()),
            Some(FloretCommand::RetargetGrowth { x: 320.0, y: 240.0 })
        );
    }

    #[test]
    fn dragging_rotates_instead_of_retargeting() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(InputEvent::CursorMoved { x: 100.0, y: 100.0 });
        let _ = input.handle_event(press());
        assert_eq!(
            input.handle_event(InputEvent::CursorMoved { x: 110.0, y: 104.0 }),
            Some(FloretCommand::RotateCamera {
                delta: Vec2::new(10.0, 4.0)
            })
        );
        assert_eq!(input.handle_event(release()), None);
    }

    #[test]
    fn shift_drag_pans() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(InputEvent::CursorMoved { x: 50.0, y: 50.0 });
        let _ = input.handle_event(InputEvent::Modifiers { shift: true });
        let _ = input.handle_event(press());
        assert_eq!(
            input.handle_event(InputEvent::CursorMoved { x: 53.0, y: 50.0 }),
            Some(FloretCommand::PanCamera {
                delta: Vec2::new(3.0, 0.0)
            })
        );
    }

    #[test]
    fn sub_pixel_jitter_still_counts_as_a_click() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(InputEvent::CursorMoved { x: 200.0, y: 200.0 });
        let _ = input.handle_event(press());
        let _ = input.handle_event(InputEvent::CursorMoved { x: 200.5, y: 200.3 });
        assert_eq!(
            input.handle_event(release()),
            Some(FloretCommand::RetargetGrowth { x: 200.5, y: 200.3 })
        );
    }

    #[test]
    fn scroll_zooms() {
        let mut input = InputProcessor::new();
        assert_eq!(
            input.handle_event(InputEvent::Wheel { delta: 2.0 }),
            Some(FloretCommand::Zoom { delta: 2.0 })
        );
    }

    #[test]
    fn right_button_is_ignored() {
        let mut input = InputProcessor::new();
        let down = input.handle_event(InputEvent::MouseButton {
            button: MouseButton::Right,
            pressed: true,
        });
        let up = input.handle_event(InputEvent::MouseButton {
            button: MouseButton::Right,
            pressed: false,
        });
        assert_eq!(down, None);
        assert_eq!(up, None);
    }

    #[test]
    fn release_without_press_does_nothing() {
        let mut input = InputProcessor::new();
        assert_eq!(input.handle_event(release()), None);
    }

    #[test]
    fn default_bindings_cover_playback_and_recenter() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.lookup("Space"),
            Some(FloretCommand::TogglePlayback)
        );
        assert_eq!(
            bindings.lookup("KeyQ"),
            Some(FloretCommand::RecenterCamera)
        );
        assert_eq!(bindings.lookup("KeyZ"), None);
    }
}
