/// Input events in screen coordinates, decoupled from any windowing
/// backend.
///
/// The viewer translates winit events into these; embedders drive the
/// engine with them directly. [`InputProcessor`](super::InputProcessor)
/// folds a stream of them into [`FloretCommand`](crate::FloretCommand)s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A mouse button went down or up.
    MouseButton {
        /// The button that changed state.
        button: MouseButton,
        /// `true` on press, `false` on release.
        pressed: bool,
    },
    /// The cursor moved to an absolute position, in physical pixels.
    CursorMoved {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// Wheel or trackpad scroll. Positive deltas move the camera closer.
    Wheel {
        /// Scroll amount in logical scroll lines.
        delta: f32,
    },
    /// The modifier keys changed.
    Modifiers {
        /// Shift held; switches left-drag from orbit to pan.
        shift: bool,
    },
}

/// The mouse buttons the engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button; drags and clicks.
    Left,
    /// Secondary button.
    Right,
    /// Wheel click.
    Middle,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            // Back/Forward and numbered extras act as the primary button.
            winit::event::MouseButton::Left
            | winit::event::MouseButton::Back
            | winit::event::MouseButton::Forward
            | winit::event::MouseButton::Other(_) => Self::Left,
        }
    }
}
