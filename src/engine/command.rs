//! Everything the engine can be asked to do.
//!
//! Every user-facing operation, whether triggered by a key press, mouse
//! gesture, or programmatic call, is represented as a `FloretCommand`.
//! Consumers construct commands and pass them to
//! [`FloretEngine::execute`](super::FloretEngine::execute).

use glam::Vec2;

/// One operation the engine knows how to perform.
///
/// The engine never cares *how* a command was triggered. Keyboard, mouse,
/// and programmatic callers all look identical:
///
/// ```ignore
/// engine.execute(FloretCommand::TogglePlayback);
/// engine.execute(FloretCommand::Zoom { delta: 1.0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FloretCommand {
    // ── Camera ──────────────────────────────────────────────────────
    /// Orbit the camera by `delta` pixels of mouse movement.
    RotateCamera {
        /// Drag delta in pixels.
        delta: Vec2,
    },

    /// Slide the camera focus sideways by `delta` pixels of drag.
    PanCamera {
        /// Drag delta in pixels.
        delta: Vec2,
    },

    /// Move toward or away from the focus; positive is closer.
    Zoom {
        /// Wheel movement in lines.
        delta: f32,
    },

    /// Frame the planted surface in view.
    RecenterCamera,

    // ── Growth ──────────────────────────────────────────────────────
    /// Cast a ray through a screen position and move the growth target
    /// to the surface point it hits. Misses leave the target unchanged.
    RetargetGrowth {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },

    // ── Playback ────────────────────────────────────────────────────
    /// Pause or resume the growth simulation.
    TogglePlayback,
}
