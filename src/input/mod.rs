//! Input handling: event types, click/drag tracking, and the input
//! processor that converts raw window events into engine commands.

/// Backend-neutral input events.
pub mod event;
/// Click/drag discrimination and mouse position tracking.
pub(crate) mod mouse;
/// Raw event to command translation.
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use processor::{InputProcessor, KeyBindings, KeyCommandTag};
