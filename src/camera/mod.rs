//! Orbit camera with rotation, panning, zoom, and a fit-to-scene helper.

/// Orbit state, drag math, and the camera's GPU resources.
pub mod controller;
/// Perspective camera and its uniform layout.
pub mod core;
