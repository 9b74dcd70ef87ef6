//! Input dispatch and command execution for [`FloretEngine`].

use glam::Vec3;

use super::command::FloretCommand;
use super::FloretEngine;
use crate::input::InputEvent;
use crate::scene::Ray;

// ── Unified input handler ──

impl FloretEngine {
    /// Feed one backend-neutral input event through the processor,
    /// executing whatever command falls out.
    ///
    /// # Example
    ///
    /// ```ignore
    /// engine.handle_input(InputEvent::CursorMoved { x: 320.0, y: 240.0 });
    /// engine.handle_input(InputEvent::Wheel { delta: 1.0 });
    /// ```
    pub fn handle_input(&mut self, event: InputEvent) {
        if let Some(command) = self.input.handle_event(event) {
            self.execute(command);
        }
    }

    /// Process a physical key press by key code name (e.g. `"Space"`,
    /// `"KeyQ"`). Unbound keys are ignored.
    pub fn handle_key(&mut self, key: &str) {
        if let Some(command) = self.input.handle_key_press(key) {
            self.execute(command);
        }
    }
}

// ── Command execution ──

impl FloretEngine {
    /// Execute a single engine command.
    pub fn execute(&mut self, command: FloretCommand) {
        match command {
            FloretCommand::RotateCamera { delta } => {
                self.camera_controller.rotate(delta);
            }
            FloretCommand::PanCamera { delta } => {
                self.camera_controller.pan(delta);
            }
            FloretCommand::Zoom { delta } => {
                self.camera_controller.zoom(delta);
            }
            FloretCommand::RecenterCamera => self.recenter_camera(),
            FloretCommand::RetargetGrowth { x, y } => {
                self.retarget_growth(x, y);
            }
            FloretCommand::TogglePlayback => {
                self.playing = !self.playing;
                let state = if self.playing { "playing" } else { "paused" };
                log::info!("growth {state}");
            }
        }
    }

    /// Fit the orbit to the scattered anchor points.
    fn recenter_camera(&mut self) {
        let positions: Vec<Vec3> =
            self.scene.points().iter().map(|p| p.position).collect();
        self.camera_controller.fit_to_positions(&positions);
    }

    /// Cast a ray through the clicked pixel and move the growth target to
    /// the terrain point it hits. Misses leave the target unchanged.
    fn retarget_growth(&mut self, x: f32, y: f32) {
        let view_proj = self.camera_controller.camera.build_matrix();
        let ray = Ray::from_screen(
            x,
            y,
            self.context.config.width as f32,
            self.context.config.height as f32,
            view_proj,
        );
        if let Some(hit) = self.scene.cast_ray(&ray) {
            self.field.set_target(hit.point);
            log::debug!("growth target -> {:?}", hit.point);
        }
    }
}
