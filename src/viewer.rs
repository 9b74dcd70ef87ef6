//! Native window front end.
//!
//! [`Viewer`] owns a winit event loop and forwards window events to a
//! [`FloretEngine`] as backend-neutral [`InputEvent`]s.
//!
//! ```no_run
//! # use floret::Viewer;
//! Viewer::builder()
//!     .with_terrain("assets/models/terrain.glb")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    error::FloretError, options::Options, FloretEngine, InputEvent,
    MouseButton,
};

/// Everything the window needs to know before it opens.
struct ViewerConfig {
    terrain: Option<PathBuf>,
    flower: Option<PathBuf>,
    options: Option<Options>,
    title: String,
}

// ── Builder ──────────────────────────────────────────────────────────────

/// Configures and produces a [`Viewer`].
pub struct ViewerBuilder {
    config: ViewerConfig,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            config: ViewerConfig {
                terrain: None,
                flower: None,
                options: None,
                title: "Floret".into(),
            },
        }
    }

    /// Terrain model file (`.gltf` or `.glb`). Without one the built-in
    /// procedural mound is used.
    #[must_use]
    pub fn with_terrain(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.terrain = Some(path.into());
        self
    }

    /// Flower template model file (`.gltf` or `.glb`). Without one the
    /// built-in sprig is used. Ignored unless a terrain file is set.
    #[must_use]
    pub fn with_flower(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.flower = Some(path.into());
        self
    }

    /// Replace the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.config.options = Some(options);
        self
    }

    /// Window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// Finish the builder.
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            config: self.config,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the growing-flowers scene.
///
/// Build one with [`Viewer::builder`] and start it with
/// [`run`](Self::run).
pub struct Viewer {
    config: ViewerConfig,
}

impl Viewer {
    /// Begin configuring a viewer.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and block on the event loop until it closes.
    ///
    /// # Errors
    ///
    /// Returns [`FloretError::Viewer`] if the event loop cannot be created
    /// or exits abnormally.
    pub fn run(self) -> Result<(), FloretError> {
        let event_loop = EventLoop::new()
            .map_err(|e| FloretError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            config: self.config,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| FloretError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Winit-side state for the running window.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<FloretEngine>,
    config: ViewerConfig,
}

/// Surface dimensions for a window size. The swapchain rejects zero, so a
/// minimised window clamps to one pixel.
fn surface_size(inner: PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    /// Attributes for the initial window: titled, sized to three quarters
    /// of the monitor. Sized in logical units so the fraction holds on
    /// hidpi displays.
    fn window_attributes(
        event_loop: &ActiveEventLoop,
        title: &str,
    ) -> WindowAttributes {
        let attrs = Window::default_attributes().with_title(title);
        let Some(monitor) = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next())
        else {
            return attrs;
        };
        let physical = monitor.size();
        let scale = monitor.scale_factor();
        attrs.with_inner_size(LogicalSize::new(
            (physical.width as f64 / scale * 0.75) as u32,
            (physical.height as f64 / scale * 0.75) as u32,
        ))
    }

    /// Build the engine for a freshly created window, loading model files
    /// when the builder supplied them.
    async fn start_engine(
        window: Arc<Window>,
        size: (u32, u32),
        config: &mut ViewerConfig,
    ) -> Result<FloretEngine, FloretError> {
        let options = config.options.take().unwrap_or_default();
        if let Some(terrain) = &config.terrain {
            FloretEngine::new_with_files(
                window,
                size,
                terrain,
                config.flower.as_deref(),
                options,
            )
            .await
        } else {
            FloretEngine::new(window, size, options).await
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Self::window_attributes(event_loop, &self.config.title);
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = surface_size(window.inner_size());
        let started = pollster::block_on(Self::start_engine(
            window.clone(),
            size,
            &mut self.config,
        ));
        let engine = match started {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Events arriving before resumed() finishes have nothing to act on.
        let (Some(window), Some(engine)) = (&self.window, &mut self.engine)
        else {
            return;
        };

        match event {
            WindowEvent::Resized(new_size) => {
                let (w, h) = surface_size(new_size);
                engine.resize(w, h);
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let (w, h) = surface_size(window.inner_size());
                engine.resize(w, h);
            }

            WindowEvent::RedrawRequested => {
                match engine.render() {
                    Ok(()) => {}
                    Err(
                        wgpu::SurfaceError::Outdated
                        | wgpu::SurfaceError::Lost,
                    ) => {
                        // Stale swapchain; rebuild at the current size.
                        let (w, h) = surface_size(window.inner_size());
                        engine.resize(w, h);
                    }
                    Err(e) => log::error!("render error: {e:?}"),
                }
                // Poll mode: queue the next frame as soon as one presents.
                window.request_redraw();
            }

            WindowEvent::MouseInput { button, state, .. } => {
                engine.handle_input(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                engine.handle_input(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
                window.request_redraw();
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                engine.handle_input(InputEvent::Wheel { delta });
                window.request_redraw();
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                engine.handle_input(InputEvent::Modifiers {
                    shift: modifiers.state().shift_key(),
                });
            }

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed =>
            {
                if let PhysicalKey::Code(code) = event.physical_key {
                    engine.handle_key(&format!("{code:?}"));
                }
            }

            _ => (),
        }
    }
}
