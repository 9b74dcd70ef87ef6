//! The rendering engine: GPU state, growth simulation, and the frame loop.

mod command;
mod input;

use std::path::Path;

pub use command::FloretCommand;

use crate::camera::controller::CameraController;
use crate::error::FloretError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::DepthTexture;
use crate::growth::{GrowthField, GrowthParams};
use crate::input::InputProcessor;
use crate::options::Options;
use crate::renderer::{FlowerRenderer, TerrainRenderer};
use crate::scene::SceneData;
use crate::util::frame_timing::FrameTiming;
use crate::util::lighting::Lighting;

/// Frame pacing cap.
const TARGET_FPS: u32 = 300;

/// The core rendering engine for the growing-flowers scene.
///
/// Owns the GPU pipeline end to end: the terrain renderer, the instanced
/// flower renderer, the growth simulation feeding it, and the orbital
/// camera.
///
/// # Construction
///
/// Use [`FloretEngine::new`] for the built-in procedural scene or
/// [`FloretEngine::new_with_files`] to load glTF terrain and flower
/// models.
///
/// # Frame loop
///
/// Each frame, call [`render`](Self::render) to step the simulation, draw,
/// and present. Call [`resize`](Self::resize) when the window size changes.
/// Input is forwarded via [`handle_input`](Self::handle_input); discrete
/// operations go through [`execute`](Self::execute).
pub struct FloretEngine {
    /// Device, queue, and surface.
    pub context: RenderContext,
    _shader_composer: ShaderComposer,

    /// Orbit camera and its GPU uniform.
    pub camera_controller: CameraController,
    /// Lighting rig uniform and bind group.
    pub lighting: Lighting,
    /// Depth attachment for the forward pass, recreated on resize.
    depth: DepthTexture,

    /// Terrain surface, flower template, and scattered anchors.
    scene: SceneData,
    /// Per-instance growth state driving the flower transforms.
    field: GrowthField,
    /// Whether the growth simulation advances each frame.
    playing: bool,

    terrain_renderer: TerrainRenderer,
    flower_renderer: FlowerRenderer,

    /// Pointer and key state with gesture detection.
    pub input: InputProcessor,
    /// Runtime display, lighting, camera, and growth options.
    options: Options,
    /// Frame clock and FPS counter.
    pub(crate) frame_timing: FrameTiming,
}

// =============================================================================
// Core
// =============================================================================

impl FloretEngine {
    /// Engine with the built-in procedural scene. Needs no assets on disk.
    ///
    /// # Errors
    ///
    /// Returns [`FloretError`] if GPU initialization or scene assembly
    /// fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, FloretError> {
        let context = RenderContext::new(window, size.0, size.1).await?;
        let scene = SceneData::procedural(&options)?;
        Self::init_with_context(context, scene, options)
    }

    /// Engine with terrain (and optionally a flower template) loaded from
    /// glTF files.
    ///
    /// # Errors
    ///
    /// Returns [`FloretError`] if GPU initialization, model loading, or
    /// scene assembly fails.
    pub async fn new_with_files(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        terrain_path: &Path,
        flower_path: Option<&Path>,
        options: Options,
    ) -> Result<Self, FloretError> {
        let context = RenderContext::new(window, size.0, size.1).await?;
        let scene = SceneData::from_files(terrain_path, flower_path, &options)?;
        Self::init_with_context(context, scene, options)
    }

    /// Engine from a pre-built [`RenderContext`] and scene (for embedding
    /// and headless rendering).
    ///
    /// [`RenderContext::from_device`] wraps a device and queue the caller
    /// already owns into a surface-less context suitable here.
    ///
    /// # Errors
    ///
    /// Returns [`FloretError`] if shader composition or pipeline creation
    /// fails.
    pub fn new_from_context(
        context: RenderContext,
        scene: SceneData,
        options: Options,
    ) -> Result<Self, FloretError> {
        Self::init_with_context(context, scene, options)
    }

    /// Construction tail common to the windowed and headless paths.
    fn init_with_context(
        context: RenderContext,
        scene: SceneData,
        options: Options,
    ) -> Result<Self, FloretError> {
        let mut shader_composer = ShaderComposer::new()?;
        let camera_controller = CameraController::new(&context, &options.camera);
        let lighting = Lighting::new(&context, &options.lighting);
        let depth = DepthTexture::new(
            &context.device,
            context.config.width,
            context.config.height,
        );

        let terrain_renderer = TerrainRenderer::new(
            &context,
            scene.terrain(),
            &camera_controller.layout,
            &lighting.layout,
            &mut shader_composer,
        )?;
        let mut flower_renderer = FlowerRenderer::new(
            &context,
            scene.flower(),
            scene.population(),
            &camera_controller.layout,
            &lighting.layout,
            &mut shader_composer,
        )?;

        let field = GrowthField::new(
            scene.points(),
            GrowthParams::from(&options.growth),
        );
        // Upload the collapsed initial transforms so instances exist before
        // the first step
        flower_renderer.write_instances(&context, field.transforms());

        let input = InputProcessor::with_key_bindings(options.keybindings.clone());

        Ok(Self {
            context,
            _shader_composer: shader_composer,
            camera_controller,
            lighting,
            depth,
            scene,
            field,
            playing: true,
            terrain_renderer,
            flower_renderer,
            input,
            options,
            frame_timing: FrameTiming::new(TARGET_FPS),
        })
    }

    /// Per-frame updates: growth step, instance upload, camera uniform.
    fn pre_render(&mut self) {
        if self.playing {
            self.field.step();
            self.flower_renderer
                .write_instances(&self.context, self.field.transforms());
        }

        self.camera_controller.update_gpu(&self.context.queue);
    }

    /// Encode the forward pass targeting the given view.
    fn render_to_view(
        &self,
        view: &wgpu::TextureView,
    ) -> wgpu::CommandEncoder {
        let mut encoder = self.context.create_encoder();
        {
            let mut rp =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("main render pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    ..Default::default()
                });

            if self.options.display.show_terrain {
                self.terrain_renderer.draw(
                    &mut rp,
                    &self.camera_controller.bind_group,
                    &self.lighting.bind_group,
                );
            }

            if self.options.display.show_flowers {
                self.flower_renderer.draw(
                    &mut rp,
                    &self.camera_controller.bind_group,
                    &self.lighting.bind_group,
                );
            }
        }
        encoder
    }

    /// Execute one frame: step the simulation, draw, and present.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] when no swapchain frame can be
    /// acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // Frame pacing gate.
        if !self.frame_timing.should_render() {
            return Ok(());
        }

        self.pre_render();

        let frame = self.context.acquire_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self.render_to_view(&view);
        self.context.submit(encoder);

        frame.present();

        self.frame_timing.end_frame();

        Ok(())
    }

    /// Render the scene to the given texture view (for embedding). The
    /// caller owns the texture; no surface present happens.
    pub fn render_to_texture(&mut self, view: &wgpu::TextureView) {
        self.pre_render();
        let encoder = self.render_to_view(view);
        self.context.submit(encoder);
        self.frame_timing.end_frame();
    }

    /// Resize the surface, camera projection, and depth attachment to
    /// match the new window size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.context.resize(width, height);
            self.camera_controller.resize(width, height);
            self.depth =
                DepthTexture::new(&self.context.device, width, height);
        }
    }
}

// =============================================================================
// Accessors
// =============================================================================

impl FloretEngine {
    /// Read-only access to the scene data.
    pub fn scene(&self) -> &SceneData {
        &self.scene
    }

    /// Read-only access to the growth state.
    pub fn field(&self) -> &GrowthField {
        &self.field
    }

    /// Whether the growth simulation is advancing.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Current runtime options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Smoothed frames per second.
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }
}
