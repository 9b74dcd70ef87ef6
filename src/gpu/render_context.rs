//! Device, queue, and surface ownership.

use std::fmt;

/// Owns the wgpu device/queue pair and, in windowed mode, the presentation
/// surface with its current configuration.
///
/// Headless contexts built with [`RenderContext::from_device`] carry the
/// same configuration struct so sizing and formats flow through one path,
/// with `surface` left empty.
pub struct RenderContext {
    /// Logical GPU device.
    pub device: wgpu::Device,
    /// Command queue for uploads and submissions.
    pub queue: wgpu::Queue,
    /// Presentation surface. `None` when rendering to textures only.
    pub surface: Option<wgpu::Surface<'static>>,
    /// Active surface configuration (format, size, present mode).
    pub config: wgpu::SurfaceConfiguration,
}

impl RenderContext {
    /// Open the GPU for a window: create its surface, pick a high
    /// performance adapter that can present to it, and configure the
    /// swapchain at the given size.
    ///
    /// # Errors
    ///
    /// Returns [`RenderContextError`] when no adapter can drive the
    /// surface, the device request is refused, or the surface rejects
    /// its default configuration.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderContextError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(RenderContextError::CreateSurface)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                power_preference: wgpu::PowerPreference::HighPerformance,
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("floret device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::RequestDevice)?;

        // Fifo is universally supported and caps presentation at vsync.
        let mut config = surface
            .get_default_config(&adapter, width, height)
            .ok_or(RenderContextError::SurfaceConfig)?;
        config.present_mode = wgpu::PresentMode::Fifo;
        surface.configure(&device, &config);

        Ok(Self {
            device,
            queue,
            surface: Some(surface),
            config,
        })
    }

    /// Wrap an externally-owned device and queue with no surface, for
    /// texture-target and embedded rendering.
    #[must_use]
    pub fn from_device(
        device: wgpu::Device,
        queue: wgpu::Queue,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            desired_maximum_frame_latency: 2,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
        };
        Self {
            device,
            queue,
            surface: None,
            config,
        }
    }

    /// Color format render targets must match.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Viewport aspect ratio (width / height).
    pub fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    /// Apply a new size to the configuration and, when a surface exists,
    /// reconfigure it. Zero-sized updates are dropped; minimized windows
    /// report those.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        if let Some(ref surface) = self.surface {
            surface.configure(&self.device, &self.config);
        }
    }

    /// Whether this context can present to a window.
    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Acquire the next swapchain texture.
    ///
    /// # Errors
    ///
    /// Propagates [`wgpu::SurfaceError`] from the swapchain; a context
    /// without a surface reports [`wgpu::SurfaceError::Lost`] so callers
    /// follow their normal reconfigure path.
    pub fn acquire_frame(
        &self,
    ) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface
            .as_ref()
            .map_or(Err(wgpu::SurfaceError::Lost), |surface| {
                surface.get_current_texture()
            })
    }

    /// Open a command encoder for one frame's work.
    pub fn create_encoder(&self) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("floret frame encoder"),
            })
    }

    /// Finish the encoder and hand its commands to the queue.
    pub fn submit(&self, encoder: wgpu::CommandEncoder) {
        let _ = self.queue.submit(std::iter::once(encoder.finish()));
    }
}

/// Failures while opening the GPU.
#[derive(Debug)]
pub enum RenderContextError {
    /// The window handle could not back a wgpu surface.
    CreateSurface(wgpu::CreateSurfaceError),
    /// No adapter is compatible with the surface.
    NoAdapter(wgpu::RequestAdapterError),
    /// The adapter refused the device request.
    RequestDevice(wgpu::RequestDeviceError),
    /// The surface has no workable default configuration.
    SurfaceConfig,
}

impl fmt::Display for RenderContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateSurface(e) => {
                write!(f, "cannot create a surface for the window: {e}")
            }
            Self::NoAdapter(e) => {
                write!(f, "no GPU adapter accepts the surface: {e}")
            }
            Self::RequestDevice(e) => {
                write!(f, "GPU device request refused: {e}")
            }
            Self::SurfaceConfig => {
                write!(f, "the surface has no supported configuration")
            }
        }
    }
}

impl std::error::Error for RenderContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CreateSurface(e) => Some(e),
            Self::NoAdapter(e) => Some(e),
            Self::RequestDevice(e) => Some(e),
            Self::SurfaceConfig => None,
        }
    }
}
