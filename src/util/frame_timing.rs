use web_time::{Duration, Instant};

/// Exponential moving average weight for the FPS readout.
const FPS_SMOOTHING: f32 = 0.05;

/// Frame pacing with a smoothed FPS readout.
pub struct FrameTiming {
    /// Minimum duration between rendered frames (zero = uncapped).
    min_frame_duration: Duration,
    /// Timestamp of the most recent rendered frame.
    last_frame: Instant,
    /// Duration of the most recent frame.
    last_delta: Duration,
    /// FPS smoothed with an exponential moving average.
    smoothed_fps: f32,
}

impl FrameTiming {
    /// Create a frame timer capped at `target_fps` (0 = uncapped).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            min_frame_duration,
            last_frame: Instant::now(),
            last_delta: Duration::ZERO,
            smoothed_fps: 60.0,
        }
    }

    /// Whether enough time has passed since the last frame to render another.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Record the end of a rendered frame and fold it into the FPS average.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        self.last_delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = self.last_delta.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps =
                self.smoothed_fps * (1.0 - FPS_SMOOTHING) + instant_fps * FPS_SMOOTHING;
        }
    }

    /// Duration of the most recently completed frame.
    #[must_use]
    pub fn delta(&self) -> Duration {
        self.last_delta
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}
