use nalgebra::{vector, Vector2};

/// Frame rendering options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Output size in pixels, `(width, height)`
    pub resolution: Vector2<u16>,
    /// Stop marching once accumulated alpha reaches the cutoff
    pub early_ray_termination: bool,
    /// Render rows in parallel
    pub multi_thread: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            resolution: vector![512, 512],
            early_ray_termination: true,
            multi_thread: false,
        }
    }
}

impl RenderOptions {
    pub fn builder() -> RenderOptionsBuilder {
        RenderOptionsBuilder::new()
    }

    /// Number of pixels of one frame
    pub fn pixel_count(&self) -> usize {
        self.resolution.x as usize * self.resolution.y as usize
    }

    /// Length of an RGB8 frame buffer
    pub fn buffer_len(&self) -> usize {
        self.pixel_count() * 3
    }
}

#[derive(Debug, Default)]
pub struct RenderOptionsBuilder {
    resolution: Option<Vector2<u16>>,
    early_ray_termination: Option<bool>,
    multi_thread: Option<bool>,
}

impl RenderOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolution(mut self, resolution: Vector2<u16>) -> Self {
        self.resolution = Some(resolution);
        self
    }

    pub fn early_ray_termination(mut self, enable: bool) -> Self {
        self.early_ray_termination = Some(enable);
        self
    }

    pub fn multi_thread(mut self, enable: bool) -> Self {
        self.multi_thread = Some(enable);
        self
    }

    /// Build options, missing fields are taken from [`RenderOptions::default`].
    /// Fails on a resolution with zero side.
    pub fn build(self) -> Result<RenderOptions, &'static str> {
        let opts = self.build_unchecked();
        if opts.resolution.x == 0 || opts.resolution.y == 0 {
            return Err("Resolution must be at least 1x1");
        }
        Ok(opts)
    }

    /// Build without validation
    pub fn build_unchecked(self) -> RenderOptions {
        let default = RenderOptions::default();
        RenderOptions {
            resolution: self.resolution.unwrap_or(default.resolution),
            early_ray_termination: self
                .early_ray_termination
                .unwrap_or(default.early_ray_termination),
            multi_thread: self.multi_thread.unwrap_or(default.multi_thread),
        }
    }
}
