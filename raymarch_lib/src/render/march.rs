//! Per-ray compositing.
//!
//! Rays live in the local frame of the volume, the box `[-0.5;0.5]^3`.
//! Texture coordinates are `pos + 0.5`.

use nalgebra::vector;

use super::{MaskLabel, MaskOverlayParameters, RenderParameters};
use crate::{
    color::RGB,
    common::{BoundBox, Ray},
    volumetric::Volume,
};

/// Samples taken along every ray, regardless of its length
pub const STEP_COUNT: usize = 256;

/// Accumulated alpha at which marching may stop
pub const ALPHA_CUTOFF: f32 = 0.99;

/// Mask samples at or below this value are background
pub const MASK_NOISE_FLOOR: f32 = 0.01;

/// Result of one ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub color: RGB,
    pub alpha: f32,
}

/// Hermite interpolation between `edge0` and `edge1`.
/// Degenerate edges (`edge1 <= edge0`) give a hard step at `edge0`.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).max(0.0).min(1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Contrast around 0.5, then brightness, both clamped to `<0;1>`.
/// NaN becomes 0.
pub fn adjust_density(sample: f32, contrast: f32, brightness: f32) -> f32 {
    let d = ((sample - 0.5) * contrast + 0.5).max(0.0).min(1.0);
    (d * brightness).max(0.0).min(1.0)
}

/// Front to back compositing of a scalar quantity
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulator {
    pub density: f32,
    pub alpha: f32,
}

impl Accumulator {
    /// Composite one sample behind everything accumulated so far.
    /// `opacity` is clamped to `<0;1>`. Returns the weight the sample received.
    pub fn add(&mut self, value: f32, opacity: f32) -> f32 {
        let contribution = opacity.max(0.0).min(1.0) * (1.0 - self.alpha);
        self.density += value * contribution;
        self.alpha += contribution;
        contribution
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha >= ALPHA_CUTOFF
    }
}

/// Front to back compositing of mask colors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskAccumulator {
    pub rgb: RGB,
    pub alpha: f32,
}

impl Default for MaskAccumulator {
    fn default() -> Self {
        Self {
            rgb: vector![0.0, 0.0, 0.0],
            alpha: 0.0,
        }
    }
}

impl MaskAccumulator {
    pub fn add(&mut self, color: RGB, opacity: f32) -> f32 {
        let contribution = opacity.max(0.0).min(1.0) * (1.0 - self.alpha);
        self.rgb += color * contribution;
        self.alpha += contribution;
        contribution
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha >= ALPHA_CUTOFF
    }
}

struct MaskSlot<'a, V> {
    texture: &'a V,
    opacity: f32,
}

/// Raymarcher over an anatomy volume with an optional segmentation overlay.
///
/// Stateless, one instance can march any number of rays from any thread.
pub struct RayMarcher<'a, V>
where
    V: Volume,
{
    anatomy: &'a V,
    mask: Option<MaskSlot<'a, V>>,
    params: RenderParameters,
    early_ray_termination: bool,
}

impl<'a, V> RayMarcher<'a, V>
where
    V: Volume,
{
    pub fn new(anatomy: &'a V, params: RenderParameters) -> Self {
        Self {
            anatomy,
            mask: None,
            params,
            early_ray_termination: true,
        }
    }

    /// Overlay segmentation `mask`. Ignored when the overlay is hidden.
    pub fn with_mask(mut self, mask: &'a V, overlay: MaskOverlayParameters) -> Self {
        self.mask = if overlay.show_mask {
            Some(MaskSlot {
                texture: mask,
                opacity: overlay.mask_opacity,
            })
        } else {
            None
        };
        self
    }

    pub fn early_ray_termination(mut self, enable: bool) -> Self {
        self.early_ray_termination = enable;
        self
    }

    pub fn has_mask(&self) -> bool {
        self.mask.is_some()
    }

    fn is_finished(&self, anatomy: &Accumulator, mask: &MaskAccumulator) -> bool {
        match self.mask {
            Some(_) => anatomy.is_opaque() && mask.is_opaque(),
            None => anatomy.is_opaque(),
        }
    }

    /// March `ray` given in the local frame.
    ///
    /// `None` means the fragment is discarded: the origin is clipped,
    /// the direction is degenerate or the ray misses the box.
    pub fn march(&self, ray: &Ray) -> Option<Fragment> {
        let params = &self.params;

        for i in 0..3 {
            if ray.origin[i] < params.clip_planes[i] - 0.5 {
                return None;
            }
        }

        let ray = ray.normalized()?;
        let (entry, exit) = BoundBox::unit().intersect(&ray)?;

        let entry = f32::max(0.0, entry);
        let start = ray.point_from_t(entry);
        let step_size = (exit - entry) / STEP_COUNT as f32;

        let mut anatomy = Accumulator::default();
        let mut mask = MaskAccumulator::default();

        for i in 0..STEP_COUNT {
            // relying on branch predictor to "eliminate" branch
            if self.early_ray_termination && self.is_finished(&anatomy, &mask) {
                break;
            }

            let pos = start + ray.direction * (i as f32 * step_size);
            let uvw = pos + vector![0.5, 0.5, 0.5];

            if uvw.coords.iter().any(|c| !(0.0..=1.0).contains(c)) {
                continue;
            }

            let density = adjust_density(
                self.anatomy.sample_at(uvw),
                params.contrast,
                params.brightness,
            );
            let opacity = smoothstep(params.transfer_function, 1.0, density) * step_size;
            anatomy.add(density, opacity);

            if let Some(slot) = &self.mask {
                let m = slot.texture.sample_at(uvw);
                if m > MASK_NOISE_FLOOR {
                    if let Some(label) = MaskLabel::from_value(m) {
                        mask.add(label.color(), m * slot.opacity * step_size);
                    }
                }
            }
        }

        let anatomy_color = params.color_mode.map(anatomy.density) * params.brightness;

        let fragment = match self.mask {
            Some(_) => Fragment {
                color: anatomy_color * (1.0 - mask.alpha) + mask.rgb * mask.alpha,
                alpha: f32::max(anatomy.alpha, mask.alpha),
            },
            None => Fragment {
                color: anatomy_color,
                alpha: anatomy.alpha,
            },
        };

        Some(fragment)
    }
}
