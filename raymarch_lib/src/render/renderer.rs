use rayon::prelude::*;

use super::{Frame, RayMarcher, RenderOptions};
use crate::{
    camera::Camera,
    common::{BoundBox, Ray},
    volumetric::VolumeTexture,
};

/// Renders frames into RGB8 buffers.
///
/// Buffer row 0 is the top of the image, the background is black.
#[derive(Debug, Default)]
pub struct Renderer {
    render_options: RenderOptions,
}

impl Renderer {
    pub fn new(render_options: RenderOptions) -> Renderer {
        Renderer { render_options }
    }

    pub fn get_render_options(&self) -> RenderOptions {
        self.render_options
    }

    pub fn set_render_options(&mut self, opts: RenderOptions) {
        log::debug!("Render options {opts:?}");
        self.render_options = opts;
    }

    /// Render into a new buffer
    pub fn render<C>(&self, frame: &Frame, camera: &C) -> Vec<u8>
    where
        C: Camera + Sync,
    {
        let mut buffer = vec![0; self.render_options.buffer_len()];
        self.render_to_buffer(frame, camera, &mut buffer);
        buffer
    }

    /// Render into `buffer` of length `width * height * 3`.
    ///
    /// # Panics
    ///
    /// When `buffer` has a different length.
    pub fn render_to_buffer<C>(&self, frame: &Frame, camera: &C, buffer: &mut [u8])
    where
        C: Camera + Sync,
    {
        let opts = &self.render_options;
        assert_eq!(
            buffer.len(),
            opts.buffer_len(),
            "buffer does not match resolution"
        );

        let width = opts.resolution.x as usize;
        if width == 0 {
            return;
        }

        let pass = FramePass {
            marcher: frame.marcher().early_ray_termination(opts.early_ray_termination),
            world_box: frame.bounds.world_box(),
            step_x: 1.0 / opts.resolution.x as f32,
            step_y: 1.0 / opts.resolution.y as f32,
        };

        if opts.multi_thread {
            buffer
                .par_chunks_exact_mut(width * 3)
                .enumerate()
                .for_each(|(y, row)| pass.render_row(camera, y, row));
        } else {
            for (y, row) in buffer.chunks_exact_mut(width * 3).enumerate() {
                pass.render_row(camera, y, row);
            }
        }
    }
}

struct FramePass<'a> {
    marcher: RayMarcher<'a, VolumeTexture>,
    world_box: BoundBox,
    step_x: f32,
    step_y: f32,
}

impl FramePass<'_> {
    fn render_row<C>(&self, camera: &C, y: usize, row: &mut [u8])
    where
        C: Camera,
    {
        let y_norm = (y as f32 + 0.5) * self.step_y;
        for (x, pixel) in row.chunks_exact_mut(3).enumerate() {
            let pixel_coord = ((x as f32 + 0.5) * self.step_x, y_norm);
            let ray = camera.get_ray(pixel_coord);
            pixel.copy_from_slice(&self.shade(&ray));
        }
    }

    fn shade(&self, ray: &Ray) -> [u8; 3] {
        let (entry, _exit) = match self.world_box.intersect(ray) {
            Some(hit) => hit,
            None => return [0, 0, 0],
        };

        // camera inside the box starts at the camera
        let origin = if entry > 0.0 {
            ray.point_from_t(entry)
        } else {
            ray.origin
        };

        let mut local = Ray::new(origin, ray.direction).transform_to_volume_space(&self.world_box);
        // entry point lies on the box surface
        local.origin = local.origin.map(|c| c.max(-0.5).min(0.5));

        let fragment = match self.marcher.march(&local) {
            Some(fragment) => fragment,
            None => return [0, 0, 0],
        };

        // expects black background
        let rgb = fragment.color * fragment.alpha * 255.0;
        [rgb.x as u8, rgb.y as u8, rgb.z as u8]
    }
}
