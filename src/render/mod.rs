use crate::camera::CameraState;
use crate::config::{FrameParams, Resolution};
use crate::field::FractalField;
use crate::marcher::{march, MarchResult};
use crate::math::{Ray, O, V3};
use crate::shader::shade;
use image::{Rgb, RgbImage};
use rayon::prelude::*;

pub fn frame_field(frame: &FrameParams) -> FractalField {
    FractalField::new(frame.seed, frame.field, frame.time)
}

/// Marches a single ray through the frame's field.
pub fn trace(frame: &FrameParams, ray: &Ray) -> MarchResult {
    march(&frame_field(frame), ray, &frame.march)
}

/// Final color of one pixel, averaged over an `antialias x antialias` grid
/// of evenly spaced sub-pixel rays.
pub fn render_pixel(frame: &FrameParams, camera: &CameraState, x: u32, y: u32) -> V3 {
    let field = frame_field(frame);
    let Resolution { width, height } = frame.resolution;
    let n = frame.antialias.max(1);
    let subpixel_width = 1. / n as f64;
    let mut pix_sum = O;
    for x_jitter in 0..n {
        for y_jitter in 0..n {
            let px = x as f64 + (x_jitter as f64 + 0.5) * subpixel_width;
            let py = y as f64 + (y_jitter as f64 + 0.5) * subpixel_width;
            let ray = camera.ray_through(px, py, width, height);
            let result = march(&field, &ray, &frame.march);
            pix_sum = pix_sum + shade(&field, &ray, &result, frame.march.max_distance);
        }
    }
    (1. / (n as f64).powi(2)) * pix_sum
}

/// Row-major colors for the whole frame, one independent job per pixel.
pub fn render_frame(frame: &FrameParams, camera: &CameraState) -> Vec<V3> {
    let w = frame.resolution.width as usize;
    let h = frame.resolution.height as usize;
    (0usize..(w * h))
        .into_par_iter()
        .map(|i| render_pixel(frame, camera, (i % w) as u32, (i / w) as u32))
        .collect()
}

fn quantize(c: f64) -> u8 {
    (c.clamp(0., 1.) * 255.).round() as u8
}

pub fn to_image(frame: &FrameParams, pixels: &[V3]) -> RgbImage {
    let w = frame.resolution.width;
    RgbImage::from_fn(w, frame.resolution.height, |x, y| {
        let color = pixels[(x + y * w) as usize];
        Rgb([quantize(color.x), quantize(color.y), quantize(color.z)])
    })
}

pub fn render_image(frame: &FrameParams, camera: &CameraState) -> RgbImage {
    to_image(frame, &render_frame(frame, camera))
}
