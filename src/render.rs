use image::{Rgb, RgbImage};
use rayon::prelude::*;

use crate::camera::Camera;
use crate::Scene;

/// Destination for rendered pixels. The driver calls `write` exactly once
/// for every coordinate in `[0, width) x [0, height)`.
pub trait PixelSink {
    fn write(&mut self, x: u32, y: u32, color: Rgb<u8>);
}

impl PixelSink for RgbImage {
    fn write(&mut self, x: u32, y: u32, color: Rgb<u8>) {
        self.put_pixel(x, y, color);
    }
}

/// Renders the scene into the sink. Pixels are computed in parallel over a
/// flat RGB buffer (scene and camera are shared read-only, every worker
/// owns a disjoint three-byte slot), then flushed by a single writer.
pub fn render(scene: &Scene, camera: &Camera, width: u32, height: u32, sink: &mut dyn PixelSink) {
    let mut buf = vec![0u8; width as usize * height as usize * 3];

    buf.par_chunks_mut(3).enumerate().for_each(|(n, pixel)| {
        let x = n as u32 % width;
        let y = n as u32 / width;

        let ray = camera.primary_ray(x, y, width, height);
        let color = scene.trace(&ray);

        pixel[0] = color[0];
        pixel[1] = color[1];
        pixel[2] = color[2];
    });

    for y in 0..height {
        for x in 0..width {
            let n = (y as usize * width as usize + x as usize) * 3;
            sink.write(x, y, Rgb([buf[n], buf[n + 1], buf[n + 2]]));
        }
    }
}
