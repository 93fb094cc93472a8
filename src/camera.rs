use crate::ray::Ray;
use crate::vec3::Vec3;

/// Half-extent of the view plane. Together with the halving in
/// `primary_ray` this fixes the field of view; change both or neither.
const VIEW_SCALE: f64 = 1.5;

/// View basis built once from a position and a look-at target. `forward` is
/// unit length, `right` and `up` carry the view-plane scale.
#[derive(Copy, Clone, Debug)]
pub struct Camera {
    pos: Vec3<f64>,
    forward: Vec3<f64>,
    right: Vec3<f64>,
    up: Vec3<f64>,
}

impl Camera {
    /// The position must differ from the target; scene construction
    /// validates this before calling.
    pub fn new(pos: Vec3<f64>, look_at: Vec3<f64>) -> Self {
        let down = Vec3::new(0.0, -1.0, 0.0);
        let forward = (look_at - pos).unit();
        let right = forward.cross(&down).unit().scale(VIEW_SCALE);
        let up = forward.cross(&right).unit().scale(VIEW_SCALE);

        Self {
            pos,
            forward,
            right,
            up,
        }
    }

    #[inline]
    pub fn forward(&self) -> &Vec3<f64> {
        &self.forward
    }

    /// Maps a pixel to the ray through it, recentering the pixel on the
    /// image midpoint and walking the view basis.
    pub fn primary_ray(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        let rx = (x as f64 - width as f64 / 2.0) / 2.0 / width as f64;
        let ry = -(y as f64 - height as f64 / 2.0) / 2.0 / height as f64;

        let direction = (self.forward + self.right.scale(rx) + self.up.scale(ry)).unit();

        Ray::new(self.pos, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::Camera;
    use crate::vec3::Vec3;

    #[test]
    fn test_center_pixel_looks_forward() {
        let camera = Camera::new(Vec3::new(3.0, 2.0, 4.0), Vec3::new(-1.0, 0.5, 0.0));

        let ray = camera.primary_ray(128, 128, 256, 256);
        let forward = camera.forward().unit();

        assert!((ray.direction().x - forward.x).abs() < 1e-12);
        assert!((ray.direction().y - forward.y).abs() < 1e-12);
        assert!((ray.direction().z - forward.z).abs() < 1e-12);
    }

    #[test]
    fn test_corner_pixel_direction_is_unit() {
        let camera = Camera::new(Vec3::new(0.0, 1.0, -5.0), Vec3::new(0.0, 1.0, 0.0));

        let ray = camera.primary_ray(0, 0, 256, 256);

        // Off-center pixels tilt the direction away from forward.
        assert!(ray.direction().dot(camera.forward()) < 1.0);
        assert!((ray.direction().len() - 1.0).abs() < 1e-12);
    }
}
