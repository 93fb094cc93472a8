use crate::geometry::Geometry;
use crate::ray::Ray;
use crate::vec3::Vec3;
use crate::Intersection;

/// The set of points `p` with `dot(normal, p) + offset == 0`. The normal
/// must be unit length; scene construction validates this.
#[derive(Copy, Clone, Debug)]
pub struct Plane {
    normal: Vec3<f64>,
    offset: f64,
}

impl Plane {
    pub fn new(normal: Vec3<f64>, offset: f64) -> Self {
        Self { normal, offset }
    }
}

impl Geometry for Plane {
    fn intersection(&self, ray: &Ray) -> Option<Intersection> {
        let denom = self.normal.dot(ray.direction());

        // Only rays travelling against the normal can hit the front face.
        if denom > 0.0 {
            return None;
        }

        // No further checks: a plane behind the origin reports a negative
        // distance, and a parallel ray (denom == 0) divides by -0.0 and
        // reports an infinite one. The nearest-hit scan takes them as-is.
        let t = (self.normal.dot(&ray.origin()) + self.offset) / -denom;

        Some(Intersection::new(t))
    }
}
