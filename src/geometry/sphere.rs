use crate::geometry::Geometry;
use crate::ray::Ray;
use crate::vec3::Vec3;
use crate::Intersection;

#[derive(Copy, Clone, Debug)]
pub struct Sphere {
    center: Vec3<f64>,
    radius2: f64,
}

impl Sphere {
    pub fn new(center: Vec3<f64>, radius: f64) -> Self {
        Self {
            center,
            radius2: radius * radius,
        }
    }
}

impl Geometry for Sphere {
    fn intersection(&self, ray: &Ray) -> Option<Intersection> {
        let eo = self.center - ray.origin();
        let v = eo.dot(ray.direction());

        // The center projects behind the ray origin. Rejecting here also
        // drops the exit hit a ray starting inside the sphere would have.
        if v < 0.0 {
            return None;
        }

        let disc = self.radius2 - (eo.dot(&eo) - v * v);
        if disc < 0.0 {
            return None;
        }

        let t = v - disc.sqrt();

        // Tangential hits and rays starting on the surface collapse to a
        // distance of exactly zero and are treated as a miss.
        if t == 0.0 {
            return None;
        }

        Some(Intersection::new(t))
    }
}

#[cfg(test)]
mod tests {
    use super::Sphere;
    use crate::geometry::Geometry;
    use crate::ray::Ray;
    use crate::vec3::Vec3;

    #[test]
    fn test_head_on_hit_distance() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));

        let hit = sphere.intersection(&ray).unwrap();

        // Distance to the center minus the radius.
        assert!((hit.t - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_ray_pointing_away_misses() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));

        assert!(sphere.intersection(&ray).is_none());
    }

    #[test]
    fn test_tangent_from_surface_collapses_to_miss() {
        // Origin sits on the sphere, direction tangent to it: the distance
        // works out to exactly zero and the hit is dropped.
        let sphere = Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));

        assert!(sphere.intersection(&ray).is_none());
    }

    #[test]
    fn test_center_behind_origin_is_rejected() {
        // The origin is inside the sphere and the exit point lies ahead,
        // but the center projects behind the origin, which rejects.
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -0.5), 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));

        assert!(sphere.intersection(&ray).is_none());
    }

    #[test]
    fn test_origin_inside_reports_negative_distance() {
        // Center ahead of the origin, origin inside: the near root is
        // negative and is reported as-is.
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 0.5), 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));

        let hit = sphere.intersection(&ray).unwrap();

        assert!(hit.t < 0.0);
    }
}
