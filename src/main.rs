#[macro_use]
extern crate serde_derive;

use std::env;
use std::fs::File;
use std::path::Path;
use std::time::Instant;

use env_logger::Env;
use image::{Pixel, Rgb, RgbImage};
use log::info;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::camera::Camera;
use crate::geometry::{Geometry, Model, Plane, Sphere};
use crate::ray::Ray;
use crate::render::render;
use crate::vec3::Vec3;
pub use crate::intersection::Intersection;

mod camera;
mod geometry;
mod intersection;
mod ray;
mod render;
mod vec3;

fn deserialize_rgb<'de, D>(de: D) -> Result<Rgb<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let (r, g, b) = Deserialize::deserialize(de)?;
    let rgb = Rgb([r, g, b]);

    Ok(rgb)
}

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("failed to read scene description: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed scene description: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("sphere radius must be positive, got {0}")]
    NonPositiveRadius(f64),
    #[error("plane normal must be unit length, got length {0}")]
    NonUnitNormal(f64),
    #[error("camera position and look-at target coincide")]
    DegenerateCamera,
}

#[derive(Copy, Clone, Debug)]
pub struct Material {
    pub color: Rgb<u8>,
}

/// A point light. The tint is part of the scene description; the shading
/// model only counts lights, so it is carried but not consumed.
#[derive(Copy, Clone, Debug, Deserialize)]
pub struct PointLight {
    pub pos: Vec3<f64>,
    pub color: Vec3<f64>,
}

#[derive(Copy, Clone, Debug, Deserialize)]
struct CameraConfig {
    pos: Vec3<f64>,
    look_at: Vec3<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum PrimitiveConfig {
    Sphere {
        center: Vec3<f64>,
        radius: f64,
        #[serde(deserialize_with = "deserialize_rgb")]
        color: Rgb<u8>,
    },
    Plane {
        normal: Vec3<f64>,
        offset: f64,
        #[serde(deserialize_with = "deserialize_rgb")]
        color: Rgb<u8>,
    },
}

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_extent")]
    width: u32,
    #[serde(default = "Config::default_extent")]
    height: u32,
    camera: CameraConfig,
    objects: Vec<PrimitiveConfig>,
    lights: Vec<PointLight>,
}

impl Config {
    fn default_extent() -> u32 {
        256
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let file = File::open(path)?;
        let config = serde_json::from_reader(file)?;

        Ok(config)
    }

    pub fn camera(&self) -> Result<Camera, SceneError> {
        if self.camera.pos == self.camera.look_at {
            return Err(SceneError::DegenerateCamera);
        }

        Ok(Camera::new(self.camera.pos, self.camera.look_at))
    }
}

pub struct Scene {
    objects: Vec<Model<Box<dyn Geometry + Sync>>>,
    lights: Vec<PointLight>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
        }
    }

    /// Builds the scene, rejecting geometry the intersection math cannot
    /// handle: non-positive radii and non-unit plane normals.
    pub fn from_config(config: &Config) -> Result<Self, SceneError> {
        let mut scene = Scene::new();

        for primitive in &config.objects {
            match *primitive {
                PrimitiveConfig::Sphere {
                    center,
                    radius,
                    color,
                } => {
                    if radius <= 0.0 {
                        return Err(SceneError::NonPositiveRadius(radius));
                    }
                    scene.add_object(Model {
                        geometry: Box::new(Sphere::new(center, radius)),
                        material: Material { color },
                    });
                }
                PrimitiveConfig::Plane {
                    normal,
                    offset,
                    color,
                } => {
                    if (normal.len() - 1.0).abs() > 1e-6 {
                        return Err(SceneError::NonUnitNormal(normal.len()));
                    }
                    scene.add_object(Model {
                        geometry: Box::new(Plane::new(normal, offset)),
                        material: Material { color },
                    });
                }
            }
        }

        for light in &config.lights {
            scene.add_light(*light);
        }

        Ok(scene)
    }

    pub fn add_object(&mut self, model: Model<Box<dyn Geometry + Sync>>) {
        self.objects.push(model);
    }

    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    /// Color seen along a ray: nearest hit, shadow rays, direct lighting.
    /// Black where nothing is hit.
    pub fn trace(&self, ray: &Ray) -> Rgb<u8> {
        match self.nearest_hit(ray) {
            Some((index, t)) => self.shade(ray, index, t),
            None => Rgb([0, 0, 0]),
        }
    }

    /// Scans all primitives in order and keeps the smallest distance under
    /// strict `<`, so the earlier primitive wins an exact tie. Distances
    /// are compared raw; negative and infinite values take part.
    fn nearest_hit(&self, ray: &Ray) -> Option<(usize, f64)> {
        let mut min_t = f64::INFINITY;
        let mut nearest = None;

        for (index, model) in self.objects.iter().enumerate() {
            if let Some(intersection) = model.geometry.intersection(ray) {
                if intersection.t < min_t {
                    min_t = intersection.t;
                    nearest = Some((index, intersection.t));
                }
            }
        }

        nearest
    }

    /// A light is occluded when any primitive other than the hit one
    /// reports an intersection for the shadow ray. The hit primitive is
    /// excluded by index, never by value.
    fn occluded(&self, point: Vec3<f64>, light: &PointLight, hit_index: usize) -> bool {
        let shadow_ray = Ray::new(point, (light.pos - point).unit());

        self.objects
            .iter()
            .enumerate()
            .filter(|&(index, _)| index != hit_index)
            .any(|(_, model)| model.geometry.intersection(&shadow_ray).is_some())
    }

    fn shade(&self, ray: &Ray, index: usize, t: f64) -> Rgb<u8> {
        let point = ray.offset(t);

        let lit = self
            .lights
            .iter()
            .filter(|light| !self.occluded(point, light, index))
            .count();

        // Fully shadowed points keep half the single-light weight. The
        // falloff over distance cubed is not physical either; both
        // constants define the look and stay as they are.
        let weight = if lit > 0 { lit as f64 } else { 0.5 };
        let scale = weight * 50.0 / (t * t * t);

        self.objects[index]
            .material
            .color
            .map(|c| (c as f64 * scale).round().clamp(0.0, 255.0) as u8)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let path = env::args().nth(1).unwrap_or_else(|| "scene.json".to_string());
    let config = Config::load(&path)?;
    let camera = config.camera()?;
    let scene = Scene::from_config(&config)?;

    info!(
        "rendering {}x{} image: {} objects, {} lights",
        config.width,
        config.height,
        scene.objects.len(),
        scene.lights.len()
    );

    let mut image = RgbImage::new(config.width, config.height);

    let now = Instant::now();
    render(&scene, &camera, config.width, config.height, &mut image);
    info!(
        "finished, elapsed: {:.3} ms",
        now.elapsed().as_secs_f64() * 1e3
    );

    image.save("render.png")?;

    Ok(())
}
