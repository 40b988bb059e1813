//! Thin-lens camera for primary ray generation.

use serde::{Deserialize, Serialize};

use crate::sampling::{gen_f64, random_in_unit_disk};
use crate::{Point3, Vec3};
use ember_math::Ray;
use rand::RngCore;

/// User-facing camera description.
///
/// Loadable from JSON; missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Point camera is positioned
    pub look_from: Point3,
    /// Point camera is directed towards
    pub look_at: Point3,
    /// Identifies the up direction
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f64,
    /// Image width over height
    pub aspect_ratio: f64,
    /// Lens diameter; 0 is a pinhole
    pub aperture: f64,
    /// Distance from the camera to the plane of perfect focus
    pub focus_dist: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            look_from: Point3::ZERO,
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            aspect_ratio: 16.0 / 9.0,
            aperture: 0.0,
            focus_dist: 1.0,
        }
    }
}

impl CameraSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set vertical field of view in degrees.
    pub fn with_fov(mut self, vfov: f64) -> Self {
        self.vfov = vfov;
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, aperture: f64, focus_dist: f64) -> Self {
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    /// Derive the camera basis and viewport.
    pub fn build(&self) -> Camera {
        Camera::new(self)
    }
}

/// Camera for generating rays into the scene.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f64,
}

impl Camera {
    pub fn new(settings: &CameraSettings) -> Self {
        let theta = settings.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = settings.aspect_ratio * viewport_height;

        // Camera basis vectors
        let w = (settings.look_from - settings.look_at).normalize();
        let u = settings.vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = settings.look_from;
        let horizontal = settings.focus_dist * viewport_width * u;
        let vertical = settings.focus_dist * viewport_height * v;
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - settings.focus_dist * w;

        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: settings.aperture / 2.0,
        }
    }

    /// Ray through viewport coordinates `(s, t)`, `(0, 0)` at the bottom left.
    ///
    /// The origin is jittered over the lens disk and the ray carries a uniform shutter
    /// time in `[0, 1)`.
    pub fn get_ray(&self, s: f64, t: f64, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };
        let ray_time = gen_f64(rng);

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical
                - self.origin
                - offset,
            ray_time,
        )
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Backward viewing direction (unit length).
    pub fn w(&self) -> Vec3 {
        self.w
    }
}

impl Default for Camera {
    fn default() -> Self {
        CameraSettings::default().build()
    }
}
