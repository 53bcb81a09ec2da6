//! Thin-lens camera for ray generation.

use ember_math::{Ray, Vec3};
use rand::RngCore;

use crate::sampling::random_in_unit_disk;

/// Maps normalized image-plane coordinates to world-space rays.
///
/// Built once from a look-at description; immutable afterwards. The
/// projection plane sits at the focus distance, so with a nonzero
/// aperture every lens sample converges on the same plane point and
/// everything off that plane blurs.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Create a camera.
    ///
    /// - `look_from` / `look_at` / `vup`: position and orientation
    /// - `vfov`: vertical field of view in degrees
    /// - `aspect`: image width over height
    /// - `aperture`: lens diameter; 0.0 disables defocus blur
    /// - `focus_dist`: distance to the plane of perfect focus
    pub fn new(
        look_from: Vec3,
        look_at: Vec3,
        vup: Vec3,
        vfov: f32,
        aspect: f32,
        aperture: f32,
        focus_dist: f32,
    ) -> Self {
        let lens_radius = aperture / 2.0;

        let theta = vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = aspect * half_height;

        let w = (look_from - look_at).normalize();
        let u = vup.cross(w).normalize();
        let v = w.cross(u);

        let lower_left_corner = look_from
            - half_width * focus_dist * u
            - half_height * focus_dist * v
            - focus_dist * w;

        Self {
            origin: look_from,
            lower_left_corner,
            horizontal: 2.0 * half_width * focus_dist * u,
            vertical: 2.0 * half_height * focus_dist * v,
            u,
            v,
            lens_radius,
        }
    }

    /// Generate the ray through plane coordinates `(s, t)` in [0, 1]^2,
    /// measured from the lower-left corner.
    ///
    /// The origin is jittered across the lens disk; the same offset is
    /// subtracted from the plane target so the ray still passes through
    /// the chosen focus-plane point.
    pub fn ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical
                - self.origin
                - offset,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn straight_camera() -> Camera {
        Camera::new(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::Y,
            90.0,
            2.0,
            0.0,
            1.0,
        )
    }

    #[test]
    fn test_center_ray_points_down_the_view_axis() {
        let camera = straight_camera();
        let mut rng = StdRng::seed_from_u64(42);

        let ray = camera.ray(0.5, 0.5, &mut rng);
        assert_eq!(ray.origin, Vec3::ZERO);
        assert!((ray.direction - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_corner_rays_span_the_plane() {
        // vfov 90 at focus 1 gives half-height 1; aspect 2 gives half-width 2
        let camera = straight_camera();
        let mut rng = StdRng::seed_from_u64(42);

        let bottom_left = camera.ray(0.0, 0.0, &mut rng);
        assert!((bottom_left.direction - Vec3::new(-2.0, -1.0, -1.0)).length() < 1e-4);

        let top_right = camera.ray(1.0, 1.0, &mut rng);
        assert!((top_right.direction - Vec3::new(2.0, 1.0, -1.0)).length() < 1e-4);
    }

    #[test]
    fn test_zero_aperture_pins_the_origin() {
        let camera = Camera::new(
            Vec3::new(3.0, 3.0, 2.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::Y,
            20.0,
            1.5,
            0.0,
            5.2,
        );
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..16 {
            let ray = camera.ray(0.3, 0.8, &mut rng);
            assert_eq!(ray.origin, Vec3::new(3.0, 3.0, 2.0));
        }
    }

    #[test]
    fn test_lens_rays_converge_on_the_focus_plane() {
        let camera = Camera::new(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::Y,
            90.0,
            1.0,
            2.0,
            3.0,
        );
        let mut rng = StdRng::seed_from_u64(42);

        // All rays through (s, t) hit the same focus-plane point whatever
        // the lens sample was
        let mut target = None;
        for _ in 0..16 {
            let ray = camera.ray(0.25, 0.75, &mut rng);
            // Focus plane is z = -3 for this camera
            let t = -3.0 / ray.direction.z;
            let point = ray.at(t);
            match target {
                None => target = Some(point),
                Some(expected) => assert!((point - expected).length() < 1e-4),
            }
        }
    }
}
