//! Geometric surfaces and the hit record.

use std::f32::consts::PI;

use ember_math::{Interval, Ray, Vec3};

use crate::material::MaterialId;

/// Record of a ray-surface intersection.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    /// Ray parameter where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Geometric unit normal, `(p - center) / radius`. For a positive
    /// radius this points out of the sphere; a negative radius flips it
    /// inward, which is what makes hollow glass shells work.
    pub normal: Vec3,
    /// Surface coordinates for texture lookup
    pub u: f32,
    pub v: f32,
    /// Material at the intersection point
    pub material: MaterialId,
}

/// A sphere primitive.
///
/// The radius may be negative: the geometry is unchanged but the normal
/// points inward, turning the sphere into the inner wall of a shell.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: MaterialId,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: MaterialId) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    /// Sphere center.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Signed sphere radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub(crate) fn material(&self) -> MaterialId {
        self.material
    }

    /// Get the UV coordinates for a point on the unit sphere.
    fn sphere_uv(p: Vec3) -> (f32, f32) {
        // theta: angle down from +Y; phi: angle around Y axis from +X
        let theta = (-p.y).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        (phi / (2.0 * PI), theta / PI)
    }

    /// Test the ray against this sphere, accepting the nearest root
    /// strictly inside `ray_t`.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<Hit> {
        let oc = self.center - ray.origin;
        let a = ray.direction.length_squared();
        let h = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        let normal = (p - self.center) / self.radius;
        let (u, v) = Self::sphere_uv(normal);

        Some(Hit {
            t: root,
            p,
            normal,
            u,
            v,
            material: self.material,
        })
    }
}

/// A surface a ray can intersect. Closed set of primitives dispatched by
/// match, so the hot loop never goes through a vtable.
#[derive(Debug, Clone)]
pub enum Surface {
    Sphere(Sphere),
}

impl Surface {
    /// Test if a ray hits this surface within the given interval.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<Hit> {
        match self {
            Surface::Sphere(sphere) => sphere.hit(ray, ray_t),
        }
    }

    pub(crate) fn material(&self) -> MaterialId {
        match self {
            Surface::Sphere(sphere) => sphere.material(),
        }
    }
}

impl From<Sphere> for Surface {
    fn from(sphere: Sphere) -> Self {
        Surface::Sphere(sphere)
    }
}
