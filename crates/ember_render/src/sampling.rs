//! Shared sampling helpers.
//!
//! Every stochastic operation in the tracer draws from an explicitly
//! passed generator. Workers own their generators, so nothing here
//! touches thread-local or global RNG state.

use ember_math::Vec3;
use rand::{Rng, RngCore};

/// Draw a uniform f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen()
}

/// Sample a random point inside the unit sphere.
///
/// Rejection sampling: candidates are drawn from the enclosing cube until
/// one lands inside the sphere (a bit under half are accepted).
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = 2.0 * Vec3::new(gen_f32(rng), gen_f32(rng), gen_f32(rng)) - Vec3::ONE;
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Sample a random point inside the unit disk in the z = 0 plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = 2.0 * Vec3::new(gen_f32(rng), gen_f32(rng), 0.0) - Vec3::new(1.0, 1.0, 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
