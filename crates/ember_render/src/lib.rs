//! Ember - CPU Path Tracing
//!
//! A Monte Carlo path tracer:
//! - Recursive ray tracing with a hard bounce cap
//! - Diffuse, metallic, refractive, and emissive materials
//! - Thin-lens camera with defocus blur
//! - Anti-aliasing via multi-sampling, gamma-corrected 8-bit output
//!
//! Scenes own their materials and textures in registries; geometry refers
//! to them through copyable ids, so nothing in the hot loop chases a
//! pointer it could dangle on.

mod camera;
mod material;
mod renderer;
mod sampling;
mod scene;
mod surface;
mod texture;

pub use camera::Camera;
pub use material::{Color, Material, MaterialId, MaterialRegistry, ScatterResult};
pub use renderer::{
    color_to_rgb, linear_to_gamma, ray_color, render, render_pixel, Background, RenderConfig,
};
pub use sampling::{gen_f32, random_in_unit_disk, random_in_unit_sphere};
pub use scene::{Scene, SceneError};
pub use surface::{Hit, Sphere, Surface};
pub use texture::{Texture, TextureId, TextureRegistry};

/// Re-export Vec3 and common math types from ember_math
pub use ember_math::{Interval, Ray, Vec3};
