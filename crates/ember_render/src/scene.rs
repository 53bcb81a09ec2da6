//! Scene aggregate: surfaces plus the registries they reference.

use ember_math::{Interval, Ray, Vec3};
use thiserror::Error;

use crate::material::{Material, MaterialId, MaterialRegistry};
use crate::surface::{Hit, Sphere, Surface};
use crate::texture::{Texture, TextureId, TextureRegistry};

/// Errors raised while assembling a scene.
///
/// All of these are construction-time: once a scene is built, rendering
/// cannot fail on a dangling reference.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("unknown texture '{0}'")]
    UnknownTexture(String),

    #[error("unknown material '{0}'")]
    UnknownMaterial(String),

    #[error("texture handle does not resolve in this scene's registry")]
    UnresolvedTexture,

    #[error("material handle does not resolve in this scene's registry")]
    UnresolvedMaterial,
}

/// A collection of surfaces together with the material and texture
/// registries they index into.
///
/// The scene owns the registries, so every handle held by a surface stays
/// valid for as long as the surface exists. Handles are checked when they
/// enter the scene; the render path indexes without further checks.
#[derive(Debug, Default)]
pub struct Scene {
    textures: TextureRegistry,
    materials: MaterialRegistry,
    surfaces: Vec<Surface>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture under a name.
    pub fn register_texture(&mut self, name: impl Into<String>, texture: Texture) -> TextureId {
        self.textures.register(name, texture)
    }

    /// Register a uniform color texture under a name.
    pub fn register_color(&mut self, name: impl Into<String>, color: Vec3) -> TextureId {
        self.textures.register_color(name, color)
    }

    /// Register a material under a name.
    ///
    /// Fails fast if the material samples a texture handle this scene's
    /// registry cannot resolve.
    pub fn register_material(
        &mut self,
        name: impl Into<String>,
        material: Material,
    ) -> Result<MaterialId, SceneError> {
        if let Some(texture) = material.albedo_texture() {
            if !self.textures.contains(texture) {
                return Err(SceneError::UnresolvedTexture);
            }
        }
        Ok(self.materials.register(name, material))
    }

    /// Resolve a texture name registered earlier.
    pub fn texture(&self, name: &str) -> Result<TextureId, SceneError> {
        self.textures
            .lookup(name)
            .ok_or_else(|| SceneError::UnknownTexture(name.to_string()))
    }

    /// Resolve a material name registered earlier.
    pub fn material(&self, name: &str) -> Result<MaterialId, SceneError> {
        self.materials
            .lookup(name)
            .ok_or_else(|| SceneError::UnknownMaterial(name.to_string()))
    }

    /// Add a surface to the scene.
    ///
    /// Fails fast if the surface references a material handle this
    /// scene's registry cannot resolve.
    pub fn add(&mut self, surface: Surface) -> Result<(), SceneError> {
        if !self.materials.contains(surface.material()) {
            return Err(SceneError::UnresolvedMaterial);
        }
        self.surfaces.push(surface);
        Ok(())
    }

    /// Add a sphere to the scene.
    pub fn add_sphere(
        &mut self,
        center: Vec3,
        radius: f32,
        material: MaterialId,
    ) -> Result<(), SceneError> {
        self.add(Surface::Sphere(Sphere::new(center, radius, material)))
    }

    /// Find the closest hit across all surfaces within `ray_t`.
    ///
    /// Linear scan narrowing the interval to the closest hit found so
    /// far, so later candidates are only accepted if strictly closer.
    /// Insertion order never changes the result.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<Hit> {
        let mut closest_so_far = ray_t.max;
        let mut closest_hit = None;

        for surface in &self.surfaces {
            if let Some(hit) = surface.hit(ray, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = hit.t;
                closest_hit = Some(hit);
            }
        }

        closest_hit
    }

    /// The scene's texture registry.
    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    /// The scene's material registry.
    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    /// Number of surfaces in the scene.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Whether the scene holds no surfaces.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}
