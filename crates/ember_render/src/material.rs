//! Materials and the material registry.

use std::collections::HashMap;

use ember_math::{Ray, Vec3};
use rand::RngCore;

use crate::sampling::{gen_f32, random_in_unit_sphere};
use crate::surface::Hit;
use crate::texture::{TextureId, TextureRegistry};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Handle into a [`MaterialRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(u32);

/// Result of a successful scatter: the bounced ray and the per-bounce
/// color multiplier applied to whatever light it carries back.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// How a surface scatters or emits light.
#[derive(Debug, Clone)]
pub enum Material {
    /// Diffuse reflector; albedo comes from a texture.
    Lambertian { albedo: TextureId },
    /// Specular reflector with optional roughness.
    Metal { albedo: Color, fuzz: f32 },
    /// Clear refractive medium (glass, water) with the given index of
    /// refraction.
    Dielectric { ref_idx: f32 },
    /// Light source: absorbs whatever hits it and radiates a fixed color.
    Emissive { radiance: Color },
}

impl Material {
    /// Create a Lambertian (diffuse) material.
    pub fn lambertian(albedo: TextureId) -> Self {
        Material::Lambertian { albedo }
    }

    /// Create a metal material.
    ///
    /// - `albedo`: the color of the metal
    /// - `fuzz`: roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Create a dielectric material.
    ///
    /// - `ref_idx`: index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn dielectric(ref_idx: f32) -> Self {
        Material::Dielectric { ref_idx }
    }

    /// Create an emissive material radiating the given color.
    pub fn emissive(radiance: Color) -> Self {
        Material::Emissive { radiance }
    }

    /// The texture this material samples, if any. Used to validate
    /// handles when the material enters a scene.
    pub(crate) fn albedo_texture(&self) -> Option<TextureId> {
        match self {
            Material::Lambertian { albedo } => Some(*albedo),
            _ => None,
        }
    }

    /// Scatter an incoming ray.
    ///
    /// Returns the attenuated bounce ray, or None if the ray is absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        hit: &Hit,
        textures: &TextureRegistry,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match self {
            Material::Lambertian { albedo } => {
                // Bounce toward a random point in the unit sphere sitting
                // on the surface normal
                let target = hit.p + hit.normal + random_in_unit_sphere(rng);
                Some(ScatterResult {
                    attenuation: textures.get(*albedo).value(hit.u, hit.v, hit.p),
                    scattered: Ray::new(hit.p, target - hit.p),
                })
            }
            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(ray_in.direction.normalize(), hit.normal);
                let direction = reflected + *fuzz * random_in_unit_sphere(rng);

                // Only scatter if the fuzzed ray still leaves the surface
                if direction.dot(hit.normal) > 0.0 {
                    Some(ScatterResult {
                        attenuation: *albedo,
                        scattered: Ray::new(hit.p, direction),
                    })
                } else {
                    None
                }
            }
            Material::Dielectric { ref_idx } => {
                Some(scatter_dielectric(*ref_idx, ray_in, hit, rng))
            }
            Material::Emissive { .. } => None,
        }
    }

    /// Light emitted by this material; black for everything but
    /// [`Material::Emissive`].
    pub fn emitted(&self) -> Color {
        match self {
            Material::Emissive { radiance } => *radiance,
            _ => Color::ZERO,
        }
    }
}

/// Dielectric scattering: refract when Snell's law allows it, otherwise
/// reflect; when both are possible, choose by Schlick's Fresnel estimate.
/// Glass absorbs nothing, so this always scatters.
fn scatter_dielectric(ref_idx: f32, ray_in: &Ray, hit: &Hit, rng: &mut dyn RngCore) -> ScatterResult {
    let reflected = reflect(ray_in.direction, hit.normal);

    // hit.normal is the geometric outward normal, so its sign against the
    // ray direction tells entering apart from exiting
    let d_dot_n = ray_in.direction.dot(hit.normal);
    let (outward_normal, ni_over_nt, cosine) = if d_dot_n > 0.0 {
        (
            -hit.normal,
            ref_idx,
            ref_idx * d_dot_n / ray_in.direction.length(),
        )
    } else {
        (
            hit.normal,
            1.0 / ref_idx,
            -d_dot_n / ray_in.direction.length(),
        )
    };

    let direction = match refract(ray_in.direction, outward_normal, ni_over_nt) {
        // Reflect when the Fresnel draw says so, refract otherwise
        Some(refracted) if gen_f32(rng) >= schlick(cosine, ref_idx) => refracted,
        // Total internal reflection leaves no choice
        _ => reflected,
    };

    ScatterResult {
        attenuation: Color::ONE,
        scattered: Ray::new(hit.p, direction),
    }
}

/// Owns every material in a scene, addressed by name at construction time
/// and by [`MaterialId`] during rendering.
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
    names: HashMap<String, MaterialId>,
}

impl MaterialRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material under a name and return its handle.
    ///
    /// Registering under an existing name replaces that entry in place,
    /// so ids issued earlier keep pointing at the name's current material.
    pub fn register(&mut self, name: impl Into<String>, material: Material) -> MaterialId {
        let name = name.into();
        if let Some(&id) = self.names.get(&name) {
            self.materials[id.0 as usize] = material;
            return id;
        }
        let id = MaterialId(self.materials.len() as u32);
        self.materials.push(material);
        self.names.insert(name, id);
        id
    }

    /// Look up a previously registered material by name.
    pub fn lookup(&self, name: &str) -> Option<MaterialId> {
        self.names.get(name).copied()
    }

    /// Get the material behind a handle.
    ///
    /// Panics on a handle from a different registry that is out of range
    /// here; scene construction validates handles before they can reach
    /// the render path.
    pub fn get(&self, id: MaterialId) -> &Material {
        &self.materials[id.0 as usize]
    }

    /// Whether a handle resolves in this registry.
    pub fn contains(&self, id: MaterialId) -> bool {
        (id.0 as usize) < self.materials.len()
    }

    /// Number of registered materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through a surface with relative index `ni_over_nt`.
/// Returns None when refraction is geometrically impossible (total
/// internal reflection).
fn refract(v: Vec3, n: Vec3, ni_over_nt: f32) -> Option<Vec3> {
    let uv = v.normalize();
    let dt = uv.dot(n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);
    if discriminant > 0.0 {
        Some(ni_over_nt * (uv - n * dt) - n * discriminant.sqrt())
    } else {
        None
    }
}

/// Schlick's approximation for Fresnel reflectance.
fn schlick(cosine: f32, ref_idx: f32) -> f32 {
    let r0 = ((1.0 - ref_idx) / (1.0 + ref_idx)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_hit(normal: Vec3) -> Hit {
        Hit {
            t: 1.0,
            p: Vec3::ZERO,
            normal,
            u: 0.0,
            v: 0.0,
            material: MaterialId(0),
        }
    }

    #[test]
    fn test_reflect_specular_law() {
        let n = Vec3::Y;
        let v = Vec3::new(1.0, -1.0, 0.0);
        let r = reflect(v, n);

        assert_eq!(r, Vec3::new(1.0, 1.0, 0.0));
        // Specular law: the normal component flips sign exactly
        assert!((r.dot(n) + v.dot(n)).abs() < 1e-6);
    }

    #[test]
    fn test_reflect_preserves_length() {
        let n = Vec3::new(0.0, 0.0, 1.0);
        let v = Vec3::new(0.3, -0.7, -2.1);
        assert!((reflect(v, n).length() - v.length()).abs() < 1e-5);
    }

    #[test]
    fn test_schlick_limits() {
        // Normal incidence reflects with probability r0
        let r0 = ((1.0f32 - 1.5) / (1.0 + 1.5)).powi(2);
        assert!((schlick(1.0, 1.5) - r0).abs() < 1e-6);

        // Grazing incidence reflects almost everything
        assert!((schlick(0.0, 1.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_lambertian_scatters_from_hit_point() {
        let mut textures = TextureRegistry::new();
        let albedo = textures.register_color("red", Vec3::new(0.8, 0.3, 0.3));
        let material = Material::lambertian(albedo);

        let mut rng = StdRng::seed_from_u64(7);
        let hit = test_hit(Vec3::Z);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));

        let result = material
            .scatter(&ray, &hit, &textures, &mut rng)
            .expect("lambertian always scatters");
        assert_eq!(result.attenuation, Vec3::new(0.8, 0.3, 0.3));
        assert_eq!(result.scattered.origin, hit.p);
        // Scatter target is normal + unit-sphere point, so the bounce
        // leaves the surface
        assert!(result.scattered.direction.dot(hit.normal) > 0.0);
    }

    #[test]
    fn test_metal_reflects_mirror_direction() {
        let material = Material::metal(Vec3::ONE, 0.0);
        let textures = TextureRegistry::new();
        let mut rng = StdRng::seed_from_u64(7);

        let hit = test_hit(Vec3::Z);
        let incoming = Ray::new(Vec3::new(-1.0, 0.0, 1.0), Vec3::new(1.0, 0.0, -1.0));

        let result = material
            .scatter(&incoming, &hit, &textures, &mut rng)
            .expect("front-face mirror reflection scatters");
        let expected = reflect(incoming.direction.normalize(), hit.normal);
        assert!((result.scattered.direction - expected).length() < 1e-6);
    }

    #[test]
    fn test_metal_absorbs_backface_reflection() {
        let material = Material::metal(Vec3::ONE, 0.0);
        let textures = TextureRegistry::new();
        let mut rng = StdRng::seed_from_u64(7);

        // Ray travelling with the normal hits the back of the surface;
        // its reflection points into the surface and is absorbed
        let hit = test_hit(Vec3::Z);
        let incoming = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, 1.0));

        assert!(material
            .scatter(&incoming, &hit, &textures, &mut rng)
            .is_none());
    }

    #[test]
    fn test_metal_fuzz_is_clamped() {
        match Material::metal(Vec3::ONE, 7.5) {
            Material::Metal { fuzz, .. } => assert_eq!(fuzz, 1.0),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_dielectric_never_absorbs() {
        let material = Material::dielectric(1.5);
        let textures = TextureRegistry::new();
        let mut rng = StdRng::seed_from_u64(42);
        let hit = test_hit(Vec3::Z);

        let directions = [
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.7, -0.2, -0.4),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.3, 0.3, 0.9),
        ];
        for direction in directions {
            for _ in 0..100 {
                let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), direction);
                let result = material.scatter(&ray, &hit, &textures, &mut rng);
                let scatter = result.expect("dielectric always scatters");
                assert_eq!(scatter.attenuation, Color::ONE);
            }
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let material = Material::dielectric(1.5);
        let textures = TextureRegistry::new();
        let hit = test_hit(Vec3::Z);

        // Exiting the glass at a grazing angle, well past the critical
        // angle: refraction is impossible and every draw must reflect
        let direction = Vec3::new(1.0, 0.0, 0.1).normalize();
        let expected = reflect(direction, hit.normal);

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let ray = Ray::new(Vec3::new(-1.0, 0.0, -0.1), direction);
            let result = material
                .scatter(&ray, &hit, &textures, &mut rng)
                .expect("dielectric always scatters");
            assert!((result.scattered.direction - expected).length() < 1e-6);
        }
    }

    #[test]
    fn test_emissive_absorbs_and_radiates() {
        let material = Material::emissive(Vec3::new(4.0, 4.0, 4.0));
        let textures = TextureRegistry::new();
        let mut rng = StdRng::seed_from_u64(7);
        let hit = test_hit(Vec3::Z);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        assert!(material.scatter(&ray, &hit, &textures, &mut rng).is_none());
        assert_eq!(material.emitted(), Vec3::new(4.0, 4.0, 4.0));
    }

    #[test]
    fn test_non_emissive_emit_black() {
        assert_eq!(Material::dielectric(1.5).emitted(), Color::ZERO);
        assert_eq!(Material::metal(Vec3::ONE, 0.0).emitted(), Color::ZERO);
    }

    #[test]
    fn test_registry_roundtrip() {
        let mut registry = MaterialRegistry::new();
        let id = registry.register("glass", Material::dielectric(1.5));

        assert_eq!(registry.lookup("glass"), Some(id));
        assert!(registry.lookup("steel").is_none());
        assert!(registry.contains(id));
        assert_eq!(registry.len(), 1);
        assert!(matches!(registry.get(id), Material::Dielectric { .. }));
    }
}
