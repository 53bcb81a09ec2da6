//! Demonstration scene builders.
//!
//! Each builder returns the populated scene, a camera matched to the
//! requested aspect ratio, and the background the scene was lit for.

use ember_math::Vec3;
use ember_render::{Background, Camera, Material, Scene, SceneError, Texture};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Checkered ground with a matte, a metal, and a hollow glass sphere.
pub fn three_spheres(aspect: f32) -> Result<(Scene, Camera, Background), SceneError> {
    let mut scene = Scene::new();

    let checker = scene.register_texture(
        "ground",
        Texture::checker(Vec3::new(0.9, 0.9, 0.9), Vec3::new(0.2, 0.3, 0.1)),
    );
    let matte = scene.register_color("matte", Vec3::new(0.1, 0.2, 0.5));

    let ground = scene.register_material("ground", Material::lambertian(checker))?;
    let center = scene.register_material("center", Material::lambertian(matte))?;
    let steel = scene.register_material("steel", Material::metal(Vec3::new(0.8, 0.6, 0.2), 0.1))?;
    let glass = scene.register_material("glass", Material::dielectric(1.5))?;

    scene.add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, ground)?;
    scene.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, center)?;
    scene.add_sphere(Vec3::new(1.0, 0.0, -1.0), 0.5, steel)?;
    // Hollow glass shell: the negative-radius inner sphere faces its
    // normal inward, so the shell refracts at both boundaries
    scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, glass)?;
    scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), -0.45, glass)?;

    let look_from = Vec3::new(3.0, 3.0, 2.0);
    let look_at = Vec3::new(0.0, 0.0, -1.0);
    let camera = Camera::new(
        look_from,
        look_at,
        Vec3::Y,
        20.0,
        aspect,
        0.2,
        (look_from - look_at).length(),
    );

    Ok((scene, camera, Background::SkyGradient))
}

/// The classic cover scene: a field of small random spheres around three
/// large ones.
pub fn random_spheres(aspect: f32, seed: Option<u64>) -> Result<(Scene, Camera, Background), SceneError> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut scene = Scene::new();

    let checker = scene.register_texture(
        "ground",
        Texture::checker(Vec3::new(0.9, 0.9, 0.9), Vec3::new(0.2, 0.3, 0.1)),
    );
    let ground = scene.register_material("ground", Material::lambertian(checker))?;
    scene.add_sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground)?;

    let glass = scene.register_material("glass", Material::dielectric(1.5))?;
    let brown = scene.register_color("brown", Vec3::new(0.4, 0.2, 0.1));
    let matte = scene.register_material("matte", Material::lambertian(brown))?;
    let silver =
        scene.register_material("silver", Material::metal(Vec3::new(0.7, 0.6, 0.5), 0.0))?;

    scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, glass)?;
    scene.add_sphere(Vec3::new(-4.0, 1.0, 0.0), 1.0, matte)?;
    scene.add_sphere(Vec3::new(4.0, 1.0, 0.0), 1.0, silver)?;

    for a in -5..5 {
        for b in -5..5 {
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choose_mat: f32 = rng.gen();
            let material = if choose_mat < 0.8 {
                let albedo = Vec3::new(
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                );
                let texture = scene.register_color(format!("diffuse_{a}_{b}"), albedo);
                scene.register_material(format!("diffuse_{a}_{b}"), Material::lambertian(texture))?
            } else if choose_mat < 0.95 {
                let albedo = Vec3::new(
                    0.5 + 0.5 * rng.gen::<f32>(),
                    0.5 + 0.5 * rng.gen::<f32>(),
                    0.5 + 0.5 * rng.gen::<f32>(),
                );
                let fuzz = 0.5 * rng.gen::<f32>();
                scene.register_material(format!("metal_{a}_{b}"), Material::metal(albedo, fuzz))?
            } else {
                glass
            };

            scene.add_sphere(center, 0.2, material)?;
        }
    }

    log::debug!(
        "random cover scene: {} surfaces, {} materials",
        scene.len(),
        scene.materials().len()
    );

    let camera = Camera::new(
        Vec3::new(13.0, 2.0, 3.0),
        Vec3::ZERO,
        Vec3::Y,
        20.0,
        aspect,
        0.1,
        10.0,
    );

    Ok((scene, camera, Background::SkyGradient))
}

/// A dark scene lit only by emissive spheres.
pub fn lights(aspect: f32) -> Result<(Scene, Camera, Background), SceneError> {
    let mut scene = Scene::new();

    let grey = scene.register_color("grey", Vec3::splat(0.5));
    let red = scene.register_color("red", Vec3::new(0.7, 0.2, 0.2));

    let ground = scene.register_material("ground", Material::lambertian(grey))?;
    let subject = scene.register_material("subject", Material::lambertian(red))?;
    let lamp = scene.register_material("lamp", Material::emissive(Vec3::splat(4.0)))?;
    let sun = scene.register_material("sun", Material::emissive(Vec3::new(7.0, 6.0, 4.0)))?;

    scene.add_sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground)?;
    scene.add_sphere(Vec3::new(0.0, 2.0, 0.0), 2.0, subject)?;
    scene.add_sphere(Vec3::new(0.0, 7.0, 0.0), 2.0, lamp)?;
    scene.add_sphere(Vec3::new(5.0, 3.0, -3.0), 1.0, sun)?;

    let camera = Camera::new(
        Vec3::new(26.0, 3.0, 6.0),
        Vec3::new(0.0, 2.0, 0.0),
        Vec3::Y,
        20.0,
        aspect,
        0.0,
        1.0,
    );

    Ok((scene, camera, Background::Black))
}
