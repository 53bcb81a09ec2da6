//! Ember command line front end.
//!
//! Builds one of the demonstration scenes, renders it, and writes the
//! result to a PNG or PPM file.

mod output;
mod scenes;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use ember_render::{render, RenderConfig};
use log::{info, LevelFilter};

/// Log levels selectable from the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in demonstration scenes.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScenePreset {
    /// Matte, metal, and hollow glass spheres on a checkered ground
    ThreeSpheres,
    /// The classic random-sphere cover scene
    RandomSpheres,
    /// Emissive spheres in an otherwise dark world
    Lights,
}

#[derive(Parser)]
#[command(name = "ember")]
#[command(about = "A CPU Monte Carlo path tracer")]
struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 450)]
    height: u32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value_t = 100)]
    samples_per_pixel: u32,

    /// Maximum ray bounce depth
    #[arg(long, default_value_t = 50)]
    max_depth: u32,

    /// Scene to render
    #[arg(long, value_enum, default_value = "three-spheres")]
    scene: ScenePreset,

    /// Fixed RNG seed for reproducible renders
    #[arg(long)]
    seed: Option<u64>,

    /// Output file path (.png or .ppm)
    #[arg(short, long, default_value = "output.png")]
    output: String,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let aspect = args.width as f32 / args.height as f32;
    let (scene, camera, background) = match args.scene {
        ScenePreset::ThreeSpheres => scenes::three_spheres(aspect),
        ScenePreset::RandomSpheres => scenes::random_spheres(aspect, args.seed),
        ScenePreset::Lights => scenes::lights(aspect),
    }
    .context("building scene")?;

    info!(
        "scene {:?}: {} surfaces, {} materials, {} textures",
        args.scene,
        scene.len(),
        scene.materials().len(),
        scene.textures().len()
    );

    let config = RenderConfig {
        width: args.width,
        height: args.height,
        samples_per_pixel: args.samples_per_pixel,
        max_depth: args.max_depth,
        background,
        seed: args.seed,
    };

    let pixels = render(&scene, &camera, &config);

    output::write_image(&args.output, args.width, args.height, &pixels)
        .with_context(|| format!("writing {}", args.output))?;

    Ok(())
}
