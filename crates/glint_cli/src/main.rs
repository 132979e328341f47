use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glint_core::{load_scene_file, RenderSettings, Resolution, Scene};
use glint_renderer::{encode_png, render, to_base64, RenderConfig};

#[derive(Debug, Subcommand, Clone)]
enum Commands {
    /// Render a scene file to PNG
    Render {
        /// Scene description file
        scene: PathBuf,

        /// Output path (defaults to the scene name with a .png extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the PNG as base64 on stdout instead of writing a file
        #[arg(long)]
        base64: bool,

        /// Trace on a single thread
        #[arg(long)]
        serial: bool,

        /// Override the scene's width (requires --height)
        #[arg(long, requires = "height")]
        width: Option<u32>,

        /// Override the scene's height (requires --width)
        #[arg(long, requires = "width")]
        height: Option<u32>,

        /// Override the scene's max_depth
        #[arg(long)]
        max_depth: Option<u32>,

        /// Override the scene's samples per pixel axis
        #[arg(long)]
        samples: Option<u32>,
    },
    /// Print the loaded scene as JSON
    Dump { scene: PathBuf },
    /// Validate a scene file without rendering it
    Check { scene: PathBuf },
}

#[derive(Parser, Debug, Clone)]
#[command(name = "glint", author, version, about, long_about = None)]
struct Args {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    match args.command {
        Commands::Render {
            scene,
            output,
            base64,
            serial,
            width,
            height,
            max_depth,
            samples,
        } => {
            let mut config = RenderConfig::default().with_parallel(!serial);
            if let (Some(width), Some(height)) = (width, height) {
                config = config.with_resolution(
                    Resolution::new(width, height).context("Invalid --width/--height")?,
                );
            }
            if let Some(max_depth) = max_depth {
                RenderSettings::default()
                    .with_max_depth(max_depth)
                    .context("Invalid --max-depth")?;
                config = config.with_max_depth(max_depth);
            }
            if let Some(samples) = samples {
                RenderSettings::default()
                    .with_samples(samples)
                    .context("Invalid --samples")?;
                config = config.with_samples(samples);
            }
            render_command(&scene, output, base64, &config)
        }
        Commands::Dump { scene } => {
            let scene = load(&scene)?;
            let json = serde_json::to_string_pretty(&scene).context("Failed to serialize scene")?;
            println!("{}", json);
            Ok(())
        }
        Commands::Check { scene: path } => {
            let scene = load(&path)?;
            let resolution = scene.resolution();
            println!(
                "{}: ok ({}x{}, {} primitives, {} lights, {} materials)",
                path.display(),
                resolution.width,
                resolution.height,
                scene.primitive_count(),
                scene.light_count(),
                scene.material_count()
            );
            Ok(())
        }
    }
}

fn load(path: &Path) -> Result<Scene> {
    load_scene_file(path).map_err(|err| {
        let what = if err.is_scene_error() {
            "Invalid scene"
        } else {
            "Failed to read scene"
        };
        anyhow::Error::new(err).context(format!("{} {}", what, path.display()))
    })
}

fn render_command(
    path: &Path,
    output: Option<PathBuf>,
    base64: bool,
    config: &RenderConfig,
) -> Result<()> {
    let scene = load(path)?;

    let start = Instant::now();
    let image = render(&scene, config);
    log::info!("Rendered in {:?}", start.elapsed());

    let png = encode_png(&image).context("Failed to encode PNG")?;

    if base64 {
        let encoded = to_base64(&png);
        match output {
            Some(out) => std::fs::write(&out, encoded)
                .with_context(|| format!("Failed to write {}", out.display()))?,
            None => println!("{}", encoded),
        }
        return Ok(());
    }

    let out = output.unwrap_or_else(|| path.with_extension("png"));
    std::fs::write(&out, png).with_context(|| format!("Failed to write {}", out.display()))?;
    log::info!("Saved to {}", out.display());

    Ok(())
}
