//! Render a scene file to a PNG.
//!
//! Usage: `whitted <scene-file> <output.png> [width height] [--seed N]`

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use whitted_core::load_scene;
use whitted_renderer::{render, RenderConfig, Scene};

const USAGE: &str = "usage: whitted <scene-file> <output.png> [width height] [--seed N]";

/// Parsed command line.
#[derive(Debug)]
struct Args {
    scene: PathBuf,
    output: PathBuf,
    config: RenderConfig,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut positional = Vec::new();
    let mut config = RenderConfig::default();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--seed" {
            let value = args.next().context("--seed needs a value")?;
            config.seed = value
                .parse()
                .with_context(|| format!("invalid seed '{value}'"))?;
        } else {
            positional.push(arg);
        }
    }

    let (scene, output) = match positional.as_slice() {
        [scene, output] => (scene, output),
        [scene, output, width, height] => {
            let width = width
                .parse()
                .with_context(|| format!("invalid width '{width}'"))?;
            let height = height
                .parse()
                .with_context(|| format!("invalid height '{height}'"))?;
            config = config.with_resolution(width, height);
            (scene, output)
        }
        _ => bail!(USAGE),
    };

    Ok(Args {
        scene: PathBuf::from(scene),
        output: PathBuf::from(output),
        config,
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args(std::env::args().skip(1))?;
    log::info!("Starting whitted");

    let description = load_scene(&args.scene)
        .with_context(|| format!("failed to load scene {}", args.scene.display()))?;

    let scene = Scene::from_description(&description, args.config.aspect_ratio());
    let image = render(&scene, &args.config).context("render failed")?;

    image
        .save_png(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    Ok(())
}
