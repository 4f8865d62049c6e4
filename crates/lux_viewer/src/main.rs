mod cli;
mod logger;
mod scene;
mod sink;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use lux_core::load_texture;
use lux_renderer::{
    PathRenderer, PhotonRenderer, ProgressiveRender, RenderError, RenderSettings, SceneContext,
    StepStatus,
};

use crate::cli::Args;
use crate::sink::PngSink;

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_logger(args.log_level.clone().into());

    log::info!("Starting lux");

    let mut settings = match &args.config {
        Some(path) => RenderSettings::from_json_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => RenderSettings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(size) = args.size {
        settings.image_size = size;
    }
    settings.validate().context("Invalid render settings")?;

    let floor_texture = match &args.floor_texture {
        Some(path) => {
            let texture = load_texture(path)
                .with_context(|| format!("Failed to load texture {}", path.display()))?;
            Some(Arc::new(texture))
        }
        None => None,
    };

    let scene = scene::demo_room(floor_texture);
    let ctx = SceneContext::new(&scene);

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    if args.pipeline.runs_photon() {
        run_photon_map(&ctx, &settings, &args.output, args.snapshot_every)?;
    }
    if args.pipeline.runs_path() {
        run_path_tracer(&ctx, &settings, &args.output, args.snapshot_every)?;
    }

    log::info!("Done");
    Ok(())
}

fn run_photon_map(
    ctx: &SceneContext,
    settings: &RenderSettings,
    output: &Path,
    snapshot_every: usize,
) -> Result<()> {
    let mut rng = settings.make_rng();
    let mut renderer = match PhotonRenderer::new(ctx, settings.clone(), &mut rng) {
        Ok(renderer) => renderer,
        Err(RenderError::NoPointLights) => {
            log::error!("Photon mapping skipped: the scene has no point lights");
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to start photon mapping"),
    };

    let mut sink = PngSink::new(output.join("photon_map.png"));
    drive("Photon map", &mut renderer, &mut sink, snapshot_every)
}

fn run_path_tracer(
    ctx: &SceneContext,
    settings: &RenderSettings,
    output: &Path,
    snapshot_every: usize,
) -> Result<()> {
    let mut renderer = PathRenderer::new(ctx, settings.clone(), settings.make_rng())
        .context("Failed to start path tracing")?;

    let mut sink = PngSink::new(output.join("path_traced.png"));
    drive("Path tracer", &mut renderer, &mut sink, snapshot_every)
}

/// Step a renderer to completion, logging progress and presenting frames.
fn drive<R: ProgressiveRender>(
    label: &str,
    renderer: &mut R,
    sink: &mut PngSink,
    snapshot_every: usize,
) -> Result<()> {
    let mut steps = 0;
    let mut stage = 0;

    loop {
        let status = renderer.step();
        steps += 1;

        let progress = renderer.progress();
        if progress.stage != stage {
            stage = progress.stage;
            log::info!("{}: {}", label, progress);
        } else {
            log::trace!("{}: {}", label, progress);
        }

        if status == StepStatus::Done {
            break;
        }
        if snapshot_every > 0 && steps % snapshot_every == 0 {
            renderer.framebuffer().present(sink)?;
        }
    }

    renderer.framebuffer().present(sink)?;
    log::info!(
        "{}: {} steps, {} frames written to {}",
        label,
        steps,
        sink.frames(),
        sink.path().display()
    );
    Ok(())
}
