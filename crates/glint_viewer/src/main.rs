mod cli;
mod scenes;

use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::{render_parallel, ProgressiveRenderer, RayKind, Scene, StepOutcome, DEFAULT_BUCKET_SIZE};

use crate::cli::{Args, DemoScene};

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Glint");

    let settings = args.settings()?;
    let scene = build_scene(&args)?;
    let block = settings.pixel_scale;

    let image = if args.parallel {
        let mut settings = settings;
        for control in &args.controls {
            control.apply(&mut settings);
        }
        settings.validate()?;
        let glossiness = scene.effective_glossiness(settings.glossiness_factor);
        log::info!("{}", settings.status_message(glossiness));
        render_parallel(&scene, &settings, DEFAULT_BUCKET_SIZE)
    } else {
        let mut renderer = ProgressiveRenderer::new(scene, settings)?;
        for control in &args.controls {
            renderer.update_settings(|s| control.apply(s))?;
        }
        log::info!("{}", renderer.status_message());

        loop {
            let outcome = renderer.step();
            if outcome.needs_display() {
                log::debug!("{:.1}% rendered", 100.0 * renderer.session().progress());
                if let Some(path) = &args.snapshot {
                    renderer
                        .image()
                        .save_png(path, block)
                        .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
                }
            }
            if outcome == StepOutcome::Finished || outcome == StepOutcome::Idle {
                break;
            }
        }

        if let Some((x, y)) = args.debug_pixel {
            log_debug_pixel(&renderer, x, y);
        }

        renderer.image().clone()
    };

    image
        .save_png(&args.output, block)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!("Wrote {}", args.output.display());

    Ok(())
}

fn build_scene(args: &Args) -> Result<Scene> {
    match args.scene {
        DemoScene::RedSphere => scenes::red_sphere(),
        DemoScene::Room => scenes::room(args.mesh.as_deref(), args.texture.as_deref()),
    }
}

fn log_debug_pixel(renderer: &ProgressiveRenderer, x: u32, y: u32) {
    let (width, height) = (renderer.image().width(), renderer.image().height());
    if x >= width || y >= height {
        log::warn!("Debug pixel ({}, {}) is outside the {}x{} image", x, y, width, height);
        return;
    }

    let rays = renderer.debug_pixel(x, y);
    let shadows = rays.iter().filter(|r| r.kind.is_shadow()).count();
    log::info!(
        "Pixel ({}, {}): {} rays ({} shadow)",
        x,
        y,
        rays.len(),
        shadows
    );
    for ray in &rays {
        let label = match ray.kind {
            RayKind::ShadowBlocked => "shadow, blocked",
            RayKind::ShadowClear => "shadow, clear",
            RayKind::Hit => "hit",
            RayKind::Miss => "miss",
        };
        log::info!("  {} -> {} ({})", ray.start, ray.end, label);
    }
}
