use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glint_core::RenderSettings;
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
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

/// Built-in scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoScene {
    /// Diffuse red sphere under one point light
    RedSphere,
    /// Closed room with an area light, glossy and mirror spheres
    Room,
}

/// Interactive sampling controls, applied in order before rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Control {
    MorePixelSamples,
    FewerPixelSamples,
    MoreRaySamples,
    FewerRaySamples,
    Jitter,
    SharpenGloss,
    SoftenGloss,
}

impl Control {
    pub fn apply(self, settings: &mut RenderSettings) {
        match self {
            Control::MorePixelSamples => settings.increase_pixel_samples(),
            Control::FewerPixelSamples => settings.decrease_pixel_samples(),
            Control::MoreRaySamples => settings.increase_ray_samples(),
            Control::FewerRaySamples => settings.decrease_ray_samples(),
            Control::Jitter => settings.toggle_jitter(),
            Control::SharpenGloss => settings.sharpen_gloss(),
            Control::SoftenGloss => settings.soften_gloss(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(about = "Progressive Phong ray tracer")]
pub struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value = "room")]
    pub scene: DemoScene,

    /// JSON render settings; command-line flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Trace one pixel per NxN block
    #[arg(long)]
    pub pixel_scale: Option<u32>,

    /// Sub-pixel samples per axis
    #[arg(long, short = 'p')]
    pub pixel_samples: Option<u32>,

    /// Monte Carlo samples for glossy reflection and area lights
    #[arg(long, short = 's')]
    pub ray_samples: Option<u32>,

    /// Maximum recursion depth
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Jitter sub-pixel samples
    #[arg(long)]
    pub jitter: bool,

    /// Sampler seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Sampling controls to apply, in order
    #[arg(long = "control", value_enum)]
    pub controls: Vec<Control>,

    /// Wavefront OBJ mesh to add to the room
    #[arg(long)]
    pub mesh: Option<PathBuf>,

    /// Image texture for the room's floor
    #[arg(long)]
    pub texture: Option<PathBuf>,

    /// Render all buckets in parallel instead of one pixel at a time
    #[arg(long)]
    pub parallel: bool,

    /// Write the partial image here on every display refresh
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Log the rays traced for pixel X,Y after rendering
    #[arg(long, value_parser = parse_pixel)]
    pub debug_pixel: Option<(u32, u32)>,

    /// Output PNG path
    #[arg(short, long, default_value = "glint.png")]
    pub output: PathBuf,
}

impl Args {
    /// Load the settings file, if any, then apply command-line overrides.
    pub fn settings(&self) -> anyhow::Result<RenderSettings> {
        let mut settings = match &self.config {
            Some(path) => RenderSettings::load_json(path)?,
            None => RenderSettings::default(),
        };

        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(scale) = self.pixel_scale {
            settings.pixel_scale = scale;
        }
        if let Some(samples) = self.pixel_samples {
            settings.pixel_samples = samples;
        }
        if let Some(samples) = self.ray_samples {
            settings.ray_samples = samples;
        }
        if let Some(depth) = self.max_depth {
            settings.max_depth = depth;
        }
        if self.jitter {
            settings.jitter = true;
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }

        settings.validate()?;
        Ok(settings)
    }
}

fn parse_pixel(s: &str) -> Result<(u32, u32), String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected X,Y but got '{s}'"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "glint",
            "--width",
            "64",
            "--pixel-samples",
            "3",
            "--jitter",
            "--control",
            "more-ray-samples",
            "--debug-pixel",
            "4, 5",
        ]);
        let settings = args.settings().unwrap();

        assert_eq!(settings.width, 64);
        assert_eq!(settings.height, 512);
        assert_eq!(settings.pixel_samples, 3);
        assert!(settings.jitter);
        assert_eq!(args.controls, vec![Control::MoreRaySamples]);
        assert_eq!(args.debug_pixel, Some((4, 5)));
        assert_eq!(args.scene, DemoScene::Room);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let args = Args::parse_from(["glint", "--ray-samples", "0"]);
        assert!(args.settings().is_err());
    }

    #[test]
    fn test_controls() {
        let mut settings = RenderSettings::default();
        for control in [Control::MorePixelSamples, Control::MoreRaySamples, Control::Jitter, Control::SoftenGloss] {
            control.apply(&mut settings);
        }

        assert_eq!(settings.pixel_samples, 2);
        assert_eq!(settings.ray_samples, 20);
        assert!(settings.jitter);
        assert_eq!(settings.glossiness_factor, 0.5);
    }

    #[test]
    fn test_parse_pixel() {
        assert_eq!(parse_pixel("10,20"), Ok((10, 20)));
        assert!(parse_pixel("10").is_err());
        assert!(parse_pixel("a,2").is_err());
    }
}
