//! Global render parameters.
//!
//! Settings are plain data with defaults for every field, so a JSON file
//! only needs to name the values it changes:
//!
//! ```json
//! { "pixel_samples": 3, "ray_samples": 20, "jitter": true }
//! ```

use std::path::Path;
use std::time::Duration;

use glint_math::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seed used to restart the sampler so renders repeat exactly.
pub const DEFAULT_SEED: u64 = 754_376_105;

/// Errors that can occur while loading or validating settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid setting '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Parameters shared by the tracer, the pixel sampler and the progressive driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Maximum recursion depth; primary rays have depth 1
    pub max_depth: u32,

    /// Sub-pixel samples per axis (the pixel gets pixel_samples^2 rays)
    pub pixel_samples: u32,

    /// Monte Carlo rays per glossy reflection and per area light
    pub ray_samples: u32,

    /// Randomly perturb each sub-pixel sample within its stratum
    pub jitter: bool,

    /// Interactive control that tightens (>1) or widens (<1) glossy cones
    pub glossiness_factor: f32,

    /// Window width in pixels
    pub width: u32,

    /// Window height in pixels
    pub height: u32,

    /// Trace one pixel per `pixel_scale x pixel_scale` window block
    pub pixel_scale: u32,

    /// Colour of primary rays that miss everything
    pub background: [f32; 3],

    /// Ambient light (Ia)
    pub ambient: [f32; 3],

    /// Point lights beyond this count are ignored
    pub max_point_lights: usize,

    /// Minimum time between interim display refreshes
    pub display_interval_ms: u64,

    /// Sampler seed applied on every restart
    pub seed: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            max_depth: 5,
            pixel_samples: 1,
            ray_samples: 10,
            jitter: false,
            glossiness_factor: 1.0,
            width: 512,
            height: 512,
            pixel_scale: 1,
            background: [0.0, 0.0, 0.0],
            ambient: [0.0, 0.0, 0.0],
            max_point_lights: 4,
            display_interval_ms: 100,
            seed: DEFAULT_SEED,
        }
    }
}

impl RenderSettings {
    /// Load settings from a JSON file and validate them.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json_str(&text)?;
        log::info!("Loaded render settings from {}", path.display());
        Ok(settings)
    }

    /// Parse settings from JSON text and validate them.
    pub fn from_json_str(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject parameter combinations the renderer cannot use.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |field, reason: &str| {
            Err(SettingsError::Invalid {
                field,
                reason: reason.to_string(),
            })
        };

        if self.pixel_samples == 0 {
            return invalid("pixel_samples", "must be at least 1");
        }
        if self.ray_samples == 0 {
            return invalid("ray_samples", "must be at least 1");
        }
        if !(self.glossiness_factor > 0.0 && self.glossiness_factor.is_finite()) {
            return invalid("glossiness_factor", "must be a positive number");
        }
        if self.width == 0 || self.height == 0 {
            return invalid("width/height", "resolution must be nonzero");
        }
        if self.pixel_scale == 0 {
            return invalid("pixel_scale", "must be at least 1");
        }
        Ok(())
    }

    /// Resolution of the traced image after applying the pixel scale.
    pub fn image_size(&self) -> (u32, u32) {
        let scale = self.pixel_scale.max(1);
        ((self.width / scale).max(1), (self.height / scale).max(1))
    }

    pub fn background_colour(&self) -> Color {
        Color::from_array(self.background)
    }

    pub fn ambient_light(&self) -> Color {
        Color::from_array(self.ambient)
    }

    pub fn display_interval(&self) -> Duration {
        Duration::from_millis(self.display_interval_ms)
    }

    pub fn increase_pixel_samples(&mut self) {
        self.pixel_samples += 1;
    }

    pub fn decrease_pixel_samples(&mut self) {
        self.pixel_samples = self.pixel_samples.saturating_sub(1).max(1);
    }

    pub fn increase_ray_samples(&mut self) {
        self.ray_samples *= 2;
    }

    pub fn decrease_ray_samples(&mut self) {
        self.ray_samples = (self.ray_samples / 2).max(1);
    }

    pub fn toggle_jitter(&mut self) {
        self.jitter = !self.jitter;
    }

    /// Make glossy reflections sharper.
    pub fn sharpen_gloss(&mut self) {
        self.glossiness_factor *= 2.0;
    }

    /// Make glossy reflections blurrier.
    pub fn soften_gloss(&mut self) {
        self.glossiness_factor /= 2.0;
    }

    /// One-line human-readable summary of the sampling parameters.
    ///
    /// `glossiness` is the effective glossiness of the scene's glossy
    /// surfaces, omitted when there are none.
    pub fn status_message(&self, glossiness: Option<f32>) -> String {
        let gloss = match glossiness {
            Some(g) if g > 0.0 => format!(", glossiness {g}"),
            _ => String::new(),
        };
        format!(
            "{n}x{n} pixel rays, {} sample rays{}{}",
            self.ray_samples,
            gloss,
            if self.jitter { ", jitter" } else { "" },
            n = self.pixel_samples,
        )
    }
}
