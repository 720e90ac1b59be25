//! Pixel-at-a-time render session.
//!
//! A [`RenderSession`] holds everything a progressive render mutates: the
//! cursor, the accumulation image, the random generator and the time of the
//! last display refresh. Each [`RenderSession::step`] computes exactly one
//! pixel, so a host event loop can interleave rendering with other work.

use std::time::Instant;

use glint_core::RenderSettings;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::accumulation::AccumulationImage;
use crate::camera::ImagePlane;
use crate::integrator::Tracer;
use crate::ray_log::{RayLog, RaySegment};
use crate::sampler::{pixel_rng, shade_pixel};
use crate::scene::Scene;

/// Next pixel to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub x: u32,
    pub y: u32,
    pub stopped: bool,
}

/// Result of one [`RenderSession::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The session is stopped; nothing was computed
    Idle,
    /// One pixel was computed
    Traced,
    /// One pixel was computed and an interim display refresh is due
    Refresh,
    /// The last pixel was computed; the image is complete
    Finished,
}

impl StepOutcome {
    /// Whether the host should redraw the image now.
    pub fn needs_display(self) -> bool {
        matches!(self, StepOutcome::Refresh | StepOutcome::Finished)
    }
}

pub struct RenderSession {
    settings: RenderSettings,
    plane: ImagePlane,
    image: AccumulationImage,
    cursor: Cursor,
    rng: StdRng,
    started: Instant,
    last_refresh: Instant,
}

impl RenderSession {
    /// Begin rendering `scene` from its current eye.
    ///
    /// The generator is reseeded from the settings so every run of the
    /// same scene produces the same image.
    pub fn start(scene: &Scene, settings: RenderSettings) -> Self {
        let (width, height) = settings.image_size();
        let plane = ImagePlane::new(scene.eye(), width, height);

        let lights = scene.lights().len();
        if lights > settings.max_point_lights {
            log::warn!(
                "Scene has {} point lights; only the first {} are used",
                lights,
                settings.max_point_lights
            );
        }
        log::debug!(
            "Starting {}x{} render: {}",
            width,
            height,
            settings.status_message(scene.effective_glossiness(settings.glossiness_factor))
        );

        let now = Instant::now();
        Self {
            rng: StdRng::seed_from_u64(settings.seed),
            settings,
            plane,
            image: AccumulationImage::new(width, height),
            cursor: Cursor {
                x: 0,
                y: 0,
                stopped: false,
            },
            started: now,
            last_refresh: now,
        }
    }

    /// Compute the pixel under the cursor and advance.
    ///
    /// The cursor walks each column bottom to top before moving right.
    /// Stopped sessions do nothing.
    pub fn step(&mut self, scene: &Scene) -> StepOutcome {
        if self.cursor.stopped {
            return StepOutcome::Idle;
        }

        let Cursor { x, y, .. } = self.cursor;
        let tracer = Tracer::new(scene, &self.settings);
        let colour = shade_pixel(&tracer, &self.plane, x, y, &mut self.rng);
        self.image.set(x, y, colour);

        self.cursor.y += 1;
        if self.cursor.y >= self.plane.height {
            self.cursor.y = 0;
            self.cursor.x += 1;
            if self.cursor.x >= self.plane.width {
                self.cursor.stopped = true;
                log::info!(
                    "Render complete: {}x{} in {:.2?}",
                    self.plane.width,
                    self.plane.height,
                    self.started.elapsed()
                );
                return StepOutcome::Finished;
            }
        }

        if self.last_refresh.elapsed() >= self.settings.display_interval() {
            self.last_refresh = Instant::now();
            return StepOutcome::Refresh;
        }
        StepOutcome::Traced
    }

    /// Stop early; later steps do nothing.
    pub fn stop(&mut self) {
        self.cursor.stopped = true;
    }

    pub fn is_finished(&self) -> bool {
        self.cursor.stopped
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn image(&self) -> &AccumulationImage {
        &self.image
    }

    pub fn into_image(self) -> AccumulationImage {
        self.image
    }

    /// Fraction of pixels computed, in [0, 1].
    pub fn progress(&self) -> f32 {
        let total = self.plane.width as usize * self.plane.height as usize;
        self.image.rendered_count() as f32 / total as f32
    }

    /// Trace one pixel again and return every ray it tested.
    ///
    /// Uses its own generator, so the session's image and sequence are
    /// unaffected.
    pub fn debug_pixel(&self, scene: &Scene, x: u32, y: u32) -> Vec<RaySegment> {
        let log = RayLog::new();
        let tracer = Tracer::new(scene, &self.settings).with_observer(&log);
        let mut rng = pixel_rng(self.settings.seed, x, y);

        let colour = shade_pixel(&tracer, &self.plane, x, y, &mut rng);
        log::debug!("Pixel ({}, {}) = {} from {} rays", x, y, colour, log.len());
        log.take()
    }
}
