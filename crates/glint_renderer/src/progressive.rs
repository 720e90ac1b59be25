//! Host-facing progressive renderer.

use glint_core::{Eye, RenderSettings, SettingsError};

use crate::accumulation::AccumulationImage;
use crate::ray_log::RaySegment;
use crate::scene::Scene;
use crate::session::{RenderSession, StepOutcome};

/// Owns a scene, its settings and the current render session.
///
/// Changing the eye or the settings throws the session away and starts a
/// new one from the first pixel.
pub struct ProgressiveRenderer {
    scene: Scene,
    settings: RenderSettings,
    session: RenderSession,
}

impl ProgressiveRenderer {
    pub fn new(scene: Scene, settings: RenderSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let session = RenderSession::start(&scene, settings.clone());

        Ok(Self {
            scene,
            settings,
            session,
        })
    }

    /// Discard the image and start again from the first pixel.
    pub fn restart(&mut self) {
        self.session = RenderSession::start(&self.scene, self.settings.clone());
    }

    /// Advance the render by one pixel.
    pub fn step(&mut self) -> StepOutcome {
        self.session.step(&self.scene)
    }

    /// Step until the image is complete.
    pub fn finish(&mut self) -> &AccumulationImage {
        while !self.session.is_finished() {
            self.step();
        }
        self.session.image()
    }

    pub fn set_eye(&mut self, eye: Eye) {
        self.scene.set_eye(eye);
        self.restart();
    }

    /// Apply a change to the settings and restart.
    ///
    /// Changes that leave the settings invalid are rolled back.
    pub fn update_settings(&mut self, change: impl FnOnce(&mut RenderSettings)) -> Result<(), SettingsError> {
        let mut settings = self.settings.clone();
        change(&mut settings);
        settings.validate()?;

        self.settings = settings;
        log::info!("{}", self.status_message());
        self.restart();
        Ok(())
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn session(&self) -> &RenderSession {
        &self.session
    }

    pub fn image(&self) -> &AccumulationImage {
        self.session.image()
    }

    pub fn is_finished(&self) -> bool {
        self.session.is_finished()
    }

    pub fn status_message(&self) -> String {
        let glossiness = self.scene.effective_glossiness(self.settings.glossiness_factor);
        self.settings.status_message(glossiness)
    }

    /// Rays tested while computing one pixel of the current image.
    pub fn debug_pixel(&self, x: u32, y: u32) -> Vec<RaySegment> {
        self.session.debug_pixel(&self.scene, x, y)
    }
}
