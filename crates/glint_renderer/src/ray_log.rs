//! Optional recording of traced rays for debugging.
//!
//! The dispatcher reports every ray it tests to a [`RayObserver`]. The
//! default [`NoopObserver`] discards them; a [`RayLog`] keeps them so a
//! host can draw the rays that contributed to one pixel.

use std::sync::Mutex;

use glint_math::{Color, Vec3};

/// What a recorded ray was used for, and how it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayKind {
    /// Shadow ray stopped by an object before reaching its light
    ShadowBlocked,
    /// Shadow ray that reached its light
    ShadowClear,
    /// Primary or reflection ray that hit a surface
    Hit,
    /// Primary or reflection ray that left the scene
    Miss,
}

impl RayKind {
    /// Colour used when drawing rays of this kind.
    pub fn colour(self) -> Color {
        match self {
            RayKind::ShadowBlocked | RayKind::ShadowClear => Color::new(0.843, 0.710, 0.278), // gold
            RayKind::Hit => Color::new(0.1, 0.7, 0.7),                                        // cyan
            RayKind::Miss => Color::new(0.3, 0.3, 0.3),                                       // grey
        }
    }

    pub fn is_shadow(self) -> bool {
        matches!(self, RayKind::ShadowBlocked | RayKind::ShadowClear)
    }
}

/// A recorded ray from its start to where it ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySegment {
    pub start: Vec3,
    pub end: Vec3,
    pub kind: RayKind,
}

impl RaySegment {
    /// Unit direction from start to end.
    pub fn direction(&self) -> Vec3 {
        (self.end - self.start).normalize_or_zero()
    }
}

/// Receives every ray tested by the dispatcher.
pub trait RayObserver: Send + Sync {
    /// Whether tested rays should be described at all. When false the
    /// dispatcher never builds a segment or calls [`observe`](Self::observe).
    fn enabled(&self) -> bool {
        true
    }

    fn observe(&self, segment: RaySegment);
}

/// Observer that ignores every ray.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RayObserver for NoopObserver {
    #[inline]
    fn enabled(&self) -> bool {
        false
    }

    #[inline]
    fn observe(&self, _segment: RaySegment) {}
}

/// Observer that keeps every ray in order.
#[derive(Debug, Default)]
pub struct RayLog {
    segments: Mutex<Vec<RaySegment>>,
}

impl RayLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return the recorded rays.
    pub fn take(&self) -> Vec<RaySegment> {
        match self.segments.lock() {
            Ok(mut segments) => std::mem::take(&mut *segments),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RayObserver for RayLog {
    fn observe(&self, segment: RaySegment) {
        if let Ok(mut segments) = self.segments.lock() {
            segments.push(segment);
        }
    }
}
