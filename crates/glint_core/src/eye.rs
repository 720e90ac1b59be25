use glint_math::Vec3;

/// Viewer position and orientation used to build primary rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eye {
    pub position: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_y: f32,
}

impl Eye {
    /// Create a new eye with a 45 degree vertical field of view.
    pub fn new(position: Vec3, look_at: Vec3, up: Vec3) -> Self {
        Self {
            position,
            look_at,
            up,
            fov_y: 45.0,
        }
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov(mut self, fov_y: f32) -> Self {
        self.fov_y = fov_y;
        self
    }

    /// Unit viewing direction.
    pub fn forward(&self) -> Vec3 {
        (self.look_at - self.position).normalize()
    }

    /// Unit vector to the right of the viewing direction.
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize()
    }

    /// Unit up vector made exactly perpendicular to the viewing direction.
    pub fn true_up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// Distance from the eye to the point it looks at.
    pub fn focus_distance(&self) -> f32 {
        (self.look_at - self.position).length()
    }
}

impl Default for Eye {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eye_basis() {
        let eye = Eye::default();

        assert!((eye.forward() - Vec3::NEG_Z).length() < 1e-6);
        assert!((eye.right() - Vec3::X).length() < 1e-6);
        assert!((eye.true_up() - Vec3::Y).length() < 1e-6);
        assert_eq!(eye.focus_distance(), 5.0);
    }

    #[test]
    fn test_true_up_is_orthogonal() {
        // Up hint not perpendicular to the view direction
        let eye = Eye::new(Vec3::new(0.0, 3.0, 5.0), Vec3::ZERO, Vec3::Y).with_fov(30.0);

        assert!(eye.true_up().dot(eye.forward()).abs() < 1e-6);
        assert!(eye.true_up().y > 0.0);
        assert_eq!(eye.fov_y, 30.0);
    }
}
