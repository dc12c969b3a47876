//! Distance Box Culling
//!
//! Rejects world geometry outside a camera-centered axis-aligned box at the
//! configured maximum render distance, before draw submission. Rebuilt from
//! the camera position once per frame; read-only afterwards.

use glam::DVec3;

/// Three-way box/bounds classification for hierarchical culling.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BoxIntersection {
    /// Fully outside the bounds on at least one axis.
    Outside,
    /// Fully contained in the bounds on all three axes.
    Inside,
    /// Neither fully inside nor fully outside.
    Intersect,
}

/// Camera-centered axis-aligned culling bounds.
pub struct BoxCuller {
    max_distance: f64,

    min_allowed: DVec3,
    max_allowed: DVec3,
}

impl BoxCuller {
    #[must_use]
    pub fn new(max_distance: f64) -> Self {
        Self {
            max_distance,
            min_allowed: DVec3::ZERO,
            max_allowed: DVec3::ZERO,
        }
    }

    /// Recomputes the inclusion bounds as `camera ± max_distance` per axis.
    /// Call once per frame before any culling test.
    pub fn set_position(&mut self, camera: DVec3) {
        self.min_allowed = camera - self.max_distance;
        self.max_allowed = camera + self.max_distance;
    }

    /// Whether the box `[min, max]` (absolute coordinates) lies entirely
    /// outside the bounds on any axis. Boundaries are inclusive: a box
    /// touching `camera + max_distance` is kept. Axis order X, Y, Z with
    /// short-circuit on the first separating axis.
    #[must_use]
    pub fn is_culled(&self, min: DVec3, max: DVec3) -> bool {
        if max.x < self.min_allowed.x || min.x > self.max_allowed.x {
            return true;
        }

        if max.y < self.min_allowed.y || min.y > self.max_allowed.y {
            return true;
        }

        max.z < self.min_allowed.z || min.z > self.max_allowed.z
    }

    /// Variant for geometry systems that pre-translate coordinates to be
    /// camera-relative: tests against `[-max_distance, +max_distance]`
    /// directly, without reading the stored camera position. Agrees with
    /// [`is_culled`](Self::is_culled) whenever the relative-coordinate
    /// precondition holds.
    #[must_use]
    pub fn is_culled_camera_relative(&self, min: DVec3, max: DVec3) -> bool {
        if max.x < -self.max_distance || min.x > self.max_distance {
            return true;
        }

        if max.y < -self.max_distance || min.y > self.max_distance {
            return true;
        }

        max.z < -self.max_distance || min.z > self.max_distance
    }

    /// Three-way classification of a camera-relative box against the
    /// bounds. `Outside` exactly when
    /// [`is_culled_camera_relative`](Self::is_culled_camera_relative)
    /// returns true.
    #[must_use]
    pub fn intersect_aab(&self, min: DVec3, max: DVec3) -> BoxIntersection {
        if self.is_culled_camera_relative(min, max) {
            return BoxIntersection::Outside;
        }

        if min.x >= -self.max_distance
            && max.x <= self.max_distance
            && min.y >= -self.max_distance
            && max.y <= self.max_distance
            && min.z >= -self.max_distance
            && max.z <= self.max_distance
        {
            return BoxIntersection::Inside;
        }

        BoxIntersection::Intersect
    }

    #[must_use]
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }
}
