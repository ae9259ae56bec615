//! Collision detection for circles and the viewport rectangle
//!
//! Everything in the game is a circle, so a contact test is just the gap
//! between two centers minus both radii.

use glam::Vec2;

use crate::error::{GeometryError, ensure_positive};

/// The visible rectangle, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    /// Validated viewport (finite, positive extents)
    pub fn new(width: f32, height: f32) -> Result<Self, GeometryError> {
        Ok(Self {
            width: ensure_positive("width", width)?,
            height: ensure_positive("height", height)?,
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True once the whole circle lies past any edge
    pub fn circle_outside(&self, pos: Vec2, radius: f32) -> bool {
        pos.x + radius < 0.0
            || pos.x - radius > self.width
            || pos.y + radius < 0.0
            || pos.y - radius > self.height
    }
}

/// Distance between two circle edges (negative when overlapping)
#[inline]
pub fn circle_gap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> f32 {
    a.distance(b) - a_radius - b_radius
}

/// Whether two circles are within `epsilon` of touching
#[inline]
pub fn circles_touch(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32, epsilon: f32) -> bool {
    circle_gap(a, a_radius, b, b_radius) < epsilon
}
