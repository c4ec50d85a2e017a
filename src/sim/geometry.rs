//! Axis-aligned geometry for platforms, pickups and hazards
//!
//! Screen coordinates: x grows right, y grows down. A platform's "top
//! surface" is therefore its smallest y.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Build from a centre point and half extents
    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            size: half * 2.0,
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }

    /// True if `x` lies strictly inside the span widened by `half_width` on each side
    pub fn spans_x(&self, x: f32, half_width: f32) -> bool {
        x + half_width > self.min.x && x - half_width < self.max().x
    }
}

/// One-sided landing test.
///
/// The player's bottom edge sits `2 * half_height` below its y. Returns true
/// only when that edge was at or above the platform top before the move and
/// is below it after, while the player overlaps the platform horizontally.
/// Upward motion can never produce a landing.
pub fn is_landing(
    prev_y: f32,
    next_y: f32,
    player_x: f32,
    platform: &Aabb,
    half_width: f32,
    half_height: f32,
) -> bool {
    let top = platform.min.y;
    let prev_bottom = prev_y + half_height * 2.0;
    let next_bottom = next_y + half_height * 2.0;

    prev_bottom <= top && next_bottom > top && platform.spans_x(player_x, half_width)
}

/// Per-axis proximity test used for pickups and hazards.
///
/// Deliberately a rectangle check rather than a Euclidean distance.
#[inline]
pub fn within_proximity(a: Vec2, b: Vec2, threshold_x: f32, threshold_y: f32) -> bool {
    (a.x - b.x).abs() < threshold_x && (a.y - b.y).abs() < threshold_y
}
