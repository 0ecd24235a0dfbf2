//! Scene geometry defaults (all in canvas pixels)

use crate::types::Point;

/// Side length of the square pictograph scene
pub const SCENE_SIZE: f64 = 950.0;
/// Distance from the center to a cardinal hand point
pub const HAND_POINT_RADIUS: f64 = 143.1;
/// Per-axis offset from the center to a diagonal box hand point
pub const BOX_HAND_POINT_OFFSET: f64 = 101.2;

/// Scene geometry the coordinate tables are built from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    pub size: f64,
    pub hand_point_radius: f64,
    pub box_hand_point_offset: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            size: SCENE_SIZE,
            hand_point_radius: HAND_POINT_RADIUS,
            box_hand_point_offset: BOX_HAND_POINT_OFFSET,
        }
    }
}

impl SceneConfig {
    pub fn center(&self) -> Point {
        Point::splat(self.size / 2.0)
    }

    /// Scale every distance with the scene, keeping proportions
    pub fn scaled_to(size: f64) -> Self {
        let ratio = size / SCENE_SIZE;
        Self {
            size,
            hand_point_radius: HAND_POINT_RADIUS * ratio,
            box_hand_point_offset: BOX_HAND_POINT_OFFSET * ratio,
        }
    }
}
