//! Arrow positioning for pictographs
//!
//! This module is organized into submodules:
//! - `location`: which grid location an arrow occupies
//! - `coordinates`: canvas points of grid locations
//! - `rotation`: arrow rotation angles
//! - `directional`: quadrant transforms of adjustment vectors
//! - `default_placements`: the default adjustment tables
//! - `special`: special placement documents, sources and cache
//! - `adjustment`: the two-tier adjustment lookup
//!
//! The orchestrator here runs them in order for each arrow:
//! location → initial position → rotation → adjustment.

pub mod adjustment;
pub mod coordinates;
pub mod default_placements;
pub mod directional;
pub mod location;
pub mod rotation;
pub mod special;

pub use adjustment::{AdjustmentKeys, AdjustmentLookup, AdjustmentMode};
pub use coordinates::{CoordinateSystemService, PointLayer};
pub use directional::DirectionalTupleProcessor;
pub use location::LocationCalculator;
pub use rotation::RotationCalculator;
pub use special::{
    JsonDirectorySource, LetterPlacements, MemoryOverrideSource, NoOverrides, OrientationKey,
    OverrideCache, OverrideSource,
};

use glam::{DAffine2, DVec2, dvec2};

use crate::defaults::SceneConfig;
use crate::errors::PositioningError;
use crate::log::{debug, warn};
use crate::model::{ArrowData, MotionData, PictographData};
use crate::types::{Location, MotionType, Point, RotationDirection};

/// Final placement of one arrow glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowPlacement {
    pub location: Location,
    pub position: Point,
    /// Degrees, clockwise
    pub rotation: f64,
    pub mirrored: bool,
}

impl ArrowPlacement {
    /// Reflection to apply to a glyph of `glyph_size` before placing it;
    /// the identity for unmirrored arrows
    pub fn glyph_transform(&self, glyph_size: DVec2) -> DAffine2 {
        if self.mirrored {
            mirror_transform(glyph_size)
        } else {
            DAffine2::IDENTITY
        }
    }

    fn write_to(&self, arrow: &mut ArrowData) {
        arrow.location = Some(self.location);
        arrow.position = self.position;
        arrow.rotation = self.rotation;
        arrow.mirrored = self.mirrored;
    }
}

/// Anti arrows mirror when spinning clockwise, every other arrow when
/// spinning counter-clockwise.
pub fn should_mirror(motion: &MotionData) -> bool {
    match motion.motion_type {
        MotionType::Anti => motion.rotation_direction == RotationDirection::Clockwise,
        _ => motion.rotation_direction == RotationDirection::CounterClockwise,
    }
}

/// Horizontal reflection about the center of a glyph's bounding box
pub fn mirror_transform(glyph_size: DVec2) -> DAffine2 {
    let center = glyph_size / 2.0;
    DAffine2::from_translation(center)
        * DAffine2::from_scale(dvec2(-1.0, 1.0))
        * DAffine2::from_translation(-center)
}

/// Runs the positioning pipeline for pictograph arrows
#[derive(Debug, Default)]
pub struct PositioningOrchestrator {
    locations: LocationCalculator,
    coordinates: CoordinateSystemService,
    rotations: RotationCalculator,
    adjustments: AdjustmentLookup,
}

impl PositioningOrchestrator {
    pub fn new(config: SceneConfig, overrides: OverrideCache) -> Self {
        Self {
            locations: LocationCalculator::new(),
            coordinates: CoordinateSystemService::new(config),
            rotations: RotationCalculator::new(),
            adjustments: AdjustmentLookup::new(overrides),
        }
    }

    /// Default scene geometry with special placements from `source`
    pub fn with_source(source: impl OverrideSource + 'static) -> Self {
        Self::new(SceneConfig::default(), OverrideCache::new(source))
    }

    pub fn coordinates(&self) -> &CoordinateSystemService {
        &self.coordinates
    }

    pub fn adjustments(&self) -> &AdjustmentLookup {
        &self.adjustments
    }

    /// Scene center, zero rotation: where a failed arrow is drawn
    pub fn fallback_placement(&self) -> ArrowPlacement {
        ArrowPlacement {
            location: Location::Center,
            position: self.coordinates.scene_center(),
            rotation: 0.0,
            mirrored: false,
        }
    }

    /// Place one arrow
    ///
    /// Errors only when the pictograph lacks the arrow's motion or a letter.
    /// A non-finite result is replaced by the fallback placement.
    pub fn calculate_arrow_position(
        &self,
        arrow: &ArrowData,
        pictograph: &PictographData,
        mode: AdjustmentMode,
    ) -> Result<ArrowPlacement, PositioningError> {
        let color = arrow.color;
        let motion = pictograph
            .motion(color)
            .ok_or(PositioningError::MissingMotion { color })?;

        let location = self.locations.calculate_location(motion, pictograph, color);
        let initial = self
            .coordinates
            .initial_position(motion, location, pictograph.grid_mode);
        let rotation = self.rotations.calculate_rotation(motion, location);
        let adjustment = self
            .adjustments
            .get_base_adjustment(pictograph, color, location, mode)?;

        let position = initial + adjustment;
        if !self.coordinates.validate_coordinates(position) || !rotation.is_finite() {
            warn!(%color, ?position, rotation, "non-finite arrow placement, using fallback");
            return Ok(self.fallback_placement());
        }

        debug!(%color, %location, ?position, rotation, "placed arrow");
        Ok(ArrowPlacement {
            location,
            position,
            rotation,
            mirrored: should_mirror(motion),
        })
    }

    /// Place every visible arrow, returning the updated pictograph
    ///
    /// Never fails: an arrow that cannot be placed gets the fallback
    /// placement and a warning.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn calculate_all_arrow_positions(&self, pictograph: &PictographData, mode: AdjustmentMode) -> PictographData {
        let mut updated = pictograph.clone();
        for arrow in updated.arrows.values_mut() {
            if !arrow.is_visible {
                continue;
            }
            let placement = self
                .calculate_arrow_position(arrow, pictograph, mode)
                .unwrap_or_else(|error| {
                    warn!(color = %arrow.color, %error, "arrow placement failed, using fallback");
                    self.fallback_placement()
                });
            placement.write_to(arrow);
        }
        updated
    }

    /// Mirror flag for an arrow; unmirrored when its motion is missing
    pub fn should_mirror_arrow(&self, arrow: &ArrowData, pictograph: &PictographData) -> bool {
        pictograph.motion(arrow.color).is_some_and(should_mirror)
    }
}
