//! Arrow positioning and orientation propagation for movement pictographs.
//!
//! A pictograph shows two props (blue and red) moving on a diamond or box
//! grid. This crate decides where each prop's arrow glyph goes, how it is
//! rotated and whether it is mirrored, and keeps prop orientations
//! consistent along a sequence of beats.
//!
//! ```
//! use pictograph::{
//!     AdjustmentMode, GridMode, Letter, Location, MotionData, MotionType, PictographData,
//!     PositioningOrchestrator, PropColor, RotationDirection, Turns,
//! };
//!
//! let motion = MotionData::new(MotionType::Pro, Location::North, Location::East)
//!     .with_rotation(RotationDirection::Clockwise)
//!     .with_turns(Turns::ONE);
//! let pictograph = PictographData::new(Some(Letter::A), GridMode::Diamond)
//!     .with_motion(PropColor::Blue, motion);
//!
//! let placed = PositioningOrchestrator::default()
//!     .calculate_all_arrow_positions(&pictograph, AdjustmentMode::WithOverrides);
//! assert_eq!(placed.arrows[&PropColor::Blue].location, Some(Location::NorthEast));
//! ```

pub mod defaults;
pub mod errors;
pub mod letter;
pub mod log;
pub mod model;
pub mod orientation;
pub mod positioning;
pub mod types;

pub use defaults::SceneConfig;
pub use errors::{OverrideError, ParseError, PositioningError, TurnsError};
pub use letter::{Letter, LetterType};
pub use model::{ArrowData, BeatData, MotionData, PictographData, SequenceData};
pub use orientation::{OrientationCalculator, OrientationPropagationService};
pub use positioning::{
    AdjustmentMode, ArrowPlacement, JsonDirectorySource, LetterPlacements, MemoryOverrideSource,
    OrientationKey, OverrideCache, OverrideSource, PositioningOrchestrator,
};
pub use types::{
    GridMode, HalfTurns, HandpathDirection, Location, MotionType, Orientation, Point, PropColor,
    RotationDirection, Turns,
};
