//! Beat, pictograph and sequence data exchanged with the authoring layer
//!
//! Motion data is authored elsewhere and only read here. Arrow data and the
//! orientation fields are derived outputs: the engine never edits a caller's
//! value in place, it returns updated copies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::letter::Letter;
use crate::types::{
    GridMode, HandpathDirection, Location, MotionType, Orientation, Point, PropColor,
    RotationDirection, Turns,
};

/// One prop's motion within a beat
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionData {
    pub motion_type: MotionType,
    pub start_loc: Location,
    pub end_loc: Location,
    pub start_orientation: Orientation,
    pub end_orientation: Orientation,
    #[serde(default)]
    pub rotation_direction: RotationDirection,
    #[serde(default)]
    pub turns: Turns,
}

impl MotionData {
    /// A zero-turn motion starting and ending `in`
    pub fn new(motion_type: MotionType, start_loc: Location, end_loc: Location) -> Self {
        Self {
            motion_type,
            start_loc,
            end_loc,
            start_orientation: Orientation::In,
            end_orientation: Orientation::In,
            rotation_direction: RotationDirection::NoRotation,
            turns: Turns::ZERO,
        }
    }

    pub fn with_turns(mut self, turns: Turns) -> Self {
        self.turns = turns;
        self
    }

    pub fn with_rotation(mut self, rotation_direction: RotationDirection) -> Self {
        self.rotation_direction = rotation_direction;
        self
    }

    pub fn with_orientations(mut self, start: Orientation, end: Orientation) -> Self {
        self.start_orientation = start;
        self.end_orientation = end;
        self
    }

    pub fn handpath_direction(&self) -> HandpathDirection {
        HandpathDirection::between(self.start_loc, self.end_loc)
    }
}

/// Derived placement of one arrow glyph
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrowData {
    pub color: PropColor,
    /// Resolved grid location; `None` until positioned
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub position: Point,
    /// Degrees, clockwise
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub mirrored: bool,
    #[serde(default = "visible_by_default")]
    pub is_visible: bool,
}

fn visible_by_default() -> bool {
    true
}

impl ArrowData {
    pub fn new(color: PropColor) -> Self {
        Self {
            color,
            location: None,
            position: Point::ZERO,
            rotation: 0.0,
            mirrored: false,
            is_visible: true,
        }
    }
}

/// A single pictograph: letter, grid and the two props' motions and arrows
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PictographData {
    #[serde(default)]
    pub letter: Option<Letter>,
    #[serde(default)]
    pub grid_mode: GridMode,
    #[serde(default)]
    pub motions: BTreeMap<PropColor, MotionData>,
    #[serde(default)]
    pub arrows: BTreeMap<PropColor, ArrowData>,
}

impl PictographData {
    pub fn new(letter: Option<Letter>, grid_mode: GridMode) -> Self {
        Self {
            letter,
            grid_mode,
            ..Self::default()
        }
    }

    /// Add a motion and a matching unpositioned arrow
    pub fn with_motion(mut self, color: PropColor, motion: MotionData) -> Self {
        self.motions.insert(color, motion);
        self.arrows
            .entry(color)
            .or_insert_with(|| ArrowData::new(color));
        self
    }

    pub fn motion(&self, color: PropColor) -> Option<&MotionData> {
        self.motions.get(&color)
    }

    pub fn arrow(&self, color: PropColor) -> Option<&ArrowData> {
        self.arrows.get(&color)
    }
}

/// One step of a sequence
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BeatData {
    pub beat_number: u32,
    #[serde(default)]
    pub pictograph: PictographData,
    #[serde(default)]
    pub is_blank: bool,
}

impl BeatData {
    pub fn new(beat_number: u32, pictograph: PictographData) -> Self {
        Self {
            beat_number,
            pictograph,
            is_blank: false,
        }
    }

    pub fn blank(beat_number: u32) -> Self {
        Self {
            beat_number,
            pictograph: PictographData::default(),
            is_blank: true,
        }
    }

    /// Motion for `color`; blank beats carry none
    pub fn motion(&self, color: PropColor) -> Option<&MotionData> {
        if self.is_blank {
            return None;
        }
        self.pictograph.motion(color)
    }

    pub(crate) fn motion_mut(&mut self, color: PropColor) -> Option<&mut MotionData> {
        if self.is_blank {
            return None;
        }
        self.pictograph.motions.get_mut(&color)
    }
}

/// An ordered list of beats with an optional start position (beat 0)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceData {
    #[serde(default)]
    pub start_position: Option<BeatData>,
    #[serde(default)]
    pub beats: Vec<BeatData>,
}

impl SequenceData {
    pub fn new(start_position: Option<BeatData>, beats: Vec<BeatData>) -> Self {
        Self {
            start_position,
            beats,
        }
    }

    /// End orientation of `color` for the beat at `index`
    pub fn end_orientation(&self, index: usize, color: PropColor) -> Option<Orientation> {
        self.beats
            .get(index)?
            .motion(color)
            .map(|m| m.end_orientation)
    }
}
