//! Forward propagation of orientations through a sequence
//!
//! After an edit, each following beat's start orientation must equal the
//! previous beat's end orientation. The sweep works on a copy and returns it
//! whole, so callers never see a half-updated sequence.

use crate::log::{debug, warn};
use crate::model::{BeatData, MotionData, SequenceData};
use crate::types::{Orientation, PropColor, Turns};

use super::OrientationCalculator;

#[derive(Debug, Clone, Copy, Default)]
pub struct OrientationPropagationService {
    calculator: OrientationCalculator,
}

impl OrientationPropagationService {
    pub fn new(calculator: OrientationCalculator) -> Self {
        Self { calculator }
    }

    /// Carry `color`'s end orientation at `starting_beat_index` forward
    ///
    /// The starting beat itself is not recomputed. The sweep stops at the
    /// first beat with no motion for `color`.
    pub fn propagate_from(&self, sequence: &SequenceData, starting_beat_index: usize, color: PropColor) -> SequenceData {
        let mut updated = sequence.clone();
        let Some(end) = updated.end_orientation(starting_beat_index, color) else {
            if starting_beat_index >= updated.beats.len() {
                warn!(starting_beat_index, beats = updated.beats.len(), "propagation start out of range");
            }
            return updated;
        };
        self.sweep(&mut updated.beats[starting_beat_index + 1..], end, color);
        updated
    }

    /// Carry the start position's end orientation into the first beat onward
    pub fn propagate_from_start_position(&self, sequence: &SequenceData, color: PropColor) -> SequenceData {
        let mut updated = sequence.clone();
        let seed = updated
            .start_position
            .as_ref()
            .and_then(|start| start.motion(color))
            .map(|motion| motion.end_orientation);
        match seed {
            Some(end) => self.sweep(&mut updated.beats, end, color),
            None => {
                debug!(%color, "no start position motion to propagate");
            }
        }
        updated
    }

    /// Propagate both colors through the whole sequence, from the start
    /// position when there is one and from the first beat otherwise
    pub fn propagate_all(&self, sequence: &SequenceData) -> SequenceData {
        PropColor::BOTH.into_iter().fold(sequence.clone(), |seq, color| {
            let has_start = seq
                .start_position
                .as_ref()
                .is_some_and(|start| start.motion(color).is_some());
            if has_start {
                self.propagate_from_start_position(&seq, color)
            } else {
                self.propagate_from(&seq, 0, color)
            }
        })
    }

    /// Set a beat's turns, recompute it, and propagate the result forward
    pub fn edit_turns(&self, sequence: &SequenceData, beat_index: usize, color: PropColor, turns: Turns) -> SequenceData {
        self.edit(sequence, beat_index, color, |calc, motion| calc.apply_turns(motion, turns, color))
    }

    /// Set a beat's start orientation, recompute it, and propagate forward
    pub fn edit_start_orientation(
        &self,
        sequence: &SequenceData,
        beat_index: usize,
        color: PropColor,
        start: Orientation,
    ) -> SequenceData {
        self.edit(sequence, beat_index, color, |calc, motion| {
            calc.apply_start_orientation(motion, start, color)
        })
    }

    fn edit(
        &self,
        sequence: &SequenceData,
        beat_index: usize,
        color: PropColor,
        change: impl FnOnce(&OrientationCalculator, &MotionData) -> MotionData,
    ) -> SequenceData {
        let mut edited = sequence.clone();
        let Some(motion) = edited.beats.get_mut(beat_index).and_then(|beat| beat.motion_mut(color)) else {
            warn!(beat_index, %color, "no motion to edit");
            return edited;
        };
        *motion = change(&self.calculator, motion);
        self.propagate_from(&edited, beat_index, color)
    }

    fn sweep(&self, beats: &mut [BeatData], mut previous_end: Orientation, color: PropColor) {
        for beat in beats {
            let Some(motion) = beat.motion_mut(color) else {
                debug!(%color, "propagation stopped at beat without motion");
                break;
            };
            *motion = self
                .calculator
                .apply_start_orientation(motion, previous_end, color);
            previous_end = motion.end_orientation;
        }
    }
}
