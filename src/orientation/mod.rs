//! End orientation of a prop after a motion
//!
//! Whole turns either keep or switch the start orientation. Half turns move
//! a radial orientation to a non-radial one (and back), in a direction set
//! by the spin. Floats follow their handpath instead of a spin.

pub mod propagation;

pub use propagation::OrientationPropagationService;

use crate::log::{debug, warn};
use crate::model::MotionData;
use crate::types::{HandpathDirection, MotionType, Orientation, PropColor, RotationDirection, Turns};

use Orientation::{Clock, Counter, In, Out};

/// Computes end orientations and keeps rotation direction consistent with turns
#[derive(Debug, Clone, Copy, Default)]
pub struct OrientationCalculator;

impl OrientationCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Rotation direction implied by the turns of a dash or static motion
    ///
    /// Turning dashes and statics without a direction spin clockwise; at zero
    /// turns they have no direction. Other motion types keep theirs.
    pub fn effective_rotation(&self, motion: &MotionData) -> RotationDirection {
        match motion.motion_type {
            MotionType::Dash | MotionType::Static => {
                if motion.turns.is_zero() {
                    RotationDirection::NoRotation
                } else if motion.turns.is_positive()
                    && motion.rotation_direction == RotationDirection::NoRotation
                {
                    RotationDirection::Clockwise
                } else {
                    motion.rotation_direction
                }
            }
            _ => motion.rotation_direction,
        }
    }

    /// End orientation of `motion`; `color` only labels diagnostics
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn calculate_end_orientation(&self, motion: &MotionData, color: PropColor) -> Orientation {
        let start = motion.start_orientation;

        if motion.motion_type == MotionType::Float || motion.turns == Turns::Float {
            return float_orientation(start, motion.handpath_direction());
        }

        let Some(halves) = motion.turns.half_turns() else {
            return start;
        };

        if halves % 2 == 0 {
            let keeps = (halves / 2) % 2 == 0;
            return match motion.motion_type {
                MotionType::Pro | MotionType::Static if keeps => start,
                MotionType::Anti | MotionType::Dash if !keeps => start,
                _ => start.switched(),
            };
        }

        let rotation = self.effective_rotation(motion);
        let Some(quarter) = half_turn_pro(start, rotation) else {
            warn!(%color, motion_type = %motion.motion_type, "half turns without rotation, keeping start orientation");
            return start;
        };

        // 0.5 and 2.5 land on the table value, 1.5 on its switch; anti and
        // dash land on the opposite of pro and static.
        let first_half = halves % 4 == 1;
        let same_as_pro = matches!(motion.motion_type, MotionType::Pro | MotionType::Static);
        if first_half == same_as_pro {
            quarter
        } else {
            quarter.switched()
        }
    }

    /// Recompute the derived fields of a motion: rotation direction and end
    /// orientation
    pub fn recompute(&self, motion: &MotionData, color: PropColor) -> MotionData {
        let mut updated = motion.clone();
        updated.rotation_direction = self.effective_rotation(motion);
        updated.end_orientation = self.calculate_end_orientation(&updated, color);
        debug!(%color, start = %updated.start_orientation, end = %updated.end_orientation, "recomputed orientation");
        updated
    }

    /// New turns for a motion, with rotation direction and end orientation
    /// brought in line
    pub fn apply_turns(&self, motion: &MotionData, turns: Turns, color: PropColor) -> MotionData {
        let mut edited = motion.clone();
        edited.turns = turns;
        self.recompute(&edited, color)
    }

    /// New start orientation for a motion, with its end orientation recomputed
    pub fn apply_start_orientation(&self, motion: &MotionData, start: Orientation, color: PropColor) -> MotionData {
        let mut edited = motion.clone();
        edited.start_orientation = start;
        self.recompute(&edited, color)
    }

    /// New rotation direction for a motion, with its end orientation recomputed
    pub fn apply_rotation_direction(&self, motion: &MotionData, rotation: RotationDirection, color: PropColor) -> MotionData {
        let mut edited = motion.clone();
        edited.rotation_direction = rotation;
        self.recompute(&edited, color)
    }
}

/// Pro/static orientation after half a turn from `start`
fn half_turn_pro(start: Orientation, rotation: RotationDirection) -> Option<Orientation> {
    use RotationDirection::{Clockwise, CounterClockwise, NoRotation};
    let end = match (start, rotation) {
        (In, Clockwise) => Counter,
        (In, CounterClockwise) => Clock,
        (Out, Clockwise) => Clock,
        (Out, CounterClockwise) => Counter,
        (Clock, Clockwise) => In,
        (Clock, CounterClockwise) => Out,
        (Counter, Clockwise) => Out,
        (Counter, CounterClockwise) => In,
        (_, NoRotation) => return None,
    };
    Some(end)
}

/// A float turns the prop a quarter with the handpath
fn float_orientation(start: Orientation, handpath: HandpathDirection) -> Orientation {
    match (start, handpath) {
        (In, HandpathDirection::Clockwise) => Clock,
        (In, HandpathDirection::CounterClockwise) => Counter,
        (Out, HandpathDirection::Clockwise) => Counter,
        (Out, HandpathDirection::CounterClockwise) => Clock,
        (Clock, HandpathDirection::Clockwise) => Out,
        (Clock, HandpathDirection::CounterClockwise) => In,
        (Counter, HandpathDirection::Clockwise) => In,
        (Counter, HandpathDirection::CounterClockwise) => Out,
        (_, HandpathDirection::Dash | HandpathDirection::Static) => start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Location;

    const BLUE: PropColor = PropColor::Blue;

    fn motion(motion_type: MotionType, rot: RotationDirection, turns: Turns, start: Orientation) -> MotionData {
        MotionData::new(motion_type, Location::North, Location::East)
            .with_rotation(rot)
            .with_turns(turns)
            .with_orientations(start, start)
    }

    #[test]
    fn whole_turns_keep_or_switch() {
        let calc = OrientationCalculator::new();
        let cw = RotationDirection::Clockwise;
        assert_eq!(calc.calculate_end_orientation(&motion(MotionType::Pro, cw, Turns::ZERO, In), BLUE), In);
        assert_eq!(calc.calculate_end_orientation(&motion(MotionType::Pro, cw, Turns::ONE, In), BLUE), Out);
        assert_eq!(calc.calculate_end_orientation(&motion(MotionType::Pro, cw, Turns::TWO, Clock), BLUE), Clock);
        assert_eq!(calc.calculate_end_orientation(&motion(MotionType::Anti, cw, Turns::ZERO, In), BLUE), Out);
        assert_eq!(calc.calculate_end_orientation(&motion(MotionType::Anti, cw, Turns::ONE, Counter), BLUE), Counter);
        assert_eq!(calc.calculate_end_orientation(&motion(MotionType::Anti, cw, Turns::THREE, Out), BLUE), Out);
    }

    #[test]
    fn half_turns() {
        let calc = OrientationCalculator::new();
        let cw = RotationDirection::Clockwise;
        let ccw = RotationDirection::CounterClockwise;
        assert_eq!(calc.calculate_end_orientation(&motion(MotionType::Pro, cw, Turns::HALF, In), BLUE), Counter);
        assert_eq!(calc.calculate_end_orientation(&motion(MotionType::Pro, cw, Turns::ONE_AND_HALF, In), BLUE), Clock);
        assert_eq!(calc.calculate_end_orientation(&motion(MotionType::Pro, cw, Turns::TWO_AND_HALF, In), BLUE), Counter);
        assert_eq!(calc.calculate_end_orientation(&motion(MotionType::Anti, cw, Turns::HALF, In), BLUE), Clock);
        assert_eq!(calc.calculate_end_orientation(&motion(MotionType::Anti, ccw, Turns::ONE_AND_HALF, Clock), BLUE), Out);
        assert_eq!(calc.calculate_end_orientation(&motion(MotionType::Static, ccw, Turns::HALF, Counter), BLUE), In);
    }

    #[test]
    fn float_follows_handpath() {
        let calc = OrientationCalculator::new();
        // North to east is a clockwise handpath.
        let float = motion(MotionType::Float, RotationDirection::NoRotation, Turns::Float, In);
        assert_eq!(calc.calculate_end_orientation(&float, BLUE), Clock);
        let mut back = float.clone();
        back.end_loc = Location::West;
        assert_eq!(calc.calculate_end_orientation(&back, BLUE), Counter);
    }

    #[test]
    fn dash_turns_assign_and_clear_rotation() {
        let calc = OrientationCalculator::new();
        let dash = MotionData::new(MotionType::Dash, Location::North, Location::South);
        assert_eq!(dash.rotation_direction, RotationDirection::NoRotation);

        let turned = calc.apply_turns(&dash, Turns::ONE, BLUE);
        assert_eq!(turned.rotation_direction, RotationDirection::Clockwise);
        assert_eq!(turned.end_orientation, In);

        let cleared = calc.apply_turns(&turned, Turns::ZERO, BLUE);
        assert_eq!(cleared.rotation_direction, RotationDirection::NoRotation);
        assert_eq!(cleared.end_orientation, Out);
    }

    #[test]
    fn static_half_turn_without_direction_spins_clockwise() {
        let calc = OrientationCalculator::new();
        let stat = motion(MotionType::Static, RotationDirection::NoRotation, Turns::HALF, Out);
        assert_eq!(calc.calculate_end_orientation(&stat, BLUE), Clock);
        assert_eq!(calc.recompute(&stat, BLUE).rotation_direction, RotationDirection::Clockwise);
    }

    #[test]
    fn shift_half_turn_without_direction_keeps_start() {
        let calc = OrientationCalculator::new();
        let pro = motion(MotionType::Pro, RotationDirection::NoRotation, Turns::HALF, Clock);
        assert_eq!(calc.calculate_end_orientation(&pro, BLUE), Clock);
    }
}
