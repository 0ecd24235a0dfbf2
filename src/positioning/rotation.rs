//! Arrow rotation angles
//!
//! Tables are indexed by compass position (N, NE, E, SE, S, SW, W, NW) and
//! give degrees clockwise in canvas space.

use crate::log::warn;
use crate::model::MotionData;
use crate::types::{Location, MotionType, RotationDirection};

type AngleTable = [f64; 8];

#[rustfmt::skip]
const PRO_CW: AngleTable     = [315.0,   0.0,  45.0,  90.0, 135.0, 180.0, 225.0, 270.0];
#[rustfmt::skip]
const PRO_CCW: AngleTable    = [225.0, 270.0, 315.0,   0.0,  45.0,  90.0, 135.0, 180.0];
#[rustfmt::skip]
const STATIC_CW: AngleTable  = [  0.0,  45.0,  90.0, 135.0, 180.0, 225.0, 270.0, 315.0];
#[rustfmt::skip]
const STATIC_CCW: AngleTable = [  0.0, 315.0, 270.0, 225.0, 180.0, 135.0,  90.0,  45.0];
#[rustfmt::skip]
const DASH_CW: AngleTable    = [270.0, 315.0,   0.0,  45.0,  90.0, 135.0, 180.0, 225.0];
#[rustfmt::skip]
const DASH_CCW: AngleTable   = [270.0, 225.0, 180.0, 135.0,  90.0,  45.0,   0.0, 315.0];

/// Rotation angle of an arrow glyph
#[derive(Debug, Clone, Copy, Default)]
pub struct RotationCalculator;

impl RotationCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Degrees for the arrow of `motion` placed at `location`; 0 when no
    /// table covers the combination
    pub fn calculate_rotation(&self, motion: &MotionData, location: Location) -> f64 {
        let Some(index) = location.compass_index() else {
            warn!(%location, motion_type = %motion.motion_type, "no rotation entry off the compass, using 0");
            return 0.0;
        };

        if motion.motion_type == MotionType::Dash
            && motion.rotation_direction == RotationDirection::NoRotation
        {
            // Points along the direction of travel.
            return motion.end_loc.compass_angle().unwrap_or(0.0);
        }

        match self.table(motion) {
            Some(table) => table[index],
            None => {
                warn!(
                    motion_type = %motion.motion_type,
                    rotation = %motion.rotation_direction,
                    "no rotation table, using 0"
                );
                0.0
            }
        }
    }

    fn table(&self, motion: &MotionData) -> Option<&'static AngleTable> {
        use RotationDirection::*;

        let direction = match motion.motion_type {
            MotionType::Float => motion.handpath_direction().as_rotation(),
            _ => motion.rotation_direction,
        };

        match (motion.motion_type, direction) {
            (MotionType::Pro | MotionType::Float, Clockwise) => Some(&PRO_CW),
            (MotionType::Pro | MotionType::Float, CounterClockwise) => Some(&PRO_CCW),
            // Anti arrows curve the opposite way round.
            (MotionType::Anti, Clockwise) => Some(&PRO_CCW),
            (MotionType::Anti, CounterClockwise) => Some(&PRO_CW),
            (MotionType::Static, Clockwise | NoRotation) => Some(&STATIC_CW),
            (MotionType::Static, CounterClockwise) => Some(&STATIC_CCW),
            (MotionType::Dash, Clockwise) => Some(&DASH_CW),
            (MotionType::Dash, CounterClockwise) => Some(&DASH_CCW),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Turns;

    fn shift(motion_type: MotionType, rot: RotationDirection) -> MotionData {
        MotionData::new(motion_type, Location::North, Location::East)
            .with_rotation(rot)
            .with_turns(Turns::ONE)
    }

    #[test]
    fn pro_and_anti_tables() {
        let calc = RotationCalculator::new();
        let pro = shift(MotionType::Pro, RotationDirection::Clockwise);
        assert_eq!(calc.calculate_rotation(&pro, Location::NorthEast), 0.0);
        assert_eq!(calc.calculate_rotation(&pro, Location::SouthWest), 180.0);

        let anti = shift(MotionType::Anti, RotationDirection::Clockwise);
        assert_eq!(calc.calculate_rotation(&anti, Location::NorthEast), 270.0);
    }

    #[test]
    fn float_uses_handpath() {
        let calc = RotationCalculator::new();
        let float = MotionData::new(MotionType::Float, Location::North, Location::West)
            .with_turns(Turns::Float);
        // North to west is a counter-clockwise handpath.
        assert_eq!(calc.calculate_rotation(&float, Location::NorthWest), 180.0);
    }

    #[test]
    fn dash_without_rotation_points_along_travel() {
        let calc = RotationCalculator::new();
        let dash = MotionData::new(MotionType::Dash, Location::North, Location::South);
        assert_eq!(calc.calculate_rotation(&dash, Location::East), 90.0);
        let dash = MotionData::new(MotionType::Dash, Location::East, Location::West);
        assert_eq!(calc.calculate_rotation(&dash, Location::South), 180.0);
    }

    #[test]
    fn uncovered_combinations_are_zero() {
        let calc = RotationCalculator::new();
        let pro = shift(MotionType::Pro, RotationDirection::NoRotation);
        assert_eq!(calc.calculate_rotation(&pro, Location::NorthEast), 0.0);
        let pro = shift(MotionType::Pro, RotationDirection::Clockwise);
        assert_eq!(calc.calculate_rotation(&pro, Location::Center), 0.0);
    }

    #[test]
    fn center_is_zero_for_every_motion_type() {
        let calc = RotationCalculator::new();
        for motion_type in [MotionType::Pro, MotionType::Anti, MotionType::Float, MotionType::Dash, MotionType::Static] {
            for rot in [RotationDirection::Clockwise, RotationDirection::CounterClockwise, RotationDirection::NoRotation] {
                assert_eq!(calc.calculate_rotation(&shift(motion_type, rot), Location::Center), 0.0);
            }
        }
    }
}
