//! Quadrant-specific variants of a base adjustment
//!
//! A base adjustment is authored as seen from the first quadrant (NE). The
//! same nudge seen from another quadrant is one of the eight symmetries of
//! the square applied to it, chosen per motion family, grid mode and spin.

use glam::{DVec2, dvec2};

use crate::log::debug;
use crate::model::MotionData;
use crate::types::{GridMode, HandpathDirection, Location, MotionType, Point, RotationDirection};

/// The eight negation/swap maps of a vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TupleTransform {
    /// (x, y)
    XY,
    /// (-y, x)
    NegYX,
    /// (-x, -y)
    NegXNegY,
    /// (y, -x)
    YNegX,
    /// (-x, y)
    NegXY,
    /// (x, -y)
    XNegY,
    /// (y, x)
    YX,
    /// (-y, -x)
    NegYNegX,
}

impl TupleTransform {
    pub fn apply(self, v: DVec2) -> DVec2 {
        let DVec2 { x, y } = v;
        match self {
            TupleTransform::XY => dvec2(x, y),
            TupleTransform::NegYX => dvec2(-y, x),
            TupleTransform::NegXNegY => dvec2(-x, -y),
            TupleTransform::YNegX => dvec2(y, -x),
            TupleTransform::NegXY => dvec2(-x, y),
            TupleTransform::XNegY => dvec2(x, -y),
            TupleTransform::YX => dvec2(y, x),
            TupleTransform::NegYNegX => dvec2(-y, -x),
        }
    }
}

/// Transforms for quadrants [NE, SE, SW, NW]
pub type QuadrantTransforms = [TupleTransform; 4];

use TupleTransform::*;

const SHIFT_DIAMOND_CW: QuadrantTransforms = [XY, NegYX, NegXNegY, YNegX];
const SHIFT_DIAMOND_CCW: QuadrantTransforms = [NegYNegX, XNegY, YX, NegXY];
const SHIFT_BOX_CW: QuadrantTransforms = [NegXY, NegYNegX, XNegY, YX];
const SHIFT_BOX_CCW: QuadrantTransforms = [XY, NegYX, NegXNegY, YNegX];

const DASH_DIAMOND_CW: QuadrantTransforms = [XNegY, YX, NegXY, NegYNegX];
const DASH_DIAMOND_CCW: QuadrantTransforms = [NegXNegY, YNegX, XY, NegYX];
const DASH_DIAMOND_NO_ROT: QuadrantTransforms = [XY, NegYNegX, XNegY, YX];
const DASH_BOX_CW: QuadrantTransforms = [NegYX, NegXNegY, YNegX, XY];
const DASH_BOX_CCW: QuadrantTransforms = [NegXY, NegYNegX, XNegY, YX];
const DASH_BOX_NO_ROT: QuadrantTransforms = [XY, YX, NegXNegY, NegYNegX];

const STATIC_DIAMOND_CW: QuadrantTransforms = [XNegY, YX, NegXY, NegYNegX];
const STATIC_DIAMOND_CCW: QuadrantTransforms = [NegXNegY, YNegX, XY, NegYX];
const STATIC_BOX_CW: QuadrantTransforms = [XY, NegYX, NegXNegY, YNegX];
const STATIC_BOX_CCW: QuadrantTransforms = [NegXY, NegYNegX, XNegY, YX];

/// Selects and applies quadrant transforms
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectionalTupleProcessor;

impl DirectionalTupleProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Quadrant of a location: 0 = NE, 1 = SE, 2 = SW, 3 = NW
    ///
    /// Each cardinal belongs to the diagonal clockwise from it (N → NE,
    /// E → SE, S → SW, W → NW). The center counts as NE.
    pub fn calculate_quadrant_index(&self, location: Location) -> usize {
        match location {
            Location::NorthEast | Location::North | Location::Center => 0,
            Location::SouthEast | Location::East => 1,
            Location::SouthWest | Location::South => 2,
            Location::NorthWest | Location::West => 3,
        }
    }

    /// The transform family for a motion, if any
    pub fn transforms(&self, motion: &MotionData, grid_mode: GridMode) -> Option<&'static QuadrantTransforms> {
        use RotationDirection::*;

        let spin = match motion.motion_type {
            MotionType::Float => match motion.handpath_direction() {
                HandpathDirection::Clockwise => Clockwise,
                HandpathDirection::CounterClockwise => CounterClockwise,
                HandpathDirection::Dash | HandpathDirection::Static => return None,
            },
            _ => motion.rotation_direction,
        };

        let table = match (motion.motion_type, grid_mode, spin) {
            (MotionType::Pro | MotionType::Anti | MotionType::Float, GridMode::Diamond, Clockwise) => &SHIFT_DIAMOND_CW,
            (MotionType::Pro | MotionType::Anti | MotionType::Float, GridMode::Diamond, CounterClockwise) => &SHIFT_DIAMOND_CCW,
            (MotionType::Pro | MotionType::Anti | MotionType::Float, GridMode::Box, Clockwise) => &SHIFT_BOX_CW,
            (MotionType::Pro | MotionType::Anti | MotionType::Float, GridMode::Box, CounterClockwise) => &SHIFT_BOX_CCW,
            (MotionType::Dash, GridMode::Diamond, Clockwise) => &DASH_DIAMOND_CW,
            (MotionType::Dash, GridMode::Diamond, CounterClockwise) => &DASH_DIAMOND_CCW,
            (MotionType::Dash, GridMode::Diamond, NoRotation) => &DASH_DIAMOND_NO_ROT,
            (MotionType::Dash, GridMode::Box, Clockwise) => &DASH_BOX_CW,
            (MotionType::Dash, GridMode::Box, CounterClockwise) => &DASH_BOX_CCW,
            (MotionType::Dash, GridMode::Box, NoRotation) => &DASH_BOX_NO_ROT,
            (MotionType::Static, GridMode::Diamond, Clockwise | NoRotation) => &STATIC_DIAMOND_CW,
            (MotionType::Static, GridMode::Diamond, CounterClockwise) => &STATIC_DIAMOND_CCW,
            (MotionType::Static, GridMode::Box, Clockwise | NoRotation) => &STATIC_BOX_CW,
            (MotionType::Static, GridMode::Box, CounterClockwise) => &STATIC_BOX_CCW,
            (MotionType::Pro | MotionType::Anti | MotionType::Float, _, NoRotation) => return None,
        };
        Some(table)
    }

    /// The four quadrant variants of `base`, ordered [NE, SE, SW, NW]
    pub fn generate_directional_tuples(
        &self,
        motion: &MotionData,
        grid_mode: GridMode,
        base: DVec2,
    ) -> Option<[Point; 4]> {
        let transforms = self.transforms(motion, grid_mode)?;
        Some((*transforms).map(|t| t.apply(base)))
    }

    /// The variant of `base` for the quadrant `location` falls in
    ///
    /// Without a transform family the base adjustment is returned as is.
    pub fn process_directional_tuples(
        &self,
        base: DVec2,
        motion: &MotionData,
        location: Location,
        grid_mode: GridMode,
    ) -> Point {
        match self.generate_directional_tuples(motion, grid_mode, base) {
            Some(tuples) => tuples[self.calculate_quadrant_index(location)],
            None => {
                debug!(
                    motion_type = %motion.motion_type,
                    rotation = %motion.rotation_direction,
                    "no directional tuples, using base adjustment"
                );
                base
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Turns;

    fn pro_cw() -> MotionData {
        MotionData::new(MotionType::Pro, Location::North, Location::East)
            .with_rotation(RotationDirection::Clockwise)
            .with_turns(Turns::ONE)
    }

    #[test]
    fn quadrant_index_is_total() {
        let processor = DirectionalTupleProcessor::new();
        for loc in Location::COMPASS.into_iter().chain([Location::Center]) {
            assert!(processor.calculate_quadrant_index(loc) < 4);
        }
        assert_eq!(processor.calculate_quadrant_index(Location::North), 0);
        assert_eq!(processor.calculate_quadrant_index(Location::East), 1);
        assert_eq!(processor.calculate_quadrant_index(Location::South), 2);
        assert_eq!(processor.calculate_quadrant_index(Location::West), 3);
        assert_eq!(processor.calculate_quadrant_index(Location::NorthWest), 3);
    }

    #[test]
    fn shift_diamond_clockwise_family() {
        let processor = DirectionalTupleProcessor::new();
        let tuples = processor
            .generate_directional_tuples(&pro_cw(), GridMode::Diamond, dvec2(30.0, 25.0))
            .unwrap();
        assert_eq!(
            tuples,
            [dvec2(30.0, 25.0), dvec2(-25.0, 30.0), dvec2(-30.0, -25.0), dvec2(25.0, -30.0)]
        );
    }

    #[test]
    fn selected_tuple_follows_location() {
        let processor = DirectionalTupleProcessor::new();
        let base = dvec2(30.0, 25.0);
        let se = processor.process_directional_tuples(base, &pro_cw(), Location::SouthEast, GridMode::Diamond);
        assert_eq!(se, dvec2(-25.0, 30.0));
    }

    #[test]
    fn every_family_only_negates_and_swaps() {
        let processor = DirectionalTupleProcessor::new();
        let base = dvec2(7.0, 3.0);
        for motion_type in [MotionType::Pro, MotionType::Anti, MotionType::Dash, MotionType::Static] {
            for rot in [RotationDirection::Clockwise, RotationDirection::CounterClockwise] {
                for grid in [GridMode::Diamond, GridMode::Box] {
                    let motion = MotionData::new(motion_type, Location::North, Location::East).with_rotation(rot);
                    let tuples = processor.generate_directional_tuples(&motion, grid, base).unwrap();
                    for t in tuples {
                        assert_eq!(t.abs().x.max(t.abs().y), 7.0);
                        assert_eq!(t.abs().x.min(t.abs().y), 3.0);
                    }
                }
            }
        }
    }

    #[test]
    fn shift_without_rotation_keeps_base() {
        let processor = DirectionalTupleProcessor::new();
        let motion = pro_cw().with_rotation(RotationDirection::NoRotation);
        let base = dvec2(4.0, -9.0);
        assert_eq!(
            processor.process_directional_tuples(base, &motion, Location::SouthWest, GridMode::Box),
            base
        );
    }

    #[test]
    fn float_follows_handpath() {
        let processor = DirectionalTupleProcessor::new();
        let float = MotionData::new(MotionType::Float, Location::East, Location::North).with_turns(Turns::Float);
        let base = dvec2(10.0, -35.0);
        // East to north is counter-clockwise; NW quadrant uses (-x, y).
        assert_eq!(
            processor.process_directional_tuples(base, &float, Location::NorthWest, GridMode::Diamond),
            dvec2(-10.0, -35.0)
        );
    }
}
