//! Default base adjustments, indexed by motion type and turn count
//!
//! These are hand-tuned pixel offsets with no underlying formula. Each row
//! is indexed by half turns (0, 0.5, 1, 1.5, 2, 2.5, 3) and is expressed for
//! the first quadrant; the directional tuple processor rotates it into the
//! arrow's quadrant.

use glam::{DVec2, dvec2};

use crate::types::{GridMode, MotionType, Turns};

type TurnRow = [[f64; 2]; 7];

#[rustfmt::skip]
mod diamond {
    use super::TurnRow;

    pub const PRO: TurnRow    = [[-10.0, 40.0], [30.0, 105.0], [30.0, 25.0], [-35.0, 145.0], [-10.0, 40.0], [30.0, 105.0], [30.0, 25.0]];
    pub const ANTI: TurnRow   = [[0.0, -40.0], [-15.0, 110.0], [0.0, -40.0], [20.0, 155.0], [0.0, -40.0], [-15.0, 110.0], [0.0, -40.0]];
    pub const STATIC: TurnRow = [[0.0, 0.0], [0.0, -140.0], [50.0, 50.0], [35.0, -70.0], [50.0, 50.0], [0.0, -140.0], [50.0, 50.0]];
    pub const DASH: TurnRow   = [[0.0, 0.0], [-35.0, -140.0], [50.0, 50.0], [-35.0, -140.0], [50.0, 50.0], [-35.0, -140.0], [50.0, 50.0]];
    pub const FLOAT: TurnRow  = [[10.0, -35.0], [10.0, -35.0], [10.0, -35.0], [10.0, -35.0], [10.0, -35.0], [10.0, -35.0], [10.0, -35.0]];
}

#[rustfmt::skip]
mod boxed {
    use super::TurnRow;

    pub const PRO: TurnRow    = [[0.0, -15.0], [55.0, 70.0], [30.0, 15.0], [-25.0, 115.0], [0.0, -15.0], [55.0, 70.0], [30.0, 15.0]];
    pub const ANTI: TurnRow   = [[-15.0, -25.0], [-25.0, 100.0], [-15.0, -25.0], [25.0, 125.0], [-15.0, -25.0], [-25.0, 100.0], [-15.0, -25.0]];
    pub const STATIC: TurnRow = [[0.0, 0.0], [-25.0, -110.0], [35.0, 35.0], [25.0, -60.0], [35.0, 35.0], [-25.0, -110.0], [35.0, 35.0]];
    pub const DASH: TurnRow   = [[0.0, 0.0], [-25.0, -110.0], [35.0, 35.0], [-25.0, -110.0], [35.0, 35.0], [-25.0, -110.0], [35.0, 35.0]];
    pub const FLOAT: TurnRow  = [[5.0, -25.0], [5.0, -25.0], [5.0, -25.0], [5.0, -25.0], [5.0, -25.0], [5.0, -25.0], [5.0, -25.0]];
}

/// Base adjustment for a motion type at a turn count
///
/// Float motions read their row at any turn count, and the float sentinel
/// reads its first entry. The sentinel on a counted motion returns `None`.
pub fn default_adjustment(grid_mode: GridMode, motion_type: MotionType, turns: Turns) -> Option<DVec2> {
    let row = match (grid_mode, motion_type) {
        (GridMode::Diamond, MotionType::Pro) => &diamond::PRO,
        (GridMode::Diamond, MotionType::Anti) => &diamond::ANTI,
        (GridMode::Diamond, MotionType::Static) => &diamond::STATIC,
        (GridMode::Diamond, MotionType::Dash) => &diamond::DASH,
        (GridMode::Diamond, MotionType::Float) => &diamond::FLOAT,
        (GridMode::Box, MotionType::Pro) => &boxed::PRO,
        (GridMode::Box, MotionType::Anti) => &boxed::ANTI,
        (GridMode::Box, MotionType::Static) => &boxed::STATIC,
        (GridMode::Box, MotionType::Dash) => &boxed::DASH,
        (GridMode::Box, MotionType::Float) => &boxed::FLOAT,
    };

    let [x, y] = match turns {
        Turns::Float if motion_type == MotionType::Float => row[0],
        Turns::Float => return None,
        Turns::Counted(halves) => row[usize::from(halves.get())],
    };
    Some(dvec2(x, y))
}
