//! Which grid location an arrow occupies
//!
//! Each motion kind has its own strategy:
//! - shift (pro/anti/float): the point between start and end
//! - dash: a side of the dash line, chosen by turns, rotation and letter
//! - static: the start point

use enum_dispatch::enum_dispatch;

use crate::letter::{Letter, LetterType};
use crate::log::{debug, warn};
use crate::model::{MotionData, PictographData};
use crate::types::{GridMode, Location, MotionType, PropColor, RotationDirection};

use Location::*;

/// The pictograph an arrow belongs to and which of its arrows is asked about
#[derive(Debug, Clone, Copy)]
pub struct LocationContext<'a> {
    pub pictograph: &'a PictographData,
    pub color: PropColor,
}

impl<'a> LocationContext<'a> {
    pub fn new(pictograph: &'a PictographData, color: PropColor) -> Self {
        Self { pictograph, color }
    }

    fn other_motion(&self) -> Option<&'a MotionData> {
        self.pictograph.motion(self.color.other())
    }

    fn letter(&self) -> Option<Letter> {
        self.pictograph.letter
    }
}

/// Resolves a motion to a grid location
#[enum_dispatch]
pub trait LocationStrategy {
    fn location(&self, motion: &MotionData, ctx: &LocationContext<'_>) -> Location;
}

#[enum_dispatch(LocationStrategy)]
#[derive(Debug, Clone, Copy)]
pub enum LocationStrategyKind {
    Shift(ShiftLocation),
    Dash(DashLocation),
    Static(StaticLocation),
}

impl LocationStrategyKind {
    pub fn for_motion(motion_type: MotionType) -> Self {
        match motion_type {
            MotionType::Pro | MotionType::Anti | MotionType::Float => ShiftLocation.into(),
            MotionType::Dash => DashLocation.into(),
            MotionType::Static => StaticLocation.into(),
        }
    }
}

// ============================================================================
// Shift
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftLocation;

impl ShiftLocation {
    fn resolve(motion: &MotionData) -> Location {
        Location::between(motion.start_loc, motion.end_loc).unwrap_or_else(|| {
            debug!(start = %motion.start_loc, end = %motion.end_loc, "shift endpoints not adjacent");
            motion.start_loc
        })
    }
}

impl LocationStrategy for ShiftLocation {
    fn location(&self, motion: &MotionData, _ctx: &LocationContext<'_>) -> Location {
        Self::resolve(motion)
    }
}

// ============================================================================
// Dash
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct DashLocation;

impl DashLocation {
    /// A turning dash sits one step from its start in the spin direction.
    fn turning(motion: &MotionData) -> Location {
        match motion.rotation_direction {
            RotationDirection::Clockwise => motion.start_loc.step_clockwise(),
            RotationDirection::CounterClockwise => motion.start_loc.step_counter_clockwise(),
            RotationDirection::NoRotation => motion.start_loc,
        }
    }

    fn zero_turns(motion: &MotionData, ctx: &LocationContext<'_>) -> Location {
        let special = ctx.letter().and_then(|letter| {
            let other = ctx.other_motion()?;
            if letter.is_phi_or_psi_dash() {
                Self::phi_psi(motion, other, ctx.color)
            } else if letter.is_lambda() {
                lambda_zero_turns(motion.start_loc, motion.end_loc, other.end_loc)
            } else if letter.letter_type() == LetterType::Type3 {
                Self::type3(motion, other, ctx.pictograph.grid_mode)
            } else {
                None
            }
        });

        special
            .or_else(|| default_zero_turns(motion.start_loc, motion.end_loc))
            .unwrap_or(motion.start_loc)
    }

    fn phi_psi(motion: &MotionData, other: &MotionData, color: PropColor) -> Option<Location> {
        if other.turns.is_zero() {
            phi_psi_zero_turns(color, motion.start_loc, motion.end_loc)
        } else {
            // Stay clear of the turning dash.
            Some(Self::turning(other).opposite())
        }
    }

    fn type3(motion: &MotionData, shift: &MotionData, grid_mode: GridMode) -> Option<Location> {
        if !shift.motion_type.is_shift() {
            return None;
        }
        let shift_location = ShiftLocation::resolve(shift);
        let found = match grid_mode {
            GridMode::Diamond => type3_diamond(motion.start_loc, shift_location),
            GridMode::Box => type3_box(motion.start_loc, shift_location),
        };
        if found.is_none() {
            debug!(start = %motion.start_loc, shift = %shift_location, "no type 3 dash entry");
        }
        found
    }
}

impl LocationStrategy for DashLocation {
    fn location(&self, motion: &MotionData, ctx: &LocationContext<'_>) -> Location {
        if motion.turns.is_zero() {
            Self::zero_turns(motion, ctx)
        } else {
            Self::turning(motion)
        }
    }
}

/// A zero-turn dash sits a quarter turn clockwise from where it starts.
fn default_zero_turns(start: Location, end: Location) -> Option<Location> {
    match (start, end) {
        (North, South) => Some(East),
        (East, West) => Some(South),
        (South, North) => Some(West),
        (West, East) => Some(North),
        (NorthEast, SouthWest) => Some(SouthEast),
        (NorthWest, SouthEast) => Some(NorthEast),
        (SouthWest, NorthEast) => Some(NorthWest),
        (SouthEast, NorthWest) => Some(SouthWest),
        _ => None,
    }
}

/// Φ- and Ψ- with both dashes at zero turns: the props take opposite sides.
fn phi_psi_zero_turns(color: PropColor, start: Location, end: Location) -> Option<Location> {
    use PropColor::{Blue, Red};
    match (color, start, end) {
        (Red, North, South) | (Red, South, North) => Some(West),
        (Red, East, West) | (Red, West, East) => Some(North),
        (Blue, North, South) | (Blue, South, North) => Some(East),
        (Blue, East, West) | (Blue, West, East) => Some(South),
        (Red, NorthEast, SouthWest) | (Red, SouthWest, NorthEast) => Some(NorthWest),
        (Red, NorthWest, SouthEast) | (Red, SouthEast, NorthWest) => Some(NorthEast),
        (Blue, NorthEast, SouthWest) | (Blue, SouthWest, NorthEast) => Some(SouthEast),
        (Blue, NorthWest, SouthEast) | (Blue, SouthEast, NorthWest) => Some(SouthWest),
        _ => None,
    }
}

/// Λ and Λ- at zero turns: keyed by this dash and where the other prop ends.
fn lambda_zero_turns(start: Location, end: Location, other_end: Location) -> Option<Location> {
    match (start, end, other_end) {
        (North, South, West) => Some(East),
        (North, South, East) => Some(West),
        (South, North, West) => Some(East),
        (South, North, East) => Some(West),
        (East, West, North) => Some(South),
        (East, West, South) => Some(North),
        (West, East, North) => Some(South),
        (West, East, South) => Some(North),
        (NorthEast, SouthWest, NorthWest) => Some(SouthEast),
        (NorthEast, SouthWest, SouthEast) => Some(NorthWest),
        (SouthWest, NorthEast, NorthWest) => Some(SouthEast),
        (SouthWest, NorthEast, SouthEast) => Some(NorthWest),
        (NorthWest, SouthEast, NorthEast) => Some(SouthWest),
        (NorthWest, SouthEast, SouthWest) => Some(NorthEast),
        (SouthEast, NorthWest, NorthEast) => Some(SouthWest),
        (SouthEast, NorthWest, SouthWest) => Some(NorthEast),
        _ => None,
    }
}

/// Type 3 on the diamond grid: the dash moves away from the shift arrow.
fn type3_diamond(start: Location, shift: Location) -> Option<Location> {
    match (start, shift) {
        (North | South, NorthWest | SouthWest) => Some(East),
        (North | South, NorthEast | SouthEast) => Some(West),
        (East | West, NorthWest | NorthEast) => Some(South),
        (East | West, SouthEast | SouthWest) => Some(North),
        _ => None,
    }
}

/// Type 3 on the box grid.
fn type3_box(start: Location, shift: Location) -> Option<Location> {
    match (start, shift) {
        (NorthEast | SouthWest, North | West) => Some(SouthEast),
        (NorthEast | SouthWest, East | South) => Some(NorthWest),
        (SouthEast | NorthWest, North | East) => Some(SouthWest),
        (SouthEast | NorthWest, South | West) => Some(NorthEast),
        _ => None,
    }
}

// ============================================================================
// Static
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLocation;

impl LocationStrategy for StaticLocation {
    fn location(&self, motion: &MotionData, _ctx: &LocationContext<'_>) -> Location {
        if motion.start_loc == Center {
            warn!("static motion starts at the center");
        }
        motion.start_loc
    }
}

// ============================================================================
// Calculator
// ============================================================================

/// Entry point used by the orchestrator
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationCalculator;

impl LocationCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn calculate_location(&self, motion: &MotionData, pictograph: &PictographData, color: PropColor) -> Location {
        let ctx = LocationContext::new(pictograph, color);
        LocationStrategyKind::for_motion(motion.motion_type).location(motion, &ctx)
    }
}
