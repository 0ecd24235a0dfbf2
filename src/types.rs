//! Closed vocabularies of the notation: locations, grid modes, orientations,
//! rotation directions, motion types, prop colors and turn counts.
//!
//! Every enum here parses from and prints as the short lowercase names the
//! authoring layer stores (`"ne"`, `"diamond"`, `"clock"`, `"pro"`, ...).

use std::fmt;
use std::str::FromStr;

use glam::DVec2;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{ParseError, TurnsError};

/// A point in canvas pixel space (y grows downward)
pub type Point = DVec2;

/// Generates `as_str`, `Display` and `FromStr` for a fieldless enum.
///
/// The first name of each variant is canonical; the rest are accepted
/// aliases. Matching is case-insensitive.
macro_rules! named_enum {
    ($ty:ident, $kind:literal, { $($variant:ident => $name:literal $(| $alias:literal)*),* $(,)? }) => {
        impl $ty {
            /// Canonical short name
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)*
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lowered = s.trim().to_ascii_lowercase();
                match lowered.as_str() {
                    $($name $(| $alias)* => Ok($ty::$variant),)*
                    _ => Err(ParseError::UnknownName {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

// ============================================================================
// Location
// ============================================================================

/// One of the eight compass points, or the grid center
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Location {
    #[serde(rename = "n")]
    North,
    #[serde(rename = "ne")]
    NorthEast,
    #[serde(rename = "e")]
    East,
    #[serde(rename = "se")]
    SouthEast,
    #[serde(rename = "s")]
    South,
    #[serde(rename = "sw")]
    SouthWest,
    #[serde(rename = "w")]
    West,
    #[serde(rename = "nw")]
    NorthWest,
    #[serde(rename = "center")]
    Center,
}

named_enum!(Location, "location", {
    North => "n" | "north",
    NorthEast => "ne" | "northeast",
    East => "e" | "east",
    SouthEast => "se" | "southeast",
    South => "s" | "south",
    SouthWest => "sw" | "southwest",
    West => "w" | "west",
    NorthWest => "nw" | "northwest",
    Center => "center" | "c",
});

impl Location {
    /// The compass points in clockwise order starting at north
    pub const COMPASS: [Location; 8] = [
        Location::North,
        Location::NorthEast,
        Location::East,
        Location::SouthEast,
        Location::South,
        Location::SouthWest,
        Location::West,
        Location::NorthWest,
    ];

    /// Position on the clockwise compass cycle; `None` for the center
    pub fn compass_index(self) -> Option<usize> {
        Self::COMPASS.iter().position(|&loc| loc == self)
    }

    fn from_compass_index(index: usize) -> Location {
        Self::COMPASS[index % 8]
    }

    /// Advance `steps` eighth-turns clockwise. The center stays put.
    pub fn rotated(self, steps: i32) -> Location {
        match self.compass_index() {
            Some(index) => Self::from_compass_index((index as i32 + steps).rem_euclid(8) as usize),
            None => self,
        }
    }

    /// One compass step clockwise (N → NE)
    pub fn step_clockwise(self) -> Location {
        self.rotated(1)
    }

    /// One compass step counter-clockwise (N → NW)
    pub fn step_counter_clockwise(self) -> Location {
        self.rotated(-1)
    }

    /// The diametrically opposite point. The center is its own opposite.
    pub fn opposite(self) -> Location {
        self.rotated(4)
    }

    pub fn is_cardinal(self) -> bool {
        matches!(
            self,
            Location::North | Location::East | Location::South | Location::West
        )
    }

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Location::NorthEast | Location::SouthEast | Location::SouthWest | Location::NorthWest
        )
    }

    /// Angle of this direction in degrees, clockwise from east in canvas
    /// space (east 0, south 90, west 180, north 270).
    pub fn compass_angle(self) -> Option<f64> {
        // North sits at index 0 and 270 degrees; each step adds 45.
        self.compass_index()
            .map(|index| ((index as f64) * 45.0 + 270.0) % 360.0)
    }

    /// Unit direction vector in canvas space (y down). Zero for the center.
    pub fn unit_vec(self) -> DVec2 {
        match self.compass_angle() {
            Some(angle) => DVec2::from_angle(angle.to_radians()),
            None => DVec2::ZERO,
        }
    }

    /// The compass point midway between two points a quarter turn apart
    ///
    /// `(N, E)` gives `NE`, `(SE, NE)` gives `E`. Any other pair has no
    /// single midpoint and yields `None`.
    pub fn between(a: Location, b: Location) -> Option<Location> {
        let (ia, ib) = (a.compass_index()?, b.compass_index()?);
        match (ib + 8 - ia) % 8 {
            2 => Some(a.rotated(1)),
            6 => Some(a.rotated(-1)),
            _ => None,
        }
    }
}

// ============================================================================
// Grid Mode
// ============================================================================

/// Grid orientation: hand points on the cardinals (diamond) or the
/// diagonals (box)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridMode {
    #[default]
    Diamond,
    Box,
}

named_enum!(GridMode, "grid mode", {
    Diamond => "diamond",
    Box => "box",
});

impl GridMode {
    /// The four hand points of this grid in clockwise order
    pub fn hand_points(self) -> [Location; 4] {
        match self {
            GridMode::Diamond => [
                Location::North,
                Location::East,
                Location::South,
                Location::West,
            ],
            GridMode::Box => [
                Location::NorthEast,
                Location::SouthEast,
                Location::SouthWest,
                Location::NorthWest,
            ],
        }
    }
}

// ============================================================================
// Orientation
// ============================================================================

/// Which way the prop faces relative to the body
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    In,
    Out,
    Clock,
    Counter,
}

named_enum!(Orientation, "orientation", {
    In => "in",
    Out => "out",
    Clock => "clock",
    Counter => "counter",
});

/// Radial (layer 1) or non-radial (layer 2) orientation class
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrientationLayer {
    Layer1,
    Layer2,
}

impl Orientation {
    pub fn layer(self) -> OrientationLayer {
        match self {
            Orientation::In | Orientation::Out => OrientationLayer::Layer1,
            Orientation::Clock | Orientation::Counter => OrientationLayer::Layer2,
        }
    }

    /// In ↔ out, clock ↔ counter
    pub fn switched(self) -> Orientation {
        match self {
            Orientation::In => Orientation::Out,
            Orientation::Out => Orientation::In,
            Orientation::Clock => Orientation::Counter,
            Orientation::Counter => Orientation::Clock,
        }
    }
}

// ============================================================================
// Rotation and Handpath Direction
// ============================================================================

/// Spin direction of the prop
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
    #[default]
    NoRotation,
}

named_enum!(RotationDirection, "rotation direction", {
    Clockwise => "clockwise" | "cw",
    CounterClockwise => "counter_clockwise" | "ccw",
    NoRotation => "no_rotation" | "no_rot",
});

/// Direction the hand travels around the grid between start and end
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandpathDirection {
    Clockwise,
    CounterClockwise,
    /// Straight through the center to the opposite point
    Dash,
    /// No travel
    Static,
}

impl HandpathDirection {
    /// Compare compass positions of `start` and `end`
    pub fn between(start: Location, end: Location) -> HandpathDirection {
        let (Some(s), Some(e)) = (start.compass_index(), end.compass_index()) else {
            return if start == end {
                HandpathDirection::Static
            } else {
                HandpathDirection::Dash
            };
        };
        match (e + 8 - s) % 8 {
            0 => HandpathDirection::Static,
            4 => HandpathDirection::Dash,
            1..=3 => HandpathDirection::Clockwise,
            _ => HandpathDirection::CounterClockwise,
        }
    }

    /// The spin a floating prop borrows from its handpath
    pub fn as_rotation(self) -> RotationDirection {
        match self {
            HandpathDirection::Clockwise => RotationDirection::Clockwise,
            HandpathDirection::CounterClockwise => RotationDirection::CounterClockwise,
            HandpathDirection::Dash | HandpathDirection::Static => RotationDirection::NoRotation,
        }
    }
}

// ============================================================================
// Motion Type and Color
// ============================================================================

/// Kind of motion a prop performs within a beat
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionType {
    Pro,
    Anti,
    Static,
    Dash,
    Float,
}

named_enum!(MotionType, "motion type", {
    Pro => "pro",
    Anti => "anti",
    Static => "static",
    Dash => "dash",
    Float => "float",
});

impl MotionType {
    /// Pro, anti and float move the hand to an adjacent hand point
    pub fn is_shift(self) -> bool {
        matches!(self, MotionType::Pro | MotionType::Anti | MotionType::Float)
    }
}

/// Which of the two props
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropColor {
    Blue,
    Red,
}

named_enum!(PropColor, "color", {
    Blue => "blue",
    Red => "red",
});

impl PropColor {
    pub const BOTH: [PropColor; 2] = [PropColor::Blue, PropColor::Red];

    pub fn other(self) -> PropColor {
        match self {
            PropColor::Blue => PropColor::Red,
            PropColor::Red => PropColor::Blue,
        }
    }
}

// ============================================================================
// Turns
// ============================================================================

/// Half-turn count in `0..=6`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HalfTurns(u8);

impl HalfTurns {
    pub const MAX: u8 = 6;

    pub fn new(halves: u8) -> Option<HalfTurns> {
        (halves <= Self::MAX).then_some(HalfTurns(halves))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// Number of prop turns in a beat: 0 to 3 in half steps, or the float sentinel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Turns {
    Counted(HalfTurns),
    Float,
}

impl Default for Turns {
    fn default() -> Self {
        Turns::ZERO
    }
}

impl Turns {
    pub const ZERO: Turns = Turns::Counted(HalfTurns(0));
    pub const HALF: Turns = Turns::Counted(HalfTurns(1));
    pub const ONE: Turns = Turns::Counted(HalfTurns(2));
    pub const ONE_AND_HALF: Turns = Turns::Counted(HalfTurns(3));
    pub const TWO: Turns = Turns::Counted(HalfTurns(4));
    pub const TWO_AND_HALF: Turns = Turns::Counted(HalfTurns(5));
    pub const THREE: Turns = Turns::Counted(HalfTurns(6));

    /// Every counted value in ascending order
    pub const COUNTED: [Turns; 7] = [
        Turns::ZERO,
        Turns::HALF,
        Turns::ONE,
        Turns::ONE_AND_HALF,
        Turns::TWO,
        Turns::TWO_AND_HALF,
        Turns::THREE,
    ];

    pub fn half_turns(self) -> Option<u8> {
        match self {
            Turns::Counted(h) => Some(h.get()),
            Turns::Float => None,
        }
    }

    /// Numeric value; `None` for float
    pub fn value(self) -> Option<f64> {
        self.half_turns().map(|h| f64::from(h) / 2.0)
    }

    pub fn is_zero(self) -> bool {
        self == Turns::ZERO
    }

    /// Counted and greater than zero
    pub fn is_positive(self) -> bool {
        self.half_turns().is_some_and(|h| h > 0)
    }

    pub fn is_float(self) -> bool {
        self == Turns::Float
    }
}

impl TryFrom<f64> for Turns {
    type Error = TurnsError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let halves = value * 2.0;
        if !halves.is_finite() || halves.fract() != 0.0 || !(0.0..=6.0).contains(&halves) {
            return Err(TurnsError { value });
        }
        Ok(Turns::Counted(HalfTurns(halves as u8)))
    }
}

impl fmt::Display for Turns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.half_turns() {
            None => f.write_str("fl"),
            Some(h) if h % 2 == 0 => write!(f, "{}", h / 2),
            Some(h) => write!(f, "{}.5", h / 2),
        }
    }
}

impl FromStr for Turns {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("fl") || trimmed.eq_ignore_ascii_case("float") {
            return Ok(Turns::Float);
        }
        let unknown = || ParseError::UnknownName {
            kind: "turns",
            value: s.to_string(),
        };
        let value: f64 = trimmed.parse().map_err(|_| unknown())?;
        Turns::try_from(value).map_err(|_| unknown())
    }
}

/// The `"(blue, red)"` key special placements are stored under
pub fn format_turns_tuple(blue: Turns, red: Turns) -> String {
    format!("({blue}, {red})")
}

/// Parse a `"(blue, red)"` turns tuple; accepts `1.0` for `1`
pub fn parse_turns_tuple(s: &str) -> Result<(Turns, Turns), ParseError> {
    let malformed = || ParseError::TurnsTuple { value: s.to_string() };
    let inner = s
        .trim()
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(malformed)?;
    let (blue, red) = inner.split_once(',').ok_or_else(malformed)?;
    let blue = blue.parse().map_err(|_| malformed())?;
    let red = red.parse().map_err(|_| malformed())?;
    Ok((blue, red))
}

impl Serialize for Turns {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value() {
            Some(value) => serializer.serialize_f64(value),
            None => serializer.serialize_str("fl"),
        }
    }
}

impl<'de> Deserialize<'de> for Turns {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Turns::try_from(value).map_err(serde::de::Error::custom),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turns_tuples() {
        assert_eq!(format_turns_tuple(Turns::ONE, Turns::HALF), "(1, 0.5)");
        assert_eq!(parse_turns_tuple("(1.0, fl)"), Ok((Turns::ONE, Turns::Float)));
        assert_eq!(parse_turns_tuple(" (0,2.5) "), Ok((Turns::ZERO, Turns::TWO_AND_HALF)));
        assert!(matches!(parse_turns_tuple("(1, 4)"), Err(ParseError::TurnsTuple { .. })));
        assert!(matches!(parse_turns_tuple("1, 1"), Err(ParseError::TurnsTuple { .. })));
    }

    #[test]
    fn compass_steps_wrap() {
        assert_eq!(Location::North.step_counter_clockwise(), Location::NorthWest);
        assert_eq!(Location::NorthWest.step_clockwise(), Location::North);
        assert_eq!(Location::SouthEast.opposite(), Location::NorthWest);
        assert_eq!(Location::Center.opposite(), Location::Center);
    }

    #[test]
    fn compass_angles_are_canvas_space() {
        assert_eq!(Location::East.compass_angle(), Some(0.0));
        assert_eq!(Location::South.compass_angle(), Some(90.0));
        assert_eq!(Location::North.compass_angle(), Some(270.0));
        assert_eq!(Location::NorthEast.compass_angle(), Some(315.0));
        assert_eq!(Location::Center.compass_angle(), None);
    }

    #[test]
    fn between_adjacent_hand_points() {
        assert_eq!(Location::between(Location::North, Location::East), Some(Location::NorthEast));
        assert_eq!(Location::between(Location::West, Location::North), Some(Location::NorthWest));
        assert_eq!(Location::between(Location::SouthEast, Location::NorthEast), Some(Location::East));
        assert_eq!(Location::between(Location::North, Location::South), None);
        assert_eq!(Location::between(Location::North, Location::North), None);
    }

    #[test]
    fn handpath_from_compass_positions() {
        use HandpathDirection::*;
        assert_eq!(HandpathDirection::between(Location::North, Location::East), Clockwise);
        assert_eq!(HandpathDirection::between(Location::North, Location::West), CounterClockwise);
        assert_eq!(HandpathDirection::between(Location::NorthEast, Location::SouthWest), Dash);
        assert_eq!(HandpathDirection::between(Location::South, Location::South), Static);
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("NE".parse::<Location>(), Ok(Location::NorthEast));
        assert_eq!("southwest".parse::<Location>(), Ok(Location::SouthWest));
        assert_eq!("ccw".parse::<RotationDirection>(), Ok(RotationDirection::CounterClockwise));
        assert!("up".parse::<Location>().is_err());
    }

    #[test]
    fn turns_accepts_only_half_steps() {
        assert_eq!(Turns::try_from(1.5), Ok(Turns::ONE_AND_HALF));
        assert!(Turns::try_from(0.25).is_err());
        assert!(Turns::try_from(3.5).is_err());
        assert!(Turns::try_from(-0.5).is_err());
        assert!(Turns::try_from(f64::NAN).is_err());
        assert_eq!("fl".parse::<Turns>(), Ok(Turns::Float));
    }

    #[test]
    fn turns_display() {
        let shown: Vec<String> = Turns::COUNTED.iter().map(ToString::to_string).collect();
        assert_eq!(shown, ["0", "0.5", "1", "1.5", "2", "2.5", "3"]);
        assert_eq!(Turns::Float.to_string(), "fl");
    }

    #[test]
    fn turns_serde() {
        let parsed: Vec<Turns> = serde_json::from_str(r#"[0, 2.5, "fl", "1"]"#).unwrap();
        assert_eq!(parsed, [Turns::ZERO, Turns::TWO_AND_HALF, Turns::Float, Turns::ONE]);
        assert!(serde_json::from_str::<Turns>("0.75").is_err());
    }
}
