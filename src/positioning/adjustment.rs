//! Two-tier adjustment lookup: special placement first, default table second

use glam::DVec2;

use crate::errors::PositioningError;
use crate::letter::Letter;
use crate::log::{debug, warn};
use crate::model::{MotionData, PictographData};
use crate::types::{GridMode, Location, OrientationLayer, Point, PropColor, Turns, format_turns_tuple};

use super::default_placements::default_adjustment;
use super::directional::DirectionalTupleProcessor;
use super::special::{OrientationKey, OverrideCache};

/// Whether the special placement tier may be consulted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdjustmentMode {
    /// Special placements override defaults; may fetch placement data
    #[default]
    WithOverrides,
    /// Default table only; never touches the placement source
    DefaultOnly,
}

/// The three keys a special placement is addressed by
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustmentKeys {
    pub orientation: OrientationKey,
    /// `"(blue turns, red turns)"`
    pub turns_tuple: String,
    /// Preferred attribute key for this arrow
    pub attribute: String,
}

impl AdjustmentKeys {
    pub fn generate(pictograph: &PictographData, color: PropColor, motion: &MotionData) -> Self {
        Self {
            orientation: orientation_key(pictograph),
            turns_tuple: turns_tuple_key(pictograph),
            attribute: attribute_key(pictograph, color, motion),
        }
    }

    /// Attribute keys to try: the color, then the motion type
    fn candidates(color: PropColor, motion: &MotionData) -> [&'static str; 2] {
        [color.as_str(), motion.motion_type.as_str()]
    }
}

/// Classify both props' start orientations into one of four buckets
///
/// A missing prop takes the class of the present one; with neither present
/// the pictograph counts as layer 1.
pub fn orientation_key(pictograph: &PictographData) -> OrientationKey {
    let layer = |color| {
        pictograph
            .motion(color)
            .map(|m: &MotionData| m.start_orientation.layer())
    };
    let (blue, red) = match (layer(PropColor::Blue), layer(PropColor::Red)) {
        (Some(b), Some(r)) => (b, r),
        (Some(only), None) | (None, Some(only)) => (only, only),
        (None, None) => (OrientationLayer::Layer1, OrientationLayer::Layer1),
    };

    match (blue, red) {
        (OrientationLayer::Layer1, OrientationLayer::Layer1) => OrientationKey::FromLayer1,
        (OrientationLayer::Layer2, OrientationLayer::Layer2) => OrientationKey::FromLayer2,
        (OrientationLayer::Layer1, OrientationLayer::Layer2) => OrientationKey::FromLayer3Blue1Red2,
        (OrientationLayer::Layer2, OrientationLayer::Layer1) => OrientationKey::FromLayer3Blue2Red1,
    }
}

/// Both props' turns as `"(blue, red)"`; a missing prop counts as zero
pub fn turns_tuple_key(pictograph: &PictographData) -> String {
    let turns = |color| pictograph.motion(color).map_or(Turns::ZERO, |m| m.turns);
    format_turns_tuple(turns(PropColor::Blue), turns(PropColor::Red))
}

/// Color for most letters; motion type when the two props differ in motion
/// type, since those letters store one adjustment per motion type
pub fn attribute_key(pictograph: &PictographData, color: PropColor, motion: &MotionData) -> String {
    match pictograph.motion(color.other()) {
        Some(other) if other.motion_type != motion.motion_type => motion.motion_type.as_str().to_string(),
        _ => color.as_str().to_string(),
    }
}

/// Resolves an arrow's adjustment vector
#[derive(Debug, Default)]
pub struct AdjustmentLookup {
    overrides: OverrideCache,
    directional: DirectionalTupleProcessor,
}

impl AdjustmentLookup {
    pub fn new(overrides: OverrideCache) -> Self {
        Self {
            overrides,
            directional: DirectionalTupleProcessor::new(),
        }
    }

    pub fn overrides(&self) -> &OverrideCache {
        &self.overrides
    }

    pub fn directional(&self) -> &DirectionalTupleProcessor {
        &self.directional
    }

    /// Adjustment for the `color` arrow sitting at `location`
    ///
    /// Fails only when the pictograph lacks the arrow's motion or a letter.
    pub fn get_base_adjustment(
        &self,
        pictograph: &PictographData,
        color: PropColor,
        location: Location,
        mode: AdjustmentMode,
    ) -> Result<Point, PositioningError> {
        let motion = pictograph
            .motion(color)
            .ok_or(PositioningError::MissingMotion { color })?;
        let letter = pictograph.letter.ok_or(PositioningError::MissingLetter)?;

        if mode == AdjustmentMode::WithOverrides {
            if let Some(special) = self.special_adjustment(pictograph, letter, color, motion) {
                return Ok(special);
            }
        }

        Ok(self.default_adjustment(motion, location, pictograph.grid_mode))
    }

    /// The special placement for this arrow, if one was authored
    pub fn special_adjustment(
        &self,
        pictograph: &PictographData,
        letter: Letter,
        color: PropColor,
        motion: &MotionData,
    ) -> Option<Point> {
        let keys = AdjustmentKeys::generate(pictograph, color, motion);
        let placements = self
            .overrides
            .placements(pictograph.grid_mode, keys.orientation, letter)?;

        let found = AdjustmentKeys::candidates(color, motion)
            .into_iter()
            .find_map(|attribute| placements.get(&keys.turns_tuple, attribute));

        if found.is_some() {
            debug!(%letter, %color, turns = %keys.turns_tuple, attribute = %keys.attribute, "using special placement");
        }
        found
    }

    /// The default table entry rotated into the arrow's quadrant; zero when
    /// the table has no entry
    pub fn default_adjustment(&self, motion: &MotionData, location: Location, grid_mode: GridMode) -> Point {
        match default_adjustment(grid_mode, motion.motion_type, motion.turns) {
            Some(base) => self
                .directional
                .process_directional_tuples(base, motion, location, grid_mode),
            None => {
                warn!(
                    motion_type = %motion.motion_type,
                    turns = %motion.turns,
                    "no default adjustment, using zero"
                );
                DVec2::ZERO
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::positioning::special::{LetterPlacements, MemoryOverrideSource};
    use crate::types::{MotionType, Orientation, RotationDirection};
    use glam::dvec2;

    fn pro(start: Orientation) -> MotionData {
        MotionData::new(MotionType::Pro, Location::North, Location::East)
            .with_rotation(RotationDirection::Clockwise)
            .with_turns(Turns::ONE)
            .with_orientations(start, start)
    }

    fn anti(start: Orientation) -> MotionData {
        MotionData::new(MotionType::Anti, Location::South, Location::West)
            .with_rotation(RotationDirection::CounterClockwise)
            .with_turns(Turns::HALF)
            .with_orientations(start, start)
    }

    fn pic(blue: MotionData, red: MotionData) -> PictographData {
        PictographData::new(Some(Letter::C), GridMode::Diamond)
            .with_motion(PropColor::Blue, blue)
            .with_motion(PropColor::Red, red)
    }

    #[test]
    fn orientation_buckets() {
        use Orientation::*;
        assert_eq!(orientation_key(&pic(pro(In), pro(Out))), OrientationKey::FromLayer1);
        assert_eq!(orientation_key(&pic(pro(Clock), pro(Counter))), OrientationKey::FromLayer2);
        assert_eq!(orientation_key(&pic(pro(In), pro(Clock))), OrientationKey::FromLayer3Blue1Red2);
        assert_eq!(orientation_key(&pic(pro(Counter), pro(Out))), OrientationKey::FromLayer3Blue2Red1);
    }

    #[test]
    fn turns_tuple_formatting() {
        let p = pic(pro(Orientation::In), anti(Orientation::In));
        assert_eq!(turns_tuple_key(&p), "(1, 0.5)");
    }

    #[test]
    fn attribute_key_uses_motion_type_for_hybrids() {
        let p = pic(pro(Orientation::In), anti(Orientation::In));
        assert_eq!(attribute_key(&p, PropColor::Blue, &pro(Orientation::In)), "pro");
        let p = pic(pro(Orientation::In), pro(Orientation::In));
        assert_eq!(attribute_key(&p, PropColor::Red, &pro(Orientation::In)), "red");
    }

    #[test]
    fn missing_letter_is_an_error() {
        let mut p = pic(pro(Orientation::In), pro(Orientation::In));
        p.letter = None;
        let lookup = AdjustmentLookup::default();
        assert_eq!(
            lookup.get_base_adjustment(&p, PropColor::Blue, Location::NorthEast, AdjustmentMode::WithOverrides),
            Err(PositioningError::MissingLetter)
        );
    }

    #[test]
    fn missing_motion_is_an_error() {
        let p = PictographData::new(Some(Letter::A), GridMode::Diamond)
            .with_motion(PropColor::Blue, pro(Orientation::In));
        let lookup = AdjustmentLookup::default();
        assert_eq!(
            lookup.get_base_adjustment(&p, PropColor::Red, Location::NorthEast, AdjustmentMode::DefaultOnly),
            Err(PositioningError::MissingMotion { color: PropColor::Red })
        );
    }

    #[test]
    fn motion_type_key_found_when_color_key_absent() {
        let p = pic(pro(Orientation::In), pro(Orientation::In));
        let source = MemoryOverrideSource::new().with(
            GridMode::Diamond,
            OrientationKey::FromLayer1,
            Letter::C,
            LetterPlacements::new().with("(1, 1)", "pro", dvec2(-4.0, 8.0)),
        );
        let lookup = AdjustmentLookup::new(OverrideCache::new(source));
        assert_eq!(
            lookup.get_base_adjustment(&p, PropColor::Red, Location::SouthEast, AdjustmentMode::WithOverrides),
            Ok(dvec2(-4.0, 8.0))
        );
    }

    #[test]
    fn color_key_wins_over_motion_type_key() {
        let p = pic(pro(Orientation::In), anti(Orientation::In));
        let source = MemoryOverrideSource::new().with(
            GridMode::Diamond,
            OrientationKey::FromLayer1,
            Letter::C,
            LetterPlacements::new()
                .with("(1, 0.5)", "blue", dvec2(1.0, 1.0))
                .with("(1, 0.5)", "pro", dvec2(2.0, 2.0))
                .with("(1, 0.5)", "anti", dvec2(3.0, 3.0)),
        );
        let lookup = AdjustmentLookup::new(OverrideCache::new(source));
        assert_eq!(
            lookup.get_base_adjustment(&p, PropColor::Blue, Location::NorthEast, AdjustmentMode::WithOverrides),
            Ok(dvec2(1.0, 1.0))
        );
        // No "red" entry, so red falls through to its motion type.
        assert_eq!(
            lookup.get_base_adjustment(&p, PropColor::Red, Location::SouthWest, AdjustmentMode::WithOverrides),
            Ok(dvec2(3.0, 3.0))
        );
    }

    #[test]
    fn float_at_zero_turns_uses_the_float_row() {
        let float = MotionData::new(MotionType::Float, Location::North, Location::East);
        assert_eq!(float.turns, Turns::ZERO);
        let lookup = AdjustmentLookup::default();
        assert_eq!(
            lookup.default_adjustment(&float, Location::NorthEast, GridMode::Diamond),
            dvec2(10.0, -35.0)
        );
    }

    #[test]
    fn default_only_ignores_overrides() {
        let p = pic(pro(Orientation::In), pro(Orientation::In));
        let source = MemoryOverrideSource::new().with(
            GridMode::Diamond,
            OrientationKey::FromLayer1,
            Letter::C,
            LetterPlacements::new().with("(1, 1)", "blue", dvec2(99.0, 99.0)),
        );
        let lookup = AdjustmentLookup::new(OverrideCache::new(source));
        assert_eq!(
            lookup.get_base_adjustment(&p, PropColor::Blue, Location::NorthEast, AdjustmentMode::DefaultOnly),
            Ok(dvec2(30.0, 25.0))
        );
        assert_eq!(lookup.overrides().cached_len(), 0);
    }
}
