//! Canvas coordinates of grid locations

use std::collections::HashMap;

use glam::{DVec2, dvec2};

use crate::defaults::SceneConfig;
use crate::log::warn;
use crate::model::MotionData;
use crate::types::{GridMode, Location, Point};

/// Which point table a location is looked up in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointLayer {
    /// Where the hands rest
    HandPoints,
    /// Between hand points, where shift arrows sit
    Layer2Points,
}

/// Unit grid step toward a location (y down), each component in {-1, 0, 1}
fn grid_step(location: Location) -> DVec2 {
    match location {
        Location::North => dvec2(0.0, -1.0),
        Location::NorthEast => dvec2(1.0, -1.0),
        Location::East => dvec2(1.0, 0.0),
        Location::SouthEast => dvec2(1.0, 1.0),
        Location::South => dvec2(0.0, 1.0),
        Location::SouthWest => dvec2(-1.0, 1.0),
        Location::West => dvec2(-1.0, 0.0),
        Location::NorthWest => dvec2(-1.0, -1.0),
        Location::Center => DVec2::ZERO,
    }
}

/// Maps resolved locations to initial arrow positions
#[derive(Debug, Clone)]
pub struct CoordinateSystemService {
    config: SceneConfig,
    tables: HashMap<(GridMode, PointLayer), HashMap<Location, Point>>,
}

impl Default for CoordinateSystemService {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl CoordinateSystemService {
    pub fn new(config: SceneConfig) -> Self {
        let center = config.center();
        let r = config.hand_point_radius;
        let b = config.box_hand_point_offset;

        let table = |points: &[Location], distance: f64| -> HashMap<Location, Point> {
            points
                .iter()
                .map(|&loc| (loc, center + grid_step(loc) * distance))
                .collect()
        };

        let cardinals = [
            Location::North,
            Location::East,
            Location::South,
            Location::West,
        ];
        let diagonals = [
            Location::NorthEast,
            Location::SouthEast,
            Location::SouthWest,
            Location::NorthWest,
        ];

        let mut tables = HashMap::new();
        tables.insert((GridMode::Diamond, PointLayer::HandPoints), table(&cardinals, r));
        tables.insert((GridMode::Diamond, PointLayer::Layer2Points), table(&diagonals, r));
        tables.insert((GridMode::Box, PointLayer::HandPoints), table(&diagonals, b));
        tables.insert((GridMode::Box, PointLayer::Layer2Points), table(&cardinals, r));

        Self { config, tables }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn scene_center(&self) -> Point {
        self.config.center()
    }

    /// Look up a single table
    pub fn point(&self, grid_mode: GridMode, layer: PointLayer, location: Location) -> Option<Point> {
        self.tables.get(&(grid_mode, layer))?.get(&location).copied()
    }

    /// Initial arrow position before any adjustment
    ///
    /// Shift arrows look in the layer-2 table first, dash and static arrows
    /// in the hand-point table first; the other table is the second choice.
    /// Anything unresolvable lands on the scene center.
    pub fn initial_position(&self, motion: &MotionData, location: Location, grid_mode: GridMode) -> Point {
        let order = if motion.motion_type.is_shift() {
            [PointLayer::Layer2Points, PointLayer::HandPoints]
        } else {
            [PointLayer::HandPoints, PointLayer::Layer2Points]
        };

        let found = order
            .into_iter()
            .find_map(|layer| self.point(grid_mode, layer, location));

        match found {
            Some(point) if self.validate_coordinates(point) => point,
            Some(_) => {
                warn!(%location, %grid_mode, "non-finite table point, using scene center");
                self.scene_center()
            }
            None => {
                if location != Location::Center {
                    warn!(%location, %grid_mode, "no coordinate entry, using scene center");
                }
                self.scene_center()
            }
        }
    }

    /// True when both members are finite numbers
    pub fn validate_coordinates(&self, point: Point) -> bool {
        point.is_finite()
    }
}
