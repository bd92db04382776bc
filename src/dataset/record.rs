//! Coordinate record structure

use crate::coordinate::Point;

/// Reprojected coordinates of a record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetCoordinates {
    /// Coordinates in the destination reference system
    pub point: Point,
    /// Transform run that produced them
    pub generation: u64,
}

/// One row of the dataset
///
/// The target pair is a single optional value, so X and Y targets are
/// always present or absent together.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateRecord {
    source: Point,
    target: Option<TargetCoordinates>,
}

impl CoordinateRecord {
    /// Create a record with only source coordinates
    pub(crate) fn new(source: Point) -> Self {
        CoordinateRecord { source, target: None }
    }

    pub fn source(&self) -> Point {
        self.source
    }

    pub fn x_source(&self) -> f64 {
        self.source.x
    }

    pub fn y_source(&self) -> f64 {
        self.source.y
    }

    /// Raw target value, regardless of which transform run wrote it
    pub fn target_coordinates(&self) -> Option<TargetCoordinates> {
        self.target
    }

    pub(crate) fn set_target(&mut self, point: Point, generation: u64) {
        self.target = Some(TargetCoordinates { point, generation });
    }
}
