//! Dataset operations
//!
//! The controller owns the coordinate set and combines it with the projection
//! engine and the format policy. Every operation runs to completion and hands
//! back plain data for the presentation, mapping or export side to consume.

use std::fmt;
use std::str::FromStr;
use log::{debug, info, warn};

use super::format::FormatPolicy;
use super::import::{self, TabularData};
use super::set::CoordinateSet;
use crate::coordinate::{Point, ProjectionEngine, SpatialReference};
use crate::errors::{CoordError, CoordResult};

/// Which coordinate pair of the records an operation works on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateColumn {
    /// Coordinates as entered or imported
    Source,
    /// Coordinates produced by the last transform
    Target,
}

impl fmt::Display for CoordinateColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateColumn::Source => write!(f, "source"),
            CoordinateColumn::Target => write!(f, "target"),
        }
    }
}

impl FromStr for CoordinateColumn {
    type Err = CoordError;

    fn from_str(s: &str) -> CoordResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "source" | "origen" => Ok(CoordinateColumn::Source),
            "target" | "transformado" | "destino" => Ok(CoordinateColumn::Target),
            other => Err(CoordError::GenericError(format!("Unknown coordinate column: {}", other))),
        }
    }
}

/// One table row as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// 1-based position
    pub position: usize,
    pub x: String,
    pub y: String,
    pub x_target: String,
    pub y_target: String,
}

/// A marker position for the map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapMarker {
    pub lat: f64,
    pub lon: f64,
}

/// Input for the mapping side: markers and the point to center on
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub markers: Vec<MapMarker>,
    pub center: MapMarker,
    /// Reference system of the selected coordinates
    pub reference: SpatialReference,
}

/// Points ready for georeferenced export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportBatch {
    pub reference: SpatialReference,
    pub points: Vec<Point>,
}

/// Orchestrates the dataset, projection engine and format policy
#[derive(Debug, Default)]
pub struct DatasetController {
    set: CoordinateSet,
    engine: ProjectionEngine,
}

impl DatasetController {
    pub fn new() -> Self {
        DatasetController::default()
    }

    /// Read-only access to the records
    pub fn dataset(&self) -> &CoordinateSet {
        &self.set
    }

    /// Add a manually entered coordinate
    pub fn add_manual(&mut self, x: f64, y: f64) -> CoordResult<()> {
        self.set.append(x, y)?;
        debug!("Added manual coordinate ({}, {})", x, y);
        Ok(())
    }

    /// Add a coordinate typed as text
    pub fn add_manual_text(&mut self, x: &str, y: &str) -> CoordResult<()> {
        let parse = |text: &str, field: &str| text.trim().parse::<f64>().map_err(|_| CoordError::Validation {
            row: None,
            field: field.to_string(),
            value: text.to_string(),
        });
        let x = parse(x, "X")?;
        let y = parse(y, "Y")?;
        self.add_manual(x, y)
    }

    /// Append every row of an imported table to the existing records
    ///
    /// # Returns
    /// Number of records added
    pub fn import_rows(&mut self, table: &TabularData) -> CoordResult<usize> {
        let pairs = import::extract_pairs(table)?;
        let added = self.set.append_bulk(&pairs)?;
        info!("Imported {} rows, dataset now holds {}", added, self.set.len());
        Ok(added)
    }

    /// Reproject every record and store the result as its target
    pub fn transform_all(&mut self, source: SpatialReference, target: SpatialReference) -> CoordResult<()> {
        if self.set.is_empty() {
            return Err(CoordError::EmptyDataset);
        }

        let (xs, ys) = self.set.source_columns();
        let (tx, ty) = self.engine.transform(&xs, &ys, source, target)?;
        self.set.apply_targets(&tx, &ty, source, target)?;

        info!("Transformed {} records from {} to {}", self.set.len(), source, target);
        Ok(())
    }

    /// Fail when the stored targets were computed for another destination
    fn check_target_reference(&self, requested: SpatialReference) -> CoordResult<()> {
        match self.set.transform_references() {
            Some((_, transformed)) if transformed != requested => {
                warn!("Targets are in {} but {} is selected", transformed, requested);
                Err(CoordError::ReferenceMismatch { transformed, requested })
            },
            _ => Ok(()),
        }
    }

    /// Selected coordinates of every record, failing if any are missing
    fn column_points(&self, which: CoordinateColumn, target: SpatialReference) -> CoordResult<Vec<Point>> {
        if self.set.is_empty() {
            return Err(CoordError::EmptyDataset);
        }

        match which {
            CoordinateColumn::Source => Ok(self.set.iter().map(|r| r.source()).collect()),
            CoordinateColumn::Target => {
                if self.set.transformed_count() == 0 {
                    return Err(CoordError::NotYetTransformed { row: None });
                }
                if let Some(row) = self.set.first_untransformed() {
                    return Err(CoordError::NotYetTransformed { row: Some(row) });
                }
                self.check_target_reference(target)?;
                Ok(self.set.iter().filter_map(|r| self.set.current_target(r)).collect())
            },
        }
    }

    /// One `x,y` line per record, for the clipboard
    pub fn rows_as_text(
        &self,
        which: CoordinateColumn,
        source: SpatialReference,
        target: SpatialReference,
    ) -> CoordResult<String> {
        let reference = match which {
            CoordinateColumn::Source => source,
            CoordinateColumn::Target => target,
        };

        let mut text = String::new();
        for point in self.column_points(which, target)? {
            if let Some(line) = FormatPolicy::format_pair(Some(point), reference) {
                text.push_str(&line);
                text.push('\n');
            }
        }
        Ok(text)
    }

    /// `x,y` text of a single record
    pub fn row_as_text(
        &self,
        index: usize,
        which: CoordinateColumn,
        source: SpatialReference,
        target: SpatialReference,
    ) -> CoordResult<String> {
        let record = self.set.get(index)?;
        let (point, reference) = match which {
            CoordinateColumn::Source => (Some(record.source()), source),
            CoordinateColumn::Target => (self.set.current_target(record), target),
        };
        if which == CoordinateColumn::Target && point.is_some() {
            self.check_target_reference(target)?;
        }

        FormatPolicy::format_pair(point, reference).ok_or(CoordError::NoDataToCopy { index })
    }

    /// Rows for the on-screen table
    ///
    /// Target columns stay blank while the stored targets belong to a
    /// destination other than `target`.
    pub fn display_rows(&self, source: SpatialReference, target: SpatialReference) -> Vec<DisplayRow> {
        let targets_shown = self.check_target_reference(target).is_ok();
        self.set.iter().enumerate().map(|(i, record)| {
            let current = self.set.current_target(record).filter(|_| targets_shown);
            DisplayRow {
                position: i + 1,
                x: FormatPolicy::format_value(Some(record.x_source()), source),
                y: FormatPolicy::format_value(Some(record.y_source()), source),
                x_target: FormatPolicy::format_value(current.map(|p| p.x), target),
                y_target: FormatPolicy::format_value(current.map(|p| p.y), target),
            }
        }).collect()
    }

    /// Delete one record; the caller confirms beforehand
    pub fn remove(&mut self, index: usize) -> CoordResult<()> {
        self.set.remove_at(index)?;
        info!("Removed record {}, {} remaining", index + 1, self.set.len());
        Ok(())
    }

    /// Delete every record; the caller confirms beforehand
    pub fn clear(&mut self) {
        self.set.clear();
        info!("Cleared all records");
    }

    /// Target coordinates reprojected into the export reference
    pub fn export_points(
        &self,
        target: SpatialReference,
        export: SpatialReference,
    ) -> CoordResult<ExportBatch> {
        let points = self.column_points(CoordinateColumn::Target, target)?;
        let (xs, ys): (Vec<f64>, Vec<f64>) = points.iter().map(|p| (p.x, p.y)).unzip();
        let (ex, ey) = self.engine.transform(&xs, &ys, target, export)?;

        info!("Prepared {} points for export in {}", ex.len(), export);
        Ok(ExportBatch {
            reference: export,
            points: ex.into_iter().zip(ey).map(|(x, y)| Point::new(x, y)).collect(),
        })
    }

    /// Export to the fixed export reference (EPSG:9377)
    pub fn export_points_default(&self, target: SpatialReference) -> CoordResult<ExportBatch> {
        self.export_points(target, SpatialReference::export_target())
    }

    /// Markers and center for the map
    ///
    /// Markers use the selected pair as-is: latitude is Y and longitude is X.
    pub fn map_points(
        &self,
        which: CoordinateColumn,
        source: SpatialReference,
        target: SpatialReference,
    ) -> CoordResult<MapView> {
        let points = self.column_points(which, target)?;
        let reference = match which {
            CoordinateColumn::Source => source,
            CoordinateColumn::Target => target,
        };

        let center = Point::centroid(&points).ok_or(CoordError::EmptyDataset)?;
        Ok(MapView {
            markers: points.iter().map(|p| MapMarker { lat: p.y, lon: p.x }).collect(),
            center: MapMarker { lat: center.y, lon: center.x },
            reference,
        })
    }
}
