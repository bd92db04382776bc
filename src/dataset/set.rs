//! Ordered collection of coordinate records

use log::debug;

use super::record::CoordinateRecord;
use crate::coordinate::{Point, SpatialReference};
use crate::errors::{CoordError, CoordResult};

/// The dataset of record
///
/// Records keep insertion order and are addressed by position only, so
/// removing a record renumbers every record after it.
#[derive(Debug, Default, Clone)]
pub struct CoordinateSet {
    records: Vec<CoordinateRecord>,
    /// Incremented by every transform run; 0 means never transformed
    generation: u64,
    /// Origin and destination of the last transform run
    references: Option<(SpatialReference, SpatialReference)>,
}

/// Check that a single coordinate value is usable
pub(crate) fn validate_value(value: f64, field: &str, row: Option<usize>) -> CoordResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CoordError::Validation {
            row,
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

impl CoordinateSet {
    pub fn new() -> Self {
        CoordinateSet::default()
    }

    /// Append a record with only source coordinates
    pub fn append(&mut self, x: f64, y: f64) -> CoordResult<()> {
        let x = validate_value(x, "X", None)?;
        let y = validate_value(y, "Y", None)?;
        self.records.push(CoordinateRecord::new(Point::new(x, y)));
        Ok(())
    }

    /// Append many records in order
    ///
    /// Every pair is validated before anything is inserted; the first
    /// invalid pair is reported with its position in `pairs`.
    pub fn append_bulk(&mut self, pairs: &[(f64, f64)]) -> CoordResult<usize> {
        for (row, &(x, y)) in pairs.iter().enumerate() {
            validate_value(x, "X", Some(row))?;
            validate_value(y, "Y", Some(row))?;
        }

        self.records.extend(pairs.iter().map(|&(x, y)| CoordinateRecord::new(Point::new(x, y))));
        debug!("Appended {} records, dataset now holds {}", pairs.len(), self.records.len());
        Ok(pairs.len())
    }

    /// Remove every record
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Remove the record at `index`, shifting later records down
    pub fn remove_at(&mut self, index: usize) -> CoordResult<CoordinateRecord> {
        if index >= self.records.len() {
            return Err(CoordError::IndexOutOfRange { index, len: self.records.len() });
        }
        Ok(self.records.remove(index))
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CoordinateRecord> {
        self.records.iter()
    }

    pub fn get(&self, index: usize) -> CoordResult<&CoordinateRecord> {
        self.records.get(index)
            .ok_or(CoordError::IndexOutOfRange { index, len: self.records.len() })
    }

    /// Source X and Y values as parallel arrays
    pub fn source_columns(&self) -> (Vec<f64>, Vec<f64>) {
        self.records.iter().map(|r| (r.x_source(), r.y_source())).unzip()
    }

    /// Current transform generation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Origin and destination the current targets were computed with
    pub fn transform_references(&self) -> Option<(SpatialReference, SpatialReference)> {
        self.references
    }

    /// Target coordinates of a record, if written by the current generation
    pub fn current_target(&self, record: &CoordinateRecord) -> Option<Point> {
        record.target_coordinates()
            .filter(|t| self.generation > 0 && t.generation == self.generation)
            .map(|t| t.point)
    }

    /// Write a new generation of target coordinates onto every record
    ///
    /// `source` and `target` are recorded with the generation so readers can
    /// tell which destination the targets are expressed in.
    pub fn apply_targets(
        &mut self,
        xs: &[f64],
        ys: &[f64],
        source: SpatialReference,
        target: SpatialReference,
    ) -> CoordResult<()> {
        if xs.len() != self.records.len() || ys.len() != self.records.len() {
            return Err(CoordError::GenericError(format!(
                "Expected {} transformed coordinates, got {} X and {} Y values",
                self.records.len(), xs.len(), ys.len()
            )));
        }

        self.generation += 1;
        self.references = Some((source, target));
        let generation = self.generation;
        for (record, (&x, &y)) in self.records.iter_mut().zip(xs.iter().zip(ys.iter())) {
            record.set_target(Point::new(x, y), generation);
        }
        Ok(())
    }

    /// Number of records carrying current target coordinates
    pub fn transformed_count(&self) -> usize {
        self.records.iter().filter(|r| self.current_target(r).is_some()).count()
    }

    /// Position of the first record without current target coordinates
    pub fn first_untransformed(&self) -> Option<usize> {
        self.records.iter().position(|r| self.current_target(r).is_none())
    }
}

impl<'a> IntoIterator for &'a CoordinateSet {
    type Item = &'a CoordinateRecord;
    type IntoIter = std::slice::Iter<'a, CoordinateRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_rejects_non_finite() {
        let mut set = CoordinateSet::new();
        assert!(matches!(set.append(f64::NAN, 1.0), Err(CoordError::Validation { .. })));
        assert!(matches!(set.append(1.0, f64::INFINITY), Err(CoordError::Validation { .. })));
        assert!(set.is_empty());
    }

    #[test]
    fn test_append_bulk_is_all_or_nothing() {
        let mut set = CoordinateSet::new();
        set.append(1.0, 2.0).unwrap();

        let result = set.append_bulk(&[(3.0, 4.0), (5.0, f64::NAN), (7.0, 8.0)]);
        match result {
            Err(CoordError::Validation { row, field, .. }) => {
                assert_eq!(row, Some(1));
                assert_eq!(field, "Y");
            },
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(set.len(), 1);

        assert_eq!(set.append_bulk(&[(3.0, 4.0), (5.0, 6.0)]).unwrap(), 2);
        let xs: Vec<f64> = set.iter().map(|r| r.x_source()).collect();
        assert_eq!(xs, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_remove_at_shifts_positions() {
        let mut set = CoordinateSet::new();
        set.append_bulk(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]).unwrap();

        let removed = set.remove_at(0).unwrap();
        assert_eq!(removed.x_source(), 1.0);
        assert_eq!(set.get(0).unwrap().x_source(), 2.0);

        assert!(matches!(set.remove_at(2), Err(CoordError::IndexOutOfRange { index: 2, len: 2 })));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_new_records_have_no_target_after_transform() {
        let mut set = CoordinateSet::new();
        set.append(1.0, 2.0).unwrap();
        set.apply_targets(&[10.0], &[20.0], SpatialReference::Wgs84, SpatialReference::ColombiaBogota).unwrap();
        set.append(3.0, 4.0).unwrap();

        assert_eq!(set.transformed_count(), 1);
        assert_eq!(set.first_untransformed(), Some(1));
        let first = set.get(0).unwrap();
        assert_eq!(set.current_target(first), Some(Point::new(10.0, 20.0)));
        assert_eq!(
            set.transform_references(),
            Some((SpatialReference::Wgs84, SpatialReference::ColombiaBogota))
        );
    }

    #[test]
    fn test_apply_targets_requires_matching_length() {
        let mut set = CoordinateSet::new();
        set.append(1.0, 2.0).unwrap();
        assert!(set.apply_targets(&[1.0, 2.0], &[1.0, 2.0], SpatialReference::Wgs84, SpatialReference::ColombiaBogota).is_err());
        assert_eq!(set.generation(), 0);
        assert_eq!(set.transform_references(), None);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let mut set = CoordinateSet::new();
        set.append_bulk(&[(1.0, 1.0), (2.0, 2.0)]).unwrap();
        assert_eq!(set.iter().count(), 2);
        assert_eq!((&set).into_iter().count(), 2);
    }
}
