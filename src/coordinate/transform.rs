//! Coordinate transformation between reference systems

use log::{debug, info};

use super::catalog;
use super::crs::SpatialReference;
use super::point::Point;
use super::projection::Projector;
use crate::errors::{CoordError, CoordResult};

/// Stateless engine reprojecting coordinate arrays between EPSG systems
///
/// All curated systems share a WGS84-compatible datum, so every
/// transformation goes through geodetic longitude/latitude: inverse of the
/// source projection followed by the forward target projection.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProjectionEngine;

impl ProjectionEngine {
    pub fn new() -> Self {
        ProjectionEngine
    }

    /// Reproject parallel X and Y arrays
    ///
    /// The output has the same length and order as the input. The first point
    /// that cannot be transformed fails the whole call.
    ///
    /// # Arguments
    /// * `xs` - X values (longitude or easting)
    /// * `ys` - Y values (latitude or northing)
    /// * `source` - Reference system of the input
    /// * `target` - Reference system of the output
    pub fn transform(
        &self,
        xs: &[f64],
        ys: &[f64],
        source: SpatialReference,
        target: SpatialReference,
    ) -> CoordResult<(Vec<f64>, Vec<f64>)> {
        if xs.len() != ys.len() {
            return Err(CoordError::GenericError(format!(
                "Coordinate arrays differ in length: {} X values, {} Y values",
                xs.len(), ys.len()
            )));
        }

        let from = Projector::from_definition(catalog::lookup(source)?);
        let to = Projector::from_definition(catalog::lookup(target)?);

        info!("Transforming {} points from {} to {}", xs.len(), source, target);

        let mut out_x = Vec::with_capacity(xs.len());
        let mut out_y = Vec::with_capacity(ys.len());

        for (index, (&x, &y)) in xs.iter().zip(ys.iter()).enumerate() {
            let fail = |reason: String| CoordError::Transform { index, x, y, reason };

            if !x.is_finite() || !y.is_finite() {
                return Err(fail("coordinate is not a finite number".to_string()));
            }

            let (tx, ty) = if source == target {
                (x, y)
            } else {
                let (lon, lat) = from.to_geodetic(x, y).map_err(fail)?;
                to.from_geodetic(lon, lat).map_err(fail)?
            };

            debug!("Transformed ({}, {}) {} to ({}, {}) {}", x, y, source, tx, ty, target);
            out_x.push(tx);
            out_y.push(ty);
        }

        Ok((out_x, out_y))
    }

    /// Transform a single point between reference systems
    pub fn transform_point(&self, point: &Point, from: SpatialReference, to: SpatialReference) -> CoordResult<Point> {
        let (xs, ys) = self.transform(&[point.x], &[point.y], from, to)?;
        Ok(Point::new(xs[0], ys[0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bogota_point_to_bogota_zone() {
        let engine = ProjectionEngine::new();
        let p = engine.transform_point(
            &Point::new(-74.08, 4.60),
            SpatialReference::Wgs84,
            SpatialReference::ColombiaBogota,
        ).unwrap();

        // A few hundred meters west and north of the false origin
        assert!(p.x > 999_700.0 && p.x < 999_750.0, "x = {}", p.x);
        assert!(p.y > 1_000_400.0 && p.y < 1_000_440.0, "y = {}", p.y);
    }

    #[test]
    fn test_axis_order_is_easting_first() {
        let engine = ProjectionEngine::new();
        let east = engine.transform_point(&Point::new(-74.0, 4.6), SpatialReference::Wgs84, SpatialReference::ColombiaBogota).unwrap();
        let west = engine.transform_point(&Point::new(-74.2, 4.6), SpatialReference::Wgs84, SpatialReference::ColombiaBogota).unwrap();
        assert!(east.x > west.x);
        assert!((east.y - west.y).abs() < 100.0);
    }

    #[test]
    fn test_projected_to_projected_round_trip() {
        let engine = ProjectionEngine::new();
        let xs = [999_723.5, 1_050_000.0, 870_000.0];
        let ys = [1_000_420.2, 1_200_000.0, 950_000.0];

        let (nx, ny) = engine.transform(&xs, &ys, SpatialReference::ColombiaBogota, SpatialReference::OrigenNacional).unwrap();
        let (bx, by) = engine.transform(&nx, &ny, SpatialReference::OrigenNacional, SpatialReference::ColombiaBogota).unwrap();

        for i in 0..xs.len() {
            assert!((xs[i] - bx[i]).abs() < 1e-3);
            assert!((ys[i] - by[i]).abs() < 1e-3);
        }
    }

    #[test]
    fn test_geographic_systems_pass_through() {
        let engine = ProjectionEngine::new();
        let p = engine.transform_point(&Point::new(-74.08, 4.6), SpatialReference::Wgs84, SpatialReference::Geographic4996).unwrap();
        assert_eq!(p, Point::new(-74.08, 4.6));
    }

    #[test]
    fn test_unsupported_reference() {
        let engine = ProjectionEngine::new();
        let result = engine.transform(&[1.0], &[2.0], SpatialReference::Other(3857), SpatialReference::Wgs84);
        assert!(matches!(result, Err(CoordError::UnsupportedReference(3857))));
    }

    #[test]
    fn test_out_of_domain_point_fails_whole_call() {
        let engine = ProjectionEngine::new();
        let result = engine.transform(
            &[-74.0, 120.0],
            &[4.6, 4.6],
            SpatialReference::Wgs84,
            SpatialReference::ColombiaBogota,
        );
        match result {
            Err(CoordError::Transform { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected transform error, got {:?}", other),
        }
    }

    #[test]
    fn test_length_mismatch() {
        let engine = ProjectionEngine::new();
        assert!(engine.transform(&[1.0, 2.0], &[1.0], SpatialReference::Wgs84, SpatialReference::Wgs84).is_err());
    }

    #[test]
    fn test_empty_input() {
        let engine = ProjectionEngine::new();
        let (xs, ys) = engine.transform(&[], &[], SpatialReference::Wgs84, SpatialReference::OrigenNacional).unwrap();
        assert!(xs.is_empty() && ys.is_empty());
    }
}
