//! Coordinate handling for geospatial data
//!
//! This module provides the curated spatial reference systems, their
//! definitions, and the engine that reprojects coordinates between them.

mod point;
mod crs;
pub mod catalog;
pub mod projection;
mod transform;

// Re-export key types
pub use self::point::Point;
pub use self::crs::{SpatialReference, SpatialReferenceFactory, ALLOWED_EPSG_CODES, EXPORT_EPSG_CODE};
pub use self::transform::ProjectionEngine;
