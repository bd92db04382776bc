pub mod errors;
pub mod coordinate;
pub mod dataset;
pub mod io;
pub mod export;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::CoordKit;

pub use errors::{CoordError, CoordResult};
pub use coordinate::{Point, ProjectionEngine, SpatialReference, SpatialReferenceFactory};
pub use dataset::{CoordinateColumn, CoordinateSet, DatasetController, FormatPolicy, TabularData};
