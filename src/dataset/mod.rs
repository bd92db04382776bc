//! Coordinate dataset management
//!
//! Holds the ordered records of a session and the operations that add,
//! transform, format, remove and export them.

mod record;
mod set;
pub mod format;
pub mod import;
mod controller;

pub use self::record::{CoordinateRecord, TargetCoordinates};
pub use self::set::CoordinateSet;
pub use self::format::FormatPolicy;
pub use self::import::{Cell, TabularData};
pub use self::controller::{CoordinateColumn, DatasetController, DisplayRow, ExportBatch, MapMarker, MapView};
