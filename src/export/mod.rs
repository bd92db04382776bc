//! Output collaborators
//!
//! Turn prepared dataset output into files: shapefiles for georeferenced
//! export and HTML pages for map viewing.

pub mod shapefile;
pub mod map_page;

pub use shapefile::{ShapefileFiles, ShapefileWriter};
pub use map_page::{geographic_view, render_html};
