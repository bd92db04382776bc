use std::fs;
use std::path::Path;
use log::info;

use crate::coordinate::{ProjectionEngine, SpatialReference};
use crate::dataset::{CoordinateColumn, DatasetController, DisplayRow};
use crate::errors::CoordResult;
use crate::export::{self, ShapefileFiles, ShapefileWriter};
use crate::io;
use crate::utils::logger::Logger;

/// Default base name of exported shapefiles
pub const EXPORT_BASE_NAME: &str = "coordenadas";

/// Main interface to the CoordKit library
///
/// Holds one session: the dataset plus the currently selected origin and
/// destination reference systems.
pub struct CoordKit {
    logger: Logger,
    controller: DatasetController,
    engine: ProjectionEngine,
    source: SpatialReference,
    target: SpatialReference,
}

impl CoordKit {
    /// Create a new CoordKit session
    ///
    /// # Arguments
    /// * `log_file` - Optional path to a log file receiving the dataset table
    /// * `source` - Origin reference system
    /// * `target` - Destination reference system
    pub fn new(log_file: Option<&str>, source: SpatialReference, target: SpatialReference) -> CoordResult<Self> {
        let logger = match log_file {
            Some(path) => Logger::new(path)?,
            None => Logger::disabled(),
        };

        Ok(CoordKit {
            logger,
            controller: DatasetController::new(),
            engine: ProjectionEngine::new(),
            source,
            target,
        })
    }

    pub fn controller(&self) -> &DatasetController {
        &self.controller
    }

    pub fn source(&self) -> SpatialReference {
        self.source
    }

    pub fn target(&self) -> SpatialReference {
        self.target
    }

    /// Change the origin and destination systems
    ///
    /// Targets from an earlier transform stay tied to the destination they
    /// were computed for; reading them under another destination fails until
    /// `transform` runs again.
    pub fn set_references(&mut self, source: SpatialReference, target: SpatialReference) {
        info!("Reference systems set to {} -> {}", source, target);
        self.source = source;
        self.target = target;
    }

    /// Import a delimited text file, appending to the current records
    ///
    /// # Returns
    /// Number of rows added
    pub fn load_file(&mut self, path: &str) -> CoordResult<usize> {
        let table = io::read_table(path)?;
        self.controller.import_rows(&table)
    }

    /// Add a point written as "x,y"
    pub fn add_point(&mut self, text: &str) -> CoordResult<()> {
        match text.split_once(',') {
            Some((x, y)) => self.controller.add_manual_text(x, y),
            None => self.controller.add_manual_text(text, ""),
        }
    }

    /// Transform every record with the selected systems
    pub fn transform(&mut self) -> CoordResult<()> {
        self.controller.transform_all(self.source, self.target)?;
        self.logger.log_rows(&self.rows())?;
        Ok(())
    }

    /// Current table rows
    pub fn rows(&self) -> Vec<DisplayRow> {
        self.controller.display_rows(self.source, self.target)
    }

    /// Clipboard text for a whole column
    pub fn copy_text(&self, which: CoordinateColumn) -> CoordResult<String> {
        self.controller.rows_as_text(which, self.source, self.target)
    }

    /// Clipboard text for one row
    pub fn copy_row(&self, index: usize, which: CoordinateColumn) -> CoordResult<String> {
        self.controller.row_as_text(index, which, self.source, self.target)
    }

    /// Export transformed points as a shapefile in EPSG:9377
    ///
    /// # Arguments
    /// * `directory` - Directory receiving the `.shp`, `.shx`, `.dbf`, `.prj` and `.cpg` files
    pub fn export_shapefile(&self, directory: &Path) -> CoordResult<ShapefileFiles> {
        let batch = self.controller.export_points_default(self.target)?;
        let files = ShapefileWriter::write(&batch, directory, EXPORT_BASE_NAME)?;
        self.logger.log(&format!("Exported {} points to {}", batch.points.len(), files.shp.display()))?;
        Ok(files)
    }

    /// Render the selected column as an HTML map page
    pub fn map_html(&self, which: CoordinateColumn) -> CoordResult<String> {
        let view = self.controller.map_points(which, self.source, self.target)?;
        let view = export::geographic_view(&view, &self.engine)?;
        let title = format!("Coordenadas {} ({})", which, match which {
            CoordinateColumn::Source => self.source,
            CoordinateColumn::Target => self.target,
        });
        Ok(export::render_html(&view, &title))
    }

    /// Write the map page for the selected column to `output_path`
    pub fn write_map(&self, which: CoordinateColumn, output_path: &Path) -> CoordResult<()> {
        let html = self.map_html(which)?;
        fs::write(output_path, html)?;
        info!("Saved map to {}", output_path.display());
        Ok(())
    }
}
