//! Shapefile export command

use std::path::PathBuf;
use clap::ArgMatches;
use log::info;

use crate::api::CoordKit;
use crate::commands::command_traits::Command;
use crate::errors::{CoordError, CoordResult};

/// Command exporting transformed coordinates as an EPSG:9377 shapefile
pub struct ExportCommand {
    session: CoordKit,
    /// Directory receiving the shapefile parts
    directory: PathBuf,
}

impl ExportCommand {
    pub fn new(args: &ArgMatches, session: CoordKit) -> CoordResult<Self> {
        let directory = args.get_one::<String>("export")
            .map(PathBuf::from)
            .ok_or_else(|| CoordError::GenericError("Missing export directory".to_string()))?;

        Ok(ExportCommand { session, directory })
    }
}

impl Command for ExportCommand {
    fn execute(&mut self) -> CoordResult<()> {
        self.session.transform()?;
        let files = self.session.export_shapefile(&self.directory)?;

        for path in files.all() {
            println!("{}", path.display());
        }
        info!("Shapefile exported in EPSG:9377");
        Ok(())
    }
}
