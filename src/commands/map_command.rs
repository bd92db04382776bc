//! Map page command

use std::path::PathBuf;
use clap::ArgMatches;

use super::column_arg;
use crate::api::CoordKit;
use crate::commands::command_traits::Command;
use crate::dataset::CoordinateColumn;
use crate::errors::{CoordError, CoordResult};

/// Command writing an HTML map of the source or transformed coordinates
pub struct MapCommand {
    session: CoordKit,
    output: PathBuf,
    column: CoordinateColumn,
}

impl MapCommand {
    pub fn new(args: &ArgMatches, session: CoordKit) -> CoordResult<Self> {
        let output = args.get_one::<String>("map")
            .map(PathBuf::from)
            .ok_or_else(|| CoordError::GenericError("Missing map output file".to_string()))?;
        let column = column_arg(args, "map-column")?.unwrap_or(CoordinateColumn::Source);

        Ok(MapCommand { session, output, column })
    }
}

impl Command for MapCommand {
    fn execute(&mut self) -> CoordResult<()> {
        if self.column == CoordinateColumn::Target {
            self.session.transform()?;
        }
        self.session.write_map(self.column, &self.output)?;
        println!("{}", self.output.display());
        Ok(())
    }
}
