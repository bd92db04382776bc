//! CLI command implementations
//!
//! This module contains the commands supported by the CLI application,
//! built on the Command pattern.

pub mod command_traits;
pub mod table_command;
pub mod export_command;
pub mod map_command;

pub use command_traits::{Command, CommandFactory};
pub use table_command::TableCommand;
pub use export_command::ExportCommand;
pub use map_command::MapCommand;

use clap::ArgMatches;
use log::info;

use crate::api::CoordKit;
use crate::coordinate::SpatialReferenceFactory;
use crate::dataset::CoordinateColumn;
use crate::errors::{CoordError, CoordResult};

/// Factory for creating command instances based on CLI arguments
pub struct CoordkitCommandFactory;

impl CoordkitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        CoordkitCommandFactory
    }
}

impl Default for CoordkitCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandFactory for CoordkitCommandFactory {
    fn create_command(&self, args: &ArgMatches) -> CoordResult<Box<dyn Command>> {
        let session = build_session(args)?;

        if args.get_one::<String>("export").is_some() {
            Ok(Box::new(ExportCommand::new(args, session)?))
        } else if args.get_one::<String>("map").is_some() {
            Ok(Box::new(MapCommand::new(args, session)?))
        } else {
            Ok(Box::new(TableCommand::new(args, session)?))
        }
    }
}

/// Build a session from the reference, input and point arguments
fn build_session(args: &ArgMatches) -> CoordResult<CoordKit> {
    let source = SpatialReferenceFactory::from_allowed_string(
        args.get_one::<String>("from").map(String::as_str).unwrap_or("4326"))?;
    let target = SpatialReferenceFactory::from_allowed_string(
        args.get_one::<String>("to").map(String::as_str).unwrap_or("3116"))?;
    let log_file = args.get_one::<String>("log-file").map(String::as_str);

    let mut session = CoordKit::new(log_file, source, target)?;

    if let Some(input) = args.get_one::<String>("input") {
        let added = session.load_file(input)?;
        info!("Loaded {} coordinates from {}", added, input);
    }

    if let Some(points) = args.get_many::<String>("point") {
        for point in points {
            session.add_point(point)?;
        }
    }

    if session.controller().dataset().is_empty() {
        return Err(CoordError::EmptyDataset);
    }

    info!("Session ready with {} coordinates, {} -> {}",
          session.controller().dataset().len(), source, target);
    Ok(session)
}

/// Parse an optional column argument
fn column_arg(args: &ArgMatches, name: &str) -> CoordResult<Option<CoordinateColumn>> {
    args.get_one::<String>(name)
        .map(|value| value.parse::<CoordinateColumn>())
        .transpose()
}
