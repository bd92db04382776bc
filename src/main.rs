use clap::{Arg, Command as ClapCommand, ArgAction};
use std::process;
use log::error;

use coordkit::utils::logger::Logger;
use coordkit::commands::{CommandFactory, CoordkitCommandFactory};

fn main() {
    let matches = ClapCommand::new("CoordKit")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Maurice Schilpp")
        .about("Transform coordinates between EPSG reference systems")
        .arg(
            Arg::new("input")
                .help("CSV/TXT or spreadsheet file with X,Y or Longitud,Latitud columns")
                .required(false)
                .index(1),
        )
        .arg(
            Arg::new("point")
                .short('p')
                .long("point")
                .help("Coordinate to add in 'x,y' format (repeatable)")
                .value_name("X,Y")
                .action(ArgAction::Append)
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::new("from")
                .long("from")
                .help("Origin EPSG code (4326, 3116, 3115, 9377, 4996)")
                .value_name("CODE")
                .default_value("4326"),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .help("Destination EPSG code (4326, 3116, 3115, 9377, 4996)")
                .value_name("CODE")
                .default_value("3116"),
        )
        .arg(
            Arg::new("copy")
                .long("copy")
                .help("Print 'x,y' lines of a column (source or target)")
                .value_name("COLUMN")
                .required(false),
        )
        .arg(
            Arg::new("row")
                .long("row")
                .help("Restrict --copy to one row (1-based)")
                .value_name("N")
                .requires("copy")
                .required(false),
        )
        .arg(
            Arg::new("export")
                .long("export")
                .help("Export transformed coordinates as an EPSG:9377 shapefile into this directory")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("map")
                .long("map")
                .help("Write an HTML map page to this file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("map-column")
                .long("map-column")
                .help("Column shown on the map (source or target)")
                .value_name("COLUMN")
                .default_value("source"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write the session table to this log file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("debug-log")
                .long("debug-log")
                .help("Send diagnostic messages to this file instead of the console")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    match matches.get_one::<String>("debug-log") {
        Some(path) => {
            if let Err(e) = Logger::init_global_logger(path) {
                eprintln!("Error setting up global logger: {}", e);
                process::exit(1);
            }
        },
        None => Logger::init_console_logger(matches.get_flag("verbose")),
    }

    let factory = CoordkitCommandFactory::new();

    match factory.create_command(&matches) {
        Ok(mut command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
