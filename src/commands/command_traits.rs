//! Command pattern interfaces
//!
//! This module defines the Command pattern interfaces used by the CLI,
//! keeping argument parsing apart from the dataset operations.

use crate::errors::CoordResult;

/// Represents an executable command in the application
pub trait Command {
    /// Execute the command
    ///
    /// # Returns
    /// Result indicating success or an error
    fn execute(&mut self) -> CoordResult<()>;
}

/// Factory for creating commands from CLI arguments
pub trait CommandFactory {
    /// Create a new Command instance based on CLI arguments
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    ///
    /// # Returns
    /// A command that implements the Command trait, or an error
    fn create_command(&self, args: &clap::ArgMatches) -> CoordResult<Box<dyn Command>>;
}
