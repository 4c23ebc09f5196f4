//! Command-line argument parsing and handling.

pub mod definition;
pub mod error;
pub mod run;
pub mod utils;

pub use definition::Args;
pub use error::CliError;
pub use run::run;
pub use utils::determine_log_level;
