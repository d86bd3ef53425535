mod args;
mod error;
mod logger;

pub use args::CliArgs;
pub use error::{InsightError, ValidationError};
pub use logger::setup_logging;
