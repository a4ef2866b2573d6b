use std::io::stderr;

use derive_more::derive::{Display, Error, From};
use tracing::{level_filters::LevelFilter, subscriber::SetGlobalDefaultError};

#[derive(Debug, Display, Error, From)]
pub enum LoggingSetupError {
    #[display("Cannot parse log level")]
    InvalidLogLevel(tracing_subscriber::filter::LevelParseError),
    #[display("The global subscriber was already set")]
    AlreadySet(SetGlobalDefaultError),
}

/// Logs go to stderr, so they never mix with the shell output
pub(crate) fn setup_logging(
    LoggingConfig {
        pretty,
        level: level_filter,
    }: LoggingConfig,
) -> Result<(), LoggingSetupError> {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(stderr)
        .with_max_level(level_filter.parse::<LevelFilter>()?);
    if pretty {
        tracing::subscriber::set_global_default(subscriber.pretty().finish())
    } else {
        tracing::subscriber::set_global_default(subscriber.finish())
    }?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LoggingConfig {
    pub(crate) pretty: bool,
    pub(crate) level: String,
}
impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            level: LevelFilter::WARN.to_string(),
        }
    }
}
