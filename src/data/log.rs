use log::{LevelFilter, SetLoggerError};

/// Logs to stderr at `info`, or `warn` when quiet. `RUST_LOG`
/// takes precedence over both.
pub fn init(quiet: bool) -> Result<(), SetLoggerError> {
    let level = if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_env("RUST_LOG")
        .try_init()
}
