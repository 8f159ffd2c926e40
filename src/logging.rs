use env_logger::{Builder, Env};

/// Environment variable holding the log filter (`error`, `warn`, `info`, `debug`, ...).
pub const LOG_ENV: &str = "CHESS_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Installs the global logger. Safe to call more than once; later calls are ignored.
pub fn init() {
    let _ = Builder::from_env(Env::new().filter_or(LOG_ENV, DEFAULT_FILTER))
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
