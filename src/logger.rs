use log::SetLoggerError;

/// Attempt to init an env_logger for comet.
/// Does nothing if the "builtin_env_logger" feature is disabled.
#[cfg(feature = "builtin_env_logger")]
pub fn try_init() -> Result<(), SetLoggerError> {
    env_logger::try_init_from_env(
        // By default, use info level logging.
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    )
}

#[cfg(not(feature = "builtin_env_logger"))]
pub fn try_init() -> Result<(), SetLoggerError> {
    Ok(())
}
