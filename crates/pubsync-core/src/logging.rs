//! Logging setup for the importer binary

/// Padded label for a log level.
fn level_label(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARN ",
        log::Level::Info => "INFO ",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    }
}

/// Initialize the global logger.
///
/// Default level is info; `quiet` raises it to warn, `debug` lowers it to
/// debug. `RUST_LOG` still takes precedence over both.
pub fn init_logging(quiet: bool, debug: bool) {
    use std::io::Write;

    let default_level = if debug {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| writeln!(buf, "[{}] {}", level_label(record.level()), record.args()))
        .init();
}
