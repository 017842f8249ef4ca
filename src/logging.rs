use std::io::Write;
use std::sync::{Arc, Mutex};

use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Environment variable overriding the log level (`error`, `warn`, `info`,
/// `debug`, `trace`, `off`).
pub const LOG_ENV: &str = "SHLINE_LOG";

/// Pick the log level: `SHLINE_LOG` if it parses, else `Warn` raised one
/// step per `-v`.
pub fn level_for(verbosity: u8, env_override: Option<&str>) -> LevelFilter {
    if let Some(level) = env_override.and_then(|v| v.parse().ok()) {
        return level;
    }
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install a stderr logger. Best-effort: a logger that is already set is
/// left in place.
pub fn init(verbosity: u8) {
    let env_level = std::env::var(LOG_ENV).ok();
    let level = level_for(verbosity, env_level.as_deref());
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Trace)
        .build();
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

/// A shared writer that receives each executed command line.
///
/// Clones write to the same underlying sink, so one log can be handed to
/// several builders derived from a common base.
#[derive(Clone)]
pub struct CommandLog {
    sink: Arc<Mutex<dyn Write + Send>>,
}

impl CommandLog {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            sink: Arc::new(Mutex::new(writer)),
        }
    }

    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }

    /// Write one record: `"{prefix} {command}"`, or just the command when
    /// the prefix is empty. Write failures are logged, never returned.
    pub fn record(&self, prefix: &str, command: &str) {
        let Ok(mut sink) = self.sink.lock() else {
            log::warn!("command log is poisoned; dropping record");
            return;
        };
        let result = if prefix.is_empty() {
            writeln!(sink, "{command}")
        } else {
            writeln!(sink, "{prefix} {command}")
        };
        if let Err(e) = result.and_then(|()| sink.flush()) {
            log::warn!("failed to write command log: {e}");
        }
    }
}

impl std::fmt::Debug for CommandLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CommandLog")
    }
}
