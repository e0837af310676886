//! Logger backing the `log` crate while the loader runs.
//!
//! Records go to a byte sink provided by the firmware (a serial port or the ROM
//! console). Nothing is logged once control has passed to the loaded program.

use core::fmt::Write;

/// A `log::Log` implementation writing to a firmware byte sink.
pub struct RomLogger {
    sink: fn(&[u8]),
}

/// Adapts the sink to `core::fmt::Write`.
struct SinkWriter(fn(&[u8]));

impl Write for SinkWriter {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        (self.0)(s.as_bytes());
        Ok(())
    }
}

impl RomLogger {
    #[must_use]
    #[inline]
    pub const fn new(sink: fn(&[u8])) -> Self {
        Self { sink }
    }

    /// Most verbose level this build logs.
    #[must_use]
    #[inline]
    pub const fn max_level() -> log::LevelFilter {
        if cfg!(debug_assertions) {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Info
        }
    }
}

impl log::Log for RomLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= Self::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut writer = SinkWriter(self.sink);
        // The sink cannot fail.
        let _ = if cfg!(debug_assertions) {
            writeln!(
                writer,
                "[{:5}] {}:{}: {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        } else {
            writeln!(writer, "[{:5}] {}", record.level(), record.args())
        };
    }

    fn flush(&self) {}
}

/// Installs `logger` as the global logger.
///
/// ## Errors
///
/// Fails if a logger was already installed.
pub fn init(logger: &'static RomLogger) -> Result<(), log::SetLoggerError> {
    log::set_logger(logger)?;
    log::set_max_level(RomLogger::max_level());
    Ok(())
}
