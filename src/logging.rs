//! Kernel logging facility
//!
//! Routes the `log` crate facade to COM1 so the storage core can report
//! device faults and table recoveries while the VGA console belongs to the
//! shell. Levels follow the build configuration (debug/release).

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use spin::Mutex;

/// Global logger instance available throughout the kernel
pub static LOGGER: Logger = Logger::new();

/// Serial-backed logger; the lock keeps lines from interleaving
pub struct Logger {
    inner: Mutex<()>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    pub const fn new() -> Logger {
        Logger {
            inner: Mutex::new(()),
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    /// Formats messages as "[LEVEL] target: message"
    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _guard = self.inner.lock();
            crate::serial_println!(
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// Maximum level for the current build.
pub const fn default_level() -> LevelFilter {
    #[cfg(debug_assertions)]
    {
        LevelFilter::Debug
    }
    #[cfg(not(debug_assertions))]
    {
        LevelFilter::Info
    }
}

/// Installs the serial logger.
///
/// Must run once during boot, before the file store is brought up, so that
/// `filesys::init` can report a missing or unreadable file table.
///
/// # Errors
/// Returns `SetLoggerError` if another logger was already installed.
pub fn init() -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(default_level()))
}
