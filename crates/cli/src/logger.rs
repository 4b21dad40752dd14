//! Stderr logger for the orbit CLI.
//!
//! Each line carries a timestamp, the level and the module that logged it.

use anyhow::{anyhow, Result};
use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use std::io::{self, Write};

pub struct OrbitLogger {
    level: LevelFilter,
}

impl OrbitLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    /// Installs the logger globally. Fails if a logger is already set.
    pub fn init(level: LevelFilter) -> Result<()> {
        log::set_boxed_logger(Box::new(Self::new(level)))
            .map(|()| log::set_max_level(level))
            .map_err(|e| anyhow!("Failed to set logger: {}", e))?;

        log::debug!("Orbit logger initialized at level {}", level);
        Ok(())
    }

    fn format(record: &Record) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        format!(
            "{} {} [{}] {}",
            timestamp,
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for OrbitLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // A broken stderr is not worth crashing the simulation over
            let _ = writeln!(io::stderr().lock(), "{}", Self::format(record));
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}
