//! # Store Configuration
//!
//! Where the slot files live and how the print handoff behaves.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Explicit builder calls
//! 2. Environment variables (`KIRANA_*`, via [`StoreConfig::from_env`])
//! 3. Defaults (this file)
//!
//! ## Default Data Directory
//! - **macOS**: `~/Library/Application Support/in.kirana.pos/`
//! - **Windows**: `%APPDATA%\kirana\pos\data\`
//! - **Linux**: `~/.local/share/pos/`
//!
//! Falls back to `./kirana-data` when the platform directory is unknown.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{FixedOffset, Local, Offset};
use tracing::warn;

use crate::print::DEFAULT_PRINT_DELAY;

/// Common thermal roll width in characters (58 mm paper).
pub const DEFAULT_PAPER_WIDTH: usize = 32;

/// Runtime configuration for the store crate.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use kirana_store::StoreConfig;
///
/// let config = StoreConfig::new("./data")
///     .print_delay(Duration::ZERO)
///     .paper_width(42);
/// assert_eq!(config.paper_width, 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding one JSON file per slot.
    pub data_dir: PathBuf,

    /// Delay between a print request and the surface call.
    /// Default: 250 ms
    pub print_delay: Duration,

    /// Characters per line for the text receipt.
    /// Default: 32
    pub paper_width: usize,

    /// Offset used for the date printed on receipts.
    /// Default: the machine's local offset
    pub utc_offset: FixedOffset,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new(default_data_dir())
    }
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
            print_delay: DEFAULT_PRINT_DELAY,
            paper_width: DEFAULT_PAPER_WIDTH,
            utc_offset: Local::now().offset().fix(),
        }
    }

    /// Sets the print delay.
    pub fn print_delay(mut self, delay: Duration) -> Self {
        self.print_delay = delay;
        self
    }

    /// Sets the text receipt width.
    pub fn paper_width(mut self, width: usize) -> Self {
        self.paper_width = width;
        self
    }

    /// Sets the receipt clock offset.
    pub fn utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    /// Defaults overridden by the environment.
    ///
    /// ## Environment Variables
    /// - `KIRANA_DATA_DIR`: slot file directory
    /// - `KIRANA_PRINT_DELAY_MS`: print delay in milliseconds
    /// - `KIRANA_PAPER_WIDTH`: text receipt width
    /// - `KIRANA_UTC_OFFSET_MINUTES`: receipt clock offset (`330` for IST)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = match lookup("KIRANA_DATA_DIR") {
            Some(dir) if !dir.trim().is_empty() => StoreConfig::new(dir),
            _ => StoreConfig::default(),
        };

        if let Some(raw) = lookup("KIRANA_PRINT_DELAY_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.print_delay = Duration::from_millis(ms),
                Err(_) => warn!(value = %raw, "Ignoring invalid KIRANA_PRINT_DELAY_MS"),
            }
        }

        if let Some(raw) = lookup("KIRANA_PAPER_WIDTH") {
            match raw.trim().parse::<usize>() {
                Ok(width) if width > 0 => config.paper_width = width,
                _ => warn!(value = %raw, "Ignoring invalid KIRANA_PAPER_WIDTH"),
            }
        }

        if let Some(raw) = lookup("KIRANA_UTC_OFFSET_MINUTES") {
            match raw
                .trim()
                .parse::<i32>()
                .ok()
                .and_then(|minutes| minutes.checked_mul(60))
                .and_then(FixedOffset::east_opt)
            {
                Some(offset) => config.utc_offset = offset,
                None => warn!(value = %raw, "Ignoring invalid KIRANA_UTC_OFFSET_MINUTES"),
            }
        }

        config
    }
}

/// Platform-specific application data directory.
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("in", "kirana", "pos")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./kirana-data"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::new("/tmp/kirana")
            .print_delay(Duration::from_millis(10))
            .paper_width(48)
            .utc_offset(FixedOffset::east_opt(19800).unwrap());

        assert_eq!(config.data_dir, PathBuf::from("/tmp/kirana"));
        assert_eq!(config.print_delay, Duration::from_millis(10));
        assert_eq!(config.paper_width, 48);
        assert_eq!(config.utc_offset.local_minus_utc(), 19800);
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::new("x");
        assert_eq!(config.print_delay, Duration::from_millis(250));
        assert_eq!(config.paper_width, DEFAULT_PAPER_WIDTH);
    }

    #[test]
    fn test_env_overrides() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("KIRANA_DATA_DIR", "/srv/kirana"),
            ("KIRANA_PRINT_DELAY_MS", "0"),
            ("KIRANA_PAPER_WIDTH", "42"),
            ("KIRANA_UTC_OFFSET_MINUTES", "330"),
        ]));

        assert_eq!(config.data_dir, PathBuf::from("/srv/kirana"));
        assert_eq!(config.print_delay, Duration::ZERO);
        assert_eq!(config.paper_width, 42);
        assert_eq!(config.utc_offset.local_minus_utc(), 330 * 60);
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("KIRANA_DATA_DIR", "/srv/kirana"),
            ("KIRANA_PRINT_DELAY_MS", "soon"),
            ("KIRANA_PAPER_WIDTH", "0"),
            ("KIRANA_UTC_OFFSET_MINUTES", "99999"),
        ]));

        assert_eq!(config.print_delay, DEFAULT_PRINT_DELAY);
        assert_eq!(config.paper_width, DEFAULT_PAPER_WIDTH);
        assert_eq!(config.utc_offset, StoreConfig::new("/srv/kirana").utc_offset);
    }
}
