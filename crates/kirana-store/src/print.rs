//! # Print Handoff
//!
//! Delivers a rendered [`Receipt`] to whatever can print it.
//!
//! ## Print Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Printing a Bill                                      │
//! │                                                                         │
//! │  store.add_sale(lines) ──► Sale                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Receipt::render_in(&sale, &settings, offset)  (kirana-core, pure)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  printer.print(&receipt)                                               │
//! │       ├── wait print_delay (250 ms)   surface finishes laying out      │
//! │       └── surface.print(&receipt)                                      │
//! │              ├── Ok  ──► debug!                                        │
//! │              └── Err ──► warn!, no-op (the sale is already saved)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use kirana_core::Receipt;
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::error::PrintError;

/// Delay before handing a receipt to the surface.
pub const DEFAULT_PRINT_DELAY: Duration = Duration::from_millis(250);

/// Something that can print a receipt.
pub trait PrintSurface {
    fn print(&mut self, receipt: &Receipt) -> Result<(), PrintError>;
}

/// Delayed, failure-tolerant dispatch to a [`PrintSurface`].
#[derive(Debug)]
pub struct Printer<P> {
    surface: P,
    delay: Duration,
}

impl<P: PrintSurface> Printer<P> {
    pub fn new(surface: P) -> Self {
        Printer {
            surface,
            delay: DEFAULT_PRINT_DELAY,
        }
    }

    pub fn from_config(surface: P, config: &StoreConfig) -> Self {
        Printer::new(surface).with_delay(config.print_delay)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Prints after the configured delay. Returns whether the surface
    /// accepted the receipt; a failure is logged and otherwise ignored.
    pub fn print(&mut self, receipt: &Receipt) -> bool {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        match self.surface.print(receipt) {
            Ok(()) => {
                debug!(total = %receipt.total, lines = receipt.lines.len(), "Receipt printed");
                true
            }
            Err(e) => {
                warn!(error = %e, "Print surface failed, skipping receipt");
                false
            }
        }
    }

    pub fn surface(&self) -> &P {
        &self.surface
    }
}

// =============================================================================
// Text Spool Surface
// =============================================================================

/// Writes the plain-text receipt into a spool directory, one file per bill.
///
/// File names are `receipt-<YYYYMMDD-HHMMSS>-<n>.txt`.
#[derive(Debug, Clone)]
pub struct TextFileSurface {
    spool_dir: PathBuf,
    width: usize,
    printed: usize,
}

impl TextFileSurface {
    pub fn new(spool_dir: impl Into<PathBuf>, width: usize) -> Self {
        TextFileSurface {
            spool_dir: spool_dir.into(),
            width,
            printed: 0,
        }
    }

    /// Number of receipts spooled so far.
    pub fn printed(&self) -> usize {
        self.printed
    }
}

impl PrintSurface for TextFileSurface {
    fn print(&mut self, receipt: &Receipt) -> Result<(), PrintError> {
        fs::create_dir_all(&self.spool_dir)?;
        let name = format!(
            "receipt-{}-{}.txt",
            receipt.date.format("%Y%m%d-%H%M%S"),
            self.printed + 1
        );
        fs::write(self.spool_dir.join(name), receipt.to_text(self.width))?;
        self.printed += 1;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use kirana_core::{Money, PrintLang};

    struct BrokenSurface;

    impl PrintSurface for BrokenSurface {
        fn print(&mut self, _: &Receipt) -> Result<(), PrintError> {
            Err(PrintError::Unavailable("popup blocked".to_string()))
        }
    }

    fn receipt() -> Receipt {
        Receipt {
            title: "Bill - My Kirana Store".to_string(),
            header: "My Kirana Store".to_string(),
            phone: None,
            date: Utc.with_ymd_and_hms(2024, 3, 5, 9, 7, 0).unwrap().into(),
            lines: Vec::new(),
            total: Money::from_paise(14800),
            footer: "Thank you! Visit again".to_string(),
            lang: PrintLang::En,
        }
    }

    #[test]
    fn test_failure_is_a_no_op() {
        let mut printer = Printer::new(BrokenSurface).with_delay(Duration::ZERO);
        assert!(!printer.print(&receipt()));
    }

    #[test]
    fn test_text_surface_spools_files() {
        let dir = tempfile::tempdir().unwrap();
        let spool = dir.path().join("spool");
        let mut printer =
            Printer::new(TextFileSurface::new(&spool, 32)).with_delay(Duration::ZERO);

        assert!(printer.print(&receipt()));
        assert!(printer.print(&receipt()));
        assert_eq!(printer.surface().printed(), 2);

        let body = fs::read_to_string(spool.join("receipt-20240305-090700-1.txt")).unwrap();
        assert!(body.contains("₹148.00"));
    }

    #[test]
    fn test_delay_comes_from_config() {
        let config = StoreConfig::new("x").print_delay(Duration::from_millis(5));
        let printer = Printer::from_config(BrokenSurface, &config);
        assert_eq!(printer.delay, Duration::from_millis(5));
    }
}
