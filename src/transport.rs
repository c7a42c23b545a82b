// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Single-in-flight flow control for the report endpoint.
//!
//! The interrupt IN endpoint holds one report at a time. [`ReportGate`] tracks
//! whether a transfer is pending: a send request while one is in flight is
//! silently dropped rather than queued — the next poll cycle re-observes
//! current encoder state, so the newest state always supersedes a missed tick.
//!
//! The gate's flag is the only state shared between the USB interrupt context
//! (which reports transmit completion) and the main loop, so every access
//! goes through an atomic.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::midi::MidiReport;

/// The hardware side of a report send: hand 4 bytes to the endpoint.
pub trait ReportTx {
    fn transmit(&self, report: &[u8]) -> usb_device::Result<usize>;
}

/// At-most-one-report-in-flight gate.
pub struct ReportGate {
    in_flight: AtomicBool,
}

impl ReportGate {
    pub const fn new() -> Self {
        Self {
            in_flight: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Try to put `report` on the wire.
    ///
    /// Returns `true` when the transfer was issued. `false` means the report
    /// was dropped — device not configured, a previous report still in
    /// flight, or the endpoint refused the write. Dropping is not an error;
    /// nothing is retried or queued.
    pub fn send<T: ReportTx>(&self, configured: bool, tx: &T, report: &MidiReport) -> bool {
        if !configured {
            return false;
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }
        match tx.transmit(report.as_bytes()) {
            Ok(_) => true,
            Err(_) => {
                // The transfer was never issued, so no completion will come
                // to clear the gate.
                self.in_flight.store(false, Ordering::Release);
                false
            }
        }
    }

    /// Transmit-complete notification: the endpoint is idle again.
    ///
    /// Called from the USB interrupt path on completion and on bus reset.
    pub fn complete(&self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

impl Default for ReportGate {
    fn default() -> Self {
        Self::new()
    }
}
