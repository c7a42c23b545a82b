// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Active Sensing pacing.
//!
//! A free-running pass counter stands in for a clock: every loop iteration
//! bumps it, and when it saturates the 16-bit range one keep-alive is due,
//! after which the counter wraps and the cycle repeats. The resulting period
//! is proportional to loop iteration time rather than wall-clock time; good
//! enough to tell the host the device is alive.

pub struct KeepAlive {
    passes: u16,
}

impl KeepAlive {
    pub const fn new() -> Self {
        Self { passes: 0 }
    }

    /// Count one loop pass. Returns `true` exactly once per 65536 passes,
    /// when the counter reaches its maximum.
    pub fn tick(&mut self) -> bool {
        self.passes = self.passes.wrapping_add(1);
        self.passes == u16::MAX
    }
}

impl Default for KeepAlive {
    fn default() -> Self {
        Self::new()
    }
}
