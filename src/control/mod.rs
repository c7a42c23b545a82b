// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

pub mod debounce;
pub mod keepalive;
pub mod tracker;

pub use debounce::Debounce;
pub use keepalive::KeepAlive;
pub use tracker::{Channel, DeltaTracker, Direction, EncoderEvent};
