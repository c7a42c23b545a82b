// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Tridial Firmware
//!
//! Firmware for a three-knob USB-MIDI control surface: three rotary quadrature
//! encoders are decoded by hardware timer counters and translated into USB-MIDI
//! Control Change messages, targeting an STM32F723 MCU.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`hw`] | MCU-level wrappers: encoder timers, tick timer, USB-MIDI class |
//! | [`control`] | Delta tracking, debounce windows, keep-alive pacing |
//! | [`midi`] | USB-MIDI event packet construction |
//! | [`transport`] | Single-in-flight report gate for the interrupt IN endpoint |
//!
//! ## Getting Started
//!
//! Build docs:
//!
//! ```bash
//! cargo doc --no-deps --open
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![no_std]

pub mod control;
pub mod hw;
pub mod midi;
pub mod transport;
