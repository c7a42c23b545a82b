// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USB-MIDI event packet construction.
//!
//! Every message this device emits fits a single 4-byte USB-MIDI event
//! packet: `[code index, status, data1, data2]`. The code index nibble tells
//! the class driver what the payload is; the remaining three bytes are the
//! plain MIDI message. All constructors here are pure byte transforms.

use crate::control::tracker::{Direction, EncoderEvent};

// USB-MIDI code index numbers (USB MIDI 1.0, table 4-1).
pub const CIN_NOTE_OFF: u8 = 0x08;
pub const CIN_NOTE_ON: u8 = 0x09;
pub const CIN_CONTROL_CHANGE: u8 = 0x0B;
pub const CIN_SINGLE_BYTE: u8 = 0x0F;

// MIDI status bytes.
pub const STATUS_NOTE_OFF: u8 = 0x80;
pub const STATUS_NOTE_ON: u8 = 0x90;
pub const STATUS_CONTROL_CHANGE: u8 = 0xB0;
pub const STATUS_ACTIVE_SENSING: u8 = 0xFE;

/// Control Change value sent for one decrement step.
pub const CC_STEP_DOWN: u8 = 1;
/// Control Change value sent for one increment step.
pub const CC_STEP_UP: u8 = 2;

/// Note-on velocity for trigger messages.
const NOTE_ON_VELOCITY: u8 = 0x7F;

/// A fixed 4-byte USB-MIDI event packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiReport([u8; 4]);

impl MidiReport {
    /// Control Change: `controller` set to `value` on the given MIDI channel.
    pub fn control_change(channel: u8, controller: u8, value: u8) -> Self {
        Self([
            CIN_CONTROL_CHANGE,
            STATUS_CONTROL_CHANGE | (channel & 0x0F),
            controller & 0x7F,
            value & 0x7F,
        ])
    }

    /// Note On, channel 0, fixed velocity.
    pub fn note_on(note: u8) -> Self {
        Self([CIN_NOTE_ON, STATUS_NOTE_ON, note & 0x7F, NOTE_ON_VELOCITY])
    }

    /// Note Off, channel 0.
    pub fn note_off(note: u8) -> Self {
        Self([CIN_NOTE_OFF, STATUS_NOTE_OFF, note & 0x7F, 0x00])
    }

    /// Active Sensing keep-alive. Status-only, framed with the single-byte
    /// code index.
    pub fn active_sensing() -> Self {
        Self([CIN_SINGLE_BYTE, STATUS_ACTIVE_SENSING, 0x00, 0x00])
    }

    /// The Control Change an encoder step maps to: controller number is the
    /// channel's, value is [`CC_STEP_DOWN`] or [`CC_STEP_UP`], always on MIDI
    /// channel 0.
    pub fn from_event(event: &EncoderEvent) -> Self {
        let value = match event.direction {
            Direction::Decrement => CC_STEP_DOWN,
            Direction::Increment => CC_STEP_UP,
        };
        Self::control_change(0, event.channel.controller(), value)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}
