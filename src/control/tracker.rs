// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Edge-triggered encoder motion detection.
//!
//! The hardware counters run freely; nothing interrupts on motion. Instead the
//! main loop polls each counter and this module compares the reading against
//! the last one it saw, emitting an [`EncoderEvent`] only on a genuine change.
//! A stationary knob therefore produces no MIDI traffic at all.

/// Number of encoder channels on the board.
pub const NUM_CHANNELS: usize = 3;

/// One physical encoder. The discriminant names follow the timers the knobs
/// are wired to (TIM1, TIM3, TIM4), which double as the MIDI controller
/// numbers the host sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Enc1,
    Enc3,
    Enc4,
}

impl Channel {
    /// All channels in their fixed service order.
    pub const ALL: [Channel; NUM_CHANNELS] = [Channel::Enc1, Channel::Enc3, Channel::Enc4];

    /// MIDI controller number reported for this channel.
    #[inline]
    pub fn controller(self) -> u8 {
        match self {
            Channel::Enc1 => 1,
            Channel::Enc3 => 3,
            Channel::Enc4 => 4,
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Channel::Enc1 => 0,
            Channel::Enc3 => 1,
            Channel::Enc4 => 2,
        }
    }
}

/// Rotation sense as reported by the counter's direction bit.
///
/// The naming follows the control-surface convention (what the host-side
/// parameter does), not the counter's up/down sense: direction bit clear is
/// `Decrement`, bit set is `Increment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increment,
    Decrement,
}

/// A single detected step on one channel. Built when a counter moved, consumed
/// immediately to produce a MIDI report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderEvent {
    pub channel: Channel,
    pub direction: Direction,
}

/// Per-channel last-observed counter values, owned in one place.
pub struct DeltaTracker {
    last: [u16; NUM_CHANNELS],
}

impl DeltaTracker {
    /// Counters start from zero at init, so the tracker does too.
    pub const fn new() -> Self {
        Self {
            last: [0; NUM_CHANNELS],
        }
    }

    /// Compare `count` against the last-observed value for `channel`.
    ///
    /// Returns `None` (and touches nothing) when the counter has not moved.
    /// On a change, the stored value is updated and exactly one event is
    /// returned, classified by `direction`. The caller must sample `count`
    /// and `direction` in the same pass: the direction bit reflects the most
    /// recent count direction, not a running sign, so it only correlates with
    /// this delta if read alongside it.
    pub fn poll(
        &mut self,
        channel: Channel,
        count: u16,
        direction: Direction,
    ) -> Option<EncoderEvent> {
        let last = &mut self.last[channel.index()];
        if count == *last {
            return None;
        }
        *last = count;
        Some(EncoderEvent { channel, direction })
    }
}

impl Default for DeltaTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stationary_counter_yields_nothing() {
        let mut tracker = DeltaTracker::new();
        assert_eq!(tracker.poll(Channel::Enc1, 0, Direction::Increment), None);
        assert_eq!(tracker.poll(Channel::Enc1, 0, Direction::Decrement), None);
    }

    #[test]
    fn change_yields_exactly_one_event() {
        let mut tracker = DeltaTracker::new();
        let event = tracker.poll(Channel::Enc1, 501, Direction::Increment);
        assert_eq!(
            event,
            Some(EncoderEvent {
                channel: Channel::Enc1,
                direction: Direction::Increment,
            })
        );
        // Idempotent: the hardware has not moved again.
        assert_eq!(tracker.poll(Channel::Enc1, 501, Direction::Increment), None);
    }

    #[test]
    fn direction_is_taken_from_the_sampled_bit() {
        let mut tracker = DeltaTracker::new();
        let up = tracker.poll(Channel::Enc3, 1, Direction::Increment).unwrap();
        assert_eq!(up.direction, Direction::Increment);
        let down = tracker.poll(Channel::Enc3, 0, Direction::Decrement).unwrap();
        assert_eq!(down.direction, Direction::Decrement);
    }

    #[test]
    fn channels_do_not_interfere() {
        let mut tracker = DeltaTracker::new();
        assert!(tracker.poll(Channel::Enc1, 10, Direction::Increment).is_some());
        // Enc3 and Enc4 still hold their own last-observed values.
        assert_eq!(tracker.poll(Channel::Enc3, 0, Direction::Increment), None);
        assert_eq!(tracker.poll(Channel::Enc4, 0, Direction::Increment), None);
        assert!(tracker.poll(Channel::Enc4, 999, Direction::Decrement).is_some());
        assert_eq!(tracker.poll(Channel::Enc1, 10, Direction::Increment), None);
    }

    #[test]
    fn wrap_at_modulus_still_registers_as_a_change() {
        let mut tracker = DeltaTracker::new();
        tracker.poll(Channel::Enc4, 1000, Direction::Decrement);
        // 1000 -> 0 is the hardware wrapping at the auto-reload value.
        let event = tracker.poll(Channel::Enc4, 0, Direction::Decrement).unwrap();
        assert_eq!(event.channel, Channel::Enc4);
    }
}
