// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Per-channel settle windows.
//!
//! After a step is dispatched on a channel, further steps on that channel are
//! suppressed until the window elapses, soaking up contact bounce beyond what
//! the timer's input filter already removes. Each channel tracks its own
//! window against a shared monotonic tick, so one knob settling never blocks
//! detection on the others.

use crate::control::tracker::{Channel, NUM_CHANNELS};

pub struct Debounce {
    window: u32,
    last_dispatch: [Option<u32>; NUM_CHANNELS],
}

impl Debounce {
    /// `window` is in ticks of whatever monotonic source feeds [`ready`].
    ///
    /// [`ready`]: Debounce::ready
    pub const fn new(window: u32) -> Self {
        Self {
            window,
            last_dispatch: [None; NUM_CHANNELS],
        }
    }

    /// Whether `channel` may dispatch at time `now`.
    ///
    /// Returns `true` and records `now` when the channel is outside its settle
    /// window (or has never dispatched). Wrapping subtraction keeps this
    /// correct across the tick counter's rollover.
    pub fn ready(&mut self, channel: Channel, now: u32) -> bool {
        let slot = &mut self.last_dispatch[channel.index()];
        match *slot {
            Some(t) if now.wrapping_sub(t) < self.window => false,
            _ => {
                *slot = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: u32 = 1000;

    #[test]
    fn first_event_passes() {
        let mut debounce = Debounce::new(WINDOW);
        assert!(debounce.ready(Channel::Enc1, 0));
    }

    #[test]
    fn in_window_event_is_suppressed() {
        let mut debounce = Debounce::new(WINDOW);
        assert!(debounce.ready(Channel::Enc1, 100));
        assert!(!debounce.ready(Channel::Enc1, 100 + WINDOW - 1));
    }

    #[test]
    fn window_reopens_after_expiry() {
        let mut debounce = Debounce::new(WINDOW);
        assert!(debounce.ready(Channel::Enc1, 100));
        assert!(debounce.ready(Channel::Enc1, 100 + WINDOW));
    }

    #[test]
    fn suppressed_event_does_not_extend_the_window() {
        let mut debounce = Debounce::new(WINDOW);
        assert!(debounce.ready(Channel::Enc1, 0));
        assert!(!debounce.ready(Channel::Enc1, WINDOW - 1));
        // Window is measured from the dispatch at t=0, not the suppressed poll.
        assert!(debounce.ready(Channel::Enc1, WINDOW));
    }

    #[test]
    fn channels_settle_independently() {
        let mut debounce = Debounce::new(WINDOW);
        assert!(debounce.ready(Channel::Enc1, 0));
        assert!(debounce.ready(Channel::Enc3, 1));
        assert!(debounce.ready(Channel::Enc4, 2));
        assert!(!debounce.ready(Channel::Enc1, 500));
        assert!(!debounce.ready(Channel::Enc3, 500));
    }

    #[test]
    fn survives_tick_rollover() {
        let mut debounce = Debounce::new(WINDOW);
        assert!(debounce.ready(Channel::Enc1, u32::MAX - 10));
        assert!(!debounce.ready(Channel::Enc1, 20)); // 31 ticks later
        assert!(debounce.ready(Channel::Enc1, WINDOW));
    }
}
