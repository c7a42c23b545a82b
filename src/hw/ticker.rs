//! Monotonic tick source on TIM2.
//!
//! A free-running 32-bit counter at [`TICK_HZ`], read by the debounce logic.
//! It wraps after ~119 hours; consumers use wrapping subtraction.

use stm32f7xx_hal::pac;

/// Tick rate of the counter.
pub const TICK_HZ: u32 = 10_000;

/// TIM2 kernel clock under the 216 MHz tree (PCLK1 54 MHz, timer clock x2).
const TIM2_CLK_HZ: u32 = 108_000_000;

const PRESCALER: u16 = (TIM2_CLK_HZ / TICK_HZ - 1) as u16;

pub struct Ticker {
    tim: pac::TIM2,
}

impl Ticker {
    /// Start TIM2 free-running at [`TICK_HZ`]. Assumes the 216 MHz clock tree
    /// from startup is in place.
    pub fn tim2(tim: pac::TIM2) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim2en().set_bit());

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        tim.psc.write(|w| w.psc().bits(PRESCALER));

        // Auto-reload: max 32-bit
        tim.arr.write(|w| w.bits(0xFFFF_FFFF));

        // Update event to latch the prescaler, then clear the counter
        tim.egr.write(|w| w.ug().set_bit());
        tim.cnt.write(|w| w.bits(0));

        // Enable the counter
        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim }
    }

    /// Current tick count.
    #[inline]
    pub fn now(&self) -> u32 {
        self.tim.cnt.read().bits()
    }

    /// Consume the wrapper and return the underlying timer peripheral.
    #[inline]
    pub fn free(self) -> pac::TIM2 {
        self.tim
    }
}

/// Convert milliseconds to ticks at [`TICK_HZ`].
pub const fn ms_to_ticks(ms: u32) -> u32 {
    ms * (TICK_HZ / 1000)
}
