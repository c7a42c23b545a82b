//! Quadrature encoder support via STM32F7 timers in encoder mode.
//!
//! This module configures TIM1, TIM3 and TIM4 registers for encoder mode and
//! provides count/direction accessors. Each counter runs 0..=1000 with the
//! maximum input filter on both phases, counting one step per detent
//! (single-edge slave mode).
//!
//! Phase inputs must be muxed to the timer before construction: PA8/PA9 AF1
//! for TIM1, PA6/PA7 AF2 for TIM3, PB6/PB7 AF2 for TIM4, all floating (the
//! encoder board drives both phases push-pull).

use stm32f7xx_hal::pac;

use crate::control::tracker::Direction;

/// Counter modulus: the auto-reload value, so counts wrap at 1001 steps.
pub const COUNT_MODULUS: u16 = 1000;

pub struct Encoder<TIM> {
    tim: TIM,
}

impl<TIM> Encoder<TIM> {
    /// Consume the wrapper and return the underlying timer peripheral.
    #[inline]
    pub fn free(self) -> TIM {
        self.tim
    }
}

impl Encoder<pac::TIM1> {
    /// Configure TIM1 as a quadrature encoder (phases on PA8/PA9, AF1).
    pub fn tim1(tim: pac::TIM1) -> Self {
        // Clock gate for the counter block (TIM1 sits on APB2).
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.tim1en().set_bit());

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        // CH1/CH2 as inputs from TI1/TI2, maximum input filter
        tim.ccmr1_input().modify(|_, w| unsafe {
            w.cc1s().bits(0b01).cc2s().bits(0b01).ic1f().bits(0b1111).ic2f().bits(0b1111)
        });

        // Rising-edge polarity on both phases
        tim.ccer.modify(|_, w| w.cc1p().clear_bit().cc2p().clear_bit());

        // Slave mode: encoder mode 1 (one count per detent)
        tim.smcr.modify(|_, w| w.sms().bits(0b001));

        // Auto-reload: counter wraps at the modulus
        tim.arr.write(|w| unsafe { w.bits(COUNT_MODULUS as u32) });

        // Reset the counter
        tim.cnt.write(|w| unsafe { w.bits(0) });

        // Enable the counter
        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim }
    }

    /// Read the raw 16-bit counter value.
    #[inline]
    pub fn count(&self) -> u16 {
        self.tim.cnt.read().cnt().bits()
    }

    /// Direction bit sampled from CR1. Only meaningful alongside a count read
    /// from the same poll.
    #[inline]
    pub fn direction(&self) -> Direction {
        if self.tim.cr1.read().dir().bit_is_set() {
            Direction::Increment
        } else {
            Direction::Decrement
        }
    }
}

impl Encoder<pac::TIM3> {
    /// Configure TIM3 as a quadrature encoder (phases on PA6/PA7, AF2).
    pub fn tim3(tim: pac::TIM3) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim3en().set_bit());

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        // CH1/CH2 as inputs from TI1/TI2, maximum input filter
        tim.ccmr1_input()
            .modify(|_, w| w.cc1s().ti1().cc2s().ti2().ic1f().bits(0b1111).ic2f().bits(0b1111));

        // Rising-edge polarity on both phases
        tim.ccer.modify(|_, w| w.cc1p().clear_bit().cc2p().clear_bit());

        // Slave mode: encoder mode 1 (one count per detent)
        tim.smcr.modify(|_, w| w.sms().bits(0b001));

        // Auto-reload: counter wraps at the modulus
        tim.arr.write(|w| unsafe { w.bits(COUNT_MODULUS as u32) });

        // Reset counter
        tim.cnt.write(|w| unsafe { w.bits(0) });

        // Enable counter
        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim }
    }

    /// Read the raw 16-bit counter value.
    #[inline]
    pub fn count(&self) -> u16 {
        self.tim.cnt.read().cnt().bits()
    }

    /// Direction bit sampled from CR1. Only meaningful alongside a count read
    /// from the same poll.
    #[inline]
    pub fn direction(&self) -> Direction {
        if self.tim.cr1.read().dir().bit_is_set() {
            Direction::Increment
        } else {
            Direction::Decrement
        }
    }
}

impl Encoder<pac::TIM4> {
    /// Configure TIM4 as a quadrature encoder (phases on PB6/PB7, AF2).
    pub fn tim4(tim: pac::TIM4) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim4en().set_bit());

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        // CH1/CH2 as inputs from TI1/TI2, maximum input filter
        tim.ccmr1_input()
            .modify(|_, w| w.cc1s().ti1().cc2s().ti2().ic1f().bits(0b1111).ic2f().bits(0b1111));

        // Rising-edge polarity on both phases
        tim.ccer.modify(|_, w| w.cc1p().clear_bit().cc2p().clear_bit());

        // Slave mode: encoder mode 1 (one count per detent)
        tim.smcr.modify(|_, w| w.sms().bits(0b001));

        // Auto-reload: counter wraps at the modulus
        tim.arr.write(|w| unsafe { w.bits(COUNT_MODULUS as u32) });

        // Reset counter
        tim.cnt.write(|w| unsafe { w.bits(0) });

        // Enable counter
        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim }
    }

    /// Read the raw 16-bit counter value.
    #[inline]
    pub fn count(&self) -> u16 {
        self.tim.cnt.read().cnt().bits()
    }

    /// Direction bit sampled from CR1. Only meaningful alongside a count read
    /// from the same poll.
    #[inline]
    pub fn direction(&self) -> Direction {
        if self.tim.cr1.read().dir().bit_is_set() {
            Direction::Increment
        } else {
            Direction::Decrement
        }
    }
}
