#![cfg_attr(target_os = "none", no_main)]
#![cfg_attr(target_os = "none", no_std)]

use cortex_m::singleton;
use cortex_m_rt::entry;
#[cfg(target_os = "none")]
use panic_halt as _;
use rtt_target::{rprintln, rtt_init_print};

use hal::{
    otg_fs::{UsbBus, USB},
    pac,
    prelude::*,
    rcc::{HSEClock, HSEClockMode, PLL48CLK},
};
use stm32f7xx_hal as hal;
use usb_device::prelude::*;

use tridial::control::{Channel, Debounce, DeltaTracker, KeepAlive};
use tridial::hw::ticker::ms_to_ticks;
use tridial::hw::{Encoder, MidiClass, Ticker};
use tridial::midi::MidiReport;

pub const USB_CLASS_NONE: u8 = 0x00;

/// Settle window applied per channel after each dispatched step.
const SETTLE_MS: u32 = 100;

#[cfg(target_os = "none")]
#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("tridial start");

    // Peripherals
    let dp = pac::Peripherals::take().unwrap();

    // Clocks: 25 MHz HSE through the PLL, 48 MHz branch for the USB FS core
    let rcc = dp.RCC.constrain();
    let clocks = rcc
        .cfgr
        .hse(HSEClock::new(25.MHz(), HSEClockMode::Bypass))
        .use_pll()
        .use_pll48clk(PLL48CLK::Pllq)
        .sysclk(216.MHz())
        .freeze();

    // GPIO
    let gpioa = dp.GPIOA.split();
    let gpiob = dp.GPIOB.split();

    // Encoder phase inputs, floating (see hw::encoder for the pinout)
    let _ = gpioa.pa8.into_alternate::<1>();
    let _ = gpioa.pa9.into_alternate::<1>();
    let _ = gpioa.pa6.into_alternate::<2>();
    let _ = gpioa.pa7.into_alternate::<2>();
    let _ = gpiob.pb6.into_alternate::<2>();
    let _ = gpiob.pb7.into_alternate::<2>();

    // Quadrature counters and the debounce tick source
    let enc1 = Encoder::tim1(dp.TIM1);
    let enc3 = Encoder::tim3(dp.TIM3);
    let enc4 = Encoder::tim4(dp.TIM4);
    let ticker = Ticker::tim2(dp.TIM2);

    // USB FS device
    let usb = USB::new(
        dp.OTG_FS_GLOBAL,
        dp.OTG_FS_DEVICE,
        dp.OTG_FS_PWRCLK,
        (
            gpioa.pa11.into_alternate::<10>(),
            gpioa.pa12.into_alternate::<10>(),
        ),
        &clocks,
    );

    let ep_memory = singleton!(: [u32; 1024] = [0; 1024]).unwrap();
    let usb_bus = UsbBus::new(usb, ep_memory);

    let mut midi = MidiClass::new(&usb_bus);

    let mut usb_dev = UsbDeviceBuilder::new(&usb_bus, UsbVidPid(0x16c0, 0x27dd))
        .strings(&[StringDescriptors::default()
            .manufacturer("tridial")
            .product("tridial encoder surface")
            .serial_number("0001")])
        .unwrap()
        .device_class(USB_CLASS_NONE)
        .max_packet_size_0(64)
        .unwrap()
        .build();

    let mut tracker = DeltaTracker::new();
    let mut debounce = Debounce::new(ms_to_ticks(SETTLE_MS));
    let mut keepalive = KeepAlive::new();

    rprintln!("entering poll loop");

    loop {
        usb_dev.poll(&mut [&mut midi]);
        let configured = usb_dev.state() == UsbDeviceState::Configured;
        let now = ticker.now();

        // Fixed service order: channel 1, then 3, then 4.
        if let Some(event) = tracker.poll(Channel::Enc1, enc1.count(), enc1.direction()) {
            if debounce.ready(event.channel, now) {
                midi.send_report(configured, &MidiReport::from_event(&event));
                rprintln!("cc {} {:?}", event.channel.controller(), event.direction);
            }
        }
        if let Some(event) = tracker.poll(Channel::Enc3, enc3.count(), enc3.direction()) {
            if debounce.ready(event.channel, now) {
                midi.send_report(configured, &MidiReport::from_event(&event));
                rprintln!("cc {} {:?}", event.channel.controller(), event.direction);
            }
        }
        if let Some(event) = tracker.poll(Channel::Enc4, enc4.count(), enc4.direction()) {
            if debounce.ready(event.channel, now) {
                midi.send_report(configured, &MidiReport::from_event(&event));
                rprintln!("cc {} {:?}", event.channel.controller(), event.direction);
            }
        }

        if keepalive.tick() {
            midi.send_report(configured, &MidiReport::active_sensing());
        }
    }
}

// Host builds (tests) get an empty entry point; the firmware entry above is
// compiled only for the bare-metal target.
#[cfg(not(target_os = "none"))]
fn main() {}
