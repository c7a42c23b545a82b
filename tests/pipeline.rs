//! End-to-end checks of the encoder-to-MIDI pipeline, with the USB endpoint
//! replaced by a recording mock.

use core::cell::RefCell;

use tridial::control::{Channel, Debounce, DeltaTracker, Direction, KeepAlive};
use tridial::midi::MidiReport;
use tridial::transport::{ReportGate, ReportTx};

#[derive(Default)]
struct WireLog {
    packets: RefCell<Vec<[u8; 4]>>,
}

impl ReportTx for WireLog {
    fn transmit(&self, report: &[u8]) -> usb_device::Result<usize> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(report);
        self.packets.borrow_mut().push(buf);
        Ok(report.len())
    }
}

#[test]
fn single_step_each_way_on_channel_one() {
    let mut tracker = DeltaTracker::new();
    let gate = ReportGate::new();
    let wire = WireLog::default();

    // Counter reaches 500 first so the interesting transition is 500 -> 501.
    tracker.poll(Channel::Enc1, 500, Direction::Increment);
    gate.complete();

    let event = tracker
        .poll(Channel::Enc1, 501, Direction::Decrement)
        .expect("count changed");
    assert!(gate.send(true, &wire, &MidiReport::from_event(&event)));
    gate.complete();

    let event = tracker
        .poll(Channel::Enc1, 500, Direction::Increment)
        .expect("count changed");
    assert!(gate.send(true, &wire, &MidiReport::from_event(&event)));
    gate.complete();

    let packets = wire.packets.borrow();
    assert_eq!(packets.as_slice(), &[[0x0B, 0xB0, 0x01, 0x01], [0x0B, 0xB0, 0x01, 0x02]]);
}

#[test]
fn in_flight_report_sheds_newer_steps() {
    let mut tracker = DeltaTracker::new();
    let gate = ReportGate::new();
    let wire = WireLog::default();

    let first = tracker.poll(Channel::Enc3, 1, Direction::Increment).unwrap();
    assert!(gate.send(true, &wire, &MidiReport::from_event(&first)));

    // Host has not drained the endpoint yet; the next step is dropped.
    let second = tracker.poll(Channel::Enc3, 2, Direction::Increment).unwrap();
    assert!(!gate.send(true, &wire, &MidiReport::from_event(&second)));

    assert_eq!(wire.packets.borrow().len(), 1);

    // Completion reopens the pipe.
    gate.complete();
    let third = tracker.poll(Channel::Enc3, 3, Direction::Increment).unwrap();
    assert!(gate.send(true, &wire, &MidiReport::from_event(&third)));
    assert_eq!(wire.packets.borrow().len(), 2);
}

#[test]
fn debounced_dispatch_coalesces_a_burst() {
    let mut tracker = DeltaTracker::new();
    let mut debounce = Debounce::new(1000);
    let gate = ReportGate::new();
    let wire = WireLog::default();

    // Three counter changes within one settle window: only the first one is
    // dispatched, but the tracker keeps absorbing the counts.
    for (now, count) in [(0u32, 1u16), (10, 2), (20, 3)] {
        if let Some(event) = tracker.poll(Channel::Enc4, count, Direction::Increment) {
            if debounce.ready(event.channel, now) {
                gate.send(true, &wire, &MidiReport::from_event(&event));
                gate.complete();
            }
        }
    }
    assert_eq!(wire.packets.borrow().len(), 1);

    // Past the window a new step goes out again.
    let event = tracker.poll(Channel::Enc4, 4, Direction::Increment).unwrap();
    assert!(debounce.ready(event.channel, 1500));
    gate.send(true, &wire, &MidiReport::from_event(&event));
    assert_eq!(wire.packets.borrow().len(), 2);
}

#[test]
fn keep_alive_fires_once_per_counter_cycle() {
    let mut keepalive = KeepAlive::new();
    let gate = ReportGate::new();
    let wire = WireLog::default();

    for _ in 0..65535 {
        if keepalive.tick() {
            gate.send(true, &wire, &MidiReport::active_sensing());
            gate.complete();
        }
    }

    let packets = wire.packets.borrow();
    assert_eq!(packets.as_slice(), &[[0x0F, 0xFE, 0x00, 0x00]]);
}
