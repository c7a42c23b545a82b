//! Minimal USB-MIDI function: one AudioControl/MIDIStreaming interface pair
//! and a single interrupt IN endpoint carrying 4-byte event packets.
//!
//! Only the device-to-host direction exists; the host never sends us MIDI.
//! The jack topology is the smallest legal one: an embedded IN jack feeding
//! an external OUT jack, with the endpoint attached to the embedded jack.

use usb_device::class_prelude::*;
use usb_device::Result;

use crate::midi::MidiReport;
use crate::transport::{ReportGate, ReportTx};

pub const USB_CLASS_AUDIO: u8 = 0x01;

const SUBCLASS_AUDIO_CONTROL: u8 = 0x01;
const SUBCLASS_MIDI_STREAMING: u8 = 0x03;

const CS_INTERFACE: u8 = 0x24;
const CS_ENDPOINT: u8 = 0x25;

const EMBEDDED_IN_JACK_ID: u8 = 0x01;
const EXTERNAL_OUT_JACK_ID: u8 = 0x02;

pub struct MidiClass<'a, B: UsbBus> {
    audio_if: InterfaceNumber,
    midi_if: InterfaceNumber,
    in_ep: EndpointIn<'a, B>,
    gate: ReportGate,
}

impl<B: UsbBus> MidiClass<'_, B> {
    pub fn new(alloc: &UsbBusAllocator<B>) -> MidiClass<'_, B> {
        MidiClass {
            audio_if: alloc.interface(),
            midi_if: alloc.interface(),
            in_ep: alloc.interrupt(64, 1),
            gate: ReportGate::new(),
        }
    }

    /// Best-effort report send, gated on the single-in-flight invariant.
    ///
    /// `configured` must reflect the device state at this poll; the report is
    /// silently dropped when the device is not configured or a previous
    /// report has not completed yet.
    pub fn send_report(&self, configured: bool, report: &MidiReport) -> bool {
        self.gate.send(configured, &self.in_ep, report)
    }
}

impl<B: UsbBus> ReportTx for EndpointIn<'_, B> {
    fn transmit(&self, report: &[u8]) -> Result<usize> {
        self.write(report)
    }
}

impl<B: UsbBus> UsbClass<B> for MidiClass<'_, B> {
    fn get_configuration_descriptors(&self, writer: &mut DescriptorWriter) -> Result<()> {
        // AudioControl interface with no audio endpoints, pointing at the
        // MIDIStreaming interface.
        writer.interface(self.audio_if, USB_CLASS_AUDIO, SUBCLASS_AUDIO_CONTROL, 0x00)?;
        writer.write(CS_INTERFACE, &[0x01, 0x00, 0x01, 0x09, 0x00, 0x01, 0x01])?;

        // MIDIStreaming interface. wTotalLength covers the CS header, both
        // jacks, the endpoint and its CS descriptor (0x22 bytes).
        writer.interface(self.midi_if, USB_CLASS_AUDIO, SUBCLASS_MIDI_STREAMING, 0x00)?;
        writer.write(CS_INTERFACE, &[0x01, 0x00, 0x01, 0x22, 0x00])?;

        // Embedded IN jack: the stream our reports originate from.
        writer.write(CS_INTERFACE, &[0x02, 0x01, EMBEDDED_IN_JACK_ID, 0x00])?;

        // External OUT jack so the embedded jack has somewhere to point.
        writer.write(
            CS_INTERFACE,
            &[0x03, 0x02, EXTERNAL_OUT_JACK_ID, 0x01, EMBEDDED_IN_JACK_ID, 0x01, 0x00],
        )?;

        writer.endpoint(&self.in_ep)?;
        writer.write(CS_ENDPOINT, &[0x01, 0x01, EMBEDDED_IN_JACK_ID])?;

        Ok(())
    }

    fn reset(&mut self) {
        // Bus reset tears down any pending transfer.
        self.gate.complete();
    }

    fn endpoint_in_complete(&mut self, addr: EndpointAddress) {
        if addr == self.in_ep.address() {
            self.gate.complete();
        }
    }
}
