pub mod encoder;
pub mod ticker;
pub mod usb_midi;

pub use encoder::Encoder;
pub use ticker::Ticker;
pub use usb_midi::MidiClass;
