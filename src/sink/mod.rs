//! Destinations for the command stream
//!
//! A [Printer](crate::Printer) writes to anything implementing [std::io::Write]. These two cover the usual cases: an actual usb printer, and a capture for inspecting the bytes.

pub use self::debug::DebugSink;
#[cfg(feature = "usb")]
pub use self::usb::UsbSink;

mod debug;
#[cfg(feature = "usb")]
mod usb;
