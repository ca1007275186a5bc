//! Library for turning text, markdown, barcodes, qr codes and images into esc/pos command streams
//!
//! Everything goes through a [Printer](crate::Printer), which keeps the current style and appends commands to a buffer. The buffer reaches its sink (anything implementing [std::io::Write]) when [print](crate::Printer::print) is called.
//!
//! ```rust
//! use escpos_markdown::{Printer, PrinterProfile, Justification, sink::DebugSink};
//!
//! let mut printer = Printer::new(DebugSink::new(), PrinterProfile::default());
//! printer.justify(Justification::Center).size(2, 2);
//! printer.write("Corner Cafe")?;
//! printer.line_feed();
//! printer.reset_styles();
//! printer.ean13("590123412345")?;
//! printer.print_and_cut()?;
//! println!("{}", printer.sink().hex_dump());
//! # Ok::<(), escpos_markdown::Error>(())
//! ```
//!
//! With a usb printer (feature `usb`, enabled by default), the sink is a [UsbSink](crate::sink::UsbSink) opened from the printer profile.
//!
//! ```rust,no_run
//! use escpos_markdown::{Printer, PrinterProfile, sink::UsbSink};
//!
//! let printer_profile = PrinterProfile::usb_builder(0x04b8, 0x0e15).build();
//! let sink = UsbSink::open(&printer_profile)?;
//! let mut printer = Printer::new(sink, printer_profile);
//! printer.write_markdown("# Hello\n- one\n- two")?;
//! printer.print_and_cut()?;
//! # Ok::<(), escpos_markdown::Error>(())
//! ```
//!
//! ## Printer Details
//!
//! The [PrinterProfile](crate::PrinterProfile) holds what the encoder needs to know about the paper: its width in characters and in dots, and the character table active at start. Usb profiles also carry the vendor and product id, which should be found in the maker's website, or with the `lsusb` command on linux. [PrinterModel](crate::PrinterModel) has ready made profiles for the printers known to this library.
//!
//! ## Markdown
//!
//! There are two renderers. [write_markdown](crate::Printer::write_markdown) styles the document one line at a time (headers, rules, list items), while [write_document](crate::Printer::write_document) parses the whole document and lays tables out with tab stops.
//!
//! ```rust
//! use escpos_markdown::{Printer, PrinterProfile};
//!
//! let mut printer = Printer::new(Vec::new(), PrinterProfile::default());
//! printer.write_document("| Item | Qty |\n|---|---|\n| Tea | 2 |\n")?;
//! assert!(printer.bytes().starts_with(b"Item\tQty\t\n"));
//! # Ok::<(), escpos_markdown::Error>(())
//! ```

pub use printer::{Printer, PrinterProfile, PrinterProfileBuilder, PrinterModel, PrinterConnectionData};
pub use style::{Style, Justification, Underline};
pub use encoding::CharacterSet;
pub use error::Error;

/// Contains raw esc/pos commands
pub mod command;
pub mod graphics;
pub mod markdown;
pub mod sink;

mod printer;
mod style;
mod encoding;
mod error;
