//! Barcodes, qr codes and raster images
//!
//! Pure builders: they validate their input and return the complete command sequence, or an error without producing anything. The [Printer](crate::Printer) appends their output to the command stream.

pub use self::barcode::{Symbology, HriPosition, barcode, check_digit, complete_digits, validate_check_digit};
pub use self::qr::{QrErrorCorrection, qr_code, qr_bitmap};
pub use self::raster::{Raster, RasterOptions, ImageFit, Dither, decode_image, MAX_RASTER_ROWS};

mod barcode;
mod qr;
mod raster;
