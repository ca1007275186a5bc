use crate::{CharacterSet, graphics::Symbology};

/// Errors that this crate throws.
#[derive(Debug)]
pub enum Error {
    /// Error related to rusb
    #[cfg(feature = "usb")]
    RusbError(rusb::Error),
    /// The sink refused the command stream
    Io(std::io::Error),
    /// This means no bulk endpoint could be found
    NoBulkEndpoint,
    /// No device with the configured vendor and product id is connected
    DeviceNotFound {
        vendor_id: u16,
        product_id: u16
    },
    /// Indicates that a builder method was called on the wrong printer connection
    UnsupportedForPrinterConnection,
    /// A character has no representation in the active character table
    UnsupportedCharacter {
        charset: CharacterSet,
        character: char
    },
    /// The digit count does not match what the symbology accepts
    InvalidBarcodeLength {
        symbology: Symbology,
        length: usize
    },
    /// Barcode payloads for the supported symbologies are digits only
    InvalidBarcodeDigits {
        symbology: Symbology
    },
    /// The qr payload cannot be stored with the chosen error correction level
    PayloadTooLarge {
        length: usize,
        max: usize
    },
    /// Image wider than the printable area, and the fit mode forbids resizing
    ImageTooWide {
        width: u32,
        max: u32
    },
    /// Image could not be decoded, or has no pixels
    UnsupportedImageFormat(String),
    /// A table cell that does not hold exactly one text node
    MalformedTableCell {
        row: usize,
        column: usize,
        children: usize
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        let content = match self {
            #[cfg(feature = "usb")]
            Error::RusbError(e) => format!("rusb error: {}", e),
            Error::Io(e) => format!("io error: {}", e),
            Error::NoBulkEndpoint => "No bulk endpoint could be found".to_string(),
            Error::DeviceNotFound{vendor_id, product_id} => format!("No printer found with id {:04x}:{:04x}", vendor_id, product_id),
            Error::UnsupportedForPrinterConnection => "The called method does not work with the current printer connection".to_string(),
            Error::UnsupportedCharacter{charset, character} => format!("Character {:?} (U+{:04X}) cannot be encoded with {:?}", character, *character as u32, charset),
            Error::InvalidBarcodeLength{symbology, length} => format!("{} does not accept {} digits, expected {}", symbology.name(), length, symbology.accepted_lengths_str()),
            Error::InvalidBarcodeDigits{symbology} => format!("{} payloads must contain digits only", symbology.name()),
            Error::PayloadTooLarge{length, max} => format!("QR payload of {} bytes exceeds the maximum of {}", length, max),
            Error::ImageTooWide{width, max} => format!("Image is {} dots wide, the printer accepts at most {}", width, max),
            Error::UnsupportedImageFormat(detail) => format!("Unsupported image: {}", detail),
            Error::MalformedTableCell{row, column, children} => format!("Invalid table cell at row {}, column {}: expected a single text child, found {} children", row, column, children)
        };
        write!(formatter, "{}", content)
    }
}

impl std::error::Error for Error{}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}
