use serde::{Serialize, Deserialize};
use crate::{
    Error,
    CharacterSet
};

/// Where the command stream of a printer ends up
///
/// Try not to use this enum directly, use the builder pattern instead (using the [usb_builder](PrinterProfile::usb_builder) or [debug_builder](PrinterProfile::debug_builder) methods).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum PrinterConnectionData {
    /// Usb printer, opened by [UsbSink](crate::sink::UsbSink)
    Usb {
        /// Usb vendor id
        vendor_id: u16,
        /// Usb product id
        product_id: u16,
        /// Bulk out endpoint, detected when missing
        endpoint: Option<u8>,
        /// Limit for each bulk transfer
        timeout: std::time::Duration
    },
    /// No device at all, bytes are only captured for inspection
    Debug
}

/// Static details of a printer
///
/// Immutable once built. The encoder reads the paper width in columns and in dots, and the character table active at the start of a session. The connection data is only used by the sinks.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PrinterProfile {
    /// Where the stream goes, only read by the sinks
    pub (crate) printer_connection_data: PrinterConnectionData,
    /// Paper width, in characters of the default font
    pub (crate) columns: u8,
    /// Total printer width in dots, for image printing
    pub (crate) width: u16,
    /// Character table used when the session starts
    pub (crate) default_charset: CharacterSet
}

impl PrinterProfile {
    /// Creates a [PrinterProfileBuilder](crate::PrinterProfileBuilder) set for usb printing.
    ///
    /// Same as [PrinterProfileBuilder::new_usb](crate::PrinterProfileBuilder::new_usb).
    /// ```rust
    /// use escpos_markdown::PrinterProfile;
    /// // Only the ids are required, the paper defaults to 80mm
    /// let printer_profile = PrinterProfile::usb_builder(0x04b8, 0x0e15).build();
    /// assert_eq!(printer_profile.columns(), 48);
    /// ```
    pub fn usb_builder(vendor_id: u16, product_id: u16) -> PrinterProfileBuilder {
        PrinterProfileBuilder::new_usb(vendor_id, product_id)
    }

    /// Creates a [PrinterProfileBuilder](crate::PrinterProfileBuilder) for a session that only captures bytes
    pub fn debug_builder() -> PrinterProfileBuilder {
        PrinterProfileBuilder::new_debug()
    }

    pub fn connection_data(&self) -> &PrinterConnectionData {
        &self.printer_connection_data
    }

    /// Paper width in character columns
    pub fn columns(&self) -> u8 {
        self.columns
    }

    /// Paper width in dots
    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn default_charset(&self) -> CharacterSet {
        self.default_charset
    }
}

impl Default for PrinterProfile {
    fn default() -> PrinterProfile {
        PrinterProfileBuilder::new_debug().build()
    }
}

/// Builds a [PrinterProfile](crate::PrinterProfile) step by step
///
/// Builder pattern for the [PrinterProfile](crate::PrinterProfile) structure. The defaults match an 80mm paper printer: 48 columns, 576 dots, PC437.
pub struct PrinterProfileBuilder {
    printer_connection_data: PrinterConnectionData,
    columns: u8,
    /// Width, in dots, of the printer
    width: u16,
    default_charset: CharacterSet
}

impl PrinterProfileBuilder {
    /// Starts a usb profile for the given device ids
    ///
    /// ```rust
    /// use escpos_markdown::PrinterProfileBuilder;
    /// let printer_profile_builder = PrinterProfileBuilder::new_usb(0x04b8, 0x0e15);
    /// ```
    ///
    /// The usb sink will try to locate a bulk write endpoint, but it might fail to do so. See [with_endpoint](PrinterProfileBuilder::with_endpoint) for manual setup.
    pub fn new_usb(vendor_id: u16, product_id: u16) -> PrinterProfileBuilder {
        PrinterProfileBuilder {
            printer_connection_data: PrinterConnectionData::Usb {
                vendor_id,
                product_id,
                endpoint: None,
                timeout: std::time::Duration::from_secs(2)
            },
            columns: 48,
            width: 576,
            default_charset: CharacterSet::Cp437
        }
    }

    /// Creates a new [PrinterProfileBuilder](crate::PrinterProfileBuilder) with no device behind it
    pub fn new_debug() -> PrinterProfileBuilder {
        PrinterProfileBuilder {
            printer_connection_data: PrinterConnectionData::Debug,
            columns: 48,
            width: 576,
            default_charset: CharacterSet::Cp437
        }
    }

    /// Skips endpoint detection, writing to `endpoint` instead
    ///
    /// ```rust
    /// use escpos_markdown::PrinterProfileBuilder;
    /// let printer_profile = PrinterProfileBuilder::new_usb(0x6868, 0x0200)
    ///     .with_endpoint(0x02).unwrap()
    ///     .build();
    /// ```
    pub fn with_endpoint(mut self, endpoint: u8) -> Result<PrinterProfileBuilder, Error> {
        match &mut self.printer_connection_data {
            PrinterConnectionData::Usb{endpoint: self_endpoint, ..} => {
                *self_endpoint = Some(endpoint);
                Ok(self)
            },
            _other => Err(Error::UnsupportedForPrinterConnection)
        }
    }

    /// Bulk transfer timeout, usb profiles only
    ///
    /// The default value is 2 seconds.
    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Result<PrinterProfileBuilder, Error> {
        match &mut self.printer_connection_data {
            PrinterConnectionData::Usb{timeout: self_timeout, ..} => {
                *self_timeout = timeout;
                Ok(self)
            },
            _other => Err(Error::UnsupportedForPrinterConnection)
        }
    }

    /// Paper width in columns. 32 is common for 58mm paper, 48 for 80mm.
    pub fn with_columns(mut self, columns: u8) -> PrinterProfileBuilder {
        self.columns = columns;
        self
    }

    /// Printable width in dots, images are fitted to it
    ///
    /// ```rust
    /// use escpos_markdown::PrinterProfileBuilder;
    /// let printer_profile = PrinterProfileBuilder::new_usb(0x6868, 0x0200)
    ///     .with_width(384)
    ///     .build();
    /// assert_eq!(printer_profile.width(), 384);
    /// ```
    pub fn with_width(mut self, width: u16) -> PrinterProfileBuilder {
        self.width = width;
        self
    }

    pub fn with_default_charset(mut self, charset: CharacterSet) -> PrinterProfileBuilder {
        self.default_charset = charset;
        self
    }

    pub fn build(self) -> PrinterProfile {
        PrinterProfile {
            printer_connection_data: self.printer_connection_data,
            columns: self.columns,
            width: self.width,
            default_charset: self.default_charset
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_only_for_usb() {
        assert!(PrinterProfileBuilder::new_debug().with_endpoint(1).is_err());
        let profile = PrinterProfileBuilder::new_usb(1, 2).with_endpoint(3).unwrap().build();
        match profile.connection_data() {
            PrinterConnectionData::Usb{vendor_id, product_id, endpoint, ..} => {
                assert_eq!((*vendor_id, *product_id, *endpoint), (1, 2, Some(3)));
            },
            other => panic!("unexpected connection {:?}", other)
        }
    }
}
