extern crate rusb;

use std::io;
use std::sync::Mutex;
use std::time::Duration;
use log::{debug, warn};
use rusb::{Context, DeviceHandle, UsbContext, TransferType, Direction};
use crate::{Error, PrinterProfile, PrinterConnectionData};

/// Usb printer, opened from a [PrinterProfile]
///
/// ```rust,no_run
/// use escpos_markdown::{Printer, PrinterModel, sink::UsbSink};
///
/// let profile = PrinterModel::TMT20II.usb_profile();
/// let sink = UsbSink::open(&profile)?;
/// let mut printer = Printer::new(sink, profile);
/// printer.write("Hello, world!")?;
/// printer.print_and_cut()?;
/// # Ok::<(), escpos_markdown::Error>(())
/// ```
pub struct UsbSink {
    /// Bulk out endpoint address
    endpoint: u8,
    timeout: Duration,
    dh: Mutex<DeviceHandle<Context>>
}

impl UsbSink {
    /// Finds the device described by the profile, and claims its first interface
    pub fn open(printer_profile: &PrinterProfile) -> Result<UsbSink, Error> {
        let (vendor_id, product_id, endpoint, timeout) = match printer_profile.connection_data() {
            PrinterConnectionData::Usb{vendor_id, product_id, endpoint, timeout} => (*vendor_id, *product_id, *endpoint, *timeout),
            PrinterConnectionData::Debug => return Err(Error::UnsupportedForPrinterConnection)
        };
        let context = Context::new().map_err(Error::RusbError)?;
        let devices = context.devices().map_err(Error::RusbError)?;
        for device in devices.iter() {
            let s = device.device_descriptor().map_err(Error::RusbError)?;
            if s.vendor_id() != vendor_id || s.product_id() != product_id {
                continue;
            }
            // Before opening the device, we must find the bulk endpoint
            let endpoint = match endpoint {
                Some(endpoint) => endpoint,
                None => {
                    let config_descriptor = device.active_config_descriptor().map_err(Error::RusbError)?;
                    let detected_endpoint = config_descriptor.interfaces()
                        .flat_map(|interface| interface.descriptors())
                        .flat_map(|descriptor| descriptor.endpoint_descriptors().collect::<Vec<_>>())
                        .find(|endpoint| endpoint.transfer_type() == TransferType::Bulk && endpoint.direction() == Direction::Out)
                        .map(|endpoint| endpoint.address());
                    detected_endpoint.ok_or(Error::NoBulkEndpoint)?
                }
            };

            let dh = device.open().map_err(Error::RusbError)?;
            match dh.kernel_driver_active(0) {
                Ok(true) => dh.detach_kernel_driver(0).map_err(Error::RusbError)?,
                Ok(false) => (),
                Err(_) => warn!("Could not find out if kernel driver is active, might encounter a problem soon.")
            }
            dh.claim_interface(0).map_err(Error::RusbError)?;
            debug!("printer {:04x}:{:04x} opened, writing to endpoint {:#04x}", vendor_id, product_id, endpoint);
            return Ok(UsbSink {
                endpoint,
                timeout,
                dh: Mutex::new(dh)
            });
        }
        Err(Error::DeviceNotFound{vendor_id, product_id})
    }

    /// Sends bytes in a single bulk transfer, returns how many the device took
    pub fn send(&self, bytes: &[u8]) -> Result<usize, Error> {
        let dh = match self.dh.lock() {
            Ok(dh) => dh,
            // A panic while holding the lock leaves the handle usable
            Err(poisoned) => poisoned.into_inner()
        };
        dh.write_bulk(self.endpoint, bytes, self.timeout).map_err(Error::RusbError)
    }
}

impl io::Write for UsbSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.send(buf).map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
