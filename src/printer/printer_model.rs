use super::{PrinterProfile, PrinterProfileBuilder};

/// Printers known to this library
///
/// Only used to pick sensible profile defaults from the device identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrinterModel {
    /// ZKTeco mini printer, 58mm paper
    ZKTeco,
    /// Epson TM-T20II, 80mm paper
    TMT20II
}

impl PrinterModel {
    /// Every known model, used when looking a model up by its ids
    pub const ALL: [PrinterModel; 2] = [PrinterModel::ZKTeco, PrinterModel::TMT20II];

    /// Get the vendor and product id of the current model
    pub fn vp_id(&self) -> (u16, u16) {
        match self {
            PrinterModel::ZKTeco => (0x6868, 0x0200),
            PrinterModel::TMT20II => (0x04b8, 0x0e15)
        }
    }

    /// Finds the model that matches a usb vendor and product id
    pub fn from_vp_id(vendor_id: u16, product_id: u16) -> Option<PrinterModel> {
        PrinterModel::ALL.iter().copied().find(|model| model.vp_id() == (vendor_id, product_id))
    }

    /// Obtain the full details of the printer, to make an easy print
    ///
    /// ```rust
    /// use escpos_markdown::PrinterModel;
    ///
    /// let profile = PrinterModel::TMT20II.usb_profile();
    /// assert_eq!((profile.columns(), profile.width()), (48, 576));
    /// ```
    pub fn usb_profile(&self) -> PrinterProfile {
        let (vendor_id, product_id) = self.vp_id();
        let builder = PrinterProfileBuilder::new_usb(vendor_id, product_id);
        let builder = match self {
            PrinterModel::ZKTeco => builder.with_columns(32).with_width(384).with_endpoint(0x02),
            PrinterModel::TMT20II => builder.with_columns(48).with_width(576).with_endpoint(0x01)
        };
        match builder {
            Ok(builder) => builder.build(),
            // Usb builders always accept an endpoint
            Err(_) => PrinterProfileBuilder::new_usb(vendor_id, product_id).build()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_ids() {
        assert_eq!(PrinterModel::from_vp_id(0x04b8, 0x0e15), Some(PrinterModel::TMT20II));
        assert_eq!(PrinterModel::from_vp_id(0x0000, 0x0e15), None);
    }

    #[test]
    fn small_paper_profile() {
        let profile = PrinterModel::ZKTeco.usb_profile();
        assert_eq!((profile.columns(), profile.width()), (32, 384));
    }
}
