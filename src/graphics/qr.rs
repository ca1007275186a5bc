extern crate qrcode;

use image::{GrayImage, Luma};
use qrcode::{QrCode, EcLevel, Color};
use serde::{Serialize, Deserialize};
use crate::{Error, command::Command};

/// Redundancy tiers of a qr symbol
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum QrErrorCorrection {
    /// Around 7% recovery
    L,
    /// Around 15% recovery
    M,
    /// Around 25% recovery
    Q,
    /// Around 30% recovery
    H
}

impl QrErrorCorrection {
    fn as_byte(&self) -> u8 {
        match self {
            QrErrorCorrection::L => 48,
            QrErrorCorrection::M => 49,
            QrErrorCorrection::Q => 50,
            QrErrorCorrection::H => 51
        }
    }

    /// Byte mode capacity of the biggest symbol (version 40)
    pub fn max_payload(&self) -> usize {
        match self {
            QrErrorCorrection::L => 2953,
            QrErrorCorrection::M => 2331,
            QrErrorCorrection::Q => 1663,
            QrErrorCorrection::H => 1273
        }
    }

    fn ec_level(&self) -> EcLevel {
        match self {
            QrErrorCorrection::L => EcLevel::L,
            QrErrorCorrection::M => EcLevel::M,
            QrErrorCorrection::Q => EcLevel::Q,
            QrErrorCorrection::H => EcLevel::H
        }
    }
}

fn check_capacity(data: &[u8], ecc: QrErrorCorrection) -> Result<(), Error> {
    if data.len() > ecc.max_payload() {
        Err(Error::PayloadTooLarge{length: data.len(), max: ecc.max_payload()})
    } else {
        Ok(())
    }
}

/// Native qr code command sequence
///
/// Selects the model (2 when `large`, 1 otherwise), the module size (clamped to 1..16), the error correction, stores the payload and prints it.
///
/// ```rust
/// use escpos_markdown::graphics::{qr_code, QrErrorCorrection};
///
/// let feed = qr_code(b"Hello, World!", false, 4, QrErrorCorrection::L).unwrap();
/// assert!(feed.ends_with(&[0x1d, 0x28, 0x6b, 0x03, 0x00, 0x31, 0x51, 0x30]));
/// ```
pub fn qr_code(data: &[u8], large: bool, module_size: u8, ecc: QrErrorCorrection) -> Result<Vec<u8>, Error> {
    check_capacity(data, ecc)?;
    let mut feed = Vec::with_capacity(data.len() + 40);
    let model = if large {
        50
    } else {
        49
    };
    feed.extend_from_slice(&Command::QrModel{model}.as_bytes());
    feed.extend_from_slice(&Command::QrModuleSize{size: module_size.max(1).min(16)}.as_bytes());
    feed.extend_from_slice(&Command::QrErrorCorrection{level: ecc.as_byte()}.as_bytes());
    feed.extend_from_slice(&Command::QrStore{length: data.len() as u16}.as_bytes());
    feed.extend_from_slice(data);
    feed.extend_from_slice(&Command::QrPrint.as_bytes());
    Ok(feed)
}

/// Renders the symbol as a bitmap, for printers without the qr function
///
/// Each module becomes a `module_size` square of dots, with the 4 module quiet zone around it.
pub fn qr_bitmap(data: &[u8], module_size: u8, ecc: QrErrorCorrection) -> Result<GrayImage, Error> {
    check_capacity(data, ecc)?;
    let code = QrCode::with_error_correction_level(data, ecc.ec_level()).map_err(|e| {
        log::debug!("qr symbol rejected: {:?}", e);
        Error::PayloadTooLarge{length: data.len(), max: ecc.max_payload()}
    })?;
    let modules = code.width() as u32;
    let colors = code.to_colors();
    let scale = module_size.max(1).min(16) as u32;
    let quiet = 4;
    let side = (modules + 2 * quiet) * scale;

    let bitmap = GrayImage::from_fn(side, side, |x, y| {
        let (mx, my) = (x / scale, y / scale);
        let dark = mx >= quiet && my >= quiet && mx < modules + quiet && my < modules + quiet
            && colors[((my - quiet) * modules + (mx - quiet)) as usize] == Color::Dark;
        if dark {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    });
    Ok(bitmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn small_symbol_sequence() {
        let feed = qr_code(b"abc", false, 4, QrErrorCorrection::M).unwrap();
        let expected = vec![
            0x1d, 0x28, 0x6b, 0x04, 0x00, 0x31, 0x41, 49, 0x00,
            0x1d, 0x28, 0x6b, 0x03, 0x00, 0x31, 0x43, 4,
            0x1d, 0x28, 0x6b, 0x03, 0x00, 0x31, 0x45, 49,
            0x1d, 0x28, 0x6b, 6, 0, 0x31, 0x50, 0x30, b'a', b'b', b'c',
            0x1d, 0x28, 0x6b, 0x03, 0x00, 0x31, 0x51, 0x30
        ];
        assert_eq!(feed, expected);
    }

    #[test]
    fn large_symbol_and_clamped_module() {
        let feed = qr_code(b"x", true, 40, QrErrorCorrection::H).unwrap();
        assert_eq!(feed[7], 50);
        assert_eq!(feed[16], 16);
        assert_eq!(feed[24], 51);
        let feed = qr_code(b"x", true, 0, QrErrorCorrection::H).unwrap();
        assert_eq!(feed[16], 1);
    }

    #[test]
    fn capacity_depends_on_error_correction() {
        let data = vec![b'a'; 2000];
        assert!(qr_code(&data, true, 4, QrErrorCorrection::L).is_ok());
        match qr_code(&data, true, 4, QrErrorCorrection::H) {
            Err(Error::PayloadTooLarge{length, max}) => assert_eq!((length, max), (2000, 1273)),
            other => panic!("unexpected result {:?}", other)
        }
    }

    #[test]
    fn bitmap_has_quiet_zone() {
        let bitmap = qr_bitmap(b"hello", 2, QrErrorCorrection::L).unwrap();
        // Version 1 is 21 modules wide
        assert_eq!(bitmap.width(), (21 + 8) * 2);
        assert_eq!(bitmap.get_pixel(0, 0).0[0], 255);
        // Top left finder pattern starts right after the quiet zone
        assert_eq!(bitmap.get_pixel(8, 8).0[0], 0);
    }
}
