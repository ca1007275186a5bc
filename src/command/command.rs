extern crate serde;

use super::{Charset, CodeTable};
use crate::style::{Justification, Underline};
use serde::{Serialize, Deserialize};

const ESC: u8 = 0x1b;
const GS: u8 = 0x1d;
const FS: u8 = 0x1c;

/// Single esc/pos commands, with their parameters
///
/// Each variant maps to exactly one command on the wire. Text and raster data are not commands, they travel right after the command that announces them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Command {
    /// Clears the print buffer and restores the power-on modes. Equivalent to ESC @
    Initialize,
    /// Feeds the paper and cuts it. Equivalent to GS V A 0x96
    Cut,
    /// Document trailer, cuts without extra feed. Equivalent to GS V A 0
    DocumentEnd,
    /// Prints the buffer and feeds one line
    LineFeed,
    /// Prints the buffer and feeds `lines` lines. Equivalent to ESC d
    Feed {
        lines: u8
    },
    /// Equivalent to ESC a
    Justify {
        justification: Justification
    },
    /// Equivalent to ESC E
    Bold {
        on: bool
    },
    /// Equivalent to ESC -
    Underline {
        underline: Underline
    },
    /// White on black printing. Equivalent to GS B
    Reverse {
        on: bool
    },
    /// 90 degrees clockwise rotation. Equivalent to ESC V
    Rotate {
        on: bool
    },
    /// Equivalent to ESC {
    UpsideDown {
        on: bool
    },
    /// Character magnification, 1 to 8 on each axis. Equivalent to GS !
    Size {
        width: u8,
        height: u8
    },
    /// Raw magnification byte, high nibble for width and low nibble for height (both zero based). Equivalent to GS !
    SizeRaw {
        n: u8
    },
    /// Set an international character set, Equivalent to ESC R
    SelectCharset {
        /// Character set to be set
        charset: Charset
    },
    /// Selects a different code table, Equivalent to FS . followed by ESC t
    SelectCodeTable {
        code_table: CodeTable
    },
    /// Enables the double byte (kanji/GBK) mode. Equivalent to FS &
    DoubleByteOn,
    /// Position of the human readable text around barcodes. Equivalent to GS H
    HriPosition {
        position: u8
    },
    /// Announces `length` barcode bytes of symbology `m`. Equivalent to GS k m n
    Barcode {
        m: u8,
        length: u8
    },
    /// QR function 165. Equivalent to GS ( k 04 00 31 41 n 00
    QrModel {
        model: u8
    },
    /// QR function 167. Equivalent to GS ( k 03 00 31 43 n
    QrModuleSize {
        size: u8
    },
    /// QR function 169. Equivalent to GS ( k 03 00 31 45 n
    QrErrorCorrection {
        level: u8
    },
    /// QR function 180, announces `length` bytes of data. Equivalent to GS ( k pL pH 31 50 30
    QrStore {
        length: u16
    },
    /// QR function 181. Equivalent to GS ( k 03 00 31 51 30
    QrPrint,
    /// Announces a raster block, `width` in bytes and `height` in rows. Equivalent to GS v 0 0
    Raster {
        width: u16,
        height: u16
    }
}

impl Command {
    pub fn as_bytes(&self) -> Vec<u8> {
        match self {
            Command::Initialize => vec![ESC, 0x40],
            Command::Cut => vec![GS, 0x56, 0x41, 0x96],
            Command::DocumentEnd => vec![GS, 0x56, 0x41, 0x00],
            Command::LineFeed => vec![0x0a],
            Command::Feed{lines} => vec![ESC, 0x64, *lines],
            Command::Justify{justification} => vec![ESC, 0x61, justification.as_byte()],
            Command::Bold{on} => vec![ESC, 0x45, *on as u8],
            Command::Underline{underline} => vec![ESC, 0x2d, underline.as_byte()],
            Command::Reverse{on} => vec![GS, 0x42, *on as u8],
            Command::Rotate{on} => vec![ESC, 0x56, *on as u8],
            Command::UpsideDown{on} => vec![ESC, 0x7b, *on as u8],
            Command::Size{width, height} => {
                let width = (*width).max(1).min(8) - 1;
                let height = (*height).max(1).min(8) - 1;
                vec![GS, 0x21, (width << 4) | height]
            },
            Command::SizeRaw{n} => vec![GS, 0x21, *n],
            Command::SelectCharset{charset} => {
                let mut res = vec![ESC, 0x52];
                res.append(&mut charset.as_bytes());
                res
            },
            Command::SelectCodeTable{code_table} => {
                // Leaving double byte mode first, otherwise the table is ignored
                let mut res = vec![FS, 0x2e, ESC, 0x74];
                res.append(&mut code_table.as_bytes());
                res
            },
            Command::DoubleByteOn => vec![FS, 0x26],
            Command::HriPosition{position} => vec![GS, 0x48, *position],
            Command::Barcode{m, length} => vec![GS, 0x6b, *m, *length],
            Command::QrModel{model} => vec![GS, 0x28, 0x6b, 0x04, 0x00, 0x31, 0x41, *model, 0x00],
            Command::QrModuleSize{size} => vec![GS, 0x28, 0x6b, 0x03, 0x00, 0x31, 0x43, *size],
            Command::QrErrorCorrection{level} => vec![GS, 0x28, 0x6b, 0x03, 0x00, 0x31, 0x45, *level],
            Command::QrStore{length} => {
                // The parameter count includes cn, fn and m
                let total = *length as u32 + 3;
                vec![GS, 0x28, 0x6b, (total % 256) as u8, (total / 256) as u8, 0x31, 0x50, 0x30]
            },
            Command::QrPrint => vec![GS, 0x28, 0x6b, 0x03, 0x00, 0x31, 0x51, 0x30],
            Command::Raster{width, height} => vec![
                GS, 0x76, 0x30, 0x00,
                (width % 256) as u8, (width / 256) as u8, // xL, xH
                (height % 256) as u8, (height / 256) as u8 // yL, yH
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn size_packs_zero_based_nibbles() {
        assert_eq!(Command::Size{width: 1, height: 1}.as_bytes(), vec![GS, 0x21, 0x00]);
        assert_eq!(Command::Size{width: 2, height: 3}.as_bytes(), vec![GS, 0x21, 0x12]);
        assert_eq!(Command::Size{width: 8, height: 8}.as_bytes(), vec![GS, 0x21, 0x77]);
    }

    #[test]
    fn size_clamps_out_of_range_values() {
        assert_eq!(Command::Size{width: 0, height: 0}.as_bytes(), vec![GS, 0x21, 0x00]);
        assert_eq!(Command::Size{width: 12, height: 9}.as_bytes(), vec![GS, 0x21, 0x77]);
    }

    #[test]
    fn qr_store_length_counts_header_bytes() {
        assert_eq!(Command::QrStore{length: 13}.as_bytes(), vec![GS, 0x28, 0x6b, 16, 0, 0x31, 0x50, 0x30]);
        let long = Command::QrStore{length: 300}.as_bytes();
        assert_eq!((long[3], long[4]), (47, 1));
    }

    #[test]
    fn raster_header_is_little_endian() {
        assert_eq!(Command::Raster{width: 72, height: 300}.as_bytes(), vec![GS, 0x76, 0x30, 0x00, 72, 0, 44, 1]);
    }

    #[test]
    fn document_end_differs_from_cut() {
        assert_eq!(Command::DocumentEnd.as_bytes(), vec![GS, b'V', b'A', 0x00]);
        assert_eq!(Command::Cut.as_bytes(), vec![GS, b'V', b'A', 0x96]);
    }
}
