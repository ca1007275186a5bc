use serde::{Serialize, Deserialize};
use crate::{Error, command::Command};

/// Numeric retail symbologies
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbology {
    UpcA,
    Ean13,
    Ean8
}

impl Symbology {
    pub fn name(&self) -> &'static str {
        match self {
            Symbology::UpcA => "UPC-A",
            Symbology::Ean13 => "EAN-13",
            Symbology::Ean8 => "EAN-8"
        }
    }

    /// Digit count including the check digit
    pub fn full_length(&self) -> usize {
        match self {
            Symbology::UpcA => 12,
            Symbology::Ean13 => 13,
            Symbology::Ean8 => 8
        }
    }

    pub(crate) fn accepted_lengths_str(&self) -> String {
        format!("{} or {}", self.full_length() - 1, self.full_length())
    }

    /// Symbology byte `m` of GS k, function B
    fn m(&self) -> u8 {
        match self {
            Symbology::UpcA => 65,
            Symbology::Ean13 => 67,
            Symbology::Ean8 => 68
        }
    }
}

/// Where the human readable digits go
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum HriPosition {
    None,
    Above,
    Below,
    Both
}

impl HriPosition {
    pub fn as_byte(&self) -> u8 {
        match self {
            HriPosition::None => 0,
            HriPosition::Above => 1,
            HriPosition::Below => 2,
            HriPosition::Both => 3
        }
    }
}

impl Default for HriPosition {
    fn default() -> HriPosition {
        HriPosition::Below
    }
}

/// Modulo 10 check digit shared by UPC-A, EAN-13 and EAN-8
///
/// Weights alternate 3 and 1 starting from the rightmost payload digit. `payload` must not contain the check digit, nor anything but ascii digits.
///
/// ```rust
/// use escpos_markdown::graphics::check_digit;
///
/// assert_eq!(check_digit(b"12345678901"), 2);
/// assert_eq!(check_digit(b"123456789012"), 8);
/// ```
pub fn check_digit(payload: &[u8]) -> u8 {
    let sum: u32 = payload.iter().rev().enumerate().map(|(idx, digit)| {
        let value = (digit - b'0') as u32;
        if idx % 2 == 0 {
            value * 3
        } else {
            value
        }
    }).sum();
    ((10 - sum % 10) % 10) as u8
}

/// Validates a full digit string, check digit included
///
/// The builders never call this, a caller supplied check digit is trusted. It is here for callers that want to be strict.
pub fn validate_check_digit(symbology: Symbology, digits: &str) -> Result<bool, Error> {
    let digits = digits.as_bytes();
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(Error::InvalidBarcodeDigits{symbology});
    }
    if digits.len() != symbology.full_length() {
        return Err(Error::InvalidBarcodeLength{symbology, length: digits.len()});
    }
    let (payload, check) = digits.split_at(digits.len() - 1);
    Ok(check_digit(payload) == check[0] - b'0')
}

/// Validates the digits and appends the check digit when it is missing
pub fn complete_digits(symbology: Symbology, digits: &str) -> Result<Vec<u8>, Error> {
    let digits = digits.as_bytes();
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(Error::InvalidBarcodeDigits{symbology});
    }
    let full = symbology.full_length();
    let mut completed = digits.to_vec();
    if digits.len() == full - 1 {
        completed.push(b'0' + check_digit(digits));
    } else if digits.len() != full {
        return Err(Error::InvalidBarcodeLength{symbology, length: digits.len()});
    }
    Ok(completed)
}

/// Full command sequence for a barcode: HRI position, then the symbol itself
///
/// Nothing is produced when the digits are rejected.
pub fn barcode(symbology: Symbology, digits: &str, hri: HriPosition) -> Result<Vec<u8>, Error> {
    let completed = complete_digits(symbology, digits)?;
    let mut feed = Command::HriPosition{position: hri.as_byte()}.as_bytes();
    feed.extend_from_slice(&Command::Barcode{m: symbology.m(), length: completed.len() as u8}.as_bytes());
    feed.extend_from_slice(&completed);
    Ok(feed)
}
