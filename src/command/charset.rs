extern crate serde;

use serde::{Serialize, Deserialize};

/// International character sets, selected with ESC R
///
/// They replace a handful of ASCII positions (`#`, `$`, `@`, `[`, ...) with national symbols. The code table stays untouched.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Charset {
    /// United states of america
    USA,
    France,
    Germany,
    /// United Kingdom
    UK,
    /// 1st possibility for Denmark
    Denmark1,
    Sweden,
    Italy,
    /// 1st possibility for Spain
    Spain1,
    Japan,
    Norway,
    /// 2nd possibility for Denmark
    Denmark2,
    /// 2nd possibility for Spain
    Spain2,
    LatinAmerica,
    Korea,
    /// Slovenia or Croatia
    SloveniaCroatia,
    China,
    Vietnam,
    Arabia
}

impl Charset {
    /// Parameter byte for ESC R
    pub fn as_byte(&self) -> u8 {
        match self {
            Charset::USA => 0x00,
            Charset::France => 0x01,
            Charset::Germany => 0x02,
            Charset::UK => 0x03,
            Charset::Denmark1 => 0x04,
            Charset::Sweden => 0x05,
            Charset::Italy => 0x06,
            Charset::Spain1 => 0x07,
            Charset::Japan => 0x08,
            Charset::Norway => 0x09,
            Charset::Denmark2 => 0x0a,
            Charset::Spain2 => 0x0b,
            Charset::LatinAmerica => 0x0c,
            Charset::Korea => 0x0d,
            Charset::SloveniaCroatia => 0x0e,
            Charset::China => 0x0f,
            Charset::Vietnam => 0x10,
            Charset::Arabia => 0x11
        }
    }

    /// Returns the byte representation of the esc/pos command
    pub fn as_bytes(&self) -> Vec<u8> {
        vec![self.as_byte()]
    }
}
