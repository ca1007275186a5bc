extern crate serde;

use serde::{Serialize, Deserialize};

/// Single byte code tables, selected with ESC t
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodeTable {
    /// Page 0, the usual power-on table
    PC437,
    /// Page 16, western european
    WPC1252
}

impl CodeTable {
    /// Returns the byte representation of the esc/pos command
    pub fn as_bytes(&self) -> Vec<u8> {
        match self {
            CodeTable::PC437 => vec![0x00],
            CodeTable::WPC1252 => vec![0x10]
        }
    }
}
