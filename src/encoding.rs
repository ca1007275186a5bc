//! Text encoding for the printer's character tables

extern crate codepage_437;
extern crate encoding_rs;

use codepage_437::CP437_CONTROL;
use encoding_rs::{Encoding, GBK, WINDOWS_1252};
use serde::{Serialize, Deserialize};
use crate::{
    Error,
    command::{Command, CodeTable}
};

/// Character tables that text can be written with
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharacterSet {
    /// Single byte PC437, the power-on table. ASCII compatible.
    Cp437,
    /// Single byte western european table (windows-1252), for accented latin letters
    Weu,
    /// Double byte table for simplified chinese
    Gbk
}

impl Default for CharacterSet {
    fn default() -> CharacterSet {
        CharacterSet::Cp437
    }
}

impl CharacterSet {
    /// Command that makes the printer interpret following text with this table
    pub fn select_command(&self) -> Command {
        match self {
            CharacterSet::Cp437 => Command::SelectCodeTable{code_table: CodeTable::PC437},
            CharacterSet::Weu => Command::SelectCodeTable{code_table: CodeTable::WPC1252},
            CharacterSet::Gbk => Command::DoubleByteOn
        }
    }

    /// Glyph used to mark list items, always representable in this table
    pub fn bullet(&self) -> char {
        match self {
            CharacterSet::Cp437 => '\u{2219}',
            CharacterSet::Weu => '\u{2022}',
            CharacterSet::Gbk => '\u{00b7}'
        }
    }

    /// Encodes `text` with this table
    ///
    /// Fails on the first character that has no representation.
    ///
    /// ```rust
    /// use escpos_markdown::CharacterSet;
    ///
    /// assert_eq!(CharacterSet::Weu.encode("ñ").unwrap(), vec![0xf1]);
    /// assert!(CharacterSet::Cp437.encode("你").is_err());
    /// ```
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, Error> {
        match self {
            CharacterSet::Cp437 => {
                let mut result = Vec::with_capacity(text.len());
                for character in text.chars() {
                    match CP437_CONTROL.encode(character) {
                        Some(byte) => result.push(byte),
                        None => return Err(Error::UnsupportedCharacter{charset: *self, character})
                    }
                }
                Ok(result)
            },
            CharacterSet::Weu => self.encode_with(WINDOWS_1252, text),
            CharacterSet::Gbk => self.encode_with(GBK, text)
        }
    }

    fn encode_with(&self, encoding: &'static Encoding, text: &str) -> Result<Vec<u8>, Error> {
        let (bytes, _, had_errors) = encoding.encode(text);
        if !had_errors {
            return Ok(bytes.into_owned());
        }
        // encoding_rs replaces unmappable characters, we look for the culprit instead
        let mut buffer = [0u8; 4];
        let character = text.chars().find(|c| {
            let (_, _, failed) = encoding.encode(c.encode_utf8(&mut buffer));
            failed
        }).unwrap_or(char::REPLACEMENT_CHARACTER);
        Err(Error::UnsupportedCharacter{charset: *self, character})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cp437_keeps_ascii_and_control_bytes() {
        assert_eq!(CharacterSet::Cp437.encode("Hi\n\t!").unwrap(), b"Hi\n\t!".to_vec());
    }

    #[test]
    fn cp437_maps_box_drawing() {
        assert_eq!(CharacterSet::Cp437.encode("\u{2500}").unwrap(), vec![0xc4]);
    }

    #[test]
    fn weu_encodes_accents() {
        assert_eq!(CharacterSet::Weu.encode("¡Hola! é").unwrap(), vec![0xa1, b'H', b'o', b'l', b'a', b'!', b' ', 0xe9]);
    }

    #[test]
    fn gbk_encodes_double_bytes() {
        assert_eq!(CharacterSet::Gbk.encode("你好").unwrap(), vec![0xc4, 0xe3, 0xba, 0xc3]);
    }

    #[test]
    fn reports_the_offending_character() {
        match CharacterSet::Weu.encode("abc你") {
            Err(Error::UnsupportedCharacter{charset, character}) => {
                assert_eq!(charset, CharacterSet::Weu);
                assert_eq!(character, '你');
            },
            other => panic!("unexpected result {:?}", other)
        }
    }

    #[test]
    fn bullets_are_representable() {
        for charset in &[CharacterSet::Cp437, CharacterSet::Weu, CharacterSet::Gbk] {
            let bullet = charset.bullet().to_string();
            assert!(charset.encode(&bullet).is_ok(), "{:?}", charset);
        }
    }
}
