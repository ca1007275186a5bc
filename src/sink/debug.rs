use std::io;
use std::fmt::Write as _;

/// Captures the command stream instead of printing it
///
/// ```rust
/// use escpos_markdown::{Printer, PrinterProfile, sink::DebugSink};
///
/// let mut printer = Printer::new(DebugSink::new(), PrinterProfile::default());
/// printer.write("Hi")?;
/// printer.line_feed();
/// printer.print()?;
/// assert_eq!(printer.sink().hex_string(), "48690a");
/// # Ok::<(), escpos_markdown::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct DebugSink {
    buffer: Vec<u8>
}

impl DebugSink {
    pub fn new() -> DebugSink {
        DebugSink::default()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Lowercase hex, no separators
    pub fn hex_string(&self) -> String {
        self.buffer.iter().fold(String::with_capacity(self.buffer.len() * 2), |mut hex, byte| {
            let _ = write!(hex, "{:02x}", byte);
            hex
        })
    }

    /// Offset, 16 bytes in hex and their ascii column, per line
    pub fn hex_dump(&self) -> String {
        let mut dump = String::new();
        for (line, chunk) in self.buffer.chunks(16).enumerate() {
            let _ = write!(dump, "{:08x}  ", line * 16);
            for idx in 0..16 {
                match chunk.get(idx) {
                    Some(byte) => {
                        let _ = write!(dump, "{:02x} ", byte);
                    },
                    None => dump.push_str("   ")
                }
                if idx == 7 {
                    dump.push(' ');
                }
            }
            dump.push_str(" |");
            dump.extend(chunk.iter().map(|byte| match byte {
                0x20..=0x7e => *byte as char,
                _ => '.'
            }));
            dump.push_str("|\n");
        }
        dump
    }

    /// Hex string, hex dump, and the stream as text with control bytes escaped
    pub fn pretty_print(&self) -> String {
        let mut result = String::new();
        result.push_str("Raw bytes (hex): ");
        result.push_str(&self.hex_string());
        result.push_str("\n\nHex dump:\n");
        result.push_str(&self.hex_dump());
        result.push_str("\nPrintable ASCII:\n");
        for byte in &self.buffer {
            match byte {
                0x20..=0x7e => result.push(*byte as char),
                b'\n' => result.push_str("\\n\n"),
                b'\r' => result.push_str("\\r"),
                b'\t' => result.push_str("\\t"),
                _ => {
                    let _ = write!(result, "\\x{:02x}", byte);
                }
            }
        }
        result
    }
}

impl io::Write for DebugSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
