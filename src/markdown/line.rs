//! Line by line markdown, every line styled on its own

use std::io::Write;
use std::sync::LazyLock;
use regex::Regex;
use crate::{Error, Printer, Justification};

static HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("invalid header regex"));
static RULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-{3,}$|^\*{3,}$|^_{3,}$").expect("invalid rule regex"));
static UNORDERED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*]\s+(.+)$").expect("invalid list regex"));
static ORDERED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(\d+)\.\s+(.+)$").expect("invalid list regex"));

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*|__([^_]+)__").expect("invalid bold regex"));
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*|_([^_]+)_").expect("invalid italic regex"));
static STRIKE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~~([^~]+)~~").expect("invalid strikethrough regex"));
static CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("invalid code regex"));

/// Printed for horizontal rules, centered
pub const RULE_LINE: &str = "----------------------------------------";

/// What a single line of markdown turned out to be
#[derive(Clone, Debug, PartialEq)]
pub enum Line<'a> {
    Empty,
    Header {
        level: usize,
        text: &'a str
    },
    Rule,
    UnorderedItem(&'a str),
    OrderedItem {
        number: u64,
        text: &'a str
    },
    CodeFence(&'a str),
    Paragraph(&'a str)
}

impl<'a> Line<'a> {
    /// Classifies a line, first match wins
    ///
    /// ```rust
    /// use escpos_markdown::markdown::Line;
    ///
    /// assert_eq!(Line::parse("## Menu"), Line::Header{level: 2, text: "Menu"});
    /// assert_eq!(Line::parse("  ---  "), Line::Rule);
    /// assert_eq!(Line::parse("3. eggs"), Line::OrderedItem{number: 3, text: "eggs"});
    /// ```
    pub fn parse(line: &'a str) -> Line<'a> {
        let line = line.trim();
        if line.is_empty() {
            return Line::Empty;
        }
        if let Some(caps) = HEADER.captures(line) {
            if let (Some(hashes), Some(text)) = (caps.get(1), caps.get(2)) {
                return Line::Header{level: hashes.as_str().len(), text: text.as_str()};
            }
        }
        if RULE.is_match(line) {
            return Line::Rule;
        }
        if let Some(text) = UNORDERED.captures(line).and_then(|caps| caps.get(1)) {
            return Line::UnorderedItem(text.as_str());
        }
        if let Some(caps) = ORDERED.captures(line) {
            if let (Some(number), Some(text)) = (caps.get(1), caps.get(2)) {
                // Numbers too long for u64 print as 0
                let number = number.as_str().parse().unwrap_or(0);
                return Line::OrderedItem{number, text: text.as_str()};
            }
        }
        if line.starts_with("```") {
            return Line::CodeFence(line);
        }
        Line::Paragraph(line)
    }
}

/// Removes emphasis, strikethrough and inline code markers, keeping the text inside
///
/// ```rust
/// use escpos_markdown::markdown::strip_inline;
///
/// assert_eq!(strip_inline("**big** _news_ ~~old~~ `x`"), "big news old x");
/// ```
pub fn strip_inline(text: &str) -> String {
    let text = BOLD.replace_all(text, "${1}${2}");
    let text = ITALIC.replace_all(&text, "${1}${2}");
    let text = STRIKE.replace_all(&text, "${1}");
    CODE.replace_all(&text, "${1}").into_owned()
}

impl<W: Write> Printer<W> {
    /// Renders markdown line by line
    ///
    /// Every line starts from the default style. Headers, rules, list items and code fences are recognized, inline markers are stripped from everything else. Line feeds separate the input lines, and the style in place before the call is restored (and sent to the device) at the end.
    ///
    /// Tables are not understood here, see [write_document](Printer::write_document).
    ///
    /// ```rust
    /// use escpos_markdown::{Printer, PrinterProfile};
    ///
    /// let mut printer = Printer::new(Vec::new(), PrinterProfile::default());
    /// printer.write_markdown("# Receipt\n- coffee")?;
    /// # Ok::<(), escpos_markdown::Error>(())
    /// ```
    pub fn write_markdown(&mut self, markdown: &str) -> Result<usize, Error> {
        let original_style = *self.style();
        let lines: Vec<&str> = markdown.split('\n').collect();
        let mut total_written = 0;

        for (idx, line) in lines.iter().enumerate() {
            total_written += self.markdown_line(Line::parse(line))?;
            if idx < lines.len() - 1 {
                total_written += self.line_feed();
            }
        }

        self.set_style(original_style);
        Ok(total_written)
    }

    fn markdown_line(&mut self, line: Line) -> Result<usize, Error> {
        if line == Line::Empty {
            return Ok(0);
        }
        self.reset_styles();
        match line {
            Line::Empty => Ok(0),
            Line::Header{level, text} => {
                match level {
                    1 => self.size(5, 5).bold(true),
                    2 => self.size(4, 4).bold(true),
                    3 => self.size(3, 3).bold(true),
                    4 => self.size(2, 2).bold(true),
                    5 => self.size(2, 1).bold(true),
                    _ => self.size(1, 1).bold(true).underline(1)
                };
                let written = self.write(text)?;
                let written = written + self.line_feed();
                self.reset_styles();
                Ok(written)
            },
            Line::Rule => {
                self.justify(Justification::Center);
                self.write(RULE_LINE)
            },
            Line::UnorderedItem(text) => {
                self.justify(Justification::Left);
                let bullet = self.charset().bullet();
                self.write(format!("{} {}", bullet, strip_inline(text)))
            },
            Line::OrderedItem{number, text} => {
                self.justify(Justification::Left);
                self.write(format!("{}. {}", number, strip_inline(text)))
            },
            Line::CodeFence(text) => self.write(text),
            Line::Paragraph(text) => {
                self.justify(Justification::Left);
                self.write(strip_inline(text))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PrinterProfile, Style};
    use pretty_assertions::assert_eq;

    fn render(markdown: &str) -> Vec<u8> {
        let mut printer = Printer::new(Vec::new(), PrinterProfile::default());
        printer.write_markdown(markdown).unwrap();
        printer.bytes().to_vec()
    }

    fn reset() -> Vec<u8> {
        let mut printer = Printer::new(Vec::new(), PrinterProfile::default());
        printer.reset_styles();
        printer.bytes().to_vec()
    }

    #[test]
    fn recognition_order() {
        assert_eq!(Line::parse("#nospace"), Line::Paragraph("#nospace"));
        assert_eq!(Line::parse("####### seven"), Line::Paragraph("####### seven"));
        assert_eq!(Line::parse("***"), Line::Rule);
        assert_eq!(Line::parse("* item"), Line::UnorderedItem("item"));
        assert_eq!(Line::parse("- **bold** item"), Line::UnorderedItem("**bold** item"));
        assert_eq!(Line::parse("```rust"), Line::CodeFence("```rust"));
        assert_eq!(Line::parse("   "), Line::Empty);
    }

    #[test]
    fn overflowing_item_number_prints_zero() {
        let line = "99999999999999999999999. big";
        assert_eq!(Line::parse(line), Line::OrderedItem{number: 0, text: "big"});
        let bytes = render(line);
        let start = reset().len() + 3;
        assert_eq!(bytes[start..start + 6].to_vec(), b"0. big".to_vec());
    }

    #[test]
    fn inline_markers_are_stripped_not_applied() {
        assert_eq!(strip_inline("__a__ *b* ~~c~~"), "a b c");
        assert_eq!(strip_inline("2 * 3 = 6"), "2 * 3 = 6");
    }

    #[test]
    fn paragraph_bytes() {
        let mut expected = reset();
        expected.extend_from_slice(&[0x1b, 0x61, 0x00]);
        expected.extend_from_slice(b"plain bold");
        // Style restored at the end
        expected.extend(reset());
        assert_eq!(render("plain **bold**"), expected);
    }

    #[test]
    fn header_level_one() {
        let mut expected = reset();
        expected.extend_from_slice(&[0x1d, 0x21, 0x44, 0x1b, 0x45, 0x01]);
        expected.extend_from_slice(b"Title\n");
        expected.extend(reset());
        expected.extend(reset());
        assert_eq!(render("# Title"), expected);
    }

    #[test]
    fn header_level_six_is_underlined() {
        let bytes = render("###### small");
        let start = reset().len();
        assert_eq!(bytes[start..start + 9].to_vec(), vec![0x1d, 0x21, 0x00, 0x1b, 0x45, 0x01, 0x1b, 0x2d, 0x01]);
    }

    #[test]
    fn empty_lines_only_get_separators() {
        let mut expected = vec![0x0a, 0x0a];
        expected.extend(reset());
        assert_eq!(render("\n\n"), expected);
    }

    #[test]
    fn bullet_follows_character_table() {
        let bytes = render("- tea");
        let start = reset().len() + 3;
        assert_eq!(bytes[start..start + 5].to_vec(), vec![0xf9, b' ', b't', b'e', b'a']);
    }

    #[test]
    fn rendering_twice_is_identical() {
        let mut printer = Printer::new(Vec::new(), PrinterProfile::default());
        printer.write_markdown("1. first **one**").unwrap();
        let first = printer.bytes().to_vec();
        printer.write_markdown("1. first **one**").unwrap();
        assert_eq!(printer.bytes()[first.len()..].to_vec(), first);
    }

    #[test]
    fn previous_style_is_restored() {
        let mut printer = Printer::new(Vec::new(), PrinterProfile::default());
        printer.bold(true).size(2, 2);
        let before = *printer.style();
        printer.write_markdown("# a\n---").unwrap();
        assert_eq!(*printer.style(), before);
        assert_ne!(before, Style::default());
    }

    #[test]
    fn unsupported_characters_abort() {
        let mut printer = Printer::new(Vec::new(), PrinterProfile::default());
        assert!(printer.write_markdown("ok\n你好\nnever").is_err());
    }
}
