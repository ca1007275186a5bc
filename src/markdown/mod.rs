//! Markdown to esc/pos
//!
//! Two renderers live here. [write_markdown](crate::Printer::write_markdown) works line by line, restyling every line through the printer and stripping inline markers. [write_document](crate::Printer::write_document) parses the whole document, tables included, and walks the tree; it emits raw sizes for headings and only records the 1x1 size they leave behind.

pub use self::line::{Line, strip_inline, RULE_LINE};
pub use self::table::{column_widths, tabs_needed, TAB_WIDTH};
pub use self::tree::{Node, parse_document, render_document, render_tree, RenderedDocument};

mod line;
mod table;
mod tree;
