//! Full markdown documents, tables included, rendered in a single tree walk

use std::io::Write;
use log::warn;
use pulldown_cmark::{Event, Options, Parser, Tag};
use crate::{Error, Printer, command::Command};
use super::table::{cell_text, column_widths, tabs_needed};

/// Document tree
///
/// Built once per input, walked once, then dropped. Markdown constructs without an output of their own (paragraphs, emphasis, lists, links...) are kept as [Group](Node::Group) so their text still gets rendered.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Document(Vec<Node>),
    Heading {
        /// 1 to 6
        level: u8,
        children: Vec<Node>
    },
    /// Raw utf-8 bytes, written verbatim
    Text(Vec<u8>),
    Table(Vec<Node>),
    TableHeaderRow(Vec<Node>),
    TableRow(Vec<Node>),
    /// Well formed cells hold exactly one [Text](Node::Text)
    TableCell(Vec<Node>),
    Group(Vec<Node>)
}

impl Node {
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Text(_) => &[],
            Node::Heading{children, ..} => children,
            Node::Document(children) | Node::Table(children) | Node::TableHeaderRow(children)
                | Node::TableRow(children) | Node::TableCell(children) | Node::Group(children) => children
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Text(_) => None,
            Node::Heading{children, ..} => Some(children),
            Node::Document(children) | Node::Table(children) | Node::TableHeaderRow(children)
                | Node::TableRow(children) | Node::TableCell(children) | Node::Group(children) => Some(children)
        }
    }
}

impl Drop for Node {
    // Nesting depth only depends on the input, so the tree is torn down without recursion
    fn drop(&mut self) {
        let mut pending = match self.children_mut() {
            Some(children) => std::mem::take(children),
            None => return
        };
        while let Some(mut node) = pending.pop() {
            if let Some(children) = node.children_mut() {
                pending.append(children);
            }
        }
    }
}

/// Open node while the event stream is consumed
enum Frame {
    Document,
    Heading(u8),
    Table,
    TableHeaderRow,
    TableRow,
    TableCell,
    CodeBlock,
    Group
}

impl Frame {
    fn into_node(self, children: Vec<Node>) -> Node {
        match self {
            Frame::Document => Node::Document(children),
            Frame::Heading(level) => Node::Heading{level, children},
            Frame::Table => Node::Table(children),
            Frame::TableHeaderRow => Node::TableHeaderRow(children),
            Frame::TableRow => Node::TableRow(children),
            Frame::TableCell => Node::TableCell(children),
            Frame::CodeBlock | Frame::Group => Node::Group(children)
        }
    }
}

/// Parses markdown (with tables and strikethrough) into a [Node::Document]
///
/// ```rust
/// use escpos_markdown::markdown::{parse_document, Node};
///
/// let tree = parse_document("# Hi");
/// assert_eq!(tree, Node::Document(vec![
///     Node::Heading{level: 1, children: vec![Node::Text(b"Hi".to_vec())]}
/// ]));
/// ```
pub fn parse_document(markdown: &str) -> Node {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH);
    let mut stack: Vec<(Frame, Vec<Node>)> = vec![(Frame::Document, Vec::new())];
    // Consecutive text events belong to the same text node
    let mut extend_text = false;

    for event in parser {
        let mut text_event = false;
        match event {
            Event::Start(tag) => {
                let frame = match tag {
                    Tag::Heading{level, ..} => Frame::Heading(level as u8),
                    Tag::Table(_) => Frame::Table,
                    Tag::TableHead => Frame::TableHeaderRow,
                    Tag::TableRow => Frame::TableRow,
                    Tag::TableCell => Frame::TableCell,
                    Tag::CodeBlock(_) => Frame::CodeBlock,
                    _ => Frame::Group
                };
                stack.push((frame, Vec::new()));
            },
            Event::End(_) => {
                // The document frame is never closed by an event
                if stack.len() > 1 {
                    if let Some((frame, mut children)) = stack.pop() {
                        if let Frame::CodeBlock = frame {
                            if let Some(Node::Text(text)) = children.last_mut() {
                                while text.last() == Some(&b'\n') {
                                    text.pop();
                                }
                            }
                        }
                        if let Some((_, parent)) = stack.last_mut() {
                            parent.push(frame.into_node(children));
                        }
                    }
                }
            },
            Event::Text(text) => {
                if let Some((_, children)) = stack.last_mut() {
                    match children.last_mut() {
                        Some(Node::Text(previous)) if extend_text => previous.extend_from_slice(text.as_bytes()),
                        _ => children.push(Node::Text(text.as_bytes().to_vec()))
                    }
                }
                text_event = true;
            },
            Event::Code(code) => {
                if let Some((_, children)) = stack.last_mut() {
                    children.push(Node::Group(vec![Node::Text(code.as_bytes().to_vec())]));
                }
            },
            // Breaks, rules, html, footnotes and task markers have no output
            _ => ()
        }
        extend_text = text_event;
    }

    // Unbalanced streams should not happen, close whatever is still open
    while stack.len() > 1 {
        if let Some((frame, children)) = stack.pop() {
            if let Some((_, parent)) = stack.last_mut() {
                parent.push(frame.into_node(children));
            }
        }
    }
    match stack.pop() {
        Some((frame, children)) => frame.into_node(children),
        None => Node::Document(Vec::new())
    }
}

/// Output of a document walk
#[derive(Debug)]
pub struct RenderedDocument {
    /// Complete command stream, trailer included
    pub bytes: Vec<u8>,
    /// [MalformedTableCell](crate::Error::MalformedTableCell) anomalies, already skipped
    pub malformed_cells: Vec<Error>,
    /// Headings rendered. Each one leaves the device at 1x1 magnification.
    pub headings: usize
}

#[derive(PartialEq)]
enum WalkStatus {
    Continue,
    SkipChildren
}

/// Walker state: the output, plus the layout of the table being walked
struct Walker {
    bytes: Vec<u8>,
    malformed_cells: Vec<Error>,
    headings: usize,
    /// Column widths of the current table, computed once when entering it
    column_widths: Vec<usize>,
    row: usize,
    column: usize
}

impl Walker {
    /// Depth first, with an explicit stack of `(node, entered)` frames
    fn walk(&mut self, root: &Node) {
        let mut stack: Vec<(&Node, bool)> = vec![(root, false)];
        while let Some((node, entered)) = stack.pop() {
            if entered {
                self.exit(node);
                continue;
            }
            let status = self.enter(node);
            stack.push((node, true));
            if status == WalkStatus::Continue {
                stack.extend(node.children().iter().rev().map(|child| (child, false)));
            }
        }
    }

    fn enter(&mut self, node: &Node) -> WalkStatus {
        match node {
            Node::Document(_) | Node::Group(_) => WalkStatus::Continue,
            Node::Heading{level, ..} => {
                let level = 6u8.saturating_sub(*level);
                self.bytes.extend_from_slice(&Command::SizeRaw{n: (level << 4) | level}.as_bytes());
                WalkStatus::Continue
            },
            Node::Text(text) => {
                self.bytes.extend_from_slice(text);
                WalkStatus::Continue
            },
            Node::Table(rows) => {
                self.column_widths = column_widths(rows);
                self.row = 0;
                WalkStatus::Continue
            },
            Node::TableHeaderRow(_) | Node::TableRow(_) => {
                self.column = 0;
                WalkStatus::Continue
            },
            Node::TableCell(children) => {
                match cell_text(node) {
                    Some(text) => {
                        self.bytes.extend_from_slice(text);
                        if let Some(max_width) = self.column_widths.get(self.column) {
                            let tabs = tabs_needed(*max_width, text.len());
                            self.bytes.extend(std::iter::repeat(b'\t').take(tabs));
                        }
                    },
                    None => {
                        let anomaly = Error::MalformedTableCell{row: self.row, column: self.column, children: children.len()};
                        warn!("{}, skipping it", anomaly);
                        self.malformed_cells.push(anomaly);
                    }
                }
                // The text is already written
                WalkStatus::SkipChildren
            }
        }
    }

    fn exit(&mut self, node: &Node) {
        match node {
            Node::Document(_) => self.bytes.extend_from_slice(&Command::DocumentEnd.as_bytes()),
            Node::Heading{..} => {
                self.bytes.extend_from_slice(&Command::SizeRaw{n: 0}.as_bytes());
                self.bytes.extend_from_slice(&Command::LineFeed.as_bytes());
                self.headings += 1;
            },
            Node::Text(_) => self.bytes.extend_from_slice(&Command::LineFeed.as_bytes()),
            Node::Table(_) => self.column_widths.clear(),
            Node::TableHeaderRow(_) | Node::TableRow(_) => {
                self.bytes.extend_from_slice(&Command::LineFeed.as_bytes());
                self.row += 1;
            },
            Node::TableCell(_) => self.column += 1,
            Node::Group(_) => ()
        }
    }
}

/// Walks an already built tree
pub fn render_tree(root: &Node) -> RenderedDocument {
    let mut walker = Walker {
        bytes: Vec::new(),
        malformed_cells: Vec::new(),
        headings: 0,
        column_widths: Vec::new(),
        row: 0,
        column: 0
    };
    walker.walk(root);
    RenderedDocument {
        bytes: walker.bytes,
        malformed_cells: walker.malformed_cells,
        headings: walker.headings
    }
}

/// Parses and renders a markdown document
///
/// ```rust
/// use escpos_markdown::markdown::render_document;
///
/// let rendered = render_document("# Title\n");
/// assert_eq!(rendered.bytes, vec![
///     0x1d, b'!', 0x55, b'T', b'i', b't', b'l', b'e', 0x0a, 0x1d, b'!', 0x00, 0x0a,
///     0x1d, b'V', b'A', 0x00
/// ]);
/// ```
pub fn render_document(markdown: &str) -> RenderedDocument {
    render_tree(&parse_document(markdown))
}

impl<W: Write> Printer<W> {
    /// Renders a whole markdown document, tables included, and appends it to the command stream
    ///
    /// Text is passed through as utf-8, regardless of the active character table. Headings leave the device at 1x1 magnification, and the session style follows; nothing else in it changes. Malformed table cells are logged and skipped. Returns the bytes appended.
    pub fn write_document(&mut self, markdown: &str) -> Result<usize, Error> {
        let rendered = render_document(markdown);
        let written = self.write_raw(&rendered.bytes);
        if rendered.headings > 0 {
            self.track_size(1, 1);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TRAILER: [u8; 4] = [0x1d, b'V', b'A', 0x00];

    fn text(value: &str) -> Node {
        Node::Text(value.as_bytes().to_vec())
    }

    #[test]
    fn paragraphs_are_transparent() {
        let tree = parse_document("hello\nworld");
        assert_eq!(tree, Node::Document(vec![Node::Group(vec![text("hello"), text("world")])]));
        let mut expected = b"hello\nworld\n".to_vec();
        expected.extend_from_slice(&TRAILER);
        assert_eq!(render_tree(&tree).bytes, expected);
    }

    #[test]
    fn heading_levels_map_to_magnification() {
        let bytes = render_document("###### six").bytes;
        assert_eq!(bytes[..3].to_vec(), vec![0x1d, b'!', 0x00]);
        let bytes = render_document("## two").bytes;
        assert_eq!(bytes[..3].to_vec(), vec![0x1d, b'!', 0x44]);
    }

    #[test]
    fn emphasis_text_is_rendered() {
        let mut expected = b"a \nb\n".to_vec();
        expected.extend_from_slice(&TRAILER);
        assert_eq!(render_document("a **b**").bytes, expected);
    }

    #[test]
    fn table_tree_shape() {
        let tree = parse_document("| A | B |\n|---|---|\n| x | y |\n");
        assert_eq!(tree, Node::Document(vec![Node::Table(vec![
            Node::TableHeaderRow(vec![Node::TableCell(vec![text("A")]), Node::TableCell(vec![text("B")])]),
            Node::TableRow(vec![Node::TableCell(vec![text("x")]), Node::TableCell(vec![text("y")])])
        ])]));
    }

    #[test]
    fn table_cells_are_padded_to_tab_stops() {
        let rendered = render_document("| Item | Qty |\n|---|---|\n| Sandwich | 1 |\n| Tea | 12 |\n");
        let mut expected = Vec::new();
        expected.extend_from_slice(b"Item\t\tQty\t\n");
        expected.extend_from_slice(b"Sandwich\t1\t\n");
        expected.extend_from_slice(b"Tea\t\t12\t\n");
        expected.extend_from_slice(&TRAILER);
        assert_eq!(rendered.bytes, expected);
        assert!(rendered.malformed_cells.is_empty());
    }

    #[test]
    fn malformed_cell_is_skipped() {
        let rendered = render_document("| A | B |\n|---|---|\n| **x** y | z |\n| w | v |\n");
        let mut expected = Vec::new();
        expected.extend_from_slice(b"A\tB\t\n");
        expected.extend_from_slice(b"z\t\n");
        expected.extend_from_slice(b"w\tv\t\n");
        expected.extend_from_slice(&TRAILER);
        assert_eq!(rendered.bytes, expected);
        assert_eq!(rendered.malformed_cells.len(), 1);
        match &rendered.malformed_cells[0] {
            Error::MalformedTableCell{row, column, children} => assert_eq!((*row, *column, *children), (1, 0, 2)),
            other => panic!("unexpected anomaly {:?}", other)
        }
    }

    #[test]
    fn empty_cells_are_malformed() {
        let rendered = render_document("| A | B |\n|---|---|\n|  | z |\n");
        assert_eq!(rendered.malformed_cells.len(), 1);
    }

    #[test]
    fn code_blocks_lose_the_trailing_newline() {
        let mut expected = b"a\nb\n".to_vec();
        expected.extend_from_slice(&TRAILER);
        assert_eq!(render_document("```\na\nb\n```\n").bytes, expected);
    }

    #[test]
    fn code_spans_become_text() {
        let mut expected = b"run \nls\n".to_vec();
        expected.extend_from_slice(&TRAILER);
        assert_eq!(render_document("run `ls`").bytes, expected);
    }

    #[test]
    fn empty_document_is_only_the_trailer() {
        assert_eq!(render_document("").bytes, TRAILER.to_vec());
    }

    #[test]
    fn printer_appends_verbatim() {
        let mut printer = Printer::new(Vec::new(), crate::PrinterProfile::default());
        printer.bold(true);
        let written = printer.write_document("你好").unwrap();
        assert_eq!(written, "你好".len() + 1 + TRAILER.len());
        assert!(printer.style().bold);
    }

    #[test]
    fn headings_reset_the_tracked_size() {
        let mut printer = Printer::new(Vec::new(), crate::PrinterProfile::default());
        printer.size(2, 2).bold(true);
        printer.write_document("# a").unwrap();
        assert_eq!((printer.style().width, printer.style().height), (1, 1));
        assert!(printer.style().bold);

        let mut printer = Printer::new(Vec::new(), crate::PrinterProfile::default());
        printer.size(2, 2);
        printer.write_document("no heading").unwrap();
        assert_eq!((printer.style().width, printer.style().height), (2, 2));
    }

    #[test]
    fn header_cells_do_not_widen_columns() {
        let rendered = render_document("| Description | Q |\n|---|---|\n| a | 1 |\n");
        let mut expected = b"Description\tQ\t\na\t1\t\n".to_vec();
        expected.extend_from_slice(&TRAILER);
        assert_eq!(rendered.bytes, expected);
    }

    #[test]
    fn deep_nesting_is_walked_without_recursion() {
        let markdown = ">".repeat(50_000) + " x";
        let rendered = render_document(&markdown);
        let mut expected = b"x\n".to_vec();
        expected.extend_from_slice(&TRAILER);
        assert_eq!(rendered.bytes, expected);
        assert_eq!(rendered.headings, 0);
    }
}
