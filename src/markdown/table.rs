//! Tab stop layout for table cells

use super::tree::Node;

/// Distance between tab stops, in characters
pub const TAB_WIDTH: usize = 8;

/// Longest text of every column, over the body rows
///
/// Header cells are not measured, a long header simply takes its single tab. Cells whose content is not a single text node do not count towards the width either, but still take their column position.
pub fn column_widths(rows: &[Node]) -> Vec<usize> {
    let mut widths: Vec<usize> = Vec::new();
    for row in rows {
        let cells = match row {
            Node::TableRow(cells) => cells,
            _ => continue
        };
        for (column, cell) in cells.iter().enumerate() {
            if let Some(text) = cell_text(cell) {
                if widths.len() <= column {
                    widths.resize(column + 1, 0);
                }
                widths[column] = widths[column].max(text.len());
            }
        }
    }
    widths
}

/// The text of a well formed cell: exactly one child, and it is text
pub fn cell_text(cell: &Node) -> Option<&[u8]> {
    match cell {
        Node::TableCell(children) => match children.as_slice() {
            [Node::Text(text)] => Some(text.as_slice()),
            _ => None
        },
        _ => None
    }
}

/// Tabs that take a cell of `cell_length` characters past the column's tab stop
///
/// The column ends on the first multiple of 8 strictly after its longest text. At least one tab is always emitted.
///
/// ```rust
/// use escpos_markdown::markdown::tabs_needed;
///
/// assert_eq!(tabs_needed(5, 5), 1);
/// assert_eq!(tabs_needed(12, 3), 2);
/// assert_eq!(tabs_needed(8, 8), 1);
/// ```
pub fn tabs_needed(max_width: usize, cell_length: usize) -> usize {
    let tab_stop = (max_width + 1 + TAB_WIDTH - 1) / TAB_WIDTH * TAB_WIDTH;
    let chars_to_next = tab_stop.saturating_sub(cell_length);
    let tabs = (chars_to_next + TAB_WIDTH - 1) / TAB_WIDTH;
    tabs.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cell(text: &str) -> Node {
        Node::TableCell(vec![Node::Text(text.as_bytes().to_vec())])
    }

    #[test]
    fn widths_cover_body_rows() {
        let rows = vec![
            Node::TableHeaderRow(vec![cell("Item"), cell("Qty")]),
            Node::TableRow(vec![cell("Sandwich"), cell("1")]),
            Node::TableRow(vec![cell("Tea"), cell("12345")])
        ];
        assert_eq!(column_widths(&rows), vec![8, 5]);
    }

    #[test]
    fn long_header_is_not_measured() {
        let rows = vec![
            Node::TableHeaderRow(vec![cell("Description"), cell("Q")]),
            Node::TableRow(vec![cell("a"), cell("1")])
        ];
        assert_eq!(column_widths(&rows), vec![1, 1]);
        assert_eq!(tabs_needed(1, "Description".len()), 1);
    }

    #[test]
    fn malformed_cells_keep_their_column() {
        let rows = vec![
            Node::TableRow(vec![Node::TableCell(vec![]), cell("ab")]),
            Node::TableRow(vec![Node::TableCell(vec![Node::Text(b"x".to_vec()), Node::Text(b"y".to_vec())]), cell("abc")])
        ];
        assert_eq!(column_widths(&rows), vec![0, 3]);
    }

    #[test]
    fn every_cell_reaches_the_tab_stop() {
        for max in 0..40 {
            let tab_stop = (max + 1 + 7) / 8 * 8;
            for length in 0..=max {
                let tabs = tabs_needed(max, length);
                assert!(tabs >= 1);
                assert!(length + tabs * 8 >= tab_stop, "max {} length {}", max, length);
            }
        }
    }

    #[test]
    fn tab_stops_fall_after_the_longest_text() {
        // "Sandwich" fills the first stop, so the column ends at 16
        assert_eq!(tabs_needed(8, 8), 1);
        assert_eq!(tabs_needed(8, 3), 2);
        assert_eq!(tabs_needed(7, 3), 1);
    }
}
