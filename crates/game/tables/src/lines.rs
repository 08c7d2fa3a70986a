//! Splits raw table text into non-empty delimited lines.

use csv::{ReaderBuilder, StringRecord};

/// One non-empty line of a table file.
pub(crate) struct Line {
    /// 1-based physical line number in the source text, for diagnostics.
    pub number: u64,
    pub cells: StringRecord,
}

impl Line {
    /// Returns the trimmed cell at `index`, or `""` if the line is shorter.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(str::trim).unwrap_or_default()
    }

    pub fn trimmed_cells(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(str::trim)
    }
}

/// Reads every non-empty line of `text`.
///
/// Quoted cells may contain the delimiter. Lines made only of whitespace are
/// dropped, so row indices count non-empty lines.
pub(crate) fn read_lines(text: &str, delimiter: u8) -> Result<Vec<Line>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut lines = Vec::new();
    for result in reader.records() {
        let cells = result?;
        if is_blank(&cells) {
            continue;
        }
        let number = cells.position().map_or(0, |position| position.line());
        lines.push(Line { number, cells });
    }

    Ok(lines)
}

fn is_blank(cells: &StringRecord) -> bool {
    cells.len() <= 1 && cells.iter().all(|cell| cell.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blank_lines_and_keeps_line_numbers() {
        let lines = read_lines("a,b\n\n   \nc,d\n", b',').unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].number, 1);
        assert!(lines[1].number > lines[0].number);
        assert_eq!(lines[1].cell(1), "d");
    }

    #[test]
    fn quoted_cells_keep_delimiters() {
        let lines = read_lines("1,\"Hello, world\"\n", b',').unwrap();
        assert_eq!(lines[0].cell(1), "Hello, world");
        assert_eq!(lines[0].cell(5), "");
    }

    #[test]
    fn rows_may_differ_in_length() {
        let lines = read_lines("a,b,c\n1\n", b',').unwrap();
        assert_eq!(lines[1].cells.len(), 1);
    }
}
