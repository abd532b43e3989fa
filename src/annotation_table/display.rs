use super::{AnnotationTable, Column};
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

const SPACE_PADDING: usize = 2;

/// Plain-text rendering of an [`AnnotationTable`], transposed so that each
/// attribute is a line and each token a column.
//
// i(index)        0     1
// orth(テキスト)  猫    鳴く
// pos(品詞)       名詞  動詞
//
// Columns are padded by display width, so full-width text stays aligned.
pub struct AnnotationTableDisplay<'a> {
    table: &'a AnnotationTable,
    include_columns: Vec<Column>,
}

impl<'a> AnnotationTableDisplay<'a> {
    pub fn new(table: &'a AnnotationTable) -> Self {
        AnnotationTableDisplay {
            table,
            include_columns: Vec::new(),
        }
    }

    /// Restrict the output to `column` (and any other included columns).
    /// Without any includes every column is shown.
    pub fn include(&mut self, column: Column) {
        if !self.include_columns.contains(&column) {
            self.include_columns.push(column);
        }
    }

    /// Takes self
    pub fn with(mut self, column: Column) -> Self {
        self.include(column);
        self
    }

    fn columns(&self) -> Vec<Column> {
        if self.include_columns.is_empty() {
            return Column::ALL.to_vec();
        }
        // keep table order regardless of include order
        Column::ALL
            .iter()
            .copied()
            .filter(|column| self.include_columns.contains(column))
            .collect()
    }
}

fn pad(line: &mut String, text: &str, width: usize) {
    line.push_str(text);
    let used = UnicodeWidthStr::width(text);
    line.extend(std::iter::repeat(' ').take(width.saturating_sub(used)));
}

impl<'a> std::fmt::Display for AnnotationTableDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let columns = self.columns();
        let rows = self.table.rows();

        let header_width = columns
            .iter()
            .map(|column| UnicodeWidthStr::width(column.header()))
            .max()
            .unwrap_or(0);

        // one display column per token, as wide as its widest shown cell
        let token_widths: Vec<usize> = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|column| UnicodeWidthStr::width(row.get(*column)))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        for (line_idx, column) in columns.iter().enumerate() {
            if line_idx > 0 {
                f.write_char('\n')?;
            }

            let mut line = String::new();
            pad(&mut line, column.header(), header_width + SPACE_PADDING);
            for (row, width) in rows.iter().zip(&token_widths) {
                pad(&mut line, row.get(*column), width + SPACE_PADDING);
            }

            f.write_str(line.trim_end_matches(' '))?;
        }

        Ok(())
    }
}
