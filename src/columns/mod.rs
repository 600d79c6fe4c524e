pub mod ssh;
pub mod x509;

pub use ssh::SshColumn;
pub use x509::X509Column;

use crate::config::ExportConfig;
use colored::Color;

/// Horizontal alignment of a column's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// One report column: visibility, title, cell content and presentation.
///
/// Every renderer walks the same `visible_columns` list, so a column is
/// either present in header, separator and rows alike, or absent from all.
pub trait ColumnSpec: Copy + 'static {
    type Record;

    /// All columns of this kind, in display order.
    fn all() -> &'static [Self];

    fn is_shown(&self, config: &ExportConfig) -> bool;

    fn title(&self) -> &'static str;

    fn title_color(&self) -> Color {
        Color::White
    }

    fn content(&self, record: &Self::Record, config: &ExportConfig) -> String;

    fn content_color(&self, record: &Self::Record) -> Color;

    fn alignment(&self) -> Alignment {
        Alignment::Left
    }

    fn escape_markdown(&self) -> bool {
        true
    }
}

/// The columns shown under `config`, computed once per export.
pub fn visible_columns<C: ColumnSpec>(config: &ExportConfig) -> Vec<C> {
    C::all()
        .iter()
        .copied()
        .filter(|column| column.is_shown(config))
        .collect()
}

/// Titles of the given columns.
pub fn build_header<C: ColumnSpec>(columns: &[C]) -> Vec<String> {
    columns.iter().map(|c| c.title().to_string()).collect()
}

/// Build table data from records and columns
pub fn build_table_data<C: ColumnSpec>(
    records: &[C::Record],
    columns: &[C],
    config: &ExportConfig,
) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|col| col.content(record, config))
                .collect()
        })
        .collect()
}

/// Join list-valued cells the same way in every column.
pub(crate) fn join_list(values: &[String]) -> String {
    values.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_list() {
        assert_eq!(join_list(&[]), "");
        assert_eq!(
            join_list(&["a".to_string(), "b".to_string()]),
            "a, b"
        );
    }
}
