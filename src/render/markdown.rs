use crate::columns::{build_header, Alignment, ColumnSpec};
use crate::config::ExportConfig;
use crate::utils::errors::Result;
use std::io::Write;

const MARKDOWN_SPECIAL: &[char] = &[
    '\\', '`', '*', '_', '{', '}', '[', ']', '(', ')', '#', '.', '!', '+', '-',
];

/// Backslash-escape characters Markdown would otherwise interpret.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_SPECIAL.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn separator(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => ":-",
        Alignment::Center => ":-:",
        Alignment::Right => "-:",
    }
}

fn write_row<W: Write>(out: &mut W, cells: &[String]) -> Result<()> {
    writeln!(out, "| {} |", cells.join(" | "))?;
    Ok(())
}

/// Markdown table; alignment comes from each column.
pub fn render_markdown<C, W>(
    records: &[C::Record],
    columns: &[C],
    config: &ExportConfig,
    out: &mut W,
) -> Result<()>
where
    C: ColumnSpec,
    W: Write,
{
    write_row(out, &build_header(columns))?;

    let separators: Vec<String> = columns
        .iter()
        .map(|c| separator(c.alignment()).to_string())
        .collect();
    write_row(out, &separators)?;

    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|column| {
                let content = column.content(record, config);
                if column.escape_markdown() {
                    escape_markdown(&content)
                } else {
                    content
                }
            })
            .collect();
        write_row(out, &row)?;
    }

    Ok(())
}
