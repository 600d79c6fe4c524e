use crate::columns::{build_header, build_table_data, Alignment, ColumnSpec};
use crate::config::ExportConfig;
use crate::utils::errors::Result;
use colored::Colorize;
use std::io::Write;

/// Column-aligned table, like `column -t`, optionally colored.
pub fn render_table<C, W>(
    records: &[C::Record],
    columns: &[C],
    config: &ExportConfig,
    out: &mut W,
) -> Result<()>
where
    C: ColumnSpec,
    W: Write,
{
    if columns.is_empty() {
        return Ok(());
    }

    let style = config.table_style;
    let header = build_header(columns);
    let rows = build_table_data(records, columns, config);

    // Widths are measured on plain text, before any color codes.
    let mut col_widths = vec![0; columns.len()];
    for row in std::iter::once(&header).chain(rows.iter()) {
        for (i, cell) in row.iter().enumerate() {
            col_widths[i] = col_widths[i].max(cell.chars().count());
        }
    }

    let last = columns.len() - 1;
    let header_cells: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, title)| {
            let padded = pad(title, col_widths[i], columns[i].alignment(), style.padding, i == last);
            if style.color {
                padded.color(columns[i].title_color()).bold().to_string()
            } else {
                padded
            }
        })
        .collect();
    writeln!(out, "{}", header_cells.join(style.separator))?;

    for (record, row) in records.iter().zip(rows.iter()) {
        let formatted_cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let padded =
                    pad(cell, col_widths[i], columns[i].alignment(), style.padding, i == last);
                if style.color {
                    padded.color(columns[i].content_color(record)).to_string()
                } else {
                    padded
                }
            })
            .collect();
        writeln!(out, "{}", formatted_cells.join(style.separator))?;
    }

    Ok(())
}

fn pad(cell: &str, width: usize, alignment: Alignment, fill: char, last: bool) -> String {
    let missing = width.saturating_sub(cell.chars().count());
    let fill_str = |n: usize| fill.to_string().repeat(n);

    match alignment {
        // Last column - no trailing padding needed
        Alignment::Left if last => cell.to_string(),
        Alignment::Left => format!("{cell}{}", fill_str(missing)),
        Alignment::Right => format!("{}{cell}", fill_str(missing)),
        Alignment::Center => {
            let before = missing / 2;
            format!("{}{cell}{}", fill_str(before), fill_str(missing - before))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cert::Validity;
    use crate::columns::x509::test_support::entry;
    use crate::columns::{visible_columns, X509Column};
    use crate::config::{TableStyle, TimeFormat};

    fn render(config: &ExportConfig, records: &[crate::cert::X509Entry]) -> String {
        let columns = visible_columns::<X509Column>(config);
        let mut out = Vec::new();
        render_table(records, &columns, config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_pad() {
        assert_eq!(pad("ab", 5, Alignment::Left, ' ', false), "ab   ");
        assert_eq!(pad("ab", 5, Alignment::Left, ' ', true), "ab");
        assert_eq!(pad("ab", 5, Alignment::Right, '.', false), "...ab");
        assert_eq!(pad("ab", 5, Alignment::Center, '.', false), ".ab..");
        assert_eq!(pad("abcdef", 3, Alignment::Right, ' ', false), "abcdef");
    }

    #[test]
    fn test_formatted_output() {
        let config = ExportConfig {
            time_format: TimeFormat::Short,
            ..Default::default()
        };
        let records = vec![
            entry(7, "CN=a", 2030, Validity::Valid),
            entry(1234, "CN=longer", 2031, Validity::Revoked),
        ];
        let output = render(&config, &records);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Serial number  Subject    Not before  Not after   Revoked at  Validity"
        );
        assert_eq!(
            lines[1],
            "            7  CN=a       2024-01-02  2030-06-07              Valid"
        );
        assert!(lines[2].starts_with("         1234  CN=longer  "));
        assert!(lines[2].ends_with("Revoked"));
    }

    #[test]
    fn test_debug_style_shows_padding() {
        let config = ExportConfig {
            time_format: TimeFormat::Short,
            table_style: TableStyle::debug(),
            ..Default::default()
        };
        let output = render(&config, &[entry(7, "CN=a", 2030, Validity::Valid)]);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines[0],
            "Serial number|Subject|Not before|Not after.|Revoked at|Validity"
        );
        assert_eq!(
            lines[1],
            "............7|CN=a...|2024-01-02|2030-06-07|..........|Valid"
        );
    }

    #[test]
    fn test_header_only_when_filtered_empty() {
        let output = render(&ExportConfig::default(), &[]);
        assert_eq!(output.lines().count(), 1);
        assert!(output.starts_with("Serial number"));
    }
}
