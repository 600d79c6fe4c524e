use crate::columns::{build_header, build_table_data, ColumnSpec};
use crate::config::ExportConfig;
use crate::utils::errors::Result;
use std::io::Write;

/// Raw output: tab-separated values, no color or escaping.
pub fn render_plain<C, W>(
    records: &[C::Record],
    columns: &[C],
    config: &ExportConfig,
    out: &mut W,
) -> Result<()>
where
    C: ColumnSpec,
    W: Write,
{
    writeln!(out, "{}", build_header(columns).join("\t"))?;
    for row in build_table_data(records, columns, config) {
        writeln!(out, "{}", row.join("\t"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cert::Validity;
    use crate::columns::x509::test_support::entry;
    use crate::columns::{visible_columns, X509Column};
    use crate::config::ColumnToggles;

    #[test]
    fn test_raw_output() {
        let config = ExportConfig {
            columns: ColumnToggles {
                dns_names: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let columns = visible_columns::<X509Column>(&config);
        let mut out = Vec::new();
        render_plain(
            &[entry(7, "CN=a*b", 2030, Validity::Valid)],
            &columns,
            &config,
            &mut out,
        )
        .unwrap();

        let output = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines[0],
            "Serial number\tSubject\tDNS names\tNot before\tNot after\tRevoked at\tValidity"
        );
        assert_eq!(
            lines[1],
            "7\tCN=a*b\ta.example.com, b.example.com\t2024-01-02T03:04:05Z\t2030-06-07T08:09:10Z\t\tValid"
        );
        for line in &lines {
            assert_eq!(line.split('\t').count(), columns.len());
        }
    }
}
