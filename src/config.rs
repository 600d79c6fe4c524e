use chrono::{DateTime, Utc};
use clap::ValueEnum;

use crate::cert::Validity;

/// Report output format.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmitFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Plain,
    /// openssl CA index file (X.509 only)
    Openssl,
}

impl EmitFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmitFormat::Table => "table",
            EmitFormat::Json => "json",
            EmitFormat::Markdown => "markdown",
            EmitFormat::Plain => "plain",
            EmitFormat::Openssl => "openssl",
        }
    }
}

/// Which end of the validity window orders the report.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Not before / valid after
    Start,
    /// Not after / valid before
    #[default]
    Finish,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeFormat {
    /// 2024-05-06T07:08:09Z
    #[default]
    Iso,
    /// 2024-05-06
    Short,
}

impl TimeFormat {
    pub fn format(&self, time: &DateTime<Utc>) -> String {
        match self {
            TimeFormat::Iso => time.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            TimeFormat::Short => time.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Which validity states make it into the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityFilter {
    pub valid: bool,
    pub revoked: bool,
    pub expired: bool,
}

impl Default for ValidityFilter {
    fn default() -> Self {
        Self {
            valid: true,
            revoked: true,
            expired: false,
        }
    }
}

impl ValidityFilter {
    pub fn accepts(&self, validity: Validity) -> bool {
        match validity {
            Validity::Valid => self.valid,
            Validity::Expired => self.expired,
            Validity::Revoked => self.revoked,
        }
    }
}

/// Optional report columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnToggles {
    pub dns_names: bool,
    pub email_addresses: bool,
    pub ip_addresses: bool,
    pub uris: bool,
    pub crl_distribution_points: bool,
    pub provisioner: bool,
    pub key_id: bool,
}

/// Separator and padding used by the table renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStyle {
    pub separator: &'static str,
    pub padding: char,
    pub color: bool,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            separator: "  ",
            padding: ' ',
            color: false,
        }
    }
}

impl TableStyle {
    /// Visible cell boundaries, for checking column widths.
    pub fn debug() -> Self {
        Self {
            separator: "|",
            padding: '.',
            color: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// Everything one export run needs, fixed before the store is read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportConfig {
    pub emit: EmitFormat,
    pub sort: SortOrder,
    pub time_format: TimeFormat,
    pub filter: ValidityFilter,
    pub columns: ColumnToggles,
    pub table_style: TableStyle,
}

impl ExportConfig {
    pub fn format_time(&self, time: &DateTime<Utc>) -> String {
        self.time_format.format(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_filter() {
        let filter = ValidityFilter::default();
        assert!(filter.accepts(Validity::Valid));
        assert!(filter.accepts(Validity::Revoked));
        assert!(!filter.accepts(Validity::Expired));
    }

    #[test]
    fn test_filter_all_off() {
        let filter = ValidityFilter {
            valid: false,
            revoked: false,
            expired: false,
        };
        for validity in [Validity::Valid, Validity::Expired, Validity::Revoked] {
            assert!(!filter.accepts(validity));
        }
    }

    #[test]
    fn test_time_formats() {
        let time = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        assert_eq!(TimeFormat::Iso.format(&time), "2024-05-06T07:08:09Z");
        assert_eq!(TimeFormat::Short.format(&time), "2024-05-06");
    }

    #[test]
    fn test_table_styles() {
        let style = TableStyle::default();
        assert_eq!(style.separator, "  ");
        assert_eq!(style.padding, ' ');
        assert!(TableStyle::debug().with_color(true).color);
    }
}
