use crate::config::{
    ColumnToggles, EmitFormat, ExportConfig, SortOrder, TableStyle, TimeFormat, ValidityFilter,
};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stepdb-rs")]
#[command(version = "1.0.0")]
#[command(about = "Export certificates from an offline step-ca database")]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level: 0 warnings, 1 info, 2 debug, 3 trace (tables show their padding)
    #[arg(long, global = true, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=3))]
    pub logging: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export X.509 certificates
    #[command(name = "x509certs", alias = "x509Certs")]
    X509Certs(X509Args),
    /// Export SSH certificates
    #[command(name = "sshcerts", alias = "sshCerts")]
    SshCerts(SshArgs),
    /// Dump every record of a bucket as JSON
    #[command(name = "dbtable", alias = "dbTable")]
    DbTable {
        /// Database file
        #[arg(env = "STEPDB_PATH")]
        path: PathBuf,
        /// Bucket name, e.g. x509_certs
        bucket: String,
    },
    /// Generate shell completion scripts
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by every certificate report.
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Database file
    #[arg(env = "STEPDB_PATH")]
    pub path: PathBuf,

    /// Sort order
    #[arg(short, long, value_enum, default_value_t = SortOrder::Finish)]
    pub sort: SortOrder,

    /// Time format
    #[arg(short, long, value_enum, default_value_t = TimeFormat::Iso)]
    pub time: TimeFormat,

    /// Show valid certificates
    #[arg(short = 'v', long, action = ArgAction::Set, num_args = 0..=1,
          default_value_t = true, default_missing_value = "true")]
    pub valid: bool,

    /// Show revoked certificates
    #[arg(short = 'r', long, action = ArgAction::Set, num_args = 0..=1,
          default_value_t = true, default_missing_value = "true")]
    pub revoked: bool,

    /// Show expired certificates
    #[arg(short = 'x', long, action = ArgAction::Set, num_args = 0..=1,
          default_value_t = false, default_missing_value = "true")]
    pub expired: bool,
}

impl ReportArgs {
    fn filter(&self) -> ValidityFilter {
        ValidityFilter {
            valid: self.valid,
            revoked: self.revoked,
            expired: self.expired,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct X509Args {
    #[command(flatten)]
    pub report: ReportArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = EmitFormat::Table)]
    pub emit: EmitFormat,

    /// Show DNS names column
    #[arg(short = 'd', long)]
    pub dnsnames: bool,

    /// Show email addresses column
    #[arg(short = 'm', long)]
    pub emailaddresses: bool,

    /// Show IP addresses column
    #[arg(short = 'i', long)]
    pub ipaddresses: bool,

    /// Show URIs column
    #[arg(short = 'u', long)]
    pub uris: bool,

    /// Show CRL distribution points column
    #[arg(short = 'c', long)]
    pub crl: bool,

    /// Show provisioner column
    #[arg(short = 'p', long)]
    pub provisioner: bool,
}

impl X509Args {
    pub fn export_config(&self, table_style: TableStyle) -> ExportConfig {
        ExportConfig {
            emit: self.emit,
            sort: self.report.sort,
            time_format: self.report.time,
            filter: self.report.filter(),
            columns: ColumnToggles {
                dns_names: self.dnsnames,
                email_addresses: self.emailaddresses,
                ip_addresses: self.ipaddresses,
                uris: self.uris,
                crl_distribution_points: self.crl,
                provisioner: self.provisioner,
                key_id: false,
            },
            table_style,
        }
    }
}

/// Formats available for SSH certificates (no openssl index).
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SshEmitFormat {
    Table,
    Json,
    Markdown,
    Plain,
}

impl From<SshEmitFormat> for EmitFormat {
    fn from(format: SshEmitFormat) -> Self {
        match format {
            SshEmitFormat::Table => EmitFormat::Table,
            SshEmitFormat::Json => EmitFormat::Json,
            SshEmitFormat::Markdown => EmitFormat::Markdown,
            SshEmitFormat::Plain => EmitFormat::Plain,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SshArgs {
    #[command(flatten)]
    pub report: ReportArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = SshEmitFormat::Table)]
    pub emit: SshEmitFormat,

    /// Show key ID column
    #[arg(short = 'k', long, visible_alias = "kid")]
    pub keyid: bool,
}

impl SshArgs {
    pub fn export_config(&self, table_style: TableStyle) -> ExportConfig {
        ExportConfig {
            emit: self.emit.into(),
            sort: self.report.sort,
            time_format: self.report.time,
            filter: self.report.filter(),
            columns: ColumnToggles {
                key_id: self.keyid,
                ..Default::default()
            },
            table_style,
        }
    }
}
