use crate::cli::args::*;
use crate::config::TableStyle;
use crate::export::{dump_bucket, export_ssh, export_x509};
use crate::storage::LocalStore;
use crate::utils::errors::Result;
use chrono::Utc;
use clap::CommandFactory;
use clap_complete::generate;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

pub fn handle_command(cli: Cli) -> Result<()> {
    // Initialize logging - always to stderr
    let log_level = match cli.logging {
        0 => "stepdb_rs=warn",  // Default: warnings only
        1 => "stepdb_rs=info",  // skipped records and counts
        2 => "stepdb_rs=debug", // bucket scans and filtering
        _ => "stepdb_rs=trace",
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(log_level)
        .init();

    let color = !cli.no_color && io::stdout().is_terminal();
    colored::control::set_override(color);

    let table_style = if cli.logging >= 3 {
        TableStyle::debug()
    } else {
        TableStyle::default()
    }
    .with_color(color);

    match cli.command {
        Commands::X509Certs(args) => {
            let config = args.export_config(table_style);
            let store = open_store(&args.report.path)?;
            let mut buffer = Vec::new();
            export_x509(&store, &config, Utc::now(), &mut buffer)?;
            write_stdout(&buffer)
        }
        Commands::SshCerts(args) => {
            let config = args.export_config(table_style);
            let store = open_store(&args.report.path)?;
            let mut buffer = Vec::new();
            export_ssh(&store, &config, Utc::now(), &mut buffer)?;
            write_stdout(&buffer)
        }
        Commands::DbTable { path, bucket } => {
            let store = open_store(&path)?;
            let mut buffer = Vec::new();
            dump_bucket(&store, &bucket, &mut buffer)?;
            write_stdout(&buffer)
        }
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "stepdb-rs", &mut io::stdout());
            Ok(())
        }
    }
}

fn open_store(path: &Path) -> Result<LocalStore> {
    tracing::debug!("Opening store at {}", path.display());
    LocalStore::open(path)
}

/// The report only reaches stdout once it is complete.
fn write_stdout(buffer: &[u8]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(buffer)?;
    stdout.flush()?;
    Ok(())
}
