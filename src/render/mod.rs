pub mod json;
pub mod markdown;
pub mod openssl;
pub mod plain;
pub mod table;

pub use json::render_json;
pub use markdown::{escape_markdown, render_markdown};
pub use openssl::render_openssl_index;
pub use plain::render_plain;
pub use table::render_table;

use crate::columns::{visible_columns, ColumnSpec};
use crate::config::{EmitFormat, ExportConfig};
use crate::utils::errors::{Result, StepDbError};
use serde::Serialize;
use std::io::Write;

/// Write `records` in one of the column-driven formats.
///
/// The openssl index has its own fixed layout and is rendered by
/// [`render_openssl_index`] instead.
pub fn render_columns<C, W>(records: &[C::Record], config: &ExportConfig, out: &mut W) -> Result<()>
where
    C: ColumnSpec,
    C::Record: Serialize,
    W: Write,
{
    let columns = visible_columns::<C>(config);
    tracing::debug!(
        "Rendering {} records as {} with {} columns",
        records.len(),
        config.emit.as_str(),
        columns.len()
    );

    match config.emit {
        EmitFormat::Table => render_table(records, &columns, config, out),
        EmitFormat::Json => render_json(records, out),
        EmitFormat::Markdown => render_markdown(records, &columns, config, out),
        EmitFormat::Plain => render_plain(records, &columns, config, out),
        EmitFormat::Openssl => Err(StepDbError::Config(
            "openssl output is only available for X.509 certificates".to_string(),
        )),
    }
}
