use crate::utils::errors::Result;
use serde::Serialize;
use std::io::Write;

/// Pretty JSON array of the records.
pub fn render_json<T: Serialize, W: Write>(records: &[T], out: &mut W) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    writeln!(out, "{json}")?;
    tracing::debug!("{} records marshalled", records.len());
    Ok(())
}
