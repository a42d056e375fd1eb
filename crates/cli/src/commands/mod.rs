pub mod batch;
pub mod records;
pub mod resolve;
pub mod trace;

use serde::Serialize;
use std::io::Write;

/// Pretty JSON on stdout, one document per command.
pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
