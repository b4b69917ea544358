use crate::report;
use anyhow::Result;
use std::path::Path;

/// Writes the template spreadsheet users fill in before an import.
pub fn run<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        anyhow::bail!("File already exists at {}", path.display());
    }
    report::write_sample(path)?;
    println!("Wrote sample spreadsheet to {}", path.display());
    Ok(())
}
