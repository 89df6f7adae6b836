pub mod estimate;
pub mod html_report;
pub mod rates;
pub mod schema;

use crate::core::{read_snapshot_json, RateTables, TaxpayerSnapshot};
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read a taxpayer snapshot (JSON) from a file, or stdin with "-"
pub fn read_snapshot(path: &Path) -> anyhow::Result<TaxpayerSnapshot> {
    if path.as_os_str() == "-" {
        read_from_stdin()
    } else {
        let file = File::open(path)?;
        read_snapshot_json(BufReader::new(file))
    }
}

fn read_from_stdin() -> anyhow::Result<TaxpayerSnapshot> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    read_snapshot_json(io::Cursor::new(buffer))
}

/// Rate tables from an override file, or the built-in schedule
pub fn load_rates(path: Option<&Path>) -> anyhow::Result<Cow<'static, RateTables>> {
    match path {
        Some(path) => {
            let file = File::open(path)?;
            let tables = RateTables::read_json(BufReader::new(file))?;
            log::info!("Loaded rate tables from {}", path.display());
            Ok(Cow::Owned(tables))
        }
        None => Ok(Cow::Borrowed(RateTables::standard())),
    }
}

/// Fiscal year to build the calendar for, defaulting to the current one
pub fn fiscal_year(year: Option<i32>) -> i32 {
    use chrono::Datelike;
    year.unwrap_or_else(|| chrono::Local::now().year())
}

/// Serialize records as CSV with a header row
pub fn write_csv<R, W>(records: impl IntoIterator<Item = R>, writer: W) -> anyhow::Result<()>
where
    R: serde::Serialize,
    W: io::Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
