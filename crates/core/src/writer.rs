use std::io::Write;

use log::info;

use crate::error::PipelineError;
use crate::model::{PersonRecord, OUTPUT_HEADERS};

/// Serialize records as CSV: header `id,name,age,birthdate`, then one line per
/// record. Fields containing a comma or quote are quoted.
///
/// An empty slice is an error and nothing is written to `dest`.
pub fn write<W: Write>(records: &[PersonRecord], dest: W) -> Result<(), PipelineError> {
    if records.is_empty() {
        return Err(PipelineError::NoRows);
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(dest);
    writer.write_record(OUTPUT_HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(|e| PipelineError::Io(e.to_string()))?;

    info!("write: {} row(s)", records.len());
    Ok(())
}

/// Convenience for callers that want the CSV text in memory.
pub fn write_to_string(records: &[PersonRecord]) -> Result<String, PipelineError> {
    let mut buf = Vec::new();
    write(records, &mut buf)?;
    String::from_utf8(buf).map_err(|e| PipelineError::Csv(e.to_string()))
}
