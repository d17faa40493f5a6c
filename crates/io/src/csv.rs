// CSV file load/save

use std::io::{Read, Write};
use std::path::Path;

use log::debug;
use rollcall_core::model::PersonRecord;
use rollcall_core::writer;
use rollcall_core::PipelineError;
use tempfile::NamedTempFile;

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
/// A leading byte-order mark is dropped.
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| e.to_string())?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    let content = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            debug!("{} is not UTF-8; decoding as Windows-1252", path.display());
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    };

    Ok(match content.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => content,
    })
}

/// Write records to `path` all-or-nothing.
///
/// Rows go to a temp file beside the destination which is renamed into place
/// after a successful flush. An empty slice fails with `NoRows` before any
/// file is created.
pub fn save(records: &[PersonRecord], path: &Path) -> Result<(), PipelineError> {
    if records.is_empty() {
        return Err(PipelineError::NoRows);
    }

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| PipelineError::Io(e.to_string()))?;

    writer::write(records, &mut tmp)?;
    tmp.flush().map_err(|e| PipelineError::Io(e.to_string()))?;
    tmp.as_file().sync_all().map_err(|e| PipelineError::Io(e.to_string()))?;

    tmp.persist(path).map_err(|e| PipelineError::Io(e.error.to_string()))?;
    debug!("wrote {} row(s) to {}", records.len(), path.display());
    Ok(())
}
