//! Structural reader: raw CSV text → header-keyed records.
//!
//! The first record is the header; blank lines before it are ignored. The CSV
//! parser skips blank lines, so those after the header are counted from the
//! gaps between parsed records. Each one is a row with no cells and is
//! discarded as malformed. Header problems are fatal; row-shape problems are
//! counted and dropped.

use log::{debug, info};

use crate::error::PipelineError;
use crate::model::{HeaderSet, StageOutcome, StructuralRecord};

pub fn read(source: &str) -> Result<StageOutcome<StructuralRecord>, PipelineError> {
    // Byte offsets below index `source`, so the BOM must not be skipped by the parser.
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let bytes = source.as_bytes();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut row = csv::StringRecord::new();
    if !reader.read_record(&mut row)? {
        return Err(PipelineError::EmptyInput);
    }
    let headers = HeaderSet::from_cells(row.iter())?;
    debug!("header resolved: {:?}", headers.names());

    let mut kept = Vec::new();
    let mut discarded = 0usize;
    let mut blank = 0usize;

    loop {
        blank += blank_lines_at(bytes, reader.position().byte() as usize);
        if !reader.read_record(&mut row)? {
            break;
        }
        if is_malformed(&headers, &row) {
            discarded += 1;
            continue;
        }
        kept.push(StructuralRecord::zip(&headers, row.iter()));
    }

    if blank > 0 {
        debug!("{} blank line(s) after the header", blank);
    }
    discarded += blank;

    info!("read: kept {} row(s), discarded {} malformed", kept.len(), discarded);
    Ok(StageOutcome::new(kept, discarded))
}

/// Wrong field count, or any field blank after trimming.
fn is_malformed(headers: &HeaderSet, row: &csv::StringRecord) -> bool {
    row.len() != headers.len() || row.iter().any(|cell| cell.trim().is_empty())
}

/// Number of empty physical lines starting at `offset`, where the previous
/// record ended. The previous record's own terminator is not counted, whether
/// or not the parser consumed it.
fn blank_lines_at(bytes: &[u8], offset: usize) -> usize {
    let mut i = offset.min(bytes.len());
    if i > 0 {
        match bytes[i - 1] {
            b'\n' => {}
            b'\r' => {
                if bytes.get(i) == Some(&b'\n') {
                    i += 1;
                }
            }
            _ => i += terminator_len(&bytes[i..]),
        }
    }

    let mut count = 0;
    loop {
        let len = terminator_len(&bytes[i..]);
        if len == 0 {
            return count;
        }
        count += 1;
        i += len;
    }
}

/// `\r\n`, `\n` and `\r` all end a line.
fn terminator_len(bytes: &[u8]) -> usize {
    match bytes {
        [b'\r', b'\n', ..] => 2,
        [b'\r', ..] | [b'\n', ..] => 1,
        _ => 0,
    }
}
