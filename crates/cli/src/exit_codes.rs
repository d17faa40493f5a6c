//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain    | Description                                   |
//! |---------|-----------|-----------------------------------------------|
//! | 0       | Universal | Success (discards are not failures)           |
//! | 1       | Universal | Reserved (Rust runtime panic)                 |
//! | 2       | Universal | Usage error (bad args, not a CSV, no input)   |
//! | 3-9     | pipeline  | Input, output and schema failures             |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into `pipeline_exit_code` or the relevant `CliError` constructor

use rollcall_core::PipelineError;

// =============================================================================
// Universal (0, 2)
// =============================================================================

/// Success - output written. Some rows may have been discarded.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - wrong argument count, non-CSV extension, input not found.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Pipeline (3-9)
// =============================================================================

/// Input file unreadable, empty, or its header is empty/duplicated.
pub const EXIT_INPUT: u8 = 3;

/// Every row was discarded; no output file was written.
pub const EXIT_NO_ROWS: u8 = 4;

/// Output file could not be written.
pub const EXIT_OUTPUT: u8 = 5;

/// Schema file could not be read, parsed, or validated.
pub const EXIT_SCHEMA: u8 = 6;

/// Map a pipeline error to its exit code.
pub fn pipeline_exit_code(err: &PipelineError) -> u8 {
    match err {
        PipelineError::EmptyInput
        | PipelineError::InvalidHeader { .. }
        | PipelineError::DuplicateHeader { .. }
        | PipelineError::Csv(_) => EXIT_INPUT,
        PipelineError::NoRows => EXIT_NO_ROWS,
        PipelineError::Io(_) => EXIT_OUTPUT,
        PipelineError::ConfigParse(_) | PipelineError::ConfigValidation(_) => EXIT_SCHEMA,
    }
}
