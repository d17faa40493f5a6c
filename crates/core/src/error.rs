use std::fmt;

/// Fatal pipeline failures. Row-level problems never surface here; they are
/// counted as discards by the stage that rejects the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// No non-empty record in the input.
    EmptyInput,
    /// One or more header cells normalize to the empty string (1-based positions).
    InvalidHeader { positions: Vec<usize> },
    /// Header cells that collide with an earlier one after normalization.
    /// `headers` holds the original text, `positions` the 1-based positions.
    DuplicateHeader { headers: Vec<String>, positions: Vec<usize> },
    /// Nothing survived the pipeline, so there is nothing to write.
    NoRows,
    /// CSV decoding/encoding error.
    Csv(String),
    /// IO error (file write, flush, rename).
    Io(String),
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Schema config validation error (bad range, bad width, etc.).
    ConfigValidation(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "File is empty"),
            Self::InvalidHeader { positions } => {
                write!(f, "Empty header(s) found at position(s) {}", list(positions, |p| p.to_string()))
            }
            Self::DuplicateHeader { headers, positions } => write!(
                f,
                "Duplicate header(s) {} found at position(s) {} respectively",
                list(headers, |h| format!("'{h}'")),
                list(positions, |p| p.to_string()),
            ),
            Self::NoRows => write!(f, "No rows left after cleaning and deduplicating"),
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::ConfigParse(msg) => write!(f, "schema parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "schema validation error: {msg}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// `[a, b, c]` rendering used by the header messages.
fn list<T>(items: &[T], render: impl Fn(&T) -> String) -> String {
    let parts: Vec<String> = items.iter().map(render).collect();
    format!("[{}]", parts.join(", "))
}
