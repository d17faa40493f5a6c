use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Normalized (trimmed, lowercased) header names, in file order.
///
/// Guaranteed free of empty and duplicate names once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSet {
    names: Vec<String>,
}

impl HeaderSet {
    /// Normalize raw header cells. Empty names are reported before duplicates:
    /// if any position is empty the duplicate check never runs.
    pub fn from_cells<'a, I>(cells: I) -> Result<Self, PipelineError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut names: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut empty_positions = Vec::new();
        let mut duplicate_headers = Vec::new();
        let mut duplicate_positions = Vec::new();

        for (i, raw) in cells.into_iter().enumerate() {
            let position = i + 1;
            let name = raw.trim().to_lowercase();
            if name.is_empty() {
                empty_positions.push(position);
            } else if !seen.insert(name.clone()) {
                duplicate_headers.push(raw.to_string());
                duplicate_positions.push(position);
            } else {
                names.push(name);
            }
        }

        if !empty_positions.is_empty() {
            return Err(PipelineError::InvalidHeader { positions: empty_positions });
        }
        if !duplicate_headers.is_empty() {
            return Err(PipelineError::DuplicateHeader {
                headers: duplicate_headers,
                positions: duplicate_positions,
            });
        }

        Ok(Self { names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

// ---------------------------------------------------------------------------
// Structural record
// ---------------------------------------------------------------------------

/// A row after header association, before semantic validation.
/// Values are kept exactly as parsed (untrimmed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuralRecord {
    fields: HashMap<String, String>,
}

impl StructuralRecord {
    /// Zip header names with a row's cells. Callers guarantee equal lengths.
    pub(crate) fn zip<'a, I>(headers: &HeaderSet, cells: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let fields = headers
            .names()
            .iter()
            .cloned()
            .zip(cells.into_iter().map(str::to_string))
            .collect();
        Self { fields }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StructuralRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Person record
// ---------------------------------------------------------------------------

/// Calendar-agnostic date. Day is only range-checked (1-31) by the normalizer,
/// so values like Feb 30 are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Birthdate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl fmt::Display for Birthdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl Serialize for Birthdate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The canonical entity. Field order is the output column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonRecord {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub birthdate: Birthdate,
}

/// Output header, in column order.
pub const OUTPUT_HEADERS: [&str; 4] = ["id", "name", "age", "birthdate"];

impl PersonRecord {
    /// Identity used for deduplication. `id` is not part of it.
    pub fn person_key(&self) -> (String, u8, Birthdate) {
        (self.name.clone(), self.age, self.birthdate)
    }
}

// ---------------------------------------------------------------------------
// Stage results
// ---------------------------------------------------------------------------

/// Survivors of one stage plus how many items it dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutcome<T> {
    pub kept: Vec<T>,
    pub discarded: usize,
}

impl<T> StageOutcome<T> {
    pub fn new(kept: Vec<T>, discarded: usize) -> Self {
        Self { kept, discarded }
    }
}

/// Per-stage discard counters. Only the total is reported to users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscardCounts {
    pub malformed: usize,
    pub invalid: usize,
    pub duplicate: usize,
}

impl DiscardCounts {
    pub fn total(&self) -> usize {
        self.malformed + self.invalid + self.duplicate
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    pub records: Vec<PersonRecord>,
    pub discards: DiscardCounts,
}
