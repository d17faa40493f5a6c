use serde::Deserialize;

use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Constants for the four field validators. The record shape itself is fixed;
/// only the bounds each rule checks against are configurable.
///
/// Every table and key is optional, so an empty document is the default schema:
///
/// ```toml
/// [id]
/// width = 3
///
/// [age]
/// min = 1
/// max = 120
///
/// [name]
/// max_commas = 1
///
/// [birthdate]
/// min_year = 1900
/// max_year = 2099
/// accept_iso = true
/// strict_calendar = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaConfig {
    pub id: IdRule,
    pub age: AgeRule,
    pub name: NameRule,
    pub birthdate: BirthdateRule,
}

/// The four validators, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Id,
    Age,
    Name,
    Birthdate,
}

impl FieldRule {
    /// Validators in the order the normalizer applies them.
    pub const ALL: [FieldRule; 4] = [Self::Id, Self::Age, Self::Name, Self::Birthdate];

    /// Input column the rule reads.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Age => "age",
            Self::Name => "name",
            Self::Birthdate => "birthdate",
        }
    }
}

impl std::fmt::Display for FieldRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column())
    }
}

// ---------------------------------------------------------------------------
// Per-field rules
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdRule {
    /// Zero-pad width. Longer ids keep their natural width.
    pub width: usize,
}

impl Default for IdRule {
    fn default() -> Self {
        Self { width: 3 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgeRule {
    pub min: u8,
    pub max: u8,
}

impl Default for AgeRule {
    fn default() -> Self {
        Self { min: 1, max: 120 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NameRule {
    /// 0 rejects the `Last, First` shape entirely.
    pub max_commas: usize,
}

impl Default for NameRule {
    fn default() -> Self {
        Self { max_commas: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BirthdateRule {
    pub min_year: u16,
    pub max_year: u16,
    /// Also accept the canonical `YYYY-MM-DD` form, so output can be re-read.
    pub accept_iso: bool,
    /// Reject dates that don't exist (Feb 30, Apr 31, ...).
    pub strict_calendar: bool,
}

impl Default for BirthdateRule {
    fn default() -> Self {
        Self {
            min_year: 1900,
            max_year: 2099,
            accept_iso: true,
            strict_calendar: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading + validation
// ---------------------------------------------------------------------------

impl SchemaConfig {
    pub fn from_toml(input: &str) -> Result<Self, PipelineError> {
        let config: SchemaConfig =
            toml::from_str(input).map_err(|e| PipelineError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.id.width == 0 || self.id.width > 10 {
            return Err(PipelineError::ConfigValidation(format!(
                "id.width must be between 1 and 10, got {}",
                self.id.width
            )));
        }

        if self.age.min == 0 {
            return Err(PipelineError::ConfigValidation("age.min must be at least 1".into()));
        }
        if self.age.min > self.age.max {
            return Err(PipelineError::ConfigValidation(format!(
                "age.min ({}) is greater than age.max ({})",
                self.age.min, self.age.max
            )));
        }

        if self.name.max_commas > 1 {
            return Err(PipelineError::ConfigValidation(format!(
                "name.max_commas must be 0 or 1, got {}",
                self.name.max_commas
            )));
        }

        let years = 1000..=9999;
        for (key, year) in [("min_year", self.birthdate.min_year), ("max_year", self.birthdate.max_year)] {
            if !years.contains(&year) {
                return Err(PipelineError::ConfigValidation(format!(
                    "birthdate.{key} must be a four-digit year, got {year}"
                )));
            }
        }
        if self.birthdate.min_year > self.birthdate.max_year {
            return Err(PipelineError::ConfigValidation(format!(
                "birthdate.min_year ({}) is greater than birthdate.max_year ({})",
                self.birthdate.min_year, self.birthdate.max_year
            )));
        }

        Ok(())
    }
}
