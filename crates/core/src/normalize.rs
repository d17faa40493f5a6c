//! Record normalizer: structural records → canonical person records.
//!
//! Rules run in a fixed order (id, age, name, birthdate) and stop at the first
//! failure. A record either passes all four and is rewritten to canonical form,
//! or is dropped whole.

use chrono::NaiveDate;
use log::{info, warn};

use crate::config::{AgeRule, BirthdateRule, FieldRule, IdRule, NameRule, SchemaConfig};
use crate::model::{Birthdate, PersonRecord, StageOutcome, StructuralRecord};

pub fn normalize(records: Vec<StructuralRecord>, schema: &SchemaConfig) -> StageOutcome<PersonRecord> {
    // All records share one header, so the first is representative.
    if let Some(first) = records.first() {
        for rule in FieldRule::ALL {
            if first.get(rule.column()).is_none() {
                warn!("input has no '{rule}' column; every row will be discarded");
            }
        }
    }

    let total = records.len();
    let kept: Vec<PersonRecord> = records
        .iter()
        .filter_map(|record| normalize_record(record, schema))
        .collect();
    let discarded = total - kept.len();

    info!("normalize: kept {} row(s), discarded {} invalid", kept.len(), discarded);
    StageOutcome::new(kept, discarded)
}

/// Apply every rule to one record. `None` means discard.
pub fn normalize_record(record: &StructuralRecord, schema: &SchemaConfig) -> Option<PersonRecord> {
    let id = normalize_id(record.get("id")?, &schema.id)?;
    let age = normalize_age(record.get("age")?, &schema.age)?;
    let name = normalize_name(record.get("name")?, &schema.name)?;
    let birthdate = normalize_birthdate(record.get("birthdate")?, &schema.birthdate)?;
    Some(PersonRecord { id, name, age, birthdate })
}

// ---------------------------------------------------------------------------
// Identifier
// ---------------------------------------------------------------------------

/// Digits only, zero-padded on the left. Never truncated.
pub fn normalize_id(raw: &str, rule: &IdRule) -> Option<String> {
    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("{:0>width$}", digits, width = rule.width))
}

// ---------------------------------------------------------------------------
// Age
// ---------------------------------------------------------------------------

pub fn normalize_age(raw: &str, rule: &AgeRule) -> Option<u8> {
    let age: i64 = raw.trim().parse().ok()?;
    if age < i64::from(rule.min) || age > i64::from(rule.max) {
        return None;
    }
    u8::try_from(age).ok()
}

// ---------------------------------------------------------------------------
// Name
// ---------------------------------------------------------------------------

/// `First Last` or `Last, First` → `Last, First`, title-cased.
///
/// Only the comma count and the token count matter; case and spacing are
/// rewritten. A middle name or a missing surname fails.
pub fn normalize_name(raw: &str, rule: &NameRule) -> Option<String> {
    let trimmed = raw.trim();
    let commas = trimmed.matches(',').count();
    if commas > rule.max_commas {
        return None;
    }

    let stripped = trimmed.replacen(',', "", 1);
    let mut tokens = stripped.split_whitespace();
    let (a, b) = (tokens.next()?, tokens.next()?);
    if tokens.next().is_some() {
        return None;
    }

    let (last, first) = if commas == 1 { (a, b) } else { (b, a) };
    Some(title_case(&format!("{last}, {first}")))
}

/// Uppercase a letter that doesn't follow another letter, lowercase the rest.
/// `o'neil` → `O'Neil`, `mary-jane` → `Mary-Jane`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_letter = false;
    for c in s.chars() {
        if prev_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_letter = c.is_alphabetic();
    }
    out
}

// ---------------------------------------------------------------------------
// Birthdate
// ---------------------------------------------------------------------------

/// `M/D/YYYY` or `M-D-YYYY` (one separator throughout), optionally the
/// canonical `YYYY-MM-DD`. Day is range-checked only, unless
/// `strict_calendar` is set.
pub fn normalize_birthdate(raw: &str, rule: &BirthdateRule) -> Option<Birthdate> {
    let value = raw.trim();
    let date = parse_month_first(value).or_else(|| {
        if rule.accept_iso {
            parse_iso(value)
        } else {
            None
        }
    })?;

    if date.year < rule.min_year || date.year > rule.max_year {
        return None;
    }
    if rule.strict_calendar
        && NaiveDate::from_ymd_opt(i32::from(date.year), u32::from(date.month), u32::from(date.day)).is_none()
    {
        return None;
    }
    Some(date)
}

fn parse_month_first(value: &str) -> Option<Birthdate> {
    let sep = value.chars().find(|c| *c == '/' || *c == '-')?;
    let mut parts = value.split(sep);
    let month = number(parts.next()?, 1, 2)?;
    let day = number(parts.next()?, 1, 2)?;
    let year = number(parts.next()?, 4, 4)?;
    if parts.next().is_some() {
        return None;
    }
    build(year, month, day)
}

fn parse_iso(value: &str) -> Option<Birthdate> {
    let mut parts = value.split('-');
    let year = number(parts.next()?, 4, 4)?;
    let month = number(parts.next()?, 2, 2)?;
    let day = number(parts.next()?, 2, 2)?;
    if parts.next().is_some() {
        return None;
    }
    build(year, month, day)
}

fn build(year: u32, month: u32, day: u32) -> Option<Birthdate> {
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some(Birthdate {
        year: u16::try_from(year).ok()?,
        month: u8::try_from(month).ok()?,
        day: u8::try_from(day).ok()?,
    })
}

/// ASCII digits only, length within `[min_len, max_len]`.
fn number(s: &str, min_len: usize, max_len: usize) -> Option<u32> {
    if s.len() < min_len || s.len() > max_len || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
