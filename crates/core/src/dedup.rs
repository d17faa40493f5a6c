use std::collections::HashSet;

use log::info;

use crate::config::IdRule;
use crate::model::{PersonRecord, StageOutcome};

/// Drop later occurrences of the same person, then renumber ids 1, 2, ...
///
/// Two records are the same person when name, age and birthdate all match;
/// the provisional id plays no part.
pub fn deduplicate(records: Vec<PersonRecord>, id_rule: &IdRule) -> StageOutcome<PersonRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut kept = Vec::with_capacity(records.len());
    let mut discarded = 0usize;

    for record in records {
        if seen.insert(record.person_key()) {
            kept.push(record);
        } else {
            discarded += 1;
        }
    }

    for (index, record) in kept.iter_mut().enumerate() {
        record.id = format!("{:0width$}", index + 1, width = id_rule.width);
    }

    info!("deduplicate: kept {} row(s), discarded {} duplicate", kept.len(), discarded);
    StageOutcome::new(kept, discarded)
}
