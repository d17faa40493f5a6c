// Property-based tests for the record pipeline.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;
use rollcall_core::config::{IdRule, SchemaConfig};
use rollcall_core::dedup::deduplicate;
use rollcall_core::model::{Birthdate, PersonRecord, StructuralRecord};
use rollcall_core::normalize::normalize_record;
use rollcall_core::reader::read;
use rollcall_core::writer::write_to_string;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Cell content: usually plain, sometimes blank, sometimes needing quotes.
fn arb_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-z0-9]{1,6}",
        1 => Just(String::new()),
        1 => Just("   ".to_string()),
        1 => "[a-z]{1,3}[,\"][a-z]{1,3}",
    ]
}

fn arb_row() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_cell(), 1..7)
}

fn arb_token() -> impl Strategy<Value = String> {
    "[A-Za-z]{1,10}"
}

/// A raw row that passes every rule, in one of the accepted input shapes.
fn arb_valid_row() -> impl Strategy<Value = StructuralRecord> {
    (
        "[0-9]{1,4}",
        arb_token(),
        arb_token(),
        any::<bool>(),
        1u8..=120,
        1u32..=12,
        1u32..=31,
        1900u32..=2099,
        prop_oneof![Just('/'), Just('-')],
        any::<bool>(),
    )
        .prop_map(|(id, first, last, comma, age, month, day, year, sep, pad)| {
            let name = if comma { format!("{last}, {first}") } else { format!("{first} {last}") };
            let birthdate = if pad {
                format!("{month:02}{sep}{day:02}{sep}{year}")
            } else {
                format!("{month}{sep}{day}{sep}{year}")
            };
            [
                ("id", id),
                ("name", name),
                ("age", age.to_string()),
                ("birthdate", birthdate),
            ]
            .into_iter()
            .collect()
        })
}

/// Already-normalized people drawn from a small pool so duplicates are common.
fn arb_people() -> impl Strategy<Value = Vec<PersonRecord>> {
    let person = (0usize..4, 20u8..23, 1u8..3, "[0-9]{1,3}").prop_map(|(n, age, day, id)| PersonRecord {
        id,
        name: ["Morgan, Alex", "Lee, Sam", "Ruiz, Ana", "Kim, Pat"][n].to_string(),
        age,
        birthdate: Birthdate { year: 1990, month: 1, day },
    });
    prop::collection::vec(person, 0..40)
}

fn to_csv(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(Vec::new());
    writer.write_record(header).unwrap();
    for row in rows {
        writer.write_record(row).unwrap();
    }
    String::from_utf8(writer.into_inner().unwrap()).unwrap()
}

fn as_structural(person: &PersonRecord) -> StructuralRecord {
    [
        ("id", person.id.clone()),
        ("name", person.name.clone()),
        ("age", person.age.to_string()),
        ("birthdate", person.birthdate.to_string()),
    ]
    .into_iter()
    .collect()
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    /// Bad shape is a discard, never an error, and the counts add up.
    #[test]
    fn malformed_rows_are_counted_not_raised(rows in prop::collection::vec(arb_row(), 0..30)) {
        let text = to_csv(&["a", "b", "c", "d"], &rows);
        let out = read(&text).unwrap();

        let expected_bad = rows
            .iter()
            .filter(|r| r.len() != 4 || r.iter().any(|c| c.trim().is_empty()))
            .count();
        prop_assert_eq!(out.discarded, expected_bad);
        prop_assert_eq!(out.kept.len(), rows.len() - expected_bad);
        for record in &out.kept {
            prop_assert_eq!(record.len(), 4);
        }
    }

    /// Canonical output re-validates to the identical record.
    #[test]
    fn normalizer_is_idempotent(row in arb_valid_row()) {
        let schema = SchemaConfig::default();
        let once = normalize_record(&row, &schema).expect("generated row must be valid");
        let twice = normalize_record(&as_structural(&once), &schema).expect("canonical row must re-validate");
        prop_assert_eq!(once, twice);
    }

    /// Survivors keep first-occurrence order and get ids 001, 002, ...
    #[test]
    fn dedup_preserves_first_occurrences(people in arb_people()) {
        let mut expected: Vec<(String, u8, Birthdate)> = Vec::new();
        for p in &people {
            let key = p.person_key();
            if !expected.contains(&key) {
                expected.push(key);
            }
        }

        let total = people.len();
        let out = deduplicate(people, &IdRule::default());

        let keys: Vec<_> = out.kept.iter().map(PersonRecord::person_key).collect();
        prop_assert_eq!(keys, expected);
        prop_assert_eq!(out.kept.len() + out.discarded, total);
        for (i, p) in out.kept.iter().enumerate() {
            prop_assert_eq!(&p.id, &format!("{:03}", i + 1));
        }
    }

    /// Written CSV parses back to the same field values.
    #[test]
    fn written_records_round_trip(rows in prop::collection::vec(arb_valid_row(), 1..20)) {
        let schema = SchemaConfig::default();
        let people: Vec<PersonRecord> = rows
            .iter()
            .filter_map(|r| normalize_record(r, &schema))
            .collect();
        let text = write_to_string(&people).unwrap();

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let back: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        prop_assert_eq!(back.len(), people.len());
        for (row, p) in back.iter().zip(&people) {
            prop_assert_eq!(&row[0], p.id.as_str());
            prop_assert_eq!(&row[1], p.name.as_str());
            prop_assert_eq!(row[2].to_string(), p.age.to_string());
            prop_assert_eq!(row[3].to_string(), p.birthdate.to_string());
        }
    }
}
