use crate::config::SchemaConfig;
use crate::dedup::deduplicate;
use crate::error::PipelineError;
use crate::model::{DiscardCounts, PipelineOutput};
use crate::normalize::normalize;
use crate::reader::read;

/// Run read → normalize → deduplicate over CSV text. Writing is left to the
/// caller so the same result can go to a file, a buffer, or stdout.
pub fn run(source: &str, schema: &SchemaConfig) -> Result<PipelineOutput, PipelineError> {
    let structural = read(source)?;
    let normalized = normalize(structural.kept, schema);
    let deduplicated = deduplicate(normalized.kept, &schema.id);

    Ok(PipelineOutput {
        records: deduplicated.kept,
        discards: DiscardCounts {
            malformed: structural.discarded,
            invalid: normalized.discarded,
            duplicate: deduplicated.discarded,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_stage_separately() {
        let source = "\
id,name,age,birthdate
1,Alex Morgan,29,03/14/1996
2,,30,01/01/1990
3,Sam Lee,0,01/01/1990
4,\"Morgan, Alex\",29,3-14-1996
";
        let out = run(source, &SchemaConfig::default()).unwrap();
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].id, "001");
        assert_eq!(
            out.discards,
            DiscardCounts { malformed: 1, invalid: 1, duplicate: 1 }
        );
        assert_eq!(out.discards.total(), 3);
    }

    #[test]
    fn header_errors_propagate() {
        let err = run("id,name,,birthdate\n", &SchemaConfig::default()).unwrap_err();
        assert_eq!(err, PipelineError::InvalidHeader { positions: vec![3] });
    }

    #[test]
    fn nothing_surviving_is_not_an_error_here() {
        let out = run("id,name,age,birthdate\nx,y,z,w\n", &SchemaConfig::default()).unwrap();
        assert!(out.records.is_empty());
        assert_eq!(out.discards.invalid, 1);
    }
}
