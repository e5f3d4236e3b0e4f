use crate::domain::model::{Record, SubjectGrade, SUBJECTS_COLUMN};
use once_cell::sync::Lazy;
use regex::Regex;

// Pages mix `SUBJ  A` and `SUBJ - 'A'`; both count as a delimiter.
static DELIMITER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{2,}|\s*-\s*").expect("delimiter pattern should compile"));

/// Splits a detailed-subjects field into `(subject, grade)` pairs.
///
/// Tokens are taken two at a time. A pair whose grade is empty after trimming
/// quotes and whitespace is dropped, as is a trailing unpaired token.
pub fn parse_subjects(field: &str) -> Vec<SubjectGrade> {
    let tokens: Vec<&str> = DELIMITER.split(field.trim()).collect();

    tokens
        .chunks_exact(2)
        .filter_map(|pair| {
            let subject = pair[0].trim();
            let grade = pair[1].trim().trim_matches('\'').trim();
            (!grade.is_empty()).then(|| SubjectGrade::new(subject, grade))
        })
        .collect()
}

/// Fills in each record's subject pairs from its detailed-subjects column.
pub fn enrich(records: Vec<Record>) -> Vec<Record> {
    let mut without_subjects = 0usize;
    let enriched: Vec<Record> = records
        .into_iter()
        .map(|mut record| {
            match record.get(SUBJECTS_COLUMN).map(parse_subjects) {
                Some(pairs) => record.subjects = pairs,
                None => without_subjects += 1,
            }
            record
        })
        .collect();

    if without_subjects > 0 {
        tracing::warn!(
            "{} record(s) have no '{}' value",
            without_subjects,
            SUBJECTS_COLUMN
        );
    }
    enriched
}
