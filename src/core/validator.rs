use crate::domain::grades::Grade;
use crate::domain::model::Record;
use std::collections::BTreeSet;

/// Distinct grade strings seen in the records that are not valid grades.
pub fn find_invalid_grades(records: &[Record]) -> BTreeSet<String> {
    records
        .iter()
        .flat_map(|r| r.subjects.iter())
        .map(|pair| pair.grade.as_str())
        .filter(|grade| Grade::from_label(grade).is_none())
        .map(str::to_string)
        .collect()
}

pub fn report_invalid_grades(invalid: &BTreeSet<String>) {
    if invalid.is_empty() {
        let valid: Vec<&str> = Grade::ALL.iter().map(|g| g.label()).collect();
        tracing::info!("All grades are valid: {}", valid.join(", "));
    } else {
        tracing::warn!(
            "Found invalid grades, excluded from counts: {:?}",
            invalid
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SubjectGrade;

    fn record_with(grades: &[&str]) -> Record {
        let mut record = Record::default();
        record.subjects = grades
            .iter()
            .map(|g| SubjectGrade::new("MATH", *g))
            .collect();
        record
    }

    #[test]
    fn test_reports_only_unknown_grades() {
        let records = vec![record_with(&["A", "B"]), record_with(&["Z", "A"])];
        let invalid = find_invalid_grades(&records);
        assert_eq!(invalid, BTreeSet::from(["Z".to_string()]));
    }

    #[test]
    fn test_star_r_is_valid_other_star_codes_are_not() {
        let records = vec![record_with(&["*R", "*S", "X"])];
        let invalid = find_invalid_grades(&records);
        assert_eq!(invalid, BTreeSet::from(["*S".to_string()]));
    }

    #[test]
    fn test_no_records_no_invalid_grades() {
        assert!(find_invalid_grades(&[]).is_empty());
    }
}
