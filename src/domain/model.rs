use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

pub const SEX_COLUMN: &str = "SEX";
pub const AGGT_COLUMN: &str = "AGGT";
pub const DIV_COLUMN: &str = "DIV";
pub const SUBJECTS_COLUMN: &str = "DETAILED SUBJECTS";
pub const PAIRS_KEY: &str = "Subject_Grade_Pairs";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectGrade {
    pub subject: String,
    pub grade: String,
}

impl SubjectGrade {
    pub fn new(subject: impl Into<String>, grade: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            grade: grade.into(),
        }
    }
}

/// One header-labelled cell. `None` marks a cell that rendered empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub fn from_value(raw: &str) -> Option<Sex> {
        match raw.trim() {
            "F" | "f" => Some(Sex::Female),
            "M" | "m" => Some(Sex::Male),
            _ => None,
        }
    }
}

/// One candidate row, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub fields: Vec<Field>,
    pub subjects: Vec<SubjectGrade>,
}

impl Record {
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            subjects: Vec::new(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == column)
            .and_then(|f| f.value.as_deref())
    }

    pub fn sex(&self) -> Option<Sex> {
        self.get(SEX_COLUMN).and_then(Sex::from_value)
    }

    pub fn present_fields(&self) -> usize {
        self.fields.iter().filter(|f| f.value.is_some()).count()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        for field in &self.fields {
            map.serialize_entry(&field.name, &field.value)?;
        }
        map.serialize_entry(PAIRS_KEY, &self.subjects)?;
        map.end()
    }
}

/// A rendered summary: header row plus data rows, all as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlSource {
    Url(String),
    File(PathBuf),
}

impl std::fmt::Display for HtmlSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HtmlSource::Url(url) => f.write_str(url),
            HtmlSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub records: String,
    pub summary: String,
    pub divisions: String,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            records: "necta_results.json".to_string(),
            summary: "necta_summary.csv".to_string(),
            divisions: "necta_div_summary.csv".to_string(),
        }
    }
}

/// Everything the transform stage derives from the enriched records.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub records: Vec<Record>,
    pub invalid_grades: BTreeSet<String>,
    pub summary_table: Table,
    pub division_table: Table,
    pub console_summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFailure {
    pub artifact: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub written: Vec<String>,
    pub failed: Vec<ArtifactFailure>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, value: Option<&str>) -> Field {
        Field {
            name: name.to_string(),
            value: value.map(str::to_string),
        }
    }

    #[test]
    fn test_record_serializes_in_header_order_with_pairs() {
        let mut record = Record::new(vec![
            field("CNO", Some("S0507/0001")),
            field("SEX", Some("F")),
            field("AGGT", None),
        ]);
        record.subjects.push(SubjectGrade::new("CIV", "C"));

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"CNO":"S0507/0001","SEX":"F","AGGT":null,"Subject_Grade_Pairs":[{"subject":"CIV","grade":"C"}]}"#
        );
    }

    #[test]
    fn test_sex_lookup() {
        let record = Record::new(vec![field("SEX", Some(" M "))]);
        assert_eq!(record.sex(), Some(Sex::Male));
        assert_eq!(Record::new(vec![field("SEX", None)]).sex(), None);
        assert_eq!(Record::new(vec![field("SEX", Some("U"))]).sex(), None);
    }
}
