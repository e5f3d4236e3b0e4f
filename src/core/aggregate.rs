use crate::domain::grades::Grade;
use crate::domain::model::{Record, Sex, DIV_COLUMN, SEX_COLUMN};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Divisions listed first in the division table, in this order.
pub const CANONICAL_DIVISIONS: [&str; 5] = ["I", "II", "III", "IV", "0"];

/// Per-grade counts for one subject, indexed by `Grade::index`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeTally {
    pub female: [u32; Grade::COUNT],
    pub male: [u32; Grade::COUNT],
    /// Every occurrence, including candidates with no recognised sex.
    pub overall: [u32; Grade::COUNT],
}

impl GradeTally {
    pub fn for_sex(&self, sex: Sex) -> &[u32; Grade::COUNT] {
        match sex {
            Sex::Female => &self.female,
            Sex::Male => &self.male,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectGradeCounts {
    pub subjects: BTreeMap<String, GradeTally>,
    /// Records whose sex is missing or not F/M.
    pub unspecified_sex: usize,
}

pub fn count_subject_grades(records: &[Record]) -> SubjectGradeCounts {
    let mut counts = SubjectGradeCounts::default();

    for record in records {
        let sex = record.sex();
        if sex.is_none() {
            counts.unspecified_sex += 1;
        }
        for pair in &record.subjects {
            let tally = counts.subjects.entry(pair.subject.clone()).or_default();
            let Some(grade) = Grade::from_label(&pair.grade) else {
                continue;
            };
            let i = grade.index();
            tally.overall[i] += 1;
            match sex {
                Some(Sex::Female) => tally.female[i] += 1,
                Some(Sex::Male) => tally.male[i] += 1,
                None => {}
            }
        }
    }

    counts
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DivisionTally {
    pub female: u32,
    pub male: u32,
}

impl DivisionTally {
    pub fn total(&self) -> u32 {
        self.female + self.male
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DivisionCounts {
    pub divisions: BTreeMap<String, DivisionTally>,
    pub missing_division: usize,
    /// Records with a division but no SEX value at all; they get no row.
    pub missing_sex: usize,
}

impl DivisionCounts {
    /// Canonical divisions first, then the rest alphabetically.
    pub fn ordered(&self) -> Vec<(&str, DivisionTally)> {
        let mut rows: Vec<(&str, DivisionTally)> = self
            .divisions
            .iter()
            .map(|(div, tally)| (div.as_str(), *tally))
            .collect();
        rows.sort_by(|(a, _), (b, _)| compare_divisions(a, b));
        rows
    }
}

pub fn compare_divisions(a: &str, b: &str) -> Ordering {
    let rank = |d: &str| {
        CANONICAL_DIVISIONS
            .iter()
            .position(|c| *c == d)
            .unwrap_or(CANONICAL_DIVISIONS.len())
    };
    rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
}

pub fn count_divisions(records: &[Record]) -> DivisionCounts {
    let mut counts = DivisionCounts::default();

    for record in records {
        let Some(division) = record.get(DIV_COLUMN) else {
            counts.missing_division += 1;
            continue;
        };
        if record.get(SEX_COLUMN).is_none() {
            counts.missing_sex += 1;
            continue;
        }
        let tally = counts.divisions.entry(division.to_string()).or_default();
        match record.sex() {
            Some(Sex::Female) => tally.female += 1,
            Some(Sex::Male) => tally.male += 1,
            None => {}
        }
    }

    counts
}
