use crate::domain::grades::star_code_meaning;
use crate::domain::model::{Record, AGGT_COLUMN, DIV_COLUMN};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarCodeEntry {
    pub value: String,
    pub meaning: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnStarCodes {
    pub column: &'static str,
    pub entries: Vec<StarCodeEntry>,
}

/// Starred values in the AGGT and DIV columns with their meaning and count.
/// Columns absent from the table or without starred values are left out.
pub fn summarize_star_codes(records: &[Record]) -> Vec<ColumnStarCodes> {
    [AGGT_COLUMN, DIV_COLUMN]
        .into_iter()
        .filter_map(|column| {
            let mut entries: Vec<StarCodeEntry> = Vec::new();
            for value in records.iter().filter_map(|r| r.get(column)) {
                if !value.contains('*') {
                    continue;
                }
                match entries.iter_mut().find(|e| e.value == value) {
                    Some(entry) => entry.count += 1,
                    None => entries.push(StarCodeEntry {
                        value: value.to_string(),
                        meaning: star_code_meaning(value),
                        count: 1,
                    }),
                }
            }
            (!entries.is_empty()).then_some(ColumnStarCodes { column, entries })
        })
        .collect()
}
