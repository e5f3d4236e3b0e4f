use crate::core::aggregate::{DivisionCounts, SubjectGradeCounts};
use crate::core::scores::ScoreStats;
use crate::core::star_codes::ColumnStarCodes;
use crate::domain::grades::Grade;
use crate::domain::model::{Record, Sex, Table, DIV_COLUMN};
use crate::utils::error::{NectaError, Result};
use std::collections::HashMap;
use std::fmt::Write;

/// `Subject, F_A, M_A, Total_A, ...` with one row per subject.
/// Totals are female plus male.
pub fn subject_grade_table(counts: &SubjectGradeCounts) -> Table {
    let mut headers = vec!["Subject".to_string()];
    for grade in Grade::ALL {
        headers.push(format!("F_{}", grade));
        headers.push(format!("M_{}", grade));
        headers.push(format!("Total_{}", grade));
    }

    let rows = counts
        .subjects
        .iter()
        .map(|(subject, tally)| {
            let mut row = vec![subject.clone()];
            for grade in Grade::ALL {
                let i = grade.index();
                row.push(tally.female[i].to_string());
                row.push(tally.male[i].to_string());
                row.push((tally.female[i] + tally.male[i]).to_string());
            }
            row
        })
        .collect();

    Table { headers, rows }
}

pub fn division_table(counts: &DivisionCounts) -> Table {
    let headers = ["DIV", "F", "M", "Total"].map(String::from).to_vec();
    let rows = counts
        .ordered()
        .into_iter()
        .map(|(div, tally)| {
            vec![
                div.to_string(),
                tally.female.to_string(),
                tally.male.to_string(),
                tally.total().to_string(),
            ]
        })
        .collect();

    Table { headers, rows }
}

pub fn to_csv_bytes(table: &Table) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| NectaError::IoError(e.into_error()))
}

/// Fixed-width text rendering, one line per row.
pub fn render_table(table: &Table) -> String {
    let widths: Vec<usize> = (0..table.headers.len())
        .map(|col| {
            table
                .rows
                .iter()
                .filter_map(|r| r.get(col))
                .chain(std::iter::once(&table.headers[col]))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:>width$}", cell, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut out = line(&table.headers);
    for row in &table.rows {
        out.push('\n');
        out.push_str(&line(row));
    }
    out
}

pub struct SummaryInputs<'a> {
    pub records: &'a [Record],
    pub subjects: &'a SubjectGradeCounts,
    pub scores: &'a ScoreStats,
    pub star_codes: &'a [ColumnStarCodes],
    pub division_table: &'a Table,
}

/// Console summary of a centre's results.
pub fn console_summary(inputs: &SummaryInputs<'_>) -> String {
    let mut out = String::new();
    let _ = write_summary(&mut out, inputs);
    out
}

fn write_summary(out: &mut String, inputs: &SummaryInputs<'_>) -> std::fmt::Result {
    writeln!(out, "Grade Counts by Subject and Sex:")?;
    for (subject, tally) in &inputs.subjects.subjects {
        writeln!(out, "\nSubject: {}", subject)?;
        for (sex, label) in [(Sex::Female, "F"), (Sex::Male, "M")] {
            let counts = tally.for_sex(sex);
            writeln!(out, "  Sex: {}", label)?;
            for grade in Grade::ALL {
                writeln!(out, "    Grade {}: {}", grade, counts[grade.index()])?;
            }
        }
    }

    writeln!(out, "\nTotal Grade Counts by Subject:")?;
    for (subject, tally) in &inputs.subjects.subjects {
        writeln!(out, "\nSubject: {}", subject)?;
        for grade in Grade::ALL {
            writeln!(out, "  Grade {}: {}", grade, tally.overall[grade.index()])?;
        }
    }

    let records = inputs.records;
    let female = records.iter().filter(|r| r.sex() == Some(Sex::Female)).count();
    let male = records.iter().filter(|r| r.sex() == Some(Sex::Male)).count();
    let grades: Vec<&str> = Grade::ALL.iter().map(|g| g.label()).collect();

    writeln!(out, "\nAdditional Summary Statistics:")?;
    writeln!(out, "Total Students: {}", records.len())?;
    writeln!(out, "Total Female Students: {}", female)?;
    writeln!(out, "Total Male Students: {}", male)?;
    writeln!(out, "Unique Subjects Count: {}", inputs.subjects.subjects.len())?;
    writeln!(out, "Valid Grades: {}", grades.join(", "))?;
    writeln!(out, "Division Counts:")?;
    for (division, count) in division_value_counts(records) {
        writeln!(out, "  {}: {}", division, count)?;
    }

    match inputs.scores.mean {
        Some(mean) => writeln!(out, "Average AGGT (numeric values only): {:.2}", mean)?,
        None => writeln!(out, "Average AGGT: Not calculable (no numeric values)")?,
    }
    if !inputs.scores.non_numeric.is_empty() {
        writeln!(
            out,
            "Non-numeric AGGT values found: {}",
            inputs.scores.non_numeric.join(", ")
        )?;
    }

    if inputs.star_codes.is_empty() {
        writeln!(out, "\nNo star codes found in AGGT or DIV columns.")?;
    } else {
        writeln!(out, "\nStar Codes Summary:")?;
        for column in inputs.star_codes {
            writeln!(out, "\nColumn: {}", column.column)?;
            for entry in &column.entries {
                writeln!(
                    out,
                    "  {}: {} (Count: {})",
                    entry.value, entry.meaning, entry.count
                )?;
            }
        }
    }

    writeln!(out, "\nDIV Summary by Sex:")?;
    writeln!(out, "{}", render_table(inputs.division_table))?;
    Ok(())
}

/// Occurrences of each DIV value, most frequent first.
fn division_value_counts(records: &[Record]) -> Vec<(&str, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for division in records.iter().filter_map(|r| r.get(DIV_COLUMN)) {
        *counts.entry(division).or_default() += 1;
    }
    let mut counts: Vec<(&str, usize)> = counts.into_iter().collect();
    counts.sort_by(|(a, ca), (b, cb)| cb.cmp(ca).then_with(|| a.cmp(b)));
    counts
}
