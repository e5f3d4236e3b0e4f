use crate::domain::model::{Field, Record};
use crate::utils::error::{NectaError, Result};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").expect("selector should parse"));
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("selector should parse"));
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td, th").expect("selector should parse"));

/// Reads the last `<table>` of the page into header-labelled records.
///
/// The first row names the columns; header cells with no text are skipped but
/// keep their position, so each data cell is matched to the header in the same
/// column. Data cells that render empty are stored as missing values rather than
/// shifting later cells left. Rows with no text at all are dropped.
pub fn extract_records(html: &str) -> Result<Vec<Record>> {
    let document = Html::parse_document(html);

    // Nested tables come after their parent in document order, so the last
    // match never contains another table and its rows are all its own.
    let table = document
        .select(&TABLE)
        .last()
        .ok_or_else(|| NectaError::ExtractionError {
            message: "no table element found in document".to_string(),
        })?;

    let mut rows = table.select(&ROW);
    let Some(header_row) = rows.next() else {
        tracing::warn!("Results table has no rows");
        return Ok(Vec::new());
    };

    let headers: Vec<(usize, String)> = cell_texts(header_row)
        .into_iter()
        .enumerate()
        .filter(|(_, text)| !text.is_empty())
        .collect();
    tracing::debug!(
        "Table headers: {:?}",
        headers.iter().map(|(_, h)| h.as_str()).collect::<Vec<_>>()
    );

    let mut records = Vec::new();
    for (row_no, row) in rows.enumerate() {
        let mut values = cell_texts(row);

        let fields: Vec<Field> = headers
            .iter()
            .map(|(idx, name)| Field {
                name: name.clone(),
                value: values
                    .get_mut(*idx)
                    .map(std::mem::take)
                    .filter(|v| !v.is_empty()),
            })
            .collect();

        let record = Record::new(fields);
        if record.present_fields() == 0 {
            tracing::debug!("Skipping row {} with no values", row_no + 1);
            continue;
        }
        if values.iter().any(|v| !v.is_empty()) {
            tracing::debug!("Row {} has cells outside the header columns", row_no + 1);
        }
        records.push(record);
    }

    Ok(records)
}

/// Rendered text of every cell in the row. Inner whitespace is kept intact since
/// runs of spaces delimit the subject list.
fn cell_texts(row: ElementRef<'_>) -> Vec<String> {
    row.select(&CELL)
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(rows: &str) -> String {
        format!(
            r#"<html><body>
<table><tr><td>Centre header</td></tr></table>
<table>{}</table>
</body></html>"#,
            rows
        )
    }

    #[test]
    fn test_no_table_is_an_extraction_error() {
        let err = extract_records("<html><body><p>Not found</p></body></html>").unwrap_err();
        assert!(matches!(err, NectaError::ExtractionError { .. }));
    }

    #[test]
    fn test_uses_last_table_and_header_labels() {
        let html = page(
            r#"<tr><td><font>CNO</font></td><td><font>SEX</font></td><td><font>AGGT</font></td><td><font>DIV</font></td></tr>
<tr><td><font>S0507/0001</font></td><td><font>F</font></td><td><font>17</font></td><td><font>II</font></td></tr>"#,
        );

        let records = extract_records(&html).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("CNO"), Some("S0507/0001"));
        assert_eq!(records[0].get("SEX"), Some("F"));
        assert_eq!(records[0].get("AGGT"), Some("17"));
        assert_eq!(records[0].get("DIV"), Some("II"));
    }

    #[test]
    fn test_empty_middle_cell_stays_in_its_column() {
        let html = page(
            r#"<tr><td>NAME</td><td>SEX</td><td>AGGT</td><td>DIV</td></tr>
<tr><td>JUMA</td><td>M</td><td></td><td>IV</td></tr>"#,
        );

        let records = extract_records(&html).unwrap();
        let record = &records[0];
        assert_eq!(record.fields.len(), 4);
        assert_eq!(record.present_fields(), 3);
        assert_eq!(record.get("AGGT"), None);
        assert_eq!(record.get("DIV"), Some("IV"));
    }

    #[test]
    fn test_empty_header_cells_are_skipped() {
        let html = page(
            r#"<tr><td>CNO</td><td>&nbsp;</td><td>SEX</td></tr>
<tr><td>S0507/0002</td><td></td><td>F</td></tr>"#,
        );

        let records = extract_records(&html).unwrap();
        let names: Vec<&str> = records[0].fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["CNO", "SEX"]);
        assert_eq!(records[0].get("SEX"), Some("F"));
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let html = page(
            r#"<tr><td>CNO</td><td>SEX</td></tr>
<tr><td> </td><td></td></tr>
<tr><td>S0507/0003</td><td>M</td></tr>"#,
        );

        let records = extract_records(&html).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("CNO"), Some("S0507/0003"));
    }

    #[test]
    fn test_header_only_table_yields_no_records() {
        let html = page("<tr><td>CNO</td><td>SEX</td><td>DIV</td></tr>");
        assert!(extract_records(&html).unwrap().is_empty());
    }

    #[test]
    fn test_subject_text_keeps_inner_spacing() {
        let html = page(
            r#"<tr><td>CNO</td><td>DETAILED SUBJECTS</td></tr>
<tr><td>S0507/0004</td><td><font>CIV - 'C'  HIST - 'D'</font></td></tr>"#,
        );

        let records = extract_records(&html).unwrap();
        assert_eq!(records[0].get("DETAILED SUBJECTS"), Some("CIV - 'C'  HIST - 'D'"));
    }
}
