use crate::domain::model::{Record, AGGT_COLUMN};
use once_cell::sync::Lazy;
use regex::Regex;

static NON_NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9.]").expect("pattern should compile"));

/// Parses an AGGT cell as a number. Star codes and other text give `None`.
pub fn parse_score(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreStats {
    pub mean: Option<f64>,
    pub numeric_count: usize,
    /// Distinct values with any character outside digits and `.`, in first-seen order.
    pub non_numeric: Vec<String>,
}

pub fn score_stats(records: &[Record]) -> ScoreStats {
    let mut stats = ScoreStats::default();
    let mut sum = 0.0;

    for raw in records.iter().filter_map(|r| r.get(AGGT_COLUMN)) {
        if let Some(value) = parse_score(raw) {
            sum += value;
            stats.numeric_count += 1;
        }
        if NON_NUMERIC.is_match(raw) && !stats.non_numeric.iter().any(|v| v == raw) {
            stats.non_numeric.push(raw.to_string());
        }
    }

    if stats.numeric_count > 0 {
        stats.mean = Some(sum / stats.numeric_count as f64);
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Field;

    fn aggt(value: Option<&str>) -> Record {
        Record::new(vec![Field {
            name: AGGT_COLUMN.to_string(),
            value: value.map(str::to_string),
        }])
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("17"), Some(17.0));
        assert_eq!(parse_score(" 21.5 "), Some(21.5));
        assert_eq!(parse_score("*E"), None);
        assert_eq!(parse_score("ABS"), None);
        assert_eq!(parse_score("inf"), None);
        assert_eq!(parse_score("NaN"), None);
    }

    #[test]
    fn test_mean_over_numeric_values_only() {
        let records = vec![
            aggt(Some("10")),
            aggt(Some("*E")),
            aggt(Some("20")),
            aggt(None),
            aggt(Some("*E")),
            aggt(Some("ABS")),
        ];
        let stats = score_stats(&records);
        assert_eq!(stats.mean, Some(15.0));
        assert_eq!(stats.numeric_count, 2);
        assert_eq!(stats.non_numeric, vec!["*E".to_string(), "ABS".to_string()]);
    }

    #[test]
    fn test_mean_not_calculable_without_numbers() {
        let stats = score_stats(&[aggt(Some("*S"))]);
        assert_eq!(stats.mean, None);
    }
}
