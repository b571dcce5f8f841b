use crate::domain::model::{MeasureEntry, MeasureValue, ProjectMeasureSet, GATE_METRIC};
use std::collections::HashMap;

/// Types a raw measure string by metric name. Ratings arrive as "1.0"-style
/// strings and become integers; percentages stay decimal; status and
/// distribution metrics stay text.
pub fn parse_value(metric: &str, raw: &str) -> MeasureValue {
    if metric == GATE_METRIC || metric.ends_with("_distribution") {
        return MeasureValue::Text(raw.to_string());
    }

    if metric.ends_with("_rating") {
        return match raw.parse::<f64>() {
            Ok(value) => MeasureValue::Integer(value as i64),
            Err(_) => MeasureValue::Text(raw.to_string()),
        };
    }

    if metric == "coverage" || metric.ends_with("_density") {
        return match raw.parse::<f64>() {
            Ok(value) => MeasureValue::Decimal(value),
            Err(_) => MeasureValue::Text(raw.to_string()),
        };
    }

    // counts and efforts; anything non-numeric is preserved as-is
    if let Ok(value) = raw.parse::<i64>() {
        return MeasureValue::Integer(value);
    }
    if let Ok(value) = raw.parse::<f64>() {
        return MeasureValue::Decimal(value);
    }
    MeasureValue::Text(raw.to_string())
}

/// Flattens raw measure entries into a per-project, per-metric mapping. A
/// repeated (project, metric) pair keeps the later value.
pub fn normalize(entries: &[MeasureEntry]) -> ProjectMeasureSet {
    let mut result: ProjectMeasureSet = HashMap::new();

    for entry in entries {
        result
            .entry(entry.component.clone())
            .or_default()
            .insert(entry.metric.clone(), parse_value(&entry.metric, &entry.value));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_parse_to_integers() {
        assert_eq!(
            parse_value("security_rating", "2.0"),
            MeasureValue::Integer(2)
        );
        assert_eq!(parse_value("sqale_rating", "5"), MeasureValue::Integer(5));
    }

    #[test]
    fn percentages_stay_decimal() {
        assert_eq!(parse_value("coverage", "84.3"), MeasureValue::Decimal(84.3));
        assert_eq!(
            parse_value("duplicated_lines_density", "0.5"),
            MeasureValue::Decimal(0.5)
        );
    }

    #[test]
    fn status_and_distribution_stay_text() {
        assert_eq!(
            parse_value("alert_status", "OK"),
            MeasureValue::Text("OK".to_string())
        );
        assert_eq!(
            parse_value("ncloc_language_distribution", "rust=1204;toml=45"),
            MeasureValue::Text("rust=1204;toml=45".to_string())
        );
    }

    #[test]
    fn counts_parse_to_integers() {
        assert_eq!(parse_value("bugs", "17"), MeasureValue::Integer(17));
        assert_eq!(parse_value("ncloc", "120433"), MeasureValue::Integer(120433));
    }

    #[test]
    fn unparseable_numbers_fall_back_to_text() {
        assert_eq!(
            parse_value("bugs", "n/a"),
            MeasureValue::Text("n/a".to_string())
        );
    }

    #[test]
    fn groups_entries_by_project() {
        let entries = vec![
            MeasureEntry::new("a", "bugs", "3"),
            MeasureEntry::new("a", "coverage", "71.0"),
            MeasureEntry::new("b", "bugs", "0"),
        ];

        let set = normalize(&entries);

        assert_eq!(set.len(), 2);
        assert_eq!(set["a"]["bugs"], MeasureValue::Integer(3));
        assert_eq!(set["a"]["coverage"], MeasureValue::Decimal(71.0));
        assert_eq!(set["b"]["bugs"], MeasureValue::Integer(0));
    }

    #[test]
    fn duplicate_pair_keeps_the_later_value() {
        let entries = vec![
            MeasureEntry::new("a", "bugs", "3"),
            MeasureEntry::new("a", "bugs", "7"),
        ];

        let set = normalize(&entries);

        assert_eq!(set["a"]["bugs"], MeasureValue::Integer(7));
    }
}
