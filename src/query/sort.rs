use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::cmp::Ordering;

use super::{FieldKind, SortDirection};
use crate::record::{field_text, Record};
use crate::status::fold_for_collation;

const DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Comparison key for one record under one field.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SortKey {
    /// Collation key, then the raw text as a tie-breaker.
    Text(String, String),
    Millis(i64),
    Number(f64),
}

impl SortKey {
    pub(crate) fn of(record: &Record, field: &str, kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text => {
                let raw = field_text(record, field);
                SortKey::Text(fold_for_collation(&raw), raw)
            }
            FieldKind::Date => SortKey::Millis(timestamp_millis(record.get(field))),
            FieldKind::Number => SortKey::Number(numeric(record.get(field))),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Text(a, raw_a), SortKey::Text(b, raw_b)) => {
                a.cmp(b).then_with(|| raw_a.cmp(raw_b))
            }
            (SortKey::Millis(a), SortKey::Millis(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Stable sort of `records` by `field`. Equal keys keep their relative order.
pub(crate) fn sort_records(
    records: &mut Vec<&Record>,
    field: &str,
    kind: FieldKind,
    direction: SortDirection,
) {
    let mut keyed: Vec<(SortKey, &Record)> = records
        .iter()
        .map(|record| (SortKey::of(record, field, kind), *record))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = a.compare(b);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    records.clear();
    records.extend(keyed.into_iter().map(|(_, record)| record));
}

/// Milliseconds since the epoch; `i64::MIN` when absent or unparsable.
fn timestamp_millis(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::String(text)) => parse_date(text.trim()).unwrap_or(i64::MIN),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(i64::MIN),
        _ => i64::MIN,
    }
}

fn parse_date(text: &str) -> Option<i64> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.timestamp_millis());
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed.and_utc().timestamp_millis());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|midnight| midnight.and_utc().timestamp_millis());
        }
    }
    None
}

/// Numbers and finite numeric strings; anything else is 0.
fn numeric(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::records_from;
    use serde_json::json;

    fn order_of(records: &[&Record], field: &str) -> Vec<String> {
        records.iter().map(|r| field_text(r, field)).collect()
    }

    #[test]
    fn parses_supported_date_forms() {
        let midnight = parse_date("2024-03-01").unwrap();
        assert_eq!(parse_date("2024-03-01T00:00:00Z"), Some(midnight));
        assert_eq!(parse_date("2024-03-01T00:00:00.000"), Some(midnight));
        assert_eq!(parse_date("2024-03-01 00:00:00"), Some(midnight));
        assert_eq!(parse_date("01/03/2024"), Some(midnight));
        assert_eq!(parse_date("2024-03-01T03:00:00+03:00"), Some(midnight));
        assert_eq!(parse_date("ontem"), None);
    }

    #[test]
    fn missing_and_unparsable_dates_sort_first() {
        let records = records_from(json!([
            { "id": 1, "dataEmissao": "2024-02-10" },
            { "id": 2, "dataEmissao": "sem data" },
            { "id": 3, "dataEmissao": "2023-12-31T23:59:59Z" },
            { "id": 4 }
        ]));
        let mut view: Vec<&Record> = records.iter().collect();
        sort_records(&mut view, "dataEmissao", FieldKind::Date, SortDirection::Ascending);

        assert_eq!(order_of(&view, "id"), vec!["2", "4", "3", "1"]);
    }

    #[test]
    fn numbers_and_numeric_strings() {
        let records = records_from(json!([
            { "id": 1, "valor": "150.5" },
            { "id": 2, "valor": 20 },
            { "id": 3 },
            { "id": 4, "valor": 1000 }
        ]));
        let mut view: Vec<&Record> = records.iter().collect();
        sort_records(&mut view, "valor", FieldKind::Number, SortDirection::Descending);

        assert_eq!(order_of(&view, "id"), vec!["4", "1", "2", "3"]);
    }

    #[test]
    fn non_finite_text_counts_as_zero() {
        let records = records_from(json!([
            { "id": 1, "valor": "NaN" },
            { "id": 2, "valor": 5 },
            { "id": 3, "valor": "inf" },
            { "id": 4, "valor": -1 },
            { "id": 5, "valor": "-infinity" }
        ]));
        let mut view: Vec<&Record> = records.iter().collect();
        sort_records(&mut view, "valor", FieldKind::Number, SortDirection::Ascending);

        assert_eq!(order_of(&view, "id"), vec!["4", "1", "3", "5", "2"]);
    }

    #[test]
    fn text_ignores_case_and_accents() {
        let records = records_from(json!([
            { "id": 1, "tipoCredito": "Restituição" },
            { "id": 2, "tipoCredito": "compensação" },
            { "id": 3, "tipoCredito": "Ácido" },
            { "id": 4, "tipoCredito": "Bônus" }
        ]));
        let mut view: Vec<&Record> = records.iter().collect();
        sort_records(&mut view, "tipoCredito", FieldKind::Text, SortDirection::Ascending);

        assert_eq!(order_of(&view, "id"), vec!["3", "4", "2", "1"]);
    }

    #[test]
    fn equal_keys_keep_input_order_both_directions() {
        let records = records_from(json!([
            { "id": 1, "status": "APROVADO" },
            { "id": 2, "status": "EM_ANALISE" },
            { "id": 3, "status": "APROVADO" },
            { "id": 4, "status": "EM_ANALISE" }
        ]));

        let mut ascending: Vec<&Record> = records.iter().collect();
        sort_records(&mut ascending, "status", FieldKind::Text, SortDirection::Ascending);
        assert_eq!(order_of(&ascending, "id"), vec!["1", "3", "2", "4"]);

        let mut descending: Vec<&Record> = records.iter().collect();
        sort_records(&mut descending, "status", FieldKind::Text, SortDirection::Descending);
        assert_eq!(order_of(&descending, "id"), vec!["2", "4", "1", "3"]);
    }
}
