use crate::models::BENIGN;
use crate::table::Table;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;
use std::collections::HashSet;

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
];

/// Accepts the timestamp layouts seen in CIC-IDS exports. Offsets are
/// dropped after conversion to UTC.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `true`/`1`/`yes` and any positive number count as an attack.
pub fn parse_flag(raw: &str) -> bool {
    let raw = raw.trim();
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" => true,
        "false" | "no" | "n" | "" => false,
        other => other.parse::<f64>().map(|n| n > 0.0).unwrap_or(false),
    }
}

pub fn is_malicious(attack_type: &str) -> bool {
    attack_type != BENIGN
}

/// Sum of the flag column per calendar day, days ascending. Rows with an
/// unparseable timestamp are skipped.
pub fn daily_flag_sum(table: &Table, ts_col: &str, flag_col: &str) -> Option<Vec<(NaiveDate, u64)>> {
    let ts_idx = table.column_index(ts_col)?;
    let flag_idx = table.column_index(flag_col)?;
    let mut days: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for row in table.rows() {
        if let Some(ts) = parse_timestamp(&row[ts_idx]) {
            let hit = u64::from(parse_flag(&row[flag_idx]));
            *days.entry(ts.date()).or_insert(0) += hit;
        }
    }
    Some(days.into_iter().collect())
}

/// Number of rows per calendar day, days ascending.
pub fn daily_count(table: &Table, ts_col: &str) -> Option<Vec<(NaiveDate, u64)>> {
    let mut days: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for ts in table.column(ts_col)?.filter_map(parse_timestamp) {
        *days.entry(ts.date()).or_insert(0) += 1;
    }
    Some(days.into_iter().collect())
}

/// Sorts `(label, count)` pairs by count descending and keeps the first `n`.
/// Equal counts keep file order. Non-numeric counts sort as zero.
pub fn top_n(table: &Table, label_col: &str, count_col: &str, n: usize) -> Option<Vec<(String, f64)>> {
    let mut pairs = pairs(table, label_col, count_col)?;
    pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
    pairs.truncate(n);
    Some(pairs)
}

/// `(label, count)` pairs in file order. Unparseable or non-finite counts
/// are 0.
pub fn pairs(table: &Table, label_col: &str, count_col: &str) -> Option<Vec<(String, f64)>> {
    let label_idx = table.column_index(label_col)?;
    let count_idx = table.column_index(count_col)?;
    Some(
        table
            .rows()
            .iter()
            .map(|r| {
                let count = r[count_idx]
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|c| c.is_finite())
                    .unwrap_or(0.0);
                (r[label_idx].clone(), count)
            })
            .collect(),
    )
}

/// Rows whose `column` value is one of `selected`. An empty selection
/// yields an empty table.
pub fn filter_by_values(table: &Table, column: &str, selected: &[String]) -> Option<Table> {
    let idx = table.column_index(column)?;
    let wanted: HashSet<&str> = selected.iter().map(String::as_str).collect();
    Some(table.filter_rows(|r| wanted.contains(r[idx].as_str())))
}

/// Mean gap in seconds between consecutive timestamps after sorting.
/// `None` with fewer than two parseable timestamps.
pub fn mean_interval_secs<'a>(timestamps: impl Iterator<Item = &'a str>) -> Option<f64> {
    let mut parsed: Vec<NaiveDateTime> = timestamps.filter_map(parse_timestamp).collect();
    if parsed.len() < 2 {
        return None;
    }
    parsed.sort();
    let total: f64 = parsed
        .windows(2)
        .map(|w| (w[1] - w[0]).num_milliseconds() as f64 / 1000.0)
        .sum();
    Some(total / (parsed.len() - 1) as f64)
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Two-decimal rounding, printed with at least one decimal place
/// (`10.0`, `42.5`, `3.33`).
pub fn format_decimal(x: f64) -> String {
    // -0.001 rounds to -0.0
    let r = round2(x) + 0.0;
    if r.fract() == 0.0 {
        format!("{:.1}", r)
    } else {
        format!("{}", r)
    }
}
