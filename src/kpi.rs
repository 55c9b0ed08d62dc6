use crate::aggregate::{self, format_decimal, round2};
use crate::models::domain::StatsSummary;
use crate::models::dto::KpiReport;
use crate::models::BENIGN;
use crate::table::Table;
use serde_json::Number;

/// Shown when the event table has fewer than two usable timestamps.
pub const RESPONSE_PLACEHOLDER: &str = "<30s>";
pub const NOT_AVAILABLE: &str = "N/A";

/// Headline numbers for the overview page.
#[derive(Debug, Clone, PartialEq)]
pub struct Kpis {
    pub total_events: Number,
    pub malicious_rate: f64,
    pub top_attack: String,
    pub avg_response_secs: Option<f64>,
    pub unique_sources: Option<usize>,
    pub unique_destinations: Option<usize>,
    pub top_port: String,
    pub benign_pct: f64,
    pub malicious_pct: f64,
}

impl Kpis {
    pub fn compute(events: &Table, summary: &StatsSummary) -> Self {
        let (benign_pct, malicious_pct) =
            traffic_split(summary.total_benign(), summary.total_attacks());
        Kpis {
            total_events: summary
                .total_events()
                .unwrap_or_else(|| Number::from(events.len())),
            malicious_rate: round2(summary.attack_rate_pct()),
            top_attack: top_attack_type(&summary.by_attack_type())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            avg_response_secs: avg_response_secs(events),
            unique_sources: events.distinct_count("source_ip"),
            unique_destinations: events.distinct_count("destination_ip"),
            top_port: arg_max(&summary.top_destination_ports())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            benign_pct,
            malicious_pct,
        }
    }

    /// "Inverse" emphasis on the malicious-rate card once attacks dominate.
    pub fn malicious_dominates(&self) -> bool {
        self.malicious_rate > 50.0
    }

    pub fn avg_response_label(&self) -> String {
        match self.avg_response_secs {
            Some(secs) => format!("{} s", format_decimal(secs)),
            None => RESPONSE_PLACEHOLDER.to_string(),
        }
    }

    pub fn report(&self) -> KpiReport {
        KpiReport {
            total_events: self.total_events.clone(),
            malicious_rate_pct: self.malicious_rate,
            top_attack_type: self.top_attack.clone(),
            avg_response_secs: self.avg_response_secs.map(round2),
            unique_source_ips: self.unique_sources,
            unique_destination_ips: self.unique_destinations,
            top_destination_port: self.top_port.clone(),
            benign_pct: self.benign_pct,
            malicious_pct: self.malicious_pct,
        }
    }
}

/// Most frequent non-benign attack type; the first one wins a tie.
pub fn top_attack_type(counts: &[(String, f64)]) -> Option<String> {
    let malicious: Vec<(String, f64)> = counts
        .iter()
        .filter(|(k, _)| k != BENIGN)
        .cloned()
        .collect();
    arg_max(&malicious)
}

fn arg_max(counts: &[(String, f64)]) -> Option<String> {
    let mut best: Option<&(String, f64)> = None;
    for entry in counts {
        if best.map_or(true, |b| entry.1 > b.1) {
            best = Some(entry);
        }
    }
    best.map(|(k, _)| k.clone())
}

/// Benign and malicious shares of total traffic, each rounded to two
/// decimals. Both are zero when there is no traffic.
pub fn traffic_split(benign: f64, attacks: f64) -> (f64, f64) {
    let total = benign + attacks;
    if total <= 0.0 {
        return (0.0, 0.0);
    }
    (round2(benign / total * 100.0), round2(attacks / total * 100.0))
}

/// Mean gap between consecutive events once sorted by time.
pub fn avg_response_secs(events: &Table) -> Option<f64> {
    aggregate::mean_interval_secs(events.column("timestamp")?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary(v: serde_json::Value) -> StatsSummary {
        match v {
            serde_json::Value::Object(map) => StatsSummary::new(map),
            _ => unreachable!(),
        }
    }

    fn events(csv: &str) -> Table {
        Table::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn headline_numbers_from_summary() {
        let s = summary(json!({
            "total_events": 100,
            "attack_rate_pct": 42.5,
            "by_attack_type": {"BENIGN": 60, "DOS": 40}
        }));
        let k = Kpis::compute(&Table::default(), &s);
        assert_eq!(k.total_events, Number::from(100));
        assert_eq!(k.malicious_rate, 42.5);
        assert_eq!(k.top_attack, "DOS");
        assert!(!k.malicious_dominates());
    }

    #[test]
    fn fractional_total_is_kept_as_stored() {
        let k = Kpis::compute(&Table::default(), &summary(json!({"total_events": 100.7})));
        assert_eq!(k.total_events.to_string(), "100.7");
        assert_eq!(serde_json::to_value(k.report()).unwrap()["total_events"], 100.7);
    }

    #[test]
    fn total_events_falls_back_to_row_count() {
        let e = events("timestamp,source_ip,destination_ip,attack_type\n\
                        2017-07-03 08:00:00,a,x,BENIGN\n\
                        2017-07-03 08:00:05,b,x,DOS\n");
        let k = Kpis::compute(&e, &summary(json!({"attack_rate_pct": 73.456})));
        assert_eq!(k.total_events, Number::from(2));
        assert_eq!(k.malicious_rate, 73.46);
        assert!(k.malicious_dominates());
        assert_eq!(k.unique_sources, Some(2));
        assert_eq!(k.unique_destinations, Some(1));
    }

    #[test]
    fn benign_never_wins_top_attack() {
        let counts = vec![
            ("BENIGN".to_string(), 1000.0),
            ("PortScan".to_string(), 3.0),
            ("DDoS".to_string(), 9.0),
        ];
        assert_eq!(top_attack_type(&counts).as_deref(), Some("DDoS"));
        assert_eq!(top_attack_type(&counts[..1]), None);
    }

    #[test]
    fn top_attack_is_na_without_malicious_entries() {
        let k = Kpis::compute(
            &Table::default(),
            &summary(json!({"by_attack_type": {"BENIGN": 5}})),
        );
        assert_eq!(k.top_attack, NOT_AVAILABLE);
        assert_eq!(k.top_port, NOT_AVAILABLE);
    }

    #[test]
    fn traffic_split_sums_to_hundred() {
        assert_eq!(traffic_split(60.0, 40.0), (60.0, 40.0));
        let (b, m) = traffic_split(1.0, 2.0);
        assert!((b + m - 100.0).abs() <= 0.01);
        assert_eq!(traffic_split(0.0, 0.0), (0.0, 0.0));
    }

    #[test]
    fn avg_response_over_sorted_timestamps() {
        let e = events("timestamp\n2017-07-03 08:00:20\n2017-07-03 08:00:00\n2017-07-03 08:00:10\n");
        let k = Kpis::compute(&e, &summary(json!({"total_events": 3})));
        assert_eq!(k.avg_response_label(), "10.0 s");
    }

    #[test]
    fn avg_response_placeholder_for_single_row() {
        let e = events("timestamp\n2017-07-03 08:00:00\n");
        assert_eq!(avg_response_secs(&e), None);
        let k = Kpis::compute(&e, &summary(json!({"total_events": 1})));
        assert_eq!(k.avg_response_label(), RESPONSE_PLACEHOLDER);
    }

    #[test]
    fn top_port_from_summary_breakdown() {
        let s = summary(json!({"top_destination_ports": {"80": 10, "443": 25, "22": 25}}));
        assert_eq!(Kpis::compute(&Table::default(), &s).top_port, "443");
    }
}
