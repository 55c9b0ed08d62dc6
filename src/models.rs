/// Attack-type label reserved for non-malicious traffic.
pub const BENIGN: &str = "BENIGN";

pub mod domain {
    use serde_json::{Map, Number, Value};

    /// Precomputed statistics from `stats.json`. Read-only; the dashboard
    /// never recomputes these numbers.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct StatsSummary {
        fields: Map<String, Value>,
    }

    impl StatsSummary {
        pub fn new(fields: Map<String, Value>) -> Self {
            StatsSummary { fields }
        }

        pub fn is_empty(&self) -> bool {
            self.fields.is_empty()
        }

        /// Kept as stored, so `100.7` is shown as `100.7`.
        pub fn total_events(&self) -> Option<Number> {
            match self.fields.get("total_events")? {
                Value::Number(n) => Some(n.clone()),
                _ => None,
            }
        }

        pub fn attack_rate_pct(&self) -> f64 {
            self.number("attack_rate_pct")
        }

        pub fn total_benign(&self) -> f64 {
            self.number("total_benign")
        }

        pub fn total_attacks(&self) -> f64 {
            self.number("total_attacks")
        }

        /// Counts per attack type, in document order.
        pub fn by_attack_type(&self) -> Vec<(String, f64)> {
            self.breakdown("by_attack_type")
        }

        /// Counts per destination port, in document order.
        pub fn top_destination_ports(&self) -> Vec<(String, f64)> {
            self.breakdown("top_destination_ports")
        }

        fn number(&self, key: &str) -> f64 {
            self.fields.get(key).and_then(Value::as_f64).unwrap_or(0.0)
        }

        fn breakdown(&self, key: &str) -> Vec<(String, f64)> {
            match self.fields.get(key) {
                Some(Value::Object(map)) => map
                    .iter()
                    .filter_map(|(k, v)| v.as_f64().map(|n| (k.clone(), n)))
                    .collect(),
                _ => Vec::new(),
            }
        }
    }

    /// One named stage of the serialized classifier pipeline.
    #[derive(Debug, Clone, PartialEq)]
    pub struct PipelineStep {
        pub name: String,
        pub repr: String,
    }

    /// Trained classifier manifest. Only its step list is displayed; the
    /// dashboard never runs inference.
    #[derive(Debug, Clone, PartialEq)]
    pub struct ClassifierArtifact {
        pub steps: Vec<PipelineStep>,
    }
}

pub mod dto {
    use serde::Serialize;

    #[derive(Debug, Serialize, Clone, PartialEq)]
    pub struct KpiReport {
        pub total_events: serde_json::Number,
        pub malicious_rate_pct: f64,
        pub top_attack_type: String,
        pub avg_response_secs: Option<f64>,
        pub unique_source_ips: Option<usize>,
        pub unique_destination_ips: Option<usize>,
        pub top_destination_port: String,
        pub benign_pct: f64,
        pub malicious_pct: f64,
    }
}
