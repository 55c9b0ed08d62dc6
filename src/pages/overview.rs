use crate::aggregate::format_decimal;
use crate::kpi::Kpis;
use crate::loader::Dataset;
use crate::models::BENIGN;
use crate::table::Table;
use crate::view::{Block, Cell, MetricCard, Page, TableView};

pub const TITLE: &str = "🛡️ Security Dashboard – Threat Monitoring";
const PREVIEW_ROWS: usize = 10;

pub fn render(data: &Dataset) -> Page {
    let mut page = Page::new(TITLE);

    page.push(Block::Subheader("📊 Key Security Metrics".into()));
    if data.summary.is_empty() {
        page.push(Block::Warning("stats.json is empty or not found.".into()));
    } else {
        kpi_cards(&mut page, &Kpis::compute(&data.events, &data.summary));
    }

    page.push(Block::Subheader("🗂️ Data Overview with Attack Highlight".into()));
    if data.events.is_empty() {
        page.push(Block::Warning(
            "No dataset found. Please add data to the /data folder.".into(),
        ));
    } else {
        preview(&mut page, &data.events);
    }
    page
}

fn kpi_cards(page: &mut Page, k: &Kpis) {
    let count = |v: Option<usize>| v.map_or_else(|| "N/A".to_string(), |n| n.to_string());

    page.push(Block::Metrics(vec![
        MetricCard::new("🗂️ Total Events", &k.total_events),
        MetricCard::new(
            "🚨 Malicious Traffic (%)",
            format!("{}%", format_decimal(k.malicious_rate)),
        )
        .inverse(k.malicious_dominates()),
        MetricCard::new("🔥 Top Attack Type", &k.top_attack),
        MetricCard::new("⏱️ Avg Response Time", k.avg_response_label()),
    ]));
    page.push(Block::Metrics(vec![
        MetricCard::new("🌐 Unique Source IPs", count(k.unique_sources)),
        MetricCard::new("🖧 Unique Destination IPs", count(k.unique_destinations)),
        MetricCard::new("🛡️ Top Destination Port", &k.top_port),
        MetricCard::new("✅ Benign Traffic (%)", format!("{}%", format_decimal(k.benign_pct))),
        MetricCard::new("🚨 Malicious Traffic", format!("{}%", format_decimal(k.malicious_pct))),
    ]));

    if k.unique_sources.is_none() {
        page.push(super::missing_column("source_ip"));
    }
    if k.unique_destinations.is_none() {
        page.push(super::missing_column("destination_ip"));
    }
}

/// First rows of the event table with an `is_malicious` flag; non-benign
/// `attack_type` cells are highlighted.
fn preview(page: &mut Page, events: &Table) {
    let Some(idx) = events.column_index("attack_type") else {
        page.push(super::missing_column("attack_type"));
        let head = events.head(PREVIEW_ROWS);
        page.push(Block::Table(TableView::plain(head.headers(), head.rows())));
        return;
    };

    let flagged = events
        .head(PREVIEW_ROWS)
        .with_column("is_malicious", |r| (r[idx] != BENIGN).to_string());
    let rows = flagged
        .rows()
        .iter()
        .map(|r| {
            r.iter()
                .enumerate()
                .map(|(i, v)| Cell {
                    text: v.clone(),
                    highlight: i == idx && v != BENIGN,
                })
                .collect()
        })
        .collect();
    page.push(Block::Table(TableView {
        columns: flagged.headers().to_vec(),
        rows,
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::StatsSummary;
    use crate::view::Emphasis;
    use serde_json::json;

    fn dataset(events_csv: &str, stats: serde_json::Value) -> Dataset {
        let summary = match stats {
            serde_json::Value::Object(m) => StatsSummary::new(m),
            _ => unreachable!(),
        };
        Dataset {
            metrics: Table::default(),
            attack_timeline: Table::default(),
            top_source_ips: Table::default(),
            top_destination_ports: Table::default(),
            events: Table::from_reader(events_csv.as_bytes()).unwrap(),
            summary,
        }
    }

    const EVENTS: &str = "timestamp,source_ip,destination_ip,attack_type\n\
                          2017-07-03 08:00:00,10.0.0.1,10.0.0.9,BENIGN\n\
                          2017-07-03 08:00:10,10.0.0.2,10.0.0.9,DOS\n\
                          2017-07-03 08:00:20,10.0.0.2,10.0.0.8,DOS\n";

    fn cards(page: &Page) -> Vec<&MetricCard> {
        page.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Metrics(c) => Some(c.iter()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    #[test]
    fn cards_show_summary_numbers() {
        let page = render(&dataset(
            EVENTS,
            json!({
                "total_events": 100,
                "attack_rate_pct": 42.5,
                "by_attack_type": {"BENIGN": 60, "DOS": 40},
                "total_benign": 60,
                "total_attacks": 40
            }),
        ));
        let cards = cards(&page);
        let value = |label: &str| cards.iter().find(|c| c.label.contains(label)).unwrap().value.clone();
        assert_eq!(value("Total Events"), "100");
        assert_eq!(value("Malicious Traffic (%)"), "42.5%");
        assert_eq!(value("Top Attack Type"), "DOS");
        assert_eq!(value("Avg Response Time"), "10.0 s");
        assert_eq!(value("Unique Source IPs"), "2");
        assert_eq!(value("Benign Traffic (%)"), "60.0%");
        assert!(cards.iter().all(|c| c.emphasis == Emphasis::Normal));
        assert!(page.warnings().is_empty());
    }

    #[test]
    fn missing_ip_columns_show_na_and_warn() {
        let events = "timestamp,attack_type\n\
                      2017-07-03 08:00:00,BENIGN\n\
                      2017-07-03 08:00:10,DOS\n";
        let page = render(&dataset(events, json!({"total_events": 100.7})));
        let cards = cards(&page);
        let value = |label: &str| cards.iter().find(|c| c.label.contains(label)).unwrap().value.clone();
        assert_eq!(value("Total Events"), "100.7");
        assert_eq!(value("Unique Source IPs"), "N/A");
        assert_eq!(value("Unique Destination IPs"), "N/A");
        assert_eq!(
            page.warnings(),
            vec![
                "'source_ip' column not found in dataset.",
                "'destination_ip' column not found in dataset.",
            ]
        );
    }

    #[test]
    fn high_malicious_rate_is_inverse() {
        let page = render(&dataset(EVENTS, json!({"attack_rate_pct": 75.0})));
        let rate = cards(&page)
            .into_iter()
            .find(|c| c.label.contains("Malicious Traffic (%)"))
            .unwrap();
        assert_eq!(rate.emphasis, Emphasis::Inverse);
    }

    #[test]
    fn empty_summary_warns() {
        let page = render(&dataset(EVENTS, json!({})));
        assert_eq!(page.warnings(), vec!["stats.json is empty or not found."]);
    }

    #[test]
    fn preview_highlights_malicious_rows() {
        let page = render(&dataset(EVENTS, json!({})));
        let table = page
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Table(t) => Some(t),
                _ => None,
            })
            .unwrap();
        assert_eq!(table.columns.last().unwrap(), "is_malicious");
        assert!(!table.rows[0][3].highlight);
        assert!(table.rows[1][3].highlight);
        assert_eq!(table.rows[1][4].text, "true");
    }

    #[test]
    fn empty_events_warn() {
        let page = render(&dataset("timestamp,attack_type\n", json!({"total_events": 0})));
        assert!(page
            .warnings()
            .contains(&"No dataset found. Please add data to the /data folder."));
    }
}
