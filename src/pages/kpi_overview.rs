use crate::loader::Dataset;
use crate::view::{Block, MetricCard, Page};

pub const TITLE: &str = "Security Dashboard - KPI Overview";

/// Row-count KPIs computed straight from the event table.
pub fn render(data: &Dataset) -> Page {
    let mut page = Page::new(TITLE);
    let events = &data.events;

    let mut cards = vec![MetricCard::new("Total Events", events.len())];
    for (label, column) in [
        ("Unique Source IPs", "source_ip"),
        ("Unique Destination IPs", "destination_ip"),
    ] {
        match events.distinct_count(column) {
            Some(n) => cards.push(MetricCard::new(label, n)),
            None => page.push(super::missing_column(column)),
        }
    }
    page.push(Block::Metrics(cards));
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;

    #[test]
    fn counts_rows_and_distinct_ips() {
        let data = Dataset {
            metrics: Table::default(),
            attack_timeline: Table::default(),
            top_source_ips: Table::default(),
            top_destination_ports: Table::default(),
            events: Table::from_reader(
                "source_ip,destination_ip\na,x\nb,x\na,y\na,x\n".as_bytes(),
            )
            .unwrap(),
            summary: Default::default(),
        };
        let page = render(&data);
        let Block::Metrics(cards) = &page.blocks[0] else {
            panic!("expected metrics");
        };
        let values: Vec<&str> = cards.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["4", "2", "2"]);
    }
}
