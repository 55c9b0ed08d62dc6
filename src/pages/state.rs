use super::{missing_column, Selection, ATTACK_TYPE_FIELD};
use crate::aggregate;
use crate::loader::Dataset;
use crate::view::{Block, Chart, ChartKind, MultiSelect, Page};

pub const TITLE: &str = "State & Trends";

const LINE: ChartKind = ChartKind::Line { markers: false };
const BAR: ChartKind = ChartKind::Bar {
    text: false,
    color_scale: None,
};

pub fn render(data: &Dataset, selection: &Selection) -> Page {
    let mut page = Page::new(TITLE);

    page.push(Block::Subheader("Daily Attacks Over Time".into()));
    match aggregate::daily_flag_sum(&data.attack_timeline, "timestamp", "is_attack") {
        Some(days) => {
            let points = days
                .into_iter()
                .map(|(d, n)| (d.to_string(), n as f64))
                .collect();
            page.push(Block::Chart(
                Chart::new(LINE, "Daily Attacks Over Time", points).axes("Date", "Attack Count"),
            ));
        }
        None => page.push(Block::Warning(
            "Columns 'timestamp' or 'is_attack' not found in attack timeline.".into(),
        )),
    }

    page.push(Block::Subheader("Top Source IPs".into()));
    match aggregate::pairs(&data.top_source_ips, "source_ip", "count") {
        Some(points) => page.push(Block::Chart(
            Chart::new(BAR, "Top Source IPs by Number of Attacks", points).axes("source_ip", "count"),
        )),
        None => page.push(Block::Warning(
            "Columns 'source_ip' or 'count' not found in top_source_ips.csv.".into(),
        )),
    }

    page.push(Block::Subheader("Top Destination Ports".into()));
    match aggregate::pairs(&data.top_destination_ports, "Destination Port", "count") {
        Some(points) => page.push(Block::Chart(
            Chart::new(BAR, "Top Destination Ports", points).axes("Destination Port", "count"),
        )),
        None => page.push(Block::Warning(
            "Columns 'Destination Port' or 'count' not found in top_destination_ports.csv.".into(),
        )),
    }

    page.push(Block::Subheader("Attack Type Distribution".into()));
    let (Some(counts), Some(options)) = (
        data.events.value_counts(ATTACK_TYPE_FIELD),
        data.events.unique(ATTACK_TYPE_FIELD),
    ) else {
        page.push(missing_column(ATTACK_TYPE_FIELD));
        return page;
    };
    page.push(Block::Chart(Chart::new(
        ChartKind::Pie { hole: 0.0 },
        "Distribution of Attack Types",
        as_points(counts),
    )));

    let selected = selection.resolve(&options);
    let filtered = aggregate::filter_by_values(&data.events, ATTACK_TYPE_FIELD, &selected)
        .and_then(|t| t.value_counts(ATTACK_TYPE_FIELD))
        .unwrap_or_default();
    page.push(Block::MultiSelect(MultiSelect {
        label: "Select Attack Type(s):".into(),
        field: ATTACK_TYPE_FIELD.into(),
        options,
        selected,
    }));
    page.push(Block::Chart(
        Chart::new(BAR, "Filtered Attack Types", as_points(filtered)).axes("attack_type", "count"),
    ));
    page
}

pub(super) fn as_points(counts: Vec<(String, u64)>) -> Vec<(String, f64)> {
    counts.into_iter().map(|(k, n)| (k, n as f64)).collect()
}
