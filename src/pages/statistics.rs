use super::state::as_points;
use super::{missing_column, Selection, ATTACK_TYPE_FIELD};
use crate::aggregate::{self, is_malicious};
use crate::loader::Dataset;
use crate::table::Table;
use crate::view::{Block, Chart, ChartKind, MultiSelect, Page, Palette, Tab};

pub const TITLE: &str = "📊 Attack Statistics and Analysis";
const TOP_N: usize = 10;

pub fn render(data: &Dataset, selection: &Selection) -> Page {
    let mut page = Page::new(TITLE);
    page.push(Block::Tabs(vec![
        Tab {
            title: "Attack Distribution".into(),
            blocks: distribution(&data.events, selection),
        },
        Tab {
            title: "Trends Over Time".into(),
            blocks: trends(&data.events),
        },
        Tab {
            title: "Top IPs & Ports".into(),
            blocks: top_entities(data),
        },
    ]));
    page
}

fn malicious_only(events: &Table) -> Option<Table> {
    let idx = events.column_index(ATTACK_TYPE_FIELD)?;
    Some(events.filter_rows(|r| is_malicious(&r[idx])))
}

fn distribution(events: &Table, selection: &Selection) -> Vec<Block> {
    let Some(attacks) = malicious_only(events) else {
        return vec![missing_column(ATTACK_TYPE_FIELD)];
    };
    let mut blocks = vec![Block::Subheader(
        "Attack Type Distribution (Malicious Only)".into(),
    )];
    blocks.push(Block::Chart(Chart::new(
        ChartKind::Pie { hole: 0.4 },
        "Distribution of Attack Types",
        as_points(attacks.value_counts(ATTACK_TYPE_FIELD).unwrap_or_default()),
    )));

    blocks.push(Block::Subheader("Filtered Attack Types".into()));
    let options = attacks.unique(ATTACK_TYPE_FIELD).unwrap_or_default();
    let selected = selection.resolve(&options);
    let counts = aggregate::filter_by_values(events, ATTACK_TYPE_FIELD, &selected)
        .and_then(|t| t.value_counts(ATTACK_TYPE_FIELD))
        .unwrap_or_default();
    blocks.push(Block::MultiSelect(MultiSelect {
        label: "Select Attack Type(s):".into(),
        field: ATTACK_TYPE_FIELD.into(),
        options,
        selected,
    }));
    blocks.push(Block::Chart(
        Chart::new(
            ChartKind::Bar {
                text: true,
                color_scale: Some(Palette::Viridis),
            },
            "Filtered Attack Types",
            as_points(counts),
        )
        .axes("attack_type", "count"),
    ));
    blocks
}

fn trends(events: &Table) -> Vec<Block> {
    let daily = events
        .has_column("timestamp")
        .then(|| malicious_only(events))
        .flatten()
        .and_then(|attacks| aggregate::daily_count(&attacks, "timestamp"));
    let Some(days) = daily else {
        return vec![Block::Warning(
            "Columns 'timestamp' or 'attack_type' not found in dataset.".into(),
        )];
    };
    let points = days
        .into_iter()
        .map(|(d, n)| (d.to_string(), n as f64))
        .collect();
    vec![
        Block::Subheader("Daily Attacks Over Time".into()),
        Block::Chart(
            Chart::new(ChartKind::Line { markers: true }, "Daily Attacks Over Time", points)
                .axes("Date", "Attack Count"),
        ),
    ]
}

fn top_entities(data: &Dataset) -> Vec<Block> {
    let mut blocks = Vec::new();
    top_chart(
        &mut blocks,
        &data.top_destination_ports,
        "Destination Port",
        ("Top Destination Ports (Top 10)", "Top 10 Destination Ports"),
        Palette::Reds,
        "top_destination_ports.csv not found or empty.",
    );
    top_chart(
        &mut blocks,
        &data.top_source_ips,
        "source_ip",
        ("Top Source IPs (Top 10)", "Top 10 Source IPs by Number of Attacks"),
        Palette::Blues,
        "top_source_ips.csv not found or empty.",
    );
    blocks
}

fn top_chart(
    blocks: &mut Vec<Block>,
    table: &Table,
    label_col: &str,
    (subheader, title): (&str, &str),
    scale: Palette,
    empty_warning: &str,
) {
    if table.is_empty() {
        blocks.push(Block::Warning(empty_warning.into()));
        return;
    }
    let Some(points) = aggregate::top_n(table, label_col, "count", TOP_N) else {
        blocks.push(Block::Warning(format!(
            "Columns '{}' or 'count' not found.",
            label_col
        )));
        return;
    };
    let x_title = if label_col == "source_ip" { "Source IP" } else { label_col };
    blocks.push(Block::Subheader(subheader.into()));
    blocks.push(Block::Chart(
        Chart::new(
            ChartKind::Bar {
                text: true,
                color_scale: Some(scale),
            },
            title,
            points,
        )
        .axes(x_title, "Number of Attacks"),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> Dataset {
        let t = |s: &str| Table::from_reader(s.as_bytes()).unwrap();
        let ports: String = std::iter::once("Destination Port,count\n".to_string())
            .chain((0..15).map(|p| format!("{},{}\n", 1000 + p, p)))
            .collect();
        Dataset {
            metrics: Table::default(),
            attack_timeline: Table::default(),
            top_source_ips: t("source_ip,count\n"),
            top_destination_ports: t(&ports),
            events: t("timestamp,attack_type\n\
                       2017-07-03 08:00:00,BENIGN\n\
                       2017-07-03 09:00:00,DOS\n\
                       2017-07-04 09:00:00,DOS\n\
                       2017-07-04 10:00:00,PortScan\n\
                       2017-07-06 10:00:00,BENIGN\n"),
            summary: Default::default(),
        }
    }

    fn tab(page: &Page, i: usize) -> &[Block] {
        match &page.blocks[0] {
            Block::Tabs(tabs) => &tabs[i].blocks,
            _ => panic!("expected tabs"),
        }
    }

    #[test]
    fn distribution_excludes_benign() {
        let page = render(&data(), &Selection::all());
        let charts = page.charts();
        assert_eq!(charts[0].labels, vec!["DOS", "PortScan"]);
        assert_eq!(charts[0].kind, ChartKind::Pie { hole: 0.4 });
        let ms = tab(&page, 0).iter().find_map(|b| match b {
            Block::MultiSelect(ms) => Some(ms),
            _ => None,
        });
        assert_eq!(ms.unwrap().options, vec!["DOS", "PortScan"]);
    }

    #[test]
    fn trends_count_malicious_per_day() {
        let page = render(&data(), &Selection::all());
        let line = page.charts()[2];
        assert_eq!(line.labels, vec!["2017-07-03", "2017-07-04"]);
        assert_eq!(line.values, vec![1.0, 2.0]);
    }

    #[test]
    fn top_ports_truncated_to_ten_and_empty_ips_warn() {
        let page = render(&data(), &Selection::all());
        let ports = page.charts()[3];
        assert_eq!(ports.labels.len(), TOP_N);
        assert_eq!(ports.labels[0], "1014");
        assert_eq!(
            page.warnings(),
            vec!["top_source_ips.csv not found or empty."]
        );
    }

    #[test]
    fn missing_timestamp_warns_in_trends_tab() {
        let mut d = data();
        d.events = Table::from_reader("attack_type\nDOS\n".as_bytes()).unwrap();
        let page = render(&d, &Selection::all());
        assert!(matches!(&tab(&page, 1)[0], Block::Warning(_)));
    }
}
