//! Render tree produced by the page functions.
//!
//! Pages never write HTML themselves: they return a [`Page`] and the `html`
//! module turns that into a document. Tests inspect the tree directly.

use plotly::common::{ColorScale, ColorScalePalette, Marker, Mode, TextPosition, Title};
use plotly::layout::{Annotation, Axis, Margin};
use plotly::{Bar, HeatMap, Layout, Pie, Plot, Scatter};

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Page {
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Every warning banner in the page, tabs and expanders included.
    pub fn warnings(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_warnings(&self.blocks, &mut out);
        out
    }

    /// Every chart in the page, tabs and expanders included.
    pub fn charts(&self) -> Vec<&Chart> {
        let mut out = Vec::new();
        collect_charts(&self.blocks, &mut out);
        out
    }
}

fn collect_warnings<'a>(blocks: &'a [Block], out: &mut Vec<&'a str>) {
    for b in blocks {
        match b {
            Block::Warning(w) => out.push(w),
            Block::Tabs(tabs) => tabs.iter().for_each(|t| collect_warnings(&t.blocks, out)),
            Block::Expander { blocks, .. } => collect_warnings(blocks, out),
            _ => {}
        }
    }
}

fn collect_charts<'a>(blocks: &'a [Block], out: &mut Vec<&'a Chart>) {
    for b in blocks {
        match b {
            Block::Chart(c) => out.push(c),
            Block::Tabs(tabs) => tabs.iter().for_each(|t| collect_charts(&t.blocks, out)),
            Block::Expander { blocks, .. } => collect_charts(blocks, out),
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Subheader(String),
    Text(String),
    Warning(String),
    Metrics(Vec<MetricCard>),
    Table(TableView),
    Chart(Chart),
    Code { label: String, body: String },
    Image { src: String, alt: String },
    MultiSelect(MultiSelect),
    TextInput { label: String, field: String, value: String },
    Tabs(Vec<Tab>),
    Expander { summary: String, blocks: Vec<Block> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Normal,
    Inverse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    pub emphasis: Emphasis,
}

impl MetricCard {
    pub fn new(label: impl Into<String>, value: impl ToString) -> Self {
        MetricCard {
            label: label.into(),
            value: value.to_string(),
            emphasis: Emphasis::Normal,
        }
    }

    pub fn inverse(mut self, on: bool) -> Self {
        if on {
            self.emphasis = Emphasis::Inverse;
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub highlight: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl TableView {
    /// Plain rendering of a table with no highlighted cells.
    pub fn plain(columns: &[String], rows: &[Vec<String>]) -> Self {
        TableView {
            columns: columns.to_vec(),
            rows: rows
                .iter()
                .map(|r| {
                    r.iter()
                        .map(|v| Cell {
                            text: v.clone(),
                            highlight: false,
                        })
                        .collect()
                })
                .collect(),
        }
    }
}

/// Checkbox group submitted as repeated `field=` query parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiSelect {
    pub label: String,
    pub field: String,
    pub options: Vec<String>,
    pub selected: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    pub title: String,
    pub blocks: Vec<Block>,
}

/// Named Plotly colour scales used by the pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Viridis,
    Reds,
    Blues,
}

impl Palette {
    fn color_scale(self) -> ColorScale {
        ColorScale::Palette(match self {
            Palette::Viridis => ColorScalePalette::Viridis,
            Palette::Reds => ColorScalePalette::Reds,
            Palette::Blues => ColorScalePalette::Blues,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    Line { markers: bool },
    Bar { text: bool, color_scale: Option<Palette> },
    Pie { hole: f64 },
    Heatmap { rows: Vec<String>, z: Vec<Vec<u64>>, color_scale: Palette },
}

/// One chart. For line/bar/pie `labels` and `values` are the x/y (or
/// names/values) series; for heatmaps `labels` are the column headers.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Chart {
    pub fn new(kind: ChartKind, title: impl Into<String>, points: Vec<(String, f64)>) -> Self {
        let (labels, values) = points.into_iter().unzip();
        Chart {
            kind,
            title: title.into(),
            x_title: None,
            y_title: None,
            labels,
            values,
        }
    }

    pub fn axes(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_title = Some(x.into());
        self.y_title = Some(y.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        match &self.kind {
            ChartKind::Heatmap { z, .. } => z.is_empty(),
            _ => self.labels.is_empty(),
        }
    }

    /// Plotly figure with one trace; `to_json()` gives `{"data", "layout"}`.
    pub fn to_plot(&self) -> Plot {
        let mut plot = Plot::new();
        match &self.kind {
            ChartKind::Line { markers } => {
                let mode = if *markers { Mode::LinesMarkers } else { Mode::Lines };
                plot.add_trace(Scatter::new(self.labels.clone(), self.values.clone()).mode(mode));
            }
            ChartKind::Bar { text, color_scale } => {
                let mut bar = Bar::new(self.labels.clone(), self.values.clone());
                if *text {
                    let labels: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
                    bar = bar.text_array(labels).text_position(TextPosition::Auto);
                }
                if let Some(palette) = color_scale {
                    bar = bar.marker(
                        Marker::new()
                            .color_array(self.values.clone())
                            .color_scale(palette.color_scale())
                            .show_scale(true),
                    );
                }
                plot.add_trace(bar);
            }
            ChartKind::Pie { hole } => {
                plot.add_trace(
                    Pie::new(self.values.clone())
                        .labels(self.labels.clone())
                        .hole(*hole),
                );
            }
            ChartKind::Heatmap { rows, z, color_scale } => {
                plot.add_trace(
                    HeatMap::new(self.labels.clone(), rows.clone(), z.clone())
                        .color_scale(color_scale.color_scale())
                        .show_scale(true),
                );
            }
        }

        let mut layout = Layout::new()
            .title(Title::from(self.title.as_str()).x(0.5))
            .margin(Margin::new().top(60));
        if let Some(x) = &self.x_title {
            layout = layout.x_axis(Axis::new().title(Title::from(x.as_str())));
        }
        if let Some(y) = &self.y_title {
            layout = layout.y_axis(Axis::new().title(Title::from(y.as_str())));
        }
        if let ChartKind::Heatmap { rows, z, .. } = &self.kind {
            let mut notes = Vec::new();
            for (row, cells) in rows.iter().zip(z) {
                for (col, v) in self.labels.iter().zip(cells) {
                    notes.push(
                        Annotation::new()
                            .x(col.as_str())
                            .y(row.as_str())
                            .text(&v.to_string())
                            .show_arrow(false),
                    );
                }
            }
            layout = layout.annotations(notes);
        }
        plot.set_layout(layout);
        plot
    }
}
