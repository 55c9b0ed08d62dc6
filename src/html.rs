// Page -> HTML document. Charts are drawn client-side by Plotly.js from the
// figure JSON each `Chart` produces.

use crate::view::{Block, Cell, Chart, Emphasis, MetricCard, MultiSelect, Page, TableView};
use std::fmt::Write;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Navigation entries: (path, label).
pub const NAV: [(&str, &str); 6] = [
    ("/", "Overview"),
    ("/kpi", "KPI Overview"),
    ("/logs", "Logs Explorer"),
    ("/model", "Model Performance"),
    ("/state", "State & Trends"),
    ("/statistics", "Statistics"),
];

const STYLE: &str = r#"
:root { --bg:#0e1117; --card:#161b22; --border:#30363d; --text:#e6edf3; --dim:#8b949e; --bad:#f85149; --warn:#d29922; --accent:#58a6ff; }
* { box-sizing:border-box; }
body { margin:0; font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Helvetica,Arial,sans-serif; background:var(--bg); color:var(--text); }
nav { display:flex; gap:1rem; padding:0.75rem 2rem; border-bottom:1px solid var(--border); }
nav a { color:var(--dim); text-decoration:none; }
nav a.active { color:var(--accent); font-weight:600; }
main { max-width:1400px; margin:0 auto; padding:1.5rem 2rem; }
.metrics { display:grid; grid-template-columns:repeat(auto-fit,minmax(220px,1fr)); gap:1rem; margin:1rem 0; }
.metric { background:var(--card); border:1px solid var(--border); border-radius:10px; padding:1rem; }
.metric .label { color:var(--dim); font-size:0.85rem; }
.metric .value { font-size:1.8rem; font-weight:700; margin-top:0.25rem; }
.metric.inverse .value { color:var(--bad); }
.warning { background:rgba(210,153,34,0.15); border:1px solid var(--warn); border-radius:8px; padding:0.75rem 1rem; margin:1rem 0; }
table { border-collapse:collapse; width:100%; font-size:0.85rem; }
th, td { border:1px solid var(--border); padding:0.35rem 0.6rem; text-align:left; }
td.highlight { background-color:red; }
.tabs { display:flex; gap:1rem; margin:1rem 0; }
.tab { border-top:1px solid var(--border); padding-top:0.5rem; }
pre { background:var(--card); padding:0.75rem; border-radius:6px; overflow-x:auto; }
img { max-width:100%; }
"#;

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Full HTML document for `page`, with `active` highlighted in the nav bar.
pub fn render(page: &Page, active: &str) -> String {
    let mut r = Renderer::default();
    r.out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
    r.out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    let _ = writeln!(r.out, "<title>{} - Security Dashboard</title>", escape(&page.title));
    let _ = writeln!(r.out, "<script src=\"{}\"></script>", PLOTLY_CDN);
    let _ = writeln!(r.out, "<style>{}</style>\n</head>\n<body>", STYLE);

    r.out.push_str("<nav>");
    for (path, label) in NAV {
        let class = if path == active { " class=\"active\"" } else { "" };
        let _ = write!(r.out, "<a href=\"{}\"{}>{}</a>", path, class, escape(label));
    }
    r.out.push_str("</nav>\n<main>\n");
    let _ = writeln!(r.out, "<h1>{}</h1>", escape(&page.title));
    r.blocks(&page.blocks);
    r.out.push_str("</main>\n</body>\n</html>\n");
    r.out
}

#[derive(Default)]
struct Renderer {
    out: String,
    charts: usize,
    tabs: usize,
}

impl Renderer {
    fn blocks(&mut self, blocks: &[Block]) {
        for b in blocks {
            self.block(b);
        }
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Subheader(s) => {
                let _ = writeln!(self.out, "<h2>{}</h2>", escape(s));
            }
            Block::Text(s) => {
                let _ = writeln!(self.out, "<p>{}</p>", escape(s));
            }
            Block::Warning(s) => {
                let _ = writeln!(self.out, "<div class=\"warning\">&#9888; {}</div>", escape(s));
            }
            Block::Metrics(cards) => self.metrics(cards),
            Block::Table(t) => self.table(t),
            Block::Chart(c) => self.chart(c),
            Block::Code { label, body } => {
                let _ = writeln!(
                    self.out,
                    "<p><strong>{}:</strong></p>\n<pre><code>{}</code></pre>",
                    escape(label),
                    escape(body)
                );
            }
            Block::Image { src, alt } => {
                let _ = writeln!(self.out, "<img src=\"{}\" alt=\"{}\">", escape(src), escape(alt));
            }
            Block::MultiSelect(ms) => self.multiselect(ms),
            Block::TextInput { label, field, value } => {
                let _ = writeln!(
                    self.out,
                    "<form method=\"get\"><label>{} <input type=\"text\" name=\"{}\" value=\"{}\"></label> <button type=\"submit\">Apply</button></form>",
                    escape(label),
                    escape(field),
                    escape(value)
                );
            }
            Block::Tabs(tabs) => {
                let base = self.tabs;
                self.tabs += tabs.len();
                self.out.push_str("<div class=\"tabs\">");
                for (i, t) in tabs.iter().enumerate() {
                    let _ = write!(self.out, "<a href=\"#tab-{}\">{}</a>", base + i, escape(&t.title));
                }
                self.out.push_str("</div>\n");
                for (i, t) in tabs.iter().enumerate() {
                    let _ = writeln!(self.out, "<section class=\"tab\" id=\"tab-{}\">", base + i);
                    let _ = writeln!(self.out, "<h3>{}</h3>", escape(&t.title));
                    self.blocks(&t.blocks);
                    self.out.push_str("</section>\n");
                }
            }
            Block::Expander { summary, blocks } => {
                let _ = writeln!(self.out, "<details>\n<summary>{}</summary>", escape(summary));
                self.blocks(blocks);
                self.out.push_str("</details>\n");
            }
        }
    }

    fn metrics(&mut self, cards: &[MetricCard]) {
        self.out.push_str("<div class=\"metrics\">\n");
        for card in cards {
            let class = match card.emphasis {
                Emphasis::Normal => "metric",
                Emphasis::Inverse => "metric inverse",
            };
            let _ = writeln!(
                self.out,
                "<div class=\"{}\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>",
                class,
                escape(&card.label),
                escape(&card.value)
            );
        }
        self.out.push_str("</div>\n");
    }

    fn table(&mut self, t: &TableView) {
        self.out.push_str("<table>\n<thead><tr>");
        for c in &t.columns {
            let _ = write!(self.out, "<th>{}</th>", escape(c));
        }
        self.out.push_str("</tr></thead>\n<tbody>\n");
        for row in &t.rows {
            self.out.push_str("<tr>");
            for Cell { text, highlight } in row {
                if *highlight {
                    let _ = write!(self.out, "<td class=\"highlight\">{}</td>", escape(text));
                } else {
                    let _ = write!(self.out, "<td>{}</td>", escape(text));
                }
            }
            self.out.push_str("</tr>\n");
        }
        self.out.push_str("</tbody>\n</table>\n");
    }

    fn chart(&mut self, chart: &Chart) {
        let id = format!("chart-{}", self.charts);
        self.charts += 1;
        // "</" would close the script element early
        let figure = chart.to_plot().to_json().replace("</", "<\\/");
        let _ = writeln!(
            self.out,
            "<div id=\"{id}\"></div>\n<script>(function(){{var f={figure};Plotly.newPlot(\"{id}\",f.data,f.layout,{{responsive:true}});}})();</script>"
        );
    }

    fn multiselect(&mut self, ms: &MultiSelect) {
        self.out.push_str("<form method=\"get\">\n<input type=\"hidden\" name=\"filter\" value=\"1\">\n");
        let _ = writeln!(self.out, "<fieldset><legend>{}</legend>", escape(&ms.label));
        for opt in &ms.options {
            let checked = if ms.selected.contains(opt) { " checked" } else { "" };
            let _ = writeln!(
                self.out,
                "<label><input type=\"checkbox\" name=\"{}\" value=\"{}\"{}> {}</label>",
                escape(&ms.field),
                escape(opt),
                checked,
                escape(opt)
            );
        }
        self.out.push_str("</fieldset>\n<button type=\"submit\">Apply</button>\n</form>\n");
    }
}
