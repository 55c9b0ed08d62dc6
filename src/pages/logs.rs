use crate::error::LoadError;
use crate::table::Table;
use crate::view::{Block, Page, TableView};
use std::path::Path;

pub const TITLE: &str = "📂 Logs Explorer";
pub const LOGS_FILE: &str = "clean_data.csv";
pub const IP_FIELD: &str = "ip";

/// Reads the log table fresh; this page does not go through the dataset cache.
pub fn load(dir: &Path) -> Result<Table, LoadError> {
    Table::from_path(&dir.join(LOGS_FILE))
}

/// Log rows whose `ip` contains `ip_filter`. An empty filter shows everything.
pub fn render(logs: &Result<Table, LoadError>, ip_filter: &str) -> Page {
    let mut page = Page::new(TITLE);
    page.push(Block::TextInput {
        label: "Filter by IP".into(),
        field: IP_FIELD.into(),
        value: ip_filter.into(),
    });

    let logs = match logs {
        Ok(t) => t,
        Err(e) => {
            page.push(Block::Warning(format!("Logs unavailable: {}", e)));
            return page;
        }
    };
    let Some(idx) = logs.column_index(IP_FIELD) else {
        page.push(super::missing_column(IP_FIELD));
        return page;
    };

    let shown = if ip_filter.is_empty() {
        logs.clone()
    } else {
        logs.filter_rows(|r| r[idx].contains(ip_filter))
    };
    page.push(Block::Table(TableView::plain(shown.headers(), shown.rows())));
    page
}
