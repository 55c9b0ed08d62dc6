//! One module per dashboard page. Each exposes a `render` function that
//! turns already-loaded inputs plus the request's filter state into a
//! [`Page`]; nothing here touches HTTP.

pub mod kpi_overview;
pub mod logs;
pub mod model;
pub mod overview;
pub mod state;
pub mod statistics;

use crate::error::LoadError;
use crate::view::{Block, Page};

/// Query field carrying the multi-select values.
pub const ATTACK_TYPE_FIELD: &str = "attack_type";
/// Hidden field set by every submitted filter form.
pub const SUBMITTED_FIELD: &str = "filter";

/// Multi-select state decoded from the query string. Without a submitted
/// form every option is selected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    submitted: bool,
    values: Vec<String>,
}

impl Selection {
    pub fn all() -> Self {
        Selection::default()
    }

    pub fn only<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection {
            submitted: true,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_query(pairs: &[(String, String)], field: &str) -> Self {
        Selection {
            submitted: pairs.iter().any(|(k, _)| k == SUBMITTED_FIELD),
            values: pairs
                .iter()
                .filter(|(k, _)| k == field)
                .map(|(_, v)| v.clone())
                .collect(),
        }
    }

    /// Selected options, in option order. Values that are not options are dropped.
    pub fn resolve(&self, options: &[String]) -> Vec<String> {
        if !self.submitted {
            return options.to_vec();
        }
        options
            .iter()
            .filter(|o| self.values.contains(o))
            .cloned()
            .collect()
    }
}

/// Page shown when the shared dataset could not be loaded.
pub fn unavailable(title: &str, err: &LoadError) -> Page {
    let mut page = Page::new(title);
    page.push(Block::Warning(format!(
        "Could not load dashboard data: {}. Please add data to the /data folder.",
        err
    )));
    page
}

fn missing_column(name: &str) -> Block {
    Block::Warning(format!("'{}' column not found in dataset.", name))
}
