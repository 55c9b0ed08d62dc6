// Minimal dataframe: ordered headers + string cells, read straight from CSV.
// Pages only ever slice, filter and count, so cells stay as text and get
// parsed at the point of use.

use crate::error::LoadError;
use std::collections::HashMap;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Table { headers, rows }
    }

    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|e| LoadError::from_open(path, e))?;
        Self::from_reader(file).map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Field counts are strict: a ragged row makes the whole file malformed.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut rdr = csv::ReaderBuilder::new().flexible(false).from_reader(reader);
        let headers = rdr.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in rdr.records() {
            rows.push(record?.iter().map(str::to_string).collect());
        }
        Ok(Table { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cells of one column in row order, `None` if the column is absent.
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a str> + 'a> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(move |row| row.get(idx).map_or("", String::as_str)),
        )
    }

    pub fn head(&self, n: usize) -> Table {
        Table {
            headers: self.headers.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    pub fn filter_rows<F>(&self, keep: F) -> Table
    where
        F: Fn(&[String]) -> bool,
    {
        Table {
            headers: self.headers.clone(),
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    /// Returns a copy with one extra column computed per row. The source
    /// table is left untouched.
    pub fn with_column<F>(&self, name: &str, derive: F) -> Table
    where
        F: Fn(&[String]) -> String,
    {
        let mut headers = self.headers.clone();
        headers.push(name.to_string());
        let rows = self
            .rows
            .iter()
            .map(|r| {
                let mut row = r.clone();
                row.push(derive(r));
                row
            })
            .collect();
        Table { headers, rows }
    }

    /// Distinct non-empty values in a column.
    pub fn distinct_count(&self, name: &str) -> Option<usize> {
        let values: HashSet<&str> = self.column(name)?.filter(|v| !v.is_empty()).collect();
        Some(values.len())
    }

    /// Distinct non-empty values in order of first appearance.
    pub fn unique(&self, name: &str) -> Option<Vec<String>> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for v in self.column(name)? {
            if !v.is_empty() && seen.insert(v) {
                out.push(v.to_string());
            }
        }
        Some(out)
    }

    /// Occurrences per value, most frequent first; ties keep first-appearance order.
    pub fn value_counts(&self, name: &str) -> Option<Vec<(String, u64)>> {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, u64> = HashMap::new();
        for v in self.column(name)? {
            if v.is_empty() {
                continue;
            }
            let c = counts.entry(v).or_insert_with(|| {
                order.push(v);
                0
            });
            *c += 1;
        }
        let mut out: Vec<(String, u64)> = order
            .into_iter()
            .map(|v| (v.to_string(), counts[v]))
            .collect();
        out.sort_by(|a, b| b.1.cmp(&a.1));
        Some(out)
    }
}
