use crate::error::LoadError;
use crate::models::domain::StatsSummary;
use crate::table::Table;
use serde_json::Value;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;
use tracing::{debug, info, warn};

pub const METRICS_FILE: &str = "metrics.csv";
pub const ATTACK_TIMELINE_FILE: &str = "attack_timeline.csv";
pub const TOP_SOURCE_IPS_FILE: &str = "top_source_ips.csv";
pub const TOP_DESTINATION_PORTS_FILE: &str = "top_destination_ports.csv";
pub const EVENTS_FILE: &str = "cic_ids2017_cleaned.csv";
pub const STATS_FILE: &str = "stats.json";

const DATASET_FILES: [&str; 6] = [
    METRICS_FILE,
    ATTACK_TIMELINE_FILE,
    TOP_SOURCE_IPS_FILE,
    TOP_DESTINATION_PORTS_FILE,
    EVENTS_FILE,
    STATS_FILE,
];

/// The five tables and the summary document every chart page reads.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub metrics: Table,
    pub attack_timeline: Table,
    pub top_source_ips: Table,
    pub top_destination_ports: Table,
    pub events: Table,
    pub summary: StatsSummary,
}

impl Dataset {
    /// Reads everything from `dir` with no caching.
    pub fn load(dir: &Path) -> Result<Self, LoadError> {
        Ok(Dataset {
            metrics: Table::from_path(&dir.join(METRICS_FILE))?,
            attack_timeline: Table::from_path(&dir.join(ATTACK_TIMELINE_FILE))?,
            top_source_ips: Table::from_path(&dir.join(TOP_SOURCE_IPS_FILE))?,
            top_destination_ports: Table::from_path(&dir.join(TOP_DESTINATION_PORTS_FILE))?,
            events: Table::from_path(&dir.join(EVENTS_FILE))?,
            summary: StatsSummary::new(read_json_object(&dir.join(STATS_FILE))?),
        })
    }
}

/// Parses a file that must hold a single JSON object.
pub fn read_json_object(path: &Path) -> Result<serde_json::Map<String, Value>, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::from_open(path, e))?;
    let value: Value =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(LoadError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Identity of the on-disk file set: path, size and mtime of each file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Fingerprint(Vec<(PathBuf, u64, Option<SystemTime>)>);

impl Fingerprint {
    fn of(dir: &Path) -> Result<Self, LoadError> {
        let mut entries = Vec::with_capacity(DATASET_FILES.len());
        for name in DATASET_FILES {
            let path = dir.join(name);
            let meta = fs::metadata(&path).map_err(|e| LoadError::from_open(&path, e))?;
            entries.push((path, meta.len(), meta.modified().ok()));
        }
        Ok(Fingerprint(entries))
    }
}

/// Read-through cache over [`Dataset::load`].
///
/// The first call reads disk; later calls hand back the same `Arc` until one
/// of the six files changes size or modification time. Only metadata is
/// touched on a hit.
#[derive(Debug)]
pub struct DatasetCache {
    dir: PathBuf,
    slot: RwLock<Option<(Fingerprint, Arc<Dataset>)>>,
}

impl DatasetCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DatasetCache {
            dir: dir.into(),
            slot: RwLock::new(None),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn get(&self) -> Result<Arc<Dataset>, LoadError> {
        let fingerprint = Fingerprint::of(&self.dir).map_err(|e| {
            warn!(error = %e, "dataset unavailable");
            e
        })?;

        {
            let slot = self.slot.read().unwrap_or_else(|p| p.into_inner());
            if let Some((cached, data)) = slot.as_ref() {
                if *cached == fingerprint {
                    debug!(dir = %self.dir.display(), "dataset cache hit");
                    return Ok(Arc::clone(data));
                }
            }
        }

        let mut slot = self.slot.write().unwrap_or_else(|p| p.into_inner());
        // another worker may have reloaded while we waited for the lock
        if let Some((cached, data)) = slot.as_ref() {
            if *cached == fingerprint {
                return Ok(Arc::clone(data));
            }
        }

        let data = Arc::new(Dataset::load(&self.dir).map_err(|e| {
            warn!(error = %e, "dataset load failed");
            e
        })?);
        info!(
            dir = %self.dir.display(),
            events = data.events.len(),
            "dataset loaded from disk"
        );
        *slot = Some((fingerprint, Arc::clone(&data)));
        Ok(data)
    }
}
