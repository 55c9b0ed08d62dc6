// Binary classification metrics for the model-performance page.
// Class 0 is BENIGN, class 1 is ATTACK.

use crate::error::LoadError;
use crate::table::Table;
use std::path::Path;

pub const EVAL_FILE: &str = "model_eval.csv";
pub const CLASS_NAMES: [&str; 2] = ["BENIGN", "ATTACK"];

/// Labels and predictions, aligned by index.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalSet {
    pub y_true: Vec<u8>,
    pub y_pred: Vec<u8>,
    /// Set for the built-in sample, which is not a real evaluation.
    pub illustrative: bool,
}

impl EvalSet {
    pub fn illustrative() -> Self {
        EvalSet {
            y_true: vec![0, 0, 1, 1, 0, 1, 1, 0],
            y_pred: vec![0, 1, 1, 1, 0, 1, 0, 0],
            illustrative: true,
        }
    }

    /// Reads `y_true,y_pred` columns. A label is `0`/`1` in any numeric
    /// spelling (`1.0`) or a class name, case-insensitive.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let table = Table::from_path(path)?;
        Ok(EvalSet {
            y_true: labels(&table, path, "y_true")?,
            y_pred: labels(&table, path, "y_pred")?,
            illustrative: false,
        })
    }

    pub fn confusion_matrix(&self) -> [[u64; 2]; 2] {
        let mut cm = [[0u64; 2]; 2];
        for (&t, &p) in self.y_true.iter().zip(&self.y_pred) {
            cm[usize::from(t != 0)][usize::from(p != 0)] += 1;
        }
        cm
    }

    pub fn report(&self) -> ClassificationReport {
        let cm = self.confusion_matrix();
        let total: u64 = cm.iter().flatten().sum();
        let classes: Vec<ClassMetrics> = (0..2)
            .map(|c| {
                let tp = cm[c][c] as f64;
                let predicted = (cm[0][c] + cm[1][c]) as f64;
                let support = cm[c][0] + cm[c][1];
                let precision = ratio(tp, predicted);
                let recall = ratio(tp, support as f64);
                ClassMetrics {
                    label: CLASS_NAMES[c].to_string(),
                    precision,
                    recall,
                    f1: ratio(2.0 * precision * recall, precision + recall),
                    support,
                }
            })
            .collect();

        let macro_avg = ClassMetrics {
            label: "macro avg".to_string(),
            precision: classes.iter().map(|m| m.precision).sum::<f64>() / 2.0,
            recall: classes.iter().map(|m| m.recall).sum::<f64>() / 2.0,
            f1: classes.iter().map(|m| m.f1).sum::<f64>() / 2.0,
            support: total,
        };
        let weighted = |f: fn(&ClassMetrics) -> f64| {
            ratio(
                classes.iter().map(|m| f(m) * m.support as f64).sum(),
                total as f64,
            )
        };
        let weighted_avg = ClassMetrics {
            label: "weighted avg".to_string(),
            precision: weighted(|m: &ClassMetrics| m.precision),
            recall: weighted(|m: &ClassMetrics| m.recall),
            f1: weighted(|m: &ClassMetrics| m.f1),
            support: total,
        };

        ClassificationReport {
            accuracy: ratio((cm[0][0] + cm[1][1]) as f64, total as f64),
            total,
            classes,
            macro_avg,
            weighted_avg,
        }
    }
}

fn labels(table: &Table, path: &Path, column: &str) -> Result<Vec<u8>, LoadError> {
    let values = table.column(column).ok_or_else(|| LoadError::MissingColumn {
        path: path.to_path_buf(),
        column: column.to_string(),
    })?;
    values
        .enumerate()
        .map(|(row, raw)| {
            class_of(raw).ok_or_else(|| LoadError::InvalidLabel {
                path: path.to_path_buf(),
                row: row + 1,
                value: raw.to_string(),
            })
        })
        .collect()
}

fn class_of(raw: &str) -> Option<u8> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<f64>() {
        return match n {
            n if n == 0.0 => Some(0),
            n if n == 1.0 => Some(1),
            _ => None,
        };
    }
    CLASS_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(raw))
        .map(|c| c as u8)
}

// zero-division yields 0
fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub total: u64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
}
