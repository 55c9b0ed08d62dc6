use crate::artifact::{self, ARTIFACT_FILE};
use crate::error::LoadError;
use crate::evaluation::{ClassMetrics, EvalSet, CLASS_NAMES, EVAL_FILE};
use crate::models::domain::ClassifierArtifact;
use crate::view::{Block, Cell, Chart, ChartKind, Page, Palette, TableView};
use std::path::Path;

pub const TITLE: &str = "📈 Model Performance Evaluation";
pub const FEATURE_IMAGE_FILE: &str = "feature_importance_stage1.png";
pub const FEATURE_IMAGE_ROUTE: &str = "/assets/feature_importance.png";

/// Everything the page reads from disk, gathered before rendering.
#[derive(Debug)]
pub struct ModelInputs {
    pub artifact: Result<ClassifierArtifact, LoadError>,
    pub eval: Result<EvalSet, LoadError>,
    pub has_feature_image: bool,
}

impl ModelInputs {
    pub fn load(dir: &Path) -> Self {
        let eval_path = dir.join(EVAL_FILE);
        let eval = match EvalSet::from_path(&eval_path) {
            Err(LoadError::Missing { .. }) => Ok(EvalSet::illustrative()),
            other => other,
        };
        ModelInputs {
            artifact: artifact::load(&dir.join(ARTIFACT_FILE)),
            eval,
            has_feature_image: dir.join(FEATURE_IMAGE_FILE).is_file(),
        }
    }
}

pub fn render(inputs: &ModelInputs) -> Page {
    let mut page = Page::new(TITLE);

    let artifact = match &inputs.artifact {
        Ok(a) => a,
        Err(LoadError::Missing { .. }) => {
            page.push(Block::Warning(
                "Model not found. Please add it to /data folder to display results.".into(),
            ));
            return page;
        }
        Err(e) => {
            page.push(Block::Warning(format!("Model could not be read: {}", e)));
            return page;
        }
    };

    page.push(Block::Subheader("🔹 Pipeline Overview".into()));
    page.push(Block::Expander {
        summary: "View Pipeline Steps".into(),
        blocks: artifact
            .steps
            .iter()
            .map(|s| Block::Code {
                label: s.name.clone(),
                body: s.repr.clone(),
            })
            .collect(),
    });

    page.push(Block::Subheader("🔹 Model Metrics".into()));
    match &inputs.eval {
        Ok(eval) => metrics(&mut page, eval),
        Err(e) => page.push(Block::Warning(format!("Evaluation set unreadable: {}", e))),
    }

    page.push(Block::Subheader("🔹 Feature Importance (Top Features)".into()));
    if inputs.has_feature_image {
        page.push(Block::Image {
            src: FEATURE_IMAGE_ROUTE.into(),
            alt: "Feature importance".into(),
        });
    } else {
        page.push(Block::Warning(
            "Feature importance plot not found. You can generate it using 'model2.ipynb'.".into(),
        ));
    }
    page
}

fn metrics(page: &mut Page, eval: &EvalSet) {
    if eval.illustrative {
        page.push(Block::Text(format!(
            "No {} found: figures below come from a small illustrative sample, not from the model's predictions.",
            EVAL_FILE
        )));
    }

    let report = eval.report();
    let row = |m: &ClassMetrics| {
        vec![
            m.label.clone(),
            format!("{:.2}", m.precision),
            format!("{:.2}", m.recall),
            format!("{:.2}", m.f1),
            format!("{:.2}", m.support as f64),
        ]
    };
    let mut rows: Vec<Vec<String>> = report.classes.iter().map(row).collect();
    rows.push(vec![
        "accuracy".into(),
        String::new(),
        String::new(),
        format!("{:.2}", report.accuracy),
        format!("{:.2}", report.total as f64),
    ]);
    rows.push(row(&report.macro_avg));
    rows.push(row(&report.weighted_avg));

    let columns: Vec<String> = ["", "precision", "recall", "f1-score", "support"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    page.push(Block::Text("Classification Report".into()));
    page.push(Block::Table(TableView {
        rows: rows
            .into_iter()
            .map(|r| {
                r.into_iter()
                    .map(|text| Cell {
                        text,
                        highlight: false,
                    })
                    .collect()
            })
            .collect(),
        columns,
    }));

    let cm = eval.confusion_matrix();
    page.push(Block::Text("Confusion Matrix".into()));
    page.push(Block::Chart(Chart {
        kind: ChartKind::Heatmap {
            rows: CLASS_NAMES.iter().map(|c| format!("True {}", c)).collect(),
            z: cm.iter().map(|r| r.to_vec()).collect(),
            color_scale: Palette::Blues,
        },
        title: "Confusion Matrix".into(),
        x_title: None,
        y_title: None,
        labels: CLASS_NAMES.iter().map(|c| format!("Pred {}", c)).collect(),
        values: Vec::new(),
    }));
}
