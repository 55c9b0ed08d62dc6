use crate::error::LoadError;
use crate::loader::read_json_object;
use crate::models::domain::{ClassifierArtifact, PipelineStep};
use serde_json::Value;
use std::path::Path;

pub const ARTIFACT_FILE: &str = "stage1_binary_pipeline_A.json";

/// Loads the pipeline manifest. `named_steps` maps each step name to its
/// representation, in pipeline order.
pub fn load(path: &Path) -> Result<ClassifierArtifact, LoadError> {
    let doc = read_json_object(path)?;
    let steps = match doc.get("named_steps") {
        Some(Value::Object(steps)) => steps
            .iter()
            .map(|(name, repr)| PipelineStep {
                name: name.clone(),
                repr: match repr {
                    Value::String(s) => s.clone(),
                    other => serde_json::to_string_pretty(other).unwrap_or_default(),
                },
            })
            .collect(),
        Some(_) => {
            return Err(LoadError::NotAnObject {
                path: path.to_path_buf(),
            })
        }
        None => Vec::new(),
    };
    Ok(ClassifierArtifact { steps })
}
