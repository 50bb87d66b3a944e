use super::conversion::IntoWorkflow;
use super::workflow::Workflow;
use crate::error::LoadError;
use crate::guard::WorkflowGuard;
use std::fs;
use std::path::Path;

impl Workflow {
    /// Parses a workflow from JSON text. A leading UTF-8 byte order mark is ignored.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        json.into_workflow()
    }

    /// Loads a workflow from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }
}

/// Parses a workflow and runs it past a guard: the payload budget before
/// parsing, the structural limits after.
pub fn load_workflow(json: &str, guard: &dyn WorkflowGuard) -> Result<Workflow, LoadError> {
    guard.check_payload(json)?;
    let workflow = Workflow::from_json(json)?;
    guard.check_workflow(&workflow)?;
    log::debug!(
        "Loaded workflow '{}' ({} steps, {} variables)",
        workflow.system_name,
        workflow.steps.len(),
        workflow.variables.len()
    );
    Ok(workflow)
}

/// Reads a file and loads it through [`load_workflow`].
pub fn load_workflow_file(
    path: impl AsRef<Path>,
    guard: &dyn WorkflowGuard,
) -> Result<Workflow, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    load_workflow(&content, guard)
}
