use super::workflow::Workflow;
use crate::error::LoadError;

/// A trait for custom data models that can be converted into a kensa `Workflow`.
///
/// Implement it on your own export structs to run the engines over a format
/// that does not deserialize straight into [`Workflow`].
///
/// # Example
///
/// ```rust,no_run
/// use kensa::error::LoadError;
/// use kensa::model::{IntoWorkflow, Step, Workflow};
///
/// struct MyStage { key: String, first: bool }
/// struct MyProcess { key: String, stages: Vec<MyStage> }
///
/// impl IntoWorkflow for MyProcess {
///     fn into_workflow(self) -> Result<Workflow, LoadError> {
///         let steps = self
///             .stages
///             .into_iter()
///             .map(|stage| Step {
///                 name: stage.key.clone(),
///                 system_name: stage.key,
///                 is_start: stage.first,
///                 ..Step::default()
///             })
///             .collect();
///
///         Ok(Workflow {
///             name: self.key.clone(),
///             system_name: self.key,
///             steps,
///             ..Workflow::default()
///         })
///     }
/// }
/// ```
pub trait IntoWorkflow {
    /// Consumes the object and converts it into a workflow definition.
    fn into_workflow(self) -> Result<Workflow, LoadError>;
}

impl IntoWorkflow for Workflow {
    fn into_workflow(self) -> Result<Workflow, LoadError> {
        Ok(self)
    }
}

impl IntoWorkflow for serde_json::Value {
    fn into_workflow(self) -> Result<Workflow, LoadError> {
        if !self.is_object() {
            return Err(LoadError::JsonParse(
                "workflow document must be a JSON object".to_string(),
            ));
        }
        serde_json::from_value(self).map_err(|e| LoadError::JsonParse(e.to_string()))
    }
}

impl IntoWorkflow for &str {
    fn into_workflow(self) -> Result<Workflow, LoadError> {
        let stripped = self.strip_prefix('\u{feff}').unwrap_or(self);
        let value: serde_json::Value =
            serde_json::from_str(stripped).map_err(|e| LoadError::JsonParse(e.to_string()))?;
        value.into_workflow()
    }
}
