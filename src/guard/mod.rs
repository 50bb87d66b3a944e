//! Input checks that run before a workflow reaches either engine.
//!
//! The engines assume their input already passed a guard and never call one
//! themselves; [`load_workflow`](crate::model::load_workflow) is the usual entry point.

use crate::error::GuardError;
use crate::model::Workflow;
use serde::{Deserialize, Serialize};

const RESERVED_NAMES: &[&str] = &[
    "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7", "com8",
    "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
];

/// Size and shape limits enforced by [`DefaultGuard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuardLimits {
    pub max_bytes: usize,
    pub max_steps: usize,
    pub max_variables: usize,
    pub max_name_length: usize,
}

impl Default for GuardLimits {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            max_steps: 1000,
            max_variables: 500,
            max_name_length: 100,
        }
    }
}

/// Defines the contract for screening raw payloads and parsed workflows.
pub trait WorkflowGuard: Send + Sync {
    /// Checks the raw document before it is parsed.
    fn check_payload(&self, raw: &str) -> Result<(), GuardError>;

    /// Checks a parsed workflow.
    fn check_workflow(&self, workflow: &Workflow) -> Result<(), GuardError>;
}

/// The stock guard: byte budget, step and variable counts, and `systemName` hygiene.
#[derive(Debug, Clone, Default)]
pub struct DefaultGuard {
    limits: GuardLimits,
}

impl DefaultGuard {
    pub fn new(limits: GuardLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &GuardLimits {
        &self.limits
    }

    /// Validates a `systemName` for format, length, reserved words and path traversal.
    pub fn check_system_name(&self, name: &str) -> Result<(), GuardError> {
        let reject = |reason: &str| {
            Err(GuardError::InvalidSystemName {
                name: name.to_string(),
                reason: reason.to_string(),
            })
        };

        if name.trim().is_empty() {
            return reject("name is empty");
        }
        if name.chars().count() > self.limits.max_name_length {
            return reject(&format!(
                "name is longer than {} characters",
                self.limits.max_name_length
            ));
        }
        if name.contains("..") || name.contains('/') || name.contains('\\') {
            return reject("name contains a path traversal sequence");
        }
        if let Some(c) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
        {
            return reject(&format!("character '{}' is not allowed", c));
        }
        let stem = name.split('.').next().unwrap_or(name).to_ascii_lowercase();
        if RESERVED_NAMES.contains(&stem.as_str()) {
            return reject("name is a reserved word");
        }
        Ok(())
    }
}

impl WorkflowGuard for DefaultGuard {
    fn check_payload(&self, raw: &str) -> Result<(), GuardError> {
        if raw.len() > self.limits.max_bytes {
            return Err(GuardError::PayloadTooLarge {
                size: raw.len(),
                limit: self.limits.max_bytes,
            });
        }
        Ok(())
    }

    fn check_workflow(&self, workflow: &Workflow) -> Result<(), GuardError> {
        self.check_system_name(&workflow.system_name)?;
        if workflow.steps.len() > self.limits.max_steps {
            return Err(GuardError::TooManySteps {
                count: workflow.steps.len(),
                limit: self.limits.max_steps,
            });
        }
        if workflow.variables.len() > self.limits.max_variables {
            return Err(GuardError::TooManyVariables {
                count: workflow.variables.len(),
                limit: self.limits.max_variables,
            });
        }
        Ok(())
    }
}
