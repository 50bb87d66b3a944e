use super::quoted_list;
use crate::error::RuleError;
use crate::model::Workflow;
use crate::validator::{RuleContext, RuleOutcome, ValidationRule};
use ahash::AHashSet;

/// Required root fields, a non-empty step list, and unique step names.
pub struct BasicStructureRule;

impl ValidationRule for BasicStructureRule {
    fn name(&self) -> &str {
        "Basic Structure"
    }

    fn check(&self, workflow: &Workflow, _ctx: &RuleContext<'_>) -> Result<RuleOutcome, RuleError> {
        let mut outcome = RuleOutcome::default();

        if workflow.system_name.trim().is_empty() {
            outcome.error("Workflow systemName is required");
        }
        if workflow.name.trim().is_empty() {
            outcome.error("Workflow name is required");
        }
        if workflow.steps.is_empty() {
            outcome.warn("Workflow has no steps");
        }

        let mut seen: AHashSet<&str> = AHashSet::new();
        for (index, step) in workflow.steps.iter().enumerate() {
            if step.system_name.trim().is_empty() {
                outcome.error(format!("Step at position {} has no systemName", index));
                continue;
            }
            if !seen.insert(step.system_name.as_str()) {
                outcome.error(format!("Duplicate step systemName '{}'", step.system_name));
            }
        }

        Ok(outcome)
    }
}

/// Entry and exit points of the graph.
pub struct StartEndStepsRule;

impl ValidationRule for StartEndStepsRule {
    fn name(&self) -> &str {
        "Start/End Steps"
    }

    fn check(&self, workflow: &Workflow, _ctx: &RuleContext<'_>) -> Result<RuleOutcome, RuleError> {
        let mut outcome = RuleOutcome::default();

        let starts: Vec<_> = workflow.start_steps().collect();
        match starts.len() {
            0 => outcome.warn("Workflow has no start step"),
            1 => {}
            n => outcome.note(format!(
                "Workflow has {} start steps: {}",
                n,
                quoted_list(starts.iter().map(|s| s.system_name.as_str()))
            )),
        }

        if workflow.end_steps().next().is_none() {
            outcome.warn("Workflow has no end step");
        }

        for step in &starts {
            // A single-step workflow may start and end in the same place.
            if step.is_end {
                continue;
            }
            if step.actions.is_empty() {
                outcome.warn(format!("Start step '{}' has no actions", step.system_name));
            } else if !step.has_outgoing_connection() {
                outcome.warn(format!(
                    "Start step '{}' has no outgoing connection",
                    step.system_name
                ));
            }
        }

        for step in workflow.end_steps() {
            if step.has_outgoing_connection() {
                outcome.warn(format!(
                    "End step '{}' has outgoing connections",
                    step.system_name
                ));
            }
        }

        Ok(outcome)
    }
}
