use crate::error::RuleError;
use crate::model::Workflow;
use crate::validator::{RuleContext, RuleOutcome, ValidationRule};
use ahash::AHashSet;

/// Per-step action checks plus the per-type required config fields from the catalog.
pub struct ActionsRule;

impl ValidationRule for ActionsRule {
    fn name(&self) -> &str {
        "Actions"
    }

    fn check(&self, workflow: &Workflow, ctx: &RuleContext<'_>) -> Result<RuleOutcome, RuleError> {
        let mut outcome = RuleOutcome::default();

        for step in &workflow.steps {
            if step.actions.is_empty() {
                if !step.is_end {
                    outcome.warn(format!("Step '{}' has no actions", step.system_name));
                }
                continue;
            }

            let mut ids: AHashSet<&str> = AHashSet::new();
            for (index, action) in step.actions.iter().enumerate() {
                if let Some(id) = action.id.as_deref() {
                    if !ids.insert(id) {
                        outcome.error(format!(
                            "Duplicate action id '{}' in step '{}'",
                            id, step.system_name
                        ));
                    }
                }

                let action_type = action.action_system_name.as_str();
                if action_type.trim().is_empty() {
                    outcome.warn(format!(
                        "Action at position {} in step '{}' has no actionSystemName",
                        index, step.system_name
                    ));
                    continue;
                }
                if !ctx.catalog.is_known(action_type) {
                    outcome.note(format!(
                        "Action '{}' in step '{}' has unknown type '{}'",
                        action.display_name(),
                        step.system_name,
                        action_type
                    ));
                    continue;
                }

                let config = action.config_object();
                for field in ctx.catalog.missing_fields(action_type, &config) {
                    outcome.error(format!(
                        "Action '{}' ({}) in step '{}' is missing required config field '{}'",
                        action.display_name(),
                        action_type,
                        step.system_name,
                        field
                    ));
                }
            }
        }

        Ok(outcome)
    }
}
