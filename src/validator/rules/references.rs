use crate::error::RuleError;
use crate::model::{Workflow, payload};
use crate::validator::{RuleContext, RuleOutcome, ValidationRule};
use ahash::AHashSet;
use serde_json::Value;

const VARIABLE_KEY_SUFFIX: &str = "Variable";

/// Every connection target must name a step of the same workflow.
pub struct ConnectionsRule;

impl ValidationRule for ConnectionsRule {
    fn name(&self) -> &str {
        "Connections"
    }

    fn check(&self, workflow: &Workflow, ctx: &RuleContext<'_>) -> Result<RuleOutcome, RuleError> {
        let mut outcome = RuleOutcome::default();

        for step in &workflow.steps {
            for action in &step.actions {
                if payload::is_malformed(&action.connections) {
                    outcome.warn(format!(
                        "Action '{}' in step '{}' has connections that could not be parsed",
                        action.display_name(),
                        step.system_name
                    ));
                    continue;
                }
                for (slot, target) in action.connection_targets() {
                    if !ctx.graph.contains(&target) {
                        outcome.error(format!(
                            "Action '{}' in step '{}' connects '{}' to missing step '{}'",
                            action.display_name(),
                            step.system_name,
                            slot,
                            target
                        ));
                    }
                }
            }
        }

        Ok(outcome)
    }
}

/// Unique variable names, defaults for mandatory inputs, and a best-effort
/// scan of action configs for references to undefined variables.
pub struct VariablesRule;

impl ValidationRule for VariablesRule {
    fn name(&self) -> &str {
        "Variables"
    }

    fn check(&self, workflow: &Workflow, _ctx: &RuleContext<'_>) -> Result<RuleOutcome, RuleError> {
        let mut outcome = RuleOutcome::default();

        let mut known: AHashSet<&str> = AHashSet::new();
        for variable in &workflow.variables {
            if !known.insert(variable.system_name.as_str()) {
                outcome.error(format!(
                    "Duplicate variable systemName '{}'",
                    variable.system_name
                ));
            }
            if variable.is_mandatory && variable.is_input_variable && !variable.has_default_value()
            {
                outcome.warn(format!(
                    "Mandatory input variable '{}' has no default value",
                    variable.system_name
                ));
            }
        }

        for step in &workflow.steps {
            for action in &step.actions {
                let config = Value::Object(action.config_object());
                let mut references = Vec::new();
                collect_variable_references(&config, &mut references);
                for (key, name) in references {
                    if !known.contains(name) {
                        outcome.warn(format!(
                            "Action '{}' in step '{}' references undefined variable '{}' via '{}'",
                            action.display_name(),
                            step.system_name,
                            name,
                            key
                        ));
                    }
                }
            }
        }

        Ok(outcome)
    }
}

/// Collects `(key, value)` for every `*Variable` key holding a non-empty string, at any depth.
fn collect_variable_references<'a>(value: &'a Value, found: &mut Vec<(&'a str, &'a str)>) {
    match value {
        Value::Object(map) => {
            for (key, inner) in map {
                if key.len() > VARIABLE_KEY_SUFFIX.len() && key.ends_with(VARIABLE_KEY_SUFFIX) {
                    if let Value::String(name) = inner {
                        if !name.trim().is_empty() {
                            found.push((key.as_str(), name.as_str()));
                        }
                    }
                }
                collect_variable_references(inner, found);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_variable_references(item, found);
            }
        }
        _ => {}
    }
}
