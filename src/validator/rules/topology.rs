use crate::error::RuleError;
use crate::model::Workflow;
use crate::validator::{RuleContext, RuleOutcome, ValidationRule};
use ahash::AHashSet;

/// Reports the first cycle found by a depth-first walk of the step graph.
pub struct CircularDependenciesRule;

impl ValidationRule for CircularDependenciesRule {
    fn name(&self) -> &str {
        "Circular Dependencies"
    }

    fn check(&self, _workflow: &Workflow, ctx: &RuleContext<'_>) -> Result<RuleOutcome, RuleError> {
        let mut outcome = RuleOutcome::default();
        if let Some(edge) = ctx.graph.find_cycle() {
            outcome.error(format!(
                "Circular dependency detected: step '{}' connects back to step '{}'",
                edge.from, edge.to
            ));
        }
        Ok(outcome)
    }
}

/// Steps that are neither a start step nor the target of any connection.
pub struct OrphanedStepsRule;

impl ValidationRule for OrphanedStepsRule {
    fn name(&self) -> &str {
        "Orphaned Steps"
    }

    fn check(&self, workflow: &Workflow, ctx: &RuleContext<'_>) -> Result<RuleOutcome, RuleError> {
        let mut outcome = RuleOutcome::default();
        let targets = ctx.graph.targets();

        let mut seen: AHashSet<&str> = AHashSet::new();
        for step in &workflow.steps {
            if !seen.insert(step.system_name.as_str()) {
                continue;
            }
            if !step.is_start && !targets.contains(step.system_name.as_str()) {
                outcome.warn(format!(
                    "Step '{}' is orphaned: it is not a start step and no connection targets it",
                    step.system_name
                ));
            }
        }

        if !workflow.has_start_step() {
            outcome.warn("Workflow has no start step and may not be executable");
        }

        Ok(outcome)
    }
}

/// Steps that some connection targets but that no start step can reach.
pub struct ReachabilityRule;

impl ValidationRule for ReachabilityRule {
    fn name(&self) -> &str {
        "Reachability"
    }

    fn check(&self, workflow: &Workflow, ctx: &RuleContext<'_>) -> Result<RuleOutcome, RuleError> {
        let mut outcome = RuleOutcome::default();
        if !workflow.has_start_step() {
            return Ok(outcome);
        }

        let reachable = ctx
            .graph
            .reachable_from(workflow.start_steps().map(|s| s.system_name.as_str()));
        let targets = ctx.graph.targets();

        for name in ctx.graph.nodes() {
            let name = name.as_str();
            // Orphans are already reported by their own rule.
            if targets.contains(name) && !reachable.contains(name) {
                outcome.note(format!(
                    "Step '{}' is not reachable from any start step",
                    name
                ));
            }
        }

        Ok(outcome)
    }
}
