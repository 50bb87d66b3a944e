//! The built-in validation rules, in evaluation order.

use super::ValidationRule;

mod actions;
mod references;
mod structure;
mod topology;

pub use actions::ActionsRule;
pub use references::{ConnectionsRule, VariablesRule};
pub use structure::{BasicStructureRule, StartEndStepsRule};
pub use topology::{CircularDependenciesRule, OrphanedStepsRule, ReachabilityRule};

pub(super) fn register_default_rules(rules: &mut Vec<Box<dyn ValidationRule>>) {
    rules.push(Box::new(BasicStructureRule));
    rules.push(Box::new(StartEndStepsRule));
    rules.push(Box::new(ConnectionsRule));
    rules.push(Box::new(VariablesRule));
    rules.push(Box::new(ActionsRule));
    rules.push(Box::new(CircularDependenciesRule));
    rules.push(Box::new(OrphanedStepsRule));
    rules.push(Box::new(ReachabilityRule));
}

/// Quoted, comma-separated names for messages.
fn quoted_list<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    use itertools::Itertools;
    names.into_iter().map(|n| format!("'{}'", n)).join(", ")
}
