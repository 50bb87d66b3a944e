use super::{Difference, DifferenceKind, DifferenceScope};
use serde::{Deserialize, Serialize};

/// Difference counts per scope and kind, derived from the difference list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub workflow_fields_modified: usize,
    pub steps_added: usize,
    pub steps_removed: usize,
    /// One per changed step field, not per step.
    pub steps_modified: usize,
    pub actions_added: usize,
    pub actions_removed: usize,
    pub actions_modified: usize,
    pub variables_added: usize,
    pub variables_removed: usize,
    pub variables_modified: usize,
}

impl Summary {
    pub fn from_differences(differences: &[Difference]) -> Self {
        let mut summary = Self::default();
        for diff in differences {
            let counter = match (diff.scope, diff.kind) {
                (DifferenceScope::Workflow, _) => &mut summary.workflow_fields_modified,
                (DifferenceScope::Step, DifferenceKind::Added) => &mut summary.steps_added,
                (DifferenceScope::Step, DifferenceKind::Removed) => &mut summary.steps_removed,
                (DifferenceScope::Step, DifferenceKind::Modified) => &mut summary.steps_modified,
                (DifferenceScope::Action, DifferenceKind::Added) => &mut summary.actions_added,
                (DifferenceScope::Action, DifferenceKind::Removed) => &mut summary.actions_removed,
                (DifferenceScope::Action, DifferenceKind::Modified) => {
                    &mut summary.actions_modified
                }
                (DifferenceScope::Variable, DifferenceKind::Added) => &mut summary.variables_added,
                (DifferenceScope::Variable, DifferenceKind::Removed) => {
                    &mut summary.variables_removed
                }
                (DifferenceScope::Variable, DifferenceKind::Modified) => {
                    &mut summary.variables_modified
                }
            };
            *counter += 1;
        }
        summary
    }

    pub fn steps_total(&self) -> usize {
        self.steps_added + self.steps_removed + self.steps_modified
    }

    pub fn actions_total(&self) -> usize {
        self.actions_added + self.actions_removed + self.actions_modified
    }

    pub fn variables_total(&self) -> usize {
        self.variables_added + self.variables_removed + self.variables_modified
    }

    pub fn total(&self) -> usize {
        self.workflow_fields_modified
            + self.steps_total()
            + self.actions_total()
            + self.variables_total()
    }
}
