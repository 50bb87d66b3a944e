//! Structural diff between two workflow definitions.
//!
//! Every level is matched by a stable identity, never by position: steps and
//! variables by `systemName`, actions by `id` (or a synthetic key when the
//! action has none). Neither input is modified.

use crate::model::Workflow;
use serde::{Deserialize, Serialize};
use serde_json::Value;

mod diff;
mod summary;

use diff::DiffWalker;
pub use summary::Summary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifferenceKind {
    Added,
    Removed,
    Modified,
}

impl DifferenceKind {
    /// The kind seen from the other direction.
    pub fn reversed(self) -> Self {
        match self {
            DifferenceKind::Added => DifferenceKind::Removed,
            DifferenceKind::Removed => DifferenceKind::Added,
            DifferenceKind::Modified => DifferenceKind::Modified,
        }
    }
}

/// The granularity a difference was found at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifferenceScope {
    Workflow,
    Step,
    Action,
    Variable,
}

/// A single change between the left and right workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Difference {
    #[serde(rename = "type")]
    pub kind: DifferenceKind,
    pub scope: DifferenceScope,
    /// Dotted locator, e.g. `steps.<systemName>.actions.<actionKey>`.
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_value: Option<Value>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub identical: bool,
    pub differences: Vec<Difference>,
    pub summary: Summary,
}

/// How `config` and `connections` payloads are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PayloadEquality {
    /// Raw text when the payload arrived as a string, compact serialized JSON
    /// otherwise. Key order and whitespace in string payloads are significant.
    #[default]
    Serialized,
    /// Parses string payloads and compares key-sorted serializations.
    Canonical,
}

/// How actions without an `id` are keyed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKeying {
    /// `<actionSystemName>_<position in step>`. Inserting an action shifts
    /// the keys of every later action.
    #[default]
    Positional,
    /// `<actionSystemName>#<occurrence among actions of the same type>`.
    /// Only inserting an action of the same type shifts keys.
    Ordinal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompareOptions {
    /// Display label for the left workflow. Has no effect on the differences.
    pub left_title: Option<String>,
    /// Display label for the right workflow. Has no effect on the differences.
    pub right_title: Option<String>,
    pub payload_equality: PayloadEquality,
    pub action_keying: ActionKeying,
}

impl CompareOptions {
    pub fn with_titles(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.left_title = Some(left.into());
        self.right_title = Some(right.into());
        self
    }

    pub fn left_title(&self) -> &str {
        self.left_title.as_deref().unwrap_or("Left")
    }

    pub fn right_title(&self) -> &str {
        self.right_title.as_deref().unwrap_or("Right")
    }
}

/// Computes structural differences between workflows.
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    options: CompareOptions,
}

impl Comparator {
    pub fn new(options: CompareOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    pub fn compare(&self, left: &Workflow, right: &Workflow) -> ComparisonResult {
        let mut walker = DiffWalker::new(&self.options);
        walker.compare_root(left, right);
        walker.compare_steps(left, right);
        walker.compare_variables(left, right);
        let differences = walker.finish();

        let summary = Summary::from_differences(&differences);
        log::debug!(
            "Compared '{}' with '{}': {} differences",
            left.system_name,
            right.system_name,
            differences.len()
        );

        ComparisonResult {
            identical: differences.is_empty(),
            differences,
            summary,
        }
    }
}

/// Compares with default options.
pub fn compare(left: &Workflow, right: &Workflow) -> ComparisonResult {
    Comparator::default().compare(left, right)
}
