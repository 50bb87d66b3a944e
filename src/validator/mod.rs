use crate::error::RuleError;
use crate::graph::WorkflowGraph;
use crate::model::Workflow;
use ahash::AHashSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

mod catalog;
pub mod rules;

pub use catalog::{ActionCatalog, BUILTIN_ACTION_TYPES};

/// Findings of a single rule, split by severity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOutcome {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl RuleOutcome {
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn note(&mut self, message: impl Into<String>) {
        self.info.push(message.into());
    }
}

/// Shared, per-run state handed to every rule.
pub struct RuleContext<'a> {
    pub catalog: &'a ActionCatalog,
    /// Built once per `validate` call from the workflow under inspection.
    pub graph: &'a WorkflowGraph,
}

/// Defines the contract for one independent validation rule.
///
/// A rule that returns `Err` is reported as a single ERROR tagged with its
/// name; the remaining rules still run.
pub trait ValidationRule: Send + Sync {
    fn name(&self) -> &str;
    fn check(&self, workflow: &Workflow, ctx: &RuleContext<'_>) -> Result<RuleOutcome, RuleError>;
}

/// The full report of a validation run. `valid` is true exactly when `errors` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationResult {
    fn absorb(&mut self, outcome: RuleOutcome) {
        self.errors.extend(outcome.errors);
        self.warnings.extend(outcome.warnings);
        self.info.extend(outcome.info);
    }
}

/// Runs an ordered list of rules over a workflow.
///
/// A `Validator` holds no per-run state and can be shared across threads.
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
    catalog: ActionCatalog,
}

pub struct ValidatorBuilder {
    rules: Vec<Box<dyn ValidationRule>>,
    custom_rules: Vec<Box<dyn ValidationRule>>,
    disabled: AHashSet<String>,
    catalog: ActionCatalog,
}

impl ValidatorBuilder {
    pub fn new() -> Self {
        let mut rules: Vec<Box<dyn ValidationRule>> = Vec::new();
        rules::register_default_rules(&mut rules);
        Self {
            rules,
            custom_rules: Vec::new(),
            disabled: AHashSet::new(),
            catalog: ActionCatalog::default(),
        }
    }

    /// Appends a rule. Custom rules run after the built-in ones, in insertion order.
    pub fn with_rule(mut self, rule: Box<dyn ValidationRule>) -> Self {
        self.custom_rules.push(rule);
        self
    }

    /// Disables every rule with this name, built-in or custom.
    pub fn without_rule(mut self, name: &str) -> Self {
        self.disabled.insert(name.to_string());
        self
    }

    /// Teaches the catalog a new action type, or overrides a built-in one.
    pub fn with_action_type(mut self, action_type: &str, required_fields: &[&str]) -> Self {
        self.catalog
            .register(action_type, required_fields.iter().copied());
        self
    }

    pub fn with_catalog(mut self, catalog: ActionCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn build(self) -> Validator {
        let disabled = self.disabled;
        let rules = self
            .rules
            .into_iter()
            .chain(self.custom_rules)
            .filter(|rule| !disabled.contains(rule.name()))
            .collect();
        Validator {
            rules,
            catalog: self.catalog,
        }
    }
}

impl Default for ValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Validator {
    fn default() -> Self {
        ValidatorBuilder::new().build()
    }
}

impl Validator {
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    /// Names of the active rules in evaluation order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn catalog(&self) -> &ActionCatalog {
        &self.catalog
    }

    /// Runs every rule over `workflow`. Never fails and never mutates its input.
    pub fn validate(&self, workflow: &Workflow) -> ValidationResult {
        let graph = WorkflowGraph::new(workflow);
        let ctx = RuleContext {
            catalog: &self.catalog,
            graph: &graph,
        };

        let mut result = ValidationResult::default();
        for rule in &self.rules {
            log::debug!(
                "Running rule '{}' on workflow '{}'",
                rule.name(),
                workflow.system_name
            );
            match rule.check(workflow, &ctx) {
                Ok(outcome) => result.absorb(outcome),
                Err(e) => {
                    log::warn!("Rule '{}' failed: {}", rule.name(), e);
                    result
                        .errors
                        .push(format!("Rule '{}' failed: {}", rule.name(), e));
                }
            }
        }

        result.valid = result.errors.is_empty();
        result
    }

    /// Validates independent workflows in parallel. Results are in input order.
    pub fn validate_all(&self, workflows: &[Workflow]) -> Vec<ValidationResult> {
        let results: Vec<ValidationResult> =
            workflows.par_iter().map(|w| self.validate(w)).collect();
        log::info!(
            "Validated {} workflows, {} invalid",
            results.len(),
            results.iter().filter(|r| !r.valid).count()
        );
        results
    }
}

/// Validates with the default rule set and catalog.
pub fn validate(workflow: &Workflow) -> ValidationResult {
    Validator::default().validate(workflow)
}
