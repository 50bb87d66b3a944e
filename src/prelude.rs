//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the kensa crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use kensa::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let workflow = load_workflow_file("path/to/workflow.json", &DefaultGuard::default())?;
//! let result = validate(&workflow);
//! if !result.valid {
//!     println!("{}", ReportFormatter::format_validation(&result));
//! }
//! # Ok(())
//! # }
//! ```

// Engines
pub use crate::comparator::{
    ActionKeying, CompareOptions, Comparator, ComparisonResult, Difference, DifferenceKind,
    DifferenceScope, PayloadEquality, Summary, compare,
};
pub use crate::validator::{
    ActionCatalog, RuleContext, RuleOutcome, ValidationResult, ValidationRule, Validator,
    ValidatorBuilder, validate,
};

// Data model
pub use crate::graph::{WorkflowGraph, build_adjacency};
pub use crate::model::{
    Action, IntoWorkflow, Outcome, Step, Variable, Workflow, load_workflow, load_workflow_file,
};

// Input screening
pub use crate::guard::{DefaultGuard, GuardLimits, WorkflowGuard};

// Error types
pub use crate::error::{GuardError, LoadError, RuleError};

// Report formatting
pub use crate::report::ReportFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
