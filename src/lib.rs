//! # Kensa - Workflow Validation and Comparison Engine
//!
//! **Kensa** inspects step/action workflow definitions. It treats a workflow as
//! a directed graph of steps whose edges live in the `connections` of each
//! action, runs a set of independent rules over that graph, and computes a
//! structural diff between two versions of a workflow.
//!
//! ## Core Workflow
//!
//! 1.  **Load**: Parse a workflow document with [`Workflow::from_json`](model::Workflow::from_json),
//!     or screen it first with [`load_workflow`](model::load_workflow) and a [`WorkflowGuard`](guard::WorkflowGuard).
//!     Custom export formats can implement [`IntoWorkflow`](model::IntoWorkflow).
//! 2.  **Validate**: Build a [`Validator`](validator::Validator) (or use the default) and call
//!     `validate`. Errors make a workflow invalid; warnings and info are advisory.
//! 3.  **Compare**: Use a [`Comparator`](comparator::Comparator) to diff two workflows by
//!     step, action and variable identity.
//! 4.  **Report**: Render either result as text with [`ReportFormatter`](report::ReportFormatter),
//!     or serialize it with serde.
//!
//! Both engines are synchronous, pure functions over in-memory data. They never
//! mutate their input and never fail on a structurally plausible workflow.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kensa::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let before = Workflow::from_file("workflows/intake_v1.json")?;
//!     let after = Workflow::from_file("workflows/intake_v2.json")?;
//!
//!     // Validate with the built-in rules plus one extension action type.
//!     let validator = Validator::builder()
//!         .with_action_type("FileCourtDocument", &["courtCode"])
//!         .build();
//!     let report = validator.validate(&after);
//!     println!("{}", ReportFormatter::format_validation(&report));
//!
//!     // Diff the two versions.
//!     let options = CompareOptions::default().with_titles("v1", "v2");
//!     let diff = Comparator::new(options.clone()).compare(&before, &after);
//!     println!("{}", ReportFormatter::format_comparison(&diff, &options));
//!
//!     Ok(())
//! }
//! ```

pub mod comparator;
pub mod error;
pub mod graph;
pub mod guard;
pub mod model;
pub mod prelude;
pub mod report;
pub mod validator;
