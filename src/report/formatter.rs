use crate::comparator::{CompareOptions, ComparisonResult, DifferenceKind};
use crate::validator::ValidationResult;
use std::fmt::Write;

/// Formats engine results into human-readable text.
pub struct ReportFormatter;

impl ReportFormatter {
    /// Renders a validation result, one section per severity. Empty sections are omitted.
    pub fn format_validation(result: &ValidationResult) -> String {
        let mut out = String::new();
        let verdict = if result.valid { "VALID" } else { "INVALID" };
        let _ = writeln!(
            out,
            "Validation: {} ({} errors, {} warnings, {} info)",
            verdict,
            result.errors.len(),
            result.warnings.len(),
            result.info.len()
        );
        Self::write_section(&mut out, "Errors", &result.errors);
        Self::write_section(&mut out, "Warnings", &result.warnings);
        Self::write_section(&mut out, "Info", &result.info);
        out
    }

    /// Renders a comparison result. The titles in `options` label the two sides.
    pub fn format_comparison(result: &ComparisonResult, options: &CompareOptions) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Comparison: {} <-> {}",
            options.left_title(),
            options.right_title()
        );
        if result.identical {
            let _ = writeln!(out, "The workflows are identical.");
            return out;
        }

        let s = &result.summary;
        let _ = writeln!(out, "{} differences", result.differences.len());
        let _ = writeln!(
            out,
            "  Workflow fields: {} modified",
            s.workflow_fields_modified
        );
        let _ = writeln!(
            out,
            "  Steps:           +{} -{} ~{}",
            s.steps_added, s.steps_removed, s.steps_modified
        );
        let _ = writeln!(
            out,
            "  Actions:         +{} -{} ~{}",
            s.actions_added, s.actions_removed, s.actions_modified
        );
        let _ = writeln!(
            out,
            "  Variables:       +{} -{} ~{}",
            s.variables_added, s.variables_removed, s.variables_modified
        );
        let _ = writeln!(out);

        for diff in &result.differences {
            let marker = match diff.kind {
                DifferenceKind::Added => '+',
                DifferenceKind::Removed => '-',
                DifferenceKind::Modified => '~',
            };
            let _ = writeln!(out, "{} {}: {}", marker, diff.path, diff.description);
            if diff.kind == DifferenceKind::Modified {
                if let (Some(left), Some(right)) = (&diff.left_value, &diff.right_value) {
                    if !left.is_object() && !right.is_object() {
                        let _ = writeln!(out, "    {}: {}", options.left_title(), left);
                        let _ = writeln!(out, "    {}: {}", options.right_title(), right);
                    }
                }
            }
        }
        out
    }

    fn write_section(out: &mut String, title: &str, entries: &[String]) {
        if entries.is_empty() {
            return;
        }
        let _ = writeln!(out, "{}:", title);
        for entry in entries {
            let _ = writeln!(out, "  - {}", entry);
        }
    }
}
