//! Comparator tests
//!
//! Tests for identity matching, difference paths, keying modes and the summary.
//!
mod common;
use common::*;
use kensa::prelude::*;
use serde_json::json;

fn paths(result: &ComparisonResult) -> Vec<(DifferenceKind, &str)> {
    result
        .differences
        .iter()
        .map(|d| (d.kind, d.path.as_str()))
        .collect()
}

#[cfg(test)]
mod identity_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_same_workflow_is_identical() {
        let wf = create_matter_workflow();
        let result = compare(&wf, &wf.clone());
        assert!(result.identical);
        assert!(result.differences.is_empty());
        assert_eq!(result.summary, Summary::default());
    }

    #[test]
    fn test_step_rename_yields_one_difference() {
        let left = create_linear_workflow();
        let mut right = left.clone();
        right.steps[1].name = "Middle".to_string();

        let result = compare(&left, &right);
        assert!(!result.identical);
        assert_eq!(
            result.differences,
            vec![Difference {
                kind: DifferenceKind::Modified,
                scope: DifferenceScope::Step,
                path: "steps.mid.name".to_string(),
                left_value: Some(json!("Mid")),
                right_value: Some(json!("Middle")),
                description: "Step 'mid' name changed from \"Mid\" to \"Middle\"".to_string(),
            }]
        );
        assert_eq!(result.summary.steps_modified, 1);
        assert_eq!(result.summary.total(), 1);
    }

    #[test]
    fn test_reordering_steps_is_not_a_change() {
        let left = create_matter_workflow();
        let mut right = left.clone();
        right.steps.reverse();
        right.variables.reverse();
        assert!(compare(&left, &right).identical);
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let left = create_linear_workflow();
        let mut right = left.clone();
        right.description = "changed".to_string();
        let (l, r) = (left.clone(), right.clone());
        let _ = compare(&left, &right);
        assert_eq!(left, l);
        assert_eq!(right, r);
    }

    #[test]
    fn test_titles_do_not_affect_differences() {
        let left = create_linear_workflow();
        let mut right = left.clone();
        right.steps[2].is_end = false;

        let plain = compare(&left, &right);
        let titled =
            Comparator::new(CompareOptions::default().with_titles("v1", "v2")).compare(&left, &right);
        assert_eq!(plain, titled);
    }
}

#[cfg(test)]
mod workflow_level_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_root_field_changes() {
        let left = create_matter_workflow();
        let mut right = left.clone();
        right.name = "Matter Intake".to_string();
        right.override_notifications = true;
        right.exception_notification_email_addresses = "other@example.com".to_string();

        let result = compare(&left, &right);
        assert_eq!(
            paths(&result),
            vec![
                (DifferenceKind::Modified, "name"),
                (DifferenceKind::Modified, "overrideNotifications"),
            ]
        );
        assert_eq!(result.summary.workflow_fields_modified, 2);
        assert!(result.differences.iter().all(|d| d.scope == DifferenceScope::Workflow));
    }

    #[test]
    fn test_step_added_and_removed() {
        let left = create_linear_workflow();
        let mut right = left.clone();
        right.steps.remove(1);
        right.steps.push(end_step("archive"));

        let result = compare(&left, &right);
        assert_eq!(
            paths(&result),
            vec![
                (DifferenceKind::Removed, "steps.mid"),
                (DifferenceKind::Added, "steps.archive"),
            ]
        );

        let removed = &result.differences[0];
        assert_eq!(removed.left_value.as_ref().map(|v| v["systemName"].clone()), Some(json!("mid")));
        assert_eq!(removed.right_value, None);

        let added = &result.differences[1];
        assert_eq!(added.left_value, None);
        assert_eq!(added.right_value.as_ref().map(|v| v["isEnd"].clone()), Some(json!(true)));

        assert_eq!(result.summary.steps_added, 1);
        assert_eq!(result.summary.steps_removed, 1);
    }

    #[test]
    fn test_step_flags_count_per_field() {
        let left = create_linear_workflow();
        let mut right = left.clone();
        right.steps[1].is_start = true;
        right.steps[1].is_end = true;
        right.steps[1].description = "now terminal".to_string();

        let result = compare(&left, &right);
        assert_eq!(
            paths(&result),
            vec![
                (DifferenceKind::Modified, "steps.mid.description"),
                (DifferenceKind::Modified, "steps.mid.isStart"),
                (DifferenceKind::Modified, "steps.mid.isEnd"),
            ]
        );
        assert_eq!(result.summary.steps_modified, 3);
    }

    #[test]
    fn test_variables() {
        let left = create_matter_workflow();
        let mut right = left.clone();
        right.variables[0].default_value = json!("ACME Corp");
        right.variables.remove(1);
        right.variables.push(variable("matterNumber"));

        let result = compare(&left, &right);
        assert_eq!(
            paths(&result),
            vec![
                (DifferenceKind::Modified, "variables.clientName"),
                (DifferenceKind::Removed, "variables.conflictFound"),
                (DifferenceKind::Added, "variables.matterNumber"),
            ]
        );
        assert_eq!(result.summary.variables_total(), 3);
        assert_eq!(
            result.differences[0]
                .right_value
                .as_ref()
                .map(|v| v["defaultValue"].clone()),
            Some(json!("ACME Corp"))
        );
    }

    #[test]
    fn test_duplicate_keys_first_occurrence_wins() {
        let left = create_linear_workflow();
        let mut right = left.clone();
        let mut shadow = right.steps[1].clone();
        shadow.name = "Shadow".to_string();
        right.steps.push(shadow);

        assert!(compare(&left, &right).identical);
    }
}

#[cfg(test)]
mod action_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn untyped(action_type: &str, order: i64) -> Action {
        Action {
            id: None,
            action_system_name: action_type.to_string(),
            name: format!("{} {}", action_type, order),
            order,
            config: json!({}),
            connections: serde_json::Value::Null,
        }
    }

    #[test]
    fn test_action_matched_by_id() {
        let left = create_linear_workflow();
        let mut right = left.clone();
        right.steps[1].actions[0].name = "Advance".to_string();
        right.steps[1].actions[0].order = 5;

        let result = compare(&left, &right);
        assert_eq!(paths(&result), vec![(DifferenceKind::Modified, "steps.mid.actions.a2")]);
        let diff = &result.differences[0];
        assert_eq!(diff.scope, DifferenceScope::Action);
        assert_eq!(
            diff.description,
            "Action 'a2' in step 'mid' was modified (name, order)"
        );
        assert_eq!(result.summary.actions_modified, 1);
    }

    #[test]
    fn test_action_added_and_removed() {
        let left = create_linear_workflow();
        let mut right = left.clone();
        right.steps[0].actions = vec![action("a9", Some("mid"))];

        let result = compare(&left, &right);
        assert_eq!(
            paths(&result),
            vec![
                (DifferenceKind::Removed, "steps.start.actions.a1"),
                (DifferenceKind::Added, "steps.start.actions.a9"),
            ]
        );
        assert_eq!(result.summary.actions_added, 1);
        assert_eq!(result.summary.actions_removed, 1);
    }

    #[test]
    fn test_connection_change_modifies_action() {
        let left = create_matter_workflow();
        let mut right = left.clone();
        right.steps[1].actions[0].connections = json!({
            "yes": { "step": "decline" },
            "no": { "step": "done" }
        });

        let result = compare(&left, &right);
        assert_eq!(
            paths(&result),
            vec![(DifferenceKind::Modified, "steps.conflict_check.actions.check")]
        );
        assert!(result.differences[0].description.ends_with("(connections)"));
    }

    #[test]
    fn test_positional_keys_for_actions_without_id() {
        let left = create_matter_workflow();
        let result = compare(&left, &left.clone());
        assert!(result.identical);

        let mut right = left.clone();
        right.steps[2].actions[0].config = json!({ "notificationType": "sms" });
        let result = compare(&left, &right);
        assert_eq!(
            paths(&result),
            vec![(
                DifferenceKind::Modified,
                "steps.open_matter.actions.SendNotification_0"
            )]
        );
    }

    #[test]
    fn test_positional_insert_shifts_later_keys() {
        let mut left = create_linear_workflow();
        left.steps[1].actions = vec![untyped("Wait", 1), untyped("UpdateCase", 2)];
        let mut right = left.clone();
        right.steps[1].actions.insert(0, untyped("AssignTask", 0));

        let result = compare(&left, &right);
        assert_eq!(
            paths(&result),
            vec![
                (DifferenceKind::Removed, "steps.mid.actions.Wait_0"),
                (DifferenceKind::Removed, "steps.mid.actions.UpdateCase_1"),
                (DifferenceKind::Added, "steps.mid.actions.AssignTask_0"),
                (DifferenceKind::Added, "steps.mid.actions.Wait_1"),
                (DifferenceKind::Added, "steps.mid.actions.UpdateCase_2"),
            ]
        );
    }

    #[test]
    fn test_ordinal_keys_survive_insert_of_other_type() {
        let mut left = create_linear_workflow();
        left.steps[1].actions = vec![untyped("Wait", 1), untyped("UpdateCase", 2)];
        let mut right = left.clone();
        right.steps[1].actions.insert(0, untyped("AssignTask", 0));

        let options = CompareOptions {
            action_keying: ActionKeying::Ordinal,
            ..CompareOptions::default()
        };
        let result = Comparator::new(options).compare(&left, &right);
        assert_eq!(
            paths(&result),
            vec![(DifferenceKind::Added, "steps.mid.actions.AssignTask#0")]
        );
    }

    #[test]
    fn test_ids_take_precedence_over_synthetic_keys() {
        let mut left = create_linear_workflow();
        left.steps[1].actions.push(untyped("Wait", 3));
        let right = left.clone();

        let options = CompareOptions {
            action_keying: ActionKeying::Ordinal,
            ..CompareOptions::default()
        };
        let result = Comparator::new(options).compare(&left, &right);
        assert!(result.identical);
    }

    #[test]
    fn test_id_matching_a_synthetic_key_is_still_a_change() {
        let mut left = create_linear_workflow();
        left.steps[1].actions = vec![untyped("UpdateCase", 0)];
        let mut right = left.clone();
        right.steps[1].actions[0].id = Some("UpdateCase_0".to_string());

        let result = compare(&left, &right);
        assert_eq!(
            paths(&result),
            vec![(DifferenceKind::Modified, "steps.mid.actions.UpdateCase_0")]
        );
        assert_eq!(
            result.differences[0].description,
            "Action 'UpdateCase_0' in step 'mid' was modified (id)"
        );
    }
}

#[cfg(test)]
mod payload_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn string_vs_object() -> (Workflow, Workflow) {
        let mut left = create_linear_workflow();
        left.steps[1].actions[0].config = json!(r#"{"b":1,"a":2}"#);
        let mut right = left.clone();
        right.steps[1].actions[0].config = json!({ "a": 2, "b": 1 });
        (left, right)
    }

    #[test]
    fn test_serialized_equality_distinguishes_string_form() {
        let (left, right) = string_vs_object();
        let result = compare(&left, &right);
        assert_eq!(
            paths(&result),
            vec![(DifferenceKind::Modified, "steps.mid.actions.a2")]
        );
        assert!(result.differences[0].description.ends_with("(config)"));
    }

    #[test]
    fn test_canonical_equality_ignores_form_and_key_order() {
        let (left, right) = string_vs_object();
        let options = CompareOptions {
            payload_equality: PayloadEquality::Canonical,
            ..CompareOptions::default()
        };
        assert!(Comparator::new(options).compare(&left, &right).identical);
    }

    #[test]
    fn test_canonical_equality_still_sees_value_changes() {
        let (left, mut right) = string_vs_object();
        right.steps[1].actions[0].config = json!({ "a": 3, "b": 1 });
        let options = CompareOptions {
            payload_equality: PayloadEquality::Canonical,
            ..CompareOptions::default()
        };
        assert!(!Comparator::new(options).compare(&left, &right).identical);
    }
}

#[cfg(test)]
mod symmetry_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mirrored(result: &ComparisonResult) -> Vec<(DifferenceKind, String, String, String)> {
        let mut entries: Vec<_> = result
            .differences
            .iter()
            .map(|d| {
                (
                    d.kind.reversed(),
                    d.path.clone(),
                    format!("{:?}", d.right_value),
                    format!("{:?}", d.left_value),
                )
            })
            .collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1));
        entries
    }

    fn plain(result: &ComparisonResult) -> Vec<(DifferenceKind, String, String, String)> {
        let mut entries: Vec<_> = result
            .differences
            .iter()
            .map(|d| {
                (
                    d.kind,
                    d.path.clone(),
                    format!("{:?}", d.left_value),
                    format!("{:?}", d.right_value),
                )
            })
            .collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1));
        entries
    }

    #[test]
    fn test_compare_is_anti_symmetric() {
        let left = create_matter_workflow();
        let mut right = left.clone();
        right.name = "Renamed".to_string();
        right.steps.remove(3);
        right.steps.push(end_step("escalate"));
        right.steps[0].actions[0].order = 2;
        right.variables.push(variable("priority"));

        let forward = compare(&left, &right);
        let backward = compare(&right, &left);

        assert_eq!(forward.differences.len(), backward.differences.len());
        assert_eq!(mirrored(&forward), plain(&backward));
        assert_eq!(forward.summary.steps_added, backward.summary.steps_removed);
        assert_eq!(forward.summary.variables_added, backward.summary.variables_removed);
    }

    #[test]
    fn test_summary_matches_differences() {
        let left = create_matter_workflow();
        let mut right = left.clone();
        right.description = "updated".to_string();
        right.steps[1].name = "Conflict Review".to_string();
        right.steps[2].actions.pop();
        right.variables.clear();

        let result = compare(&left, &right);
        let count = |scope: DifferenceScope| {
            result.differences.iter().filter(|d| d.scope == scope).count()
        };
        assert_eq!(result.summary.total(), result.differences.len());
        assert_eq!(result.summary.workflow_fields_modified, count(DifferenceScope::Workflow));
        assert_eq!(result.summary.steps_total(), count(DifferenceScope::Step));
        assert_eq!(result.summary.actions_total(), count(DifferenceScope::Action));
        assert_eq!(result.summary.variables_total(), count(DifferenceScope::Variable));
        assert_eq!(result.summary.actions_removed, 1);
        assert_eq!(result.summary.variables_removed, 2);
    }
}
