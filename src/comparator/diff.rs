use super::{
    ActionKeying, CompareOptions, Difference, DifferenceKind, DifferenceScope, PayloadEquality,
};
use crate::model::{Action, Step, Workflow, payload};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;

/// Walks two workflows level by level and accumulates their differences.
pub(super) struct DiffWalker<'a> {
    options: &'a CompareOptions,
    differences: Vec<Difference>,
}

impl<'a> DiffWalker<'a> {
    pub(super) fn new(options: &'a CompareOptions) -> Self {
        Self {
            options,
            differences: Vec::new(),
        }
    }

    pub(super) fn finish(self) -> Vec<Difference> {
        self.differences
    }

    pub(super) fn compare_root(&mut self, left: &Workflow, right: &Workflow) {
        let scope = DifferenceScope::Workflow;
        self.compare_field(scope, "name", "Workflow name", &left.name, &right.name);
        self.compare_field(
            scope,
            "description",
            "Workflow description",
            &left.description,
            &right.description,
        );
        self.compare_field(
            scope,
            "overrideNotifications",
            "Override notifications",
            &left.override_notifications,
            &right.override_notifications,
        );
        self.compare_field(
            scope,
            "exceptionNotifications",
            "Exception notifications",
            &left.exception_notifications,
            &right.exception_notifications,
        );
    }

    pub(super) fn compare_steps(&mut self, left: &Workflow, right: &Workflow) {
        let left_steps = keyed(&left.steps, |s| s.system_name.clone());
        let right_steps = keyed(&right.steps, |s| s.system_name.clone());
        let right_by_name: AHashMap<&str, &Step> =
            right_steps.iter().map(|(k, s)| (k.as_str(), *s)).collect();
        let left_names: AHashSet<&str> = left_steps.iter().map(|(k, _)| k.as_str()).collect();

        for (name, left_step) in &left_steps {
            match right_by_name.get(name.as_str()) {
                Some(right_step) => self.compare_step(name, left_step, right_step),
                None => self.push(
                    DifferenceKind::Removed,
                    DifferenceScope::Step,
                    format!("steps.{}", name),
                    to_json(*left_step),
                    None,
                    format!("Step '{}' was removed", name),
                ),
            }
        }

        for (name, right_step) in &right_steps {
            if !left_names.contains(name.as_str()) {
                self.push(
                    DifferenceKind::Added,
                    DifferenceScope::Step,
                    format!("steps.{}", name),
                    None,
                    to_json(*right_step),
                    format!("Step '{}' was added", name),
                );
            }
        }
    }

    fn compare_step(&mut self, name: &str, left: &Step, right: &Step) {
        let scope = DifferenceScope::Step;
        let prefix = format!("steps.{}", name);
        let label = |field: &str| format!("Step '{}' {}", name, field);

        self.compare_field(
            scope,
            &format!("{}.name", prefix),
            &label("name"),
            &left.name,
            &right.name,
        );
        self.compare_field(
            scope,
            &format!("{}.description", prefix),
            &label("description"),
            &left.description,
            &right.description,
        );
        self.compare_field(
            scope,
            &format!("{}.isStart", prefix),
            &label("isStart"),
            &left.is_start,
            &right.is_start,
        );
        self.compare_field(
            scope,
            &format!("{}.isEnd", prefix),
            &label("isEnd"),
            &left.is_end,
            &right.is_end,
        );

        self.compare_actions(name, &prefix, &left.actions, &right.actions);
    }

    fn compare_actions(&mut self, step: &str, prefix: &str, left: &[Action], right: &[Action]) {
        let left_actions = action_keys(left, self.options.action_keying);
        let right_actions = action_keys(right, self.options.action_keying);
        let right_by_key: AHashMap<&str, &Action> =
            right_actions.iter().map(|(k, a)| (k.as_str(), *a)).collect();
        let left_keys: AHashSet<&str> = left_actions.iter().map(|(k, _)| k.as_str()).collect();

        for (key, left_action) in &left_actions {
            let path = format!("{}.actions.{}", prefix, key);
            match right_by_key.get(key.as_str()) {
                Some(right_action) => {
                    let changed = self.changed_action_aspects(left_action, right_action);
                    if !changed.is_empty() {
                        self.push(
                            DifferenceKind::Modified,
                            DifferenceScope::Action,
                            path,
                            to_json(*left_action),
                            to_json(*right_action),
                            format!(
                                "Action '{}' in step '{}' was modified ({})",
                                key,
                                step,
                                changed.join(", ")
                            ),
                        );
                    }
                }
                None => self.push(
                    DifferenceKind::Removed,
                    DifferenceScope::Action,
                    path,
                    to_json(*left_action),
                    None,
                    format!("Action '{}' was removed from step '{}'", key, step),
                ),
            }
        }

        for (key, right_action) in &right_actions {
            if !left_keys.contains(key.as_str()) {
                self.push(
                    DifferenceKind::Added,
                    DifferenceScope::Action,
                    format!("{}.actions.{}", prefix, key),
                    None,
                    to_json(*right_action),
                    format!("Action '{}' was added to step '{}'", key, step),
                );
            }
        }
    }

    /// Names of the aspects that differ. Any one of them marks the action modified.
    fn changed_action_aspects(&self, left: &Action, right: &Action) -> Vec<&'static str> {
        let mut changed = Vec::new();
        // A synthetic key can coincide with an explicit id on the other side.
        if left.id != right.id {
            changed.push("id");
        }
        if left.name != right.name {
            changed.push("name");
        }
        if left.action_system_name != right.action_system_name {
            changed.push("actionSystemName");
        }
        if left.order != right.order {
            changed.push("order");
        }
        if !self.payloads_equal(&left.config, &right.config) {
            changed.push("config");
        }
        if !self.payloads_equal(&left.connections, &right.connections) {
            changed.push("connections");
        }
        changed
    }

    pub(super) fn compare_variables(&mut self, left: &Workflow, right: &Workflow) {
        let left_vars = keyed(&left.variables, |v| v.system_name.clone());
        let right_vars = keyed(&right.variables, |v| v.system_name.clone());
        let right_by_name: AHashMap<&str, Value> = right_vars
            .iter()
            .map(|(k, v)| (k.as_str(), to_json(*v).unwrap_or(Value::Null)))
            .collect();
        let left_names: AHashSet<&str> = left_vars.iter().map(|(k, _)| k.as_str()).collect();

        for (name, variable) in &left_vars {
            let path = format!("variables.{}", name);
            let left_value = to_json(*variable).unwrap_or(Value::Null);
            match right_by_name.get(name.as_str()) {
                Some(right_value) => {
                    if !self.payloads_equal(&left_value, right_value) {
                        self.push(
                            DifferenceKind::Modified,
                            DifferenceScope::Variable,
                            path,
                            Some(left_value),
                            Some(right_value.clone()),
                            format!("Variable '{}' was modified", name),
                        );
                    }
                }
                None => self.push(
                    DifferenceKind::Removed,
                    DifferenceScope::Variable,
                    path,
                    Some(left_value),
                    None,
                    format!("Variable '{}' was removed", name),
                ),
            }
        }

        for (name, variable) in &right_vars {
            if !left_names.contains(name.as_str()) {
                self.push(
                    DifferenceKind::Added,
                    DifferenceScope::Variable,
                    format!("variables.{}", name),
                    None,
                    to_json(*variable),
                    format!("Variable '{}' was added", name),
                );
            }
        }
    }

    fn compare_field<T>(
        &mut self,
        scope: DifferenceScope,
        path: &str,
        label: &str,
        left: &T,
        right: &T,
    ) where
        T: PartialEq + Serialize + ?Sized,
    {
        if left == right {
            return;
        }
        let left_value = to_json(left);
        let right_value = to_json(right);
        let description = format!(
            "{} changed from {} to {}",
            label,
            left_value.as_ref().unwrap_or(&Value::Null),
            right_value.as_ref().unwrap_or(&Value::Null)
        );
        self.push(
            DifferenceKind::Modified,
            scope,
            path.to_string(),
            left_value,
            right_value,
            description,
        );
    }

    fn payloads_equal(&self, left: &Value, right: &Value) -> bool {
        match self.options.payload_equality {
            PayloadEquality::Serialized => {
                payload::payload_string(left) == payload::payload_string(right)
            }
            PayloadEquality::Canonical => {
                payload::canonical_string(left) == payload::canonical_string(right)
            }
        }
    }

    fn push(
        &mut self,
        kind: DifferenceKind,
        scope: DifferenceScope,
        path: String,
        left_value: Option<Value>,
        right_value: Option<Value>,
        description: String,
    ) {
        self.differences.push(Difference {
            kind,
            scope,
            path,
            left_value,
            right_value,
            description,
        });
    }
}

/// Pairs each item with its identity key, keeping the first item for a repeated key.
fn keyed<T, F>(items: &[T], key: F) -> Vec<(String, &T)>
where
    F: Fn(&T) -> String,
{
    items
        .iter()
        .map(|item| (key(item), item))
        .unique_by(|(k, _)| k.clone())
        .collect()
}

/// Keys actions by `id`, falling back to a synthetic key built per `keying`.
fn action_keys(actions: &[Action], keying: ActionKeying) -> Vec<(String, &Action)> {
    let mut occurrences: AHashMap<&str, usize> = AHashMap::new();
    let keys: Vec<String> = actions
        .iter()
        .enumerate()
        .map(|(index, action)| {
            if let Some(id) = &action.id {
                return id.clone();
            }
            let action_type = action.action_system_name.as_str();
            match keying {
                ActionKeying::Positional => format!("{}_{}", action_type, index),
                ActionKeying::Ordinal => {
                    let seen = occurrences.entry(action_type).or_insert(0);
                    let key = format!("{}#{}", action_type, seen);
                    *seen += 1;
                    key
                }
            }
        })
        .collect();

    keys.into_iter()
        .zip(actions)
        .unique_by(|(key, _)| key.clone())
        .collect()
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Option<Value> {
    serde_json::to_value(value).ok()
}
