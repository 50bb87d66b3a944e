use super::outcome::Outcome;
use super::payload;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The root aggregate: a named set of steps and variables.
///
/// Workflows are treated as immutable values by both engines. Every field
/// tolerates `null` or absence in the source document and falls back to its
/// default, so a structurally plausible document always deserializes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    #[serde(default, deserialize_with = "nullable")]
    pub system_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub override_notifications: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub exception_notifications: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub exception_notification_email_addresses: String,
    #[serde(default, deserialize_with = "nullable")]
    pub variables: Vec<Variable>,
    #[serde(default, deserialize_with = "nullable")]
    pub steps: Vec<Step>,
}

/// A node in the workflow graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(default, deserialize_with = "nullable")]
    pub system_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub is_start: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub is_end: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub is_optimal: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub actions: Vec<Action>,
}

/// A unit of behavior attached to a step. The graph edges live in `connections`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub action_system_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub order: i64,
    /// Opaque payload. May hold a JSON object or a string containing one.
    #[serde(default)]
    pub config: Value,
    /// Outcome slot -> `{ "step": <systemName> }`. Same string-or-object rules as `config`.
    #[serde(default)]
    pub connections: Value,
}

/// A workflow-scoped variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    #[serde(default, deserialize_with = "nullable")]
    pub system_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub is_mandatory: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub is_input_variable: bool,
    #[serde(default)]
    pub default_value: Value,
}

impl Workflow {
    /// Finds a step by its `systemName`. Returns the first match if names are duplicated.
    pub fn step(&self, system_name: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.system_name == system_name)
    }

    pub fn start_steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(|s| s.is_start)
    }

    pub fn end_steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(|s| s.is_end)
    }

    pub fn has_start_step(&self) -> bool {
        self.steps.iter().any(|s| s.is_start)
    }
}

impl Step {
    /// True if any action of this step names at least one connection target.
    pub fn has_outgoing_connection(&self) -> bool {
        self.actions.iter().any(|a| !a.connection_targets().is_empty())
    }
}

impl Action {
    /// `name` when present, otherwise the action type.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.action_system_name
        } else {
            &self.name
        }
    }

    pub fn config_object(&self) -> Map<String, Value> {
        payload::to_object(&self.config)
    }

    pub fn connections_object(&self) -> Map<String, Value> {
        payload::to_object(&self.connections)
    }

    /// Resolved `(slot, target step)` pairs in slot order. Absent or malformed slots are skipped.
    pub fn connection_targets(&self) -> Vec<(Outcome, String)> {
        let connections = self.connections_object();
        Outcome::ALL
            .iter()
            .filter_map(|outcome| {
                connections
                    .get(outcome.key())
                    .and_then(|slot| slot.get("step"))
                    .and_then(Value::as_str)
                    .filter(|target| !target.is_empty())
                    .map(|target| (*outcome, target.to_string()))
            })
            .collect()
    }
}

impl Variable {
    /// A default is missing when it is `null` or an empty string.
    pub fn has_default_value(&self) -> bool {
        match &self.default_value {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }
}

/// Treats an explicit `null` the same as an absent field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Action ids arrive as strings or numbers depending on the exporter.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
