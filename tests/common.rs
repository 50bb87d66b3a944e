//! Common test utilities for building workflow definitions.
use kensa::prelude::*;
use serde_json::{Value, json};

/// `connections` payload with a single `execute` edge.
#[allow(dead_code)]
pub fn execute(target: &str) -> Value {
    json!({ "execute": { "step": target } })
}

/// An `UpdateCase` action (no required config) with an optional `execute` edge.
#[allow(dead_code)]
pub fn action(id: &str, target: Option<&str>) -> Action {
    Action {
        id: Some(id.to_string()),
        action_system_name: "UpdateCase".to_string(),
        name: format!("Action {}", id),
        order: 0,
        config: json!({}),
        connections: target.map(execute).unwrap_or(Value::Null),
    }
}

#[allow(dead_code)]
pub fn step(system_name: &str, actions: Vec<Action>) -> Step {
    Step {
        system_name: system_name.to_string(),
        name: system_name.to_string(),
        actions,
        ..Step::default()
    }
}

#[allow(dead_code)]
pub fn start_step(system_name: &str, actions: Vec<Action>) -> Step {
    Step {
        is_start: true,
        ..step(system_name, actions)
    }
}

#[allow(dead_code)]
pub fn end_step(system_name: &str) -> Step {
    Step {
        is_end: true,
        ..step(system_name, vec![])
    }
}

#[allow(dead_code)]
pub fn workflow(steps: Vec<Step>) -> Workflow {
    Workflow {
        system_name: "client_intake".to_string(),
        name: "Client Intake".to_string(),
        description: "Intake of a new client matter".to_string(),
        steps,
        ..Workflow::default()
    }
}

#[allow(dead_code)]
pub fn variable(system_name: &str) -> Variable {
    Variable {
        system_name: system_name.to_string(),
        name: system_name.to_string(),
        default_value: json!("none"),
        ..Variable::default()
    }
}

/// `start -> mid -> end`, every edge via `execute`.
///
/// Validates with no errors, warnings or info.
#[allow(dead_code)]
pub fn create_linear_workflow() -> Workflow {
    let mut wf = workflow(vec![
        start_step("start", vec![action("a1", Some("mid"))]),
        step("mid", vec![action("a2", Some("end"))]),
        end_step("end"),
    ]);
    wf.steps[1].name = "Mid".to_string();
    wf
}

/// A richer workflow with variables, several action types and a branch.
#[allow(dead_code)]
pub fn create_matter_workflow() -> Workflow {
    Workflow {
        system_name: "matter_opening".to_string(),
        name: "Matter Opening".to_string(),
        description: "Opens a new matter after a conflict check".to_string(),
        override_notifications: false,
        exception_notifications: true,
        exception_notification_email_addresses: "ops@example.com".to_string(),
        variables: vec![
            Variable {
                system_name: "clientName".to_string(),
                name: "Client Name".to_string(),
                is_mandatory: true,
                is_input_variable: true,
                default_value: json!("Unknown"),
            },
            variable("conflictFound"),
        ],
        steps: vec![
            start_step(
                "intake",
                vec![Action {
                    id: Some("set_client".to_string()),
                    action_system_name: "SetVariable".to_string(),
                    name: "Set client".to_string(),
                    order: 1,
                    config: json!({ "targetVariable": "clientName", "value": "ACME" }),
                    connections: execute("conflict_check"),
                }],
            ),
            step(
                "conflict_check",
                vec![Action {
                    id: Some("check".to_string()),
                    action_system_name: "Condition".to_string(),
                    name: "Conflict?".to_string(),
                    order: 1,
                    config: json!({ "expression": "conflictFound == true", "resultVariable": "conflictFound" }),
                    connections: json!({
                        "yes": { "step": "decline" },
                        "no": { "step": "open_matter" }
                    }),
                }],
            ),
            step(
                "open_matter",
                vec![
                    Action {
                        id: None,
                        action_system_name: "SendNotification".to_string(),
                        name: "Notify partner".to_string(),
                        order: 1,
                        config: json!({ "notificationType": "email" }),
                        connections: Value::Null,
                    },
                    Action {
                        id: None,
                        action_system_name: "GenerateDocument".to_string(),
                        name: "Engagement letter".to_string(),
                        order: 2,
                        config: json!(r#"{"templateName":"engagement_letter"}"#),
                        connections: execute("done"),
                    },
                ],
            ),
            Step {
                is_end: true,
                ..step(
                    "decline",
                    vec![],
                )
            },
            end_step("done"),
        ],
    }
}

/// Matter workflow as a JSON document, the way an exporter would write it.
#[allow(dead_code)]
pub const MATTER_WORKFLOW_JSON: &str = r#"{
  "systemName": "matter_opening",
  "name": "Matter Opening",
  "description": null,
  "overrideNotifications": false,
  "exceptionNotifications": true,
  "exceptionNotificationEmailAddresses": "ops@example.com",
  "variables": [
    { "systemName": "clientName", "name": "Client Name", "isMandatory": true, "isInputVariable": true, "defaultValue": null }
  ],
  "steps": [
    {
      "systemName": "intake",
      "name": "Intake",
      "isStart": true,
      "isEnd": false,
      "actions": [
        {
          "id": 17,
          "actionSystemName": "SetVariable",
          "name": "Set client",
          "order": 1,
          "config": "{\"targetVariable\":\"clientName\"}",
          "connections": "{\"execute\":{\"step\":\"review\"}}"
        }
      ]
    },
    {
      "systemName": "review",
      "name": "Review",
      "isStart": false,
      "isEnd": true,
      "isOptimal": true,
      "actions": null
    }
  ]
}"#;
