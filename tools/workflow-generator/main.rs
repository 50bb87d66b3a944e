use clap::Parser;
use kensa::model::{Action, Step, Variable, Workflow};
use rand::Rng;
use rand::rngs::ThreadRng;
use serde_json::json;
use std::fs;

/// A CLI tool to generate synthetic workflows for exercising the kensa engines
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_workflow.json")]
    output: String,

    /// Number of steps to generate
    #[arg(long, default_value_t = 50)]
    steps: usize,

    /// Maximum number of actions per step
    #[arg(long, default_value_t = 3)]
    max_actions: usize,

    /// Number of workflow variables
    #[arg(long, default_value_t = 10)]
    variables: usize,

    /// Add a connection from the last step back to the first
    #[arg(long)]
    cycle: bool,

    /// Add a connection to a step that does not exist
    #[arg(long)]
    dangling: bool,

    /// Add a step that nothing connects to
    #[arg(long)]
    orphan: bool,
}

const ACTION_TYPES: &[(&str, &str, &str)] = &[
    ("UpdateCase", "status", "open"),
    ("SetVariable", "targetVariable", ""),
    ("SendNotification", "notificationType", "email"),
    ("AssignTask", "assignee", "paralegal"),
    ("GenerateDocument", "templateName", "engagement_letter"),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.steps < 2 {
        eprintln!("Error: --steps must be at least 2 (got {})", cli.steps);
        std::process::exit(1);
    }
    if cli.max_actions == 0 {
        eprintln!("Error: --max-actions must be at least 1");
        std::process::exit(1);
    }

    println!(
        "Generating workflow with {} steps (up to {} actions each)...",
        cli.steps, cli.max_actions
    );

    let variables = generate_variables(cli.variables);
    let mut steps = generate_steps(&mut rng, cli.steps, cli.max_actions, &variables);

    if cli.cycle {
        let first = steps[0].system_name.clone();
        if let Some(last) = steps.last_mut() {
            last.is_end = false;
            last.actions.push(connector("cycle_back", &first));
        }
        println!("-> Injected a cycle back to '{}'.", first);
    }
    if cli.dangling {
        let index = rng.random_range(0..steps.len() - 1);
        steps[index]
            .actions
            .push(connector("dangling", "step_does_not_exist"));
        println!("-> Injected a dangling connection on '{}'.", steps[index].system_name);
    }
    if cli.orphan {
        steps.push(Step {
            system_name: "orphan_step".to_string(),
            name: "Orphan Step".to_string(),
            is_end: true,
            ..Step::default()
        });
        println!("-> Injected an orphaned step.");
    }

    let workflow = Workflow {
        system_name: "generated_workflow".to_string(),
        name: "Generated Workflow".to_string(),
        description: format!("Synthetic workflow with {} steps", steps.len()),
        variables,
        steps,
        ..Workflow::default()
    };

    let json_output = serde_json::to_string_pretty(&workflow)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated and saved workflow to '{}'",
        cli.output
    );

    Ok(())
}

fn generate_variables(count: usize) -> Vec<Variable> {
    (0..count)
        .map(|i| Variable {
            system_name: format!("var_{}", i),
            name: format!("Variable {}", i),
            is_mandatory: i % 3 == 0,
            is_input_variable: i % 2 == 0,
            default_value: json!(format!("default_{}", i)),
        })
        .collect()
}

/// A linear chain with occasional forward branches, so the result is a DAG.
fn generate_steps(
    rng: &mut ThreadRng,
    count: usize,
    max_actions: usize,
    variables: &[Variable],
) -> Vec<Step> {
    let names: Vec<String> = (0..count).map(|i| format!("step_{}", i)).collect();

    (0..count)
        .map(|i| {
            let is_end = i == count - 1;
            let actions = if is_end {
                Vec::new()
            } else {
                let action_count = rng.random_range(1..=max_actions);
                (0..action_count)
                    .map(|a| {
                        let (action_type, field, value) =
                            ACTION_TYPES[rng.random_range(0..ACTION_TYPES.len())];
                        let value = if field == "targetVariable" && !variables.is_empty() {
                            variables[rng.random_range(0..variables.len())]
                                .system_name
                                .clone()
                        } else if field == "targetVariable" {
                            "status".to_string()
                        } else {
                            value.to_string()
                        };

                        // The first action always advances; later ones may skip ahead.
                        let target = if a == 0 {
                            &names[i + 1]
                        } else {
                            &names[rng.random_range(i + 1..count)]
                        };
                        let mut config = serde_json::Map::new();
                        config.insert(field.to_string(), json!(value));
                        Action {
                            id: Some(format!("{}_{}", names[i], a)),
                            action_system_name: action_type.to_string(),
                            name: format!("{} {}", action_type, a),
                            order: a as i64,
                            config: serde_json::Value::Object(config),
                            connections: json!({ "execute": { "step": target } }),
                        }
                    })
                    .collect()
            };

            Step {
                system_name: names[i].clone(),
                name: format!("Step {}", i),
                is_start: i == 0,
                is_end,
                actions,
                ..Step::default()
            }
        })
        .collect()
}

fn connector(id: &str, target: &str) -> Action {
    Action {
        id: Some(id.to_string()),
        action_system_name: "UpdateCase".to_string(),
        name: format!("Connector {}", id),
        order: 99,
        config: json!({}),
        connections: json!({ "execute": { "step": target } }),
    }
}
