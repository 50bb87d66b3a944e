use clap::{Parser, Subcommand, ValueEnum};
use kensa::prelude::*;
use std::process;
use std::time::Instant;

/// Exit status for a run that completed but found an invalid workflow.
const EXIT_INVALID: i32 = 2;

/// Define CLI-specific enums for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PayloadCli {
    Serialized,
    Canonical,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KeyingCli {
    Positional,
    Ordinal,
}

/// Workflow validation and comparison CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Log engine activity at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate one or more workflow files
    Validate {
        /// Paths to workflow JSON files
        #[arg(required = true)]
        paths: Vec<String>,

        /// Register an extra action type as NAME or NAME:field1,field2
        #[arg(long = "action-type", value_name = "TYPE")]
        action_types: Vec<String>,

        /// Disable a built-in rule by name (e.g. "Orphaned Steps")
        #[arg(long = "skip-rule", value_name = "NAME")]
        skip_rules: Vec<String>,
    },
    /// Compare two workflow files
    Compare {
        /// Path to the left (older) workflow
        left: String,
        /// Path to the right (newer) workflow
        right: String,

        #[arg(long)]
        left_title: Option<String>,
        #[arg(long)]
        right_title: Option<String>,

        /// How config and connections payloads are compared
        #[arg(long, value_enum, default_value = "serialized")]
        payloads: PayloadCli,

        /// How actions without an id are keyed
        #[arg(long, value_enum, default_value = "positional")]
        keying: KeyingCli,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let guard = DefaultGuard::default();
    let code = match cli.command {
        Command::Validate {
            paths,
            action_types,
            skip_rules,
        } => run_validate(&paths, &action_types, &skip_rules, &guard, cli.json),
        Command::Compare {
            left,
            right,
            left_title,
            right_title,
            payloads,
            keying,
        } => {
            let options = CompareOptions {
                left_title: left_title.or_else(|| Some(left.clone())),
                right_title: right_title.or_else(|| Some(right.clone())),
                payload_equality: match payloads {
                    PayloadCli::Serialized => PayloadEquality::Serialized,
                    PayloadCli::Canonical => PayloadEquality::Canonical,
                },
                action_keying: match keying {
                    KeyingCli::Positional => ActionKeying::Positional,
                    KeyingCli::Ordinal => ActionKeying::Ordinal,
                },
            };
            run_compare(&left, &right, options, &guard, cli.json)
        }
    };
    process::exit(code);
}

fn run_validate(
    paths: &[String],
    action_types: &[String],
    skip_rules: &[String],
    guard: &DefaultGuard,
    json: bool,
) -> i32 {
    let load_start = Instant::now();
    let workflows: Vec<Workflow> = paths
        .iter()
        .map(|path| {
            load_workflow_file(path, guard)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to load '{}': {}", path, e)))
        })
        .collect();
    let load_duration = load_start.elapsed();

    let mut builder = Validator::builder();
    for entry in action_types {
        let (name, fields) = parse_action_type(entry);
        builder = builder.with_action_type(name, &fields);
    }
    for rule in skip_rules {
        builder = builder.without_rule(rule);
    }
    let validator = builder.build();

    let validate_start = Instant::now();
    let results = validator.validate_all(&workflows);
    let validate_duration = validate_start.elapsed();

    if json {
        let report: Vec<_> = paths
            .iter()
            .zip(&results)
            .map(|(path, result)| serde_json::json!({ "path": path, "result": result }))
            .collect();
        print_json(&report);
    } else {
        for (path, result) in paths.iter().zip(&results) {
            println!("== {} ==", path);
            println!("{}", ReportFormatter::format_validation(result));
        }
        println!("--- Performance Summary ---");
        println!("File Loading:         {:?}", load_duration);
        println!("Validation:           {:?}", validate_duration);
        println!("Rules Active:         {}", validator.rule_names().len());
    }

    if results.iter().all(|r| r.valid) {
        0
    } else {
        EXIT_INVALID
    }
}

fn run_compare(
    left_path: &str,
    right_path: &str,
    options: CompareOptions,
    guard: &DefaultGuard,
    json: bool,
) -> i32 {
    let left = load_workflow_file(left_path, guard)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load '{}': {}", left_path, e)));
    let right = load_workflow_file(right_path, guard)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load '{}': {}", right_path, e)));

    let comparator = Comparator::new(options);
    let result = comparator.compare(&left, &right);

    if json {
        print_json(&result);
    } else {
        print!(
            "{}",
            ReportFormatter::format_comparison(&result, comparator.options())
        );
    }
    0
}

/// Splits `NAME:field1,field2` into the type name and its required fields.
fn parse_action_type(entry: &str) -> (&str, Vec<&str>) {
    match entry.split_once(':') {
        Some((name, fields)) => (
            name.trim(),
            fields
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .collect(),
        ),
        None => (entry.trim(), Vec::new()),
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => exit_with_error(&format!("Failed to serialize output: {}", e)),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    process::exit(1);
}
