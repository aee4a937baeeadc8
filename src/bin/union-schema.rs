//! Union Schema CLI
//!
//! Diagnostic command-line surface over the union resolution library.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use union_schema::{
    compute_defaults, load_json, matching_option, resolve_schema, schema_definitions,
    selection_or_default, switch_option, union_branches, validate,
};

#[derive(Parser)]
#[command(name = "union-schema")]
#[command(about = "Resolve JSON Schema anyOf/oneOf unions against form data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report which union branch the data currently matches
    Match {
        /// Schema file carrying anyOf/oneOf at the top level
        schema: PathBuf,

        /// Form data file (absent data matches nothing)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,
    },

    /// Compute the new form data after switching to another branch
    Switch {
        /// Schema file carrying anyOf/oneOf at the top level
        schema: PathBuf,

        /// Branch index to switch to
        #[arg(long, short)]
        to: usize,

        /// Current form data file
        #[arg(long)]
        data: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print the synthesized default value for a schema
    Defaults {
        /// Schema file
        schema: PathBuf,

        /// Current data to merge the defaults under
        #[arg(long)]
        data: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Validate data against the branch it currently matches
    Validate {
        /// Schema file carrying anyOf/oneOf at the top level
        schema: PathBuf,

        /// Form data file
        #[arg(long)]
        data: PathBuf,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Match { schema, data, json } => run_match(&schema, data.as_deref(), json),

        Commands::Switch {
            schema,
            to,
            data,
            output,
            pretty,
        } => run_switch(&schema, to, data.as_deref(), output, pretty),

        Commands::Defaults {
            schema,
            data,
            pretty,
        } => run_defaults(&schema, data.as_deref(), pretty),

        Commands::Validate { schema, data, json } => run_validate(&schema, &data, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

/// Load a schema file and split it into branches and definitions.
fn load_union(
    schema_path: &Path,
) -> Result<(Vec<Value>, Map<String, Value>), u8> {
    let schema = load_json(schema_path).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let Some((_, branches)) = union_branches(&schema) else {
        eprintln!(
            "Error: {} carries neither anyOf nor oneOf",
            schema_path.display()
        );
        return Err(2);
    };

    Ok((branches, schema_definitions(&schema)))
}

fn load_data(path: Option<&Path>) -> Result<Option<Value>, u8> {
    match path {
        Some(path) => load_json(path).map(Some).map_err(|e| {
            eprintln!("Error: {}", e);
            e.exit_code() as u8
        }),
        None => Ok(None),
    }
}

fn run_match(schema_path: &Path, data_path: Option<&Path>, json_output: bool) -> Result<(), u8> {
    let (branches, definitions) = load_union(schema_path)?;
    let data = load_data(data_path)?;

    let matched = matching_option(data.as_ref(), &branches, &definitions).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let selection = selection_or_default(matched);
    if json_output {
        let report = serde_json::json!({
            "matched": matched,
            "selection": selection,
        });
        println!("{}", report);
    } else {
        println!("{}", selection);
    }

    Ok(())
}

fn run_switch(
    schema_path: &Path,
    to: usize,
    data_path: Option<&Path>,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<(), u8> {
    let (branches, definitions) = load_union(schema_path)?;
    let data = load_data(data_path)?;

    let new_data = switch_option(to, data.as_ref(), &branches, &definitions).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    write_json(&new_data.unwrap_or(Value::Null), output, pretty)
}

fn run_defaults(schema_path: &Path, data_path: Option<&Path>, pretty: bool) -> Result<(), u8> {
    let schema = load_json(schema_path).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;
    let data = load_data(data_path)?;
    let definitions = schema_definitions(&schema);

    let defaults = compute_defaults(&schema, data.as_ref(), &definitions).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    write_json(&defaults.unwrap_or(Value::Null), None, pretty)
}

fn run_validate(schema_path: &Path, data_path: &Path, json_output: bool) -> Result<(), u8> {
    let (branches, definitions) = load_union(schema_path)?;
    let data = load_json(data_path).map_err(|e| {
        report_error(json_output, &format!("loading data: {}", e));
        e.exit_code() as u8
    })?;

    let matched = matching_option(Some(&data), &branches, &definitions).map_err(|e| {
        report_error(json_output, &e.to_string());
        e.exit_code() as u8
    })?;
    let selection = selection_or_default(matched);

    // Final validation runs against the plain branch, not the augmented
    // matching schema.
    let branch = resolve_schema(&branches[selection], &definitions).map_err(|e| {
        report_error(json_output, &e.to_string());
        e.exit_code() as u8
    })?;

    match validate(&branch, &data, &definitions) {
        Ok(()) => {
            if json_output {
                println!(r#"{{"valid":true,"selection":{}}}"#, selection);
            } else {
                println!("Valid (branch {})", selection);
            }
            Ok(())
        }
        Err(e) => {
            if json_output {
                let report = match &e {
                    union_schema::ValidateError::Invalid { errors } => serde_json::json!({
                        "valid": false,
                        "selection": selection,
                        "errors": errors,
                    }),
                    other => serde_json::json!({
                        "valid": false,
                        "selection": selection,
                        "errors": [{ "path": "", "message": other.to_string() }],
                    }),
                };
                println!("{}", report);
            } else {
                eprintln!("Invalid (branch {}):", selection);
                if let union_schema::ValidateError::Invalid { errors } = &e {
                    for error in errors {
                        eprintln!("  {}", error);
                    }
                } else {
                    eprintln!("  {}", e);
                }
            }
            Err(e.exit_code() as u8)
        }
    }
}

fn write_json(value: &Value, output: Option<PathBuf>, pretty: bool) -> Result<(), u8> {
    let json_output = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    match output {
        Some(path) => {
            std::fs::write(&path, &json_output).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", json_output);
        }
    }

    Ok(())
}

fn report_error(json_output: bool, message: &str) {
    if json_output {
        println!(
            "{}",
            serde_json::json!({ "valid": false, "errors": [{ "path": "", "message": message }] })
        );
    } else {
        eprintln!("Error: {}", message);
    }
}
