use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

use form_spec::{
    DefaultFormFrontend, FormFrontend, FormSchema, NumberLocale, ValidationResult,
    build_render_payload, validate,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Schema-driven form toolkit",
    long_about = "Validates value documents against a form schema, renders form previews, and emits the schema format description"
)]
struct Cli {
    /// Show debug output.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RenderMode {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a JSON values document against a form schema.
    Validate {
        /// Path to the FormSchema JSON.
        #[arg(long, value_name = "SCHEMA")]
        schema: PathBuf,
        /// Path to the JSON object holding the field values.
        #[arg(long, value_name = "VALUES")]
        values: PathBuf,
        /// Emit the validation result as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Render a preview of the form with the given values filled in.
    Render {
        /// Path to the FormSchema JSON.
        #[arg(long, value_name = "SCHEMA")]
        schema: PathBuf,
        /// Optional JSON object holding current field values.
        #[arg(long, value_name = "VALUES")]
        values: Option<PathBuf>,
        /// Output mode for the rendered form.
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
    },
    /// Print the JSON Schema describing the form schema format.
    Schema,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(cli.command) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn run(command: Command) -> CliResult<ExitCode> {
    match command {
        Command::Validate {
            schema,
            values,
            json,
        } => {
            let schema = load_schema(&schema)?;
            let values = load_values(&values)?;
            let result = validate(&schema, &values);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_report(&result);
            }
            Ok(if result.valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Render {
            schema,
            values,
            format,
        } => {
            let schema = load_schema(&schema)?;
            let values = match values {
                Some(path) => load_values(&path)?,
                None => Value::Object(Default::default()),
            };
            let payload = build_render_payload(&schema, &values, &NumberLocale::default());
            let frontend = DefaultFormFrontend;
            match format {
                RenderMode::Text => println!("{}", frontend.render_text_ui(&payload)),
                RenderMode::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&frontend.render_json_ui(&payload))?
                ),
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Schema => {
            let schema = schemars::schema_for!(FormSchema);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_schema(path: &Path) -> CliResult<FormSchema> {
    let raw = fs::read_to_string(path)?;
    let schema: FormSchema = serde_json::from_str(&raw)?;
    schema.ensure_unique_ids()?;
    Ok(schema)
}

fn load_values(path: &Path) -> CliResult<Value> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn print_report(result: &ValidationResult) {
    if result.valid {
        println!("valid");
        return;
    }
    println!("invalid: {} error(s)", result.errors.len());
    for error in &result.errors {
        println!(" - {}: {}", error.field_id, error.message);
    }
}
