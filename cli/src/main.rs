use std::path::{Path, PathBuf};
use std::process::ExitCode;

use argspec_core::{Schema, help_text, parse, usage_line};
use argspec_declarations::{BenchSettings, Declaration, Preset};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Exit code for arguments rejected by a schema.
const PARSE_FAILURE: u8 = 2;

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

/// CLI-side preset names.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliPreset {
    /// Workload files required, threads default to 1.
    Bench,
    /// Workload files, threads and batch all required.
    BenchBatch,
}

impl From<CliPreset> for Preset {
    fn from(preset: CliPreset) -> Self {
        match preset {
            CliPreset::Bench => Self::DefaultThreads,
            CliPreset::BenchBatch => Self::AllRequired,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "argspec")]
#[command(about = "Validate option declarations and parse argument vectors against them")]
struct Cli {
    /// Default log level when RUST_LOG is unset.
    #[arg(long, global = true, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate one or more declaration files.
    Validate(ValidateArgs),
    /// Print help text for a declaration.
    Usage(UsageArgs),
    /// Parse arguments given after `--` and print the resolved configuration.
    Parse(ParseArgs),
}

/// Where the schema comes from.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct SchemaArgs {
    /// Declaration file (.yaml, .yml or .json).
    #[arg(long)]
    declaration: Option<PathBuf>,
    /// Built-in declaration.
    #[arg(long)]
    preset: Option<CliPreset>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Declaration files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct UsageArgs {
    #[command(flatten)]
    schema: SchemaArgs,
    /// Program name shown in the usage line.
    #[arg(long)]
    program: Option<String>,
}

#[derive(Debug, Args)]
struct ParseArgs {
    #[command(flatten)]
    schema: SchemaArgs,
    /// Program name shown in the usage line on failure.
    #[arg(long)]
    program: Option<String>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Convert the result into typed benchmark settings.
    #[arg(long)]
    bench: bool,
    /// Arguments to parse.
    #[arg(last = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let result = match cli.command {
        Command::Validate(args) => run_validate(args),
        Command::Usage(args) => run_usage(args),
        Command::Parse(args) => run_parse(args),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: LevelFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run_validate(args: ValidateArgs) -> Result<ExitCode, String> {
    let mut failures = 0usize;
    for path in &args.inputs {
        let declaration = match Declaration::load(path) {
            Ok(declaration) => declaration,
            Err(err) => {
                eprintln!("error: {}: {err}", path.display());
                failures += 1;
                continue;
            }
        };

        let errors = declaration.validate();
        if errors.is_empty() {
            println!("ok: {} ({} options)", path.display(), declaration.options.len());
        } else {
            for err in &errors {
                eprintln!("error: {}: {err}", path.display());
            }
            failures += 1;
        }
    }

    info!(files = args.inputs.len(), failures, "validation finished");
    if failures > 0 {
        return Err(format!("{failures} of {} declarations invalid", args.inputs.len()));
    }
    Ok(ExitCode::SUCCESS)
}

fn run_usage(args: UsageArgs) -> Result<ExitCode, String> {
    let (schema, name) = load_schema(&args.schema)?;
    let program = args.program.or(name).unwrap_or_else(|| "program".to_string());
    print!("{}", help_text(&program, &schema));
    Ok(ExitCode::SUCCESS)
}

fn run_parse(args: ParseArgs) -> Result<ExitCode, String> {
    let (schema, name) = load_schema(&args.schema)?;
    debug!(options = schema.len(), argc = args.args.len(), "parsing arguments");

    let config = match parse(&schema, &args.args) {
        Ok(config) => config,
        Err(err) => {
            let program = args.program.or(name).unwrap_or_else(|| "program".to_string());
            eprintln!("error: {err}");
            eprintln!("{}", usage_line(&program, &schema));
            return Ok(ExitCode::from(PARSE_FAILURE));
        }
    };

    if args.bench {
        let settings = BenchSettings::from_config(&config).map_err(|e| e.to_string())?;
        print_output(&settings, args.format)?;
    } else {
        print_output(&config, args.format)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn load_schema(args: &SchemaArgs) -> Result<(Schema, Option<String>), String> {
    if let Some(path) = &args.declaration {
        return load_declaration(path);
    }
    match args.preset {
        Some(preset) => {
            let preset = Preset::from(preset);
            let schema = preset.schema().map_err(|e| e.to_string())?;
            Ok((schema, Some(preset.name().to_string())))
        }
        None => Err("either --declaration or --preset is required".to_string()),
    }
}

fn load_declaration(path: &Path) -> Result<(Schema, Option<String>), String> {
    let declaration =
        Declaration::load(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let schema = declaration
        .to_schema()
        .map_err(|e| format!("{}: {e}", path.display()))?;
    Ok((schema, declaration.name))
}

fn print_output<T: Serialize>(value: &T, format: CliOutputFormat) -> Result<(), String> {
    let rendered = match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string())?,
        CliOutputFormat::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string())?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}
