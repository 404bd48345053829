use std::path::{Path, PathBuf};

use argspec_core::{
    ApplicationConfiguration, OutputFormat, ParserBuilder, ParserSchema, format_summary,
};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Markdown,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(fmt: CliOutputFormat) -> Self {
        match fmt {
            CliOutputFormat::Json => Self::Json,
            CliOutputFormat::Yaml => Self::Yaml,
            CliOutputFormat::Markdown => Self::Markdown,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "argspec")]
#[command(version)]
#[command(about = "Build and preview command-line parsers from configuration definitions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a definition file and assemble its parser.
    Validate(ValidateArgs),
    /// Print the projected parser schema.
    Schema(SchemaArgs),
    /// Render the generated help for the application or one of its subcommands.
    Render(RenderArgs),
    /// Parse a sample argv with the generated parser and print the values as JSON.
    Parse(ParseArgs),
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Definition file (.yaml, .yml or .json).
    definition: PathBuf,
    /// Require a subcommand on the generated command line.
    #[arg(long)]
    subcommand_required: bool,
}

#[derive(Debug, Args)]
struct SchemaArgs {
    /// Definition file (.yaml, .yml or .json).
    definition: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct RenderArgs {
    /// Definition file (.yaml, .yml or .json).
    definition: PathBuf,
    /// Subcommand whose help to render (default: the application).
    subcommand: Option<String>,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Definition file (.yaml, .yml or .json).
    definition: PathBuf,
    /// Require a subcommand on the generated command line.
    #[arg(long)]
    subcommand_required: bool,
    /// Arguments to parse, after `--` (the program name is added).
    #[arg(last = true)]
    argv: Vec<String>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Validate(args) => run_validate(args),
        Command::Schema(args) => run_schema(args),
        Command::Render(args) => run_render(args),
        Command::Parse(args) => run_parse(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn load(definition: &Path) -> Result<ApplicationConfiguration, String> {
    argspec_loader::load_configuration(definition)
        .map_err(|err| format!("Failed to load '{}': {err}", definition.display()))
}

fn build(config: &ApplicationConfiguration, subcommand_required: bool) -> Result<ParserSchema, String> {
    ParserBuilder::new(config)
        .subcommand_required(subcommand_required)
        .build()
        .map_err(|err| err.to_string())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let config = load(&args.definition)?;
    let schema = build(&config, args.subcommand_required)?;

    let scoped: usize = schema
        .subcommand_scopes()
        .iter()
        .map(|scope| scope.arguments.len())
        .sum();
    println!(
        "Validated '{}': {} entries, {} global argument(s), {} subcommand(s), {} subcommand argument(s).",
        config.application_name,
        config.entries.len(),
        schema.base_arguments().len(),
        schema.subcommand_scopes().len(),
        scoped
    );
    Ok(())
}

fn run_schema(args: SchemaArgs) -> Result<(), String> {
    let config = load(&args.definition)?;
    let schema = build(&config, false)?;
    let raw = format_summary(&schema.summary(), args.format.into())?;
    println!("{}", raw.trim_end());
    Ok(())
}

fn run_render(args: RenderArgs) -> Result<(), String> {
    let config = load(&args.definition)?;
    let schema = build(&config, false)?;
    let help = schema
        .render_help(args.subcommand.as_deref())
        .ok_or_else(|| {
            format!(
                "Unknown subcommand '{}'; expected one of: {}",
                args.subcommand.as_deref().unwrap_or_default(),
                config.subcommand_names().join(", ")
            )
        })?;
    print!("{help}");
    Ok(())
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let config = load(&args.definition)?;
    let schema = build(&config, args.subcommand_required)?;

    let argv = std::iter::once(config.application_name.clone()).chain(args.argv);
    let parsed = match schema.try_parse_from(argv) {
        Ok(parsed) => parsed,
        Err(err) => err.exit(),
    };

    let raw = serde_json::to_string_pretty(&parsed)
        .map_err(|err| format!("Failed to serialize parsed arguments: {err}"))?;
    println!("{raw}");
    Ok(())
}
