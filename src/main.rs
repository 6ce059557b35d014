//! i18n-merge CLI
//!
//! Entry point for the `i18n-merge` command-line tool.

use clap::{Args, Parser, Subcommand};
use i18n_merge::config::{ConfigSource, DEFAULT_CONFIG_FILE};
use i18n_merge::{write_output, EffectiveConfig, ErrorCode, Format, MergeDriver, MergeReport};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "i18n-merge")]
#[command(about = "Merge i18n files into a single JSON file", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file (default: ./i18n-merge.toml when present)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge *.yaml / *.yml files
    MergeYaml(MergeArgs),

    /// Merge flat JSON files
    MergeJson(MergeArgs),

    /// Merge JS files containing `export default { ... }`
    MergeJs(MergeArgs),
}

#[derive(Args)]
struct MergeArgs {
    /// Directory with language files
    #[arg(long)]
    input_dir: PathBuf,

    /// Output file
    #[arg(long, default_value = "translations.json")]
    output: PathBuf,

    /// Spaces per indentation level in the output
    #[arg(long)]
    indent: Option<usize>,

    /// Let the later file win when two files share a language tag
    #[arg(long)]
    allow_duplicate_languages: bool,

    /// Print the run summary (or the failure) as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (format, args) = match cli.command {
        Commands::MergeYaml(args) => (Format::Yaml, args),
        Commands::MergeJson(args) => (Format::Json, args),
        Commands::MergeJs(args) => (Format::JsModule, args),
    };

    run_merge(format, &args, cli.config);
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "i18n_merge=debug"
    } else {
        "i18n_merge=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_merge(format: Format, args: &MergeArgs, config_path: Option<PathBuf>) {
    let config_path = config_path.or_else(|| {
        let default = PathBuf::from(DEFAULT_CONFIG_FILE);
        default.exists().then_some(default)
    });

    let effective = match EffectiveConfig::build(config_path.as_deref(), cli_overrides(args)) {
        Ok(c) => c,
        Err(e) => fail(args.json, ErrorCode::Config, &e.to_string()),
    };

    let driver = MergeDriver::new(format)
        .with_duplicate_policy(effective.config.merge.duplicate_languages);

    let report = match driver.run(&args.input_dir) {
        Ok(r) => r,
        Err(e) => fail(args.json, e.code(), &e.to_string()),
    };

    if let Err(e) = write_output(&report.tree, &args.output, effective.config.output.indent) {
        fail(args.json, ErrorCode::Io, &e.to_string());
    }

    if args.json {
        let summary = summary_json(&report, &args.output, &effective.sources);
        match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{}", text),
            Err(e) => fail(false, ErrorCode::Io, &e.to_string()),
        }
    } else {
        println!(
            "wrote {} ({} top-level keys)",
            args.output.display(),
            report.top_level_keys()
        );
    }
}

/// CLI flags as the highest-precedence config layer
fn cli_overrides(args: &MergeArgs) -> Option<Value> {
    let mut layer = serde_json::Map::new();
    if let Some(indent) = args.indent {
        layer.insert("output".to_string(), json!({ "indent": indent }));
    }
    if args.allow_duplicate_languages {
        layer.insert(
            "merge".to_string(),
            json!({ "duplicate_languages": "last-wins" }),
        );
    }
    (!layer.is_empty()).then_some(Value::Object(layer))
}

fn summary_json(report: &MergeReport, output: &Path, config_sources: &[ConfigSource]) -> Value {
    json!({
        "output": output.display().to_string(),
        "top_level_keys": report.top_level_keys(),
        "languages": report.languages(),
        "sources": report.sources,
        "config_sources": config_sources,
    })
}

fn fail(json_output: bool, code: ErrorCode, message: &str) -> ! {
    if json_output {
        println!(
            "{}",
            json!({ "error": { "code": code, "message": message } })
        );
    } else {
        eprintln!("error: {}", message);
    }
    process::exit(1);
}
