mod config;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use ballast_core::RecordPatch;
use ballast_gen::{GenerateError, GenerateOptions, GeneratorEngine, SchedulerYield};
use ballast_serve::{
    BulkEmitter, EmitError, EmitOptions, UpdateError, UpdateRequest, UpdateService,
};
use ballast_store::{DocumentStore, FixedCapability, StoreError};

use config::{BallastConfig, ConfigError};

#[derive(Debug, Error)]
enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("generation error: {0}")]
    Generate(#[from] GenerateError),
    #[error("emit error: {0}")]
    Emit(#[from] EmitError),
    #[error("update error: {0}")]
    Update(#[from] UpdateError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

#[derive(Parser, Debug)]
#[command(name = "ballast", version, about = "Deliberately unscalable bulk-dataset service")]
struct Cli {
    /// Path to the optional ballast.toml config file.
    #[arg(long, global = true, default_value = "ballast.toml")]
    config: PathBuf,
    /// Storage capability override: read-write, read-only or unavailable.
    #[arg(long, global = true, value_name = "MODE")]
    storage_mode: Option<String>,
    /// Dataset document path override.
    #[arg(long, global = true, value_name = "PATH")]
    data: Option<PathBuf>,
    /// Emit logs as JSON lines.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Produce the synthetic dataset document.
    Generate(GenerateArgs),
    /// Stream the dataset as one JSON array.
    Emit(EmitArgs),
    /// Patch a single record via the full-document round trip.
    Update(UpdateArgs),
    /// Show storage capability and document state.
    Status,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Number of records to generate.
    #[arg(long)]
    count: Option<u64>,
    /// Fabricator seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Records per cooperative batch.
    #[arg(long)]
    batch_size: Option<usize>,
    /// Progress log cadence in records; 0 disables progress logs.
    #[arg(long)]
    progress_every: Option<u64>,
}

#[derive(Args, Debug)]
struct EmitArgs {
    /// Output sink: a file path, or '-' for stdout.
    #[arg(long, default_value = "-")]
    out: String,
    /// Records per synthetic fallback batch.
    #[arg(long)]
    batch_size: Option<usize>,
    /// Record count for the synthetic fallback stream.
    #[arg(long)]
    synthetic_count: Option<u64>,
    /// Seed for the synthetic fallback stream.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct UpdateArgs {
    /// Target record id.
    #[arg(long)]
    id: String,
    /// Partial record fields as a JSON object.
    #[arg(long, value_name = "JSON", conflicts_with = "updates_file")]
    updates: Option<String>,
    /// Read the partial fields from a JSON file instead.
    #[arg(long, value_name = "PATH")]
    updates_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_json);

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            ExitCode::from(exit_code_for(&err))
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let config = config::load_config(&cli.config)?;
    let storage_mode = match cli.storage_mode.as_deref() {
        Some(raw) => config::parse_storage_mode(raw)?,
        None => config.storage.mode,
    };
    let document_path = cli
        .data
        .clone()
        .unwrap_or_else(|| config.storage.path.clone());
    let store = DocumentStore::new(document_path, FixedCapability(storage_mode));

    match cli.command {
        Command::Generate(args) => cmd_generate(args, &config, &store).await,
        Command::Emit(args) => cmd_emit(args, &config, &store).await,
        Command::Update(args) => cmd_update(args, &store),
        Command::Status => cmd_status(&store),
    }
}

async fn cmd_generate(
    args: GenerateArgs,
    config: &BallastConfig,
    store: &DocumentStore,
) -> Result<ExitCode, CliError> {
    let defaults = GenerateOptions::default();
    let options = GenerateOptions {
        count: args.count.or(config.generate.count).unwrap_or(defaults.count),
        seed: args.seed.or(config.generate.seed).unwrap_or(defaults.seed),
        batch_size: args
            .batch_size
            .or(config.generate.batch_size)
            .unwrap_or(defaults.batch_size),
        progress_every: args
            .progress_every
            .or(config.generate.progress_every)
            .unwrap_or(defaults.progress_every),
        max_attempts_record: defaults.max_attempts_record,
    };

    let engine = GeneratorEngine::new(options);
    let result = engine.run(store, &SchedulerYield).await?;
    println!("{}", serde_json::to_string_pretty(&result.report)?);
    Ok(ExitCode::SUCCESS)
}

async fn cmd_emit(
    args: EmitArgs,
    config: &BallastConfig,
    store: &DocumentStore,
) -> Result<ExitCode, CliError> {
    let defaults = EmitOptions::default();
    let options = EmitOptions {
        batch_size: args
            .batch_size
            .or(config.emit.batch_size)
            .unwrap_or(defaults.batch_size),
        synthetic_count: args
            .synthetic_count
            .or(config.emit.synthetic_count)
            .unwrap_or(defaults.synthetic_count),
        seed: args.seed.or(config.emit.seed).unwrap_or(defaults.seed),
    };
    let emitter = BulkEmitter::new(options);

    let report = if args.out == "-" {
        let mut sink = tokio::io::stdout();
        emitter.emit(store, &mut sink, &SchedulerYield).await?
    } else {
        let mut sink = tokio::fs::File::create(&args.out).await?;
        emitter.emit(store, &mut sink, &SchedulerYield).await?
    };

    tracing::info!(
        source = ?report.source,
        records = report.records,
        batches = report.batches,
        bytes = report.bytes,
        duration_ms = report.duration_ms,
        "emit finished"
    );
    Ok(ExitCode::SUCCESS)
}

fn cmd_update(args: UpdateArgs, store: &DocumentStore) -> Result<ExitCode, CliError> {
    let body = read_patch_body(&args)?;
    let outcome = parse_patch(&body)
        .map(|updates| UpdateRequest::new(args.id.clone(), updates))
        .and_then(|request| UpdateService::new().apply(store, &request));

    match outcome {
        Ok(record) => {
            println!("{}", serde_json::to_string(&record)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            // Mirror the error onto stdout as a JSON body so scripted
            // callers see the same shape as a successful update.
            println!("{}", serde_json::json!({ "error": err.to_string() }));
            Err(CliError::Update(err))
        }
    }
}

fn cmd_status(store: &DocumentStore) -> Result<ExitCode, CliError> {
    let capability = store.capability();
    let document = if capability.can_read() {
        match std::fs::metadata(store.path()) {
            Ok(meta) => serde_json::json!({ "exists": true, "bytes": meta.len() }),
            Err(_) => serde_json::json!({ "exists": false }),
        }
    } else {
        serde_json::Value::Null
    };

    let status = serde_json::json!({
        "capability": capability,
        "path": store.path(),
        "document": document,
    });
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(ExitCode::SUCCESS)
}

fn read_patch_body(args: &UpdateArgs) -> Result<String, CliError> {
    match (&args.updates, &args.updates_file) {
        (Some(body), None) => Ok(body.clone()),
        (None, Some(path)) => Ok(std::fs::read_to_string(path)?),
        _ => Err(CliError::InvalidArgs(
            "provide exactly one of --updates or --updates-file".to_string(),
        )),
    }
}

fn parse_patch(body: &str) -> Result<RecordPatch, UpdateError> {
    serde_json::from_str(body).map_err(|err| UpdateError::BadRequest(err.to_string()))
}

fn exit_code_for(err: &CliError) -> u8 {
    match err {
        CliError::Update(UpdateError::BadRequest(_)) => 2,
        CliError::Update(UpdateError::PermissionDenied(_)) => 3,
        CliError::Update(UpdateError::Storage(StoreError::PermissionDenied(_))) => 3,
        CliError::Update(UpdateError::RecordNotFound(_)) => 4,
        CliError::Update(UpdateError::Storage(_)) => 5,
        CliError::Generate(GenerateError::Storage(StoreError::PermissionDenied(_))) => 3,
        CliError::Generate(GenerateError::Storage(_)) => 5,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballast_store::Capability;

    #[test]
    fn update_failures_map_to_distinct_exit_codes() {
        let bad = CliError::Update(UpdateError::BadRequest("nope".to_string()));
        let denied = CliError::Update(UpdateError::PermissionDenied(Capability::ReadOnly));
        let missing = CliError::Update(UpdateError::RecordNotFound("x".to_string()));
        let storage = CliError::Update(UpdateError::Storage(StoreError::Unavailable));

        assert_eq!(exit_code_for(&bad), 2);
        assert_eq!(exit_code_for(&denied), 3);
        assert_eq!(exit_code_for(&missing), 4);
        assert_eq!(exit_code_for(&storage), 5);
        assert_eq!(
            exit_code_for(&CliError::InvalidArgs("x".to_string())),
            1
        );
    }

    #[test]
    fn patch_bodies_parse_or_become_bad_requests() {
        parse_patch(r#"{"salary": 99000}"#).expect("valid patch");
        parse_patch("{}").expect("empty patch");

        let err = parse_patch("{oops").expect_err("syntax error");
        assert!(matches!(err, UpdateError::BadRequest(_)));
    }
}
