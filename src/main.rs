use anyhow::{Context, Result};
use bulkbridge::config::{AppConfig, CliConfig};
use bulkbridge::entity_model::{Model, ModelConfig};
use bulkbridge::mapping::entity_mapping;
use bulkbridge::sql_generator::{
    bulk_delete, bulk_insert, bulk_update, GeneratorOptions, Row, SqlStatement, SqlValue,
};
use clap::{Parser, Subcommand};
use log::info;
use serde::Deserialize;
use std::fs;

/// BulkBridge - entity-model mapping extraction and bulk SQL generation
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the model manifest (YAML)
    #[arg(long)]
    model: Option<String>,

    /// Target SQL dialect (postgres, mysql)
    #[arg(long)]
    dialect: Option<String>,

    /// Rows per generated statement
    #[arg(long)]
    batch_size: Option<usize>,

    /// Render values as inline literals instead of placeholders
    #[arg(long)]
    inline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the extracted entity mapping as JSON
    Mapping {
        /// Entity type name
        #[arg(long)]
        entity: String,
    },
    /// Generate bulk INSERT statements from a JSON rows file
    Insert {
        /// Entity type name
        #[arg(long)]
        entity: String,
        /// Path to a JSON array of rows
        #[arg(long)]
        rows: String,
    },
    /// Generate bulk UPDATE statements from a JSON rows file
    Update {
        /// Entity type name
        #[arg(long)]
        entity: String,
        /// Path to a JSON array of rows
        #[arg(long)]
        rows: String,
    },
    /// Generate bulk DELETE statements from a JSON keys file
    Delete {
        /// Entity type name
        #[arg(long)]
        entity: String,
        /// Path to a JSON array of keys (scalars or arrays for composite keys)
        #[arg(long)]
        keys: String,
    },
}

impl From<&Cli> for CliConfig {
    fn from(cli: &Cli) -> Self {
        CliConfig {
            model_path: cli.model.clone(),
            batch_size: cli.batch_size,
            dialect: cli.dialect.clone(),
            inline_values: cli.inline,
        }
    }
}

/// One delete key: a scalar for single-column primary keys, an array for
/// composite ones.
#[derive(Deserialize)]
#[serde(untagged)]
enum KeyEntry {
    Scalar(SqlValue),
    Composite(Vec<SqlValue>),
}

impl From<KeyEntry> for Vec<SqlValue> {
    fn from(entry: KeyEntry) -> Self {
        match entry {
            KeyEntry::Scalar(value) => vec![value],
            KeyEntry::Composite(values) => values,
        }
    }
}

fn main() {
    // Initialize logger - defaults to INFO level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match AppConfig::from_cli(CliConfig::from(&cli)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli.command, &config) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Command, config: &AppConfig) -> Result<()> {
    let model = load_model(&config.model_path)?;
    let opts = GeneratorOptions {
        dialect: config.dialect,
        batch_size: config.batch_size,
        inline_values: config.inline_values,
    };

    match command {
        Command::Mapping { entity } => {
            let mapping = entity_mapping(&model, &entity)?;
            println!("{}", serde_json::to_string_pretty(&mapping)?);
        }
        Command::Insert { entity, rows } => {
            let mapping = entity_mapping(&model, &entity)?;
            let rows = load_rows(&rows)?;
            print_statements(&bulk_insert(&mapping, &rows, &opts)?)?;
        }
        Command::Update { entity, rows } => {
            let mapping = entity_mapping(&model, &entity)?;
            let rows = load_rows(&rows)?;
            print_statements(&bulk_update(&mapping, &rows, &opts)?)?;
        }
        Command::Delete { entity, keys } => {
            let mapping = entity_mapping(&model, &entity)?;
            let contents = fs::read_to_string(&keys)
                .with_context(|| format!("Failed to read keys file `{}`", keys))?;
            let entries: Vec<KeyEntry> = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse keys file `{}`", keys))?;
            let keys: Vec<Vec<SqlValue>> = entries.into_iter().map(Into::into).collect();
            print_statements(&bulk_delete(&mapping, &keys, &opts)?)?;
        }
    }
    Ok(())
}

fn load_model(path: &str) -> Result<Model> {
    let config = ModelConfig::from_yaml_file(path)
        .with_context(|| format!("Failed to load model manifest `{}`", path))?;
    let model = config.to_model()?;
    info!(
        "Loaded model `{}` with {} entity types",
        model.name.as_deref().unwrap_or("<unnamed>"),
        model.entity_types().len()
    );
    Ok(model)
}

fn load_rows(path: &str) -> Result<Vec<Row>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read rows file `{}`", path))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse rows file `{}`", path))
}

fn print_statements(statements: &[SqlStatement]) -> Result<()> {
    for statement in statements {
        println!("{};", statement.sql);
        if !statement.params.is_empty() {
            println!("-- params: {}", serde_json::to_string(&statement.params)?);
        }
    }
    Ok(())
}
