//! masked-dump CLI - inspect masked dump plans.

use clap::{Parser, Subcommand};
use masked_dump::{
    Config, ConnectionCatalog, ConnectionName, DumpError, DumpPlan, DumpSchema,
    SchemaIntrospector,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser)]
#[command(name = "masked-dump")]
#[command(about = "Resolve and inspect masked database dump plans")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = "dump.yaml")]
    config: PathBuf,

    /// Connection to introspect (defaults to the configured default)
    #[arg(long, env = "MASKED_DUMP_CONNECTION")]
    connection: Option<String>,

    /// Output JSON instead of YAML
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the dump plan and print its summary
    Plan,

    /// List discovered tables with logical column types
    Tables,

    /// Validate the configuration file without connecting
    CheckConfig,
}

#[derive(Debug, Serialize)]
struct TableListing {
    name: String,
    columns: Vec<ColumnListing>,
}

#[derive(Debug, Serialize)]
struct ColumnListing {
    name: String,
    logical_type: String,
    native_type: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), DumpError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format).map_err(DumpError::Config)?;

    let config = Config::load(&cli.config)?;
    info!("Loaded configuration from {:?}", cli.config);

    let catalog = ConnectionCatalog::from_config(&config);
    let connection = ConnectionName::from(cli.connection.clone());

    match cli.command {
        Commands::CheckConfig => {
            let (name, conn) = catalog.resolve(&connection)?;
            println!("Configuration OK");
            println!("  Connections: {}", catalog.connection_names().join(", "));
            println!("  Using: {} ({}://{}/{})", name, conn.r#type, conn.host, conn.database);
            println!("  All tables: {}", config.dump.all_tables);
            println!("  Customized tables: {}", config.dump.tables.len());
            println!("  Schema-only tables: {}", config.dump.schema_only.len());
        }

        Commands::Tables => {
            let introspector = catalog.open(&connection).await?;
            let mut schema = DumpSchema::new(connection, introspector);
            let listing = list_tables(&mut schema).await?;
            print_output(&listing, cli.output_json)?;
        }

        Commands::Plan => {
            let introspector = catalog.open(&connection).await?;
            let mut schema = DumpSchema::new(connection, introspector);
            config.dump.apply(&mut schema);

            let plan = resolve_plan(&mut schema).await?;
            info!(
                "Plan has {} tables, {} schema only",
                plan.len(),
                plan.schema_only_tables().len()
            );
            print_output(&plan.summary(), cli.output_json)?;
        }
    }

    Ok(())
}

/// Discover tables, closing the introspector whether or not discovery succeeds.
async fn list_tables<I: SchemaIntrospector>(
    schema: &mut DumpSchema<I>,
) -> Result<Vec<TableListing>, DumpError> {
    let discovered: Result<Vec<TableListing>, DumpError> =
        schema.available_tables().await.map(|tables| {
            tables
                .iter()
                .map(|table| TableListing {
                    name: table.name.clone(),
                    columns: table
                        .columns
                        .iter()
                        .map(|c| ColumnListing {
                            name: c.name.clone(),
                            logical_type: c.logical_type.to_string(),
                            native_type: c.native_type.clone(),
                        })
                        .collect(),
                })
                .collect()
        });
    schema.discoverer().introspector().close().await;
    discovered
}

/// Resolve the plan, closing the introspector whether or not resolution succeeds.
async fn resolve_plan<I: SchemaIntrospector>(
    schema: &mut DumpSchema<I>,
) -> Result<DumpPlan, DumpError> {
    let resolved = schema.resolve().await;
    schema.discoverer().introspector().close().await;
    resolved
}

fn print_output<T: Serialize>(value: &T, json: bool) -> Result<(), DumpError> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", serde_yaml::to_string(value)?);
    }
    Ok(())
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => return Err(format!("Unknown verbosity '{}'", other)),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}
