//! CLI definitions and entry point

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use super::commands;
use herbtrace::adapters::JsonFileStore;
use herbtrace::config::Config;
use herbtrace::core::models::{BatchStatus, EntityType, StepType, TestType, UserRole};
use herbtrace::core::services::Ledger;
use herbtrace::output::OutputMode;

/// herbtrace - Traceability ledger for Ayurvedic herb batches
#[derive(Parser, Debug)]
#[command(
    name = "herbtrace",
    version,
    about = "Traceability ledger for Ayurvedic herb batches",
    long_about = "Record herb batches from harvest to shelf.\n\n\
                  Every harvest, processing step, lab test and transfer is appended to the\n\
                  batch. Verification checks harvest locations against approved zones and\n\
                  scores the batch for compliance."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Ledger file to use (defaults to the configured path)
    #[arg(long, global = true, value_name = "PATH")]
    pub ledger: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create, list and inspect batches
    Batch {
        #[command(subcommand)]
        action: BatchAction,
    },

    /// Record a supply-chain event on a batch
    Record {
        #[command(subcommand)]
        event: RecordAction,
    },

    /// Verify a batch against the compliance rules
    Verify {
        /// Batch ID
        id: String,

        /// Exit with status 1 when the batch is not valid
        #[arg(long)]
        strict: bool,
    },

    /// Print the compliance report for a batch
    Report {
        /// Batch ID
        id: String,
    },

    /// Show the provenance timeline of a batch
    Timeline {
        /// Batch ID
        id: String,
    },

    /// Show the harvest locations of a batch
    Map {
        /// Batch ID
        id: String,
    },

    /// Print the QR payload of a batch
    Qr {
        /// Batch ID
        id: String,
    },

    /// Verify the batch named by a scanned QR payload
    Scan {
        /// Scanned text (URL or bare batch ID)
        payload: String,
    },

    /// Summary of all batches
    Status,

    /// List known herb species
    Herbs,

    /// List supply-chain roles and what each may record
    Roles,

    /// Add the demo Ashwagandha batch to the ledger
    Demo,

    /// Serve the JSON API over HTTP
    #[cfg(feature = "ui")]
    Serve {
        /// Bind address (defaults to config)
        #[arg(long)]
        host: Option<String>,

        /// Port (defaults to config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Serve the ledger file instead of a fresh in-memory ledger
        #[arg(long)]
        persistent: bool,

        /// Do not seed the demo batch
        #[arg(long)]
        no_demo: bool,
    },

    /// Show version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum BatchAction {
    /// Create a batch
    Create {
        /// Species label, e.g. "Withania somnifera (Ashwagandha)"
        #[arg(short, long)]
        species: String,

        /// Quantity in kg
        #[arg(short, long)]
        quantity: f64,

        /// Harvest date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        harvest_date: Option<NaiveDate>,

        /// Role creating the batch
        #[arg(long, default_value = "farmer")]
        role: UserRole,

        /// Record a harvest by this collector right away
        #[arg(long)]
        collector: Option<String>,

        /// Harvest latitude
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Harvest longitude
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,

        /// Harvest place name
        #[arg(long)]
        location: Option<String>,
    },

    /// List batches
    List {
        /// Only batches in this status
        #[arg(short, long)]
        status: Option<BatchStatus>,
    },

    /// Show a batch with all its events
    Show {
        /// Batch ID
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum RecordAction {
    /// Harvest of the batch material
    Collection {
        /// Batch ID
        batch: String,

        /// Collector name
        #[arg(short, long)]
        collector: String,

        /// Species (defaults to the batch species)
        #[arg(long)]
        species: Option<String>,

        /// Latitude
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,

        /// Place name
        #[arg(long)]
        location: Option<String>,

        /// Moisture percent
        #[arg(long)]
        moisture: Option<f64>,

        /// Role recording the event
        #[arg(long, default_value = "farmer")]
        role: UserRole,
    },

    /// Processing step
    Processing {
        /// Batch ID
        batch: String,

        /// Processor name
        #[arg(short, long)]
        processor: String,

        /// Step: drying, grinding, storage, packaging
        #[arg(short, long, default_value = "drying")]
        step: StepType,

        /// Temperature in degrees Celsius
        #[arg(long, allow_hyphen_values = true)]
        temperature: Option<f64>,

        /// Duration in hours
        #[arg(long)]
        duration: Option<f64>,

        /// Notes
        #[arg(long)]
        notes: Option<String>,

        /// Role recording the event
        #[arg(long, default_value = "processor")]
        role: UserRole,
    },

    /// Lab quality test
    Test {
        /// Batch ID
        batch: String,

        /// Lab name
        #[arg(short, long)]
        lab: String,

        /// Test: moisture, pesticide, dna, heavy-metals, microbial
        #[arg(short, long, default_value = "moisture")]
        test_type: TestType,

        /// Measured value
        #[arg(long)]
        value: Option<f64>,

        /// Unit of the value
        #[arg(long)]
        unit: Option<String>,

        /// Standard compared against
        #[arg(long)]
        standard: Option<String>,

        /// Mark the sample as failed
        #[arg(long)]
        failed: bool,

        /// Certificate reference
        #[arg(long)]
        certificate: Option<String>,

        /// Role recording the event
        #[arg(long, default_value = "lab")]
        role: UserRole,
    },

    /// Custody transfer
    Transfer {
        /// Batch ID
        batch: String,

        /// Sending entity
        #[arg(long)]
        from: String,

        /// Receiving entity
        #[arg(long)]
        to: String,

        /// Type of the receiving entity: processor, manufacturer, retailer
        #[arg(short, long)]
        entity_type: EntityType,

        /// Quantity handed over
        #[arg(short, long)]
        quantity: f64,

        /// Sender signature
        #[arg(long)]
        signature: Option<String>,

        /// Role recording the event
        #[arg(long, default_value = "manufacturer")]
        role: UserRole,
    },
}

/// Open the JSON ledger at the explicit path or the configured one
fn open_ledger(path: Option<PathBuf>, config: &Config) -> Ledger {
    let path = path.unwrap_or_else(|| config.ledger.path.clone());
    log::debug!("Using ledger {}", path.display());
    Ledger::new(JsonFileStore::new(path), config.ledger_settings())
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let Some(command) = cli.command else {
        if output_mode == OutputMode::Json {
            println!(
                "{}",
                serde_json::json!({
                    "version": env!("CARGO_PKG_VERSION"),
                    "hint": "Use --help for usage"
                })
            );
        } else {
            println!("herbtrace v{}", env!("CARGO_PKG_VERSION"));
            println!("\nRun 'herbtrace --help' for usage");
            println!("Run 'herbtrace demo' to add a sample batch");
        }
        return Ok(());
    };

    let config = if matches!(command, Command::Version | Command::Herbs | Command::Roles) {
        Config::default()
    } else {
        Config::load()?
    };
    let open = || open_ledger(cli.ledger.clone(), &config);

    match command {
        Command::Batch { action } => commands::batch(&open(), action, output_mode),
        Command::Record { event } => commands::record(&open(), event, output_mode),
        Command::Verify { id, strict } => commands::verify(&open(), &id, strict, output_mode),
        Command::Report { id } => commands::report(&open(), &id, output_mode),
        Command::Timeline { id } => commands::timeline(&open(), &id, output_mode),
        Command::Map { id } => commands::map(&open(), &id, output_mode),
        Command::Qr { id } => commands::qr(&open(), &id, output_mode),
        Command::Scan { payload } => commands::scan(&open(), &payload, output_mode),
        Command::Status => commands::status(&open(), output_mode),
        Command::Herbs => commands::herbs(output_mode),
        Command::Roles => commands::roles(output_mode),
        Command::Demo => commands::demo(&open(), output_mode),
        #[cfg(feature = "ui")]
        Command::Serve {
            host,
            port,
            persistent,
            no_demo,
        } => {
            let ledger = if persistent {
                open()
            } else {
                Ledger::new(herbtrace::adapters::InMemoryBatchStore::new(), config.ledger_settings())
            };
            let options = commands::ServeOptions {
                host: host.unwrap_or_else(|| config.server.host.clone()),
                port: port.unwrap_or(config.server.port),
                seed_demo: config.server.seed_demo && !no_demo,
            };
            commands::serve(&ledger, &options)
        },
        Command::Version => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("herbtrace v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
    }
}
