//! xds-metadata
//!
//! Decodes the node metadata a proxy sends on its first xDS request exactly
//! the way the control plane does, and prints the resulting descriptor.
//!
//! # Architecture Overview
//!
//! ```text
//!   metadata.json ──▶ metadata::value ──▶ metadata::decoder ──▶ DataplaneMetadata ──▶ stdout (JSON)
//!                                            │        │
//!                                            ▼        ▼
//!                               resource::decode   metadata::version
//!
//!   malformed fields ──▶ tracing (stderr) + metrics counters
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use xds_metadata::config::{load_config, AppConfig};
use xds_metadata::metadata::value::struct_from_json;
use xds_metadata::observability::logging;
use xds_metadata::resource::registry;
use xds_metadata::{DataplaneMetadata, ProxyResource};

#[derive(Parser)]
#[command(name = "xds-metadata")]
#[command(about = "Inspect proxy node metadata as the control plane decodes it", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a node metadata JSON document ("-" reads stdin)
    Decode { path: PathBuf },
    /// List mesh resource entities, or show the one with the given name
    Entities { name: Option<String> },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    logging::init(&config.observability);

    tracing::debug!(
        log_level = %config.observability.log_level,
        json_logs = config.observability.json_logs,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Decode { path } => decode(&path)?,
        Commands::Entities { name: None } => {
            for entity in registry::mesh_entities() {
                print_entity(entity);
            }
        }
        Commands::Entities { name: Some(name) } => {
            let entity = registry::lookup(&name)
                .ok_or_else(|| format!("unknown entity '{}'", name))?;
            print_entity(entity);
        }
    }

    Ok(())
}

fn print_entity(entity: &registry::Definition) {
    println!(
        "{:<20} {:<22} {}{}",
        entity.singular,
        entity.plural,
        entity.resource_type,
        if entity.read_only { " (read-only)" } else { "" }
    );
}

fn decode(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut raw = String::new();
    if path == Path::new("-") {
        std::io::stdin().read_to_string(&mut raw)?;
    } else {
        raw = std::fs::read_to_string(path)?;
    }

    let json: serde_json::Value = serde_json::from_str(&raw)?;
    let document = struct_from_json(json).ok_or("node metadata must be a JSON object")?;
    let metadata = DataplaneMetadata::from_xds_metadata(Some(&document));

    if let Some(ProxyResource::Dataplane(dp)) = metadata.resource() {
        tracing::info!(
            mesh = %dp.meta.mesh,
            name = %dp.meta.name,
            services = ?dp.spec.service_names(),
            gateway = dp.spec.is_gateway(),
            "Embedded dataplane"
        );
    }

    println!("{}", serde_json::to_string_pretty(&metadata)?);
    Ok(())
}
