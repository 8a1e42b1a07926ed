// Copyright (c) 2025 - Cowboy AI, Inc.
//! phpIPAM Dynamic Inventory
//!
//! Ansible inventory script backed by phpIPAM.
//!
//! Run with: phpipam-inventory --list [--refresh]
//!
//! Configuration comes from the environment (`IPAM_ADDR`, `IPAM_API_USER`,
//! `IPAM_USER`, `IPAM_PASS`, `IPAM_CACHE`, ...). Logs go to stderr; stdout
//! carries only the inventory JSON.

use anyhow::{Context, Result};
use clap::Parser;
use phpipam_inventory::{
    source::PhpIpamClient, FileCache, InventoryConfig, InventoryService, InventorySnapshot,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "phpipam-inventory")]
#[command(version)]
#[command(about = "Ansible dynamic inventory backed by phpIPAM", long_about = None)]
struct Cli {
    /// Emit the full inventory
    #[arg(long, conflicts_with = "host")]
    list: bool,

    /// Emit variables for one host (served through _meta in --list)
    #[arg(long, value_name = "HOSTNAME")]
    host: Option<String>,

    /// Ignore the cache and rebuild from phpIPAM
    #[arg(long)]
    refresh: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let snapshot = if cli.list {
        let config = InventoryConfig::from_env().context("Failed to load configuration")?;
        info!("Cache: {}", config.settings.cache_path.display());

        let source =
            PhpIpamClient::new(config.connection).context("Failed to create phpIPAM client")?;
        let cache = FileCache::new(config.settings.cache_path.clone());
        let service = InventoryService::new(source, cache, config.settings);

        service
            .list(cli.refresh)
            .await
            .context("Failed to build inventory")?
    } else {
        if let Some(host) = &cli.host {
            info!("Host query for {}", host);
        }
        InventorySnapshot::empty()
    };

    println!("{}", snapshot.to_json()?);
    Ok(())
}
