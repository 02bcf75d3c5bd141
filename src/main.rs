// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

mod api;
mod config;
mod currencies;
mod db;
mod error;
mod models;
mod repository;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::api::NbpClient;
use crate::currencies::CurrencyService;
use crate::models::{LookupCriteria, PageRequest, DEFAULT_TAKE};
use crate::repository::SqliteCurrencyRepository;

#[derive(Parser)]
#[command(author, version, about = "Cached currency exchange rates backed by the NBP API")]
struct Cli {
    /// Path to a config.toml (defaults to the one next to Cargo.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stored currencies one page at a time
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_TAKE)]
        take: u32,
    },
    /// Find a currency by id or name
    Find {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Store an exchange rate for a currency
    SetRate {
        name: String,
        rate: f64,
        #[arg(long)]
        base: bool,
    },
    /// Fetch live EUR and USD rates from NBP without storing them
    FetchRates,
    /// Fetch live EUR and USD rates from NBP and store them
    SyncRates,
    /// Create the default PLN, EUR and USD currencies
    Seed,
}

fn init_tracing() {
    let log_format =
        std::env::var("CURRENCY_RATES_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref())?;

    let pool = db::create_db_pool(&config.database_url).await?;
    tracing::info!("Database in use: {}", config.database_url);

    let service = CurrencyService::new(
        Arc::new(SqliteCurrencyRepository::new(pool)),
        Arc::new(NbpClient::new(config.nbp.base_url.clone(), config.nbp.rates_date)),
        tracing::info_span!("currency_service"),
    );

    match cli.command {
        Commands::List { page, take } => {
            let page = service
                .list_currencies(&PageRequest::from_page(page, take)?)
                .await?;
            for currency in &page.data {
                println!(
                    "{}  {:<5} {:>12.6}{}",
                    currency.id,
                    currency.name,
                    currency.current_exchange_rate,
                    if currency.base { "  (base)" } else { "" }
                );
            }
            println!(
                "Page {}/{} ({} currencies)",
                page.meta.page, page.meta.page_count, page.meta.item_count
            );
        }
        Commands::Find { id, name } => {
            match service.find_currency(&LookupCriteria { id, name }).await? {
                Some(currency) => println!("{}", serde_json::to_string_pretty(&currency)?),
                None => println!("Currency not found"),
            }
        }
        Commands::SetRate { name, rate, base } => {
            service.upsert_exchange_rate(&name, rate, base).await?;
            println!("✅ {} rate set to {}", name, rate);
        }
        Commands::FetchRates => {
            let rates = service.fetch_live_exchange_rates().await?;
            println!("{}", serde_json::to_string_pretty(&rates)?);
        }
        Commands::SyncRates => {
            let rates = service.sync_exchange_rates().await?;
            for rate in rates {
                println!("✅ {} = {:.6}", rate.name, rate.current_exchange_rate);
            }
        }
        Commands::Seed => {
            let created = service.seed_currencies().await?;
            if created.is_empty() {
                println!("Default currencies already present");
            } else {
                println!("✅ Created {}", created.join(", "));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let cli = Cli::parse_from(["currency-rates", "list", "--page", "2", "--take", "5"]);
        assert!(matches!(cli.command, Commands::List { page: 2, take: 5 }));

        let cli = Cli::parse_from(["currency-rates", "set-rate", "EUR", "0.2342", "--base"]);
        match cli.command {
            Commands::SetRate { name, rate, base } => {
                assert_eq!(name, "EUR");
                assert!((rate - 0.2342).abs() < f64::EPSILON);
                assert!(base);
            }
            _ => panic!("expected set-rate"),
        }

        let cli = Cli::parse_from([
            "currency-rates",
            "--config",
            "other.toml",
            "find",
            "--name",
            "USD",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("other.toml")));
        assert!(matches!(
            cli.command,
            Commands::Find { id: None, name: Some(ref n) } if n == "USD"
        ));
    }
}
