use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use keystore::cli::{Cli, Command};
use keystore::config::Config;

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    let backend = cli.backend.unwrap_or(config.backend);
    let path = cli.path.unwrap_or(config.store_path);
    info!("keystore opening {} store at {}", backend, path.display());

    let store = keystore::open(backend, &path).context("Failed to open store")?;

    match cli.command {
        Command::List => {
            let keys = store.keys()?;
            if keys.is_empty() {
                println!("No keys found");
            } else {
                for key in keys {
                    println!("{}", key);
                }
            }
        }
        Command::Get { key } => match store.get_raw(&key)? {
            Some(raw) => {
                let pretty = serde_json::from_str::<serde_json::Value>(&raw)
                    .and_then(|v| serde_json::to_string_pretty(&v))
                    .unwrap_or(raw);
                println!("{}", pretty);
            }
            None => {
                println!("{} Key not found: {}", "✗".red(), key);
            }
        },
        Command::Set { key, value } => {
            let parsed: serde_json::Value = serde_json::from_str(&value).context("Value is not valid JSON")?;
            store.set_raw(&key, &parsed.to_string())?;
            println!("{} Stored: {}", "✓".green(), key.cyan());
        }
        Command::Delete { key } => {
            if store.delete(&key)? {
                println!("{} Deleted: {}", "✓".green(), key);
            } else {
                println!("{} Key not found: {}", "✗".red(), key);
            }
        }
    }

    Ok(())
}
