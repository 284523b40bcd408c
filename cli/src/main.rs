use std::process::ExitCode;
use std::sync::Arc;

use canvas::doc::PlacedId;
use clap::{Parser, Subcommand};
use garden::api::http::HttpGardenApi;
use garden::config::{DEFAULT_API_URL, GardenConfig};
use garden::error::GardenError;
use garden::store::GardenStore;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{}", .0.user_message())]
    Garden(#[from] GardenError),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "garden-cli", about = "Garden inventory, shop, and placement CLI")]
struct Cli {
    #[arg(long, env = "GARDEN_API_URL", default_value = DEFAULT_API_URL)]
    base_url: String,

    #[arg(long, env = "GARDEN_AUTH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Owned items, including those with quantity 0.
    Inventory,
    /// Objects placed in the garden.
    Objects,
    /// Shop catalog.
    Shop,
    /// Place an owned item at a surface percentage.
    Place {
        item_id: String,
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
    },
    /// Move a placed object.
    Move {
        placed_id: PlacedId,
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
    },
    /// Remove a placed object.
    Remove { placed_id: PlacedId },
    /// Buy items from the shop.
    Buy {
        item_id: String,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let env_file = dotenvy::dotenv();
    init_tracing();
    if let Ok(path) = env_file {
        debug!(path = %path.display(), "loaded environment file");
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn build_config(cli: &Cli) -> Result<GardenConfig, GardenError> {
    Ok(GardenConfig::from_env()?
        .with_api_url(&cli.base_url)?
        .with_auth_token(cli.token.clone()))
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = build_config(&cli)?;
    debug!(api_url = %config.api_url, authenticated = config.auth_token.is_some(), "garden-cli: configured");
    let store = GardenStore::new(Arc::new(HttpGardenApi::new(&config)?));

    match &cli.command {
        Command::Shop => return print_json(&store.shop_items().await?),
        Command::Inventory | Command::Objects => {
            if !store.fetch_all().await {
                return Err(GardenError::Transport("could not load garden".into()).into());
            }
        }
        Command::Place { item_id, x, y } => {
            store.place(item_id, *x, *y).await?;
        }
        Command::Move { placed_id, x, y } => store.move_object(*placed_id, *x, *y).await?,
        Command::Remove { placed_id } => store.remove(*placed_id).await?,
        Command::Buy { item_id, quantity } => store.purchase(item_id, *quantity).await?,
    }

    let snapshot = store.snapshot().await;
    match cli.command {
        Command::Inventory | Command::Buy { .. } => print_json(snapshot.inventory()),
        _ => print_json(snapshot.placed()),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
