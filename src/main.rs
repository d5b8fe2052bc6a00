//! PSS Fleet Data - command line front-end for the Fleet Data API.
//!
//! Each subcommand performs one request and prints the decoded response
//! envelope as JSON on stdout. Logs go to stderr.
//!
//! # Configuration
//!
//! - `PSS_FLEET_DATA_BASE_URL` - API base URL (default: the public API)
//! - `PSS_FLEET_DATA_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
//! - `RUST_LOG` - Log filter

use std::env;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use pss_fleet_data::client::DEFAULT_BASE_URL;
use pss_fleet_data::transport::HttpTransport;
use pss_fleet_data::{FleetDataClient, ListOptions};

/// Default request timeout if not specified via environment variable.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Parser)]
#[command(name = "pss-fleet-data", version, about = "Query the PSS Fleet Data API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// History of a fleet across collections
    FleetHistory {
        fleet_id: i64,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Metadata of collections
    Collections {
        #[command(flatten)]
        list: ListArgs,
    },
    /// A full collection
    Collection { collection_id: i64 },
    /// Fleets of a collection
    Fleets { collection_id: i64 },
    /// One fleet of a collection, with its members
    Fleet { collection_id: i64, fleet_id: i64 },
    /// Top 100 players of a collection
    TopPlayers { collection_id: i64 },
    /// Players of a collection
    Players { collection_id: i64 },
    /// One player of a collection, with their fleet
    Player { collection_id: i64, user_id: i64 },
    /// History of a player across collections
    PlayerHistory {
        user_id: i64,
        #[command(flatten)]
        list: ListArgs,
    },
}

#[derive(Args)]
struct ListArgs {
    /// Earliest date, sent as given (e.g. "2024-01-01 00:00:00")
    #[arg(long)]
    from: Option<String>,

    /// Latest date, sent as given
    #[arg(long)]
    to: Option<String>,

    /// month, day or hour
    #[arg(long)]
    interval: Option<String>,

    /// Sort descending by timestamp
    #[arg(long)]
    desc: Option<bool>,

    #[arg(long, allow_negative_numbers = true)]
    skip: Option<i64>,

    /// Page size; 0 leaves it to the server
    #[arg(long, allow_negative_numbers = true)]
    take: Option<i64>,
}

impl From<ListArgs> for ListOptions {
    fn from(args: ListArgs) -> Self {
        ListOptions {
            from_date: args.from.map(Into::into),
            to_date: args.to.map(Into::into),
            interval: args.interval.map(Into::into),
            desc: args.desc,
            skip: args.skip,
            take: args.take,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("pss_fleet_data=info".parse()?))
        .init();

    let cli = Cli::parse();

    // Load configuration from environment
    let base_url =
        env::var("PSS_FLEET_DATA_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let timeout_secs: u64 = env::var("PSS_FLEET_DATA_TIMEOUT_SECS")
        .ok()
        .and_then(|t| t.parse().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    info!(base_url = %base_url, timeout_secs, "Using Fleet Data API");

    let transport = HttpTransport::with_timeout(Duration::from_secs(timeout_secs))?;
    let client = FleetDataClient::with_transport(transport, &base_url);

    match cli.command {
        Command::FleetHistory { fleet_id, list } => {
            print_json(&client.get_fleet_history(fleet_id, &list.into())?)
        }
        Command::Collections { list } => print_json(&client.get_collections(&list.into())?),
        Command::Collection { collection_id } => {
            print_json(&client.get_collection(collection_id)?)
        }
        Command::Fleets { collection_id } => {
            print_json(&client.get_fleets_from_collection(collection_id)?)
        }
        Command::Fleet {
            collection_id,
            fleet_id,
        } => print_json(&client.get_fleet_from_collection(collection_id, fleet_id)?),
        Command::TopPlayers { collection_id } => {
            print_json(&client.get_top_100_players_from_collection(collection_id)?)
        }
        Command::Players { collection_id } => {
            print_json(&client.get_players_from_collection(collection_id)?)
        }
        Command::Player {
            collection_id,
            user_id,
        } => print_json(&client.get_player_from_collection(collection_id, user_id)?),
        Command::PlayerHistory { user_id, list } => {
            print_json(&client.get_player_history(user_id, &list.into())?)
        }
    }
}
