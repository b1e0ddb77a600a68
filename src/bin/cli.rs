//! OrionDB CLI Client
//!
//! Connects to an OrionDB socket, sends one command and prints whatever
//! the server streams back until the connection ends or Ctrl+C.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use orion_client::network::{DEFAULT_HOST, DEFAULT_PORT};
use orion_client::{Client, ClientConfig, Command, ConsoleSink, Endpoint, Record};
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;
use tracing_subscriber::{fmt, EnvFilter};

/// OrionDB CLI
#[derive(Parser, Debug)]
#[command(name = "orion")]
#[command(about = "Send a command to an OrionDB socket and print the replies")]
#[command(version)]
struct Args {
    /// Full endpoint URL (overrides host, port, namespace, shard and collection)
    #[arg(short, long)]
    url: Option<String>,

    /// Server host
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Server port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Database namespace
    #[arg(short, long, default_value = "test_db")]
    namespace: String,

    /// Shard segment of the route
    #[arg(short, long, default_value = "12345")]
    shard: String,

    /// Target collection
    #[arg(short, long, default_value = "users")]
    collection: String,

    /// Dial timeout in milliseconds (0 waits indefinitely)
    #[arg(long, default_value_t = 0)]
    connect_timeout_ms: u64,

    /// Command to send (defaults to a sample insertMany)
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Insert one record
    Insert {
        /// Record as a JSON object
        #[arg(value_parser = parse_json::<Record>)]
        record: Record,
    },

    /// Insert several records in order
    InsertMany {
        /// Records, one JSON object per argument
        #[arg(value_parser = parse_json::<Record>, required = true)]
        records: Vec<Record>,
    },

    /// Update every record matching a filter
    Update {
        /// Filter as a JSON object
        #[arg(value_parser = parse_json::<Record>)]
        filter: Record,

        /// Changes as a JSON object
        #[arg(value_parser = parse_json::<Record>)]
        changes: Record,
    },

    /// Remove every record matching a query
    Remove {
        /// Query as a JSON object
        #[arg(value_parser = parse_json::<Record>)]
        query: Record,
    },

    /// Fetch the whole collection
    Get {
        /// Keep shards as separate arrays
        #[arg(long)]
        nested: bool,
    },

    /// Find every record matching a query
    Search {
        /// Query as a JSON object
        #[arg(value_parser = parse_json::<Record>)]
        query: Record,
    },

    /// Send any method with a raw JSON value
    Raw {
        /// Method name
        method: String,

        /// Value as JSON
        #[arg(value_parser = parse_json::<Box<RawValue>>)]
        value: Box<RawValue>,
    },
}

impl Commands {
    fn into_command(self) -> Command {
        match self {
            Commands::Insert { record } => Command::insert(record),
            Commands::InsertMany { records } => Command::insert_many(records),
            Commands::Update { filter, changes } => Command::update(filter, changes),
            Commands::Remove { query } => Command::remove(query),
            Commands::Get { nested } => Command::get(!nested),
            Commands::Search { query } => Command::search(query),
            Commands::Raw { method, value } => Command::Opaque { method, value },
        }
    }
}

impl Args {
    fn endpoint(&self) -> Endpoint {
        match &self.url {
            Some(url) => Endpoint::new(url.as_str()),
            None => Endpoint::builder()
                .host(&self.host)
                .port(self.port)
                .namespace(&self.namespace)
                .shard(&self.shard)
                .collection(&self.collection)
                .build(),
        }
    }
}

fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, String> {
    serde_json::from_str(text).map_err(|e| format!("invalid JSON: {}", e))
}

/// Two sample users, sent when no subcommand is given
fn sample_command() -> Command {
    let user = |id: i64, test: &str| {
        let mut record = Record::new();
        record.insert("id".to_string(), id.into());
        record.insert("test".to_string(), test.into());
        record.insert("cool".to_string(), id.into());
        record
    };

    Command::insert_many(vec![user(1, "test"), user(2, "test2")])
}

#[tokio::main]
async fn main() {
    // Initialize tracing/logging; stdout is reserved for server messages
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,orion_client=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let endpoint = args.endpoint();

    tracing::info!("OrionDB client v{}", orion_client::VERSION);
    tracing::info!("Endpoint: {}", endpoint);

    let config = ClientConfig::builder()
        .endpoint(endpoint)
        .connect_timeout_ms(args.connect_timeout_ms)
        .build();

    let command = args
        .command
        .map(Commands::into_command)
        .unwrap_or_else(sample_command);

    // The sink has already reported the failure
    let mut client = match Client::connect(&config, Arc::new(ConsoleSink)).await {
        Ok(client) => client,
        Err(_) => std::process::exit(1),
    };

    if client.send(&command).await.is_err() {
        tracing::debug!("{} was not delivered", command.method());
    }

    // Ctrl+C stops the read loop
    let cancel = client.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received Ctrl+C, shutting down...");
            cancel.cancel();
        }
    });

    match client.wait().await {
        Ok(reason) => tracing::info!("Client stopped: {}", reason),
        Err(e) => {
            tracing::error!("Client error: {}", e);
            std::process::exit(1);
        }
    }
}
