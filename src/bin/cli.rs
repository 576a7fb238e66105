//! docstore CLI
//!
//! Command-line interface for inspecting and editing collections.

use clap::{Parser, Subcommand};
use docstore::{Config, Database, DocError, Filter, Record};
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::{fmt, EnvFilter};

/// docstore CLI
#[derive(Parser, Debug)]
#[command(name = "docstore-cli")]
#[command(about = "CLI for the docstore JSON document store")]
#[command(version)]
struct Args {
    /// Root storage directory
    #[arg(short, long, default_value = Config::DEFAULT_ROOT)]
    root: String,

    /// Collection name (file <root>/<collection>.json)
    #[arg(short, long, default_value = "default")]
    collection: String,

    /// Indentation width of the collection file
    #[arg(long, default_value = "2")]
    indent: usize,

    /// fsync after every write
    #[arg(long)]
    sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Insert a record under a new key
    Put {
        /// The key to insert
        key: String,

        /// The record as a JSON object, e.g. '{"name": "Robo"}'
        #[arg(value_parser = parse_record)]
        record: Record,
    },

    /// Get a record by key
    Get {
        /// The key to get
        key: String,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// Merge fields into an existing record
    Update {
        /// The key to update
        key: String,

        /// The fields to merge as a JSON object
        #[arg(value_parser = parse_record)]
        fields: Record,
    },

    /// Add to every numeric field of a record
    Incr {
        key: String,

        #[arg(short, long, default_value = "1")]
        by: i64,
    },

    /// Subtract from every numeric field of a record
    Decr {
        key: String,

        #[arg(short, long, default_value = "1")]
        by: i64,
    },

    /// Print every key and record
    All,

    /// Print records matching all `--where` parameters
    Fetch {
        /// field=value or field?contains=text (value parsed as JSON when possible)
        #[arg(short = 'w', long = "where", value_parser = parse_param)]
        params: Vec<(String, Value)>,
    },

    /// Like fetch, with an optional result limit
    Query {
        #[arg(short = 'w', long = "where", value_parser = parse_param)]
        params: Vec<(String, Value)>,

        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Case-insensitive regex search over each record
    Wquery {
        pattern: String,
    },

    /// Print the number of keys
    Count,

    /// Remove every record from the collection
    Flush,

    /// List collections under the root
    Collections,
}

fn main() {
    // Logs go to stderr so stdout stays machine-readable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> docstore::Result<()> {
    let config = Config::builder()
        .root_dir(&args.root)
        .indent(args.indent)
        .sync_writes(args.sync)
        .build();

    let db = Database::open(config)?;
    execute(&db, &args.collection, args.command)
}

fn execute(db: &Database, collection: &str, command: Commands) -> docstore::Result<()> {
    // Opened lazily so listing collections never creates one
    let store = || db.collection(collection);

    match command {
        Commands::Put { key, record } => store()?.put(&key, record),
        Commands::Get { key } => match store()?.get(&key)? {
            Some(record) => print_json(&record),
            None => {
                eprintln!("(not found)");
                Ok(())
            }
        },
        Commands::Del { key } => {
            if !store()?.delete(&key)? {
                eprintln!("(not found)");
            }
            Ok(())
        }
        Commands::Update { key, fields } => store()?.update(&key, fields),
        Commands::Incr { key, by } => store()?.increment_by(&key, by),
        Commands::Decr { key, by } => store()?.decrement_by(&key, by),
        Commands::All => print_json(&store()?.all()?),
        Commands::Fetch { params } => {
            let filter = (!params.is_empty()).then(|| Filter::from_params(params));
            print_json(&store()?.fetch(filter.as_ref())?)
        }
        Commands::Query { params, limit } => {
            let filter = Filter::from_params(params);
            print_json(&store()?.query(&filter, limit)?)
        }
        Commands::Wquery { pattern } => print_json(&store()?.wildcard_query(&pattern)?),
        Commands::Count => {
            println!("{}", store()?.count()?);
            Ok(())
        }
        Commands::Flush => store()?.flush(),
        Commands::Collections => print_json(&db.collection_names()?),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> docstore::Result<()> {
    let text =
        serde_json::to_string_pretty(value).map_err(|e| DocError::Serialization(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

fn parse_record(text: &str) -> Result<Record, String> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(record)) => Ok(record),
        Ok(_) => Err("expected a JSON object".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

/// "name?contains=rob" → ("name?contains", "rob"); "age=16" → ("age", 16)
fn parse_param(text: &str) -> Result<(String, Value), String> {
    let (name, raw) = text
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {:?}", text))?;

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((name.to_string(), value))
}
