mod cmd_add;
mod cmd_crawl;
mod cmd_find;
mod cmd_new;
mod cmd_remote;
mod cmd_render;
mod cmd_validate;
mod io;

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hypercat_client::ClientConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hypercat")]
#[command(about = "Build, validate, query and publish HyperCat catalogues")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pretty-print JSON output (sorted keys, four-space indent)
    #[arg(long, global = true)]
    pretty: bool,

    /// Access key for remote catalogues, sent as the basic-auth username
    #[arg(long, global = true, env = "HYPERCAT_KEY", hide_env_values = true)]
    key: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, env = "HYPERCAT_TIMEOUT", default_value = "600")]
    timeout: u64,

    /// Log level when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        ClientConfig {
            key: self.key.clone(),
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new catalogue
    New(cmd_new::NewArgs),
    /// Attach an item to a catalogue
    Add(cmd_add::AddArgs),
    /// Validate a catalogue document
    Validate {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Re-render a catalogue document
    Render {
        /// Input file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (writes to stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Look up an item by a path of relation values
    Find {
        /// Input file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Relation whose values name each path segment
        #[arg(long)]
        rel: String,

        /// Slash-separated path, e.g. /middle/bottom
        #[arg(long, default_value = "/")]
        path: String,
    },
    /// Fetch a remote catalogue
    Fetch {
        url: String,
    },
    /// Publish a catalogue to a remote host
    Push {
        url: String,

        /// Catalogue file to publish
        #[arg(short, long)]
        input: PathBuf,

        /// Do not delete an existing catalogue at the URL first
        #[arg(long)]
        keep_existing: bool,
    },
    /// Delete a remote catalogue
    Delete {
        url: String,
    },
    /// List queryable SenML resources below a remote catalogue
    Crawl(cmd_crawl::CrawlArgs),
    /// Rank energy meters below a remote catalogue by yesterday's usage
    Leaderboard(cmd_crawl::CrawlArgs),
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    let config = cli.client_config();

    match cli.command {
        Commands::New(args) => cmd_new::run(args, cli.pretty),
        Commands::Add(args) => cmd_add::run(args, cli.pretty),
        Commands::Validate { input } => cmd_validate::run(input),
        Commands::Render { input, output } => cmd_render::run(input, output, cli.pretty),
        Commands::Find { input, rel, path } => cmd_find::run(input, &rel, &path, cli.pretty),
        Commands::Fetch { url } => cmd_remote::fetch(&url, config, cli.pretty),
        Commands::Push {
            url,
            input,
            keep_existing,
        } => cmd_remote::push(&url, input, !keep_existing, config),
        Commands::Delete { url } => cmd_remote::delete(&url, config),
        Commands::Crawl(args) => cmd_crawl::run_crawl(args, config, cli.pretty),
        Commands::Leaderboard(args) => cmd_crawl::run_leaderboard(args, config, cli.pretty),
    }
}
