use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use hypercat_client::crawl::{DEFAULT_MAX_DEPTH, ENERGY_UNIT, is_queryable};
use hypercat_client::readings::{energy_series, leaderboard, previous_day};
use hypercat_client::{ClientConfig, Crawler, Fetch, HypercatClient};
use tracing::info;

use crate::io::to_json;

#[derive(Args, Debug)]
pub struct CrawlArgs {
    /// Catalogue URL to start from
    pub url: String,

    /// SenML unit a resource must declare
    #[arg(long, default_value = ENERGY_UNIT)]
    pub unit: String,

    /// Maximum number of catalogue levels to follow
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

pub fn run_crawl(args: CrawlArgs, config: ClientConfig, pretty: bool) -> Result<()> {
    let client = HypercatClient::new(config)?;
    let hrefs = queryable_hrefs(&client, &args)?;
    info!(count = hrefs.len(), "crawl finished");
    println!("{}", to_json(&hrefs, pretty)?);
    Ok(())
}

pub fn run_leaderboard(args: CrawlArgs, config: ClientConfig, pretty: bool) -> Result<()> {
    let client = HypercatClient::new(config)?;
    let standings = rank(&client, &args, Utc::now())?;
    println!("{}", to_json(&standings, pretty)?);
    Ok(())
}

fn queryable_hrefs<F: Fetch + ?Sized>(fetcher: &F, args: &CrawlArgs) -> Result<Vec<String>> {
    Crawler::new(fetcher)
        .max_depth(args.max_depth)
        .crawl(
            &args.url,
            |metadata| is_queryable(metadata, &args.unit),
            |href, _| href.to_string(),
        )
        .with_context(|| format!("Failed to crawl {}", args.url))
}

fn rank<F: Fetch + ?Sized>(
    fetcher: &F,
    args: &CrawlArgs,
    now: chrono::DateTime<Utc>,
) -> Result<Vec<hypercat_client::readings::Standing>> {
    let window = previous_day(now);
    let readings = Crawler::new(fetcher)
        .max_depth(args.max_depth)
        .crawl(
            &args.url,
            |metadata| is_queryable(metadata, &args.unit),
            |href, _| energy_series(fetcher, href, window),
        )
        .with_context(|| format!("Failed to crawl {}", args.url))?;
    Ok(leaderboard(readings))
}
