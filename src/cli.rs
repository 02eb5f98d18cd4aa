use crate::api::Scout;
use crate::config::Config;
use crate::query::RankQuery;
use crate::types::QueryResult;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "dianping-scout",
    version,
    about = "Dianping category rankings and shop details (JSON only)"
)]
pub struct Cli {
    /// Config file (JSON); defaults to the per-user config dir
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Credential bundle exported from a logged-in browser
    #[arg(long, global = true)]
    auth: Option<PathBuf>,
    /// Show the browser window
    #[arg(long, global = true)]
    headful: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// First results page of a category ranking
    Rank(RankArgs),
    /// One shop's detail page
    Shop { id: String },
    /// Confirm the stored credentials still log in
    Check,
    /// List categories and sort labels, or one city's regions
    Taxonomy {
        #[arg(long)]
        city: Option<String>,
    },
}

#[derive(Args)]
struct RankArgs {
    #[arg(long)]
    city: String,
    #[arg(long)]
    category: String,
    #[arg(long, default_value = "")]
    region: String,
    #[arg(long, default_value = "")]
    sort: String,
}

pub fn run() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let scout = match startup(&cli) {
        Ok(s) => s,
        Err(e) => {
            print_json(&QueryResult::<()>::err(e.to_string()));
            anyhow::bail!("startup failed: {e}");
        }
    };

    match cli.cmd {
        Command::Rank(args) => {
            let query = RankQuery::new(args.city, args.category)
                .with_region(args.region)
                .with_sort(args.sort);
            print_json(&scout.category_rank(&query));
        }
        Command::Shop { id } => print_json(&scout.shop_detail(&id)),
        Command::Check => print_json(&scout.check()),
        Command::Taxonomy { city } => match city {
            None => print_json(&QueryResult::ok(scout.taxonomy().overview())),
            Some(c) => {
                let res = scout
                    .taxonomy()
                    .city_regions(&c)
                    .cloned()
                    .ok_or(crate::ScoutError::UnsupportedCity(c));
                print_json(&QueryResult::from_result(res));
            }
        },
    }
    Ok(())
}

fn startup(cli: &Cli) -> crate::Result<Scout> {
    let mut cfg = Config::load(cli.config.as_deref())?;
    if let Some(auth) = &cli.auth {
        cfg.auth_file = auth.clone();
    }
    if cli.headful {
        cfg.headless = false;
    }
    Scout::from_config(&cfg)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn print_json<T: Serialize>(val: &T) {
    match serde_json::to_string_pretty(val) {
        Ok(s) => println!("{s}"),
        Err(e) => println!("{{\"success\": false, \"error\": \"{e}\"}}"),
    }
}
