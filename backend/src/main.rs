use std::path::{Path, PathBuf};

use clap::{self, Parser};
use log::info;
use sea_orm::{ColumnTrait, Database, DatabaseConnection};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use migration::{Migrator, MigratorTrait};
use pagekit_core::model::person;
use pagekit_core::{OrderBy, PageQuery, SelectSource, ToJson, WhereIf};

mod seed;

#[derive(clap::Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Data directory path
    #[arg(short, long)]
    data: PathBuf,

    /// Page number, values below 1 mean the first page
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    page: i64,

    /// Records per page, values below 1 mean 10
    #[arg(short = 's', long, default_value_t = 10, allow_negative_numbers = true)]
    page_size: i64,

    /// Sort specification, e.g. "name desc, id"
    #[arg(short = 'o', long)]
    sort: Option<String>,

    /// Only list people from this country
    #[arg(short, long)]
    country: Option<String>,

    /// Insert this many sample people before listing
    #[arg(long)]
    seed: Option<u32>,

    /// Pretty print the json output
    #[arg(long)]
    pretty: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "RUST_LOG")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    let filter = args
        .log_level
        .as_deref()
        .and_then(|l| EnvFilter::try_new(l).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let db = prepare_db(&args.data).await?;

    if let Some(count) = args.seed {
        let total = seed::people(&db, count).await?;
        info!("{} people stored", total);
    }

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let country = args.country.clone().unwrap_or_default();
    let source = SelectSource::<person::Entity>::all(db)
        .where_if(person::Column::Country.eq(country), || args.country.is_some())
        .sort(args.sort.as_deref());

    let result = PageQuery::new()
        .source(source)
        .page(args.page)
        .page_size(args.page_size)
        .cancel_with(cancel)
        .build()?
        .fetch()
        .await?;

    let meta = result.meta();
    info!(
        "page {}/{}, {} records in total",
        meta.page_index, meta.total_pages, meta.total_records
    );

    let out = if args.pretty {
        result.to_json_pretty()?
    } else {
        result.to_json()?
    };
    println!("{}", out);

    Ok(())
}

async fn prepare_db(data: &Path) -> Result<DatabaseConnection, anyhow::Error> {
    std::fs::create_dir_all(data)?;
    let db_path = data.join("pagekit.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.to_string_lossy());
    let db = Database::connect(&db_url).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}
