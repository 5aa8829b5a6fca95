mod catalog;
mod details;
mod interactive;
mod render;

use clap::{Args, Parser, Subcommand};
use grocery_client::CatalogClient;
use grocery_core::{Navigation, PageSize, SortItem, SortModel, ViewState};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "grocery-cli")]
#[command(about = "Browse the grocery product catalog through the relay")]
struct Cli {
    /// Relay route to fetch products from; defaults to `GROCERY_RELAY_URL`.
    #[arg(long, global = true)]
    relay_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the product grid.
    Catalog(CatalogArgs),
    /// Show a single product.
    Details {
        #[arg(long)]
        id: Option<String>,
    },
    /// Open a view by path, e.g. `/product-details?id=p1`.
    Open { path: String },
}

#[derive(Debug, Args)]
struct CatalogArgs {
    /// Case-insensitive name filter.
    #[arg(long, default_value = "")]
    search: String,

    #[arg(long)]
    category: Option<String>,

    /// Sort key as `field` or `field:dir`; repeat for tie-breakers.
    /// Defaults to `price:asc`.
    #[arg(long = "sort", value_name = "FIELD[:DIR]")]
    sort: Vec<SortItem>,

    /// One-based page number.
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Rows per page: 5, 10 or 20.
    #[arg(long, default_value_t = 5)]
    page_size: usize,

    /// Keep the view open and read search text and commands from stdin.
    #[arg(long)]
    interactive: bool,
}

impl CatalogArgs {
    fn view_state(&self) -> anyhow::Result<ViewState> {
        let sort = if self.sort.is_empty() {
            SortModel::default()
        } else {
            SortModel::new(self.sort.clone())
        };
        Ok(ViewState::default()
            .with_search(self.search.clone())
            .with_category(self.category.clone())
            .with_sort(sort)
            .with_page(self.page.saturating_sub(1))
            .with_page_size(PageSize::try_from(self.page_size)?))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = grocery_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = match &cli.relay_url {
        Some(url) => CatalogClient::new(url, config.http_timeout_secs, &config.user_agent)?,
        None => CatalogClient::relay(&config)?,
    };
    tracing::debug!(relay = client.url(), "using relay");

    match cli.command {
        Commands::Catalog(args) => {
            let state = args.view_state()?;
            catalog::run(client, state, args.interactive).await
        }
        Commands::Details { id } => details::run(client, id).await,
        Commands::Open { path } => match Navigation::parse(&path)? {
            Navigation::Catalog => catalog::run(client, ViewState::default(), false).await,
            Navigation::ProductDetails { id } => details::run(client, id).await,
        },
    }
}

#[cfg(test)]
mod tests;
