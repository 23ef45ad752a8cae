mod categories;
mod discover;
mod share;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sweekar")]
#[command(about = "Find support resources near a location")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List resource categories and the keywords searched for each
    Categories {
        /// YAML file with category overrides
        #[arg(long, env = "SWEEKAR_CATEGORIES_PATH")]
        categories_path: Option<std::path::PathBuf>,
    },
    /// Run one discovery cycle and print the resources found
    Discover {
        /// Category key (e.g. legal, counseling); unknown keys use a general search
        #[arg(long)]
        category: Option<String>,
        /// Latitude to search around; defaults to the center of India
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Longitude to search around
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,
        /// Only show resources whose name contains this text
        #[arg(long)]
        search: Option<String>,
        /// Page of results to show (9 per page)
        #[arg(long, default_value = "1")]
        page: usize,
        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a shareable summary and messaging link for one place
    Share {
        /// Place identifier, as listed by `discover --json`
        #[arg(long)]
        place_id: String,
    },
    /// Print a directions link between two points
    Directions {
        #[arg(long, allow_negative_numbers = true)]
        to_lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        to_lng: f64,
        #[arg(long, requires = "from_lng", allow_negative_numbers = true)]
        from_lat: Option<f64>,
        #[arg(long, requires = "from_lat", allow_negative_numbers = true)]
        from_lng: Option<f64>,
    },
}

fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Categories { categories_path } => {
            init_tracing(&default_log_level())?;
            categories::run_categories(categories_path.as_deref())?;
        }
        Commands::Discover {
            category,
            lat,
            lng,
            search,
            page,
            json,
        } => {
            let config = sweekar_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            let origin = lat.zip(lng).map(|(lat, lng)| sweekar_core::Coordinate::new(lat, lng));
            let request = discover::DiscoverRequest {
                category: category.as_deref(),
                origin,
                search: search.as_deref().unwrap_or_default(),
                page,
                json,
            };
            discover::run_discover(&config, &request).await?;
        }
        Commands::Share { place_id } => {
            let config = sweekar_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            share::run_share(&config, &place_id).await?;
        }
        Commands::Directions {
            to_lat,
            to_lng,
            from_lat,
            from_lng,
        } => {
            let origin = from_lat
                .zip(from_lng)
                .map(|(lat, lng)| sweekar_core::Coordinate::new(lat, lng));
            let destination = sweekar_core::Coordinate::new(to_lat, to_lng);
            println!(
                "{}",
                sweekar_core::listing::directions_url(origin, destination)
            );
        }
    }

    Ok(())
}

fn default_log_level() -> String {
    std::env::var("SWEEKAR_LOG_LEVEL").unwrap_or_else(|_| "info".to_string())
}
