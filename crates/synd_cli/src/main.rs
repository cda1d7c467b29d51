use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use synd_core::{ContentStore, Result};
use synd_fetchers::{Aggregator, LinkedInFetcher, Origin, WordPressFetcher};
use synd_web::{AppState, PublishPolicy};

#[derive(Parser, Debug)]
#[command(author, version, about = "Content aggregation and publication service", long_about = None)]
struct Cli {
    /// Storage backend: json (file-backed) or memory
    #[arg(long, default_value = "json")]
    storage: String,

    /// Path of the JSON store document
    #[arg(long, default_value = "content-store.json")]
    store_path: PathBuf,

    /// Cap on the published view; unset leaves it unbounded
    #[arg(long)]
    max_published: Option<usize>,

    /// WordPress site base URL, e.g. https://blog.example.com
    #[arg(long)]
    wordpress_url: Option<String>,

    /// LinkedIn profile slug whose recent activity is scraped
    #[arg(long)]
    linkedin_profile: Option<String>,

    /// Author name stamped on fetched content and allowed by the public
    /// read policy
    #[arg(long, default_value = "Jane Doe")]
    author: String,

    /// Categories excluded from the public feed
    #[arg(long, default_value = "Tips")]
    exclude_category: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long, default_value = "0.0.0.0:3000")]
        bind: String,
    },
    /// Fetch every source once and republish
    Refresh,
    /// Print the published set
    List,
    /// Wipe the store and delete its backing file
    Clear,
}

fn build_fetchers(cli: &Cli, aggregator: &mut Aggregator) {
    if let Some(profile) = &cli.linkedin_profile {
        aggregator.add_fetcher(Arc::new(LinkedInFetcher::new(
            profile.clone(),
            cli.author.clone(),
        )));
    }
    if let Some(base_url) = &cli.wordpress_url {
        aggregator.add_fetcher(Arc::new(WordPressFetcher::new(
            base_url.clone(),
            cli.author.clone(),
        )));
    }
}

async fn run_refresh(aggregator: &Aggregator) -> Result<()> {
    let result = aggregator.refresh().await?;
    for report in &result.sources {
        let emoji = match report.origin {
            Origin::Live => "✅",
            Origin::Fallback => "⚠️",
        };
        println!(
            "{} {}: {} articles ({:?})",
            emoji,
            report.source,
            report.count,
            report.origin
        );
    }
    println!("Published {} articles", result.total);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let store: Arc<dyn ContentStore> = synd_store::create_store(
        cli.storage.as_str(),
        cli.store_path.clone(),
        cli.max_published,
    )
    .await?;
    info!("💾 Content store initialized (using {})", cli.storage);

    let mut aggregator = Aggregator::new(store.clone());
    build_fetchers(&cli, &mut aggregator);
    let sources: Vec<String> = aggregator
        .sources()
        .iter()
        .map(|s| s.to_string())
        .collect();
    if sources.is_empty() {
        info!("📡 No source fetchers configured");
    } else {
        info!("📡 Source fetchers initialized: {}", sources.join(", "));
    }
    let aggregator = Arc::new(aggregator);

    match cli.command {
        Commands::Serve { bind } => {
            let policy = PublishPolicy {
                author: Some(cli.author.clone()),
                excluded_categories: cli.exclude_category.clone(),
            };
            let app = synd_web::create_app(AppState {
                store,
                aggregator,
                policy,
            });
            let listener = tokio::net::TcpListener::bind(&bind).await?;
            info!("🌐 Listening on {}", bind);
            axum::serve(listener, app).await?;
        }
        Commands::Refresh => {
            run_refresh(&aggregator).await?;
        }
        Commands::List => {
            let published = store.get_published().await?;
            println!("{} published articles", published.len());
            for article in published {
                println!(
                    "- [{}] {} ({}, {})",
                    article.source, article.title, article.date, article.read_time
                );
            }
        }
        Commands::Clear => {
            store.purge().await?;
            info!("🧹 Content store cleared");
        }
    }

    Ok(())
}
