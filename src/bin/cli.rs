use clap::{Parser, Subcommand};
use std::path::PathBuf;
use swapi_finder::core::FieldValue;
use swapi_finder::{Category, FinderConfig, LookupEngine, SearchResponse, Selection};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "swapi-finder")]
#[command(about = "Search and inspect SWAPI people, planets and starships", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// YAML configuration file (SWAPI_* environment variables still apply)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fuzzy search every category
    Search {
        /// Search query
        query: String,

        /// Maximum results per category
        #[arg(short = 'n', long)]
        max_results: Option<usize>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List every indexed record
    List {
        /// Only this category
        #[arg(short, long)]
        category: Option<Category>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Fetch details for one or more ids of a category
    Show {
        /// people, planets or starships
        category: Category,

        /// Catalog ids
        #[arg(required = true)]
        ids: Vec<i64>,

        /// Requests in flight at once
        #[arg(long)]
        concurrency: Option<usize>,
    },
}

fn print_response(response: &SearchResponse, only: Option<Category>) {
    for block in &response.results {
        if only.is_some_and(|c| c != block.category) {
            continue;
        }

        println!("\n📋 {} ({}):", block.category, block.entries.len());
        for entry in &block.entries {
            if entry.is_scored() {
                println!("   {}  (distance {})", entry, entry.score);
            } else {
                println!("   {}", entry);
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swapi_finder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => FinderConfig::from_yaml_file(path)?.with_env_overrides()?,
        None => FinderConfig::from_env()?,
    };

    match cli.command {
        Commands::Search {
            query,
            max_results,
            json,
        } => {
            if let Some(n) = max_results {
                config.max_results = n;
            }
            let engine = LookupEngine::from_config(&config)?;
            let response = engine.search(&query)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else if response.is_empty() {
                println!("🔍 Nothing to show for: {:?}", query);
            } else {
                println!("🔍 Searching for: {}", query);
                print_response(&response, None);
                println!("\n   Latency: {:.2}ms", response.latency_ms);
            }
        }

        Commands::List { category, json } => {
            let engine = LookupEngine::from_config(&config)?;
            let mut response = engine.list_all()?;
            if let Some(only) = category {
                response.results.retain(|block| block.category == only);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print_response(&response, category);
            }
        }

        Commands::Show {
            category,
            ids,
            concurrency,
        } => {
            if let Some(n) = concurrency {
                config.concurrency = n;
            }
            let engine = LookupEngine::from_config(&config)?;
            let selections: Vec<Selection> =
                ids.iter().map(|&id| Selection::new(category, id)).collect();

            // Ctrl-C turns every unfinished fetch into a Cancelled outcome
            let token = CancellationToken::new();
            let canceller = token.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    canceller.cancel();
                }
            });
            let outcomes = engine.open_selected_until(&selections, &token).await;

            let mut failures = 0;
            for outcome in outcomes {
                match outcome.result {
                    Ok(record) => {
                        println!("\n✅ {}", record.title());
                        for field in record.fields() {
                            match field.value {
                                FieldValue::Text(value) => println!("   {}: {}", field.label, value),
                                FieldValue::List(items) => {
                                    println!("   {}:", field.label);
                                    for item in items {
                                        println!("     • {}", item);
                                    }
                                }
                            }
                        }
                    }
                    Err(e) => {
                        failures += 1;
                        println!(
                            "\n❌ {} {}: {}",
                            outcome.selection.category.singular(),
                            outcome.selection.id,
                            e
                        );
                    }
                }
            }

            if failures > 0 {
                anyhow::bail!("{} of {} lookups failed", failures, selections.len());
            }
        }
    }

    Ok(())
}
