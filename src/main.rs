use clap::Parser;
use sitesearch::cli::{Cli, Commands};
use sitesearch::config::Config;
use sitesearch::search::SearchService;
use sitesearch::sources::SourceStore;
use sitesearch::{content, logging, render};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search(opts) => {
            let config = Config::load(opts.config.as_deref())?;
            let service = SearchService::new(SourceStore::new(config)?);
            let outcome = service.search(&opts.query).await;

            if opts.json {
                println!("{}", serde_json::to_string_pretty(&outcome.results)?);
            } else if opts.html {
                println!("{}", render::render_results(&outcome.results));
            } else {
                if outcome.results.is_empty() {
                    println!("No results.");
                }
                for result in &outcome.results {
                    println!("[{}] {} ({})", result.kind, result.title, result.url);
                    if let Some(excerpt) = &result.excerpt {
                        println!("    {excerpt}");
                    }
                }
            }
        }
        Commands::Posts(opts) => {
            let config = Config::load(opts.config.as_deref())?;
            let store = SourceStore::new(config)?;
            let posts = match opts.latest_count() {
                Some(n) => content::latest_posts(&store, n).await,
                None => {
                    content::filter_posts(
                        &store,
                        opts.filter.as_deref().unwrap_or(""),
                        opts.section.as_deref().unwrap_or(""),
                    )
                    .await
                }
            };

            if opts.html {
                for post in &posts {
                    println!("{}", render::render_post_card(post));
                }
            } else {
                for post in &posts {
                    println!("{} | {} | {} | {}", post.id, post.section, post.date, post.title);
                }
            }
        }
        Commands::Memos(opts) => {
            let config = Config::load(opts.config.as_deref())?;
            let store = SourceStore::new(config)?;
            let memos = content::filter_memos(&store, opts.filter.as_deref().unwrap_or("")).await;

            if opts.html {
                for memo in &memos {
                    println!("{}", render::render_memo_card(memo));
                }
            } else {
                for memo in &memos {
                    println!("{} | {}", memo.date, memo.title);
                }
            }
        }
        Commands::Events(opts) => {
            let config = Config::load(opts.config.as_deref())?;
            let store = SourceStore::new(config)?;
            let events = content::events(&store).await;

            if opts.html {
                println!("{}", render::render_event_items(&events));
            } else {
                for event in &events {
                    println!(
                        "{} | {} | {}",
                        event.date,
                        event.title,
                        event.location.as_deref().unwrap_or("")
                    );
                }
            }
        }
        Commands::Config(opts) => {
            let config = Config::load(opts.config.as_deref())?;
            match opts.action {
                sitesearch::cli::ConfigAction::Show => {
                    println!("{}", serde_json::to_string_pretty(&config)?);
                }
                sitesearch::cli::ConfigAction::Validate => {
                    sitesearch::config::validate_config_object(&config)?;
                    info!("Configuration is valid");
                }
                sitesearch::cli::ConfigAction::Init => {
                    Config::write_default(opts.config.as_deref().unwrap_or("sitesearch.json"))?;
                    info!("Configuration file created");
                }
            }
        }
        Commands::Version => {
            println!("sitesearch {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
