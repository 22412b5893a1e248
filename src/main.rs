use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use thumbsmith::ai::{FallbackRunner, GeminiClient, GeminiConceptClient};
use thumbsmith::app::Studio;
use thumbsmith::models::Config;
use thumbsmith::server::{router, AppState};
use thumbsmith::storage::{StorageClient, StorageService};
use thumbsmith::thumbnail::ThumbnailGenerator;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "thumbsmith")]
#[command(about = "Generate emotional YouTube thumbnail concepts and images")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API.
    Serve {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: SocketAddr,
    },
    /// Generate concepts and thumbnails for one title, non-interactively.
    Batch {
        /// Video title to generate for.
        #[arg(long)]
        title: String,
        /// Comma-separated concept ids to render, or "all".
        #[arg(long, default_value = "all", value_parser = parse_selection)]
        select: Selection,
        /// Directory the generated images are written to.
        #[arg(long, default_value = "output")]
        output: PathBuf,
    },
}

#[derive(Debug, Clone)]
enum Selection {
    All,
    Ids(Vec<u32>),
}

fn parse_selection(input: &str) -> std::result::Result<Selection, String> {
    if input.trim().eq_ignore_ascii_case("all") {
        return Ok(Selection::All);
    }

    input
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| format!("Invalid selection '{}'. Expected 'all' or ids like 1,3,5", input))
        })
        .collect::<std::result::Result<Vec<u32>, String>>()
        .map(Selection::Ids)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "thumbsmith=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    let config = Config::from_env()?;

    match args.command {
        Command::Serve { bind } => serve(config, bind).await,
        Command::Batch {
            title,
            select,
            output,
        } => batch(config, &title, select, &output).await,
    }
}

async fn serve(config: Config, bind: SocketAddr) -> Result<()> {
    info!("Listening on {}", bind);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    axum::serve(listener, router(AppState::new(config))).await?;
    Ok(())
}

async fn batch(config: Config, title: &str, select: Selection, output: &PathBuf) -> Result<()> {
    let api_key = config
        .gemini_api_key
        .clone()
        .ok_or_else(|| anyhow::anyhow!("GEMINI_API_KEY not set"))?;

    // Reuse one HTTP connection pool across concept and image clients.
    let gemini = Arc::new(GeminiClient::new(api_key));
    let concepts = GeminiConceptClient::new(gemini.clone(), config.idea_model.clone());
    let runner = FallbackRunner::gemini(gemini, &config.image_models);

    let storage: Option<Box<dyn StorageService>> =
        match (&config.storage_url, &config.storage_key) {
            (Some(url), Some(key)) => {
                info!("Publishing thumbnails to bucket '{}'", config.storage_bucket);
                Some(Box::new(StorageClient::new(
                    url.clone(),
                    key.clone(),
                    config.storage_bucket.clone(),
                )))
            }
            _ => {
                info!("No storage configured; images are written locally only");
                None
            }
        };

    let mut studio = Studio::new(Box::new(concepts), ThumbnailGenerator::new(runner, storage));

    let count = studio.submit_title(title).await?;
    info!("Generated {} concepts for '{}'", count, title);

    let ids: Vec<u32> = match select {
        Selection::All => studio.concepts().iter().map(|c| c.id).collect(),
        Selection::Ids(ids) => ids,
    };
    for id in ids {
        studio.toggle_concept(id);
    }

    let (succeeded, attempted) = studio.generate_selected().await?;

    std::fs::create_dir_all(output)?;
    for thumbnail in studio.thumbnails() {
        let path = output.join(format!(
            "{}_{}.jpg",
            studio.project_id(),
            thumbnail.concept.id
        ));
        std::fs::write(&path, &thumbnail.bytes)?;
        info!("Saved {}", path.display());

        if let Some(url) = &thumbnail.image_url {
            info!("Published at {}", url);
        }
    }

    if succeeded == 0 {
        error!("All {} thumbnail generations failed", attempted);
        for line in studio.debug_log() {
            error!("{}", line);
        }
        std::process::exit(1);
    }

    info!("Generated {} of {} thumbnails", succeeded, attempted);
    Ok(())
}
