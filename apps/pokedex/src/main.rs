use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use catalog_core::{CatalogApi, DetailController, HttpCatalogClient, ListController};
use clap::{Parser, Subcommand};
use shared::domain::TypeTag;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use url::Url;

mod config;
mod controller;
mod render;

use controller::{
    events::parse_intent,
    orchestration::{Flow, Session},
};

#[derive(Parser, Debug)]
#[command(name = "pokedex", about = "Browse the Pokémon catalog from the terminal")]
struct Cli {
    /// Config file; defaults to ./pokedex.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    api_base_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one page of the catalog.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        search: Option<String>,
        #[arg(long = "type")]
        type_name: Option<String>,
    },
    /// Print the type vocabulary.
    Types,
    /// Print details for one entry.
    Show { name: String },
    /// Interactive prompt (default).
    Browse,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = config::load_settings(cli.config.as_deref())?;
    if let Some(api_base_url) = cli.api_base_url {
        settings.api_base_url = api_base_url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let base_url = Url::parse(&settings.api_base_url)
        .with_context(|| format!("invalid catalog base url '{}'", settings.api_base_url))?;
    let api: Arc<dyn CatalogApi> = Arc::new(HttpCatalogClient::new(base_url));
    let list = ListController::with_page_limit(Arc::clone(&api), settings.page_limit);

    match cli.command.unwrap_or(Command::Browse) {
        Command::List {
            page,
            search,
            type_name,
        } => {
            list.initialize().await;
            if page > 1 {
                list.go_to_page_number(page).await;
            }
            if let Some(type_name) = type_name {
                list.set_type_filter(Some(TypeTag::named(type_name.to_ascii_lowercase())))
                    .await;
            }
            if let Some(search) = search {
                list.set_search_text(&search).await;
            }
            print!(
                "{}",
                render::render_list(&list.snapshot().await, &settings.artwork_url_template)
            );
        }
        Command::Types => {
            list.initialize().await;
            let snapshot = list.snapshot().await;
            print!(
                "{}",
                render::render_type_selector(
                    &snapshot.type_vocabulary,
                    snapshot.filter.type_filter.as_ref()
                )
            );
        }
        Command::Show { name } => {
            let detail = DetailController::new(api, name.to_ascii_lowercase());
            let state = detail.load().await;
            print!("{}", render::render_detail(detail.name(), &state));
        }
        Command::Browse => {
            list.initialize().await;
            let session = Session {
                api,
                list,
                artwork_url_template: settings.artwork_url_template,
            };
            browse(&session).await?;
        }
    }

    Ok(())
}

async fn browse(session: &Session) -> Result<()> {
    print!("{}", session.render_list().await);
    println!("type 'help' for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let intent = match parse_intent(&line) {
            Ok(intent) => intent,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match session.dispatch(intent).await {
            Flow::Render(text) => print!("{text}"),
            Flow::Quit => break,
        }
    }

    tracing::info!("browse session closed");
    Ok(())
}
