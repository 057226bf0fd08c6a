use anyhow::{bail, Result};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use garden_client::cli::{Cli, Commands};
use garden_client::view;
use garden_client::{HttpPlantsApi, PlantsState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,garden_client=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let state = PlantsState::mount(HttpPlantsApi::new(&cli.api_url)).await;

    if let Some(message) = state.error() {
        eprintln!("{}", view::error_banner(&message));
        bail!("could not load plants from {}", cli.api_url);
    }

    let now = Utc::now();
    match cli.command {
        Commands::List { search } => {
            let term = search.unwrap_or_default();
            println!("{}", view::render_list(&state.plants(), &term, now));
        }
        Commands::Show { id } => match state.find(id) {
            Some(plant) => println!("{}", view::render_card(&plant, now)),
            None => bail!("no plant with id {id}"),
        },
        Commands::Add(args) => {
            let plant = state.add_plant(args.into()).await?;
            println!("Added plant #{}", plant.id);
            println!("{}", view::render_card(&plant, now));
        }
        Commands::Update(args) => {
            let (id, patch) = args.into_patch();
            let plant = state.update_plant(id, patch).await?;
            println!("{}", view::render_card(&plant, now));
        }
        Commands::Water { id } => {
            let plant = state.water_plant(id).await?;
            println!("Watered {}", plant.name);
        }
        Commands::Remove { id } => {
            state.delete_plant(id).await?;
            println!("Plant #{id} removed");
        }
    }

    Ok(())
}
