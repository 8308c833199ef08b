use clap::Parser;
use std::sync::Arc;

use villagetrace_app::{
    config::Config,
    cqrs::{QueryHandler, queries::ReconstructVillage},
    queries_handlers::ReconstructVillageHandler,
};
use villagetrace_data::FileDataSources;
use villagetrace_types::Result;

mod args;
mod logs;
mod output;

use args::Args;
use logs::setup_logging;

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = setup_logging();

    let config = Arc::new(Config::from_env()?);
    let sources = FileDataSources::new(&config);

    let query = ReconstructVillage {
        world: args.world.clone(),
        village_id: args.village_id,
    };
    let reconstruction = match ReconstructVillageHandler::new()
        .handle(query, &sources, &config)
        .await
    {
        Ok(reconstruction) => reconstruction,
        Err(e) => {
            tracing::error!(
                world = %args.world,
                village_id = args.village_id,
                "Reconstruction failed: {e}"
            );
            return Err(e);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reconstruction)?);
    } else {
        let limit = args.limit.unwrap_or(config.display_limit);
        print!("{}", output::render(&reconstruction, limit));
    }

    Ok(())
}
