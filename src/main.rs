//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use log::error;
use r6s_stats::{
    cli::{Commands, R6s},
    commands::{
        assets::handle_asset,
        bind::{handle_bind, handle_unbind},
        common::CommandContext,
        lookup::{handle_lookup, LookupParams},
        sources::handle_sources,
    },
    config::Settings,
    Result,
};

async fn run(app: R6s) -> Result<()> {
    let ctx = CommandContext::new(Settings::from_env()?)?;

    match app.command {
        Commands::Lookup {
            name,
            platform,
            kind,
            source,
            user,
            json,
        } => {
            handle_lookup(
                &ctx,
                LookupParams {
                    name,
                    platform,
                    kind,
                    source,
                    user,
                    as_json: json,
                },
            )
            .await?
        }
        Commands::Bind { user, name } => handle_bind(&ctx, user, name)?,
        Commands::Unbind { user } => handle_unbind(&ctx, user)?,
        Commands::Sources { json } => handle_sources(&ctx, json)?,
        Commands::Asset { kind, name, url } => handle_asset(&ctx, kind, name, url).await?,
    }

    Ok(())
}

/// Run the CLI.
#[tokio::main]
async fn main() {
    // A missing .env file is fine; the environment may already be set.
    let _ = dotenvy::dotenv();
    sensible_env_logger::init!();

    let app = R6s::parse();
    if let Err(err) = run(app).await {
        error!("{err}");
        eprintln!("Error: {}", err.category().user_message());
        std::process::exit(1);
    }
}
