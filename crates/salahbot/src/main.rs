use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::update_listeners;

use salahbot::cli::{Cli, Commands, Place};
use salahbot::telegram::{
    create_bot, error_sink_from_config, schema, setup_bot_commands, DeliveryErrorHandler, HandlerDeps,
};
use salahcore::prayer::{source_from_config, AstronomicalCalculator};
use salahcore::{
    config, create_pool, format_schedule, init_logger, CardRenderer, PrayerCardRenderer, PrayerTime,
    PrayerTimeCache, PrayerTimeSource, SqliteUserStore,
};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to the chosen subcommand.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    // .env must be loaded before any config static is read
    let _ = dotenv();

    init_logger(&config::LOG_FILE_PATH, &config::LOG_LEVEL)?;

    match cli.command {
        Some(Commands::Run) => run_bot().await,
        Some(Commands::Times { place }) => run_times(place).await,
        Some(Commands::Render { place, output }) => run_render(place, output).await,
        None => {
            log::info!("No command specified, running bot");
            run_bot().await
        }
    }
}

/// Start the bot with long polling until Ctrl+C
async fn run_bot() -> Result<()> {
    log::info!("Starting salahbot...");

    let db_pool = Arc::new(
        create_pool(&config::DATABASE_PATH).map_err(|e| anyhow::anyhow!("Failed to create database pool: {}", e))?,
    );
    let users = Arc::new(SqliteUserStore::new(db_pool));

    let source = source_from_config()?;
    log::info!("Prayer time source: {}", config::prayer::SOURCE.as_str());
    let prayer_times = Arc::new(PrayerTimeCache::from_config(source));

    let renderer = Arc::new(PrayerCardRenderer::from_config()?);
    let error_sink = error_sink_from_config(&config::HANDLER_ERRORS);

    let deps = HandlerDeps::new(users, prayer_times, renderer, error_sink);

    let bot = create_bot()?;
    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to register bot commands: {}", e);
    }

    let listener = update_listeners::polling_default(bot.clone()).await;

    let mut dispatcher = Dispatcher::builder(bot, schema(deps))
        .error_handler(LoggingErrorHandler::with_custom_text("An error has occurred in the dispatcher"))
        .enable_ctrlc_handler()
        .build();

    log::info!("Bot is running, waiting for updates");
    dispatcher
        .dispatch_with_listener(listener, Arc::new(DeliveryErrorHandler))
        .await;

    log::info!("Bot stopped");
    Ok(())
}

async fn compute_for(place: &Place) -> Result<PrayerTime> {
    let coordinates = salahcore::Coordinates::new(place.longitude, place.latitude).validate()?;
    let date = place.date.unwrap_or_else(|| coordinates.local_date());

    let source: Arc<dyn PrayerTimeSource> = if place.offline {
        Arc::new(AstronomicalCalculator::default())
    } else {
        source_from_config()?
    };

    Ok(source.fetch(date, coordinates).await?)
}

/// Print the schedule for a place
async fn run_times(place: Place) -> Result<()> {
    let times = compute_for(&place).await?;
    println!("{}", format_schedule(&times));
    Ok(())
}

/// Write the prayer-time card for a place
async fn run_render(place: Place, output: std::path::PathBuf) -> Result<()> {
    let times = compute_for(&place).await?;

    let renderer = PrayerCardRenderer::from_config()?;
    let png = tokio::task::spawn_blocking(move || renderer.render(&times)).await??;

    tokio::fs::write(&output, &png).await?;
    println!("Wrote {} bytes to {}", png.len(), output.display());
    Ok(())
}
