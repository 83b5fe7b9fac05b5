use std::sync::Arc;

use anyhow::Context as _;
use serenity::http::Http;
use serenity::model::id::ChannelId;
use serenity::prelude::*;
use tracing::error;
use tracing_subscriber::EnvFilter;

use job_scout::adzuna::{AdzunaClient, ADZUNA_API_URL};
use job_scout::bot::Bot;
use job_scout::config::Config;
use job_scout::dispatch::Dispatcher;
use job_scout::geocode::{GeocodeClient, GEOCODE_API_URL};
use job_scout::mailer::Mailer;
use job_scout::scheduler::start_scheduler;

/// **Main function that initializes the bot**
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    // Connect to the database and bring the schema up to date
    let connection = sqlx::PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to the database")?;
    sqlx::migrate!("./migrations")
        .run(&connection)
        .await
        .context("Failed to run database migrations")?;

    let adzuna = AdzunaClient::new(
        ADZUNA_API_URL,
        config.adzuna_app_id.clone(),
        config.adzuna_app_key.clone(),
    );
    let geocoder = GeocodeClient::new(GEOCODE_API_URL, config.geocode_api_key.clone());
    let mailer = match &config.smtp {
        Some(smtp) => Some(Mailer::new(
            &smtp.host,
            smtp.username.clone(),
            smtp.password.clone(),
            &smtp.from,
        )?),
        None => None,
    };

    // Start the background reminder dispatch loop
    let dispatcher = Arc::new(Dispatcher {
        pool: connection.clone(),
        http: Arc::new(Http::new(&config.discord_token)),
        adzuna: adzuna.clone(),
        geocoder: geocoder.clone(),
        mailer: mailer.clone(),
        notify_channel: ChannelId::new(config.notify_channel_id),
    });
    let _scheduler = tokio::spawn(async move {
        if let Err(e) = start_scheduler(dispatcher).await {
            error!("Failed to start scheduler: {:?}", e);
        }
    });

    // Configure Discord bot with event handlers
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::DIRECT_MESSAGES;

    let bot = Bot {
        database: connection,
        adzuna,
        geocoder,
        mailer,
    };

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(bot)
        .await
        .context("Error creating client")?;

    // Start the bot
    client.start().await.context("Client error")?;
    Ok(())
}
