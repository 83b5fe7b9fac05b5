use anyhow::Context as _;
use std::env;

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub database_url: String,
    pub adzuna_app_id: String,
    pub adzuna_app_key: String,
    pub geocode_api_key: String,
    /// Channel where public reminders and DM-failure fallbacks are posted.
    pub notify_channel_id: u64,
    pub smtp: Option<SmtpConfig>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let notify_channel_id = env::var("NOTIFY_CHANNEL_ID")
            .context("'NOTIFY_CHANNEL_ID' was not found")?
            .parse::<u64>()
            .context("'NOTIFY_CHANNEL_ID' must be a channel id")?;

        // Email delivery is optional; it stays off unless the whole relay
        // configuration is present.
        let smtp = match (
            env::var("SMTP_HOST"),
            env::var("SMTP_USERNAME"),
            env::var("SMTP_PASSWORD"),
            env::var("SMTP_FROM"),
        ) {
            (Ok(host), Ok(username), Ok(password), Ok(from)) => Some(SmtpConfig {
                host,
                username,
                password,
                from,
            }),
            _ => None,
        };

        Ok(Config {
            discord_token: env::var("DISCORD_TOKEN").context("'DISCORD_TOKEN' was not found")?,
            database_url: env::var("DATABASE_URL").context("'DATABASE_URL' was not found")?,
            adzuna_app_id: env::var("ADZUNA_APP_ID").context("'ADZUNA_APP_ID' was not found")?,
            adzuna_app_key: env::var("ADZUNA_APP_KEY")
                .context("'ADZUNA_APP_KEY' was not found")?,
            geocode_api_key: env::var("GEOCODE_API_KEY")
                .context("'GEOCODE_API_KEY' was not found")?,
            notify_channel_id,
            smtp,
        })
    }
}
