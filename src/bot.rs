use std::time::Duration;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use serenity::async_trait;
use serenity::builder::{
    CreateAttachment, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, CreateMessage,
};
use serenity::collector::{ComponentInteractionCollector, MessageCollector};
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tracing::{error, info};
use uuid::Uuid;

use crate::adzuna::{AdzunaClient, SearchQuery, SortPreference};
use crate::compose;
use crate::database::db::{self, DeliveryMode, Reminder, ReminderKind, Repeat};
use crate::geocode::GeocodeClient;
use crate::mailer::{is_valid_email, Mailer};
use crate::pdf;
use crate::preferences::FormAnswers;

const FORM_TIMEOUT: Duration = Duration::from_secs(60);
const PAGINATION_TIMEOUT: Duration = Duration::from_secs(120);

const NO_PREFERENCES: &str =
    "You haven't filled out the job form yet! Use `!jobform` to set your preferences.";

const HELP: &str = "**Job commands**\n\
    `!jobform` — fill out (or update) your job preferences\n\
    `!viewpreferences` — show your stored preferences\n\
    `!deletepreferences` — delete your stored preferences\n\
    `!jobs [date|salary|alphabetical|distance]` — browse listings for your preferences\n\
    `!remind <duration> [daily|weekly] [public|private] <content>` — set a reminder\n\
    `!jobalert <duration> <daily|weekly> [filter] [email:<address>]` — repeating job alert by DM\n\
    `!reminders` — list your reminders\n\
    `!cancelreminder <number>` — cancel one by its number in the list\n\
    `!emailtest <address>` — send a test email through the relay";

/// Struct representing the bot, including a database pool, API clients,
/// and the optional email relay.
pub struct Bot {
    pub database: sqlx::PgPool,
    pub adzuna: AdzunaClient,
    pub geocoder: GeocodeClient,
    pub mailer: Option<Mailer>,
}

#[async_trait]
impl EventHandler for Bot {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let args: Vec<&str> = msg.content.split_whitespace().collect();
        if args.is_empty() {
            return;
        }

        match args[0] {
            "!jobform" => self.handle_jobform(&ctx, &msg).await,
            "!viewpreferences" => self.handle_view_preferences(&ctx, &msg).await,
            "!deletepreferences" => self.handle_delete_preferences(&ctx, &msg).await,
            "!jobs" => self.handle_jobs(&ctx, &msg, args.get(1).copied()).await,
            "!remind" => self.handle_remind(&ctx, &msg, &args[1..]).await,
            "!jobalert" => self.handle_jobalert(&ctx, &msg, &args[1..]).await,
            "!reminders" => self.handle_list_reminders(&ctx, &msg).await,
            "!cancelreminder" => self.handle_cancel_reminder(&ctx, &msg, args.get(1).copied()).await,
            "!emailtest" => self.handle_emailtest(&ctx, &msg, args.get(1).copied()).await,
            "!jobhelp" => {
                if let Err(e) = msg.channel_id.say(&ctx.http, HELP).await {
                    error!("Error sending help message: {:?}", e);
                }
            }
            _ => {}
        }
    }

    async fn ready(&self, _: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);
    }
}

impl Bot {
    /// Prompts the author with `question` and waits for their next message
    /// in the same channel.
    async fn ask(&self, ctx: &Context, msg: &Message, question: &str) -> Option<String> {
        if let Err(e) = msg.channel_id.say(&ctx.http, question).await {
            error!("Error sending form question: {:?}", e);
            return None;
        }

        let collector = MessageCollector::new(ctx)
            .channel_id(msg.channel_id)
            .author_id(msg.author.id)
            .timeout(FORM_TIMEOUT);

        collector.next().await.map(|reply| reply.content.trim().to_string())
    }

    /// Handles `!jobform`: a short Q&A where "skip" keeps whatever is
    /// already stored for that question.
    pub async fn handle_jobform(&self, ctx: &Context, msg: &Message) {
        let questions = [
            "What city do you want to work in? (answer `skip` to keep your current answer)",
            "What work type do you prefer? remote, hybrid, and/or in person — comma-separated, or `all`. (`skip` to keep)",
            "What employment type? full time, part time, and/or internship — comma-separated, or `all`. (`skip` to keep)",
            "How many miles are you willing to travel? (`skip` to keep)",
            "List your interests, comma-separated — e.g. `software, finance, biology`. (`skip` to keep)",
        ];

        let mut replies = Vec::with_capacity(questions.len());
        for question in questions {
            let Some(reply) = self.ask(ctx, msg, question).await else {
                let _ = msg.channel_id.say(
                    &ctx.http,
                    "No answer received. Run `!jobform` again when you're ready.",
                ).await;
                return;
            };
            replies.push(reply);
        }

        let keep = |answer: &String| -> Option<String> {
            let trimmed = answer.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("skip") {
                None
            } else {
                Some(trimmed.to_string())
            }
        };

        let interests = match keep(&replies[4]) {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|i| !i.is_empty())
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        };

        let answers = FormAnswers {
            city: keep(&replies[0]),
            work_type: keep(&replies[1]),
            employment_type: keep(&replies[2]),
            travel_distance: keep(&replies[3]),
            interests,
        };

        let errors = crate::preferences::validate_answers(&answers);
        if !errors.is_empty() {
            let _ = msg.channel_id.say(
                &ctx.http,
                format!("I couldn't save that:\n{}", errors.join("\n")),
            ).await;
            return;
        }

        let discord_id = msg.author.id.get() as i64;
        if let Err(e) = db::upsert_preferences(&self.database, discord_id, &answers).await {
            error!("Failed to store job preferences: {:?}", e);
            let _ = msg.channel_id.say(
                &ctx.http,
                "Failed to save your preferences. Please try again later.",
            ).await;
            return;
        }

        let _ = msg.channel_id.say(
            &ctx.http,
            "Your job preferences are saved! Use `!jobs` to browse listings or `!jobalert` for a repeating digest.",
        ).await;
    }

    pub async fn handle_view_preferences(&self, ctx: &Context, msg: &Message) {
        let discord_id = msg.author.id.get() as i64;
        match db::get_preferences(&self.database, discord_id).await {
            Ok(Some(prefs)) => {
                let unset = || "Not set".to_string();
                let interests = if prefs.interests.is_empty() {
                    "None yet".to_string()
                } else {
                    prefs.interests.join(", ")
                };
                let response = format!(
                    "**Your job preferences**\n\
                     City: {}\nWork type: {}\nEmployment type: {}\nTravel distance: {}\n\
                     Interests: {}",
                    prefs.city.unwrap_or_else(unset),
                    prefs.work_type.unwrap_or_else(unset),
                    prefs.employment_type.unwrap_or_else(unset),
                    prefs.travel_distance.unwrap_or_else(unset),
                    interests,
                );
                let _ = msg.channel_id.say(&ctx.http, response).await;
            }
            Ok(None) => {
                let _ = msg.channel_id.say(&ctx.http, NO_PREFERENCES).await;
            }
            Err(e) => {
                error!("Database error fetching preferences: {:?}", e);
                let _ = msg.channel_id.say(&ctx.http, "Database error. Please try again later.").await;
            }
        }
    }

    pub async fn handle_delete_preferences(&self, ctx: &Context, msg: &Message) {
        let discord_id = msg.author.id.get() as i64;
        match db::delete_preferences(&self.database, discord_id).await {
            Ok(true) => {
                let _ = msg.channel_id.say(&ctx.http, "Your job preferences were deleted.").await;
            }
            Ok(false) => {
                let _ = msg.channel_id.say(&ctx.http, NO_PREFERENCES).await;
            }
            Err(e) => {
                error!("Database error deleting preferences: {:?}", e);
                let _ = msg.channel_id.say(&ctx.http, "Database error. Please try again later.").await;
            }
        }
    }

    /// Handles `!jobs [filter]`: fetches listings for the author's stored
    /// preferences and shows them as a paginated card with buttons.
    pub async fn handle_jobs(&self, ctx: &Context, msg: &Message, filter: Option<&str>) {
        let sort = match filter {
            None => SortPreference::Default,
            Some(token) => match SortPreference::parse(token) {
                Some(sort) => sort,
                None => {
                    let _ = msg.channel_id.say(
                        &ctx.http,
                        format!(
                            "**{token}** is not a valid filter. Use date, salary, alphabetical, or distance."
                        ),
                    ).await;
                    return;
                }
            },
        };

        let discord_id = msg.author.id.get() as i64;
        let prefs = match db::get_preferences(&self.database, discord_id).await {
            Ok(Some(prefs)) => prefs,
            Ok(None) => {
                let _ = msg.channel_id.say(&ctx.http, NO_PREFERENCES).await;
                return;
            }
            Err(e) => {
                error!("Database error fetching preferences: {:?}", e);
                let _ = msg.channel_id.say(&ctx.http, "Database error. Please try again later.").await;
                return;
            }
        };

        let query = SearchQuery::from_preferences(&prefs, sort);
        let mut listings = match self.adzuna.search(&query).await {
            Ok(listings) => listings,
            Err(e) => {
                error!("Error fetching job listings: {:?}", e);
                let _ = msg.channel_id.say(
                    &ctx.http,
                    "Error retrieving job listings. Please try again later.",
                ).await;
                return;
            }
        };

        if listings.is_empty() {
            let _ = msg.channel_id.say(&ctx.http, compose::NO_JOBS_MESSAGE).await;
            return;
        }

        match self.geocoder.locate_city(&query.city()).await {
            Ok(Some(origin)) => compose::apply_distances(&mut listings, origin),
            Ok(None) => {
                if sort == SortPreference::Distance {
                    let _ = msg.channel_id.say(
                        &ctx.http,
                        format!(
                            "I couldn't find coordinates for **{}**, so listings are shown unsorted. \
                             Update your city with `!jobform` for distance sorting.",
                            query.city()
                        ),
                    ).await;
                }
            }
            Err(e) => {
                error!("Error geocoding city: {:?}", e);
                let _ = msg.channel_id.say(
                    &ctx.http,
                    "Error retrieving job listings. Please try again later.",
                ).await;
                return;
            }
        }
        compose::sort_listings(&mut listings, sort);

        self.paginate_listings(ctx, msg, listings, &query).await;
    }

    /// Runs the interactive card session: Previous/Next wrap circularly,
    /// Remove drops the current card, Download replies with the PDF.
    async fn paginate_listings(
        &self,
        ctx: &Context,
        msg: &Message,
        mut listings: Vec<crate::adzuna::JobListing>,
        query: &SearchQuery,
    ) {
        let (embed, row) = compose::job_card(&listings[0], 0, listings.len());
        let card = match msg
            .channel_id
            .send_message(
                &ctx.http,
                CreateMessage::new().embed(embed).components(vec![row]),
            )
            .await
        {
            Ok(card) => card,
            Err(e) => {
                error!("Error sending job card: {:?}", e);
                return;
            }
        };

        let mut index = 0usize;
        loop {
            let collector = ComponentInteractionCollector::new(ctx)
                .message_id(card.id)
                .timeout(PAGINATION_TIMEOUT);

            let Some(interaction) = collector.next().await else {
                // session expired; leave the card as-is
                break;
            };

            if interaction.user.id != msg.author.id {
                let _ = interaction
                    .create_response(
                        &ctx.http,
                        CreateInteractionResponse::Message(
                            CreateInteractionResponseMessage::new()
                                .content("This is not your interaction!")
                                .ephemeral(true),
                        ),
                    )
                    .await;
                continue;
            }

            match interaction.data.custom_id.as_str() {
                "previous" => {
                    index = if index == 0 { listings.len() - 1 } else { index - 1 };
                }
                "next" => {
                    index = (index + 1) % listings.len();
                }
                "remove" => {
                    listings.remove(index);
                    if listings.is_empty() {
                        let _ = interaction
                            .create_response(
                                &ctx.http,
                                CreateInteractionResponse::UpdateMessage(
                                    CreateInteractionResponseMessage::new()
                                        .content("No more jobs to display.")
                                        .embeds(Vec::new())
                                        .components(Vec::new()),
                                ),
                            )
                            .await;
                        return;
                    }
                    if index >= listings.len() {
                        index = 0;
                    }
                }
                "download" => {
                    let _ = interaction
                        .create_response(
                            &ctx.http,
                            CreateInteractionResponse::Defer(
                                CreateInteractionResponseMessage::new().ephemeral(true),
                            ),
                        )
                        .await;
                    self.send_pdf(ctx, &interaction, &listings, query).await;
                    continue;
                }
                _ => continue,
            }

            let (embed, row) = compose::job_card(&listings[index], index, listings.len());
            let _ = interaction
                .create_response(
                    &ctx.http,
                    CreateInteractionResponse::UpdateMessage(
                        CreateInteractionResponseMessage::new()
                            .embed(embed)
                            .components(vec![row]),
                    ),
                )
                .await;
        }
    }

    async fn send_pdf(
        &self,
        ctx: &Context,
        interaction: &serenity::model::application::ComponentInteraction,
        listings: &[crate::adzuna::JobListing],
        query: &SearchQuery,
    ) {
        // one histogram lookup per listing; a failed lookup just drops the
        // chart for that listing
        let mut histograms = Vec::with_capacity(listings.len());
        for job in listings {
            histograms.push(self.adzuna.salary_histogram(&job.title).await.ok());
        }

        let followup = match pdf::render_jobs_pdf(listings, &query.city(), &histograms) {
            Ok(bytes) => CreateInteractionResponseFollowup::new()
                .content("Here is your PDF file with all job listings:")
                .add_file(CreateAttachment::bytes(bytes, "jobs.pdf"))
                .ephemeral(true),
            Err(e) => {
                error!("Error generating PDF: {:?}", e);
                CreateInteractionResponseFollowup::new()
                    .content("An error occurred while generating the PDF. Please try again later.")
                    .ephemeral(true)
            }
        };
        if let Err(e) = interaction.create_followup(&ctx.http, followup).await {
            error!("Error sending PDF follow-up: {:?}", e);
        }
    }

    pub async fn handle_remind(&self, ctx: &Context, msg: &Message, args: &[&str]) {
        let request = match parse_remind(args) {
            Ok(request) => request,
            Err(message) => {
                let _ = msg.channel_id.say(&ctx.http, message).await;
                return;
            }
        };

        let expires = Utc::now()
            + chrono::Duration::from_std(request.duration).unwrap_or(chrono::Duration::zero());
        let reminder = Reminder {
            id: Uuid::new_v4(),
            owner: msg.author.id.get() as i64,
            kind: ReminderKind::Custom,
            content: request.content,
            expires,
            repeat: request.repeat,
            mode: request.mode,
            filter_by: None,
            email: None,
            status: db::ReminderStatus::Scheduled,
        };

        if let Err(e) = db::insert_reminder(&self.database, &reminder).await {
            error!("Database error inserting reminder: {:?}", e);
            let _ = msg.channel_id.say(&ctx.http, "Failed to save your reminder. Please try again later.").await;
            return;
        }

        let _ = msg.channel_id.say(
            &ctx.http,
            format!("I'll remind you about that at {}.", format_reminder_time(expires)),
        ).await;
    }

    pub async fn handle_jobalert(&self, ctx: &Context, msg: &Message, args: &[&str]) {
        let request = match parse_jobalert(args) {
            Ok(request) => request,
            Err(message) => {
                let _ = msg.channel_id.say(&ctx.http, message).await;
                return;
            }
        };

        let discord_id = msg.author.id.get() as i64;
        match db::get_preferences(&self.database, discord_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                let _ = msg.channel_id.say(&ctx.http, NO_PREFERENCES).await;
                return;
            }
            Err(e) => {
                error!("Database error fetching preferences: {:?}", e);
                let _ = msg.channel_id.say(&ctx.http, "Database error. Please try again later.").await;
                return;
            }
        }

        let expires = Utc::now()
            + chrono::Duration::from_std(request.duration).unwrap_or(chrono::Duration::zero());
        let reminder = Reminder {
            id: Uuid::new_v4(),
            owner: discord_id,
            kind: ReminderKind::JobAlert,
            content: "Job listing digest".to_string(),
            expires,
            repeat: request.repeat,
            mode: DeliveryMode::Private,
            filter_by: Some(request.filter),
            email: request.email.clone(),
            status: db::ReminderStatus::Scheduled,
        };

        let replaced = match db::replace_job_alert(&self.database, &reminder).await {
            Ok(replaced) => replaced,
            Err(e) => {
                error!("Database error inserting job alert: {:?}", e);
                let _ = msg.channel_id.say(&ctx.http, "Failed to save your job alert. Please try again later.").await;
                return;
            }
        };

        let mut response = format!(
            "I'll DM you job opportunities **{}** starting at {}, sorted by **{}**.",
            match request.repeat {
                Repeat::Daily => "daily",
                Repeat::Weekly => "weekly",
                Repeat::None => "once",
            },
            format_reminder_time(expires),
            request.filter.as_str(),
        );
        if let Some(address) = &request.email {
            response.push_str(&format!(" You'll also get a copy at **{address}**."));
        }
        if replaced {
            response.push_str(" (Your previous job alert was replaced.)");
        }
        let _ = msg.channel_id.say(&ctx.http, response).await;
    }

    pub async fn handle_list_reminders(&self, ctx: &Context, msg: &Message) {
        let owner = msg.author.id.get() as i64;
        let reminders = match db::reminders_for_owner(&self.database, owner).await {
            Ok(reminders) => reminders,
            Err(e) => {
                error!("Database error listing reminders: {:?}", e);
                let _ = msg.channel_id.say(&ctx.http, "Database error. Please try again later.").await;
                return;
            }
        };

        if reminders.is_empty() {
            let _ = msg.channel_id.say(&ctx.http, "You don't have any reminders set.").await;
            return;
        }

        let lines = reminders
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let icon = match r.kind {
                    ReminderKind::JobAlert => "💼",
                    ReminderKind::Custom => "📌",
                };
                let email = if r.email.is_some() { " ✉️" } else { "" };
                let repeat = match r.repeat {
                    Repeat::None => "",
                    Repeat::Daily => ", repeats daily",
                    Repeat::Weekly => ", repeats weekly",
                };
                format!(
                    "{}. {icon}{email} **{}** — due {}{repeat}",
                    i + 1,
                    r.content,
                    format_reminder_time(r.expires),
                )
            })
            .join("\n");
        let _ = msg.channel_id.say(&ctx.http, format!("**Your reminders**\n{lines}")).await;
    }

    pub async fn handle_cancel_reminder(&self, ctx: &Context, msg: &Message, arg: Option<&str>) {
        let Some(number) = arg.and_then(|a| a.parse::<usize>().ok()).filter(|n| *n > 0) else {
            let _ = msg.channel_id.say(
                &ctx.http,
                "Please give the number of the reminder to cancel, as shown by `!reminders`.",
            ).await;
            return;
        };

        let owner = msg.author.id.get() as i64;
        let reminders = match db::reminders_for_owner(&self.database, owner).await {
            Ok(reminders) => reminders,
            Err(e) => {
                error!("Database error listing reminders: {:?}", e);
                let _ = msg.channel_id.say(&ctx.http, "Database error. Please try again later.").await;
                return;
            }
        };

        let Some(reminder) = reminders.get(number - 1) else {
            let _ = msg.channel_id.say(
                &ctx.http,
                format!("You only have {} reminder(s).", reminders.len()),
            ).await;
            return;
        };

        match db::delete_reminder(&self.database, reminder.id, owner).await {
            Ok(true) => {
                let _ = msg.channel_id.say(
                    &ctx.http,
                    format!("Canceled reminder **{}**.", reminder.content),
                ).await;
            }
            Ok(false) => {
                let _ = msg.channel_id.say(&ctx.http, "That reminder is already gone.").await;
            }
            Err(e) => {
                error!("Database error canceling reminder: {:?}", e);
                let _ = msg.channel_id.say(&ctx.http, "Database error. Please try again later.").await;
            }
        }
    }

    pub async fn handle_emailtest(&self, ctx: &Context, msg: &Message, arg: Option<&str>) {
        let Some(mailer) = &self.mailer else {
            let _ = msg.channel_id.say(&ctx.http, "Email delivery is not configured.").await;
            return;
        };

        let Some(recipient) = arg else {
            let _ = msg.channel_id.say(&ctx.http, "Please provide a recipient address.").await;
            return;
        };

        if !is_valid_email(recipient) {
            let _ = msg.channel_id.say(
                &ctx.http,
                format!("**{recipient}** does not appear to be a valid email address."),
            ).await;
            return;
        }

        let body = format!(
            "This is a test email sent by the job bot to verify email functionality.\n\
             Requested by: {} ({})",
            msg.author.name,
            msg.author.id.get()
        );
        match mailer.send(recipient, "Test email from the job bot", body).await {
            Ok(()) => {
                let _ = msg.channel_id.say(
                    &ctx.http,
                    format!("Test email successfully sent to {recipient}!"),
                ).await;
            }
            Err(e) => {
                error!("Email sending error: {:?}", e);
                let _ = msg.channel_id.say(&ctx.http, "Failed to send the test email.").await;
            }
        }
    }
}

fn format_reminder_time(expires: DateTime<Utc>) -> String {
    expires.format("%a %b %d %Y at %I:%M %p UTC").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemindRequest {
    pub duration: Duration,
    pub repeat: Repeat,
    pub mode: DeliveryMode,
    pub content: String,
}

/// Parses `!remind <duration> [daily|weekly] [public|private] <content...>`.
/// Errors are user-facing validation messages.
pub fn parse_remind(args: &[&str]) -> Result<RemindRequest, String> {
    let Some(raw_duration) = args.first() else {
        return Err(
            "Usage: `!remind <duration> [daily|weekly] [public|private] <content>`".to_string(),
        );
    };
    let duration = humantime::parse_duration(raw_duration).map_err(|_| {
        format!(
            "**{raw_duration}** is not a valid duration. You can use values like 30m, 2h, or 1day."
        )
    })?;

    let mut repeat = Repeat::None;
    let mut mode = DeliveryMode::Private;
    let mut rest = &args[1..];
    loop {
        match rest.first().map(|t| t.to_lowercase()).as_deref() {
            Some("daily") => repeat = Repeat::Daily,
            Some("weekly") => repeat = Repeat::Weekly,
            Some("public") => mode = DeliveryMode::Public,
            Some("private") => mode = DeliveryMode::Private,
            _ => break,
        }
        rest = &rest[1..];
    }

    if rest.is_empty() {
        return Err("Please provide what you'd like to be reminded of.".to_string());
    }

    Ok(RemindRequest {
        duration,
        repeat,
        mode,
        content: rest.join(" "),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobAlertRequest {
    pub duration: Duration,
    pub repeat: Repeat,
    pub filter: SortPreference,
    pub email: Option<String>,
}

/// Parses `!jobalert <duration> <daily|weekly> [filter] [email:<address>]`.
pub fn parse_jobalert(args: &[&str]) -> Result<JobAlertRequest, String> {
    let Some(raw_duration) = args.first() else {
        return Err(
            "Usage: `!jobalert <duration> <daily|weekly> [filter] [email:<address>]`".to_string(),
        );
    };
    let duration = humantime::parse_duration(raw_duration).map_err(|_| {
        format!(
            "**{raw_duration}** is not a valid duration. You can use values like 30m, 2h, or 1day."
        )
    })?;

    let repeat = match args.get(1).map(|t| t.to_lowercase()).as_deref() {
        Some("daily") => Repeat::Daily,
        Some("weekly") => Repeat::Weekly,
        _ => return Err("Job alerts must repeat **daily** or **weekly**.".to_string()),
    };

    let mut filter = SortPreference::Default;
    let mut email = None;
    for token in &args[2..] {
        if let Some(address) = token.strip_prefix("email:") {
            if !is_valid_email(address) {
                return Err(format!(
                    "**{address}** does not appear to be a valid email address."
                ));
            }
            email = Some(address.to_string());
        } else if let Some(sort) = SortPreference::parse(token) {
            filter = sort;
        } else {
            return Err(format!(
                "**{token}** is not a valid filter. Use date, salary, alphabetical, or distance."
            ));
        }
    }

    Ok(JobAlertRequest {
        duration,
        repeat,
        filter,
        email,
    })
}
