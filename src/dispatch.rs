use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serenity::builder::{CreateAttachment, CreateMessage};
use serenity::http::Http;
use serenity::model::id::{ChannelId, UserId};
use sqlx::PgPool;
use tracing::{error, info, warn};

use crate::adzuna::{AdzunaClient, SearchQuery, SortPreference};
use crate::compose;
use crate::database::db::{self, DeliveryMode, Reminder, ReminderKind, Repeat};
use crate::geocode::GeocodeClient;
use crate::mailer::Mailer;

const ATTACHMENT_NAME: &str = "list-of-jobs-internships.txt";

/// Next occurrence for a repeating reminder; `None` means the reminder is
/// one-off and should be deleted after dispatch.
pub fn advance_expiry(expires: DateTime<Utc>, repeat: Repeat) -> Option<DateTime<Utc>> {
    match repeat {
        Repeat::Daily => Some(expires + Duration::days(1)),
        Repeat::Weekly => Some(expires + Duration::days(7)),
        Repeat::None => None,
    }
}

/// Everything one dispatch tick needs. Lives behind an `Arc` so the cron
/// job closure and per-reminder tasks can share it.
pub struct Dispatcher {
    pub pool: PgPool,
    pub http: Arc<Http>,
    pub adzuna: AdzunaClient,
    pub geocoder: GeocodeClient,
    pub mailer: Option<Mailer>,
    pub notify_channel: ChannelId,
}

impl Dispatcher {
    /// One poll tick: claim everything due, dispatch each reminder on its
    /// own task, then reschedule or delete. A slow delivery never holds up
    /// the rest of the batch.
    pub async fn tick(self: &Arc<Self>) {
        let due = match db::claim_due_reminders(&self.pool).await {
            Ok(due) => due,
            Err(e) => {
                error!("failed to claim due reminders: {e:?}");
                return;
            }
        };
        if due.is_empty() {
            return;
        }
        info!("dispatching {} due reminder(s)", due.len());

        let mut handles = Vec::with_capacity(due.len());
        for reminder in due {
            let dispatcher = Arc::clone(self);
            handles.push(tokio::spawn(async move {
                dispatcher.dispatch(reminder).await;
            }));
        }
        for handle in handles {
            let _ = handle.await;
        }
    }

    async fn dispatch(&self, reminder: Reminder) {
        match reminder.mode {
            DeliveryMode::Public => self.deliver_public(&reminder).await,
            DeliveryMode::Private => self.deliver_private(&reminder).await,
        }

        match advance_expiry(reminder.expires, reminder.repeat) {
            Some(next) => {
                if let Err(e) = db::reschedule_reminder(&self.pool, reminder.id, next).await {
                    error!("failed to reschedule reminder {}: {e:?}", reminder.id);
                }
            }
            None => {
                if let Err(e) = db::delete_dispatched(&self.pool, reminder.id).await {
                    error!("failed to delete dispatched reminder {}: {e:?}", reminder.id);
                }
            }
        }
    }

    async fn deliver_public(&self, reminder: &Reminder) {
        let text = format!(
            "<@{}>, here's the reminder you asked for: **{}**",
            reminder.owner, reminder.content
        );
        if let Err(e) = self.notify_channel.say(self.http.as_ref(), text).await {
            error!("failed to post public reminder {}: {e:?}", reminder.id);
        }
    }

    async fn deliver_private(&self, reminder: &Reminder) {
        let user = match self.http.get_user(UserId::new(reminder.owner as u64)).await {
            Ok(user) => user,
            Err(e) => {
                error!("failed to fetch owner of reminder {}: {e:?}", reminder.id);
                return;
            }
        };

        let sort = reminder.filter_by.unwrap_or_default();
        let body = match reminder.kind {
            ReminderKind::JobAlert => match self.job_digest(reminder.owner, sort).await {
                Ok(Some(message)) => message,
                Ok(None) => {
                    // preferences were deleted after the alert was created
                    "I couldn't put together your job alert because you haven't filled out \
                     the job form yet. Run !jobform to set your preferences."
                        .to_string()
                }
                Err(e) => {
                    error!("failed to build job digest for reminder {}: {e:?}", reminder.id);
                    return;
                }
            },
            ReminderKind::Custom => format!(
                "Here's the reminder you asked for: **{}**",
                reminder.content
            ),
        };

        let delivery = if body.len() < compose::DISCORD_MESSAGE_LIMIT {
            user.dm(self.http.as_ref(), CreateMessage::new().content(body.clone()))
                .await
        } else {
            let attachment =
                CreateAttachment::bytes(compose::attachment_body(&body).into_bytes(), ATTACHMENT_NAME);
            let header = compose::header_message(reminder.owner as u64, sort);
            user.dm(
                self.http.as_ref(),
                CreateMessage::new().content(header).add_file(attachment),
            )
            .await
        };

        if let Err(e) = delivery {
            // most commonly the user has DMs closed; let them know publicly
            warn!("direct delivery of reminder {} rejected: {e:?}", reminder.id);
            let fallback = format!(
                "<@{}>, I tried to send you a DM about your private reminder but it looks \
                 like you have DMs closed. Please enable DMs in the future if you'd like to \
                 get private reminders.",
                reminder.owner
            );
            if let Err(e) = self.notify_channel.say(self.http.as_ref(), fallback).await {
                error!("failed to post DM-failure notice for {}: {e:?}", reminder.id);
            }
            return;
        }

        if let Some(address) = &reminder.email {
            self.send_email_copy(reminder, address, &body).await;
        }
    }

    // Best-effort: an email failure never blocks or undoes the primary
    // delivery.
    async fn send_email_copy(&self, reminder: &Reminder, address: &str, body: &str) {
        let Some(mailer) = &self.mailer else {
            warn!(
                "reminder {} wants email delivery but no relay is configured",
                reminder.id
            );
            return;
        };

        let subject = match reminder.kind {
            ReminderKind::JobAlert => "Your job/internship alert",
            ReminderKind::Custom => "Your reminder",
        };
        if let Err(e) = mailer
            .send(address, subject, compose::strip_markdown(body))
            .await
        {
            warn!("email copy of reminder {} failed: {e:?}", reminder.id);
        }
    }

    /// Regenerates the full job-listing message for an owner, or `None`
    /// when they have no stored preferences.
    pub async fn job_digest(
        &self,
        owner: i64,
        sort: SortPreference,
    ) -> anyhow::Result<Option<String>> {
        let Some(prefs) = db::get_preferences(&self.pool, owner).await? else {
            return Ok(None);
        };

        let query = SearchQuery::from_preferences(&prefs, sort);
        let mut listings = self.adzuna.search(&query).await?;

        if let Some(origin) = self.geocoder.locate_city(&query.city()).await? {
            compose::apply_distances(&mut listings, origin);
        }
        compose::sort_listings(&mut listings, sort);

        Ok(Some(compose::job_list_message(
            owner as u64,
            &prefs.interests,
            &listings,
        )))
    }
}
