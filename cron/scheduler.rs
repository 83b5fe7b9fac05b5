use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::dispatch::Dispatcher;

/// How often the dispatch loop polls for due reminders.
const TICK_SCHEDULE: &str = "*/30 * * * * *";

/// Starts the fixed-interval reminder poll. Each tick claims due reminders
/// atomically, so a tick that outlives the interval cannot double-dispatch.
pub async fn start_scheduler(
    dispatcher: Arc<Dispatcher>,
) -> Result<JobScheduler, Box<dyn std::error::Error>> {
    let scheduler = JobScheduler::new().await?;

    let job = {
        let dispatcher = Arc::clone(&dispatcher);

        Job::new_async(TICK_SCHEDULE, move |_uuid, _l| {
            let dispatcher = Arc::clone(&dispatcher);
            Box::pin(async move {
                dispatcher.tick().await;
            })
        })?
    };

    scheduler.add(job).await?;
    scheduler.start().await?;

    Ok(scheduler)
}
