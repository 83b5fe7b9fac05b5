use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use serenity::builder::{CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter};
use serenity::model::application::ButtonStyle;

use crate::adzuna::{JobListing, SortPreference};
use crate::geocode::{distance_miles, Coordinates, UNKNOWN_DISTANCE};

/// Hard ceiling on an inline Discord message; anything longer degrades to a
/// file attachment.
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

pub const NO_JOBS_MESSAGE: &str = "### Unfortunately, there were no jobs found based on your \
    interests :(. Consider updating your interests or waiting until something is found.";

const DISCLAIMER: &str = "### **Disclaimer:**\n\
    -# Please be aware that the job listings displayed are retrieved from a third-party API. \
    While we strive to provide accurate information, we cannot guarantee the legitimacy or \
    security of all postings. Exercise caution when sharing personal information, submitting \
    resumes, or registering on external sites. Always verify the authenticity of job \
    applications before proceeding. Additionally, some job postings may contain inaccuracies \
    due to API limitations, which are beyond our control.";

/// US-locale dollars, "N/A" when there is no number to format.
pub fn format_currency(amount: Option<f64>) -> String {
    let Some(value) = amount.filter(|v| v.is_finite()) else {
        return "N/A".to_string();
    };
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 { "-" } else { "" };
    format!(
        "{sign}${}.{:02}",
        group_thousands(cents / 100),
        cents % 100
    )
}

fn group_thousands(mut value: u64) -> String {
    let mut groups = Vec::new();
    loop {
        let group = value % 1000;
        value /= 1000;
        if value == 0 {
            groups.push(group.to_string());
            break;
        }
        groups.push(format!("{group:03}"));
    }
    groups.reverse();
    groups.join(",")
}

/// Salary line for one listing: "Avg: $x, Min: $y, Max: $z" when both sides
/// are listed, otherwise just the formatted average (which is "N/A" when a
/// side is missing).
pub fn format_salary(job: &JobListing) -> String {
    let avg = format_currency(job.average_salary());
    match (job.salary_min(), job.salary_max()) {
        (Some(min), Some(max)) => format!(
            "Avg: {avg}, Min: {}, Max: {}",
            format_currency(Some(min)),
            format_currency(Some(max))
        ),
        _ => avg,
    }
}

pub fn format_distance(distance: f64) -> String {
    if distance == UNKNOWN_DISTANCE {
        "N/A".to_string()
    } else {
        format!("{distance:.2} miles")
    }
}

pub fn parse_created(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn format_posted_date(raw: &str) -> String {
    match parse_created(raw) {
        Some(dt) => dt.format("%a %b %d %Y at %I:%M %p").to_string(),
        None => raw.to_string(),
    }
}

/// Fills in each listing's distance from the user's city.
pub fn apply_distances(listings: &mut [JobListing], origin: Coordinates) {
    for job in listings.iter_mut() {
        job.distance = distance_miles(
            origin,
            Coordinates {
                lat: job.latitude,
                lng: job.longitude,
            },
        );
    }
}

/// Client-side ordering. Listings missing the sort key (unparseable salary
/// or date, unknown distance) always sort last.
pub fn sort_listings(listings: &mut [JobListing], sort: SortPreference) {
    match sort {
        SortPreference::Default | SortPreference::Relevance => {}
        SortPreference::Alphabetical => listings.sort_by(|a, b| a.title.cmp(&b.title)),
        SortPreference::Salary => listings.sort_by(|a, b| {
            match (a.average_salary(), b.average_salary()) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(x), Some(y)) => y.total_cmp(&x),
            }
        }),
        SortPreference::Date => listings.sort_by(|a, b| {
            match (parse_created(&a.created), parse_created(&b.created)) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(x), Some(y)) => y.cmp(&x),
            }
        }),
        SortPreference::Distance => listings.sort_by(|a, b| {
            match (a.distance == UNKNOWN_DISTANCE, b.distance == UNKNOWN_DISTANCE) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => a.distance.total_cmp(&b.distance),
            }
        }),
    }
}

/// Lowercases, drops parentheses, and capitalizes each word ("newark" ->
/// "Newark", "new york (ny)" -> "New York Ny").
pub fn title_case(raw: &str) -> String {
    raw.to_lowercase()
        .replace(['(', ')'], "")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .join(" ")
}

/// The numbered long-form listing body.
pub fn render_job_list(listings: &[JobListing]) -> String {
    if listings.is_empty() {
        return NO_JOBS_MESSAGE.to_string();
    }

    listings
        .iter()
        .enumerate()
        .map(|(i, job)| {
            format!(
                "{}. **{}**\n\
                 \t* **Salary:** {}\n\
                 \t* **Location:** {}\n\
                 \t* **Date Posted:** {}\n\
                 \t* **Apply here:** [read more about the job and apply here]({})\n\
                 \t* **Distance:** {}",
                i + 1,
                job.title,
                format_salary(job),
                job.location,
                format_posted_date(&job.created),
                job.link,
                format_distance(job.distance),
            )
        })
        .join("\n\n")
}

pub fn greeting(owner: u64, interests: &[String]) -> String {
    let interest_list = interests
        .iter()
        .map(|i| format!("**{i}**"))
        .join(", ");
    format!(
        "## Hey <@{owner}>!\n## Here's your list of job/internship recommendations:\n\
         Based on your interests in {interest_list}, I've found these jobs you may find \
         interesting. Please note that while you may get recommendations from the same \
         company, their positions/details/applications/salary WILL be different and this \
         is not a glitch/bug!\nHere's your personalized list:"
    )
}

/// The full inline message: greeting, listing body, disclaimer. The "---"
/// divider separates the body from the disclaimer for the attachment path.
pub fn job_list_message(owner: u64, interests: &[String], listings: &[JobListing]) -> String {
    format!(
        "{}\n\n{}\n---\n{}",
        greeting(owner, interests),
        render_job_list(listings),
        DISCLAIMER
    )
}

/// Short header sent alongside the attachment when the inline message is
/// too long.
pub fn header_message(owner: u64, sort: SortPreference) -> String {
    let suffix = match sort {
        SortPreference::Default | SortPreference::Relevance => ":".to_string(),
        SortPreference::Date => " (filtered based on date posted):".to_string(),
        other => format!(" (filtered based on {}):", other.as_str()),
    };
    format!(
        "## Hey <@{owner}>!\n{DISCLAIMER}\n\
         ## Here's your list of job/internship recommendations{suffix}"
    )
}

static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]\((https?://[^\s)]+)\)").expect("link regex"));
static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("bold regex"));
static HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*(?:#{1,3}|-#)[ \t]*").expect("header regex"));
static MENTION_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Hey <@\d+>!\s*").expect("mention regex"));

/// Plain-text rendering for file attachments: link wrappers unwrapped to
/// bare URLs, bold markers and header prefixes removed.
pub fn strip_markdown(message: &str) -> String {
    let text = LINK_RE.replace_all(message, "$1");
    let text = BOLD_RE.replace_all(&text, "$1");
    let text = HEADER_RE.replace_all(&text, "");
    let text = MENTION_HEADER_RE.replace_all(&text, "");
    text.trim().to_string()
}

/// Body of `message` up to the disclaimer divider, for attachment export.
pub fn attachment_body(message: &str) -> String {
    let body = message.split("\n---\n").next().unwrap_or(message);
    strip_markdown(body)
}

/// One paginated card: embed plus the Previous / Remove / Next / Download
/// control row.
pub fn job_card(job: &JobListing, index: usize, total: usize) -> (CreateEmbed, CreateActionRow) {
    let embed = CreateEmbed::new()
        .title(job.title.clone())
        .description(format!(
            "**Location:** {}\n**Date Posted:** {}",
            job.location,
            format_posted_date(&job.created)
        ))
        .field("Salary", format_salary(job), true)
        .field("Apply Here", format!("[Click here]({})", job.link), true)
        .field("Distance", format_distance(job.distance), true)
        .footer(CreateEmbedFooter::new(format!(
            "Job {} of {}",
            index + 1,
            total
        )))
        .color(0x0099ff);

    let row = CreateActionRow::Buttons(vec![
        CreateButton::new("previous")
            .label("Previous")
            .style(ButtonStyle::Primary)
            .disabled(total == 1),
        CreateButton::new("remove")
            .label("Remove")
            .style(ButtonStyle::Danger)
            .disabled(total == 1),
        CreateButton::new("next")
            .label("Next")
            .style(ButtonStyle::Primary)
            .disabled(total == 1),
        CreateButton::new("download")
            .label("Download")
            .style(ButtonStyle::Success),
    ]);

    (embed, row)
}
