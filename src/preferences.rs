use chrono::{DateTime, Utc};

const VALID_WORK_TYPES: &[&str] = &["remote", "hybrid", "in person"];
const VALID_EMPLOYMENT_TYPES: &[&str] = &["full time", "part time", "internship"];

/// A user's stored job-search preferences. Absence of a row is a valid
/// state and callers must treat it as "form not filled out yet".
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct JobPreferences {
    pub discord_id: i64,
    pub city: Option<String>,
    pub work_type: Option<String>,
    pub employment_type: Option<String>,
    pub travel_distance: Option<String>,
    pub interests: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

/// One round of form answers. `None` / empty fields leave the stored
/// values untouched on upsert.
#[derive(Debug, Clone, Default)]
pub struct FormAnswers {
    pub city: Option<String>,
    pub work_type: Option<String>,
    pub employment_type: Option<String>,
    pub travel_distance: Option<String>,
    pub interests: Vec<String>,
}

/// Validates a set of form answers, returning one message per problem.
/// An empty vec means the answers are acceptable.
pub fn validate_answers(answers: &FormAnswers) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(city) = &answers.city {
        if city.trim().is_empty() {
            errors.push("Enter a valid city.".to_string());
        }
    }

    if let Some(work_type) = &answers.work_type {
        if let Some(invalid) = invalid_tokens(work_type, VALID_WORK_TYPES) {
            errors.push(format!(
                "Invalid work type: {invalid}. Must be remote, hybrid, and/or in person \
                 separated by commas, or all for all three."
            ));
        }
    }

    if let Some(employment_type) = &answers.employment_type {
        if let Some(invalid) = invalid_tokens(employment_type, VALID_EMPLOYMENT_TYPES) {
            errors.push(format!(
                "Invalid employment type: {invalid}. Must be full time, part time, and/or \
                 internship separated by commas, or all for all three."
            ));
        }
    }

    if let Some(distance) = &answers.travel_distance {
        if parse_travel_distance(distance).is_none() {
            errors.push("Travel distance must be a number.".to_string());
        }
    }

    errors
}

// Comma-separated tokens, each drawn from `allowed`; "all" stands for every
// option at once. Returns the offending tokens when any fall outside.
fn invalid_tokens(value: &str, allowed: &[&str]) -> Option<String> {
    let lowered = value.to_lowercase();
    let invalid: Vec<&str> = lowered
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty() && *t != "all" && !allowed.contains(t))
        .collect();
    if invalid.is_empty() {
        None
    } else {
        Some(invalid.join(", "))
    }
}

/// Pulls the numeric part out of a travel-distance answer ("10", "10 miles",
/// "~25mi"). Answers with no digits at all are rejected.
pub fn parse_travel_distance(raw: &str) -> Option<f64> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
