mod common;

use std::time::Duration;

use chrono::{TimeZone, Utc};
use common::listing;
use job_scout::adzuna::SortPreference;
use job_scout::bot::{parse_jobalert, parse_remind};
use job_scout::database::db::{DeliveryMode, Repeat};
use job_scout::dispatch::advance_expiry;
use job_scout::mailer::is_valid_email;
use job_scout::pdf::render_jobs_pdf;
use job_scout::preferences::{parse_travel_distance, validate_answers, FormAnswers};

#[test]
fn daily_reminders_advance_by_exactly_one_day() {
    let expires = Utc.with_ymd_and_hms(2025, 5, 1, 9, 30, 0).unwrap();
    assert_eq!(
        advance_expiry(expires, Repeat::Daily),
        Some(Utc.with_ymd_and_hms(2025, 5, 2, 9, 30, 0).unwrap())
    );
    assert_eq!(
        advance_expiry(expires, Repeat::Weekly),
        Some(Utc.with_ymd_and_hms(2025, 5, 8, 9, 30, 0).unwrap())
    );
    assert_eq!(advance_expiry(expires, Repeat::None), None);
}

#[test]
fn remind_arguments_parse_into_a_request() {
    let request = parse_remind(&["30m", "daily", "public", "take", "out", "trash"]).unwrap();
    assert_eq!(request.duration, Duration::from_secs(30 * 60));
    assert_eq!(request.repeat, Repeat::Daily);
    assert_eq!(request.mode, DeliveryMode::Public);
    assert_eq!(request.content, "take out trash");

    // defaults: one-off, private
    let request = parse_remind(&["2h", "stand", "up"]).unwrap();
    assert_eq!(request.repeat, Repeat::None);
    assert_eq!(request.mode, DeliveryMode::Private);
    assert_eq!(request.content, "stand up");
}

#[test]
fn remind_rejects_garbage_durations_and_empty_content() {
    let err = parse_remind(&["eventually", "do", "things"]).unwrap_err();
    assert!(err.contains("not a valid duration"));

    let err = parse_remind(&["10m", "daily"]).unwrap_err();
    assert!(err.contains("what you'd like to be reminded of"));

    assert!(parse_remind(&[]).is_err());
}

#[test]
fn jobalert_arguments_parse_into_a_request() {
    let request = parse_jobalert(&["1day", "weekly", "salary", "email:me@example.com"]).unwrap();
    assert_eq!(request.duration, Duration::from_secs(24 * 60 * 60));
    assert_eq!(request.repeat, Repeat::Weekly);
    assert_eq!(request.filter, SortPreference::Salary);
    assert_eq!(request.email.as_deref(), Some("me@example.com"));

    let request = parse_jobalert(&["12h", "daily"]).unwrap();
    assert_eq!(request.filter, SortPreference::Default);
    assert_eq!(request.email, None);
}

#[test]
fn jobalert_requires_a_repeat_and_valid_options() {
    assert!(parse_jobalert(&["1day"]).unwrap_err().contains("daily"));
    assert!(parse_jobalert(&["1day", "sometimes"]).unwrap_err().contains("daily"));
    assert!(parse_jobalert(&["1day", "daily", "email:not-an-email"])
        .unwrap_err()
        .contains("valid email"));
    assert!(parse_jobalert(&["1day", "daily", "sideways"])
        .unwrap_err()
        .contains("not a valid filter"));
}

#[test]
fn email_validation_rejects_malformed_addresses() {
    assert!(is_valid_email("someone@example.com"));
    assert!(!is_valid_email("someone@example"));
    assert!(!is_valid_email("someone example.com"));
    assert!(!is_valid_email("@example.com"));
}

#[test]
fn preference_validation_accepts_documented_tokens() {
    let answers = FormAnswers {
        city: Some("Newark".to_string()),
        work_type: Some("remote, hybrid".to_string()),
        employment_type: Some("full time, internship".to_string()),
        travel_distance: Some("10 miles".to_string()),
        interests: vec!["software".to_string()],
    };
    assert!(validate_answers(&answers).is_empty());

    let all = FormAnswers {
        work_type: Some("all".to_string()),
        employment_type: Some("all".to_string()),
        ..FormAnswers::default()
    };
    assert!(validate_answers(&all).is_empty());
}

#[test]
fn preference_validation_reports_each_problem() {
    let answers = FormAnswers {
        city: Some("  ".to_string()),
        work_type: Some("underwater".to_string()),
        employment_type: Some("volunteer".to_string()),
        travel_distance: Some("far away".to_string()),
        interests: vec![],
    };
    let errors = validate_answers(&answers);
    assert_eq!(errors.len(), 4);
    assert!(errors.iter().any(|e| e.contains("work type")));
    assert!(errors.iter().any(|e| e.contains("employment type")));
    assert!(errors.iter().any(|e| e.contains("Travel distance")));
}

#[test]
fn travel_distance_keeps_only_digits() {
    assert_eq!(parse_travel_distance("10"), Some(10.0));
    assert_eq!(parse_travel_distance("~25 miles"), Some(25.0));
    assert_eq!(parse_travel_distance("far"), None);
}

#[test]
fn pdf_export_produces_a_pdf() {
    let listings = vec![listing("Software Engineer"), listing("Analyst")];
    let histograms = vec![Some(vec![(20000, 4), (40000, 7), (60000, 1)]), None];
    let bytes = render_jobs_pdf(&listings, "newark", &histograms).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}
