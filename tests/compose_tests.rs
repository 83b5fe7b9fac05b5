mod common;

use common::{listing, listing_without_salary};
use job_scout::adzuna::SortPreference;
use job_scout::compose::{
    apply_distances, attachment_body, format_currency, format_distance, format_salary,
    job_list_message, sort_listings, strip_markdown, title_case,
};
use job_scout::geocode::{distance_miles, Coordinates, UNKNOWN_DISTANCE};

#[test]
fn currency_is_us_locale_or_na() {
    assert_eq!(format_currency(None), "N/A");
    assert_eq!(format_currency(Some(50000.0)), "$50,000.00");
    assert_eq!(format_currency(Some(1234.5)), "$1,234.50");
    assert_eq!(format_currency(Some(999.0)), "$999.00");
    assert_eq!(format_currency(Some(1_000_000.0)), "$1,000,000.00");
}

#[test]
fn salary_line_needs_both_sides_for_the_range() {
    let both = listing("a");
    assert_eq!(
        format_salary(&both),
        "Avg: $60,000.00, Min: $50,000.00, Max: $70,000.00"
    );

    let neither = listing_without_salary("b");
    assert_eq!(format_salary(&neither), "N/A");

    let mut one_side = listing("c");
    one_side.salary_max = "Not listed".to_string();
    assert_eq!(format_salary(&one_side), "N/A");
}

#[test]
fn distance_renders_sentinel_as_na() {
    assert_eq!(format_distance(UNKNOWN_DISTANCE), "N/A");
    assert_eq!(format_distance(12.5), "12.50 miles");
}

#[test]
fn salary_sort_puts_unlisted_salaries_last() {
    let mut listings = vec![
        listing_without_salary("no salary"),
        listing("low"),
        listing("high"),
    ];
    listings[1].salary_min = "10000".to_string();
    listings[1].salary_max = "20000".to_string();

    sort_listings(&mut listings, SortPreference::Salary);
    let titles: Vec<&str> = listings.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["high", "low", "no salary"]);
}

#[test]
fn alphabetical_sort_orders_by_title() {
    let mut listings = vec![listing("Zookeeper"), listing("Accountant"), listing("Nurse")];
    sort_listings(&mut listings, SortPreference::Alphabetical);
    let titles: Vec<&str> = listings.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["Accountant", "Nurse", "Zookeeper"]);
}

#[test]
fn date_sort_is_newest_first_with_unparseable_last() {
    let mut listings = vec![listing("old"), listing("undated"), listing("new")];
    listings[0].created = "2025-01-01T00:00:00Z".to_string();
    listings[1].created = "Unknown".to_string();
    listings[2].created = "2025-06-01T00:00:00Z".to_string();

    sort_listings(&mut listings, SortPreference::Date);
    let titles: Vec<&str> = listings.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["new", "old", "undated"]);
}

#[test]
fn distance_sort_puts_unknown_coordinates_last() {
    let mut listings = vec![listing("far"), listing("nowhere"), listing("near")];
    listings[0].distance = 30.0;
    listings[1].distance = UNKNOWN_DISTANCE;
    listings[2].distance = 2.0;

    sort_listings(&mut listings, SortPreference::Distance);
    let titles: Vec<&str> = listings.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["near", "far", "nowhere"]);
}

#[test]
fn haversine_is_symmetric_and_guards_the_origin() {
    let newark = Coordinates {
        lat: 40.7357,
        lng: -74.1724,
    };
    let nyc = Coordinates {
        lat: 40.7128,
        lng: -74.0060,
    };
    let origin = Coordinates { lat: 0.0, lng: 0.0 };

    let there = distance_miles(newark, nyc);
    let back = distance_miles(nyc, newark);
    assert!((there - back).abs() < 1e-9);
    assert!(there > 5.0 && there < 15.0, "Newark to NYC is ~9 miles, got {there}");

    assert_eq!(distance_miles(origin, nyc), UNKNOWN_DISTANCE);
    assert_eq!(distance_miles(newark, origin), UNKNOWN_DISTANCE);
}

#[test]
fn apply_distances_marks_unknown_listing_coordinates() {
    let newark = Coordinates {
        lat: 40.7357,
        lng: -74.1724,
    };
    let mut listings = vec![listing("located"), listing("unlocated")];
    listings[1].latitude = 0.0;
    listings[1].longitude = 0.0;

    apply_distances(&mut listings, newark);
    assert!(listings[0].distance >= 0.0);
    assert_eq!(listings[1].distance, UNKNOWN_DISTANCE);
}

#[test]
fn oversized_messages_strip_down_to_plain_text() {
    let interests = vec!["software".to_string(), "finance".to_string()];
    let listings = vec![listing("Software Engineer"), listing_without_salary("Analyst")];
    let message = job_list_message(123, &interests, &listings);

    assert!(message.contains("<@123>"));
    assert!(message.contains("1. **Software Engineer**"));
    assert!(message.contains("Disclaimer"));

    let stripped = attachment_body(&message);
    assert!(!stripped.contains("**"));
    assert!(!stripped.contains("##"));
    assert!(!stripped.contains("]("));
    assert!(stripped.contains("https://example.com/job"));
    // the disclaimer stays behind with the inline header
    assert!(!stripped.contains("Disclaimer"));
}

#[test]
fn strip_markdown_unwraps_links() {
    let stripped = strip_markdown("see [the posting](https://example.com/a) for **details**");
    assert_eq!(stripped, "see https://example.com/a for details");
}

#[test]
fn title_case_cleans_city_names() {
    assert_eq!(title_case("newark"), "Newark");
    assert_eq!(title_case("new york (ny)"), "New York Ny");
}
