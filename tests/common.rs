// test fixtures
use job_scout::adzuna::JobListing;

pub fn listing(title: &str) -> JobListing {
    JobListing {
        title: title.to_string(),
        company: "Acme Corp".to_string(),
        description: "A job".to_string(),
        location: "Newark, NJ (US, New Jersey, Newark)".to_string(),
        created: "2025-05-01T12:00:00Z".to_string(),
        salary_min: "50000".to_string(),
        salary_max: "70000".to_string(),
        link: "https://example.com/job".to_string(),
        latitude: 40.7357,
        longitude: -74.1724,
        distance: -1.0,
    }
}

pub fn listing_without_salary(title: &str) -> JobListing {
    JobListing {
        salary_min: "Not listed".to_string(),
        salary_max: "Not listed".to_string(),
        ..listing(title)
    }
}
