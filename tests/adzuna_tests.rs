use job_scout::adzuna::{AdzunaClient, SearchQuery, SortPreference};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn newark_query() -> SearchQuery {
    SearchQuery {
        city: Some("Newark".to_string()),
        employment_type: Some("Full Time".to_string()),
        distance_miles: Some(10.0),
        interests: vec![
            "software engineering".to_string(),
            "data science".to_string(),
        ],
        sort: SortPreference::Default,
    }
}

fn sample_body() -> serde_json::Value {
    json!({
        "results": [
            {
                "title": "Software Engineer",
                "description": "Build things",
                "created": "2025-05-01T12:00:00Z",
                "redirect_url": "https://example.com/se",
                "salary_min": 50000.0,
                "salary_max": 70000.0,
                "latitude": 40.7357,
                "longitude": -74.1724,
                "company": { "display_name": "Acme Corp" },
                "location": {
                    "display_name": "Newark, NJ",
                    "area": ["US", "New Jersey", "Newark"]
                }
            },
            {
                "title": "Data Analyst"
            }
        ]
    })
}

#[tokio::test]
async fn search_sends_normalized_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/1"))
        .and(query_param("app_id", "id"))
        .and(query_param("app_key", "key"))
        .and(query_param("results_per_page", "15"))
        .and(query_param("what", "full time"))
        .and(query_param("where", "newark"))
        // 10 miles -> round(10 * 1.609) km
        .and(query_param("distance", "16"))
        .and(query_param("what_or", "software-engineering data-science"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = AdzunaClient::new(&server.uri(), "id".to_string(), "key".to_string());
    let listings = client.search(&newark_query()).await.unwrap();

    assert_eq!(listings.len(), 2);
    let first = &listings[0];
    assert_eq!(first.title, "Software Engineer");
    assert_eq!(first.company, "Acme Corp");
    assert_eq!(first.location, "Newark, NJ (US, New Jersey, Newark)");
    assert_eq!(first.salary_min, "50000");
    assert_eq!(first.distance, -1.0);

    // the sparse listing falls back to sentinels instead of failing
    let second = &listings[1];
    assert_eq!(second.company, "Not Provided");
    assert_eq!(second.location, "Not Provided");
    assert_eq!(second.salary_min, "Not listed");
    assert_eq!(second.salary_max, "Not listed");
    assert_eq!(second.link, "No link available");
    assert_eq!(second.latitude, 0.0);
}

#[tokio::test]
async fn repeated_searches_hit_the_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = AdzunaClient::new(&server.uri(), "id".to_string(), "key".to_string());
    let first = client.search(&newark_query()).await.unwrap();
    let second = client.search(&newark_query()).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn native_sort_preferences_are_delegated_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/1"))
        .and(query_param("sort_by", "salary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AdzunaClient::new(&server.uri(), "id".to_string(), "key".to_string());
    let mut query = newark_query();
    query.sort = SortPreference::Salary;
    let listings = client.search(&query).await.unwrap();
    assert!(listings.is_empty());
}

#[tokio::test]
async fn upstream_failures_are_returned_to_the_caller() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = AdzunaClient::new(&server.uri(), "id".to_string(), "key".to_string());
    assert!(client.search(&newark_query()).await.is_err());
}

#[tokio::test]
async fn histogram_buckets_come_back_in_salary_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/histogram"))
        .and(query_param("what", "Accountant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "histogram": { "60000": 1, "20000": 4, "40000": 7 }
        })))
        .mount(&server)
        .await;

    let client = AdzunaClient::new(&server.uri(), "id".to_string(), "key".to_string());
    let buckets = client.salary_histogram("Accountant").await.unwrap();
    assert_eq!(buckets, vec![(20000, 4), (40000, 7), (60000, 1)]);
}

#[test]
fn cache_key_is_case_normalized() {
    assert_eq!(
        newark_query().cache_key(),
        "full time-newark-software-engineering data-science"
    );
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let query = SearchQuery::default();
    assert_eq!(query.city(), "newark");
    assert_eq!(query.employment_type(), "full-time");
    assert_eq!(query.distance_km(), 16);
    assert_eq!(query.joined_interests(), "");
    assert_eq!(query.cache_key(), "full-time-newark-");
}
