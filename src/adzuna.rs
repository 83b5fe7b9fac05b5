use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use crate::preferences::{parse_travel_distance, JobPreferences};

pub const ADZUNA_API_URL: &str = "https://api.adzuna.com/v1/api/jobs/us";

const DEFAULT_CITY: &str = "newark";
const DEFAULT_EMPLOYMENT_TYPE: &str = "full-time";
const DEFAULT_DISTANCE_MILES: f64 = 10.0;
const MILES_TO_KM: f64 = 1.609;
const RESULTS_PER_PAGE: u32 = 15;

const CACHE_CAPACITY: u64 = 256;
const CACHE_TTL: Duration = Duration::from_secs(600);

/// Value meaning "both sides of the salary range were missing upstream".
pub const SALARY_NOT_LISTED: &str = "Not listed";

/// Ordering applied to a listing set before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(type_name = "sort_preference", rename_all = "lowercase")]
pub enum SortPreference {
    #[default]
    Default,
    Relevance,
    Salary,
    Date,
    Alphabetical,
    Distance,
}

impl SortPreference {
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "relevance" => Some(Self::Relevance),
            "salary" => Some(Self::Salary),
            "date" => Some(Self::Date),
            "alphabetical" => Some(Self::Alphabetical),
            "distance" => Some(Self::Distance),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Relevance => "relevance",
            Self::Salary => "salary",
            Self::Date => "date",
            Self::Alphabetical => "alphabetical",
            Self::Distance => "distance",
        }
    }

    // Orderings the upstream API can apply itself.
    fn native_sort_key(&self) -> Option<&'static str> {
        match self {
            Self::Date => Some("date"),
            Self::Salary => Some("salary"),
            _ => None,
        }
    }
}

/// A normalized search request. Missing fields fall back to fixed defaults
/// rather than failing the search.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub city: Option<String>,
    pub employment_type: Option<String>,
    pub distance_miles: Option<f64>,
    pub interests: Vec<String>,
    pub sort: SortPreference,
}

impl SearchQuery {
    pub fn from_preferences(prefs: &JobPreferences, sort: SortPreference) -> Self {
        SearchQuery {
            city: prefs.city.clone(),
            employment_type: prefs.employment_type.clone(),
            distance_miles: prefs
                .travel_distance
                .as_deref()
                .and_then(parse_travel_distance),
            interests: prefs.interests.clone(),
            sort,
        }
    }

    pub fn city(&self) -> String {
        self.city
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(DEFAULT_CITY)
            .to_lowercase()
    }

    pub fn employment_type(&self) -> String {
        self.employment_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_EMPLOYMENT_TYPE)
            .to_lowercase()
    }

    /// Search radius for the upstream API, which takes kilometers.
    pub fn distance_km(&self) -> i64 {
        let miles = self.distance_miles.unwrap_or(DEFAULT_DISTANCE_MILES);
        (miles * MILES_TO_KM).round() as i64
    }

    /// Interests as a single OR-match term: internal whitespace becomes a
    /// hyphen per term, terms are joined with spaces.
    pub fn joined_interests(&self) -> String {
        self.interests
            .iter()
            .map(|i| i.trim())
            .filter(|i| !i.is_empty())
            .map(|i| i.split_whitespace().collect::<Vec<_>>().join("-"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn cache_key(&self) -> String {
        format!(
            "{}-{}-{}",
            self.employment_type(),
            self.city(),
            self.joined_interests().to_lowercase()
        )
    }
}

/// One normalized job/internship listing. Salary fields are strings because
/// the upstream omits them freely; `SALARY_NOT_LISTED` is a valid value.
/// `distance` is miles from the user's preferred city, -1.0 when unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct JobListing {
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
    pub created: String,
    pub salary_min: String,
    pub salary_max: String,
    pub link: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance: f64,
}

impl JobListing {
    pub fn salary_min(&self) -> Option<f64> {
        parse_salary(&self.salary_min)
    }

    pub fn salary_max(&self) -> Option<f64> {
        parse_salary(&self.salary_max)
    }

    /// Average of min and max; `None` unless both sides parse.
    pub fn average_salary(&self) -> Option<f64> {
        Some((self.salary_min()? + self.salary_max()?) / 2.0)
    }
}

/// `None` for anything that isn't a plain number, including the
/// "Not listed" sentinel. NaN never leaks into arithmetic.
pub fn parse_salary(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawListing>,
}

#[derive(Deserialize)]
struct RawListing {
    title: Option<String>,
    description: Option<String>,
    created: Option<String>,
    redirect_url: Option<String>,
    salary_min: Option<f64>,
    salary_max: Option<f64>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    company: Option<RawCompany>,
    location: Option<RawLocation>,
}

#[derive(Deserialize)]
struct RawCompany {
    display_name: Option<String>,
}

#[derive(Deserialize)]
struct RawLocation {
    display_name: Option<String>,
    area: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct HistogramResponse {
    #[serde(default)]
    histogram: std::collections::HashMap<String, u64>,
}

/// Client for the job-search API. Search results are cached by
/// (employment type, city, interests) with a bounded TTL cache so repeat
/// lookups within a session don't hit the upstream again.
#[derive(Clone)]
pub struct AdzunaClient {
    http: Client,
    base_url: String,
    app_id: String,
    app_key: String,
    cache: Cache<String, Arc<Vec<JobListing>>>,
}

impl AdzunaClient {
    pub fn new(base_url: &str, app_id: String, app_key: String) -> Self {
        AdzunaClient {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            app_id,
            app_key,
            cache: Cache::builder()
                .max_capacity(CACHE_CAPACITY)
                .time_to_live(CACHE_TTL)
                .build(),
        }
    }

    /// Fetches listings for `query`. Transport and non-2xx failures are
    /// logged and returned; the caller decides what to tell the user.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<JobListing>, reqwest::Error> {
        let cache_key = query.cache_key();
        if let Some(hit) = self.cache.get(&cache_key).await {
            debug!("job search cache hit: {cache_key}");
            return Ok((*hit).clone());
        }

        let url = format!("{}/search/1", self.base_url);
        let mut params = vec![
            ("app_id".to_string(), self.app_id.clone()),
            ("app_key".to_string(), self.app_key.clone()),
            ("results_per_page".to_string(), RESULTS_PER_PAGE.to_string()),
            ("what".to_string(), query.employment_type()),
            ("what_or".to_string(), query.joined_interests()),
            ("where".to_string(), query.city()),
            ("distance".to_string(), query.distance_km().to_string()),
        ];
        if let Some(sort_by) = query.sort.native_sort_key() {
            params.push(("sort_by".to_string(), sort_by.to_string()));
        }

        let response: Result<SearchResponse, reqwest::Error> = async {
            self.http
                .get(&url)
                .query(&params)
                .send()
                .await?
                .error_for_status()?
                .json::<SearchResponse>()
                .await
        }
        .await;

        let listings = match response {
            Ok(body) => body.results.into_iter().map(normalize_listing).collect::<Vec<_>>(),
            Err(e) => {
                error!("job search request failed: {e:?}");
                return Err(e);
            }
        };

        self.cache
            .insert(cache_key, Arc::new(listings.clone()))
            .await;
        Ok(listings)
    }

    /// Salary histogram for a job title: (bucket lower bound, count) pairs
    /// in ascending salary order.
    pub async fn salary_histogram(
        &self,
        job_title: &str,
    ) -> Result<Vec<(i64, u64)>, reqwest::Error> {
        let url = format!("{}/histogram", self.base_url);
        let params = [
            ("app_id", self.app_id.as_str()),
            ("app_key", self.app_key.as_str()),
            ("what", job_title),
        ];

        let response: Result<HistogramResponse, reqwest::Error> = async {
            self.http
                .get(&url)
                .query(&params)
                .send()
                .await?
                .error_for_status()?
                .json::<HistogramResponse>()
                .await
        }
        .await;

        match response {
            Ok(body) => {
                let mut buckets: Vec<(i64, u64)> = body
                    .histogram
                    .into_iter()
                    .filter_map(|(bucket, count)| bucket.parse::<i64>().ok().map(|b| (b, count)))
                    .collect();
                buckets.sort_by_key(|(bucket, _)| *bucket);
                Ok(buckets)
            }
            Err(e) => {
                error!("salary histogram request failed: {e:?}");
                Err(e)
            }
        }
    }
}

fn normalize_listing(raw: RawListing) -> JobListing {
    let location = match raw.location {
        Some(loc) => {
            let name = loc.display_name.unwrap_or_else(|| "Not Provided".to_string());
            match loc.area {
                Some(area) if !area.is_empty() => format!("{} ({})", name, area.join(", ")),
                _ => name,
            }
        }
        None => "Not Provided".to_string(),
    };

    JobListing {
        title: raw.title.unwrap_or_else(|| "Untitled listing".to_string()),
        company: raw
            .company
            .and_then(|c| c.display_name)
            .unwrap_or_else(|| "Not Provided".to_string()),
        description: raw
            .description
            .unwrap_or_else(|| "No description available".to_string()),
        location,
        created: raw.created.unwrap_or_else(|| "Unknown".to_string()),
        salary_min: raw
            .salary_min
            .map(|v| v.to_string())
            .unwrap_or_else(|| SALARY_NOT_LISTED.to_string()),
        salary_max: raw
            .salary_max
            .map(|v| v.to_string())
            .unwrap_or_else(|| SALARY_NOT_LISTED.to_string()),
        link: raw
            .redirect_url
            .unwrap_or_else(|| "No link available".to_string()),
        latitude: raw.latitude.unwrap_or(0.0),
        longitude: raw.longitude.unwrap_or(0.0),
        distance: crate::geocode::UNKNOWN_DISTANCE,
    }
}
