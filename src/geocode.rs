use reqwest::Client;
use serde::Deserialize;
use tracing::error;

pub const GEOCODE_API_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Sentinel distance for listings whose coordinates are unknown.
pub const UNKNOWN_DISTANCE: f64 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

#[derive(Clone)]
pub struct GeocodeClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl GeocodeClient {
    pub fn new(base_url: &str, api_key: String) -> Self {
        GeocodeClient {
            http: Client::new(),
            base_url: base_url.to_string(),
            api_key,
        }
    }

    /// Resolves a US city name to coordinates. An empty result set means
    /// the city couldn't be located and is reported as `None`, not an error.
    pub async fn locate_city(&self, city: &str) -> Result<Option<Coordinates>, reqwest::Error> {
        let params = [
            ("address", city),
            ("components", "country:US"),
            ("key", self.api_key.as_str()),
        ];

        let response: Result<GeocodeResponse, reqwest::Error> = async {
            self.http
                .get(&self.base_url)
                .query(&params)
                .send()
                .await?
                .error_for_status()?
                .json::<GeocodeResponse>()
                .await
        }
        .await;

        match response {
            Ok(body) => Ok(body
                .results
                .into_iter()
                .next()
                .map(|r| Coordinates {
                    lat: r.geometry.location.lat,
                    lng: r.geometry.location.lng,
                })),
            Err(e) => {
                error!("geocoding request failed: {e:?}");
                Err(e)
            }
        }
    }
}

/// Great-circle distance in miles. Either point sitting exactly on (0, 0)
/// means "coordinates unknown" and yields the sentinel.
pub fn distance_miles(a: Coordinates, b: Coordinates) -> f64 {
    if (a.lat == 0.0 && a.lng == 0.0) || (b.lat == 0.0 && b.lng == 0.0) {
        return UNKNOWN_DISTANCE;
    }

    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_MILES * c
}
