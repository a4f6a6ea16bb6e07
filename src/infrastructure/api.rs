//! Client for the listings backend.
//!
//! [`ListingSource`] is the seam the background worker talks to. The
//! production implementation, [`HttpListingSource`], speaks plain JSON over
//! HTTP; tests drive the worker through an in-memory source instead.
//!
//! ```text
//! GET  {api}/listings
//! GET  {api}/listings/nearby?lat={lat}&lon={lon}&radius_km={radius}
//! GET  {api}/photos/{file_id}
//! POST {api}/save-listing/{listing_id}   {"user_id": "..."}
//! ```

use std::time::Duration;

use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::Result;

/// Search radius applied when a nearby query does not name one.
pub const DEFAULT_RADIUS_KM: f64 = 20.0;

/// Shown for a photo slot that has no file identifier.
pub const PHOTO_PLACEHOLDER: &str = "https://via.placeholder.com/150/3498db/ffffff?text=Rasm+Yoq";

/// Swapped in by the host when a photo URL fails to load.
pub const PHOTO_LOAD_FALLBACK: &str = "https://via.placeholder.com/300x200?text=Rasm+Yuklanmadi";

/// Which listings to ask the backend for.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListingQuery {
    #[default]
    All,
    /// Listings within `radius_km` of a point.
    Nearby { lat: f64, lon: f64, radius_km: f64 },
}

impl ListingQuery {
    /// Full request URL for this query against `api_base`.
    ///
    /// # Examples
    ///
    /// ```
    /// use listing_map::infrastructure::api::ListingQuery;
    ///
    /// assert_eq!(ListingQuery::All.url_for("https://api.test/api"), "https://api.test/api/listings");
    /// assert_eq!(
    ///     ListingQuery::Nearby { lat: 41.3, lon: 69.2, radius_km: 20.0 }.url_for("https://api.test/api"),
    ///     "https://api.test/api/listings/nearby?lat=41.3&lon=69.2&radius_km=20"
    /// );
    /// ```
    #[must_use]
    pub fn url_for(&self, api_base: &str) -> String {
        let base = api_base.trim_end_matches('/');
        match self {
            Self::All => format!("{base}/listings"),
            Self::Nearby { lat, lon, radius_km } => {
                format!("{base}/listings/nearby?lat={lat}&lon={lon}&radius_km={radius_km}")
            }
        }
    }
}

/// URL of one listing photo, or the placeholder when the slot is empty.
///
/// # Examples
///
/// ```
/// use listing_map::infrastructure::api::{photo_url, PHOTO_PLACEHOLDER};
///
/// assert_eq!(photo_url("https://api.test/api", Some("AgA/b c")), "https://api.test/api/photos/AgA%2Fb%20c");
/// assert_eq!(photo_url("https://api.test/api", None), PHOTO_PLACEHOLDER);
/// ```
#[must_use]
pub fn photo_url(api_base: &str, file_id: Option<&str>) -> String {
    match file_id {
        Some(id) if !id.is_empty() => format!(
            "{}/photos/{}",
            api_base.trim_end_matches('/'),
            urlencoding::encode(id)
        ),
        _ => PHOTO_PLACEHOLDER.to_string(),
    }
}

/// Where listings come from.
///
/// Both calls return the raw JSON body; decoding and validation happen in the
/// caller so that malformed payloads can be handled the same way for every
/// source.
pub trait ListingSource: Send + Sync {
    /// Fetches listings matching `query`.
    ///
    /// # Errors
    ///
    /// Fails when the backend is unreachable, times out, answers with a
    /// non-success status or returns a body that is not JSON.
    fn fetch_listings<'a>(&'a self, query: &'a ListingQuery) -> BoxFuture<'a, Result<Value>>;

    /// Asks the backend to forward a listing to the user's chat.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ListingSource::fetch_listings`].
    fn save_listing<'a>(&'a self, listing_id: i64, user_id: &'a str) -> BoxFuture<'a, Result<Value>>;
}

#[derive(Serialize)]
struct SaveRequest<'a> {
    user_id: &'a str,
}

/// [`ListingSource`] backed by the HTTP API.
#[derive(Debug, Clone)]
pub struct HttpListingSource {
    api_base: String,
    client: reqwest::Client,
}

impl HttpListingSource {
    /// Builds a client with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ListingMapError::Http`] if the TLS backend
    /// cannot be initialized.
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_base: api_base.into(),
            client,
        })
    }

    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

impl ListingSource for HttpListingSource {
    fn fetch_listings<'a>(&'a self, query: &'a ListingQuery) -> BoxFuture<'a, Result<Value>> {
        Box::pin(async move {
            let url = query.url_for(&self.api_base);
            tracing::debug!(%url, "fetching listings");

            let body = self
                .client
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .json::<Value>()
                .await?;
            Ok(body)
        })
    }

    fn save_listing<'a>(&'a self, listing_id: i64, user_id: &'a str) -> BoxFuture<'a, Result<Value>> {
        Box::pin(async move {
            let url = format!(
                "{}/save-listing/{listing_id}",
                self.api_base.trim_end_matches('/')
            );
            tracing::debug!(%url, listing_id, "saving listing");

            let body = self
                .client
                .post(&url)
                .json(&SaveRequest { user_id })
                .send()
                .await?
                .error_for_status()?
                .json::<Value>()
                .await?;
            Ok(body)
        })
    }
}
