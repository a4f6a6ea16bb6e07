//! Listing map: a rental-listing map page with a gesture-driven photo slider.
//!
//! The page loads listings from a backend, shows them as clustered price pins
//! and opens a popup per listing with a swipeable photo strip. The strip is
//! driven by [`slider::PhotoSlider`], a small state machine that turns
//! pointer input into damped drag, release momentum with friction decay and a
//! final snap to the nearest photo.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  Host (main.rs CLI, or a browser binding)            │
//! └──────────────────────────────────────────────────────┘
//!                          │ Event            ▲ Action
//! ┌──────────────────────────────────────────────────────┐
//! │  app/   MapSession, handle_event, markers/cluster    │
//! └──────────────────────────────────────────────────────┘
//!        │                 │                  │
//! ┌─────────────┐  ┌───────────────┐  ┌─────────────────┐
//! │ slider/     │  │ ui/           │  │ worker/         │
//! │ gesture FSM │  │ view model,   │  │ tokio task over │
//! │ + registry  │  │ HTML, theme   │  │ ListingSource   │
//! └─────────────┘  └───────────────┘  └─────────────────┘
//!        │                 │                  │
//! ┌──────────────────────────────────────────────────────┐
//! │  domain/ (records, contact, geo, errors)             │
//! │  infrastructure/ (HTTP api, paths)  storage/ (JSON)  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use listing_map::app::{handle_event, Event, HostCapabilities};
//! use listing_map::storage::MemoryClientStorage;
//! use listing_map::{initialize, Config, PageQuery};
//!
//! let query = PageQuery::parse("?user_id=42&lat=41.3&lon=69.2");
//! let mut storage = MemoryClientStorage::default();
//! let mut session = initialize(
//!     &Config::default(),
//!     &query,
//!     &mut storage,
//!     HostCapabilities::default(),
//! )?;
//!
//! assert_eq!(session.identity(), Some("42"));
//! let (_, actions) = handle_event(&mut session, &Event::ListingsRequested)?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), listing_map::ListingMapError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod slider;
pub mod storage;
pub mod ui;
pub mod worker;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use app::{handle_event, Action, Event, HostCapabilities, MapSession};
pub use domain::{ListingMapError, ListingRecord, Result};
pub use slider::SliderConfig;
pub use ui::Theme;

use infrastructure::api::{ListingQuery, DEFAULT_RADIUS_KM};
use storage::{ClientStorage, USER_ID_KEY};

/// Runtime configuration, usually read from a TOML file.
///
/// Every key is optional.
///
/// ```toml
/// api_base = "https://backend-api-rtej.onrender.com/api"
/// bot_username = "testuchun878_bot"
/// request_timeout_secs = 15
/// trace_level = "debug"
/// log_to_stderr = true
/// theme_file = "night.toml"
///
/// [slider]
/// momentum = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the listings backend, without a trailing slash.
    pub api_base: String,

    /// Telegram bot that owns the `/start listing_{id}` deep links.
    pub bot_username: String,

    pub request_timeout_secs: u64,

    /// Client storage file. Defaults to `client_storage.json` in the data dir.
    pub storage_path: Option<PathBuf>,

    /// `EnvFilter` directive used when `RUST_LOG` is unset. Default: `"info"`.
    pub trace_level: Option<String>,

    /// Also print events to stderr.
    pub log_to_stderr: bool,

    /// Custom colour scheme, see [`ui::theme`].
    pub theme_file: Option<PathBuf>,

    pub slider: SliderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: "https://backend-api-rtej.onrender.com/api".to_string(),
            bot_username: "testuchun878_bot".to_string(),
            request_timeout_secs: 15,
            storage_path: None,
            trace_level: None,
            log_to_stderr: false,
            theme_file: None,
            slider: SliderConfig::default(),
        }
    }
}

impl Config {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ListingMapError::Config`] on malformed TOML or an empty
    /// `api_base`.
    ///
    /// # Examples
    ///
    /// ```
    /// use listing_map::Config;
    ///
    /// let config = Config::from_toml_str("bot_username = \"rent_bot\"\n[slider]\nmomentum = false")?;
    /// assert_eq!(config.bot_username, "rent_bot");
    /// assert!(!config.slider.momentum);
    /// assert_eq!(config.api_base, Config::default().api_base);
    /// # Ok::<(), listing_map::ListingMapError>(())
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut config: Self =
            toml::from_str(text).map_err(|e| ListingMapError::Config(e.to_string()))?;

        let trimmed = config.api_base.trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ListingMapError::Config(
                "api_base must not be empty".to_string(),
            ));
        }
        config.api_base = trimmed.to_string();
        config.slider = config.slider.sanitized();
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Loads the configured theme, falling back to the built-in one.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        self.theme_file.as_ref().map_or_else(Theme::default, |file| {
            Theme::from_file(file).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %file.display(), error = %e, "failed to load theme, using default");
                Theme::default()
            })
        })
    }
}

/// Parameters the page reads from its URL query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageQuery {
    /// Telegram user id handed over by the bot.
    pub user_id: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Search radius in km for nearby queries.
    pub radius_km: f64,
}

impl PageQuery {
    /// Parses `?user_id=…&lat=…&lon=…&radius=…`.
    ///
    /// Keys and values are percent-decoded and `+` reads as a space. The first
    /// occurrence of a key wins. Coordinates that are not finite numbers are
    /// ignored; a missing or unparsable radius falls back to 20 km.
    ///
    /// # Examples
    ///
    /// ```
    /// use listing_map::PageQuery;
    ///
    /// let query = PageQuery::parse("user_id=%20777&lat=41.3&lon=69.2&radius=5");
    /// assert_eq!(query.user_id.as_deref(), Some(" 777"));
    /// assert_eq!(query.radius_km, 5.0);
    ///
    /// assert_eq!(PageQuery::parse("").radius_km, 20.0);
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut user_id = None;
        let mut lat = None;
        let mut lon = None;
        let mut radius = None;

        for pair in raw.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(key);
            let value = decode_component(value);
            let slot = match key.as_str() {
                "user_id" => &mut user_id,
                "lat" => &mut lat,
                "lon" => &mut lon,
                "radius" => &mut radius,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        let number = |v: Option<String>| {
            v.and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|n| n.is_finite())
        };

        Self {
            user_id: user_id.filter(|id| !id.is_empty()),
            lat: number(lat),
            lon: number(lon),
            radius_km: number(radius).filter(|r| *r > 0.0).unwrap_or(DEFAULT_RADIUS_KM),
        }
    }

    /// Nearby query when both coordinates are present, otherwise all listings.
    #[must_use]
    pub fn to_listing_query(&self) -> ListingQuery {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => ListingQuery::Nearby {
                lat,
                lon,
                radius_km: self.radius_km,
            },
            _ => ListingQuery::All,
        }
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).map_or(spaced.clone(), std::borrow::Cow::into_owned)
}

/// Builds the page session.
///
/// A `user_id` in the query is written to client storage first; the identity
/// is then read back from storage so a value saved on an earlier visit still
/// applies when the query has none.
///
/// # Errors
///
/// Propagates client storage failures.
pub fn initialize(
    config: &Config,
    query: &PageQuery,
    storage: &mut dyn ClientStorage,
    capabilities: HostCapabilities,
) -> Result<MapSession> {
    let span = tracing::info_span!("initialize", has_user_id = query.user_id.is_some());
    let _guard = span.enter();

    if let Some(user_id) = &query.user_id {
        storage.set_item(USER_ID_KEY, user_id)?;
    }

    let mut session = MapSession::new(config, capabilities);
    session.set_identity(storage.get_item(USER_ID_KEY)?);
    session.set_query(query.to_listing_query());

    tracing::debug!(query = ?session.query, identity = ?session.identity(), "session initialized");
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryClientStorage;

    #[test]
    fn nearby_needs_both_coordinates() {
        assert_eq!(PageQuery::parse("lat=41.3").to_listing_query(), ListingQuery::All);
        assert_eq!(
            PageQuery::parse("lat=41.3&lon=69.2").to_listing_query(),
            ListingQuery::Nearby {
                lat: 41.3,
                lon: 69.2,
                radius_km: 20.0
            }
        );
    }

    #[test]
    fn junk_numbers_are_ignored() {
        let query = PageQuery::parse("lat=abc&lon=NaN&radius=-3&user_id=");
        assert_eq!(query.lat, None);
        assert_eq!(query.lon, None);
        assert_eq!(query.user_id, None);
        assert!((query.radius_km - DEFAULT_RADIUS_KM).abs() < f64::EPSILON);
    }

    #[test]
    fn first_occurrence_wins() {
        let query = PageQuery::parse("user_id=1&user_id=2&x=y&flag");
        assert_eq!(query.user_id.as_deref(), Some("1"));
    }

    #[test]
    fn stored_identity_survives_missing_query() {
        let mut storage = MemoryClientStorage::default();
        storage.set_item(USER_ID_KEY, "99").unwrap();

        let session = initialize(
            &Config::default(),
            &PageQuery::parse(""),
            &mut storage,
            HostCapabilities::default(),
        )
        .unwrap();
        assert_eq!(session.identity(), Some("99"));
        assert_eq!(session.query, ListingQuery::All);
    }

    #[test]
    fn query_identity_overwrites_stored() {
        let mut storage = MemoryClientStorage::default();
        storage.set_item(USER_ID_KEY, "99").unwrap();

        let session = initialize(
            &Config::default(),
            &PageQuery::parse("user_id=7"),
            &mut storage,
            HostCapabilities::default(),
        )
        .unwrap();
        assert_eq!(session.identity(), Some("7"));
        assert_eq!(storage.get_item(USER_ID_KEY).unwrap().as_deref(), Some("7"));
    }

    #[test]
    fn config_rejects_empty_api_base() {
        assert!(matches!(
            Config::from_toml_str("api_base = \"/\""),
            Err(ListingMapError::Config(_))
        ));
        let config = Config::from_toml_str("api_base = \"http://x/api/\"").unwrap();
        assert_eq!(config.api_base, "http://x/api");
    }
}
