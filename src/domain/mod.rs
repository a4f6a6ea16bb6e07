//! Domain layer for the listing map.
//!
//! Core types that do not depend on the HTTP client, the host page or the
//! filesystem: the validated listing record, contact/deep-link formatting and
//! map geometry.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`listing`]: Listing record model and payload decoding
//! - [`contact`]: Phone display, `tel:` URIs and Telegram deep links
//! - [`geo`]: Coordinates, bounds and map viewport
//!
//! # Examples
//!
//! ```
//! use listing_map::domain::decode_listings;
//!
//! let decoded = decode_listings(serde_json::json!({ "listings": [] }));
//! assert!(decoded.records.is_empty());
//! assert!(!decoded.malformed);
//! ```

pub mod contact;
pub mod error;
pub mod geo;
pub mod listing;

pub use error::{ListingMapError, Result};
pub use geo::{Bounds, LatLng, Viewport};
pub use listing::{decode_listings, DecodedListings, ListingRecord};
