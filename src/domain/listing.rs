//! Listing record model and payload decoding.
//!
//! The listings API answers either with a bare JSON array of records or with an
//! object carrying a `listings` array. [`decode_listings`] accepts both shapes,
//! validates each record at the boundary and drops the ones that fail, so the
//! renderer and the slider only ever see well-formed [`ListingRecord`]s.

use super::error::{ListingMapError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A rental listing as returned by the listings API.
///
/// Optional fields are absent for many records; `photos` holds file
/// identifiers resolved through the photo endpoint, with `None` entries for
/// photos the backend lost (rendered as a placeholder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_photos")]
    pub photos: Vec<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_phone")]
    pub phone: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub floor_number: Option<i32>,
    #[serde(default)]
    pub total_floors: Option<i32>,
    #[serde(default)]
    pub distance_km: Option<f64>,
}

impl ListingRecord {
    /// Checks that the record can be placed on the map.
    ///
    /// # Errors
    ///
    /// Returns [`ListingMapError::InvalidListing`] when a coordinate is out of
    /// range or the price is not a finite number.
    pub fn validate(&self) -> Result<()> {
        let reason = if !(-90.0..=90.0).contains(&self.latitude) {
            Some(format!("latitude {} out of range", self.latitude))
        } else if !(-180.0..=180.0).contains(&self.longitude) {
            Some(format!("longitude {} out of range", self.longitude))
        } else if !self.price.is_finite() {
            Some("price is not a finite number".to_string())
        } else {
            None
        };

        reason.map_or(Ok(()), |reason| {
            Err(ListingMapError::InvalidListing { id: self.id, reason })
        })
    }

    /// Number of photo slots, including ones without a file identifier.
    #[must_use]
    pub fn photo_count(&self) -> usize {
        self.photos.len()
    }
}

/// Result of decoding a listings payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedListings {
    /// Records that passed validation, in payload order.
    pub records: Vec<ListingRecord>,
    /// Number of entries dropped because they did not parse or validate.
    pub rejected: usize,
    /// The payload was neither an array nor an object with a `listings` array.
    pub malformed: bool,
}

/// Decodes a listings payload in either accepted shape.
///
/// A malformed payload is treated as zero results with a warning; it is never
/// an error.
///
/// # Examples
///
/// ```
/// use listing_map::domain::decode_listings;
///
/// let payload = serde_json::json!([
///     { "id": 1, "latitude": 41.3, "longitude": 69.2, "title": "Flat", "price": 3500000 }
/// ]);
/// let decoded = decode_listings(payload);
/// assert_eq!(decoded.records.len(), 1);
/// assert_eq!(decoded.rejected, 0);
/// ```
#[must_use]
pub fn decode_listings(payload: Value) -> DecodedListings {
    let _span = tracing::debug_span!("decode_listings").entered();

    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("listings") {
            Some(Value::Array(items)) => items,
            _ => {
                tracing::warn!("listings payload object has no `listings` array");
                return DecodedListings {
                    malformed: true,
                    ..DecodedListings::default()
                };
            }
        },
        other => {
            tracing::warn!(kind = value_kind(&other), "unexpected listings payload");
            return DecodedListings {
                malformed: true,
                ..DecodedListings::default()
            };
        }
    };

    let mut decoded = DecodedListings::default();
    decoded.records.reserve(items.len());

    for item in items {
        let record = serde_json::from_value::<ListingRecord>(item)
            .map_err(ListingMapError::from)
            .and_then(|record| record.validate().map(|()| record));

        match record {
            Ok(record) => decoded.records.push(record),
            Err(e) => {
                tracing::warn!(error = %e, "dropping listing record");
                decoded.rejected += 1;
            }
        }
    }

    tracing::debug!(
        accepted = decoded.records.len(),
        rejected = decoded.rejected,
        "listings decoded"
    );

    decoded
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Accepts a phone given as a JSON string or number; blank strings become `None`.
fn deserialize_phone<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
        }
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "phone must be a string or number, got {}",
            value_kind(&other)
        ))),
    }
}

/// Accepts `null` for the whole list and blank or `null` entries inside it.
fn deserialize_photos<'de, D>(deserializer: D) -> std::result::Result<Vec<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let photos = Option::<Vec<Option<String>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(photos
        .into_iter()
        .map(|photo| photo.filter(|id| !id.trim().is_empty()))
        .collect())
}
