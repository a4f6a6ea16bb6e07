//! Request/response protocol between the page session and the listings worker.
//!
//! Messages carry an optional [`TraceContext`] so that spans opened inside the
//! worker task are parented to the span that posted the request.

use serde::{Deserialize, Serialize};

use crate::domain::ListingRecord;
use crate::infrastructure::api::ListingQuery;

/// Trace and parent span identifiers captured on the posting side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as 32 hex digits.
    pub trace_id: String,

    /// Span ID of the posting span as 16 hex digits.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry context of the current tracing span.
    ///
    /// Returns `None` when no valid span is active, e.g. when tracing was never
    /// initialized.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        span_context.is_valid().then(|| Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates constructors that stamp each message with the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Creates a `", stringify!($variant), "` message with the current trace context.")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_listings(LoadListings { query: ListingQuery }),
    save_listing(SaveListing { listing_id: i64, user_id: String }),
}

/// Requests posted to the worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Fetch, decode and validate listings.
    LoadListings {
        query: ListingQuery,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Forward a listing to the user's chat through the backend.
    SaveListing {
        listing_id: i64,
        user_id: String,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadListings { trace_context, .. } | Self::SaveListing { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }
}

/// Results posted back by the worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// Listings arrived. An unrecognized payload shape arrives as an empty
    /// list with `malformed` set.
    ListingsLoaded {
        listings: Vec<ListingRecord>,
        /// Records dropped during validation.
        rejected: usize,
        malformed: bool,
    },

    /// The request failed before a payload was available.
    LoadFailed { message: String },

    ListingSaved { listing_id: i64 },

    SaveFailed { listing_id: i64, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_skip_missing_trace_context() {
        let message = WorkerMessage::load_listings(ListingQuery::All);
        assert_eq!(message.trace_context(), None);

        let json = serde_json::to_value(&message).unwrap();
        assert!(json["LoadListings"].get("trace_context").is_none());
    }

    #[test]
    fn save_message_round_trips_through_json() {
        let message = WorkerMessage::save_listing(5, "42".to_string());
        let json = serde_json::to_string(&message).unwrap();
        let back: WorkerMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, message);
    }
}
