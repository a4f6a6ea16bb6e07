//! Background worker that owns all network I/O.
//!
//! The session never awaits HTTP itself. It posts [`WorkerMessage`]s into a
//! channel; a tokio task drains the channel, calls the [`ListingSource`] and
//! posts a [`WorkerResponse`] back for every request.
//!
//! ```text
//! MapSession ──WorkerMessage──▶ ListingsWorker ──▶ ListingSource (HTTP)
//!      ▲                              │
//!      └────────WorkerResponse────────┘
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::Instrument;

use crate::domain::error::{ListingMapError, Result};
use crate::domain::listing::decode_listings;
use crate::infrastructure::api::{ListingQuery, ListingSource};
use crate::worker::{TraceContext, WorkerMessage, WorkerResponse};

/// Processes worker messages against a listing source.
#[derive(Debug)]
pub struct ListingsWorker<S> {
    source: Arc<S>,
}

impl<S> Clone for ListingsWorker<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: ListingSource + 'static> ListingsWorker<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    /// Handles one message to completion.
    ///
    /// Failures are folded into the response; this never returns an error.
    pub async fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let span = tracing::debug_span!("worker_handle_message", message_type = message_type(&message));
        if let Some(parent) = message.trace_context().and_then(remote_parent) {
            use tracing_opentelemetry::OpenTelemetrySpanExt;
            span.set_parent(parent);
        }

        async move {
            match message {
                WorkerMessage::LoadListings { query, .. } => self.handle_load_listings(&query).await,
                WorkerMessage::SaveListing {
                    listing_id, user_id, ..
                } => self.handle_save_listing(listing_id, &user_id).await,
            }
        }
        .instrument(span)
        .await
    }

    async fn handle_load_listings(&self, query: &ListingQuery) -> WorkerResponse {
        match self.source.fetch_listings(query).await {
            Ok(payload) => {
                let decoded = decode_listings(payload);
                tracing::debug!(
                    listings = decoded.records.len(),
                    rejected = decoded.rejected,
                    malformed = decoded.malformed,
                    "listings loaded"
                );
                WorkerResponse::ListingsLoaded {
                    listings: decoded.records,
                    rejected: decoded.rejected,
                    malformed: decoded.malformed,
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "listings request failed");
                WorkerResponse::LoadFailed {
                    message: e.to_string(),
                }
            }
        }
    }

    async fn handle_save_listing(&self, listing_id: i64, user_id: &str) -> WorkerResponse {
        match self.source.save_listing(listing_id, user_id).await {
            Ok(_) => {
                tracing::debug!(listing_id, "listing saved");
                WorkerResponse::ListingSaved { listing_id }
            }
            Err(e) => {
                tracing::debug!(listing_id, error = %e, "save request failed");
                WorkerResponse::SaveFailed {
                    listing_id,
                    message: e.to_string(),
                }
            }
        }
    }

    /// Runs the worker on the current tokio runtime.
    ///
    /// Requests are handled one at a time, in arrival order. The task stops
    /// when the returned handle is dropped.
    #[must_use]
    pub fn spawn(self) -> WorkerHandle {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<WorkerMessage>();
        let (response_tx, response_rx) = mpsc::unbounded_channel::<WorkerResponse>();

        tokio::spawn(async move {
            while let Some(message) = request_rx.recv().await {
                let response = self.handle_message(message).await;
                if response_tx.send(response).is_err() {
                    tracing::debug!("response receiver dropped, stopping worker");
                    break;
                }
            }
            tracing::debug!("listings worker stopped");
        });

        WorkerHandle {
            requests: request_tx,
            responses: response_rx,
        }
    }
}

/// Session-side ends of the worker channels.
#[derive(Debug)]
pub struct WorkerHandle {
    requests: mpsc::UnboundedSender<WorkerMessage>,
    responses: mpsc::UnboundedReceiver<WorkerResponse>,
}

impl WorkerHandle {
    /// Queues a message for the worker.
    ///
    /// # Errors
    ///
    /// Returns [`ListingMapError::Worker`] if the worker task has stopped.
    pub fn post(&self, message: WorkerMessage) -> Result<()> {
        self.requests
            .send(message)
            .map_err(|_| ListingMapError::Worker("listings worker is not running".to_string()))
    }

    /// Waits for the next response; `None` once the worker has stopped.
    pub async fn recv(&mut self) -> Option<WorkerResponse> {
        self.responses.recv().await
    }

    /// Returns a response if one is already waiting.
    pub fn try_recv(&mut self) -> Option<WorkerResponse> {
        self.responses.try_recv().ok()
    }
}

const fn message_type(message: &WorkerMessage) -> &'static str {
    match message {
        WorkerMessage::LoadListings { .. } => "load_listings",
        WorkerMessage::SaveListing { .. } => "save_listing",
    }
}

/// Rebuilds the poster's span context so worker spans join its trace.
fn remote_parent(trace_context: &TraceContext) -> Option<opentelemetry::Context> {
    use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

    let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
    let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

    let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
    Some(opentelemetry::Context::new().with_remote_span_context(span_context))
}
