//! Background worker for listings I/O.
//!
//! Network requests run on a tokio task so the page session stays responsive
//! while the backend is slow. Messages carry trace context across the channel
//! so worker spans appear under the span that posted them.
//!
//! # Architecture
//!
//! - `messages`: request/response protocol with trace context propagation
//! - `handler`: worker task and the session-side channel handle

pub mod handler;
pub mod messages;

pub use handler::{ListingsWorker, WorkerHandle};
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
