//! Application layer: page session, events and actions.
//!
//! Sits between the host runtime (`main.rs` or a browser binding) and the
//! domain, slider and worker layers.
//!
//! ```text
//! Host input ─▶ Event ─▶ handle_event ─▶ MapSession mutations ─▶ Actions ─▶ Host effects
//!                             ▲                                      │
//!                             └────────── WorkerResponse ◀───────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effects emitted by the handler
//! - [`handler`]: event processing
//! - [`map`]: markers and the cluster group
//! - [`state`]: the [`MapSession`] and view model computation

pub mod actions;
pub mod handler;
pub mod map;
pub mod state;

pub use actions::{Action, LinkOpener, Notice};
pub use handler::{handle_event, Event};
pub use map::{ClusterOptions, Marker, MarkerCluster};
pub use state::{HostCapabilities, LoadStatus, MapSession, OpenPopup};
