//! Span export to a local OTLP JSON file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → FileSpanExporter → otlp.json
//! ```
//!
//! Each exported batch becomes one line of OTLP/JSON in `otlp.json` under the
//! data directory. The file is rotated at 10 MB and the three most recent
//! rotations are kept as `otlp.json.1` … `otlp.json.3`.
//!
//! The filter comes from `RUST_LOG` when set, otherwise from `trace_level` in
//! the configuration, otherwise `info`. With `log_to_stderr` a human-readable
//! fmt layer is stacked on top, which is what the CLI uses while debugging.

mod exporter;
mod init;
mod otlp;
mod rotating;

pub use init::{init_tracing, SERVICE_NAME};
