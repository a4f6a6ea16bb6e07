//! `SpanExporter` that appends OTLP JSON lines to a rotating file.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::future::{self, BoxFuture};
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Config as TraceConfig, TracerProvider};

use super::otlp;
use super::rotating::RotatingLog;

#[derive(Debug)]
struct FileSpanExporter {
    log: RotatingLog,
    resource: Resource,
    closed: AtomicBool,
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.closed.load(Ordering::Acquire) {
            return Box::pin(future::ready(Err(TraceError::from("span exporter closed"))));
        }

        let line = otlp::encode_batch(&self.resource, &batch).to_string();
        let result = self
            .log
            .append_line(&line)
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(future::ready(result))
    }

    fn shutdown(&mut self) {
        self.closed.store(true, Ordering::Release);
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Builds a provider that exports every finished span straight to `path`.
///
/// Uses the simple (unbatched) processor: spans are few and the CLI exits
/// right after rendering, so there is no background batch to flush.
pub fn file_tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter {
        log: RotatingLog::new(path),
        resource: resource.clone(),
        closed: AtomicBool::new(false),
    };

    TracerProvider::builder()
        .with_config(TraceConfig::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
