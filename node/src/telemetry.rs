// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub const ANCHORS_SUBMITTED: &str = "attest_anchors_submitted_total";
pub const ANCHORS_CONFIRMED: &str = "attest_anchors_confirmed_total";
pub const ANCHORS_FAILED: &str = "attest_anchors_failed_total";
pub const ANCHORS_TIMED_OUT: &str = "attest_anchors_timed_out_total";
pub const ANCHORS_SIMULATED: &str = "attest_anchors_simulated_total";
pub const DEGRADED_READS: &str = "attest_degraded_reads_total";
pub const RECEIPT_POLLS: &str = "attest_receipt_poll_attempts";

/// Logs only, to stderr. Filter from `RUST_LOG`.
pub fn init_logging() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "attest_node=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Initialize telemetry (logs + metrics)
pub fn init_telemetry() {
    // 1. Logs
    init_logging();

    // 2. Metrics (Prometheus)
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if PROM_HANDLE.set(handle).is_err() {
                tracing::warn!("Prometheus handle already set. Telemetry re-initialized?");
            }
        }
        Err(e) => tracing::warn!("Prometheus recorder not installed: {}", e),
    }

    metrics::describe_counter!(ANCHORS_SUBMITTED, "Anchor transactions submitted");
    metrics::describe_counter!(ANCHORS_CONFIRMED, "Anchor transactions confirmed with success status");
    metrics::describe_counter!(ANCHORS_FAILED, "Anchor transactions mined with failure status");
    metrics::describe_counter!(ANCHORS_TIMED_OUT, "Anchor transactions with no receipt within the poll budget");
    metrics::describe_counter!(ANCHORS_SIMULATED, "Versions marked with a simulated anchor");
    metrics::describe_counter!(DEGRADED_READS, "Advisory reads answered with a default value");
    metrics::describe_histogram!(RECEIPT_POLLS, "Receipt polls needed to reach a final state");
}

/// Get the Prometheus handle to render metrics
pub fn get_metrics() -> String {
    if let Some(handle) = PROM_HANDLE.get() {
        handle.render()
    } else {
        "# metrics not initialized".to_string()
    }
}
