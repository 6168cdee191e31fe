//! Prometheus metrics

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Loading a league through the cache
    DatasetLoad,
    /// One matchup analysis, snapshots through scorelines
    Analysis,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Matches in the most recently loaded dataset
    DatasetMatches,
    /// Signals fired by the most recent analysis
    LastSignalCount,
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let metric_name = match metric {
        LatencyMetric::DatasetLoad => "formsignals_dataset_load_latency_ms",
        LatencyMetric::Analysis => "formsignals_analysis_latency_ms",
    };

    let value_ms = duration.as_secs_f64() * 1000.0;
    metrics::histogram!(metric_name).record(value_ms);
    tracing::trace!(metric = metric_name, value_ms, "Recorded latency");
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    let metric_name = match metric {
        GaugeMetric::DatasetMatches => "formsignals_dataset_matches",
        GaugeMetric::LastSignalCount => "formsignals_last_signal_count",
    };

    metrics::gauge!(metric_name).set(value);
}

/// Serve Prometheus metrics on `0.0.0.0:port`
///
/// Must be called from within a tokio runtime.
pub fn init_metrics_exporter(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to start metrics exporter: {}", e))?;

    tracing::info!(%addr, "Metrics exporter listening");
    Ok(())
}
