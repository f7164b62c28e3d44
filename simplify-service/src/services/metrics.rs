//! Prometheus metrics for simplify-service.
//!
//! HTTP-level series come from the `metrics` recorder fed by
//! `service_core::middleware::metrics`; simplification-specific series live in
//! a dedicated `prometheus` registry. `/metrics` renders both.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub static SIMPLIFY_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static SIMPLIFY_PROVIDER_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static SIMPLIFY_PROVIDER_ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

struct Collectors {
    registry: Registry,
    requests: IntCounterVec,
    latency: HistogramVec,
    errors: IntCounterVec,
}

fn build_collectors() -> prometheus::Result<Collectors> {
    let registry = Registry::new();

    let requests = IntCounterVec::new(
        Opts::new("simplify_requests_total", "Simplify requests by outcome"),
        &["outcome"],
    )?;

    let latency = HistogramVec::new(
        HistogramOpts::new(
            "simplify_provider_latency_seconds",
            "Text provider call latency in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["provider", "model"],
    )?;

    let errors = IntCounterVec::new(
        Opts::new("simplify_provider_errors_total", "Text provider errors"),
        &["provider", "error_type"],
    )?;

    registry.register(Box::new(requests.clone()))?;
    registry.register(Box::new(latency.clone()))?;
    registry.register(Box::new(errors.clone()))?;

    Ok(Collectors {
        registry,
        requests,
        latency,
        errors,
    })
}

/// Initialize all metrics. Safe to call more than once; later calls are no-ops.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_none() {
        match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                let _ = METRICS_HANDLE.set(handle);
            }
            Err(e) => tracing::warn!(error = %e, "Failed to install Prometheus recorder"),
        }
    }

    if REGISTRY.get().is_some() {
        return;
    }

    match build_collectors() {
        Ok(collectors) => {
            let _ = REGISTRY.set(collectors.registry);
            let _ = SIMPLIFY_REQUESTS_TOTAL.set(collectors.requests);
            let _ = SIMPLIFY_PROVIDER_LATENCY_SECONDS.set(collectors.latency);
            let _ = SIMPLIFY_PROVIDER_ERRORS_TOTAL.set(collectors.errors);
            tracing::info!("Prometheus metrics initialized");
        }
        Err(e) => tracing::error!(error = %e, "Failed to create simplify metrics"),
    }
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string());

    if let Some(registry) = REGISTRY.get() {
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&registry.gather(), &mut buffer) {
            tracing::error!(error = %e, "Failed to encode metrics");
            output.push_str(&format!("# Failed to encode metrics: {}\n", e));
            return output;
        }
        output.push_str(&String::from_utf8_lossy(&buffer));
    }

    output
}

/// Record the outcome of one `/simplify` request.
pub fn record_request(outcome: &str) {
    if let Some(counter) = SIMPLIFY_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[outcome]).inc();
    }
}

/// Record provider latency.
pub fn record_provider_latency(provider: &str, model: &str, duration_secs: f64) {
    if let Some(histogram) = SIMPLIFY_PROVIDER_LATENCY_SECONDS.get() {
        histogram
            .with_label_values(&[provider, model])
            .observe(duration_secs);
    }
}

/// Record a provider error.
pub fn record_provider_error(provider: &str, error_type: &str) {
    if let Some(counter) = SIMPLIFY_PROVIDER_ERRORS_TOTAL.get() {
        counter.with_label_values(&[provider, error_type]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent_and_renders() {
        init_metrics();
        init_metrics();

        record_request("success");
        record_provider_latency("mock", "mock-model", 0.25);
        record_provider_error("mock", "api_error");

        let rendered = get_metrics();
        assert!(rendered.contains("simplify_requests_total"));
        assert!(rendered.contains("simplify_provider_latency_seconds"));
        assert!(rendered.contains("simplify_provider_errors_total"));
    }
}
