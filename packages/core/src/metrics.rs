//! Prometheus metrics registry for the power load monitor.
//!
//! [`AppMetrics`] owns all registered metrics and the [`Registry`] they
//! belong to. Construct it once at startup, wrap in `Arc`, and pass it
//! to the data provider and HTTP middleware.
//!
//! Exposed at `GET /metrics` in Prometheus text exposition format
//! (`text/plain; version=0.0.4`).

use prometheus::{CounterVec, Gauge, HistogramOpts, HistogramVec, Opts, Registry};

/// All application-level Prometheus metrics.
pub struct AppMetrics {
    /// Source attempts, labelled by source name and outcome
    /// (`ok`, `empty`, `error`).
    pub source_fetches_total: CounterVec,
    /// Raw rows dropped during normalization, labelled by reason.
    pub rows_rejected_total: CounterVec,
    /// Number of readings admitted by the most recent fetch.
    pub readings_admitted: Gauge,
    /// HTTP request count, labelled by method, path, and status code.
    pub http_requests_total: CounterVec,
    /// HTTP request latency in seconds, labelled by path.
    pub http_request_duration: HistogramVec,
    /// The registry that owns all of the above metrics.
    pub registry: Registry,
}

impl AppMetrics {
    /// Create and register all metrics.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let source_fetches_total = CounterVec::new(
            Opts::new(
                "power_monitor_source_fetches_total",
                "Data source attempts by source and outcome",
            ),
            &["source", "outcome"],
        )?;

        let rows_rejected_total = CounterVec::new(
            Opts::new(
                "power_monitor_rows_rejected_total",
                "Raw rows dropped during normalization by reason",
            ),
            &["reason"],
        )?;

        let readings_admitted = Gauge::with_opts(Opts::new(
            "power_monitor_readings_admitted",
            "Readings admitted by the most recent fetch",
        ))?;

        let http_requests_total = CounterVec::new(
            Opts::new(
                "power_monitor_http_requests_total",
                "HTTP requests by method, path, and status",
            ),
            &["method", "path", "status"],
        )?;

        let http_request_duration = HistogramVec::new(
            HistogramOpts::new(
                "power_monitor_http_request_duration_seconds",
                "HTTP request latency in seconds",
            )
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 15.0]),
            &["path"],
        )?;

        registry.register(Box::new(source_fetches_total.clone()))?;
        registry.register(Box::new(rows_rejected_total.clone()))?;
        registry.register(Box::new(readings_admitted.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration.clone()))?;

        Ok(Self {
            source_fetches_total,
            rows_rejected_total,
            readings_admitted,
            http_requests_total,
            http_request_duration,
            registry,
        })
    }

    pub fn record_source_attempt(&self, source: &str, outcome: &str) {
        self.source_fetches_total
            .with_label_values(&[source, outcome])
            .inc();
    }

    /// Render all metrics as Prometheus text format (for the `/metrics` endpoint).
    pub fn render(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buf = Vec::new();
        encoder.encode(&metric_families, &mut buf)?;
        Ok(String::from_utf8(buf).unwrap_or_default())
    }
}
