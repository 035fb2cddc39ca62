//! Observability infrastructure - Metrics configuration and recording

mod config;
mod metrics;

pub use config::{MetricsConfig, ObservabilityConfig};
pub use metrics::{
    create_metrics_router, init_metrics, record_conversion, record_http_request,
    PrometheusMetrics,
};
