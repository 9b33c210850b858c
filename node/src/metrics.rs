//! # Prometheus Metrics
//!
//! Operational counters for the wallet node, scraped at `/metrics` on the
//! metrics port. Everything lives in a dedicated [`prometheus::Registry`]
//! under the `multisig` namespace.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use std::sync::Arc;

/// Metric handles shared by every request handler.
#[derive(Clone)]
pub struct NodeMetrics {
    registry: Registry,
    /// Wallets deployed through the factory.
    pub wallets_created_total: IntCounter,
    /// Accepted transfer and quorum-change proposals.
    pub proposals_total: IntCounter,
    /// Accepted approvals, executing or not.
    pub approvals_total: IntCounter,
    /// Entries that reached quorum and executed.
    pub executions_total: IntCounter,
    /// Calls refused by the wallet core, by error kind.
    pub rejected_calls_total: IntCounterVec,
    /// Wallets currently registered.
    pub wallets: IntGauge,
}

impl NodeMetrics {
    /// Creates and registers all metrics. Call once at startup.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some("multisig".into()), None)?;

        let wallets_created_total = counter(
            &registry,
            "wallets_created_total",
            "Total number of wallets deployed by the factory",
        )?;
        let proposals_total = counter(
            &registry,
            "proposals_total",
            "Total number of accepted transfer and quorum-change proposals",
        )?;
        let approvals_total = counter(
            &registry,
            "approvals_total",
            "Total number of accepted approvals",
        )?;
        let executions_total = counter(
            &registry,
            "executions_total",
            "Total number of entries executed on reaching quorum",
        )?;

        let rejected_calls_total = IntCounterVec::new(
            Opts::new(
                "rejected_calls_total",
                "Total number of calls rejected by the wallet core",
            ),
            &["kind"],
        )?;
        registry.register(Box::new(rejected_calls_total.clone()))?;

        let wallets = IntGauge::new("wallets", "Number of wallets in the factory registry")?;
        registry.register(Box::new(wallets.clone()))?;

        Ok(Self {
            registry,
            wallets_created_total,
            proposals_total,
            approvals_total,
            executions_total,
            rejected_calls_total,
            wallets,
        })
    }

    pub fn record_rejection(&self, kind: &str) {
        self.rejected_calls_total.with_label_values(&[kind]).inc();
    }

    /// Encodes all registered metrics in the Prometheus text format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

fn counter(registry: &Registry, name: &str, help: &str) -> Result<IntCounter, prometheus::Error> {
    let counter = IntCounter::new(name, help)?;
    registry.register(Box::new(counter.clone()))?;
    Ok(counter)
}

pub type SharedMetrics = Arc<NodeMetrics>;

/// Renders `/metrics` in Prometheus text format.
pub async fn metrics_handler(
    axum::extract::State(metrics): axum::extract::State<SharedMetrics>,
) -> impl IntoResponse {
    match metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics encoding failed").into_response()
        }
    }
}
