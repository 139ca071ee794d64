//! Metrics collection for observability
//!
//! This module provides Prometheus metrics for monitoring the ledger.
//!
//! # Metrics
//!
//! - `wallet_ledger_operations_total` - Committed operations by kind
//! - `wallet_ledger_rejections_total` - Operations rejected with a typed error
//! - `wallet_ledger_operation_duration_seconds` - Histogram of operation latencies
//! - `wallet_ledger_wallets` - Known wallet count
//!
//! Everything registers against a per-instance registry, so independent
//! ledgers (and tests) never collide on metric names.

use crate::types::TxKind;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use std::sync::Arc;

/// Metrics collector
#[derive(Clone)]
pub struct Metrics {
    /// Committed operations by kind
    pub operations_total: IntCounterVec,

    /// Rejected operations
    pub rejections_total: IntCounter,

    /// Operation duration histogram
    pub operation_duration: Histogram,

    /// Known wallet count
    pub wallets: IntGauge,

    /// Prometheus registry
    pub registry: Arc<Registry>,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> prometheus::Result<Self> {
        let registry = Arc::new(Registry::new());

        let operations_total = IntCounterVec::new(
            Opts::new(
                "wallet_ledger_operations_total",
                "Committed ledger operations by kind",
            ),
            &["kind"],
        )?;
        registry.register(Box::new(operations_total.clone()))?;

        let rejections_total = IntCounter::new(
            "wallet_ledger_rejections_total",
            "Ledger operations rejected with a typed error",
        )?;
        registry.register(Box::new(rejections_total.clone()))?;

        let operation_duration = Histogram::with_opts(
            HistogramOpts::new(
                "wallet_ledger_operation_duration_seconds",
                "Histogram of ledger operation latencies",
            )
            .buckets(vec![0.001, 0.005, 0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.0]),
        )?;
        registry.register(Box::new(operation_duration.clone()))?;

        let wallets = IntGauge::new("wallet_ledger_wallets", "Known wallet count")?;
        registry.register(Box::new(wallets.clone()))?;

        Ok(Self {
            operations_total,
            rejections_total,
            operation_duration,
            wallets,
            registry,
        })
    }

    /// Record a committed operation
    pub fn record_operation(&self, kind: TxKind) {
        self.operations_total.with_label_values(&[kind.as_str()]).inc();
    }

    /// Record a rejected operation
    pub fn record_rejection(&self) {
        self.rejections_total.inc();
    }

    /// Record operation duration
    pub fn record_operation_duration(&self, duration_seconds: f64) {
        self.operation_duration.observe(duration_seconds);
    }

    /// Record wallet creation
    pub fn record_wallet_created(&self) {
        self.wallets.inc();
    }

    /// Reset the wallet count from a store scan (done at open)
    pub fn set_wallet_count(&self, count: i64) {
        self.wallets.set(count);
    }

    /// Get metrics registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
