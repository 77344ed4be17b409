//! Prometheus metrics collection for mikrodeny.
//!
//! - `mikrodeny_batches_total` - ingestion batches applied
//! - `mikrodeny_candidates_total` - address tokens received
//! - `mikrodeny_bans_issued_total{minutes}` - ban records produced, by ban length
//! - `mikrodeny_unauthorized_total` - rejected callers
//! - `mikrodeny_notify_failures_total` - chat deliveries that failed or were dropped
//! - `mikrodeny_denied_addresses` - current deny-list size

use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

// ========================================================================
// Counters
// ========================================================================

pub static BATCHES: OnceLock<IntCounter> = OnceLock::new();

pub static CANDIDATES: OnceLock<IntCounter> = OnceLock::new();

pub static BANS_ISSUED: OnceLock<IntCounterVec> = OnceLock::new();

pub static UNAUTHORIZED: OnceLock<IntCounter> = OnceLock::new();

pub static NOTIFY_FAILURES: OnceLock<IntCounter> = OnceLock::new();

// ========================================================================
// Gauges
// ========================================================================

pub static DENIED_ADDRESSES: OnceLock<IntGauge> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            if $metric.get().is_none() {
                match $init {
                    Ok(m) => {
                        if let Err(e) = r.register(Box::new(m.clone())) {
                            tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
                        }
                        let _ = $metric.set(m);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, concat!("Failed to create metric ", stringify!($metric)));
                    }
                }
            }
        };
    }

    register!(BATCHES, IntCounter::new("mikrodeny_batches_total", "Ingestion batches applied"));
    register!(CANDIDATES, IntCounter::new("mikrodeny_candidates_total", "Address tokens received"));
    register!(BANS_ISSUED, IntCounterVec::new(Opts::new("mikrodeny_bans_issued_total", "Ban records produced by ban length"), &["minutes"]));
    register!(UNAUTHORIZED, IntCounter::new("mikrodeny_unauthorized_total", "Rejected callers"));
    register!(NOTIFY_FAILURES, IntCounter::new("mikrodeny_notify_failures_total", "Chat notifications that failed or were dropped"));
    register!(DENIED_ADDRESSES, IntGauge::new("mikrodeny_denied_addresses", "Addresses on the current deny list"));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Record one applied batch and the resulting deny list.
#[inline]
pub fn record_batch(candidates: usize, ban_minutes: impl Iterator<Item = u32>, denied: usize) {
    if let Some(c) = BATCHES.get() {
        c.inc();
    }
    if let Some(c) = CANDIDATES.get() {
        c.inc_by(candidates as u64);
    }
    if let Some(c) = BANS_ISSUED.get() {
        for minutes in ban_minutes {
            c.with_label_values(&[&minutes.to_string()]).inc();
        }
    }
    if let Some(g) = DENIED_ADDRESSES.get() {
        g.set(denied as i64);
    }
}

#[inline]
pub fn record_unauthorized() {
    if let Some(c) = UNAUTHORIZED.get() {
        c.inc();
    }
}

#[inline]
pub fn record_notify_failure() {
    if let Some(c) = NOTIFY_FAILURES.get() {
        c.inc();
    }
}
