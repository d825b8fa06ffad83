//! Process-wide Prometheus counters for the finance API.
//!
//! Counters live in the default registry so `encode_metrics` can render
//! everything registered by any crate in the process.

use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

pub static ENTRY_OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "finance_entry_operations_total",
        "Entry service operations by operation and outcome",
        &["op", "outcome"]
    )
    .expect("register entry_operations_total")
});

pub static AUTH_ATTEMPTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "finance_auth_attempts_total",
        "Authentication attempts by outcome",
        &["outcome"]
    )
    .expect("register auth_attempts_total")
});

/// Count one entry operation. `outcome` is `ok`, `rejected` or `error`.
pub fn record_entry_op(op: &str, outcome: &str) {
    ENTRY_OPERATIONS_TOTAL.with_label_values(&[op, outcome]).inc();
}

pub fn record_auth_attempt(outcome: &str) {
    AUTH_ATTEMPTS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_operations_show_up_in_exposition() {
        record_entry_op("create", "ok");
        record_auth_attempt("rejected");
        let (status, body) = encode_metrics();
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("finance_entry_operations_total"));
        assert!(body.contains("op=\"create\""));
        assert!(body.contains("finance_auth_attempts_total"));
    }
}
