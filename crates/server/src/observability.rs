use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};
use service::ServiceError;

// Prometheus metrics (default registry)
pub static OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "blog_records_operations_total",
        "Service operations by entity kind, operation and outcome",
        &["kind", "op", "outcome"]
    )
    .expect("register operations_total")
});

/// Count one finished service call.
pub fn observe<T>(kind: &str, op: &str, res: &Result<T, ServiceError>) {
    let outcome = match res {
        Ok(_) => "ok",
        Err(e) => e.code(),
    };
    OPERATIONS_TOTAL.with_label_values(&[kind, op, outcome]).inc();
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observed_calls_show_up_in_exposition() {
        observe::<()>("tag", "get", &Err(ServiceError::not_found("tag", 9)));
        let before = OPERATIONS_TOTAL.with_label_values(&["tag", "get", "not_found"]).get();
        assert!(before >= 1);

        let (status, body) = encode_metrics();
        assert_eq!(status, axum::http::StatusCode::OK);
        assert!(body.contains("blog_records_operations_total"));
    }
}
