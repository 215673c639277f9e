use axum::extract::{MatchedPath, Request};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static SHIP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "starfleet_ship_requests_total",
        "Ship API requests by method, route and response status",
        &["method", "route", "status"]
    )
    .expect("register ship_requests_total")
});

pub static SHIP_CHANGES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "starfleet_ship_changes_total",
        "Successful ship writes by operation",
        &["op"]
    )
    .expect("register ship_changes_total")
});

/// `op` is one of `created`, `updated`, `deleted`.
pub fn record_change(op: &str) {
    SHIP_CHANGES_TOTAL.with_label_values(&[op]).inc();
}

/// Count one finished ship request.
pub fn observe(method: &str, route: &str, status: StatusCode) {
    SHIP_REQUESTS_TOTAL
        .with_label_values(&[method, route, status.as_str()])
        .inc();
}

/// Route-layer middleware recording every response of the wrapped routes.
pub async fn track(req: Request, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let method = req.method().clone();
    let resp = next.run(req).await;
    observe(method.as_str(), &route, resp.status());
    resp
}

pub async fn metrics() -> (StatusCode, String) {
    encode_metrics()
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
    (
        StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observed_requests_show_up_in_exposition() {
        observe("GET", "/rest/ships/count", StatusCode::OK);
        let (status, body) = encode_metrics();
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("starfleet_ship_requests_total"));
        assert!(body.contains(r#"route="/rest/ships/count""#));
    }

    #[test]
    fn writes_are_counted_per_operation() {
        let before = SHIP_CHANGES_TOTAL.with_label_values(&["deleted"]).get();
        record_change("deleted");
        assert_eq!(SHIP_CHANGES_TOTAL.with_label_values(&["deleted"]).get(), before + 1);
        assert!(encode_metrics().1.contains(r#"starfleet_ship_changes_total{op="deleted"}"#));
    }
}
