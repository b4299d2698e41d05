//! Per-IP rate limiting using the token bucket algorithm.
//!
//! Requests exceeding a bucket receive `429 Too Many Requests`. The client
//! is keyed by the socket peer address, so the server must be started with
//! `into_make_service_with_connect_info::<SocketAddr>()`.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// General limiter for browsing: 2 requests per second, burst of 100.
pub fn layer() -> RateLimitLayer {
    build(2, 100)
}

/// Strict limiter for the account routes (`/users/*`): 1 request per
/// second, burst of 10. Slows down password guessing on the login form.
pub fn secure_layer() -> RateLimitLayer {
    build(1, 10)
}

fn build(per_second: u64, burst_size: u32) -> RateLimitLayer {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size(burst_size)
            .finish()
            .expect("rate limit period and burst size are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
