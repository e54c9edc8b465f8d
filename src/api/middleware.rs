//! API Middleware - Request Logging and Rate Limiting
//!
//! Request middleware for the gateway:
//! - Structured request logging (method, path, status, duration)
//! - In-memory per-IP rate limiting, engaged only in production mode

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::api::server::SharedAppState;

// ============================================================================
// Rate Limiting
// ============================================================================

/// Rate limiter configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(60),
        }
    }
}

/// Rate limit entry for a single client
#[derive(Debug, Clone)]
struct RateLimitEntry {
    count: u32,
    window_start: Instant,
}

/// In-memory rate limiter keyed by client IP
pub struct RateLimiter {
    config: RateLimitConfig,
    entries: RwLock<HashMap<String, RateLimitEntry>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Check if a request is allowed for the given client ID
    pub async fn check(&self, client_id: &str) -> Result<(), RateLimitError> {
        let mut entries = self.entries.write().await;
        let now = Instant::now();

        let entry = entries
            .entry(client_id.to_string())
            .or_insert(RateLimitEntry {
                count: 0,
                window_start: now,
            });

        if now.duration_since(entry.window_start) >= self.config.window {
            entry.count = 0;
            entry.window_start = now;
        }

        if entry.count < self.config.max_requests {
            entry.count += 1;
            Ok(())
        } else {
            let retry_after = self.config.window.as_secs()
                - now.duration_since(entry.window_start).as_secs();
            Err(RateLimitError::Exceeded { retry_after })
        }
    }

    /// Drop entries whose window expired long ago
    pub async fn cleanup(&self) {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        let expiry = self.config.window * 2;

        entries.retain(|_, entry| now.duration_since(entry.window_start) < expiry);
    }
}

#[derive(Debug)]
pub enum RateLimitError {
    Exceeded { retry_after: u64 },
}

/// Shared rate limiter state
pub type RateLimitState = Arc<RateLimiter>;

/// Create a new rate limiter with default config
pub fn create_rate_limiter() -> RateLimitState {
    Arc::new(RateLimiter::new(RateLimitConfig::default()))
}

/// Extract client IP from request headers
pub fn extract_client_ip(headers: &HeaderMap) -> Option<String> {
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        if let Ok(value) = forwarded.to_str() {
            return Some(value.split(',').next()?.trim().to_string());
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip") {
        if let Ok(value) = real_ip.to_str() {
            return Some(value.to_string());
        }
    }

    None
}

/// Rate limiting middleware; a no-op when the limiter is disabled
/// (development mode).
pub async fn rate_limit(
    State(state): State<SharedAppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    if let Some(limiter) = &state.rate_limiter {
        let client_id = extract_client_ip(&headers).unwrap_or_else(|| "unknown".to_string());
        if let Err(RateLimitError::Exceeded { retry_after }) = limiter.check(&client_id).await {
            return (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({
                    "error": "Rate limit exceeded",
                    "retry_after": retry_after,
                })),
            )
                .into_response();
        }
    }

    next.run(request).await
}

/// Request logging middleware
pub async fn track_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        %method,
        path,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "request"
    );

    response
}

// ============================================================================
// Tests
// ============================================================================
