//! HTTP middleware stack for the insights API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added by the binary)
//! 2. `TraceLayer` (request span with method, uri, status and latency)
//! 3. Request ID (propagate or generate `x-request-id`)
//! 4. CORS (any origin, read-only methods)

pub mod cors;
pub mod request_id;

pub use cors::cors_layer;
pub use request_id::request_id_middleware;
