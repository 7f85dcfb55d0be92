//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. `TraceLayer` (request span with `request_id` field)
//! 3. Request ID (fill the span field, echo the header)
//! 4. Security headers (CSP built from the shop's banner config)

pub mod request_id;
pub mod security_headers;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::{content_security_policy, security_headers_middleware};
