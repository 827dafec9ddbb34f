//! Request ID middleware - tags every request with an identifier.

use actix_web::{
    Error,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderName, HeaderValue},
    middleware::Next,
};
use tracing::Instrument;
use uuid::Uuid;

/// Header carrying the request ID, in both directions.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Reuse the caller's `X-Request-ID` (e.g. from a load balancer) or mint one,
/// run the rest of the chain inside a span carrying it, and echo it back.
///
/// Install with `actix_web::middleware::from_fn(request_id)`.
pub async fn request_id(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let span = tracing::info_span!("request", request_id = %request_id);

    let mut res = next.call(req).instrument(span).await?;

    res.headers_mut().insert(
        HeaderName::from_static(REQUEST_ID_HEADER),
        HeaderValue::from_str(&request_id).unwrap_or_else(|_| HeaderValue::from_static("unknown")),
    );

    Ok(res)
}
