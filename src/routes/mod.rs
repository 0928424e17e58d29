use actix_web::HttpResponse;
use serde_json::json;

use crate::services::ServiceError;

pub mod orders;
pub mod products;

/// Map a service error onto the HTTP boundary.
///
/// Ownership failures answer 401 so a caller probing someone else's
/// resources learns nothing beyond "not yours".
pub(crate) fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        ServiceError::Forbidden => HttpResponse::Unauthorized().finish(),
        ServiceError::Validation(message) => {
            HttpResponse::UnprocessableEntity().json(json!({ "error": message }))
        }
        ServiceError::Internal(message) => {
            log::error!("Request failed: {message}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Parse a numeric path segment. Anything that is not a valid id reads as
/// an address with no resource behind it, so callers get 404 rather than a
/// routing error.
pub(crate) fn parse_id(raw: &str) -> Option<i32> {
    raw.parse::<i32>().ok().filter(|id| *id > 0)
}
