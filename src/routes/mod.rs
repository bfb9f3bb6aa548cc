use actix_web::HttpResponse;
use serde_json::json;

use crate::services::ServiceError;

pub mod main;
pub mod products;

/// Map a service failure onto the JSON error contract.
///
/// Validation and not-found carry their own short messages; everything else
/// is logged with `context` and answered with a generic 500 body.
pub(crate) fn service_error_response(context: &str, err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Validation(message) => {
            HttpResponse::BadRequest().json(json!({ "error": message }))
        }
        ServiceError::NotFound => {
            HttpResponse::NotFound().json(json!({ "error": "Product not found" }))
        }
        err => {
            log::error!("{context}: {err}");
            HttpResponse::InternalServerError().json(json!({ "error": context }))
        }
    }
}
