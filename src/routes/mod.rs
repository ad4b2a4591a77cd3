//! HTTP surface of the customer directory.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};

use crate::dto::errors::ErrorResponse;
use crate::services::{ServiceError, ServiceResult};

pub mod customer;

pub const MALFORMED_BODY_MESSAGE: &str = "Invalid request body: please provide valid JSON";
pub const MALFORMED_QUERY_MESSAGE: &str = "Invalid query parameters";

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::AlreadyExists(_) => StatusCode::CONFLICT,
            ServiceError::Validation(_) | ServiceError::MalformedRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let mut body = ErrorResponse::new(
            status.canonical_reason().unwrap_or_default(),
            self.to_string(),
        );

        match self {
            ServiceError::Validation(fields) => body = body.with_errors(fields.clone()),
            ServiceError::Internal(detail) => log::error!("Request failed: {detail}"),
            _ => {}
        }

        HttpResponse::build(status).json(body)
    }
}

/// Runs repository-bound work on the blocking thread pool.
pub(crate) async fn blocking<T, F>(work: F) -> ServiceResult<T>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    web::block(work)
        .await
        .map_err(|err| ServiceError::Internal(err.to_string()))?
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected request body: {err}");
    ServiceError::MalformedRequest(MALFORMED_BODY_MESSAGE.to_string()).into()
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected query string: {err}");
    ServiceError::MalformedRequest(MALFORMED_QUERY_MESSAGE.to_string()).into()
}

/// Mounts every customer route under `/api/v1` together with the extractor
/// configuration that keeps error bodies in the shared shape.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(
            web::scope("/api/v1")
                .service(customer::list_customers)
                .service(customer::get_customer)
                .service(customer::create_customer)
                .service(customer::update_customer)
                .service(customer::delete_customer),
        );
}
