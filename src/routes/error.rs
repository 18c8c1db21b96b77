//! JSON error responses.
//!
//! Every failed request answers with `{ error, message, retryable }`. The
//! status for each service error is chosen by a `*_error_to_status` helper;
//! the code and retry flag come from the error's `ErrorCode` impl.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::warn;

use crate::design::DesignError;
use crate::error::ErrorCode;
use crate::services::campaign::CampaignError;
use crate::services::catalog::CatalogError;
use crate::services::export::ExportError;
use crate::services::order::OrderError;
use crate::services::studio::StudioError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub retryable: bool,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: &'a str,
    retryable: bool,
}

impl ApiError {
    pub fn new<E: ErrorCode>(status: StatusCode, err: &E) -> Self {
        Self { status, code: err.error_code(), message: err.to_string(), retryable: err.retryable() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            warn!(status = %self.status, code = self.code, message = %self.message, "request failed");
        }
        let body = ErrorBody { error: self.code, message: &self.message, retryable: self.retryable };
        (self.status, Json(body)).into_response()
    }
}

// =============================================================================
// STATUS MAPPING
// =============================================================================

pub(crate) fn campaign_error_to_status(err: &CampaignError) -> StatusCode {
    match err {
        CampaignError::NotFound(_) => StatusCode::NOT_FOUND,
        CampaignError::InvalidPricing(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CampaignError::Design(e) => design_error_to_status(e),
    }
}

pub(crate) fn order_error_to_status(err: &OrderError) -> StatusCode {
    match err {
        OrderError::NotFound(_) => StatusCode::NOT_FOUND,
        OrderError::MissingField(_)
        | OrderError::InvalidEmail(_)
        | OrderError::QuantityOutOfRange(_)
        | OrderError::InvalidSize { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

pub(crate) fn catalog_error_to_status(err: &CatalogError) -> StatusCode {
    match err {
        CatalogError::TemplateNotFound(_) | CatalogError::ClipartNotFound(_) => StatusCode::NOT_FOUND,
    }
}

pub(crate) fn design_error_to_status(err: &DesignError) -> StatusCode {
    match err {
        DesignError::ElementNotFound(_) => StatusCode::NOT_FOUND,
        DesignError::BlankText => StatusCode::UNPROCESSABLE_ENTITY,
        DesignError::DuplicateElement(_) | DesignError::NothingSelected => StatusCode::CONFLICT,
    }
}

pub(crate) fn studio_error_to_status(err: &StudioError) -> StatusCode {
    match err {
        StudioError::DraftNotFound(_) => StatusCode::NOT_FOUND,
        StudioError::EmptyDesign | StudioError::MissingImageSource | StudioError::InvalidPricing(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        StudioError::Design(e) => design_error_to_status(e),
        StudioError::Campaign(e) => campaign_error_to_status(e),
        StudioError::Catalog(e) => catalog_error_to_status(e),
    }
}

impl From<CampaignError> for ApiError {
    fn from(err: CampaignError) -> Self {
        Self::new(campaign_error_to_status(&err), &err)
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        Self::new(order_error_to_status(&err), &err)
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        Self::new(catalog_error_to_status(&err), &err)
    }
}

impl From<StudioError> for ApiError {
    fn from(err: StudioError) -> Self {
        Self::new(studio_error_to_status(&err), &err)
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, &err)
    }
}
