//! Contact endpoints.
//!
//! Both contact paths are served; the front end picks one.
//! - `POST /api/contact`: schema-checked form, logged server-side
//! - `POST /api/contact/whatsapp`: pre-filled `wa.me` link or a notification
//! - `GET /api/contact/whatsapp?product_id=`: inquiry link for one product,
//!   or the generic link without `product_id`

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use emporio_core::contact::{
    validate_contact_form, ComposeOutcome, ContactForm, DeepLink, FormState,
};
use emporio_core::validation::parse_optional_id;
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

pub const INVALID_BODY: &str = "Corpo da requisição inválido";

pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            debug!(error = %rejection, "Rejected request body");
            Err(ApiError::bad_request(INVALID_BODY))
        }
    }
}

/// `POST /api/contact`
///
/// 200 with a success [`FormState`], or 400 with field errors. Accepted
/// submissions are written to the log under a fresh reference id.
pub async fn submit_form(
    body: Result<Json<ContactForm>, JsonRejection>,
) -> Result<(StatusCode, Json<FormState>), ApiError> {
    let form = json_body(body)?;

    match validate_contact_form(&form) {
        Ok(submission) => {
            let reference = Uuid::new_v4();
            info!(
                %reference,
                received_at = %Utc::now().to_rfc3339(),
                name = %submission.name,
                "Contact form submitted"
            );
            debug!(
                %reference,
                phone = %submission.phone,
                message = %submission.message,
                "Contact form details"
            );
            Ok((StatusCode::OK, Json(FormState::accepted())))
        }
        Err(errors) => {
            info!(fields = ?errors.keys().collect::<Vec<_>>(), "Contact form rejected");
            Ok((StatusCode::BAD_REQUEST, Json(FormState::rejected(errors))))
        }
    }
}

/// `POST /api/contact/whatsapp`
pub async fn compose_whatsapp(
    State(state): State<AppState>,
    body: Result<Json<ContactForm>, JsonRejection>,
) -> Result<Json<ComposeOutcome>, ApiError> {
    let form = json_body(body)?;
    Ok(Json(state.whatsapp.compose(&form)))
}

#[derive(Debug, Default, Deserialize)]
pub struct InquiryQuery {
    pub product_id: Option<String>,
}

/// `GET /api/contact/whatsapp`
pub async fn inquiry_link(
    State(state): State<AppState>,
    Query(query): Query<InquiryQuery>,
) -> Result<Json<DeepLink>, ApiError> {
    let Some(product_id) = parse_optional_id(query.product_id.as_deref(), "product_id")? else {
        return Ok(Json(state.whatsapp.general_inquiry()));
    };

    let product = state
        .catalog
        .get_product(product_id)
        .await
        .ok_or_else(ApiError::product_not_found)?;
    Ok(Json(state.whatsapp.product_inquiry(&product)))
}
