use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::app_state::AppState;
use crate::enrollment::EnrollmentError;

pub const PROFILE_CONTENT_TYPE: &str = "application/x-apple-aspen-config";

/// Generates an enrollment profile for the requesting device.
/// Any failure results in a 500 with a message for the operator.
pub async fn generate_profile(State(state): State<AppState>) -> Result<Response, EnrollmentError> {
    // Certificates are read from disk and profiles signed; keep both off the async workers.
    let body = tokio::task::spawn_blocking(move || {
        let profile = state.assembler.assemble()?;
        state.encode_profile(&profile)
    })
    .await??;

    let headers = [(header::CONTENT_TYPE, PROFILE_CONTENT_TYPE)];
    Ok((headers, body).into_response())
}
