//! Identity extractor for the App Service authentication header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use ssp_core::principal::{parse_client_principal, Principal};

use crate::error::AppError;
use crate::state::AppState;

/// Header injected by the hosting platform's authentication layer.
pub const CLIENT_PRINCIPAL_HEADER: &str = "x-ms-client-principal";

/// The caller's identity, extracted from the `X-MS-CLIENT-PRINCIPAL` header.
///
/// The portal sits behind platform authentication, so the header is trusted
/// as-is. A missing header yields the guest principal (local development
/// runs without the authentication layer); a present but malformed header
/// is rejected with 401.
///
/// ```ignore
/// async fn my_handler(user: PortalUser) -> AppResult<Json<()>> {
///     tracing::info!(user = %user.principal.display_name, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PortalUser {
    pub principal: Principal,
}

impl PortalUser {
    /// Lowercased candidate emails for ownership matching.
    pub fn emails(&self) -> &[String] {
        &self.principal.emails
    }
}

impl FromRequestParts<AppState> for PortalUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(CLIENT_PRINCIPAL_HEADER) else {
            return Ok(PortalUser {
                principal: Principal::guest(),
            });
        };

        let encoded = header
            .to_str()
            .map_err(|_| AppError::Core(ssp_core::error::CoreError::Unauthorized(
                "Malformed identity assertion".into(),
            )))?;

        let principal = parse_client_principal(encoded).map_err(AppError::Core)?;
        Ok(PortalUser { principal })
    }
}
