//! Session cookie extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures::future::LocalBoxFuture;

use inkpost_core::domain::Viewer;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the admin session token.
pub const SESSION_COOKIE: &str = "session_token";

/// The viewer behind the current request, resolved from the session cookie.
///
/// Never rejects: a missing, unknown or expired token yields `Viewer::Anonymous`.
/// ```ignore
/// async fn handler(CurrentViewer(viewer): CurrentViewer) -> impl Responder {
///     format!("admin: {}", viewer.is_admin())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentViewer(pub Viewer);

impl FromRequest for CurrentViewer {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = session_token(req);

        Box::pin(async move {
            let Some(state) = state else {
                tracing::error!("AppState not found in app data");
                return Err(AppError::Internal("Server configuration error".to_string()));
            };

            let viewer = state.auth.viewer(token.as_deref()).await?;
            Ok(CurrentViewer(viewer))
        })
    }
}

/// The raw session token from the request cookie, if any.
pub fn session_token(req: &HttpRequest) -> Option<String> {
    req.cookie(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}
