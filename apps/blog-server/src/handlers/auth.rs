//! Session handlers - login, logout and session status.

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{HttpRequest, HttpResponse, web};

use inkpost_shared::ApiResponse;
use inkpost_shared::dto::{LoginRequest, SessionResponse, SessionStatusResponse};

use crate::middleware::auth::{CurrentViewer, SESSION_COOKIE, session_token};
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn session_cookie(value: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::seconds(max_age_secs))
        .finish()
}

/// POST /api/auth/login
///
/// Sets the session cookie on success. A failed login never touches cookies.
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let session = state.auth.login(&req.username, &req.password).await?;

    let cookie = session_cookie(
        session.token,
        state.auth.session_ttl().num_seconds(),
        state.cookie_secure,
    );

    Ok(HttpResponse::Ok().cookie(cookie).json(ApiResponse::ok_with_message(
        SessionResponse {
            username: session.admin.username,
            expires_at: session.expires_at,
        },
        "Logged in successfully.",
    )))
}

/// POST /api/auth/logout
///
/// Always succeeds and always clears the cookie.
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> AppResult<HttpResponse> {
    state.auth.logout(session_token(&req).as_deref()).await?;

    let mut cookie = session_cookie(String::new(), 0, state.cookie_secure);
    cookie.make_removal();

    Ok(HttpResponse::Ok().cookie(cookie).json(ApiResponse::ok_with_message(
        SessionStatusResponse {
            authenticated: false,
            username: None,
        },
        "Logged out successfully.",
    )))
}

/// GET /api/auth/session
pub async fn session_status(CurrentViewer(viewer): CurrentViewer) -> HttpResponse {
    let status = SessionStatusResponse {
        authenticated: viewer.is_admin(),
        username: viewer.admin().map(|a| a.username.clone()),
    };

    HttpResponse::Ok().json(ApiResponse::ok(status))
}
