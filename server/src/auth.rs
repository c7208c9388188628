use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use application::service::AuthenticateService;
use application::transfer::AuthenticateDto;
use kernel::prelude::entity::{Role, User};
use kernel::{fail, KernelError};

use crate::error::ErrorStatus;
use crate::handler::AppModule;

/// The account a protected request was authenticated as.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let token = headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .trim()
        .strip_prefix("Bearer")?
        .trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Lets a request through only with a valid access token, and makes its
/// bearer available as [`CurrentUser`].
pub async fn protect(
    State(module): State<AppModule>,
    mut request: Request,
    next: Next,
) -> Result<Response, ErrorStatus> {
    let token = bearer_token(request.headers());
    let user = module
        .database()
        .authenticate(AuthenticateDto { token })
        .await?;
    tracing::debug!("request by user {}", user.id());
    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

/// Must run inside [`protect`].
pub async fn restrict_to_admin(request: Request, next: Next) -> Result<Response, ErrorStatus> {
    let role = request
        .extensions()
        .get::<CurrentUser>()
        .map(|CurrentUser(user)| *user.role())
        .ok_or_else(|| {
            fail(
                KernelError::Unauthorized,
                "You are not logged in! Please log in to get access.",
            )
        })?;
    if role != Role::Admin {
        return Err(fail(
            KernelError::Forbidden,
            "You do not have permission to perform this action.",
        )
        .into());
    }
    Ok(next.run(request).await)
}
