use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use application::transfer::AuthenticatedDto;
use kernel::prelude::entity::User;

use crate::controller::Exhaust;
use crate::response::SUCCESS;

#[derive(Debug, Serialize)]
struct UserData {
    user: User,
}

/// `{"status":"success","token":…,"data":{"user":…}}`
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    #[serde(skip)]
    code: StatusCode,
    status: &'static str,
    token: String,
    data: UserData,
}

impl IntoResponse for AuthResponse {
    fn into_response(self) -> Response {
        (self.code, Json(self)).into_response()
    }
}

pub struct AuthPresenter {
    code: StatusCode,
}

impl AuthPresenter {
    pub fn new(code: StatusCode) -> Self {
        Self { code }
    }
}

impl Exhaust<AuthenticatedDto> for AuthPresenter {
    type To = AuthResponse;
    fn emit(&self, input: AuthenticatedDto) -> Self::To {
        AuthResponse {
            code: self.code,
            status: SUCCESS,
            token: input.token,
            data: UserData { user: input.user },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    status: &'static str,
    data: UserData,
}

impl IntoResponse for UserResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct UserPresenter;

impl Exhaust<User> for UserPresenter {
    type To = UserResponse;
    fn emit(&self, input: User) -> Self::To {
        UserResponse {
            status: SUCCESS,
            data: UserData { user: input },
        }
    }
}
