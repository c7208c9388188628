use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::routing::{delete, get, patch, post};
use axum::{Extension, Router};
use uuid::Uuid;

use application::service::{
    DeactivateService, DeleteUserService, GetDocumentService, LoginService, SignupService,
    UpdateDocumentService, UpdateMeService, UpdatePasswordService,
};
use kernel::prelude::entity::User;

use crate::auth::{restrict_to_admin, CurrentUser};
use crate::controller::Controller;
use crate::extract::{Json, Path, Query};
use crate::handler::AppModule;
use crate::request::{DeleteRequest, GetRequest, ListRequest, Transformer};
use crate::response::{DeletedPresenter, DocumentPresenter, ListPresenter};

pub use self::{request::*, response::*};

mod request;
mod response;

pub trait UserRouter {
    /// Account routes of the signed-in user, plus the admin-only user
    /// management routes.
    fn route_user(self) -> Self;
    fn route_account_public(self) -> Self;
}

impl UserRouter for Router<AppModule> {
    fn route_user(self) -> Self {
        let admin = Router::new()
            .route(
                "/users",
                get(
                    |State(module): State<AppModule>,
                     Query(params): Query<Vec<(String, String)>>| async move {
                        Controller::new(Transformer, ListPresenter)
                            .intake(ListRequest::new(params))
                            .handle(|dto| async move {
                                module.database().list_documents::<User>(dto).await
                            })
                            .await
                    },
                ),
            )
            .route(
                "/users/:id",
                get(
                    |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                        Controller::new(Transformer, DocumentPresenter)
                            .intake(GetRequest::new(id))
                            .handle(|dto| async move {
                                module.database().get_document::<User>(dto).await
                            })
                            .await
                    },
                )
                .patch(
                    |State(module): State<AppModule>,
                     Path(id): Path<Uuid>,
                     Json(req): Json<UpdateUserRequest>| async move {
                        Controller::new(Transformer, DocumentPresenter)
                            .intake((id, req))
                            .handle(|dto| async move {
                                module.database().update_document(dto).await
                            })
                            .await
                    },
                )
                .delete(
                    |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                        Controller::new(Transformer, DeletedPresenter)
                            .intake(DeleteRequest::new(id))
                            .handle(|dto| async move { module.database().delete_user(dto).await })
                            .await
                    },
                ),
            )
            .route_layer(from_fn(restrict_to_admin));

        self.route(
            "/users/me",
            get(
                |State(module): State<AppModule>,
                 Extension(CurrentUser(user)): Extension<CurrentUser>| async move {
                    Controller::new(Transformer, DocumentPresenter)
                        .intake(GetRequest::new(*user.id().as_ref()))
                        .handle(|dto| async move {
                            module.database().get_document::<User>(dto).await
                        })
                        .await
                },
            ),
        )
        .route(
            "/users/updateMe",
            patch(
                |State(module): State<AppModule>,
                 Extension(CurrentUser(user)): Extension<CurrentUser>,
                 Json(req): Json<UpdateUserRequest>| async move {
                    Controller::new(Transformer, UserPresenter)
                        .intake(UpdateMeRequest::new(*user.id().as_ref(), req))
                        .handle(|dto| async move { module.database().update_me(dto).await })
                        .await
                },
            ),
        )
        .route(
            "/users/updateMyPassword",
            patch(
                |State(module): State<AppModule>,
                 Extension(CurrentUser(user)): Extension<CurrentUser>,
                 Json(req): Json<UpdatePasswordRequest>| async move {
                    Controller::new(Transformer, AuthPresenter::new(StatusCode::OK))
                        .intake((*user.id().as_ref(), req))
                        .handle(|dto| async move { module.database().update_password(dto).await })
                        .await
                },
            ),
        )
        .route(
            "/users/deleteMe",
            delete(
                |State(module): State<AppModule>,
                 Extension(CurrentUser(user)): Extension<CurrentUser>| async move {
                    Controller::new(Transformer, DeletedPresenter)
                        .intake(DeleteRequest::new(*user.id().as_ref()))
                        .handle(|dto| async move { module.database().deactivate(dto.id).await })
                        .await
                },
            ),
        )
        .merge(admin)
    }

    fn route_account_public(self) -> Self {
        self.route(
            "/users/signup",
            post(
                |State(module): State<AppModule>, Json(req): Json<SignupRequest>| async move {
                    Controller::new(Transformer, AuthPresenter::new(StatusCode::CREATED))
                        .intake(req)
                        .handle(|dto| async move { module.database().signup(dto).await })
                        .await
                },
            ),
        )
        .route(
            "/users/login",
            post(
                |State(module): State<AppModule>, Json(req): Json<LoginRequest>| async move {
                    Controller::new(Transformer, AuthPresenter::new(StatusCode::OK))
                        .intake(req)
                        .handle(|dto| async move { module.database().login(dto).await })
                        .await
                },
            ),
        )
    }
}
