use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use uuid::Uuid;

use application::service::{
    CreateRentalService, DeleteDocumentService, PartyViewService, ReturnRentalService,
};
use kernel::prelude::entity::Rental;

use crate::controller::Controller;
use crate::extract::{Json, Path, Query};
use crate::handler::AppModule;
use crate::request::{DeleteRequest, GetRequest, ListRequest, Transformer};
use crate::response::{DeletedPresenter, ListPresenter, ViewPresenter};

pub use self::{request::*, response::*};

mod request;
mod response;

pub trait RentalRouter {
    fn route_rental(self) -> Self;
}

impl RentalRouter for Router<AppModule> {
    fn route_rental(self) -> Self {
        self.route(
            "/rentals",
            get(
                |State(module): State<AppModule>,
                 Query(params): Query<Vec<(String, String)>>| async move {
                    Controller::new(Transformer, ListPresenter)
                        .intake(ListRequest::new(params))
                        .handle(|dto| async move {
                            module.database().list_with_parties::<Rental>(dto).await
                        })
                        .await
                },
            )
            .post(
                |State(module): State<AppModule>, Json(req): Json<CreateRentalRequest>| async move {
                    Controller::new(Transformer, RentalPresenter::new(StatusCode::CREATED))
                        .intake(req)
                        .handle(|dto| async move { module.database().create_rental(dto).await })
                        .await
                },
            ),
        )
        .route(
            "/rentals/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, ViewPresenter)
                        .intake(GetRequest::new(id))
                        .handle(|dto| async move {
                            module.database().get_with_parties::<Rental>(dto).await
                        })
                        .await
                },
            )
            .delete(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, DeletedPresenter)
                        .intake(DeleteRequest::new(id))
                        .handle(|dto| async move {
                            module.database().delete_document::<Rental>(dto).await
                        })
                        .await
                },
            ),
        )
        .route(
            "/returns",
            post(
                |State(module): State<AppModule>, Json(req): Json<ReturnRentalRequest>| async move {
                    Controller::new(Transformer, RentalPresenter::new(StatusCode::OK))
                        .intake(req)
                        .handle(|dto| async move { module.database().return_rental(dto).await })
                        .await
                },
            ),
        )
    }
}
