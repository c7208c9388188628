use axum::extract::State;
use axum::routing::get;
use axum::Router;
use uuid::Uuid;

use application::service::{
    CreateDocumentService, DeleteDocumentService, PartyViewService, UpdateDocumentService,
};
use kernel::prelude::entity::Booking;

use crate::controller::Controller;
use crate::extract::{Json, Path, Query};
use crate::handler::AppModule;
use crate::request::{DeleteRequest, GetRequest, ListRequest, Transformer};
use crate::response::{
    CreatedPresenter, DeletedPresenter, DocumentPresenter, ListPresenter, ViewPresenter,
};

pub use self::request::*;

mod request;

pub trait BookingRouter {
    fn route_booking(self) -> Self;
}

impl BookingRouter for Router<AppModule> {
    fn route_booking(self) -> Self {
        self.route(
            "/bookings",
            get(
                |State(module): State<AppModule>,
                 Query(params): Query<Vec<(String, String)>>| async move {
                    Controller::new(Transformer, ListPresenter)
                        .intake(ListRequest::new(params))
                        .handle(|dto| async move {
                            module.database().list_with_parties::<Booking>(dto).await
                        })
                        .await
                },
            )
            .post(
                |State(module): State<AppModule>, Json(req): Json<CreateBookingRequest>| async move {
                    Controller::new(Transformer, CreatedPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.database().create_document(dto).await })
                        .await
                },
            ),
        )
        .route(
            "/bookings/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, ViewPresenter)
                        .intake(GetRequest::new(id))
                        .handle(|dto| async move {
                            module.database().get_with_parties::<Booking>(dto).await
                        })
                        .await
                },
            )
            .patch(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<UpdateBookingRequest>| async move {
                    Controller::new(Transformer, DocumentPresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.database().update_document(dto).await })
                        .await
                },
            )
            .delete(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, DeletedPresenter)
                        .intake(DeleteRequest::new(id))
                        .handle(|dto| async move {
                            module.database().delete_document::<Booking>(dto).await
                        })
                        .await
                },
            ),
        )
    }
}
