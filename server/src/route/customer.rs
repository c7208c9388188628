use axum::extract::State;
use axum::routing::get;
use axum::Router;
use uuid::Uuid;

use application::service::{
    CreateDocumentService, DeleteDocumentService, GetDocumentService, UpdateDocumentService,
};
use kernel::prelude::entity::Customer;

use crate::controller::Controller;
use crate::extract::{Json, Path, Query};
use crate::handler::AppModule;
use crate::request::{DeleteRequest, GetRequest, ListRequest, Transformer};
use crate::response::{CreatedPresenter, DeletedPresenter, DocumentPresenter, ListPresenter};

pub use self::request::*;

mod request;

pub trait CustomerRouter {
    fn route_customer(self) -> Self;
}

impl CustomerRouter for Router<AppModule> {
    fn route_customer(self) -> Self {
        self.route(
            "/customers",
            get(
                |State(module): State<AppModule>,
                 Query(params): Query<Vec<(String, String)>>| async move {
                    Controller::new(Transformer, ListPresenter)
                        .intake(ListRequest::new(params))
                        .handle(|dto| async move {
                            module.database().list_documents::<Customer>(dto).await
                        })
                        .await
                },
            )
            .post(
                |State(module): State<AppModule>, Json(req): Json<CreateCustomerRequest>| async move {
                    Controller::new(Transformer, CreatedPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.database().create_document(dto).await })
                        .await
                },
            ),
        )
        .route(
            "/customers/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, DocumentPresenter)
                        .intake(GetRequest::new(id))
                        .handle(|dto| async move {
                            module.database().get_document::<Customer>(dto).await
                        })
                        .await
                },
            )
            .patch(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<UpdateCustomerRequest>| async move {
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
                            module.database().delete_document::<Customer>(dto).await
                        })
                        .await
                },
            ),
        )
    }
}
