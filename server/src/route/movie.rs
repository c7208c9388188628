use axum::extract::State;
use axum::routing::get;
use axum::Router;
use uuid::Uuid;

use application::service::{
    CreateDocumentService, CreateReviewService, DeleteDocumentService, GetDocumentService,
    MovieViewService, UpdateDocumentService,
};
use kernel::prelude::entity::{Movie, Review};

use crate::controller::Controller;
use crate::extract::{Json, Path, Query};
use crate::handler::AppModule;
use crate::request::{DeleteRequest, GetRequest, ListRequest, Transformer};
use crate::response::{
    CreatedPresenter, DeletedPresenter, DocumentPresenter, ListPresenter, ViewPresenter,
};
use crate::route::NestedReviewRequest;

pub use self::request::*;

mod request;

pub trait MovieRouter {
    fn route_movie(self) -> Self;
    /// Routes open to visitors without an account.
    fn route_movie_public(self) -> Self;
}

impl MovieRouter for Router<AppModule> {
    fn route_movie(self) -> Self {
        self.route(
            "/movies",
            get(
                |State(module): State<AppModule>,
                 Query(params): Query<Vec<(String, String)>>| async move {
                    Controller::new(Transformer, ListPresenter)
                        .intake(ListRequest::new(params))
                        .handle(|dto| async move { module.database().list_movies(dto).await })
                        .await
                },
            )
            .post(
                |State(module): State<AppModule>, Json(req): Json<CreateMovieRequest>| async move {
                    Controller::new(Transformer, CreatedPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.database().create_document(dto).await })
                        .await
                },
            ),
        )
        .route(
            "/movies/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, ViewPresenter)
                        .intake(GetRequest::new(id))
                        .handle(|dto| async move { module.database().get_movie(dto).await })
                        .await
                },
            )
            .patch(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<UpdateMovieRequest>| async move {
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
                            module.database().delete_document::<Movie>(dto).await
                        })
                        .await
                },
            ),
        )
        .route(
            "/movies/:id/reviews",
            get(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Query(params): Query<Vec<(String, String)>>| async move {
                    Controller::new(Transformer, ListPresenter)
                        .intake(ListRequest::new(params).scoped("movie", id))
                        .handle(|dto| async move {
                            module.database().list_documents::<Review>(dto).await
                        })
                        .await
                },
            )
            .post(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<NestedReviewRequest>| async move {
                    Controller::new(Transformer, CreatedPresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.database().create_review(dto).await })
                        .await
                },
            ),
        )
    }

    fn route_movie_public(self) -> Self {
        self.route(
            "/movies/top-5-movies",
            get(
                |State(module): State<AppModule>,
                 Query(params): Query<Vec<(String, String)>>| async move {
                    Controller::new(Transformer, ListPresenter)
                        .intake(TopMoviesRequest::new(params))
                        .handle(|dto| async move { module.database().list_movies(dto).await })
                        .await
                },
            ),
        )
    }
}
