use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{DependOnDocumentQuery, DependOnReviewQuery, ReviewQuery};
use kernel::interface::update::{DependOnDocumentModifier, DependOnRatingModifier, RatingModifier};
use kernel::prelude::entity::{
    Customer, CustomerId, Movie, MovieId, Patchable, Rating, Review, ReviewId, ReviewText,
};
use kernel::{fail, KernelError, KernelErrorExt};

use crate::service::{
    document_not_found, find_document, insert_document, merge_document, remove_document,
};
use crate::transfer::{
    CreateReviewDto, DeleteDocumentDto, DocumentChanges, UpdateDocumentDto, UpdateReviewDto,
};

/// Recomputes the rating statistics of `movie` from its reviews and stores
/// them on the movie.
async fn refresh_ratings<C, T>(
    dependency: &T,
    con: &mut C,
    movie: &MovieId,
) -> error_stack::Result<(), KernelError>
where
    C: Send,
    T: ?Sized + DependOnReviewQuery<C> + DependOnRatingModifier<C>,
{
    let stats = dependency.review_query().rating_stats(con, movie).await?;
    let updated = dependency
        .rating_modifier()
        .update_ratings(con, movie, stats.as_ref())
        .await?;
    if !updated {
        tracing::debug!("movie {movie} is gone, ratings not stored");
    }
    Ok(())
}

#[async_trait::async_trait]
pub trait CreateReviewService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnDocumentQuery<Connection, Movie>
    + DependOnDocumentQuery<Connection, Customer>
    + DependOnDocumentModifier<Connection, Review>
    + DependOnReviewQuery<Connection>
    + DependOnRatingModifier<Connection>
{
    async fn create_review(&self, dto: CreateReviewDto) -> error_stack::Result<Review, KernelError> {
        let movie = MovieId::new(dto.movie);
        let customer = CustomerId::new(dto.customer);
        let review = Review::new(
            ReviewId::new(Uuid::new_v4()),
            ReviewText::new(dto.review)?,
            Rating::new(dto.rating)?,
            movie.clone(),
            customer.clone(),
        );

        let mut connection = self.database_connection().acquire().await?;
        if find_document::<_, Movie, _>(self, &mut connection, &movie)
            .await?
            .is_none()
        {
            return Err(fail(KernelError::Validation, "invalid movie"));
        }
        if find_document::<_, Customer, _>(self, &mut connection, &customer)
            .await?
            .is_none()
        {
            return Err(fail(KernelError::Validation, "invalid customer"));
        }

        insert_document(self, &mut connection, &review)
            .await
            .map_err(|report| {
                if *report.current_context() == KernelError::Conflict {
                    report.with_message("customer already reviewed this movie")
                } else {
                    report
                }
            })?;
        refresh_ratings(self, &mut connection, &movie).await?;
        Ok(review)
    }
}

impl<Connection: 'static + Send, T> CreateReviewService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnDocumentQuery<Connection, Movie>
        + DependOnDocumentQuery<Connection, Customer>
        + DependOnDocumentModifier<Connection, Review>
        + DependOnReviewQuery<Connection>
        + DependOnRatingModifier<Connection>
{
}

#[async_trait::async_trait]
pub trait UpdateReviewService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnDocumentQuery<Connection, Review>
    + DependOnDocumentModifier<Connection, Review>
    + DependOnReviewQuery<Connection>
    + DependOnRatingModifier<Connection>
{
    async fn update_review(
        &self,
        dto: UpdateDocumentDto<UpdateReviewDto>,
    ) -> error_stack::Result<Review, KernelError> {
        let patch = dto.changes.into_patch()?;
        let id = ReviewId::new(dto.id);
        let mut connection = self.database_connection().acquire().await?;

        let mut review = find_document::<_, Review, _>(self, &mut connection, &id)
            .await?
            .ok_or_else(document_not_found)?;
        let written = review.patch(patch);
        if !merge_document(self, &mut connection, &review, &written).await? {
            return Err(document_not_found());
        }
        refresh_ratings(self, &mut connection, review.movie()).await?;
        find_document::<_, Review, _>(self, &mut connection, &id)
            .await?
            .ok_or_else(document_not_found)
    }
}

impl<Connection: 'static + Send, T> UpdateReviewService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnDocumentQuery<Connection, Review>
        + DependOnDocumentModifier<Connection, Review>
        + DependOnReviewQuery<Connection>
        + DependOnRatingModifier<Connection>
{
}

#[async_trait::async_trait]
pub trait DeleteReviewService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnDocumentQuery<Connection, Review>
    + DependOnDocumentModifier<Connection, Review>
    + DependOnReviewQuery<Connection>
    + DependOnRatingModifier<Connection>
{
    async fn delete_review(&self, dto: DeleteDocumentDto) -> error_stack::Result<(), KernelError> {
        let id = ReviewId::new(dto.id);
        let mut connection = self.database_connection().acquire().await?;

        let review = find_document::<_, Review, _>(self, &mut connection, &id)
            .await?
            .ok_or_else(document_not_found)?;
        if !remove_document::<_, Review, _>(self, &mut connection, &id).await? {
            return Err(document_not_found());
        }
        refresh_ratings(self, &mut connection, review.movie()).await
    }
}

impl<Connection: 'static + Send, T> DeleteReviewService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnDocumentQuery<Connection, Review>
        + DependOnDocumentModifier<Connection, Review>
        + DependOnReviewQuery<Connection>
        + DependOnRatingModifier<Connection>
{
}

#[cfg(test)]
mod test {
    use driver::database::InMemoryDatabase;
    use kernel::prelude::entity::Movie;
    use kernel::KernelError;
    use uuid::Uuid;

    use crate::service::{
        CreateDocumentService, CreateReviewService, DeleteReviewService, GetDocumentService,
        UpdateReviewService,
    };
    use crate::transfer::{
        CreateCustomerDto, CreateMovieDto, CreateReviewDto, DeleteDocumentDto, GetDocumentDto,
        UpdateDocumentDto, UpdateReviewDto,
    };

    async fn setup(db: &InMemoryDatabase) -> (Uuid, Uuid, Uuid) {
        let movie = db
            .create_document(CreateMovieDto {
                title: "Rashomon".to_string(),
                genre: Uuid::new_v4(),
                number_in_stock: 2,
                daily_rental_rate: 3,
            })
            .await
            .unwrap();
        let mut customers = Vec::new();
        for name in ["Akira", "Toshiro"] {
            let customer = db
                .create_document(CreateCustomerDto {
                    name: name.to_string(),
                    phone: "555-0199".to_string(),
                    is_gold: None,
                })
                .await
                .unwrap();
            customers.push(*customer.id().as_ref());
        }
        (*movie.id().as_ref(), customers[0], customers[1])
    }

    async fn ratings(db: &InMemoryDatabase, id: Uuid) -> (f64, i64) {
        let movie = db.get_document::<Movie>(GetDocumentDto { id }).await.unwrap();
        (
            *movie.ratings_average().as_ref(),
            *movie.ratings_quantity().as_ref(),
        )
    }

    fn review(movie: Uuid, customer: Uuid, rating: i32) -> CreateReviewDto {
        CreateReviewDto {
            review: "Worth watching twice".to_string(),
            rating,
            movie,
            customer,
        }
    }

    #[tokio::test]
    async fn review_writes_keep_movie_ratings_current() {
        let db = InMemoryDatabase::default();
        let (movie, first, second) = setup(&db).await;
        assert_eq!(ratings(&db, movie).await, (4.5, 0));

        let kept = db.create_review(review(movie, first, 4)).await.unwrap();
        let dropped = db.create_review(review(movie, second, 1)).await.unwrap();
        assert_eq!(ratings(&db, movie).await, (2.5, 2));

        db.update_review(UpdateDocumentDto {
            id: *kept.id().as_ref(),
            changes: UpdateReviewDto {
                rating: Some(5),
                ..UpdateReviewDto::default()
            },
        })
        .await
        .unwrap();
        assert_eq!(ratings(&db, movie).await, (3.0, 2));

        db.delete_review(DeleteDocumentDto {
            id: *dropped.id().as_ref(),
        })
        .await
        .unwrap();
        assert_eq!(ratings(&db, movie).await, (5.0, 1));

        db.delete_review(DeleteDocumentDto {
            id: *kept.id().as_ref(),
        })
        .await
        .unwrap();
        assert_eq!(ratings(&db, movie).await, (4.5, 0));
    }

    #[tokio::test]
    async fn second_review_by_same_customer_conflicts() {
        let db = InMemoryDatabase::default();
        let (movie, first, _) = setup(&db).await;
        db.create_review(review(movie, first, 3)).await.unwrap();
        let report = db.create_review(review(movie, first, 5)).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Conflict);
        assert_eq!(ratings(&db, movie).await, (3.0, 1));
    }

    #[tokio::test]
    async fn review_of_unknown_movie_is_invalid() {
        let db = InMemoryDatabase::default();
        let (_, first, _) = setup(&db).await;
        let report = db
            .create_review(review(Uuid::new_v4(), first, 3))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Validation);

        let report = db
            .create_review(review(Uuid::new_v4(), first, 9))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Validation);
    }
}
