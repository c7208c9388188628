use kernel::interface::update::{RatingModifier, StockModifier};
use kernel::prelude::entity::{Movie, MovieId, RatingStats};
use kernel::KernelError;

use crate::database::InMemoryConnection;

pub struct InMemoryMovieRepository;

#[async_trait::async_trait]
impl StockModifier<InMemoryConnection> for InMemoryMovieRepository {
    async fn decrement_stock(
        &self,
        con: &mut InMemoryConnection,
        movie: &MovieId,
    ) -> error_stack::Result<bool, KernelError> {
        let mut store = con.store.write().await;
        let applied = store.modify::<Movie, _>(movie, Movie::check_out)?;
        Ok(applied.unwrap_or(false))
    }

    async fn increment_stock(
        &self,
        con: &mut InMemoryConnection,
        movie: &MovieId,
    ) -> error_stack::Result<bool, KernelError> {
        let mut store = con.store.write().await;
        let applied = store.modify::<Movie, _>(movie, Movie::check_in)?;
        Ok(applied.unwrap_or(false))
    }
}

#[async_trait::async_trait]
impl RatingModifier<InMemoryConnection> for InMemoryMovieRepository {
    async fn update_ratings(
        &self,
        con: &mut InMemoryConnection,
        movie: &MovieId,
        stats: Option<&RatingStats>,
    ) -> error_stack::Result<bool, KernelError> {
        let mut store = con.store.write().await;
        let applied = store.modify::<Movie, _>(movie, |movie| {
            movie.apply_ratings(stats);
            true
        })?;
        Ok(applied.unwrap_or(false))
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::DocumentQuery;
    use kernel::interface::update::{DocumentModifier, StockModifier};
    use kernel::prelude::entity::{
        DailyRentalRate, Document, GenreId, Movie, MovieId, MoviePatch, MovieTitle, NumberInStock,
        Patchable,
    };
    use kernel::KernelError;
    use serde_json::{Map, Value};
    use uuid::Uuid;

    use crate::database::{InMemoryDatabase, InMemoryDocumentRepository, InMemoryMovieRepository};

    fn movie(stock: i32) -> Movie {
        Movie::new(
            MovieId::new(Uuid::new_v4()),
            MovieTitle::new("Stalker").unwrap(),
            GenreId::new(Uuid::new_v4()),
            NumberInStock::new(stock).unwrap(),
            DailyRentalRate::new(2).unwrap(),
        )
    }

    async fn stored(db: &InMemoryDatabase, id: &MovieId) -> Movie {
        let mut con = db.acquire().await.unwrap();
        DocumentQuery::<_, Movie>::find_by_id(&InMemoryDocumentRepository, &mut con, id)
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn patch_from_a_stale_read_keeps_the_stock_write() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let mut con = db.acquire().await?;
        let film = movie(1);
        InMemoryDocumentRepository.create(&mut con, &film).await?;

        // An edit reads the movie, then a rental takes the last copy.
        let mut edited = stored(&db, film.id()).await;
        assert!(InMemoryMovieRepository.decrement_stock(&mut con, film.id()).await?);

        let written = edited.patch(MoviePatch {
            title: Some(MovieTitle::new("Stalker (1979)")?),
            ..MoviePatch::default()
        });
        let body = serde_json::to_value(&edited).unwrap();
        let fields = written
            .into_iter()
            .filter_map(|field| body.get(field).map(|value| (field.to_string(), value.clone())))
            .collect::<Map<String, Value>>();
        assert!(
            DocumentModifier::<_, Movie>::merge(
                &InMemoryDocumentRepository,
                &mut con,
                film.document_id(),
                &fields
            )
            .await?
        );

        let current = stored(&db, film.id()).await;
        assert_eq!(current.title().as_ref(), "Stalker (1979)");
        assert!(!current.is_in_stock());
        Ok(())
    }

    #[tokio::test]
    async fn stock_increment_stops_at_capacity() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let mut con = db.acquire().await?;
        let full = movie(NumberInStock::MAX);
        InMemoryDocumentRepository.create(&mut con, &full).await?;

        assert!(!InMemoryMovieRepository.increment_stock(&mut con, full.id()).await?);
        assert!(InMemoryMovieRepository.decrement_stock(&mut con, full.id()).await?);
        assert!(InMemoryMovieRepository.increment_stock(&mut con, full.id()).await?);
        assert!(
            !InMemoryMovieRepository
                .increment_stock(&mut con, &MovieId::new(Uuid::new_v4()))
                .await?
        );
        Ok(())
    }
}
