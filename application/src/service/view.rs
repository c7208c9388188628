//! Read views that embed the documents a body refers to.

use serde_json::{Map, Value};

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::DependOnDocumentQuery;
use kernel::prelude::descriptor::{Limit, Projection, QueryDescriptor, ReservedKeys};
use kernel::prelude::entity::{Customer, Document, DocumentId, Genre, Movie, MovieId, Review};
use kernel::KernelError;
use uuid::Uuid;

use crate::service::{document_not_found, find_document, list_bodies, to_document_body};
use crate::transfer::{DocumentListDto, GetDocumentDto, ListDocumentsDto};

const GENRE_FIELDS: &str = "name";
const CUSTOMER_FIELDS: &str = "name,isGold,phone";
const MOVIE_FIELDS: &str = "-genre,-numberInStock,-slug";

/// Replaces the id stored under `field` with the referenced `E`, reduced by
/// `fields`. A dangling reference becomes `null`; a body without the field
/// (projected away) is left alone.
pub(crate) async fn populate<C, E, T>(
    dependency: &T,
    con: &mut C,
    body: &mut Map<String, Value>,
    field: &str,
    fields: &str,
) -> error_stack::Result<(), KernelError>
where
    C: Send,
    E: Document,
    T: ?Sized + DependOnDocumentQuery<C, E>,
{
    let Some(id) = body
        .get(field)
        .and_then(Value::as_str)
        .and_then(|raw| Uuid::parse_str(raw).ok())
    else {
        return Ok(());
    };
    let embedded = match find_document::<_, E, _>(dependency, con, &E::Id::from_uuid(id)).await? {
        Some(document) => Value::Object(Projection::parse(fields)?.apply(to_document_body(&document)?)),
        None => Value::Null,
    };
    body.insert(field.to_string(), embedded);
    Ok(())
}

async fn populate_parties<C, T>(
    dependency: &T,
    con: &mut C,
    body: &mut Map<String, Value>,
) -> error_stack::Result<(), KernelError>
where
    C: Send,
    T: ?Sized + DependOnDocumentQuery<C, Customer> + DependOnDocumentQuery<C, Movie>,
{
    populate::<_, Customer, _>(dependency, con, body, "customer", CUSTOMER_FIELDS).await?;
    populate::<_, Movie, _>(dependency, con, body, "movie", MOVIE_FIELDS).await
}

#[async_trait::async_trait]
pub trait MovieViewService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnDocumentQuery<Connection, Movie>
    + DependOnDocumentQuery<Connection, Genre>
    + DependOnDocumentQuery<Connection, Review>
{
    /// The movie with its genre and every review of it.
    async fn get_movie(&self, dto: GetDocumentDto) -> error_stack::Result<Value, KernelError> {
        let mut connection = self.database_connection().acquire().await?;
        let movie = find_document::<_, Movie, _>(self, &mut connection, &MovieId::new(dto.id))
            .await?
            .ok_or_else(document_not_found)?;
        let mut body = to_document_body(&movie)?;
        populate::<_, Genre, _>(self, &mut connection, &mut body, "genre", GENRE_FIELDS).await?;

        let descriptor = QueryDescriptor::build(
            [
                ("movie".to_string(), dto.id.to_string()),
                ("limit".to_string(), Limit::MAX.to_string()),
            ],
            &ReservedKeys::default(),
        )?;
        let reviews = list_bodies::<_, Review, _>(self, &mut connection, &descriptor).await?;
        body.insert(
            "reviews".to_string(),
            Value::Array(reviews.into_iter().map(Value::Object).collect()),
        );
        Ok(Value::Object(body))
    }

    async fn list_movies(
        &self,
        dto: ListDocumentsDto,
    ) -> error_stack::Result<DocumentListDto, KernelError> {
        let descriptor = QueryDescriptor::build(dto.params, &ReservedKeys::default())?;
        let mut connection = self.database_connection().acquire().await?;
        let mut docs = Vec::new();
        for mut body in list_bodies::<_, Movie, _>(self, &mut connection, &descriptor).await? {
            populate::<_, Genre, _>(self, &mut connection, &mut body, "genre", GENRE_FIELDS).await?;
            docs.push(Value::Object(body));
        }
        Ok(DocumentListDto { docs })
    }
}

impl<Connection: 'static + Send, T> MovieViewService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnDocumentQuery<Connection, Movie>
        + DependOnDocumentQuery<Connection, Genre>
        + DependOnDocumentQuery<Connection, Review>
{
}

/// Views of documents that tie a customer to a movie (rentals, bookings).
#[async_trait::async_trait]
pub trait PartyViewService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnDocumentQuery<Connection, Customer>
    + DependOnDocumentQuery<Connection, Movie>
{
    async fn get_with_parties<E>(&self, dto: GetDocumentDto) -> error_stack::Result<Value, KernelError>
    where
        E: Document,
        Self: DependOnDocumentQuery<Connection, E>,
    {
        let mut connection = self.database_connection().acquire().await?;
        let document = find_document::<_, E, _>(self, &mut connection, &E::Id::from_uuid(dto.id))
            .await?
            .ok_or_else(document_not_found)?;
        let mut body = to_document_body(&document)?;
        populate_parties(self, &mut connection, &mut body).await?;
        Ok(Value::Object(body))
    }

    async fn list_with_parties<E>(
        &self,
        dto: ListDocumentsDto,
    ) -> error_stack::Result<DocumentListDto, KernelError>
    where
        E: Document,
        Self: DependOnDocumentQuery<Connection, E>,
    {
        let descriptor = QueryDescriptor::build(dto.params, &ReservedKeys::default())?;
        let mut connection = self.database_connection().acquire().await?;
        let mut docs = Vec::new();
        for mut body in list_bodies::<_, E, _>(self, &mut connection, &descriptor).await? {
            populate_parties(self, &mut connection, &mut body).await?;
            docs.push(Value::Object(body));
        }
        Ok(DocumentListDto { docs })
    }
}

impl<Connection: 'static + Send, T> PartyViewService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnDocumentQuery<Connection, Customer>
        + DependOnDocumentQuery<Connection, Movie>
{
}

#[cfg(test)]
mod test {
    use driver::database::InMemoryDatabase;
    use kernel::prelude::entity::{Booking, Rental};
    use kernel::KernelError;
    use serde_json::json;
    use uuid::Uuid;

    use crate::service::{
        CreateDocumentService, CreateRentalService, CreateReviewService, MovieViewService,
        PartyViewService,
    };
    use crate::transfer::{
        CreateBookingDto, CreateCustomerDto, CreateGenreDto, CreateMovieDto, CreateRentalDto,
        CreateReviewDto, GetDocumentDto, ListDocumentsDto,
    };

    async fn setup(db: &InMemoryDatabase, genre: Uuid) -> (Uuid, Uuid) {
        let movie = db
            .create_document(CreateMovieDto {
                title: "Tokyo Story".to_string(),
                genre,
                number_in_stock: 4,
                daily_rental_rate: 3,
            })
            .await
            .unwrap();
        let customer = db
            .create_document(CreateCustomerDto {
                name: "Setsuko".to_string(),
                phone: "555-0142".to_string(),
                is_gold: Some(true),
            })
            .await
            .unwrap();
        (*movie.id().as_ref(), *customer.id().as_ref())
    }

    #[tokio::test]
    async fn rentals_embed_customer_and_movie() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let (movie, customer) = setup(&db, Uuid::new_v4()).await;
        let rental = db.create_rental(CreateRentalDto { customer, movie }).await?;

        let view = db
            .get_with_parties::<Rental>(GetDocumentDto { id: rental.id })
            .await?;
        assert_eq!(
            view["customer"],
            json!({ "id": customer, "name": "Setsuko", "isGold": true, "phone": "555-0142" })
        );
        assert_eq!(view["movie"]["title"], "Tokyo Story");
        assert_eq!(view["movie"]["dailyRentalRate"], 3);
        for hidden in ["genre", "numberInStock", "slug"] {
            assert!(view["movie"].get(hidden).is_none(), "{hidden}");
        }

        let listed = db
            .list_with_parties::<Rental>(ListDocumentsDto::default())
            .await?;
        assert_eq!(listed.docs.len(), 1);
        assert_eq!(listed.docs[0]["customer"]["name"], "Setsuko");

        let projected = db
            .list_with_parties::<Rental>(ListDocumentsDto::default().with("fields", "dateOut"))
            .await?;
        assert!(projected.docs[0].get("customer").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn bookings_embed_like_rentals() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let (movie, customer) = setup(&db, Uuid::new_v4()).await;
        let booking = db
            .create_document(CreateBookingDto {
                movie,
                customer,
                paid: None,
            })
            .await?;

        let view = db
            .get_with_parties::<Booking>(GetDocumentDto {
                id: *booking.id().as_ref(),
            })
            .await?;
        assert_eq!(view["paid"], true);
        assert_eq!(view["customer"]["isGold"], true);
        assert_eq!(view["movie"]["id"], json!(movie));
        Ok(())
    }

    #[tokio::test]
    async fn movie_embeds_genre_and_reviews() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let genre = db
            .create_document(CreateGenreDto {
                name: "Drama".to_string(),
            })
            .await?;
        let genre = *genre.id().as_ref();
        let (movie, customer) = setup(&db, genre).await;
        db.create_review(CreateReviewDto {
            review: "Quietly devastating".to_string(),
            rating: 5,
            movie,
            customer,
        })
        .await?;

        let view = db.get_movie(GetDocumentDto { id: movie }).await?;
        assert_eq!(view["genre"], json!({ "id": genre, "name": "Drama" }));
        let reviews = view["reviews"].as_array().unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0]["rating"], 5);

        let listed = db.list_movies(ListDocumentsDto::default()).await?;
        assert_eq!(listed.docs[0]["genre"]["name"], "Drama");
        assert!(listed.docs[0].get("reviews").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn dangling_reference_becomes_null() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        setup(&db, Uuid::new_v4()).await;
        let listed = db.list_movies(ListDocumentsDto::default()).await?;
        assert!(listed.docs[0]["genre"].is_null());

        let report = db
            .get_movie(GetDocumentDto { id: Uuid::new_v4() })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
        Ok(())
    }
}
