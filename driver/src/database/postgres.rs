use sqlx::pool::PoolConnection;
use sqlx::{Pool, Postgres};

use kernel::interface::auth::{DependOnPasswordHasher, DependOnTokenCodec};
use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{DependOnDocumentQuery, DependOnRentalQuery, DependOnReviewQuery};
use kernel::interface::update::{
    DependOnDocumentModifier, DependOnRatingModifier, DependOnRentalModifier,
    DependOnStockModifier,
};
use kernel::prelude::entity::Document;
use kernel::prelude::ledger::{DependOnRetryConfig, RetryConfig};
use kernel::KernelError;

use crate::auth::{Argon2Hasher, JwtTokenCodec};
use crate::config::retry_config;
use crate::env;
use crate::error::ConvertError;

pub use self::{document::*, movie::*, rental::*, review::*};

mod document;
mod movie;
mod rental;
mod review;

static POSTGRES_URL: &str = "POSTGRES_URL";

pub struct PostgresDatabase {
    pool: Pool<Postgres>,
    retry: RetryConfig,
    tokens: JwtTokenCodec,
}

impl PostgresDatabase {
    /// Connects to `POSTGRES_URL`, brings the schema up to date and reads
    /// the token settings.
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        let pool = Pool::connect(&url).await.convert_error()?;
        sqlx::migrate!().run(&pool).await.convert_error()?;
        tracing::info!("postgres schema migrated");
        Ok(Self {
            pool,
            retry: retry_config()?,
            tokens: JwtTokenCodec::from_env()?,
        })
    }
}

#[async_trait::async_trait]
impl DatabaseConnection<PoolConnection<Postgres>> for PostgresDatabase {
    async fn acquire(&self) -> error_stack::Result<PoolConnection<Postgres>, KernelError> {
        let con = self.pool.acquire().await.convert_error()?;
        Ok(con)
    }
}

impl DependOnRetryConfig for PostgresDatabase {
    fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }
}

impl<E: Document> DependOnDocumentQuery<PoolConnection<Postgres>, E> for PostgresDatabase {
    type DocumentQuery = PostgresDocumentRepository;
    fn document_query(&self) -> &Self::DocumentQuery {
        &PostgresDocumentRepository
    }
}

impl<E: Document> DependOnDocumentModifier<PoolConnection<Postgres>, E> for PostgresDatabase {
    type DocumentModifier = PostgresDocumentRepository;
    fn document_modifier(&self) -> &Self::DocumentModifier {
        &PostgresDocumentRepository
    }
}

impl DependOnStockModifier<PoolConnection<Postgres>> for PostgresDatabase {
    type StockModifier = PostgresMovieRepository;
    fn stock_modifier(&self) -> &Self::StockModifier {
        &PostgresMovieRepository
    }
}

impl DependOnRatingModifier<PoolConnection<Postgres>> for PostgresDatabase {
    type RatingModifier = PostgresMovieRepository;
    fn rating_modifier(&self) -> &Self::RatingModifier {
        &PostgresMovieRepository
    }
}

impl DependOnRentalQuery<PoolConnection<Postgres>> for PostgresDatabase {
    type RentalQuery = PostgresRentalRepository;
    fn rental_query(&self) -> &Self::RentalQuery {
        &PostgresRentalRepository
    }
}

impl DependOnRentalModifier<PoolConnection<Postgres>> for PostgresDatabase {
    type RentalModifier = PostgresRentalRepository;
    fn rental_modifier(&self) -> &Self::RentalModifier {
        &PostgresRentalRepository
    }
}

impl DependOnReviewQuery<PoolConnection<Postgres>> for PostgresDatabase {
    type ReviewQuery = PostgresReviewRepository;
    fn review_query(&self) -> &Self::ReviewQuery {
        &PostgresReviewRepository
    }
}

impl DependOnPasswordHasher for PostgresDatabase {
    type PasswordHasher = Argon2Hasher;
    fn password_hasher(&self) -> &Self::PasswordHasher {
        &Argon2Hasher
    }
}

impl DependOnTokenCodec for PostgresDatabase {
    type TokenCodec = JwtTokenCodec;
    fn token_codec(&self) -> &Self::TokenCodec {
        &self.tokens
    }
}
