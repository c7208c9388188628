use std::sync::Arc;

use tokio::sync::RwLock;

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

pub use self::{document::*, movie::*, rental::*, review::*};
use self::store::Collections;

mod document;
mod movie;
mod rental;
mod review;
mod store;

/// Process-local document store. Clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    store: Arc<RwLock<Collections>>,
    retry: RetryConfig,
    tokens: JwtTokenCodec,
}

impl InMemoryDatabase {
    pub fn new(retry: RetryConfig) -> Self {
        Self {
            store: Arc::default(),
            retry,
            tokens: JwtTokenCodec::default(),
        }
    }
}

/// Session handed out by [`InMemoryDatabase`]. Every operation takes the
/// store lock on its own, so writes are applied one at a time.
pub struct InMemoryConnection {
    store: Arc<RwLock<Collections>>,
}

#[async_trait::async_trait]
impl DatabaseConnection<InMemoryConnection> for InMemoryDatabase {
    async fn acquire(&self) -> error_stack::Result<InMemoryConnection, KernelError> {
        Ok(InMemoryConnection {
            store: Arc::clone(&self.store),
        })
    }
}

impl DependOnRetryConfig for InMemoryDatabase {
    fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }
}

impl<E: Document> DependOnDocumentQuery<InMemoryConnection, E> for InMemoryDatabase {
    type DocumentQuery = InMemoryDocumentRepository;
    fn document_query(&self) -> &Self::DocumentQuery {
        &InMemoryDocumentRepository
    }
}

impl<E: Document> DependOnDocumentModifier<InMemoryConnection, E> for InMemoryDatabase {
    type DocumentModifier = InMemoryDocumentRepository;
    fn document_modifier(&self) -> &Self::DocumentModifier {
        &InMemoryDocumentRepository
    }
}

impl DependOnStockModifier<InMemoryConnection> for InMemoryDatabase {
    type StockModifier = InMemoryMovieRepository;
    fn stock_modifier(&self) -> &Self::StockModifier {
        &InMemoryMovieRepository
    }
}

impl DependOnRatingModifier<InMemoryConnection> for InMemoryDatabase {
    type RatingModifier = InMemoryMovieRepository;
    fn rating_modifier(&self) -> &Self::RatingModifier {
        &InMemoryMovieRepository
    }
}

impl DependOnRentalQuery<InMemoryConnection> for InMemoryDatabase {
    type RentalQuery = InMemoryRentalRepository;
    fn rental_query(&self) -> &Self::RentalQuery {
        &InMemoryRentalRepository
    }
}

impl DependOnRentalModifier<InMemoryConnection> for InMemoryDatabase {
    type RentalModifier = InMemoryRentalRepository;
    fn rental_modifier(&self) -> &Self::RentalModifier {
        &InMemoryRentalRepository
    }
}

impl DependOnReviewQuery<InMemoryConnection> for InMemoryDatabase {
    type ReviewQuery = InMemoryReviewRepository;
    fn review_query(&self) -> &Self::ReviewQuery {
        &InMemoryReviewRepository
    }
}

impl DependOnPasswordHasher for InMemoryDatabase {
    type PasswordHasher = Argon2Hasher;
    fn password_hasher(&self) -> &Self::PasswordHasher {
        &Argon2Hasher
    }
}

impl DependOnTokenCodec for InMemoryDatabase {
    type TokenCodec = JwtTokenCodec;
    fn token_codec(&self) -> &Self::TokenCodec {
        &self.tokens
    }
}
