use std::fmt::Display;

use vodca::References;

use crate::entity::{Document, Movie, MovieId, Rental};

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum LedgerOperation {
    InsertRental(Rental),
    DeleteRental(Rental),
    DecrementStock(MovieId),
    IncrementStock(MovieId),
}

impl LedgerOperation {
    /// The operation that undoes this one.
    pub fn inverse(&self) -> Self {
        match self {
            Self::InsertRental(rental) => Self::DeleteRental(rental.clone()),
            Self::DeleteRental(rental) => Self::InsertRental(rental.clone()),
            Self::DecrementStock(movie) => Self::IncrementStock(movie.clone()),
            Self::IncrementStock(movie) => Self::DecrementStock(movie.clone()),
        }
    }

    /// Collection the operation writes to.
    pub fn target(&self) -> &'static str {
        match self {
            Self::InsertRental(_) | Self::DeleteRental(_) => Rental::COLLECTION,
            Self::DecrementStock(_) | Self::IncrementStock(_) => Movie::COLLECTION,
        }
    }
}

impl Display for LedgerOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsertRental(rental) => write!(f, "insert rental {}", rental.id()),
            Self::DeleteRental(rental) => write!(f, "delete rental {}", rental.id()),
            Self::DecrementStock(movie) => write!(f, "decrement stock of movie {movie}"),
            Self::IncrementStock(movie) => write!(f, "increment stock of movie {movie}"),
        }
    }
}

/// One planned write: `{operation, target, inverse}`.
#[derive(Debug, Clone, Eq, PartialEq, References)]
pub struct LedgerStep {
    operation: LedgerOperation,
    target: &'static str,
    inverse: LedgerOperation,
}

impl From<LedgerOperation> for LedgerStep {
    fn from(operation: LedgerOperation) -> Self {
        Self {
            target: operation.target(),
            inverse: operation.inverse(),
            operation,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entity::CustomerId;
    use time::OffsetDateTime;
    use uuid::Uuid;

    #[test]
    fn inverse_of_inverse_is_identity() {
        let rental = Rental::open(
            CustomerId::new(Uuid::new_v4()),
            MovieId::new(Uuid::new_v4()),
            OffsetDateTime::now_utc(),
        );
        let movie = rental.movie().clone();
        for operation in [
            LedgerOperation::InsertRental(rental.clone()),
            LedgerOperation::DecrementStock(movie),
        ] {
            assert_eq!(operation.inverse().inverse(), operation);
        }
    }

    #[test]
    fn step_records_target_and_inverse() {
        let movie = MovieId::new(Uuid::new_v4());
        let step = LedgerStep::from(LedgerOperation::DecrementStock(movie.clone()));
        assert_eq!(step.target(), &"movies");
        assert_eq!(step.inverse(), &LedgerOperation::IncrementStock(movie));
    }
}
