use crate::ledger::{LedgerOperation, LedgerStep};

/// Planned sequence of ledger writes. The plan is complete before the
/// first write is executed, so every step's inverse is known up front.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Saga {
    steps: Vec<LedgerStep>,
}

impl Saga {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, operation: LedgerOperation) -> Self {
        self.steps.push(LedgerStep::from(operation));
        self
    }

    pub fn steps(&self) -> &[LedgerStep] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<LedgerStep> {
        self.steps
    }
}

/// Steps that were applied, kept in application order so they can be
/// undone last-first.
#[derive(Debug, Default)]
pub struct AppliedSteps(Vec<LedgerStep>);

impl AppliedSteps {
    pub fn record(&mut self, step: LedgerStep) {
        self.0.push(step);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Inverses in the order they must be executed.
    pub fn compensations(&self) -> impl Iterator<Item = &LedgerOperation> {
        self.0.iter().rev().map(LedgerStep::inverse)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entity::{CustomerId, MovieId, Rental};
    use time::OffsetDateTime;
    use uuid::Uuid;

    #[test]
    fn compensations_run_in_reverse() {
        let movie = MovieId::new(Uuid::new_v4());
        let rental = Rental::open(
            CustomerId::new(Uuid::new_v4()),
            movie.clone(),
            OffsetDateTime::now_utc(),
        );
        let saga = Saga::new()
            .then(LedgerOperation::InsertRental(rental.clone()))
            .then(LedgerOperation::DecrementStock(movie.clone()));
        assert_eq!(saga.steps().len(), 2);

        let mut applied = AppliedSteps::default();
        for step in saga.into_steps() {
            applied.record(step);
        }
        let compensations = applied.compensations().cloned().collect::<Vec<_>>();
        assert_eq!(
            compensations,
            vec![
                LedgerOperation::IncrementStock(movie),
                LedgerOperation::DeleteRental(rental),
            ]
        );
    }
}
