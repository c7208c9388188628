use kernel::interface::query::{DependOnDocumentQuery, DocumentQuery};
use kernel::interface::update::{
    DependOnDocumentModifier, DependOnStockModifier, DocumentModifier, StockModifier,
};
use kernel::prelude::entity::{Document, Movie, Rental};
use kernel::prelude::ledger::{AppliedSteps, LedgerOperation, RetryConfig, Saga};
use kernel::{fail, KernelError, KernelErrorExt};

/// Applies single ledger operations to storage.
#[async_trait::async_trait]
pub trait LedgerExecutor<Connection>: Sync + Send {
    async fn execute(
        &self,
        con: &mut Connection,
        operation: &LedgerOperation,
    ) -> error_stack::Result<(), KernelError>;
}

/// Executes ledger operations through the document and stock modifiers of
/// the wrapped dependency.
pub struct LedgerStore<'a, T: ?Sized>(pub &'a T);

#[async_trait::async_trait]
impl<'a, Connection, T> LedgerExecutor<Connection> for LedgerStore<'a, T>
where
    Connection: Send,
    T: ?Sized
        + DependOnDocumentModifier<Connection, Rental>
        + DependOnDocumentQuery<Connection, Movie>
        + DependOnStockModifier<Connection>,
{
    async fn execute(
        &self,
        con: &mut Connection,
        operation: &LedgerOperation,
    ) -> error_stack::Result<(), KernelError> {
        match operation {
            LedgerOperation::InsertRental(rental) => self
                .0
                .document_modifier()
                .create(con, rental)
                .await
                .map_err(|report| {
                    if *report.current_context() == KernelError::Conflict {
                        report.with_message("rental already outstanding")
                    } else {
                        report
                    }
                }),
            LedgerOperation::DeleteRental(rental) => {
                // already gone counts as undone
                self.0
                    .document_modifier()
                    .delete(con, rental.document_id())
                    .await?;
                Ok(())
            }
            LedgerOperation::DecrementStock(movie) => {
                if self.0.stock_modifier().decrement_stock(con, movie).await? {
                    Ok(())
                } else {
                    Err(fail(KernelError::Validation, "movie not in stock"))
                }
            }
            LedgerOperation::IncrementStock(movie) => {
                if self.0.stock_modifier().increment_stock(con, movie).await? {
                    return Ok(());
                }
                let exists = self.0.document_query().find_by_id(con, movie).await?.is_some();
                if exists {
                    Err(fail(
                        KernelError::Conflict,
                        format!("movie {movie} stock is already at its maximum"),
                    ))
                } else {
                    Err(fail(
                        KernelError::NotFound,
                        format!("movie {movie} disappeared before its stock was restored"),
                    ))
                }
            }
        }
    }
}

/// Runs a [`Saga`] against an executor, undoing applied steps on failure.
pub struct SagaRunner<'a, X: ?Sized> {
    executor: &'a X,
    retry: &'a RetryConfig,
}

impl<'a, X: ?Sized> SagaRunner<'a, X> {
    pub fn new(executor: &'a X, retry: &'a RetryConfig) -> Self {
        Self { executor, retry }
    }

    /// Executes every step once, in order. When a step fails, the inverses
    /// of the applied steps run last-first and the step's error is
    /// returned. A compensation that cannot be applied escalates to
    /// [`KernelError::Internal`].
    pub async fn run<Connection>(
        &self,
        con: &mut Connection,
        saga: Saga,
    ) -> error_stack::Result<(), KernelError>
    where
        Connection: Send,
        X: LedgerExecutor<Connection>,
    {
        let mut applied = AppliedSteps::default();
        for step in saga.into_steps() {
            tracing::debug!(target_collection = *step.target(), "applying {}", step.operation());
            match self.executor.execute(con, step.operation()).await {
                Ok(()) => applied.record(step),
                Err(report) => {
                    if !applied.is_empty() {
                        tracing::warn!(
                            "{} failed, compensating applied steps: {}",
                            step.operation(),
                            report.current_context()
                        );
                    }
                    for inverse in applied.compensations() {
                        self.execute_with_retry(con, inverse)
                            .await
                            .map_err(|escalated| {
                                escalated.attach_printable(format!(
                                    "compensating for failed {}",
                                    step.operation()
                                ))
                            })?;
                    }
                    return Err(report);
                }
            }
        }
        Ok(())
    }

    /// Executes one operation, retrying transient failures up to the
    /// configured bound. Anything left unapplied becomes
    /// [`KernelError::Internal`].
    pub async fn execute_with_retry<Connection>(
        &self,
        con: &mut Connection,
        operation: &LedgerOperation,
    ) -> error_stack::Result<(), KernelError>
    where
        Connection: Send,
        X: LedgerExecutor<Connection>,
    {
        let mut attempt = 0;
        loop {
            match self.executor.execute(con, operation).await {
                Ok(()) => return Ok(()),
                Err(report)
                    if report.current_context().is_transient()
                        && attempt < *self.retry.max_retry() =>
                {
                    attempt += 1;
                    tracing::warn!(
                        "{operation} failed ({}), retry {attempt}/{}",
                        report.current_context(),
                        self.retry.max_retry()
                    );
                    tokio::time::sleep(*self.retry.retry_delay()).await;
                }
                Err(report) => {
                    tracing::error!("{operation} could not be applied: {report:?}");
                    return Err(report
                        .change_context(KernelError::Internal)
                        .with_message(format!("ledger operation `{operation}` could not be applied")));
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use kernel::prelude::entity::{CustomerId, MovieId, Rental};
    use kernel::prelude::ledger::{LedgerOperation, RetryConfig, Saga};
    use kernel::{fail, KernelError};
    use time::OffsetDateTime;
    use uuid::Uuid;

    use super::{LedgerExecutor, SagaRunner};

    /// Records every call and fails according to a script.
    #[derive(Default)]
    struct ScriptedExecutor {
        failures: Mutex<VecDeque<(LedgerOperation, KernelError)>>,
        calls: Mutex<Vec<LedgerOperation>>,
    }

    impl ScriptedExecutor {
        fn fail_on(self, operation: LedgerOperation, kind: KernelError) -> Self {
            self.failures
                .lock()
                .unwrap()
                .push_back((operation, kind));
            self
        }

        fn calls(&self) -> Vec<LedgerOperation> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl LedgerExecutor<()> for ScriptedExecutor {
        async fn execute(
            &self,
            _: &mut (),
            operation: &LedgerOperation,
        ) -> error_stack::Result<(), KernelError> {
            self.calls.lock().unwrap().push(operation.clone());
            let mut failures = self.failures.lock().unwrap();
            match failures.front() {
                Some((failing, kind)) if failing == operation => {
                    let kind = *kind;
                    failures.pop_front();
                    Err(fail(kind, "scripted failure"))
                }
                _ => Ok(()),
            }
        }
    }

    fn plan() -> (Rental, MovieId, Saga) {
        let movie = MovieId::new(Uuid::new_v4());
        let rental = Rental::open(
            CustomerId::new(Uuid::new_v4()),
            movie.clone(),
            OffsetDateTime::now_utc(),
        );
        let saga = Saga::new()
            .then(LedgerOperation::InsertRental(rental.clone()))
            .then(LedgerOperation::DecrementStock(movie.clone()));
        (rental, movie, saga)
    }

    fn retry() -> RetryConfig {
        RetryConfig::new(2, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn all_steps_succeed() {
        let (rental, movie, saga) = plan();
        let executor = ScriptedExecutor::default();
        let retry = retry();
        SagaRunner::new(&executor, &retry)
            .run(&mut (), saga)
            .await
            .unwrap();
        assert_eq!(
            executor.calls(),
            vec![
                LedgerOperation::InsertRental(rental),
                LedgerOperation::DecrementStock(movie)
            ]
        );
    }

    #[tokio::test]
    async fn failed_step_undoes_applied_steps() {
        let (rental, movie, saga) = plan();
        let executor = ScriptedExecutor::default().fail_on(
            LedgerOperation::DecrementStock(movie.clone()),
            KernelError::Validation,
        );
        let retry = retry();
        let report = SagaRunner::new(&executor, &retry)
            .run(&mut (), saga)
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Validation);
        assert_eq!(
            executor.calls(),
            vec![
                LedgerOperation::InsertRental(rental.clone()),
                LedgerOperation::DecrementStock(movie),
                LedgerOperation::DeleteRental(rental),
            ]
        );
    }

    #[tokio::test]
    async fn transient_compensation_failure_is_retried() {
        let (rental, movie, saga) = plan();
        let executor = ScriptedExecutor::default()
            .fail_on(
                LedgerOperation::DecrementStock(movie.clone()),
                KernelError::Internal,
            )
            .fail_on(
                LedgerOperation::DeleteRental(rental.clone()),
                KernelError::Timeout,
            );
        let retry = retry();
        let report = SagaRunner::new(&executor, &retry)
            .run(&mut (), saga)
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Internal);
        let deletes = executor
            .calls()
            .into_iter()
            .filter(|call| matches!(call, LedgerOperation::DeleteRental(_)))
            .count();
        assert_eq!(deletes, 2);
    }

    #[tokio::test]
    async fn exhausted_compensation_escalates() {
        let (rental, movie, saga) = plan();
        let mut executor = ScriptedExecutor::default().fail_on(
            LedgerOperation::DecrementStock(movie),
            KernelError::Validation,
        );
        for _ in 0..3 {
            executor = executor.fail_on(
                LedgerOperation::DeleteRental(rental.clone()),
                KernelError::Timeout,
            );
        }
        let retry = retry();
        let report = SagaRunner::new(&executor, &retry)
            .run(&mut (), saga)
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Internal);
        assert_eq!(executor.calls().len(), 2 + 3);
    }

    #[tokio::test]
    async fn permanent_failure_is_not_retried() {
        let movie = MovieId::new(Uuid::new_v4());
        let operation = LedgerOperation::IncrementStock(movie);
        let executor =
            ScriptedExecutor::default().fail_on(operation.clone(), KernelError::NotFound);
        let retry = retry();
        let report = SagaRunner::new(&executor, &retry)
            .execute_with_retry(&mut (), &operation)
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Internal);
        assert_eq!(executor.calls().len(), 1);
    }
}
