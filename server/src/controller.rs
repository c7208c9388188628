use std::future::IntoFuture;

use kernel::KernelError;

use crate::error::ErrorStatus;

// Original: https://github.com/HalsekiRaika/architectured/blob/e5caa5c7ae801d1aaac6e275b3ea0ef26d6ff26b/server/src/controller.rs
pub trait Intake<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

pub trait Exhaust<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

/// Request → DTO → service → response pipeline of one endpoint.
pub struct Controller<T, P> {
    transformer: T,
    presenter: P,
}

impl<T, P> Controller<T, P> {
    pub fn new(transformer: T, presenter: P) -> Self {
        Self {
            transformer,
            presenter,
        }
    }

    pub fn intake<I>(self, input: I) -> Transformed<T::To, P>
    where
        T: Intake<I>,
    {
        Transformed {
            transformed: self.transformer.emit(input),
            presenter: self.presenter,
        }
    }
}

pub struct Transformed<D, P> {
    transformed: D,
    presenter: P,
}

impl<D, P> Transformed<D, P> {
    pub async fn handle<F, Fut, O>(self, f: F) -> Result<P::To, ErrorStatus>
    where
        P: Exhaust<O>,
        F: FnOnce(D) -> Fut,
        Fut: IntoFuture<Output = error_stack::Result<O, KernelError>>,
    {
        let output = f(self.transformed).await.map_err(ErrorStatus::from)?;
        Ok(self.presenter.emit(output))
    }
}
