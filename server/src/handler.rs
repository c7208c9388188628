use std::ops::Deref;
use std::sync::Arc;

use driver::database::PostgresDatabase;
use kernel::KernelError;
use vodca::References;

/// Shared router state.
#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init().await?)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

/// Every service is implemented for the database, so routes call them
/// through [`Handler::database`].
#[derive(References)]
pub struct Handler {
    database: PostgresDatabase,
}

impl Handler {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        let database = PostgresDatabase::new().await?;
        tracing::info!("database ready");
        Ok(Self { database })
    }
}
