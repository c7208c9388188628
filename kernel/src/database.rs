use crate::KernelError;

/// Hands out storage sessions. Sessions carry no multi-document
/// transaction; every write through them is applied on its own.
#[async_trait::async_trait]
pub trait DatabaseConnection<Connection>: 'static + Sync + Send {
    async fn acquire(&self) -> error_stack::Result<Connection, KernelError>;
}

pub trait DependOnDatabaseConnection<Connection>: 'static + Sync + Send {
    type DatabaseConnection: DatabaseConnection<Connection>;
    fn database_connection(&self) -> &Self::DatabaseConnection;
}

impl<T, Connection> DependOnDatabaseConnection<Connection> for T
where
    T: DatabaseConnection<Connection>,
{
    type DatabaseConnection = T;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        self
    }
}
