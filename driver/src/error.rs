use error_stack::Report;
use kernel::{KernelError, KernelErrorExt};

/// Maps backend errors onto the kernel taxonomy.
pub trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}

impl<T> ConvertError for Result<T, sqlx::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let (kind, message) = match &error {
                sqlx::Error::PoolTimedOut => {
                    (KernelError::Timeout, Some("database connection timed out"))
                }
                sqlx::Error::Database(database) if database.is_unique_violation() => {
                    (KernelError::Conflict, Some("duplicate document"))
                }
                sqlx::Error::Database(database) if database.is_check_violation() => (
                    KernelError::Validation,
                    Some("document violates a storage constraint"),
                ),
                _ => (KernelError::Internal, None),
            };
            let report = Report::from(error).change_context(kind);
            match message {
                Some(message) => report.with_message(message),
                None => report,
            }
        })
    }
}

impl<T> ConvertError for Result<T, sqlx::migrate::MigrateError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::from(error).change_context(KernelError::Internal))
    }
}

impl<T> ConvertError for Result<T, serde_json::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::from(error).change_context(KernelError::Internal))
    }
}

impl<T> ConvertError for Result<T, dotenvy::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::from(error).change_context(KernelError::Internal))
    }
}
