use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionError, TransactionTrait};

use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

/// Boxed future borrowed from the transaction it runs in.
pub type TxnFuture<'c, R> = Pin<Box<dyn Future<Output = Result<R, DomainError>> + Send + 'c>>;

/// Execute a closure within a database transaction.
///
/// Commits when the closure returns `Ok`, rolls back on `Err` and returns that
/// error unchanged. Begin/commit failures are mapped through `map_db_err`.
/// The closure must own everything it captures:
///
/// ```ignore
/// with_txn(&db, move |txn| Box::pin(async move {
///     games_sea::touch_if_status(txn, game_id, &[GameStatus::Waiting]).await?;
///     Ok(())
/// })).await?;
/// ```
pub async fn with_txn<R, F>(db: &DatabaseConnection, f: F) -> Result<R, DomainError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> TxnFuture<'c, R> + Send,
    R: Send,
{
    db.transaction::<F, R, DomainError>(f)
        .await
        .map_err(|e| match e {
            TransactionError::Connection(db_err) => map_db_err(db_err),
            TransactionError::Transaction(err) => err,
        })
}
