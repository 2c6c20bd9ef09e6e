use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DbConn, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, SqlErr,
};

use signup_core::error::RepoError;
use signup_core::ports::RecordStore;

/// Generic PostgreSQL record store.
///
/// Uniqueness is enforced by the table's unique index, so `create` is a
/// single `INSERT ... RETURNING` with no pre-check.
pub struct PostgresRecordStore<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresRecordStore<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

/// Classify a SeaORM error into the repository taxonomy.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        return RepoError::Duplicate(detail);
    }

    let message = err.to_string();
    if message.contains("duplicate key") || message.contains("unique constraint") {
        return RepoError::Duplicate(message);
    }

    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(message),
        _ => RepoError::Query(message),
    }
}

#[async_trait]
impl<E, T> RecordStore<T> for PostgresRecordStore<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync + 'static,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync + 'static,
    T: From<E::Model> + Into<E::ActiveModel> + Send + Sync + 'static,
{
    async fn create(&self, record: T) -> Result<T, RepoError> {
        let active_model: E::ActiveModel = record.into();
        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        E::find().count(&self.db).await.map_err(map_db_err)
    }
}
