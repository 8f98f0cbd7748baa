//! Generic query operations for any SeaORM entity.
//!
//! [`QueryRepository`] supplies list, paging and raw SQL operations as
//! default methods; an implementor only says which executor to run on.
//! Passing a `DatabaseTransaction` as the executor runs every statement
//! inside that transaction. The repository never begins, commits or closes
//! anything it is handed.

use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait, QueryResult, TryGetable};

use common::{AppError, AppResult};
use domain::{parse_ordering, to_predicate_group, PageRequest, Predicate};

use crate::condition::{apply_ordering, filtered_select};
use crate::params::Params;

fn table_name<E: EntityTrait>() -> String {
    E::default().table_name().to_string()
}

/// Query operations over entity `E`.
#[async_trait]
pub trait QueryRepository<E>: Send + Sync
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    /// Connection or transaction the statements run on
    type Db: ConnectionTrait;

    /// Get the executor reference
    fn db(&self) -> &Self::Db;

    /// All rows matching `predicate` (every row when `None`), unordered
    async fn list(&self, predicate: Option<&Predicate>) -> AppResult<Vec<E::Model>> {
        let select = filtered_select::<E>(&to_predicate_group(predicate))?;
        tracing::debug!(table = %table_name::<E>(), "list");

        select.all(self.db()).await.map_err(AppError::from)
    }

    /// Number of rows matching `predicate`
    async fn count(&self, predicate: Option<&Predicate>) -> AppResult<u64> {
        let select = filtered_select::<E>(&to_predicate_group(predicate))?;
        tracing::debug!(table = %table_name::<E>(), "count");

        select.count(self.db()).await.map_err(AppError::from)
    }

    /// One page of rows matching `predicate`, sorted by `ordering`.
    ///
    /// `ordering` looks like `"CreationTime desc,Id asc"`. No total is
    /// computed; use [`QueryRepository::count`] for that.
    async fn paged(
        &self,
        page: PageRequest,
        ordering: &str,
        predicate: Option<&Predicate>,
    ) -> AppResult<Vec<E::Model>> {
        let sorting = parse_ordering(ordering)?;
        let select = filtered_select::<E>(&to_predicate_group(predicate))?;
        let select = apply_ordering(select, &sorting)?;
        tracing::debug!(
            table = %table_name::<E>(),
            page = page.index(),
            size = page.size(),
            "paged"
        );

        select
            .paginate(self.db(), page.size())
            .fetch_page(page.zero_based())
            .await
            .map_err(AppError::from)
    }

    /// Materialize entities from caller-supplied SQL
    async fn raw_query(&self, sql: &str, params: Params) -> AppResult<Vec<E::Model>> {
        let stmt = params.into_statement(self.db().get_database_backend(), sql)?;
        tracing::debug!(table = %table_name::<E>(), sql = %stmt.sql, "raw_query");

        E::find()
            .from_raw_sql(stmt)
            .all(self.db())
            .await
            .map_err(AppError::from)
    }

    /// Execute non-query SQL, returning the number of affected rows
    async fn raw_execute(&self, sql: &str, params: Params) -> AppResult<u64> {
        let stmt = params.into_statement(self.db().get_database_backend(), sql)?;
        tracing::debug!(table = %table_name::<E>(), sql = %stmt.sql, "raw_execute");

        let result = self.db().execute(stmt).await.map_err(AppError::from)?;
        Ok(result.rows_affected())
    }

    /// First column of the first row, read as `T`.
    ///
    /// `None` when no row comes back or the value is SQL `NULL`.
    async fn raw_scalar<T>(&self, sql: &str, params: Params) -> AppResult<Option<T>>
    where
        T: TryGetable + Send,
    {
        let stmt = params.into_statement(self.db().get_database_backend(), sql)?;
        tracing::debug!(table = %table_name::<E>(), sql = %stmt.sql, "raw_scalar");

        let row: Option<QueryResult> = self.db().query_one(stmt).await.map_err(AppError::from)?;
        let value = row
            .map(|row| row.try_get_by_index::<Option<T>>(0))
            .transpose()
            .map_err(AppError::from)?;

        Ok(value.flatten())
    }
}

/// Query repository borrowing an executor for its lifetime.
///
/// ```ignore
/// let txn = db.begin().await?;
/// let users = Repository::<user::Entity, _>::new(&txn);
/// users.raw_execute("DELETE FROM users WHERE age < @age", Params::new().bind("age", 18)).await?;
/// txn.commit().await?;
/// ```
pub struct Repository<'a, E, C> {
    db: &'a C,
    _entity: PhantomData<fn() -> E>,
}

impl<'a, E, C> Repository<'a, E, C>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    pub fn new(db: &'a C) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

impl<'a, E, C> QueryRepository<E> for Repository<'a, E, C>
where
    E: EntityTrait,
    E::Model: Send + Sync,
    C: ConnectionTrait,
{
    type Db = C;

    fn db(&self) -> &C {
        self.db
    }
}

/// Shorthand for building a [`Repository`] from any executor.
pub trait RepositoryExt: ConnectionTrait + Sized {
    fn repository<E: EntityTrait>(&self) -> Repository<'_, E, Self> {
        Repository::new(self)
    }
}

impl<C: ConnectionTrait> RepositoryExt for C {}
