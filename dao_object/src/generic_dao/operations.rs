//! Facade operations
//!
//! Every operation finalizes its query into a fresh condition or statement, hands
//! it to the store and maps the returned rows into records. Store errors are
//! passed through untouched.

use super::core::Dao;
use super::mapping::{decode_row, decode_rows, encode_entity, non_default_columns};
use crate::errors::DaoError;
use crate::id_type::PrimaryKey;
use crate::page::Page;
use crate::query_builder::Query;
use crate::traits::{DataStore, TableMetadata};
use serde::de::DeserializeOwned;

impl<S: DataStore> Dao<S> {
    /// Insert one record, returning the affected row count
    pub async fn insert<T: TableMetadata>(&self, entity: &T) -> Result<u64, DaoError> {
        let row = encode_entity(entity)?;
        tracing::debug!("[INSERT] Table: {}", T::table_name());
        self.store.insert(T::table_name(), vec![row]).await
    }

    /// Insert records in chunks of the configured batch size
    pub async fn insert_batch<T: TableMetadata>(&self, entities: &[T]) -> Result<u64, DaoError> {
        self.insert_batch_size(entities, self.config.batch_size).await
    }

    /// Insert records in chunks of `batch_size` rows; `0` means the configured size.
    ///
    /// An empty slice is a successful no-op. Chunks are sent in order and the first
    /// failing chunk stops the batch.
    pub async fn insert_batch_size<T: TableMetadata>(
        &self,
        entities: &[T],
        batch_size: usize,
    ) -> Result<u64, DaoError> {
        if entities.is_empty() {
            return Ok(0);
        }
        let batch_size = if batch_size == 0 {
            self.config.batch_size
        } else {
            batch_size
        };

        let rows = entities
            .iter()
            .map(encode_entity)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            "[INSERT_BATCH] Table: {}, rows: {}, batch size: {}",
            T::table_name(),
            rows.len(),
            batch_size
        );

        let mut affected = 0;
        for chunk in rows.chunks(batch_size) {
            affected += self.store.insert(T::table_name(), chunk.to_vec()).await?;
        }
        Ok(affected)
    }

    /// Delete the row whose primary key equals `id`
    pub async fn delete_by_id<T: TableMetadata, K: PrimaryKey>(
        &self,
        id: K,
        primary_key_column: Option<&str>,
    ) -> Result<u64, DaoError> {
        let column = self.primary_key_column::<T>(primary_key_column);
        let query = Query::<T>::new().eq(&column, id.to_arg());
        self.delete(&query).await
    }

    /// Delete every row whose primary key is in `ids`; no-op for an empty slice
    pub async fn delete_by_ids<T: TableMetadata, K: PrimaryKey>(
        &self,
        ids: &[K],
        primary_key_column: Option<&str>,
    ) -> Result<u64, DaoError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let column = self.primary_key_column::<T>(primary_key_column);
        let query = Query::<T>::new().in_values(&column, ids.iter().map(K::to_arg));
        self.delete(&query).await
    }

    /// Delete every row matching the query's condition.
    ///
    /// A query without any predicate is rejected instead of clearing the table.
    pub async fn delete<T: TableMetadata>(&self, query: &Query<T>) -> Result<u64, DaoError> {
        let condition = query.build_condition();
        if condition.is_empty() {
            return Err(DaoError::missing_where_clause(T::table_name(), "delete"));
        }

        tracing::debug!("[DELETE] Table: {}, WHERE {}", T::table_name(), condition.sql);
        tracing::trace!("[DELETE] params count: {}", condition.args.len());
        self.store.delete(T::table_name(), condition).await
    }

    /// Update the row whose primary key equals `id` from the entity's
    /// non-default fields.
    ///
    /// `null`, `false`, zero and empty-string fields are skipped, so they can not
    /// be written through this call; use [`Dao::update`] with explicit values for
    /// that. The primary-key column itself is never written.
    pub async fn update_by_id<T: TableMetadata, K: PrimaryKey>(
        &self,
        entity: &T,
        id: K,
        primary_key_column: Option<&str>,
    ) -> Result<u64, DaoError> {
        let column = self.primary_key_column::<T>(primary_key_column);
        let values = non_default_columns(encode_entity(entity)?, &column);
        if values.is_empty() {
            tracing::debug!("[UPDATE_BY_ID] Table: {}, nothing to update", T::table_name());
            return Ok(0);
        }

        let condition = Query::<T>::new().eq(&column, id.to_arg()).build_condition();
        tracing::debug!(
            "[UPDATE_BY_ID] Table: {}, columns: {}, WHERE {}",
            T::table_name(),
            values.len(),
            condition.sql
        );
        self.store.update(T::table_name(), values, condition).await
    }

    /// Write the query's explicit update values into every matching row.
    ///
    /// Values are written exactly as set, zero values included. An empty update map
    /// is a no-op; a query without predicates is rejected.
    pub async fn update<T: TableMetadata>(&self, query: &Query<T>) -> Result<u64, DaoError> {
        let update_map = query.update_map();
        if update_map.is_empty() {
            tracing::debug!("[UPDATE] Table: {}, nothing to update", T::table_name());
            return Ok(0);
        }

        let condition = query.build_condition();
        if condition.is_empty() {
            return Err(DaoError::missing_where_clause(T::table_name(), "update"));
        }

        tracing::debug!("[UPDATE] Table: {}, WHERE {}", T::table_name(), condition.sql);
        tracing::trace!(
            "[UPDATE] update fields count: {}, params count: {}",
            update_map.len(),
            condition.args.len()
        );
        self.store
            .update(T::table_name(), update_map.to_row(), condition)
            .await
    }

    /// Fetch the record with primary key `id`; `Ok(None)` when no row matches
    pub async fn select_by_id<T: TableMetadata, K: PrimaryKey>(
        &self,
        id: K,
    ) -> Result<Option<T>, DaoError> {
        let column = self.primary_key_column::<T>(None);
        let query = Query::<T>::new().eq(&column, id.to_arg());
        self.select_one(&query).await
    }

    /// Fetch the records whose primary key is in `ids`
    pub async fn select_by_ids<T: TableMetadata, K: PrimaryKey>(
        &self,
        ids: &[K],
        primary_key_column: Option<&str>,
    ) -> Result<Vec<T>, DaoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let column = self.primary_key_column::<T>(primary_key_column);
        let query = Query::<T>::new().in_values(&column, ids.iter().map(K::to_arg));
        self.select_list(&query).await
    }

    /// Fetch the first matching record; `Ok(None)` when no row matches
    pub async fn select_one<T: TableMetadata>(
        &self,
        query: &Query<T>,
    ) -> Result<Option<T>, DaoError> {
        let statement = query.to_statement().with_limit(1);
        tracing::debug!(
            "[SELECT_ONE] Table: {}, WHERE {}",
            T::table_name(),
            statement.condition.sql
        );

        let rows = self.store.select(T::table_name(), statement).await?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(decode_row(row)?)),
            None => Ok(None),
        }
    }

    /// Fetch every matching record
    pub async fn select_list<T: TableMetadata>(
        &self,
        query: &Query<T>,
    ) -> Result<Vec<T>, DaoError> {
        self.select_list_model::<T, T>(query).await
    }

    /// Fetch every matching row mapped into the projection `R`
    pub async fn select_list_model<T: TableMetadata, R: DeserializeOwned>(
        &self,
        query: &Query<T>,
    ) -> Result<Vec<R>, DaoError> {
        let statement = query.to_statement();
        tracing::debug!(
            "[SELECT_LIST] Table: {}, WHERE {}",
            T::table_name(),
            statement.condition.sql
        );
        tracing::trace!("[SELECT_LIST] params count: {}", statement.condition.args.len());

        let rows = self.store.select(T::table_name(), statement).await?;
        decode_rows(rows)
    }

    /// Count matching rows, ignoring ordering and paging
    pub async fn select_count<T: TableMetadata>(
        &self,
        query: &Query<T>,
    ) -> Result<i64, DaoError> {
        let statement = query.to_statement().for_count();
        tracing::debug!(
            "[SELECT_COUNT] Table: {}, WHERE {}",
            T::table_name(),
            statement.condition.sql
        );
        self.store.count(T::table_name(), statement).await
    }

    /// Fill `page` with its slice of matching records and the total row count
    pub async fn select_page<T: TableMetadata>(
        &self,
        page: &mut Page<T>,
        query: &Query<T>,
    ) -> Result<(), DaoError> {
        self.select_page_model::<T, T>(page, query).await
    }

    /// Fill `page` with matching rows mapped into the projection `R`.
    ///
    /// The total is counted first with the unpaginated filter. If counting fails
    /// the error is returned at once, no rows are fetched and `page` is left as it
    /// was. Otherwise the same filter is run again with the page's LIMIT/OFFSET.
    pub async fn select_page_model<T: TableMetadata, R: DeserializeOwned>(
        &self,
        page: &mut Page<R>,
        query: &Query<T>,
    ) -> Result<(), DaoError> {
        let statement = query.to_statement();
        let total = self
            .store
            .count(T::table_name(), statement.for_count())
            .await?;
        page.total = total;

        let pagination = page.pagination(self.config.page_size);
        tracing::debug!(
            "[SELECT_PAGE] Table: {}, total: {}, {}",
            T::table_name(),
            total,
            pagination.to_sql()
        );

        let rows = self
            .store
            .select(T::table_name(), statement.with_pagination(pagination))
            .await?;
        page.records = decode_rows(rows)?;
        Ok(())
    }
}
