use crate::traits::{DataStore, TableMetadata};
use config::DaoConfig;

/// Data-access facade: runs typed queries for any [`TableMetadata`] record
/// against the injected [`DataStore`].
#[derive(Clone)]
pub struct Dao<S: DataStore> {
    pub(crate) store: S,
    pub(crate) config: DaoConfig,
}

impl<S: DataStore> std::fmt::Debug for Dao<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dao")
            .field("batch_size", &self.config.batch_size)
            .field("page_size", &self.config.page_size)
            .field("primary_key", &self.config.primary_key)
            .finish()
    }
}

impl<S: DataStore> Dao<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, DaoConfig::default())
    }

    /// Zero sizes or an empty primary key in `config` fall back to the defaults
    pub fn with_config(store: S, config: DaoConfig) -> Self {
        Self {
            store,
            config: config.normalized(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &DaoConfig {
        &self.config
    }

    /// Explicit column, else the record's own primary key, else the configured one
    pub(crate) fn primary_key_column<T: TableMetadata>(&self, explicit: Option<&str>) -> String {
        explicit
            .or_else(|| T::primary_key_field())
            .unwrap_or(self.config.primary_key.as_str())
            .to_string()
    }
}
