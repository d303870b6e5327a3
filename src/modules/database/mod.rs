use crate::modules::error::BulkMailerResult;
use crate::raise_error;
use db_type::{KeyOptions, ToKeyDefinition};
use itertools::Itertools;
use native_db::*;
use std::sync::Arc;
use transaction::RwTransaction;

use super::error::code::ErrorCode;
pub mod manager;
#[cfg(test)]
mod tests;

pub struct ModelsAdapter {
    pub models: Models,
}

impl ModelsAdapter {
    pub fn new() -> Self {
        ModelsAdapter {
            models: Models::new(),
        }
    }

    pub fn register_model<T: ToInput>(&mut self) {
        self.models
            .define::<T>()
            .unwrap_or_else(|e| panic!("failed to define model: {e:#?}"));
    }
}

macro_rules! storage_error {
    ($e:expr) => {
        raise_error!(format!("{:#?}", $e), ErrorCode::StorageError)
    };
}

pub async fn insert_impl<T: ToInput + Clone + Send + 'static>(
    database: &Arc<Database<'static>>,
    item: T,
) -> BulkMailerResult<()> {
    let db = database.clone();
    tokio::task::spawn_blocking(move || {
        let rw_transaction = db.rw_transaction().map_err(|e| storage_error!(e))?;
        rw_transaction.insert(item).map_err(|e| storage_error!(e))?;
        rw_transaction.commit().map_err(|e| storage_error!(e))?;
        Ok(())
    })
    .await
    .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))?
}

/// Reads the current item and writes the replacement in one write transaction.
///
/// When `updated` returns `Ok(None)` nothing is written and the transaction is
/// dropped. Returns the item that was written, if any.
pub async fn update_impl<T: ToInput + Clone + std::fmt::Debug + Send + 'static>(
    database: &Arc<Database<'static>>,
    current: impl FnOnce(&RwTransaction) -> BulkMailerResult<T> + Send + 'static,
    updated: impl FnOnce(&T) -> BulkMailerResult<Option<T>> + Send + 'static,
) -> BulkMailerResult<Option<T>> {
    let db = database.clone();
    tokio::task::spawn_blocking(move || {
        let rw = db.rw_transaction().map_err(|e| storage_error!(e))?;
        let current_item = current(&rw)?;
        let Some(updated_item) = updated(&current_item)? else {
            return Ok(None);
        };
        rw.update(current_item, updated_item.clone())
            .map_err(|e| storage_error!(e))?;
        rw.commit().map_err(|e| storage_error!(e))?;
        Ok(Some(updated_item))
    })
    .await
    .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))?
}

pub async fn list_all_impl<T: ToInput + Clone + Send + 'static>(
    database: &Arc<Database<'static>>,
) -> BulkMailerResult<Vec<T>> {
    let db = database.clone();
    tokio::task::spawn_blocking(move || {
        let r_transaction = db.r_transaction().map_err(|e| storage_error!(e))?;
        let entities: Vec<T> = r_transaction
            .scan()
            .primary()
            .map_err(|e| storage_error!(e))?
            .all()
            .map_err(|e| storage_error!(e))?
            .try_collect()
            .map_err(|e| storage_error!(e))?;
        Ok(entities)
    })
    .await
    .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))?
}

pub async fn filter_by_secondary_key_impl<T: ToInput + Clone + Send + 'static>(
    database: &Arc<Database<'static>>,
    key_def: impl ToKeyDefinition<KeyOptions> + Send + 'static,
    start_with: impl ToKey + Send + 'static,
) -> BulkMailerResult<Vec<T>> {
    let db = database.clone();
    tokio::task::spawn_blocking(move || {
        let r_transaction = db.r_transaction().map_err(|e| storage_error!(e))?;
        let entities: Vec<T> = r_transaction
            .scan()
            .secondary(key_def)
            .map_err(|e| storage_error!(e))?
            .start_with(start_with)
            .map_err(|e| storage_error!(e))?
            .try_collect()
            .map_err(|e| storage_error!(e))?;
        Ok(entities)
    })
    .await
    .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))?
}

pub async fn secondary_find_impl<T: ToInput + Clone + Send + 'static>(
    database: &Arc<Database<'static>>,
    key_def: impl ToKeyDefinition<KeyOptions> + Send + 'static,
    key: impl ToKey + Send + 'static,
) -> BulkMailerResult<Option<T>> {
    let db = database.clone();
    tokio::task::spawn_blocking(move || {
        let r_transaction = db.r_transaction().map_err(|e| storage_error!(e))?;
        let entity: Option<T> = r_transaction
            .get()
            .secondary(key_def, key)
            .map_err(|e| storage_error!(e))?;
        Ok(entity)
    })
    .await
    .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))?
}
