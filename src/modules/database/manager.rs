use crate::modules::error::{code::ErrorCode, BulkMailerError, BulkMailerResult};
use crate::modules::scheduler::nativedb::SCHEDULE_MODELS;
use crate::modules::settings::cli::SETTINGS;
use crate::modules::settings::dir::DATA_DIR_MANAGER;
use crate::raise_error;
use native_db::{Builder, Database};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Opens the scheduled send database. The handle is built once at startup and
/// passed to whoever needs it.
pub struct DatabaseManager;

impl DatabaseManager {
    pub fn open_schedule_db() -> BulkMailerResult<Arc<Database<'static>>> {
        if SETTINGS.bulkmailer_memory_mode_enabled {
            info!("Scheduled sends are kept in memory; they will not survive a restart");
            return Self::in_memory();
        }
        Self::open_file(
            &DATA_DIR_MANAGER.schedule_db,
            SETTINGS.bulkmailer_database_cache_size,
        )
    }

    pub fn in_memory() -> BulkMailerResult<Arc<Database<'static>>> {
        let database = Builder::new()
            .create_in_memory(&SCHEDULE_MODELS)
            .map_err(Self::handle_database_error)?;
        Ok(Arc::new(database))
    }

    pub fn open_file(
        path: &Path,
        cache_size: Option<usize>,
    ) -> BulkMailerResult<Arc<Database<'static>>> {
        let mut database = Builder::new()
            .set_cache_size(cache_size.unwrap_or(67108864).max(16777216)) //default 64MB
            .create(&SCHEDULE_MODELS, path)
            .map_err(Self::handle_database_error)?;
        database
            .compact()
            .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::StorageError))?;
        info!("Opened scheduled send database at {:?}", path);
        Ok(Arc::new(database))
    }

    fn handle_database_error(error: native_db::db_type::Error) -> BulkMailerError {
        match error {
            native_db::db_type::Error::RedbDatabaseError(database_error) => match database_error {
                redb::DatabaseError::DatabaseAlreadyOpen => {
                    raise_error!(
                        "Database is already open by another instance".into(),
                        ErrorCode::StorageError
                    )
                }
                other => {
                    raise_error!(
                        format!("Database error: {:?}", other),
                        ErrorCode::StorageError
                    )
                }
            },
            other => {
                raise_error!(
                    format!("Failed to create database: {:?}", other),
                    ErrorCode::StorageError
                )
            }
        }
    }
}
