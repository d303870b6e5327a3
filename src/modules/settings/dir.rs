use crate::modules::context::Initialize;
use crate::modules::settings::cli::SETTINGS;
use crate::{
    modules::error::{code::ErrorCode, BulkMailerResult},
    raise_error,
};
use std::path::PathBuf;
use std::sync::LazyLock;

pub const SCHEDULE_FILE: &str = "schedule.db";
const LOG_DIR: &str = "logs";

pub static DATA_DIR_MANAGER: LazyLock<DataDirManager> =
    LazyLock::new(|| DataDirManager::new(PathBuf::from(&SETTINGS.bulkmailer_root_dir)));

#[derive(Debug)]
pub struct DataDirManager {
    pub root_dir: PathBuf,
    pub schedule_db: PathBuf,
    pub log_dir: PathBuf,
}

impl Initialize for DataDirManager {
    async fn initialize() -> BulkMailerResult<()> {
        DATA_DIR_MANAGER.ensure_dirs()
    }
}

impl DataDirManager {
    pub fn new(root_dir: PathBuf) -> Self {
        Self {
            schedule_db: root_dir.join(SCHEDULE_FILE),
            log_dir: root_dir.join(LOG_DIR),
            root_dir,
        }
    }

    pub fn ensure_dirs(&self) -> BulkMailerResult<()> {
        std::fs::create_dir_all(&self.root_dir)
            .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))?;
        std::fs::create_dir_all(&self.log_dir)
            .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))?;
        Ok(())
    }
}
