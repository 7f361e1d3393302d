//! # Plan Store
//!
//! 以 CSV 檔案保存產品、原物料、BOM 與庫存記錄

pub mod csv_store;
pub mod records;

// Re-export 主要類型
pub use csv_store::CsvCatalogStore;

use std::path::PathBuf;

/// 目錄儲存錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("檔案存取失敗 ({}): {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV 解析錯誤: {0}")]
    Csv(#[from] csv::Error),

    #[error("記錄已存在: {entity} {key}")]
    Duplicate { entity: &'static str, key: String },

    #[error("無效的記錄: {0}")]
    Invalid(String),
}

impl From<StoreError> for plan_core::PlanError {
    fn from(err: StoreError) -> Self {
        plan_core::PlanError::Catalog(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
