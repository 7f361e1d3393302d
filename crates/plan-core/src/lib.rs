//! # Plan Core
//!
//! 生產計劃核心資料模型與類型定義

pub mod catalog;
pub mod config;
pub mod plan;
pub mod request;

// Re-export 主要類型
pub use catalog::{BomEntry, CatalogSnapshot, CatalogSource, InventoryEntry, Product, RawMaterial};
pub use config::PlanConfig;
pub use plan::{DefectBreakdown, FeasiblePlan, MaterialCost, PlanResult, Shortfall};
pub use request::ProductionRequest;

/// 生產計劃錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// 輸入超出定義域（良率 ≤ 0、負數數量或不良率）
    #[error("無效的輸入: {0}")]
    Domain(String),

    /// 產品尚未設定 BOM
    #[error("產品 {0} 沒有 BOM 設定，請先在 BOM 管理中設定構成")]
    BomNotFound(String),

    /// 目錄（外部資料來源）讀取失敗
    #[error("目錄讀取錯誤: {0}")]
    Catalog(String),
}

impl PlanError {
    /// 錯誤分類代碼（供服務層回應使用）
    pub fn kind(&self) -> &'static str {
        match self {
            PlanError::Domain(_) => "domain",
            PlanError::BomNotFound(_) => "bom_not_found",
            PlanError::Catalog(_) => "catalog",
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
