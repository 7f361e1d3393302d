//! # Production Plan
//!
//! 生產計劃系統：計算核心、CSV 目錄與 JSON 服務端點

pub mod logging;
pub mod service;

pub use plan_calc::PlanCalculator;
pub use plan_core::{
    CatalogSnapshot, CatalogSource, FeasiblePlan, PlanConfig, PlanError, PlanResult,
    ProductionRequest, Shortfall,
};
pub use plan_store::CsvCatalogStore;
pub use service::{PlanResponse, PlanService};
