//! # Production Plan Calculation Engine
//!
//! 生產計劃計算引擎：良率 → BOM 展開 → 庫存檢查 → 成本彙總

pub mod availability;
pub mod bom;
pub mod calculator;
pub mod costing;
pub mod yield_calc;

// Re-export 主要類型
pub use availability::{Availability, InventoryValidator};
pub use bom::BomResolver;
pub use calculator::PlanCalculator;
pub use costing::{CostAggregator, CostRollup};
pub use yield_calc::{YieldBreakdown, YieldCalculator};
