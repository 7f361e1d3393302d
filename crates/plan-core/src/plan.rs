//! 生產計劃結果模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 單一原物料的缺料明細
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    /// 需求數量
    pub required: Decimal,

    /// 現有庫存
    pub available: Decimal,

    /// 缺少數量（需求 - 現有）
    pub shortage: Decimal,
}

impl Shortfall {
    /// 創建缺料明細
    pub fn new(required: Decimal, available: Decimal) -> Self {
        Self {
            required,
            available,
            shortage: required - available,
        }
    }
}

/// 不良數量明細
///
/// `raw_defect_qty` 與 `process_defect_qty` 各自由計劃數量推算，
/// 兩者相加不一定等於 `defect_qty`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectBreakdown {
    /// 總不良數（毛產量 - 計劃數量）
    pub defect_qty: u64,

    /// 原料不良數
    pub raw_defect_qty: u64,

    /// 製程不良數
    pub process_defect_qty: u64,
}

/// 單一原物料的成本明細
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialCost {
    pub quantity: Decimal,

    /// 單價（目錄中不存在時為 0）
    pub unit_price: u64,

    pub cost: Decimal,
}

/// 可行的生產計劃
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasiblePlan {
    pub product: String,

    /// 計劃（淨）產量
    pub planned_qty: u64,

    pub start_date: Option<NaiveDate>,

    /// 需生產的毛產量
    pub required_production: u64,

    #[serde(flatten)]
    pub defects: DefectBreakdown,

    /// 原物料需求
    pub materials: BTreeMap<String, Decimal>,

    /// 原物料需求與成本
    pub materials_with_cost: BTreeMap<String, MaterialCost>,

    /// 總材料成本
    pub total_cost: Decimal,

    /// 每單位計劃產量的材料成本（無條件捨去）
    pub unit_cost: Decimal,
}

/// 生產計劃結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PlanResult {
    /// 庫存不足，列出所有缺料
    Infeasible {
        shortfalls: BTreeMap<String, Shortfall>,
    },

    /// 可行計劃
    Feasible(FeasiblePlan),
}

impl PlanResult {
    /// 檢查計劃是否可行
    pub fn is_feasible(&self) -> bool {
        matches!(self, PlanResult::Feasible(_))
    }

    /// 取得可行計劃
    pub fn as_feasible(&self) -> Option<&FeasiblePlan> {
        match self {
            PlanResult::Feasible(plan) => Some(plan),
            PlanResult::Infeasible { .. } => None,
        }
    }

    /// 取得缺料明細
    pub fn shortfalls(&self) -> Option<&BTreeMap<String, Shortfall>> {
        match self {
            PlanResult::Infeasible { shortfalls } => Some(shortfalls),
            PlanResult::Feasible(_) => None,
        }
    }
}
