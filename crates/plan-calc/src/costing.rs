//! 材料成本彙總

use plan_core::{MaterialCost, PlanError, RawMaterial};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// 成本彙總結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostRollup {
    pub materials: BTreeMap<String, MaterialCost>,
    pub total_cost: Decimal,

    /// 總成本 ÷ 計劃（淨）產量，無條件捨去
    pub unit_cost: Decimal,
}

/// 成本彙總器
pub struct CostAggregator;

impl CostAggregator {
    /// 計算原物料成本
    ///
    /// 原物料目錄中找不到的項目以單價 0 計算（BOM 與原物料目錄各自維護，
    /// 可能不同步），不視為錯誤。
    pub fn price(
        required: &BTreeMap<String, Decimal>,
        catalog: &HashMap<String, RawMaterial>,
        net_qty: u64,
    ) -> plan_core::Result<CostRollup> {
        let mut materials = BTreeMap::new();
        let mut total_cost = Decimal::ZERO;

        for (name, &quantity) in required {
            let unit_price = match catalog.get(name) {
                Some(material) => material.price,
                None => {
                    tracing::warn!("原物料 {} 不在目錄中，以單價 0 計算", name);
                    0
                }
            };

            let cost = quantity
                .checked_mul(Decimal::from(unit_price))
                .ok_or_else(|| PlanError::Domain(format!("原物料 {} 成本溢位", name)))?;
            total_cost = total_cost
                .checked_add(cost)
                .ok_or_else(|| PlanError::Domain("總成本溢位".to_string()))?;

            materials.insert(
                name.clone(),
                MaterialCost {
                    quantity,
                    unit_price,
                    cost,
                },
            );
        }

        let unit_cost = if net_qty > 0 {
            (total_cost / Decimal::from(net_qty)).floor()
        } else {
            Decimal::ZERO
        };

        Ok(CostRollup {
            materials,
            total_cost,
            unit_cost,
        })
    }
}
