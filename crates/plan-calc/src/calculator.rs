//! 生產計劃主計算器

use plan_core::{CatalogSnapshot, FeasiblePlan, PlanResult, ProductionRequest};

use crate::availability::{Availability, InventoryValidator};
use crate::bom::BomResolver;
use crate::costing::CostAggregator;
use crate::yield_calc::YieldCalculator;

/// 生產計劃計算器
///
/// 持有請求當下的目錄快照，計算過程不修改任何資料。
pub struct PlanCalculator {
    snapshot: CatalogSnapshot,
}

impl PlanCalculator {
    /// 創建新的計算器
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self { snapshot }
    }

    /// 主計算入口
    pub fn calculate(&self, request: &ProductionRequest) -> plan_core::Result<PlanResult> {
        tracing::info!(
            "開始生產計劃計算：產品 {}，計劃數量 {}",
            request.product,
            request.plan_qty
        );

        let start_time = std::time::Instant::now();
        request.validate()?;

        // Step 1: 良率換算毛產量
        tracing::debug!("Step 1: 良率計算");
        let yield_breakdown = YieldCalculator::compute_gross(
            request.plan_qty,
            request.raw_defect_rate,
            request.process_defect_rate,
            request.round_up,
        )?;

        // Step 2: BOM 展開
        tracing::debug!("Step 2: BOM 展開");
        let required = BomResolver::resolve(
            &request.product,
            yield_breakdown.gross_qty,
            &self.snapshot.bom,
        )?;
        tracing::debug!("原物料數量: {}", required.len());

        // Step 3: 庫存檢查，不足時直接結束
        tracing::debug!("Step 3: 庫存檢查");
        if let Availability::Insufficient(shortfalls) =
            InventoryValidator::validate(&required, &self.snapshot.inventory)
        {
            tracing::info!(
                "庫存不足，無法建立生產計劃：{} 項原物料短缺",
                shortfalls.len()
            );
            return Ok(PlanResult::Infeasible { shortfalls });
        }

        // Step 4: 成本彙總
        tracing::debug!("Step 4: 成本彙總");
        let rollup =
            CostAggregator::price(&required, &self.snapshot.raw_materials, request.plan_qty)?;

        tracing::info!(
            "生產計劃計算完成，耗時 {:?}：毛產量 {}，總成本 {}",
            start_time.elapsed(),
            yield_breakdown.gross_qty,
            rollup.total_cost
        );

        Ok(PlanResult::Feasible(FeasiblePlan {
            product: request.product.clone(),
            planned_qty: request.plan_qty,
            start_date: request.start_date,
            required_production: yield_breakdown.gross_qty,
            defects: yield_breakdown.defects,
            materials: required,
            materials_with_cost: rollup.materials,
            total_cost: rollup.total_cost,
            unit_cost: rollup.unit_cost,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use plan_core::{BomEntry, InventoryEntry, PlanError, RawMaterial};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn rate(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn bakery(flour: u64, sugar: Option<u64>) -> CatalogSnapshot {
        let mut snapshot = CatalogSnapshot::new()
            .with_raw_material(RawMaterial::new("flour", "kg", 10))
            .with_raw_material(RawMaterial::new("sugar", "kg", 20))
            .with_bom_entry(BomEntry::new("CAKE", "flour", rate("2.0")))
            .with_bom_entry(BomEntry::new("CAKE", "sugar", rate("1.0")))
            .with_inventory(InventoryEntry::new("flour", flour));
        if let Some(sugar) = sugar {
            snapshot = snapshot.with_inventory(InventoryEntry::new("sugar", sugar));
        }
        snapshot
    }

    fn cake_request() -> ProductionRequest {
        ProductionRequest::new("CAKE", 100)
            .with_raw_defect_rate(rate("0.05"))
            .with_process_defect_rate(rate("0.05"))
            .with_round_up(true)
    }

    #[test]
    fn test_feasible_plan() {
        let calculator = PlanCalculator::new(bakery(300, Some(200)));
        let result = calculator.calculate(&cake_request()).unwrap();

        let plan = result.as_feasible().expect("plan should be feasible");
        assert_eq!(plan.required_production, 111);
        assert_eq!(plan.defects.defect_qty, 11);
        assert_eq!(plan.materials["flour"], Decimal::from(222));
        assert_eq!(plan.materials["sugar"], Decimal::from(111));
        assert_eq!(plan.total_cost, Decimal::from(4440));
        assert_eq!(plan.unit_cost, Decimal::from(44));
    }

    #[test]
    fn test_infeasible_plan_lists_all_shortfalls() {
        let calculator = PlanCalculator::new(bakery(100, None));
        let result = calculator.calculate(&cake_request()).unwrap();

        let shortfalls = result.shortfalls().expect("plan should be infeasible");
        assert_eq!(shortfalls.len(), 2);
        assert_eq!(shortfalls["flour"].shortage, Decimal::from(122));
        assert_eq!(shortfalls["sugar"].available, Decimal::ZERO);
        assert_eq!(shortfalls["sugar"].shortage, Decimal::from(111));
    }

    #[test]
    fn test_unknown_product() {
        let calculator = PlanCalculator::new(bakery(300, Some(200)));
        let request = ProductionRequest::new("PIE", 10);

        let result = calculator.calculate(&request);
        assert!(matches!(result, Err(PlanError::BomNotFound(_))));
    }

    #[test]
    fn test_invalid_rate_rejected_before_bom() {
        // 產品沒有 BOM，但不良率錯誤應優先回報
        let calculator = PlanCalculator::new(CatalogSnapshot::new());
        let request = ProductionRequest::new("PIE", 10).with_raw_defect_rate(Decimal::ONE);

        let result = calculator.calculate(&request);
        assert!(matches!(result, Err(PlanError::Domain(_))));
    }

    #[test]
    fn test_start_date_echoed() {
        let start = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
        let calculator = PlanCalculator::new(bakery(300, Some(200)));
        let request = cake_request().with_start_date(start);

        let result = calculator.calculate(&request).unwrap();
        assert_eq!(result.as_feasible().unwrap().start_date, Some(start));
    }

    #[test]
    fn test_repeated_calculation_is_identical() {
        let calculator = PlanCalculator::new(bakery(300, Some(200)));

        let first = calculator.calculate(&cake_request()).unwrap();
        let second = calculator.calculate(&cake_request()).unwrap();
        assert_eq!(first, second);
    }
}
