//! 烘焙坊生產計劃完整範例
//!
//! 展示從請求到成本彙總的完整計算流程

use std::str::FromStr;

use plan_core::{BomEntry, InventoryEntry, Product, RawMaterial};
use production_plan::{CatalogSnapshot, PlanCalculator, PlanResult, ProductionRequest};
use rust_decimal::Decimal;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("===== Bakery Production Plan Example =====\n");

    // 步驟 1: 建立目錄快照
    println!("[1] Create Catalog Snapshot");
    let catalog = CatalogSnapshot::from_records(
        vec![Product::new("CAKE", 5000)],
        vec![
            RawMaterial::new("flour", "kg", 10),
            RawMaterial::new("sugar", "kg", 20),
        ],
        vec![
            BomEntry::new("CAKE", "flour", Decimal::from_str("2.0")?),
            BomEntry::new("CAKE", "sugar", Decimal::from_str("1.0")?),
        ],
        vec![InventoryEntry::new("flour", 100)],
    );
    println!("    CAKE = flour x2.0 + sugar x1.0\n");

    // 步驟 2: 建立請求
    println!("[2] Create Request");
    let request = ProductionRequest::new("CAKE", 100)
        .with_raw_defect_rate(Decimal::from_str("0.05")?)
        .with_process_defect_rate(Decimal::from_str("0.05")?)
        .with_round_up(true);
    println!(
        "    {} x {}, defect rates {} / {}\n",
        request.product, request.plan_qty, request.raw_defect_rate, request.process_defect_rate
    );

    // 步驟 3: 庫存不足的計算
    println!("[3] Calculate With Short Inventory");
    print_result(&PlanCalculator::new(catalog.clone()).calculate(&request)?);

    // 步驟 4: 補貨後重新計算
    println!("[4] Restock And Recalculate");
    let restocked = catalog
        .with_inventory(InventoryEntry::new("flour", 300))
        .with_inventory(InventoryEntry::new("sugar", 200));
    print_result(&PlanCalculator::new(restocked).calculate(&request)?);

    Ok(())
}

fn print_result(result: &PlanResult) {
    match result {
        PlanResult::Infeasible { shortfalls } => {
            println!("    Infeasible: {} material(s) short", shortfalls.len());
            for (name, s) in shortfalls {
                println!(
                    "      - {}: required {}, available {}, shortage {}",
                    name, s.required, s.available, s.shortage
                );
            }
        }
        PlanResult::Feasible(plan) => {
            println!(
                "    Feasible: produce {} (defects {}: raw {}, process {})",
                plan.required_production,
                plan.defects.defect_qty,
                plan.defects.raw_defect_qty,
                plan.defects.process_defect_qty
            );
            for (name, cost) in &plan.materials_with_cost {
                println!(
                    "      - {}: {} x {} = {}",
                    name, cost.quantity, cost.unit_price, cost.cost
                );
            }
            println!(
                "    Total cost {}, unit cost {}",
                plan.total_cost, plan.unit_cost
            );
        }
    }
    println!();
}
